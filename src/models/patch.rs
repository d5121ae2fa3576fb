//! Partial updates
//!
//! Each updatable entity has a patch struct of optional fields. `merge` applies
//! one to a loaded record and rejects a patch that carries no fields.

use crate::error::AppError;

pub trait Patch<T> {
    /// True when no field is set
    fn is_empty(&self) -> bool;

    /// Overwrite the fields that are set
    fn apply_to(self, target: &mut T);
}

pub fn merge<T, P>(mut target: T, patch: P) -> Result<T, AppError>
where
    P: Patch<T>,
{
    if patch.is_empty() {
        return Err(AppError::validation("No valid fields to update"));
    }

    patch.apply_to(&mut target);
    Ok(target)
}

/// Assign `value` to `slot` when present
pub(crate) fn set<V>(slot: &mut V, value: Option<V>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Note {
        title: String,
        body: String,
    }

    #[derive(Default)]
    struct NotePatch {
        title: Option<String>,
        body: Option<String>,
    }

    impl Patch<Note> for NotePatch {
        fn is_empty(&self) -> bool {
            self.title.is_none() && self.body.is_none()
        }

        fn apply_to(self, target: &mut Note) {
            set(&mut target.title, self.title);
            set(&mut target.body, self.body);
        }
    }

    fn note() -> Note {
        Note {
            title: "a".to_string(),
            body: "b".to_string(),
        }
    }

    #[test]
    fn test_merge_applies_set_fields_only() {
        let patch = NotePatch {
            body: Some("new".to_string()),
            ..Default::default()
        };

        let merged = merge(note(), patch).unwrap();
        assert_eq!(merged.title, "a");
        assert_eq!(merged.body, "new");
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let err = merge(note(), NotePatch::default()).unwrap_err();
        assert_eq!(err.user_message(), "No valid fields to update");
        assert_eq!(err.code(), 400);
    }
}
