//! Database repository layer

pub mod credential_repo;
pub mod interest_repo;
pub mod material_repo;
pub mod placement_repo;
pub mod quiz_repo;
pub mod student_repo;
pub mod subject_repo;

pub use credential_repo::*;
pub use interest_repo::*;
pub use material_repo::*;
pub use placement_repo::*;
pub use quiz_repo::*;
pub use student_repo::*;
pub use subject_repo::*;

use crate::{db, error::AppError};

/// 插入时外键在检查之后被删除的情况
pub(crate) fn insert_error(e: sqlx::Error) -> AppError {
    if db::is_foreign_key_violation(&e) {
        AppError::ForeignKeyNotFound("Referenced record not found".to_string())
    } else {
        AppError::Database(e)
    }
}
