//! Session token issuance and validation
//! HS512-signed JWT carrying the credential id and an expiry

use crate::{config::SecurityConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential id, decimal)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Credential id carried in `sub`
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Why a presented token was not accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("token signature or format invalid")]
    SignatureInvalid,

    #[error("token expired")]
    Expired,
}

/// Issues and validates session tokens with a single process-wide secret
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokenService {
    pub fn new(secret: &Secret<String>, ttl_secs: u64) -> Result<Self, AppError> {
        let secret = secret.expose_secret();

        if secret.is_empty() {
            return Err(AppError::Signing("session secret is not configured".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
        })
    }

    /// Create token service from config
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        Self::new(&config.session_secret, config.session_ttl_secs)
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` valid from now
    pub fn issue(&self, subject: i64) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`
    pub fn issue_at(&self, subject: i64, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Signing(e.to_string())
        })
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.validate_at(token, Utc::now())
    }

    /// Validate signature and expiry as of `now`.
    ///
    /// A token is live while `now < exp`. Any HMAC algorithm is accepted;
    /// other algorithm families are rejected as a signature failure.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // expiry is checked below against the supplied clock
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {:?}", e);
                TokenRejection::SignatureInvalid
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const THIRTY_DAYS: u64 = 30 * 24 * 3600;

    fn service(secret: &str) -> SessionTokenService {
        SessionTokenService::new(&Secret::new(secret.to_string()), THIRTY_DAYS).unwrap()
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service("test_secret_key_32_characters_long!");
        let token = service.issue(42).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.subject_id(), Some(42));
        assert_eq!(claims.exp - claims.iat, THIRTY_DAYS as i64);
    }

    #[test]
    fn test_token_header_is_hs512() {
        let service = service("test_secret_key_32_characters_long!");
        let token = service.issue(1).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
    }

    #[test]
    fn test_expiry_window() {
        let service = service("test_secret_key_32_characters_long!");
        let t = issued_at();
        let token = service.issue_at(7, t).unwrap();

        assert!(service.validate_at(&token, t).is_ok());
        assert!(service
            .validate_at(&token, t + Duration::days(30) - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            service.validate_at(&token, t + Duration::days(30)),
            Err(TokenRejection::Expired)
        );
        assert_eq!(
            service.validate_at(&token, t + Duration::days(31)),
            Err(TokenRejection::Expired)
        );
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let issuer = service("first_secret_key_32_characters_long!");
        let validator = service("second_secret_key_32_characters_long");

        let token = issuer.issue(42).unwrap();
        assert_eq!(validator.validate(&token), Err(TokenRejection::SignatureInvalid));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = service("test_secret_key_32_characters_long!");
        let token = service.issue(42).unwrap();

        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[signature_start] = if bytes[signature_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(service.validate(&tampered), Err(TokenRejection::SignatureInvalid));
    }

    #[test]
    fn test_hs256_token_with_same_secret_is_accepted() {
        let secret = "test_secret_key_32_characters_long!";
        let service = service(secret);
        let claims = Claims {
            sub: "9".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(service.validate(&token).unwrap().subject_id(), Some(9));
    }

    /// 保留原令牌的载荷，替换头部（base64url 编码的 JSON）与签名
    fn with_header(token: &str, header: &str, signature: &str) -> String {
        let payload = token.split('.').nth(1).unwrap();
        format!("{}.{}.{}", header, payload, signature)
    }

    // {"alg":"none","typ":"JWT"}
    const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
    // {"alg":"RS256","typ":"JWT"}
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";

    #[test]
    fn test_non_hmac_algorithms_are_rejected() {
        let service = service("test_secret_key_32_characters_long!");
        let t = issued_at();
        let token = service.issue_at(42, t).unwrap();
        let signature = token.rsplit('.').next().unwrap();

        let unsigned = with_header(&token, NONE_HEADER, "");
        assert_eq!(
            service.validate_at(&unsigned, t),
            Err(TokenRejection::SignatureInvalid)
        );

        let rsa = with_header(&token, RS256_HEADER, signature);
        assert_eq!(service.validate_at(&rsa, t), Err(TokenRejection::SignatureInvalid));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = service("test_secret_key_32_characters_long!");
        assert!(service.validate("invalid_token").is_err());
        assert!(service.validate("").is_err());
    }

    #[test]
    fn test_empty_secret_is_signing_error() {
        let result = SessionTokenService::new(&Secret::new(String::new()), THIRTY_DAYS);
        assert!(matches!(result, Err(AppError::Signing(_))));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "STD42".to_string(),
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.subject_id(), None);
    }
}
