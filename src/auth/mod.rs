//! Authentication: password hashing, session tokens and the session middleware

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{extract_session_token, session_middleware, AuthContext, SESSION_COOKIE};
pub use password::PasswordHasher;
pub use token::{Claims, SessionTokenService, TokenRejection};
