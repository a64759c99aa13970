mod helpers;
mod middleware;
mod password;
mod token;

pub use helpers::{SESSION_COOKIE, ValidatedSession, extract_session_token, validate_session};
pub use middleware::{AuthError, RequireSession};
pub use password::{hash_password, verify_password};
pub use token::{SessionTokenGenerator, parse_token};
