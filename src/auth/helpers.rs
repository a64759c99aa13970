use std::sync::Arc;

use axum::http::{header, request::Parts};
use chrono::Utc;

use super::{SessionTokenGenerator, parse_token};
use crate::server::AppState;
use crate::types::{AdminUser, Session};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug)]
pub enum SessionValidationError {
    InvalidToken,
    SessionExpired,
    InternalError,
}

pub struct ValidatedSession {
    pub session: Session,
    pub user: AdminUser,
}

/// Pulls the raw session token out of a request: the `session` cookie first,
/// then an `Authorization: Bearer` header (used by API clients and tests).
pub fn extract_session_token(parts: &Parts) -> Option<String> {
    if let Some(cookie_header) = parts
        .headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
    {
        let prefix = format!("{SESSION_COOKIE}=");
        for pair in cookie_header.split(';') {
            if let Some(value) = pair.trim().strip_prefix(prefix.as_str()) {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Validates a raw session token against the store. Returns the session and
/// the admin user it belongs to.
pub fn validate_session(
    state: &Arc<AppState>,
    raw_token: &str,
) -> Result<ValidatedSession, SessionValidationError> {
    let (lookup, _secret) =
        parse_token(raw_token).map_err(|_| SessionValidationError::InvalidToken)?;

    let session = state
        .store
        .get_session_by_lookup(&lookup)
        .map_err(|_| SessionValidationError::InternalError)?
        .ok_or(SessionValidationError::InvalidToken)?;

    let generator = SessionTokenGenerator::new();
    if !generator
        .verify(raw_token, &session.token_hash)
        .map_err(|_| SessionValidationError::InternalError)?
    {
        return Err(SessionValidationError::InvalidToken);
    }

    if session.expires_at < Utc::now() {
        return Err(SessionValidationError::SessionExpired);
    }

    let user = state
        .store
        .get_admin_user(&session.user_id)
        .map_err(|_| SessionValidationError::InternalError)?
        .ok_or(SessionValidationError::InvalidToken)?;

    if let Err(e) = state.store.update_session_last_used(&session.id) {
        tracing::warn!("Failed to update session last_used_at: {e}");
    }

    Ok(ValidatedSession { session, user })
}
