use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::helpers::{SessionValidationError, extract_session_token, validate_session};
use crate::server::AppState;
use crate::types::{AdminUser, Session};

/// Extractor that requires a valid admin session. Handlers taking this as an
/// argument reject unauthenticated requests before running.
pub struct RequireSession {
    pub session: Session,
    pub user: AdminUser,
}

#[derive(Debug)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
    SessionExpired,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingSession | AuthError::InvalidSession | AuthError::SessionExpired => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Greška na poslužitelju")
            }
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequireSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_session_token(parts).ok_or(AuthError::MissingSession)?;

        let validated = validate_session(state, &raw_token).map_err(|e| match e {
            SessionValidationError::InvalidToken => AuthError::InvalidSession,
            SessionValidationError::SessionExpired => AuthError::SessionExpired,
            SessionValidationError::InternalError => AuthError::InternalError,
        })?;

        Ok(RequireSession {
            session: validated.session,
            user: validated.user,
        })
    }
}
