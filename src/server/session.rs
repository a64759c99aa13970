use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{
    RequireSession, SESSION_COOKIE, SessionTokenGenerator, hash_password, verify_password,
};
use crate::server::AppState;
use crate::server::dto::{LoginRequest, LoginResponse};
use crate::server::response::{ApiError, StoreResultExt};
use crate::types::Session;

const SESSION_TTL_DAYS: i64 = 7;

fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}")
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();

    let user = state
        .store
        .get_admin_user_by_email(&email)
        .api_err("Greška pri prijavi")?;

    // Hash the password even when the account is unknown so response timing
    // does not reveal which emails exist.
    let Some(user) = user else {
        let _ = hash_password(&req.password);
        return Err(ApiError::unauthorized());
    };

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|_| ApiError::internal("Greška pri prijavi"))?;
    if !valid {
        return Err(ApiError::unauthorized());
    }

    if let Err(e) = state.store.delete_expired_sessions() {
        tracing::warn!("Failed to purge expired sessions: {e}");
    }

    let generator = SessionTokenGenerator::new();
    let (raw_token, lookup, hash) = generator
        .generate()
        .map_err(|_| ApiError::internal("Greška pri prijavi"))?;

    let now = Utc::now();
    let session = Session {
        id: Uuid::new_v4().to_string(),
        token_hash: hash,
        token_lookup: lookup,
        user_id: user.id.clone(),
        created_at: now,
        expires_at: now + Duration::days(SESSION_TTL_DAYS),
        last_used_at: None,
    };

    state
        .store
        .create_session(&session)
        .api_err("Greška pri prijavi")?;

    tracing::info!("Admin '{}' logged in", user.email);

    let cookie = session_cookie(&raw_token, SESSION_TTL_DAYS * 24 * 60 * 60);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: raw_token,
            user,
        }),
    ))
}

pub async fn logout(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_session(&auth.session.id)
        .api_err("Greška pri odjavi")?;

    let cookie = session_cookie("", 0);
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

pub async fn me(auth: RequireSession) -> impl IntoResponse {
    Json(auth.user)
}
