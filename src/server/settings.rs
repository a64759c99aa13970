use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::response::{ApiError, StoreResultExt};

/// Public, flattened `{key: value}` map of all site settings.
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state
        .store
        .list_settings()
        .api_err("Greška pri dohvaćanju postavki")?;

    Ok(Json(settings))
}

/// Batch upsert. Accepts a flat JSON object; non-string values are stored
/// via their JSON text form. Keys not present in the body are kept as-is.
pub async fn update_settings(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Value::Object(entries) = body else {
        return Err(ApiError::bad_request(
            "Body mora biti objekt s key-value parovima",
        ));
    };

    for (key, value) in &entries {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        state
            .store
            .upsert_setting(key, &value)
            .api_err("Greška pri spremanju postavki")?;
    }

    let settings = state
        .store
        .list_settings()
        .api_err("Greška pri spremanju postavki")?;

    Ok(Json(settings))
}
