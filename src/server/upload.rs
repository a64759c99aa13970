use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::dto::UploadResponse;
use crate::server::response::ApiError;
use crate::uploads::{ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};

pub async fn upload_file(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut folder = "uploads".to_string();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("multipart read failed: {e}");
        ApiError::bad_request("Neispravan upload zahtjev")
    })? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!("multipart read failed: {e}");
                    ApiError::payload_too_large("Datoteka je prevelika. Maksimum: 10MB")
                })?;
                file = Some((filename, content_type, data.to_vec()));
            }
            Some("folder") => {
                folder = field.text().await.map_err(|e| {
                    tracing::warn!("multipart read failed: {e}");
                    ApiError::bad_request("Neispravan upload zahtjev")
                })?;
            }
            _ => {}
        }
    }

    let Some((filename, content_type, data)) = file else {
        return Err(ApiError::bad_request("Datoteka nije poslana"));
    };

    if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::bad_request(
            "Nedozvoljeni tip datoteke. Dozvoljeni: JPG, PNG, WebP, GIF",
        ));
    }

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::bad_request(
            "Datoteka je prevelika. Maksimum: 10MB",
        ));
    }

    let stored = state
        .uploads
        .store(&folder, &filename, &data)
        .await
        .map_err(|e| {
            tracing::error!("upload store failed: {e}");
            ApiError::internal("Greška pri spremanju datoteke")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            filename: stored.filename,
            path: stored.public_path,
            size: stored.size,
            mime_type: content_type,
        }),
    ))
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path((folder, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .uploads
        .read(&folder, &file)
        .await
        .map_err(|_| ApiError::not_found("Slika nije pronađena"))?;

    Ok((
        [(header::CONTENT_TYPE, content_type_for(&file))],
        bytes,
    ))
}
