use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::dto::{AddImageRequest, DeleteResponse, ReorderImagesRequest, UpdateImageRequest};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::store::ImagePlacement;
use crate::types::ProjectImage;

pub async fn add_image(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    Json(req): Json<AddImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get_project(&project_id)
        .api_err("Greška pri dodavanju slike")?
        .or_not_found("Projekt nije pronađen")?;

    let (Some(filename), Some(path)) = (req.filename, req.path) else {
        return Err(ApiError::bad_request("Filename i path su obavezni"));
    };
    if filename.is_empty() || path.is_empty() {
        return Err(ApiError::bad_request("Filename i path su obavezni"));
    }

    let order = match req.order {
        Some(order) => order,
        None => state
            .store
            .next_image_order(&project_id)
            .api_err("Greška pri dodavanju slike")?,
    };

    let mut image = ProjectImage {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.clone(),
        filename,
        path,
        alt: req.alt.filter(|a| !a.is_empty()),
        is_cover: false,
        order,
        created_at: Utc::now(),
    };

    state
        .store
        .create_project_image(&image)
        .api_err("Greška pri dodavanju slike")?;

    // Cover handoff runs as its own transaction so the single-cover
    // invariant holds even against a concurrent reassignment.
    if req.is_cover {
        state
            .store
            .set_cover_image(&project_id, &image.id)
            .api_err("Greška pri dodavanju slike")?;
        image.is_cover = true;
    }

    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn reorder_images(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get_project(&project_id)
        .api_err("Greška pri ažuriranju slika")?
        .or_not_found("Projekt nije pronađen")?;

    if !body.get("images").is_some_and(serde_json::Value::is_array) {
        return Err(ApiError::bad_request("images array je obavezan"));
    }
    let req: ReorderImagesRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("images array je obavezan"))?;

    let placements: Vec<ImagePlacement> = req
        .images
        .into_iter()
        .map(|img| ImagePlacement {
            id: img.id,
            order: img.order,
            is_cover: img.is_cover,
        })
        .collect();

    state
        .store
        .reorder_project_images(&project_id, &placements)
        .api_err("Greška pri ažuriranju slika")?;

    let images = state
        .store
        .list_project_images(&project_id)
        .api_err("Greška pri ažuriranju slika")?;

    Ok(Json(images))
}

pub async fn get_image(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .store
        .get_project_image(&id)
        .api_err("Greška pri dohvaćanju slike")?
        .or_not_found("Slika nije pronađena")?;

    Ok(Json(image))
}

pub async fn update_image(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state
        .store
        .get_project_image(&id)
        .api_err("Greška pri ažuriranju slike")?
        .or_not_found("Slika nije pronađena")?;

    // Promoting to cover demotes every sibling in one transaction.
    if req.is_cover == Some(true) && !existing.is_cover {
        state
            .store
            .set_cover_image(&existing.project_id, &existing.id)
            .api_err("Greška pri ažuriranju slike")?;
    }

    let image = ProjectImage {
        alt: match req.alt {
            Some(alt) => (!alt.is_empty()).then_some(alt),
            None => existing.alt,
        },
        is_cover: req.is_cover.unwrap_or(existing.is_cover),
        order: req.order.unwrap_or(existing.order),
        ..existing
    };

    state
        .store
        .update_project_image(&image)
        .api_err("Greška pri ažuriranju slike")?;

    // Re-read: demoting the sole cover re-elects one in the store, so the
    // written row can differ from the requested one.
    let image = state
        .store
        .get_project_image(&image.id)
        .api_err("Greška pri ažuriranju slike")?
        .or_not_found("Slika nije pronađena")?;

    Ok(Json(image))
}

pub async fn delete_image(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .store
        .get_project_image(&id)
        .api_err("Greška pri brisanju slike")?
        .or_not_found("Slika nije pronađena")?;

    // Row first, then best-effort unlink; a failed unlink leaves an orphan
    // file rather than metadata pointing at nothing.
    state
        .store
        .delete_project_image(&image.id)
        .api_err("Greška pri brisanju slike")?;

    if let Err(e) = state.uploads.delete(&image.path).await {
        tracing::warn!("Could not delete file {}: {e}", image.path);
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Slika obrisana".to_string(),
    }))
}

pub async fn list_gallery(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let images = state
        .store
        .list_gallery_images()
        .api_err("Greška pri dohvaćanju galerije")?;

    Ok(Json(images))
}
