use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::dto::{
    CreateServiceRequest, DeleteResponse, ListServicesParams, UpdateServiceRequest,
};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::slug::unique_slug;
use crate::types::{Service, ServiceIcon};

fn service_slug(
    state: &Arc<AppState>,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<String, ApiError> {
    unique_slug(name, "usluga", |candidate| {
        state.store.service_slug_taken(candidate, exclude_id)
    })
    .api_err("Greška pri kreiranju usluge")
}

fn parse_icon(raw: &str) -> Result<ServiceIcon, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::bad_request(format!("Nepoznata ikona: {raw}"))
    })
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListServicesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let services = state
        .store
        .list_services(params.active.as_deref() == Some("true"))
        .api_err("Greška pri dohvaćanju usluga")?;

    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .store
        .get_service(&id)
        .api_err("Greška pri dohvaćanju usluge")?
        .or_not_found("Usluga nije pronađena")?;

    Ok(Json(service))
}

pub async fn create_service(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Naziv usluge je obavezan"));
    }

    let icon = match req.icon.as_deref() {
        Some(raw) => parse_icon(raw)?,
        None => ServiceIcon::default(),
    };

    let slug = service_slug(&state, &name, None)?;

    let order = match req.order {
        Some(order) => order,
        None => state
            .store
            .next_service_order()
            .api_err("Greška pri kreiranju usluge")?,
    };

    let now = Utc::now();
    let service = Service {
        id: Uuid::new_v4().to_string(),
        name,
        slug,
        description: req
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        icon,
        order,
        active: req.active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_service(&service)
        .api_err("Greška pri kreiranju usluge")?;

    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state
        .store
        .get_service(&id)
        .api_err("Greška pri ažuriranju usluge")?
        .or_not_found("Usluga nije pronađena")?;

    let name = match req.name.as_deref() {
        Some(n) => {
            let n = n.trim();
            if n.is_empty() {
                return Err(ApiError::bad_request("Naziv usluge je obavezan"));
            }
            n.to_string()
        }
        None => existing.name.clone(),
    };

    let slug = if name != existing.name {
        service_slug(&state, &name, Some(&id))?
    } else {
        existing.slug.clone()
    };

    let icon = match req.icon.as_deref() {
        Some(raw) => parse_icon(raw)?,
        None => existing.icon,
    };

    let service = Service {
        id: existing.id.clone(),
        name,
        slug,
        description: match req.description {
            Some(d) => {
                let d = d.trim();
                (!d.is_empty()).then(|| d.to_string())
            }
            None => existing.description.clone(),
        },
        icon,
        order: req.order.unwrap_or(existing.order),
        active: req.active.unwrap_or(existing.active),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state
        .store
        .update_service(&service)
        .api_err("Greška pri ažuriranju usluge")?;

    Ok(Json(service))
}

pub async fn delete_service(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get_service(&id)
        .api_err("Greška pri brisanju usluge")?
        .or_not_found("Usluga nije pronađena")?;

    state
        .store
        .delete_service(&id)
        .api_err("Greška pri brisanju usluge")?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Usluga obrisana".to_string(),
    }))
}
