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
    ContactRequest, ContactResponse, DeleteResponse, ListInquiriesParams, UpdateInquiryRequest,
};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_contact;
use crate::types::{Inquiry, InquiryStatus};

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_contact(&req).map_err(ApiError::bad_request)?;

    let now = Utc::now();
    let inquiry = Inquiry {
        id: Uuid::new_v4().to_string(),
        name: req.name.as_deref().unwrap_or("").trim().to_string(),
        email: req.email.as_deref().unwrap_or("").trim().to_lowercase(),
        phone: req
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        service: req
            .service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        message: req.message.as_deref().unwrap_or("").trim().to_string(),
        status: InquiryStatus::New,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_inquiry(&inquiry)
        .api_err("Došlo je do greške pri slanju poruke. Pokušajte ponovo.")?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Poruka uspješno poslana".to_string(),
            id: inquiry.id,
        }),
    ))
}

pub async fn list_inquiries(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListInquiriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<InquiryStatus>()
                .map_err(|_| ApiError::bad_request(format!("Nepoznat status: {raw}")))?,
        ),
        None => None,
    };

    let inquiries = state
        .store
        .list_inquiries(status, params.limit)
        .api_err("Greška pri dohvaćanju upita")?;

    Ok(Json(inquiries))
}

pub async fn get_inquiry(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = state
        .store
        .get_inquiry(&id)
        .api_err("Greška pri dohvaćanju upita")?
        .or_not_found("Upit nije pronađen")?;

    Ok(Json(inquiry))
}

pub async fn update_inquiry(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = req
        .status
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Status je obavezan"))?;
    let status = raw
        .parse::<InquiryStatus>()
        .map_err(|_| ApiError::bad_request(format!("Nepoznat status: {raw}")))?;

    let existing = state
        .store
        .get_inquiry(&id)
        .api_err("Greška pri ažuriranju upita")?
        .or_not_found("Upit nije pronađen")?;

    if status != existing.status && !existing.status.can_transition_to(status) {
        return Err(ApiError::bad_request(format!(
            "Prijelaz iz statusa '{}' u '{}' nije dozvoljen",
            existing.status, status
        )));
    }

    state
        .store
        .update_inquiry_status(&id, status)
        .api_err("Greška pri ažuriranju upita")?;

    let inquiry = state
        .store
        .get_inquiry(&id)
        .api_err("Greška pri ažuriranju upita")?
        .or_not_found("Upit nije pronađen")?;

    Ok(Json(inquiry))
}

pub async fn delete_inquiry(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get_inquiry(&id)
        .api_err("Greška pri brisanju upita")?
        .or_not_found("Upit nije pronađen")?;

    state
        .store
        .delete_inquiry(&id)
        .api_err("Greška pri brisanju upita")?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Upit obrisan".to_string(),
    }))
}
