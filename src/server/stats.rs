use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::dto::{RecentInquiry, StatsResponse};
use crate::server::response::{ApiError, StoreResultExt};
use crate::types::{InquiryStatus, ProjectWithImages};

const RECENT_LIMIT: i32 = 5;

pub async fn get_stats(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let counts = state
        .store
        .stat_counts()
        .api_err("Greška pri dohvaćanju statistike")?;

    let recent_inquiries = state
        .store
        .list_inquiries(Some(InquiryStatus::New), Some(RECENT_LIMIT))
        .api_err("Greška pri dohvaćanju statistike")?
        .into_iter()
        .map(|i| RecentInquiry {
            id: i.id,
            name: i.name,
            email: i.email,
            service: i.service,
            created_at: i.created_at,
        })
        .collect();

    let mut recent_projects = Vec::new();
    for project in state
        .store
        .list_recent_projects(RECENT_LIMIT)
        .api_err("Greška pri dohvaćanju statistike")?
    {
        // The dashboard only renders the cover thumbnail.
        let images = state
            .store
            .list_project_images(&project.id)
            .api_err("Greška pri dohvaćanju statistike")?
            .into_iter()
            .filter(|img| img.is_cover)
            .collect();
        recent_projects.push(ProjectWithImages { project, images });
    }

    Ok(Json(StatsResponse {
        stats: counts.into(),
        recent_inquiries,
        recent_projects,
    }))
}
