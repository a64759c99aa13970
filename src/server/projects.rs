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
    CreateProjectRequest, DeleteResponse, ListProjectsParams, UpdateProjectRequest,
};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::slug::unique_slug;
use crate::store::ProjectFilter;
use crate::types::{Project, ProjectWithImages};

fn with_images(state: &Arc<AppState>, project: Project) -> Result<ProjectWithImages, ApiError> {
    let images = state
        .store
        .list_project_images(&project.id)
        .api_err("Greška pri dohvaćanju projekta")?;
    Ok(ProjectWithImages { project, images })
}

fn project_slug(
    state: &Arc<AppState>,
    title: &str,
    exclude_id: Option<&str>,
) -> Result<String, ApiError> {
    unique_slug(title, "projekt", |candidate| {
        state.store.project_slug_taken(candidate, exclude_id)
    })
    .api_err("Greška pri kreiranju projekta")
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProjectsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ProjectFilter {
        category: params.category,
        featured_only: params.featured.as_deref() == Some("true"),
    };

    let projects = state
        .store
        .list_projects(filter)
        .api_err("Greška pri dohvaćanju projekata")?;

    let projects: Vec<ProjectWithImages> = projects
        .into_iter()
        .map(|p| with_images(&state, p))
        .collect::<Result<_, _>>()?;

    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .store
        .get_project(&id)
        .api_err("Greška pri dohvaćanju projekta")?
        .or_not_found("Projekt nije pronađen")?;

    Ok(Json(with_images(&state, project)?))
}

pub async fn create_project(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = req.title.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return Err(ApiError::bad_request("Naslov je obavezan"));
    }
    let Some(category) = req.category else {
        return Err(ApiError::bad_request("Kategorija je obavezna"));
    };

    let slug = project_slug(&state, &title, None)?;

    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4().to_string(),
        title,
        slug,
        description: req
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        category,
        featured: req.featured.unwrap_or(false),
        order: req.order.unwrap_or(0),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_project(&project)
        .api_err("Greška pri kreiranju projekta")?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectWithImages {
            project,
            images: Vec::new(),
        }),
    ))
}

pub async fn update_project(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let existing = state
        .store
        .get_project(&id)
        .api_err("Greška pri ažuriranju projekta")?
        .or_not_found("Projekt nije pronađen")?;

    // Partial update: absent fields keep their stored values.
    let title = match req.title.as_deref() {
        Some(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Err(ApiError::bad_request("Naslov je obavezan"));
            }
            t.to_string()
        }
        None => existing.title.clone(),
    };

    // The slug survives edits that do not touch the title.
    let slug = if title != existing.title {
        project_slug(&state, &title, Some(&id))?
    } else {
        existing.slug.clone()
    };

    let project = Project {
        id: existing.id.clone(),
        title,
        slug,
        description: match req.description {
            Some(d) => {
                let d = d.trim();
                (!d.is_empty()).then(|| d.to_string())
            }
            None => existing.description.clone(),
        },
        category: req.category.unwrap_or(existing.category),
        featured: req.featured.unwrap_or(existing.featured),
        order: req.order.unwrap_or(existing.order),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state
        .store
        .update_project(&project)
        .api_err("Greška pri ažuriranju projekta")?;

    Ok(Json(with_images(&state, project)?))
}

pub async fn delete_project(
    _auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .store
        .get_project(&id)
        .api_err("Greška pri brisanju projekta")?
        .or_not_found("Projekt nije pronađen")?;

    let images = state
        .store
        .list_project_images(&project.id)
        .api_err("Greška pri brisanju projekta")?;

    // Cascade removes the image rows together with the project.
    state
        .store
        .delete_project(&project.id)
        .api_err("Greška pri brisanju projekta")?;

    // Backing files go too; a failed unlink must not resurrect the metadata.
    for image in images {
        if let Err(e) = state.uploads.delete(&image.path).await {
            tracing::warn!("Could not delete file {}: {e}", image.path);
        }
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Projekt obrisan".to_string(),
    }))
}
