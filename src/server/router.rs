use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::{images, inquiries, projects, services, session, settings, stats, upload};
use crate::store::Store;
use crate::uploads::{MAX_UPLOAD_BYTES, UploadStorage};

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub uploads: UploadStorage,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Auth
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
        .route("/auth/me", get(session::me))
        // Projects
        .route("/projects", get(projects::list_projects))
        .route("/projects", post(projects::create_project))
        .route("/projects/{id}", get(projects::get_project))
        .route("/projects/{id}", put(projects::update_project))
        .route("/projects/{id}", delete(projects::delete_project))
        // Project images
        .route("/projects/{id}/images", post(images::add_image))
        .route("/projects/{id}/images", put(images::reorder_images))
        .route("/images/{id}", get(images::get_image))
        .route("/images/{id}", put(images::update_image))
        .route("/images/{id}", delete(images::delete_image))
        .route("/gallery", get(images::list_gallery))
        // Services
        .route("/services", get(services::list_services))
        .route("/services", post(services::create_service))
        .route("/services/{id}", get(services::get_service))
        .route("/services/{id}", put(services::update_service))
        .route("/services/{id}", delete(services::delete_service))
        // Inquiries / contact form
        .route("/contact", post(inquiries::submit_contact))
        .route("/contact", get(inquiries::list_inquiries))
        .route("/inquiries", get(inquiries::list_inquiries))
        .route("/inquiries/{id}", get(inquiries::get_inquiry))
        .route("/inquiries/{id}", put(inquiries::update_inquiry))
        .route("/inquiries/{id}", delete(inquiries::delete_inquiry))
        // Settings
        .route("/settings", get(settings::get_settings))
        .route("/settings", put(settings::update_settings))
        // Dashboard
        .route("/stats", get(stats::get_stats))
        // Upload
        .route("/upload", post(upload::upload_file))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/images/{folder}/{file}", get(upload::serve_image))
        .nest("/api", api_router())
        // Multipart bodies carry the 10 MB limit plus form overhead.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
