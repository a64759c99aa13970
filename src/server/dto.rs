use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StatCounts;
use crate::types::{AdminUser, ProjectCategory, ProjectWithImages};

// Auth

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Raw session token; also set as an HttpOnly cookie. Shown only once.
    pub token: String,
    pub user: AdminUser,
}

// Projects

#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsParams {
    #[serde(default)]
    pub category: Option<ProjectCategory>,
    #[serde(default)]
    pub featured: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<ProjectCategory>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub order: Option<i32>,
}

// Images

#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub filename: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderImagesRequest {
    pub images: Vec<ImagePlacementRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePlacementRequest {
    pub id: String,
    pub order: i32,
    #[serde(default)]
    pub is_cover: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateImageRequest {
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_cover: Option<bool>,
    #[serde(default)]
    pub order: Option<i32>,
}

// Services

#[derive(Debug, Default, Deserialize)]
pub struct ListServicesParams {
    #[serde(default)]
    pub active: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
}

// Inquiries / contact form

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListInquiriesParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInquiryRequest {
    pub status: Option<String>,
}

// Upload

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub mime_type: String,
}

// Dashboard

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub stats: Counts,
    pub recent_inquiries: Vec<RecentInquiry>,
    pub recent_projects: Vec<ProjectWithImages>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub projects: i64,
    pub images: i64,
    pub services: i64,
    pub new_inquiries: i64,
    pub total_inquiries: i64,
}

impl From<StatCounts> for Counts {
    fn from(c: StatCounts) -> Self {
        Self {
            projects: c.projects,
            images: c.images,
            services: c.services,
            new_inquiries: c.new_inquiries,
            total_inquiries: c.total_inquiries,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Generic acknowledgement for delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
