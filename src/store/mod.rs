mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::*;

/// Filters for the project listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    pub category: Option<ProjectCategory>,
    pub featured_only: bool,
}

/// One entry of a bulk image reorder.
#[derive(Debug, Clone)]
pub struct ImagePlacement {
    pub id: String,
    pub order: i32,
    pub is_cover: bool,
}

/// Dashboard aggregates.
#[derive(Debug, Clone, Copy)]
pub struct StatCounts {
    pub projects: i64,
    pub images: i64,
    pub services: i64,
    pub new_inquiries: i64,
    pub total_inquiries: i64,
}

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Admin user operations
    fn create_admin_user(&self, user: &AdminUser) -> Result<()>;
    fn get_admin_user(&self, id: &str) -> Result<Option<AdminUser>>;
    fn get_admin_user_by_email(&self, email: &str) -> Result<Option<AdminUser>>;
    fn has_admin_user(&self) -> Result<bool>;

    // Session operations
    fn create_session(&self, session: &Session) -> Result<()>;
    fn get_session_by_lookup(&self, lookup: &str) -> Result<Option<Session>>;
    fn delete_session(&self, id: &str) -> Result<bool>;
    fn delete_expired_sessions(&self) -> Result<usize>;
    fn update_session_last_used(&self, id: &str) -> Result<()>;

    // Project operations
    fn create_project(&self, project: &Project) -> Result<()>;
    fn get_project(&self, id: &str) -> Result<Option<Project>>;
    fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>>;
    /// Ordered by display order ascending, then creation time descending.
    fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>>;
    fn list_recent_projects(&self, limit: i32) -> Result<Vec<Project>>;
    fn update_project(&self, project: &Project) -> Result<()>;
    fn delete_project(&self, id: &str) -> Result<bool>;
    /// True if any project other than `exclude_id` already owns `slug`.
    fn project_slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool>;

    // Project image operations
    fn create_project_image(&self, image: &ProjectImage) -> Result<()>;
    fn get_project_image(&self, id: &str) -> Result<Option<ProjectImage>>;
    fn list_project_images(&self, project_id: &str) -> Result<Vec<ProjectImage>>;
    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>>;
    fn next_image_order(&self, project_id: &str) -> Result<i32>;
    /// Writes alt/cover/order; when the change leaves the project coverless,
    /// the lowest-ordered image is re-elected in the same transaction.
    fn update_project_image(&self, image: &ProjectImage) -> Result<()>;
    /// Deletes the row; when the deleted image was the cover and siblings
    /// remain, the lowest-ordered sibling is promoted in the same transaction.
    fn delete_project_image(&self, id: &str) -> Result<bool>;
    /// Atomically makes `image_id` the only cover of `project_id`.
    fn set_cover_image(&self, project_id: &str, image_id: &str) -> Result<()>;
    /// Applies a bulk order/cover update for a project's images, keeping the
    /// single-cover rule (a batch with no cover re-elects one).
    fn reorder_project_images(
        &self,
        project_id: &str,
        placements: &[ImagePlacement],
    ) -> Result<()>;

    // Service operations
    fn create_service(&self, service: &Service) -> Result<()>;
    fn get_service(&self, id: &str) -> Result<Option<Service>>;
    fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>>;
    fn list_services(&self, active_only: bool) -> Result<Vec<Service>>;
    fn next_service_order(&self) -> Result<i32>;
    fn update_service(&self, service: &Service) -> Result<()>;
    fn delete_service(&self, id: &str) -> Result<bool>;
    fn service_slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool>;

    // Inquiry operations
    fn create_inquiry(&self, inquiry: &Inquiry) -> Result<()>;
    fn get_inquiry(&self, id: &str) -> Result<Option<Inquiry>>;
    /// Newest first, optionally filtered by status and capped at `limit`.
    fn list_inquiries(&self, status: Option<InquiryStatus>, limit: Option<i32>)
    -> Result<Vec<Inquiry>>;
    fn update_inquiry_status(&self, id: &str, status: InquiryStatus) -> Result<()>;
    fn delete_inquiry(&self, id: &str) -> Result<bool>;

    // Settings operations
    fn upsert_setting(&self, key: &str, value: &str) -> Result<()>;
    fn get_setting(&self, key: &str) -> Result<Option<SiteSetting>>;
    fn list_settings(&self) -> Result<BTreeMap<String, String>>;

    // Dashboard
    fn stat_counts(&self) -> Result<StatCounts>;

    fn close(&self) -> Result<()>;
}
