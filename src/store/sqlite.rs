use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::schema::SCHEMA;
use super::{ImagePlacement, ProjectFilter, StatCounts, Store};
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_enum<T: FromStr + Default>(field: &str, s: &str) -> T {
    T::from_str(s).unwrap_or_else(|_| {
        tracing::error!("Invalid {} in database: '{}'", field, s);
        T::default()
    })
}

fn parse_category(s: &str) -> ProjectCategory {
    ProjectCategory::from_str(s).unwrap_or_else(|_| {
        tracing::error!("Invalid category in database: '{}'", s);
        ProjectCategory::Ostalo
    })
}

fn parse_status(s: &str) -> InquiryStatus {
    InquiryStatus::from_str(s).unwrap_or_else(|_| {
        tracing::error!("Invalid inquiry status in database: '{}'", s);
        InquiryStatus::New
    })
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        category: parse_category(&row.get::<_, String>(4)?),
        featured: row.get(5)?,
        order: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

const PROJECT_COLUMNS: &str =
    "id, title, slug, description, category, featured, display_order, created_at, updated_at";

fn row_to_image(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectImage> {
    Ok(ProjectImage {
        id: row.get(0)?,
        project_id: row.get(1)?,
        filename: row.get(2)?,
        path: row.get(3)?,
        alt: row.get(4)?,
        is_cover: row.get(5)?,
        order: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

const IMAGE_COLUMNS: &str =
    "id, project_id, filename, path, alt, is_cover, display_order, created_at";

fn row_to_service(row: &rusqlite::Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        icon: parse_enum("icon", &row.get::<_, String>(4)?),
        order: row.get(5)?,
        active: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

const SERVICE_COLUMNS: &str =
    "id, name, slug, description, icon, display_order, active, created_at, updated_at";

fn row_to_inquiry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Inquiry> {
    Ok(Inquiry {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        service: row.get(4)?,
        message: row.get(5)?,
        status: parse_status(&row.get::<_, String>(6)?),
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

const INQUIRY_COLUMNS: &str =
    "id, name, email, phone, service, message, status, created_at, updated_at";

/// Single-cover repair: when the project still has images but none of them
/// is the cover, the lowest-ordered image is promoted. Runs inside the
/// caller's transaction so a coverless project is never committed.
fn promote_cover_if_missing(
    tx: &rusqlite::Transaction<'_>,
    project_id: &str,
) -> rusqlite::Result<()> {
    tx.execute(
        "UPDATE project_images SET is_cover = 1 WHERE id =
         (SELECT id FROM project_images WHERE project_id = ?1
          ORDER BY display_order ASC LIMIT 1)
         AND NOT EXISTS (SELECT 1 FROM project_images
                         WHERE project_id = ?1 AND is_cover = 1)",
        params![project_id],
    )?;
    Ok(())
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Admin user operations

    fn create_admin_user(&self, user: &AdminUser) -> Result<()> {
        self.conn().execute(
            "INSERT INTO admin_users (id, email, password_hash, name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.email,
                user.password_hash,
                user.name,
                format_datetime(&user.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_admin_user(&self, id: &str) -> Result<Option<AdminUser>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, email, password_hash, name, created_at FROM admin_users WHERE id = ?1",
            params![id],
            |row| {
                Ok(AdminUser {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    name: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_admin_user_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, email, password_hash, name, created_at FROM admin_users WHERE email = ?1",
            params![email],
            |row| {
                Ok(AdminUser {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    name: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn has_admin_user(&self) -> Result<bool> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM admin_users", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    // Session operations

    fn create_session(&self, session: &Session) -> Result<()> {
        self.conn().execute(
            "INSERT INTO sessions (id, token_hash, token_lookup, user_id, created_at, expires_at, last_used_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session.id,
                session.token_hash,
                session.token_lookup,
                session.user_id,
                format_datetime(&session.created_at),
                format_datetime(&session.expires_at),
                session.last_used_at.as_ref().map(format_datetime),
            ],
        )?;
        Ok(())
    }

    fn get_session_by_lookup(&self, lookup: &str) -> Result<Option<Session>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, user_id, created_at, expires_at, last_used_at
             FROM sessions WHERE token_lookup = ?1",
            params![lookup],
            |row| {
                Ok(Session {
                    id: row.get(0)?,
                    token_hash: row.get(1)?,
                    token_lookup: row.get(2)?,
                    user_id: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                    expires_at: parse_datetime(&row.get::<_, String>(5)?),
                    last_used_at: row
                        .get::<_, Option<String>>(6)?
                        .map(|s| parse_datetime(&s)),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn delete_session(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn delete_expired_sessions(&self) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM sessions WHERE expires_at < ?1",
            params![format_datetime(&Utc::now())],
        )?;
        Ok(rows)
    }

    fn update_session_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE sessions SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    // Project operations

    fn create_project(&self, project: &Project) -> Result<()> {
        self.conn().execute(
            "INSERT INTO projects (id, title, slug, description, category, featured, display_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                project.id,
                project.title,
                project.slug,
                project.description,
                project.category.as_str(),
                project.featured,
                project.order,
                format_datetime(&project.created_at),
                format_datetime(&project.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            params![id],
            row_to_project,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = ?1"),
            params![slug],
            row_to_project,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE 1=1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = filter.category {
            args.push(Box::new(category.as_str().to_string()));
            sql.push_str(&format!(" AND category = ?{}", args.len()));
        }
        if filter.featured_only {
            sql.push_str(" AND featured = 1");
        }
        sql.push_str(" ORDER BY display_order ASC, created_at DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), row_to_project)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_recent_projects(&self, limit: i32) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit], row_to_project)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_project(&self, project: &Project) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE projects SET title = ?1, slug = ?2, description = ?3, category = ?4,
             featured = ?5, display_order = ?6, updated_at = ?7 WHERE id = ?8",
            params![
                project.title,
                project.slug,
                project.description,
                project.category.as_str(),
                project.featured,
                project.order,
                format_datetime(&project.updated_at),
                project.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_project(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn project_slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM projects WHERE slug = ?1 AND id != COALESCE(?2, '')",
            params![slug, exclude_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // Project image operations

    fn create_project_image(&self, image: &ProjectImage) -> Result<()> {
        self.conn().execute(
            "INSERT INTO project_images (id, project_id, filename, path, alt, is_cover, display_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                image.id,
                image.project_id,
                image.filename,
                image.path,
                image.alt,
                image.is_cover,
                image.order,
                format_datetime(&image.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_project_image(&self, id: &str) -> Result<Option<ProjectImage>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {IMAGE_COLUMNS} FROM project_images WHERE id = ?1"),
            params![id],
            row_to_image,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_project_images(&self, project_id: &str) -> Result<Vec<ProjectImage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images WHERE project_id = ?1
             ORDER BY display_order ASC"
        ))?;
        let rows = stmt.query_map(params![project_id], row_to_image)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT i.id, i.path, i.alt, i.is_cover, p.id, p.title, p.slug, p.category
             FROM project_images i JOIN projects p ON p.id = i.project_id
             ORDER BY p.category ASC, p.title ASC, i.display_order ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(GalleryImage {
                id: row.get(0)?,
                path: row.get(1)?,
                alt: row.get(2)?,
                is_cover: row.get(3)?,
                project_id: row.get(4)?,
                project_title: row.get(5)?,
                project_slug: row.get(6)?,
                category: parse_category(&row.get::<_, String>(7)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn next_image_order(&self, project_id: &str) -> Result<i32> {
        let max: Option<i32> = self.conn().query_row(
            "SELECT MAX(display_order) FROM project_images WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )?;
        Ok(max.map_or(0, |m| m + 1))
    }

    fn update_project_image(&self, image: &ProjectImage) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE project_images SET alt = ?1, is_cover = ?2, display_order = ?3 WHERE id = ?4",
            params![image.alt, image.is_cover, image.order, image.id],
        )?;
        if rows == 0 {
            return Err(Error::NotFound);
        }

        // Demoting the sole cover immediately re-elects one.
        promote_cover_if_missing(&tx, &image.project_id)?;

        tx.commit()?;
        Ok(())
    }

    fn delete_project_image(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let project_id: Option<String> = tx
            .query_row(
                "SELECT project_id FROM project_images WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(project_id) = project_id else {
            return Ok(false);
        };

        tx.execute("DELETE FROM project_images WHERE id = ?1", params![id])?;
        promote_cover_if_missing(&tx, &project_id)?;

        tx.commit()?;
        Ok(true)
    }

    fn set_cover_image(&self, project_id: &str, image_id: &str) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE project_images SET is_cover = 0 WHERE project_id = ?1",
            params![project_id],
        )?;
        let rows = tx.execute(
            "UPDATE project_images SET is_cover = 1 WHERE id = ?1 AND project_id = ?2",
            params![image_id, project_id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }

        tx.commit()?;
        Ok(())
    }

    fn reorder_project_images(
        &self,
        project_id: &str,
        placements: &[ImagePlacement],
    ) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        if placements.iter().any(|p| p.is_cover) {
            tx.execute(
                "UPDATE project_images SET is_cover = 0 WHERE project_id = ?1",
                params![project_id],
            )?;
        }

        for placement in placements {
            tx.execute(
                "UPDATE project_images SET display_order = ?1, is_cover = ?2
                 WHERE id = ?3 AND project_id = ?4",
                params![
                    placement.order,
                    placement.is_cover,
                    placement.id,
                    project_id
                ],
            )?;
        }

        // A reorder that marks every image non-cover does not get to leave
        // the project coverless.
        promote_cover_if_missing(&tx, project_id)?;

        tx.commit()?;
        Ok(())
    }

    // Service operations

    fn create_service(&self, service: &Service) -> Result<()> {
        self.conn().execute(
            "INSERT INTO services (id, name, slug, description, icon, display_order, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                service.id,
                service.name,
                service.slug,
                service.description,
                service.icon.as_str(),
                service.order,
                service.active,
                format_datetime(&service.created_at),
                format_datetime(&service.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_service(&self, id: &str) -> Result<Option<Service>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1"),
            params![id],
            row_to_service,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SERVICE_COLUMNS} FROM services WHERE slug = ?1"),
            params![slug],
            row_to_service,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let conn = self.conn();
        let sql = if active_only {
            format!(
                "SELECT {SERVICE_COLUMNS} FROM services WHERE active = 1 ORDER BY display_order ASC"
            )
        } else {
            format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY display_order ASC")
        };
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_service)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn next_service_order(&self) -> Result<i32> {
        let max: Option<i32> =
            self.conn()
                .query_row("SELECT MAX(display_order) FROM services", [], |row| {
                    row.get(0)
                })?;
        Ok(max.map_or(0, |m| m + 1))
    }

    fn update_service(&self, service: &Service) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE services SET name = ?1, slug = ?2, description = ?3, icon = ?4,
             display_order = ?5, active = ?6, updated_at = ?7 WHERE id = ?8",
            params![
                service.name,
                service.slug,
                service.description,
                service.icon.as_str(),
                service.order,
                service.active,
                format_datetime(&service.updated_at),
                service.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_service(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM services WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn service_slug_taken(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM services WHERE slug = ?1 AND id != COALESCE(?2, '')",
            params![slug, exclude_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // Inquiry operations

    fn create_inquiry(&self, inquiry: &Inquiry) -> Result<()> {
        self.conn().execute(
            "INSERT INTO inquiries (id, name, email, phone, service, message, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                inquiry.id,
                inquiry.name,
                inquiry.email,
                inquiry.phone,
                inquiry.service,
                inquiry.message,
                inquiry.status.as_str(),
                format_datetime(&inquiry.created_at),
                format_datetime(&inquiry.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_inquiry(&self, id: &str) -> Result<Option<Inquiry>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = ?1"),
            params![id],
            row_to_inquiry,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_inquiries(
        &self,
        status: Option<InquiryStatus>,
        limit: Option<i32>,
    ) -> Result<Vec<Inquiry>> {
        let conn = self.conn();
        let mut sql = format!("SELECT {INQUIRY_COLUMNS} FROM inquiries");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(status) = status {
            args.push(Box::new(status.as_str().to_string()));
            sql.push_str(&format!(" WHERE status = ?{}", args.len()));
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = limit {
            args.push(Box::new(limit));
            sql.push_str(&format!(" LIMIT ?{}", args.len()));
        }

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), row_to_inquiry)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_inquiry_status(&self, id: &str, status: InquiryStatus) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE inquiries SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), format_datetime(&Utc::now()), id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_inquiry(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM inquiries WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Settings operations

    fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO site_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, format_datetime(&Utc::now())],
        )?;
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<SiteSetting>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT key, value, updated_at FROM site_settings WHERE key = ?1",
            params![key],
            |row| {
                Ok(SiteSetting {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: parse_datetime(&row.get::<_, String>(2)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_settings(&self) -> Result<BTreeMap<String, String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key, value FROM site_settings")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map_err(Error::from)
    }

    // Dashboard

    fn stat_counts(&self) -> Result<StatCounts> {
        let conn = self.conn();
        let scalar = |sql: &str| -> Result<i64> {
            conn.query_row(sql, [], |row| row.get(0)).map_err(Error::from)
        };

        Ok(StatCounts {
            projects: scalar("SELECT COUNT(*) FROM projects")?,
            images: scalar("SELECT COUNT(*) FROM project_images")?,
            services: scalar("SELECT COUNT(*) FROM services WHERE active = 1")?,
            new_inquiries: scalar("SELECT COUNT(*) FROM inquiries WHERE status = 'new'")?,
            total_inquiries: scalar("SELECT COUNT(*) FROM inquiries")?,
        })
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}
