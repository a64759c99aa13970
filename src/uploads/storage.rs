use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Error)]
pub enum UploadStorageError {
    #[error("file not found")]
    NotFound,
    #[error("invalid path")]
    InvalidPath,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadStorageError {
    fn from_io(e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    /// Public path to embed in image tags, e.g. `/images/projekti/....jpg`.
    pub public_path: String,
    pub size: usize,
}

/// Filesystem-backed image store. Files live under
/// `<data_dir>/public/images/<folder>/<generated-name>` and are addressed
/// externally by their `/images/...` public path.
pub struct UploadStorage {
    base_path: PathBuf,
}

impl UploadStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            base_path: data_dir.join("public"),
        }
    }

    fn folder_path(&self, folder: &str) -> PathBuf {
        self.base_path.join("images").join(folder)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join("tmp").join(Uuid::new_v4().to_string())
    }

    pub async fn store(
        &self,
        folder: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload, UploadStorageError> {
        let folder = sanitize_folder(folder);
        let filename = generate_filename(original_name);

        let temp_path = self.temp_path();
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut temp_file = File::create(&temp_path).await?;
        temp_file.write_all(data).await?;
        temp_file.sync_all().await?;

        let final_dir = self.folder_path(&folder);
        fs::create_dir_all(&final_dir).await?;
        fs::rename(&temp_path, final_dir.join(&filename)).await?;

        Ok(StoredUpload {
            public_path: format!("/images/{folder}/{filename}"),
            filename,
            size: data.len(),
        })
    }

    /// Reads a stored file back for serving. `folder` and `file` are single
    /// path components; anything else is rejected.
    pub async fn read(&self, folder: &str, file: &str) -> Result<Vec<u8>, UploadStorageError> {
        validate_component(folder)?;
        validate_component(file)?;

        let path = self.folder_path(folder).join(file);
        fs::read(&path).await.map_err(UploadStorageError::from_io)
    }

    /// Deletes the file behind a public `/images/...` path. Returns false if
    /// the file was already gone.
    pub async fn delete(&self, public_path: &str) -> Result<bool, UploadStorageError> {
        let relative = public_path
            .strip_prefix("/images/")
            .ok_or(UploadStorageError::InvalidPath)?;

        let (folder, file) = relative
            .split_once('/')
            .ok_or(UploadStorageError::InvalidPath)?;
        validate_component(folder)?;
        validate_component(file)?;

        let path = self.folder_path(folder).join(file);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(UploadStorageError::Io(e)),
        }
    }
}

/// Strips everything but ASCII alphanumerics and hyphens from a folder name.
/// An empty result falls back to "uploads".
#[must_use]
pub fn sanitize_folder(folder: &str) -> String {
    let safe: String = folder
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    if safe.is_empty() {
        "uploads".to_string()
    } else {
        safe
    }
}

/// Generates a collision-resistant name, keeping only the original extension:
/// `{unix_millis}-{random6}.{ext}`.
#[must_use]
pub fn generate_filename(original_name: &str) -> String {
    let ext: String = original_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_string());

    let timestamp = chrono::Utc::now().timestamp_millis();
    let mut bytes = [0u8; 3];
    rand::thread_rng().fill(&mut bytes);
    let random: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

    format!("{timestamp}-{random}.{ext}")
}

fn validate_component(component: &str) -> Result<(), UploadStorageError> {
    if component.is_empty()
        || component == "."
        || component == ".."
        || component.contains(['/', '\\'])
    {
        return Err(UploadStorageError::InvalidPath);
    }
    Ok(())
}
