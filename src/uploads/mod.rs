mod storage;

pub use storage::{
    ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES, StoredUpload, UploadStorage, UploadStorageError,
    generate_filename, sanitize_folder,
};
