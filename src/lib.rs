//! # Stolarija
//!
//! Backend for a carpentry business website: public content and contact
//! endpoints plus a session-authenticated admin API for managing projects,
//! images, services, inquiries and site settings.
//!
//! Usable both as a standalone binary and as a library:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use stolarija::server::{AppState, create_router};
//! use stolarija::store::{SqliteStore, Store};
//! use stolarija::uploads::UploadStorage;
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/stolarija.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     store: Arc::new(store),
//!     uploads: UploadStorage::new(&PathBuf::from("./data")),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod seed;
pub mod server;
pub mod slug;
pub mod store;
pub mod types;
pub mod uploads;
