pub mod dto;
mod images;
mod inquiries;
mod projects;
pub mod response;
mod router;
mod services;
mod session;
mod settings;
mod stats;
mod upload;
pub mod validation;

pub use router::{AppState, create_router};
