mod category;
mod icon;
mod models;
mod status;

pub use category::ProjectCategory;
pub use icon::ServiceIcon;
pub use models::*;
pub use status::InquiryStatus;
