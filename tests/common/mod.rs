pub mod test_server;

pub use test_server::{ADMIN_EMAIL, TestServer};
