use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use stolarija::seed::{seed_admin_user, seed_defaults};
use stolarija::server::{AppState, create_router};
use stolarija::store::SqliteStore;
use stolarija::uploads::UploadStorage;

pub const ADMIN_EMAIL: &str = "admin@example.hr";
pub const ADMIN_PASSWORD: &str = "tajna-lozinka-123";

/// An in-process server instance bound to an ephemeral port, backed by an
/// isolated temp data directory with a seeded admin account.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let data_dir = temp_dir.path();

        let store = SqliteStore::new(data_dir.join("stolarija.db")).expect("open store");
        stolarija::store::Store::initialize(&store).expect("initialize store");
        seed_admin_user(&store, ADMIN_EMAIL, ADMIN_PASSWORD, "Test Admin")
            .expect("seed admin")
            .expect("admin created");
        seed_defaults(&store).expect("seed defaults");

        let state = Arc::new(AppState {
            store: Arc::new(store),
            uploads: UploadStorage::new(data_dir),
        });
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            temp_dir,
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Logs in as the seeded admin and returns the raw session token, usable
    /// as a bearer token.
    pub async fn login(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD,
            }))
            .send()
            .await
            .expect("login request");
        assert!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await.expect("login body");
        body["token"].as_str().expect("token in body").to_string()
    }
}
