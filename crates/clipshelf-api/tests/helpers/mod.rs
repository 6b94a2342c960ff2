//! Test helpers: build the router over scratch directories for integration tests.
//!
//! Run from workspace root: `cargo test -p clipshelf-api`.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use clipshelf_api::constants;
use clipshelf_api::setup::build_app;
use clipshelf_api::state::AppState;
use clipshelf_core::Config;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, router and owned scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub state: Arc<AppState>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("uploads")
    }

    pub fn metadata_file(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("videos.json")
    }
}

/// Setup test app with local storage under a fresh temp directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app with extra configuration variables.
pub async fn setup_test_app_with(vars: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let mut env = HashMap::new();
    env.insert(
        "DATA_DIR".to_string(),
        temp_dir.path().display().to_string(),
    );
    for (key, value) in vars {
        env.insert(key.to_string(), value.to_string());
    }
    let config = Config::from_map(&env).expect("Failed to build test config");

    let (state, router) = build_app(config).await.expect("Failed to build app");
    let server = TestServer::new(router.clone()).expect("Failed to start test server");

    TestApp {
        server,
        router,
        state,
        temp_dir,
    }
}

/// Setup test app whose blobs go to a mock remote container at `{server_url}/container`.
pub async fn setup_remote_test_app(server_url: &str) -> TestApp {
    let sas_url = format!("{}/container?sv=2024&sig=test", server_url);
    setup_test_app_with(&[("REMOTE_STORAGE_SAS_URL", sas_url.as_str())]).await
}
