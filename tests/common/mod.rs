//! Common test utilities for Polychat integration tests

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use walkdir::WalkDir;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

/// Configuration written by [`TestWorkspace::new`]
#[allow(dead_code)]
pub const DEFAULT_CONFIG: &str = "\
assets_dir: assets
models_dir: models
bundles:
  - small-en
  - small-hi
";

/// An isolated directory with its own config, assets, models and data dir
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace with [`DEFAULT_CONFIG`]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let workspace = Self { temp, path };
        workspace.write_config(DEFAULT_CONFIG);
        workspace
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join("polychat.yaml")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.path.join("models")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path.join("data")
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_path(), yaml).expect("Failed to write config");
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a packaged asset, e.g. `write_asset("small-en/a.bin", "A")`
    pub fn write_asset(&self, path: &str, content: &str) {
        self.write_file(&format!("assets/{path}"), content);
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Every file under a local model copy as `relative/path -> contents`
    pub fn model_tree(&self, bundle: &str) -> BTreeMap<String, String> {
        read_tree(&self.models_dir().join(bundle))
    }

    /// Leftover staging directories in the model root
    pub fn staging_dirs(&self) -> Vec<String> {
        std::fs::read_dir(self.models_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|name| name.starts_with(".staging-"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The polychat binary, isolated from the invoking user's environment
    pub fn polychat_cmd(&self) -> Command {
        let mut cmd = polychat_cmd();
        cmd.current_dir(&self.path)
            .env("POLYCHAT_CONFIG", self.config_path())
            .env("POLYCHAT_DATA_DIR", self.data_dir())
            .env_remove("POLYCHAT_MODELS_DIR")
            .env_remove("POLYCHAT_LOG");
        // The canned backends live on localhost
        for proxy in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
            cmd.env_remove(proxy);
        }
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated, dead_code)]
pub fn polychat_cmd() -> Command {
    Command::cargo_bin("polychat").expect("polychat binary")
}

/// Collect every file under `root` as `relative/path -> contents`
#[allow(dead_code)]
pub fn read_tree(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("Failed to walk tree"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .expect("walked path under root")
                .to_string_lossy()
                .replace('\\', "/");
            let content = std::fs::read_to_string(e.path()).expect("Failed to read file");
            (rel, content)
        })
        .collect()
}

/// Chat backend on localhost answering every `POST /chat` the same way.
///
/// Keep it alive until the command under test has finished.
#[allow(dead_code)]
pub struct MockChatBackend {
    server: MockServer,
    runtime: tokio::runtime::Runtime,
}

#[allow(dead_code)]
impl MockChatBackend {
    /// Reply with `status` and the JSON `body`
    pub fn replying(status: u16, body: &str) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build test runtime");
        let template = ResponseTemplate::new(status).set_body_raw(body, "application/json");
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .and(matchers::path("/chat"))
                .respond_with(template)
                .mount(&server)
                .await;
            server
        });
        Self { server, runtime }
    }

    /// URL to configure as `backend_url`
    pub fn url(&self) -> String {
        format!("{}/chat", self.server.uri())
    }

    /// JSON bodies of every request received so far
    pub fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Request body is not JSON"))
            .collect()
    }
}
