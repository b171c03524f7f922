//! Error types and handling for polychat
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! These are the errors that end a command. Model provisioning never fails
//! this way; its per-bundle problems are reported as
//! [`ProvisionIssue`](crate::provision::ProvisionIssue)s instead.
//!
//! Constructors are grouped by error domain:
//! - [`config`]: Configuration and preference errors
//! - [`model`]: Local model directory errors
//! - [`provision`]: Provisioning pass outcome
//! - [`chat`]: Chat backend errors
//! - [`fs`]: File system errors

pub mod chat;
pub mod config;
pub mod fs;
pub mod model;
pub mod provision;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for polychat operations
#[derive(Error, Diagnostic, Debug)]
pub enum PolychatError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(polychat::config::not_found),
        help("Create the file or drop --config to use built-in defaults")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(polychat::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(polychat::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Could not determine {kind} directory")]
    #[diagnostic(
        code(polychat::config::no_base_dir),
        help("Set POLYCHAT_DATA_DIR or POLYCHAT_MODELS_DIR explicitly")
    )]
    NoBaseDirectory { kind: String },

    #[error("Unknown language: {code}")]
    #[diagnostic(
        code(polychat::config::unknown_language),
        help("Supported languages: en (English), hi (Hindi), te (Telugu)")
    )]
    UnknownLanguage { code: String },

    #[error("Failed to save preferences to {path}: {reason}")]
    #[diagnostic(code(polychat::config::prefs_write_failed))]
    PrefsWriteFailed { path: String, reason: String },

    // Model errors
    #[error("Model directory for {bundle} does not exist: {path}")]
    #[diagnostic(
        code(polychat::model::missing),
        help("Run 'polychat provision' to copy the packaged models")
    )]
    ModelMissing { bundle: String, path: String },

    #[error("Model directory for {bundle} is empty: {path}")]
    #[diagnostic(
        code(polychat::model::empty),
        help("Run 'polychat provision' to copy the packaged models again")
    )]
    ModelEmpty { bundle: String, path: String },

    // Provisioning errors
    #[error("Provisioning finished with {issues} issue(s)")]
    #[diagnostic(
        code(polychat::provision::incomplete),
        help("Check that the assets directory contains every configured bundle")
    )]
    ProvisionIncomplete { issues: usize },

    // Chat errors
    #[error("Message is empty")]
    #[diagnostic(code(polychat::chat::empty_message))]
    EmptyMessage,

    #[error("Chat request to {url} failed: {reason}")]
    #[diagnostic(
        code(polychat::chat::request_failed),
        help("Check that backend_url points at a running chat backend")
    )]
    ChatRequestFailed { url: String, reason: String },

    #[error("Chat backend returned {status}: {message}")]
    #[diagnostic(code(polychat::chat::backend))]
    ChatBackend { status: u16, message: String },

    #[error("Chat reply was cancelled")]
    #[diagnostic(code(polychat::chat::cancelled))]
    ChatCancelled,

    #[error("Timed out waiting {seconds}s for a chat reply")]
    #[diagnostic(code(polychat::chat::timeout))]
    ChatTimeout { seconds: u64 },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(polychat::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(polychat::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PolychatError {
    fn from(err: std::io::Error) -> Self {
        PolychatError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PolychatError {
    fn from(err: serde_yaml::Error) -> Self {
        PolychatError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for PolychatError {
    fn from(err: inquire::InquireError) -> Self {
        PolychatError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PolychatError>;
