//! Configuration and preference errors

use super::PolychatError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PolychatError {
    PolychatError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PolychatError {
    PolychatError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PolychatError {
    PolychatError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an unknown language error
pub fn unknown_language(code: impl Into<String>) -> PolychatError {
    PolychatError::UnknownLanguage { code: code.into() }
}

/// Creates an error for a platform directory that cannot be resolved
pub fn no_base_dir(kind: impl Into<String>) -> PolychatError {
    PolychatError::NoBaseDirectory { kind: kind.into() }
}

/// Creates a preferences write failed error
pub fn prefs_write_failed(path: impl Into<String>, reason: impl Into<String>) -> PolychatError {
    PolychatError::PrefsWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
