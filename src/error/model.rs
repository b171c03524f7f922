//! Local model directory errors

use super::PolychatError;

/// Creates a model missing error
pub fn missing(bundle: impl Into<String>, path: impl Into<String>) -> PolychatError {
    PolychatError::ModelMissing {
        bundle: bundle.into(),
        path: path.into(),
    }
}

/// Creates a model empty error
pub fn empty(bundle: impl Into<String>, path: impl Into<String>) -> PolychatError {
    PolychatError::ModelEmpty {
        bundle: bundle.into(),
        path: path.into(),
    }
}
