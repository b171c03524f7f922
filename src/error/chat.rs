//! Chat backend errors

use super::PolychatError;

/// Creates a chat request failed error
pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> PolychatError {
    PolychatError::ChatRequestFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a backend error from a non-success HTTP status
pub fn backend(status: u16, message: impl Into<String>) -> PolychatError {
    PolychatError::ChatBackend {
        status,
        message: message.into(),
    }
}
