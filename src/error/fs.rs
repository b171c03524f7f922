//! File system errors

use super::PolychatError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PolychatError {
    PolychatError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> PolychatError {
    PolychatError::IoError {
        message: message.into(),
    }
}
