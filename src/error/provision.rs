//! Provisioning outcome errors

use super::PolychatError;

/// Creates the error ending a provisioning pass that reported issues
pub fn incomplete(issues: usize) -> PolychatError {
    PolychatError::ProvisionIncomplete { issues }
}
