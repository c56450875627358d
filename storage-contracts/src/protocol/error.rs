// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorErrorKind {
    /// Host or service could not be reached
    Unreachable,
    PermissionDenied,
    NotFound,
    /// Remote command ran but reported failure
    CommandFailed,
    /// Collected data could not be decoded
    InvalidData,
    Timeout,
    Internal,
}

impl CollectorErrorKind {
    /// Whether a later attempt may succeed without operator action.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Unreachable | Self::Timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct CollectorError {
    pub kind: CollectorErrorKind,
    pub message: String,
}

impl CollectorError {
    pub fn new(kind: CollectorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(CollectorErrorKind::NotFound, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(CollectorErrorKind::InvalidData, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_error_roundtrips() {
        let error = CollectorError::new(CollectorErrorKind::CommandFailed, "diskext exited 1");
        let json = serde_json::to_string(&error).expect("serialize error");
        assert!(json.contains("\"command_failed\""));
        let parsed: CollectorError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(parsed, error);
    }

    #[test]
    fn only_connectivity_failures_are_transient() {
        assert!(CollectorErrorKind::Timeout.is_transient());
        assert!(CollectorErrorKind::Unreachable.is_transient());
        assert!(!CollectorErrorKind::InvalidData.is_transient());
        assert_eq!(
            CollectorError::not_found("web01").to_string(),
            "NotFound: web01"
        );
    }
}
