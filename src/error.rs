//! Error types for itis-mcp.
//!
//! A single [`ItisError`] taxonomy covers the gateway (transport, remote
//! status, decode), the exploration layer (not-found, incomplete data), and
//! the dispatch boundary (unknown operation, missing argument). Every
//! variant can be rendered as an error-flagged JSON payload via
//! [`ItisError::to_payload`], which is how the operation dispatcher reports
//! failures without ever crashing the serving process.

use serde_json::{Value, json};
use thiserror::Error;

use crate::taxonomy::{ExplorationLevel, TaxonSummary};

/// Result type alias for itis-mcp operations.
pub type Result<T> = std::result::Result<T, ItisError>;

/// Errors produced by the ITIS search and exploration layers.
#[derive(Debug, Error)]
pub enum ItisError {
    /// The network call could not complete (DNS, connection, timeout).
    /// Never retried; the underlying cause is included in the message.
    #[error("network request failed: {message}")]
    Transport {
        /// Underlying transport failure description.
        message: String,
    },

    /// The remote index answered with a non-success HTTP status.
    #[error("ITIS returned HTTP status {status}")]
    RemoteStatus {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response body could not be parsed as the expected JSON envelope.
    #[error("failed to decode ITIS response: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },

    /// Zero records matched where at least one was expected. This is a
    /// normal, reportable outcome, not a system fault.
    #[error("no ITIS records found for \"{name}\"")]
    NotFound {
        /// The name or identifier that failed to resolve.
        name: String,
    },

    /// The resolved record lacks the genus or hierarchy data needed to
    /// derive an exploration query. Carries the partially-resolved target
    /// so callers can inspect what was known.
    #[error("{target} is missing the data required for {level} exploration")]
    IncompleteData {
        /// The exploration level that could not be derived.
        level: ExplorationLevel,
        /// Projection of the record that was resolved before the failure.
        target: TaxonSummary,
    },

    /// The operation name is not in the catalog.
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The unrecognized operation name.
        name: String,
    },

    /// A required argument was absent or ill-typed at the dispatch boundary.
    #[error("invalid arguments for {operation}: {message}")]
    MissingArgument {
        /// The operation whose arguments failed validation.
        operation: String,
        /// Deserializer failure description.
        message: String,
    },
}

impl ItisError {
    /// Stable machine-readable discriminant used in error payloads.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::RemoteStatus { .. } => "remote_status",
            Self::Decode { .. } => "decode",
            Self::NotFound { .. } => "not_found",
            Self::IncompleteData { .. } => "incomplete_data",
            Self::UnknownOperation { .. } => "unknown_operation",
            Self::MissingArgument { .. } => "missing_argument",
        }
    }

    /// Renders this error as the dispatcher's error-flagged JSON payload.
    ///
    /// Always carries `error: true`, `kind`, and `message`; variants attach
    /// their structured context (status code, name, partial target) so the
    /// caller can decide how to proceed.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "error": true,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        match self {
            Self::RemoteStatus { status } => {
                payload["status"] = json!(status);
            }
            Self::NotFound { name } => {
                payload["name"] = json!(name);
            }
            Self::IncompleteData { level, target } => {
                payload["level"] = json!(level);
                payload["target"] = json!(target);
            }
            Self::UnknownOperation { name } => {
                payload["operation"] = json!(name);
            }
            Self::MissingArgument { operation, .. } => {
                payload["operation"] = json!(operation);
            }
            Self::Transport { .. } | Self::Decode { .. } => {}
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_error_flagged() {
        let err = ItisError::Transport {
            message: "connection refused".to_string(),
        };
        let payload = err.to_payload();
        assert_eq!(payload["error"], json!(true));
        assert_eq!(payload["kind"], json!("transport"));
        assert!(
            payload["message"]
                .as_str()
                .unwrap_or_default()
                .contains("connection refused")
        );
    }

    #[test]
    fn test_remote_status_carries_code() {
        let payload = ItisError::RemoteStatus { status: 503 }.to_payload();
        assert_eq!(payload["kind"], json!("remote_status"));
        assert_eq!(payload["status"], json!(503));
    }

    #[test]
    fn test_unknown_operation_carries_name() {
        let payload = ItisError::UnknownOperation {
            name: "frobnicate".to_string(),
        }
        .to_payload();
        assert_eq!(payload["operation"], json!("frobnicate"));
    }

    #[test]
    fn test_incomplete_data_attaches_target() {
        let err = ItisError::IncompleteData {
            level: ExplorationLevel::Family,
            target: TaxonSummary {
                tsn: Some("180092".to_string()),
                name: Some("Homo sapiens".to_string()),
                rank: Some("Species".to_string()),
            },
        };
        let payload = err.to_payload();
        assert_eq!(payload["kind"], json!("incomplete_data"));
        assert_eq!(payload["level"], json!("family"));
        assert_eq!(payload["target"]["tsn"], json!("180092"));
    }

    #[test]
    fn test_not_found_message_names_the_query() {
        let err = ItisError::NotFound {
            name: "Nonexistent species".to_string(),
        };
        assert!(err.to_string().contains("Nonexistent species"));
        assert_eq!(err.to_payload()["name"], json!("Nonexistent species"));
    }
}
