// ── Core error types ──
//
// User-facing errors from clustree-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<clustree_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

use crate::model::ResourceTypeId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Build errors ─────────────────────────────────────────────────
    /// The cluster graph references a resource type the metadata fetch did
    /// not cover. Fatal for the build: guessing `singleton` or the
    /// subcategory chain would silently corrupt the tree shape.
    #[error("Missing type metadata for resource type {type_id}")]
    MissingTypeMetadata { type_id: ResourceTypeId },

    /// The graph violates its own invariants (a non-root node without a
    /// key fragment, or `members > cluster_size`).
    #[error("Malformed cluster graph: {detail}")]
    MalformedGraph { detail: String },

    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot connect to management server: {reason}")]
    ConnectionFailed { reason: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<clustree_api::Error> for CoreError {
    fn from(err: clustree_api::Error) -> Self {
        match err {
            clustree_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            clustree_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            clustree_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        entity_type: "resource".into(),
                        identifier: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            clustree_api::Error::InvalidUrl(e) => CoreError::Internal(format!("Invalid URL: {e}")),
            clustree_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                reason: format!("TLS error: {msg}"),
            },
            clustree_api::Error::Api {
                message,
                code,
                status,
            } => {
                if status == 404 {
                    CoreError::NotFound {
                        entity_type: "resource".into(),
                        identifier: message,
                    }
                } else {
                    CoreError::Api {
                        message,
                        code,
                        status: Some(status),
                    }
                }
            }
            clustree_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
