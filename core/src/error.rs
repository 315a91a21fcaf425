//! Error types for the invocation pipeline.
//!
//! # Design
//! Every failure a call can produce lands in the single `InvokeError` enum so
//! callers handle one type. `code()` exposes a stable discriminant for
//! branching on failure kind without inspecting cause strings; the original
//! cause (transport error, serde error) rides along as `#[source]`.
//! `Deserialization` keeps the raw response body — it is the only diagnostic
//! evidence when the server returned something unexpected.

use thiserror::Error;

/// Error reported by the transport collaborator when the HTTP round trip
/// itself failed before a body was obtained.
#[derive(Debug, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Stable discriminant for [`InvokeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Metadata,
    Template,
    Transport,
    Deserialization,
}

/// Failure of one invocation. A call either returns the declared type or
/// exactly one of these; partial results do not exist.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The method has no (or a malformed) endpoint declaration. A
    /// programming error in the interface definition, never retried.
    #[error("endpoint metadata error for `{method}`: {reason}")]
    Metadata { method: String, reason: String },

    /// A URL placeholder had no value in the working parameter map.
    #[error("unresolved placeholder `{placeholder}` in URL template `{template}`")]
    Template {
        template: String,
        placeholder: String,
    },

    /// The transport collaborator failed to perform the round trip.
    #[error("transport error")]
    Transport {
        #[source]
        source: TransportError,
    },

    /// The response body did not match the declared return shape. `body` is
    /// the raw response text, retained for diagnosis.
    #[error("failed to deserialize response body: {source}")]
    Deserialization {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InvokeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InvokeError::Metadata { .. } => ErrorCode::Metadata,
            InvokeError::Template { .. } => ErrorCode::Template,
            InvokeError::Transport { .. } => ErrorCode::Transport,
            InvokeError::Deserialization { .. } => ErrorCode::Deserialization,
        }
    }
}

impl From<TransportError> for InvokeError {
    fn from(source: TransportError) -> Self {
        InvokeError::Transport { source }
    }
}
