//! Typed errors at the boundaries of the request pipeline.
//!
//! Internal faults travel as `anyhow::Error` and end up in the fault envelope.
//! The types here mark outcomes that callers must tell apart.

use thiserror::Error;

/// Failure while decoding request parameters.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Token gate is enabled and the supplied token does not match.
    #[error("access denied")]
    AccessDenied,

    /// Parameters cannot be interpreted unambiguously.
    #[error("malformed request: {0}")]
    Malformed(String),
}

/// Request rejected by the token gate. No response document is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied;
