//! Gateway error types.

use thiserror::Error;

/// Errors returned by collaborator gateways.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The collaborator could not be reached or failed internally.
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator refused the request.
    #[error("Collaborator rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The collaborator answered with a body that could not be decoded.
    #[error("Invalid collaborator response: {0}")]
    InvalidResponse(String),
}

/// Convenience type alias for gateway results.
pub type Result<T> = std::result::Result<T, GatewayError>;
