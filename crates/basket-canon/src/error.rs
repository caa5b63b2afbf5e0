use thiserror::Error;

/// Errors from canonical encode/decode operations.
#[derive(Debug, Error)]
pub enum CanonError {
    /// The input is not valid canonical text.
    #[error("parse error: {0}")]
    Parse(String),

    /// A value could not be serialized to canonical text.
    #[error("encode error: {0}")]
    Encode(String),
}

/// Result alias for canonical serializer operations.
pub type CanonResult<T> = Result<T, CanonError>;
