use basket_canon::CanonError;
use basket_live::LiveError;

/// Errors from diff engine operations.
///
/// These are fatal to a single-object diff. During a whole-snapshot diff
/// no error is fatal: per-object failures become `Error` entries instead.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Canonical serialization failure.
    #[error(transparent)]
    Canon(#[from] CanonError),

    /// The live store failed while reading one object.
    #[error("live store error for {object_type}/{key}: {source}")]
    Live {
        object_type: String,
        key: String,
        source: LiveError,
    },
}

/// Result alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;
