use thiserror::Error;

/// Errors from live object store operations.
///
/// `Backend` and `Constraint` are per-object failures: the diff engine
/// records them as `Error` entries and the restore engine as `Failed`
/// report entries, and the batch continues. `Transaction` signals a fatal
/// store-level abort and propagates out of a restore.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LiveError {
    /// Transient/operational failure in the store (connection lost, query
    /// failed, object unreadable).
    #[error("backend error: {0}")]
    Backend(String),

    /// The store rejected an apply because it would violate a referential
    /// constraint.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store aborted the whole transaction; no further applies can
    /// succeed in this batch.
    #[error("transaction aborted: {0}")]
    Transaction(String),
}

/// Result alias for live store operations.
pub type LiveResult<T> = Result<T, LiveError>;
