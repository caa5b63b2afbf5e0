use basket_live::LiveError;
use basket_types::ObjectRef;

/// Errors that abort a whole restore run.
///
/// Per-object apply failures are NOT errors at this level; they are
/// collected as `Failed` entries in the
/// [`RestoreReport`](crate::RestoreReport).
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// A single-object restore named an object the snapshot does not hold.
    #[error("object not in snapshot: {0}")]
    ObjectNotInSnapshot(ObjectRef),

    /// The live store aborted the batch transactionally; objects applied
    /// before the abort are reported, nothing after it was attempted.
    #[error("restore aborted at {object}: {source}")]
    Fatal {
        object: ObjectRef,
        source: LiveError,
    },
}

/// Result alias for restore operations.
pub type RestoreResult<T> = Result<T, RestoreError>;
