use basket_canon::CanonError;
use basket_types::TimestampMs;
use uuid::Uuid;

/// Errors from basket and snapshot store operations.
///
/// Not-found and conflict variants are fatal to the whole operation and
/// propagate to the caller; nothing in this crate is isolated per object.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No basket exists under the given name.
    #[error("basket not found: {0}")]
    BasketNotFound(String),

    /// A basket with the given name already exists.
    #[error("basket already exists: {0}")]
    BasketExists(String),

    /// The basket name is empty or otherwise unusable.
    #[error("invalid basket name: {0:?}")]
    InvalidBasketName(String),

    /// No snapshot exists at `(basket_uuid, ts_create)`.
    #[error("snapshot not found: basket {basket_uuid}, ts {ts_create}")]
    SnapshotNotFound {
        basket_uuid: Uuid,
        ts_create: TimestampMs,
    },

    /// Timestamp collision: a snapshot already exists at
    /// `(basket_uuid, ts_create)`. The caller retries with a fresh clock
    /// read; the store never silently overwrites.
    #[error("snapshot already exists: basket {basket_uuid}, ts {ts_create}")]
    SnapshotExists {
        basket_uuid: Uuid,
        ts_create: TimestampMs,
    },

    /// The object provider failed to collect the basket's selection.
    #[error("object provider failed: {0}")]
    Provider(String),

    /// Canonical serialization failure.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
