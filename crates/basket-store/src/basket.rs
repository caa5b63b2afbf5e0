use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::provider::ObjectProvider;

/// A named, versioned collection of configuration object selections.
///
/// A basket owns no object data itself: it is an identity (`name` for
/// humans, `uuid` as the foreign key for snapshots) plus, externally, the
/// configuration describing which objects it selects. Snapshots reference
/// their basket by `uuid` only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    name: String,
    uuid: Uuid,
}

impl Basket {
    /// Create a basket identity with a fresh UUID.
    ///
    /// This does not persist anything; use
    /// [`SnapshotStore::create_basket`](crate::SnapshotStore::create_basket)
    /// to register the basket (which enforces name uniqueness).
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        validate_basket_name(&name)?;
        Ok(Self {
            name,
            uuid: Uuid::now_v7(),
        })
    }

    /// The basket's unique, stable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The basket's opaque identifier, assigned at creation.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns `true` if the basket currently selects zero objects.
    pub fn is_empty(&self, provider: &dyn ObjectProvider) -> StoreResult<bool> {
        Ok(provider.collect(self)?.is_empty())
    }
}

/// Basket names must be non-empty and free of leading/trailing whitespace.
pub fn validate_basket_name(name: &str) -> StoreResult<()> {
    if name.is_empty() || name.trim() != name {
        return Err(StoreError::InvalidBasketName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedProvider;
    use basket_types::{ConfigObject, ObjectGraph};

    #[test]
    fn new_assigns_distinct_uuids() {
        let a = Basket::new("net").unwrap();
        let b = Basket::new("net").unwrap();
        assert_eq!(a.name(), "net");
        assert_ne!(a.uuid(), b.uuid());
    }

    #[test]
    fn invalid_names_rejected() {
        assert!(matches!(
            Basket::new(""),
            Err(StoreError::InvalidBasketName(_))
        ));
        assert!(matches!(
            Basket::new(" padded "),
            Err(StoreError::InvalidBasketName(_))
        ));
    }

    #[test]
    fn is_empty_follows_the_provider() {
        let basket = Basket::new("net").unwrap();
        assert!(basket.is_empty(&FixedProvider::empty()).unwrap());

        let mut graph = ObjectGraph::new();
        graph.insert("Host", "srv1", ConfigObject::new());
        assert!(!basket.is_empty(&FixedProvider::new(graph)).unwrap());
    }

    #[test]
    fn serde_roundtrip() {
        let basket = Basket::new("net").unwrap();
        let json = serde_json::to_string(&basket).unwrap();
        let parsed: Basket = serde_json::from_str(&json).unwrap();
        assert_eq!(basket, parsed);
    }
}
