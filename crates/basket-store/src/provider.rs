//! The seam through which a basket's current selection is materialized.
//!
//! Which objects a basket selects is external configuration; the core only
//! needs a collaborator that can produce the full grouped collection on
//! demand at snapshot time.

use basket_types::ObjectGraph;

use crate::basket::Basket;
use crate::error::StoreResult;

/// Produces the full current grouped object collection a basket selects.
pub trait ObjectProvider {
    /// Collect the basket's selection as a grouped collection.
    ///
    /// Failures surface as [`StoreError::Provider`](crate::StoreError) and
    /// abort snapshot creation; there is no partial capture.
    fn collect(&self, basket: &Basket) -> StoreResult<ObjectGraph>;
}

/// Provider backed by a pre-built graph. Useful for tests and for
/// re-snapshotting content that was already collected elsewhere.
#[derive(Clone, Debug, Default)]
pub struct FixedProvider {
    graph: ObjectGraph,
}

impl FixedProvider {
    /// Provider that always returns the given graph.
    pub fn new(graph: ObjectGraph) -> Self {
        Self { graph }
    }

    /// Provider that always returns an empty graph.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ObjectProvider for FixedProvider {
    fn collect(&self, _basket: &Basket) -> StoreResult<ObjectGraph> {
        Ok(self.graph.clone())
    }
}
