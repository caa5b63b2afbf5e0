//! Capturing a basket's selection out of a live store.

use basket_store::{Basket, ObjectProvider, StoreError, StoreResult};
use basket_types::{ObjectGraph, ObjectRef};

use crate::traits::LiveObjectStore;

/// [`ObjectProvider`] that materializes a fixed selection of `(type, key)`
/// references by exporting each object from a live store.
///
/// Snapshots always capture the store's canonical export form, so that a
/// later diff of an unmodified object compares equal. A selected object
/// that is missing or unreadable aborts the capture; partial snapshots are
/// never produced.
pub struct SelectionProvider<'a> {
    store: &'a dyn LiveObjectStore,
    selection: Vec<ObjectRef>,
}

impl<'a> SelectionProvider<'a> {
    pub fn new(store: &'a dyn LiveObjectStore, selection: Vec<ObjectRef>) -> Self {
        Self { store, selection }
    }

    /// The selected references, in the order they were configured.
    pub fn selection(&self) -> &[ObjectRef] {
        &self.selection
    }
}

impl ObjectProvider for SelectionProvider<'_> {
    fn collect(&self, _basket: &Basket) -> StoreResult<ObjectGraph> {
        let mut graph = ObjectGraph::new();
        for reference in &self.selection {
            let exported = self
                .store
                .export(&reference.object_type, &reference.key)
                .map_err(|e| StoreError::Provider(format!("export of {reference} failed: {e}")))?
                .ok_or_else(|| {
                    StoreError::Provider(format!("selected object {reference} does not exist"))
                })?;
            graph.insert(
                reference.object_type.clone(),
                reference.key.clone(),
                exported,
            );
        }
        Ok(graph)
    }
}
