//! Whole-snapshot classification against a live store.

use std::collections::BTreeMap;

use tracing::debug;

use basket_canon::encode_object;
use basket_live::LiveObjectStore;
use basket_store::Snapshot;
use basket_types::{ConfigObject, PolicyTable};

/// How one snapshot object relates to the live store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// No object exists at `(type, key)` in the live store.
    New,
    /// The live object's canonical export differs from the snapshot value.
    Modified,
    /// Canonical forms are byte-identical.
    Unchanged,
    /// The live store failed while reading this object; the message is in
    /// [`DiffEntry::detail`].
    Error,
}

/// One classified `(type, key)` from the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    pub object_type: String,
    pub key: String,
    pub classification: Classification,
    /// Error message for `Error` entries, absent otherwise.
    pub detail: Option<String>,
}

/// The result of diffing a snapshot against a live store.
///
/// Contains exactly one entry per `(type, key)` in the snapshot whose type
/// is comparable under the policy table, in stable type/key order.
/// Policy-skipped types are counted in `skipped_types` but produce no
/// entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    entries: Vec<DiffEntry>,
    skipped_types: BTreeMap<String, usize>,
}

impl SnapshotDiff {
    /// All entries in stable type/key order.
    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    /// Object count per policy-skipped type.
    pub fn skipped_types(&self) -> &BTreeMap<String, usize> {
        &self.skipped_types
    }

    /// The entry for `(object_type, key)`, if that object was compared.
    pub fn entry(&self, object_type: &str, key: &str) -> Option<&DiffEntry> {
        self.entries
            .iter()
            .find(|e| e.object_type == object_type && e.key == key)
    }

    /// Number of compared objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was compared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, classification: Classification) -> usize {
        self.entries
            .iter()
            .filter(|e| e.classification == classification)
            .count()
    }

    /// Number of objects absent from the live store.
    pub fn new_objects(&self) -> usize {
        self.count(Classification::New)
    }

    /// Number of objects whose canonical forms differ.
    pub fn modified(&self) -> usize {
        self.count(Classification::Modified)
    }

    /// Number of objects identical to their live counterpart.
    pub fn unchanged(&self) -> usize {
        self.count(Classification::Unchanged)
    }

    /// Number of objects the live store failed to read.
    pub fn errors(&self) -> usize {
        self.count(Classification::Error)
    }
}

/// Classify every object in the snapshot against the live store.
///
/// One entry per `(type, key)` in the snapshot, in the snapshot's stable
/// order. A lookup or export failure never aborts the run: the failing
/// object is classified `Error` with the message carried in `detail`, and
/// processing continues. Each object is classified independently, with no
/// state shared between entries.
pub fn diff_snapshot(
    snapshot: &Snapshot,
    live: &dyn LiveObjectStore,
    policy: &PolicyTable,
) -> SnapshotDiff {
    let mut diff = SnapshotDiff::default();

    for (object_type, group) in snapshot.content().groups() {
        if !policy.is_comparable(object_type) {
            diff.skipped_types
                .insert(object_type.clone(), group.len());
            continue;
        }
        for (key, object) in group {
            let (classification, detail) = classify(object_type, key, object, live);
            diff.entries.push(DiffEntry {
                object_type: object_type.clone(),
                key: key.clone(),
                classification,
                detail,
            });
        }
    }

    debug!(
        compared = diff.len(),
        new = diff.new_objects(),
        modified = diff.modified(),
        unchanged = diff.unchanged(),
        errors = diff.errors(),
        "diffed snapshot against live store"
    );
    diff
}

fn classify(
    object_type: &str,
    key: &str,
    from_snapshot: &ConfigObject,
    live: &dyn LiveObjectStore,
) -> (Classification, Option<String>) {
    match live.lookup(object_type, key) {
        Err(e) => return (Classification::Error, Some(e.to_string())),
        Ok(None) => return (Classification::New, None),
        Ok(Some(_)) => {}
    }

    // Comparison is defined over the store's canonical export form, which
    // may carry derived fields the raw record lacks.
    let current = match live.export(object_type, key) {
        Err(e) => return (Classification::Error, Some(e.to_string())),
        // Vanished between lookup and export; snapshot-as-truth says NEW.
        Ok(None) => return (Classification::New, None),
        Ok(Some(current)) => current,
    };

    let current_text = match encode_object(&current) {
        Ok(text) => text,
        Err(e) => return (Classification::Error, Some(e.to_string())),
    };
    let snapshot_text = match encode_object(from_snapshot) {
        Ok(text) => text,
        Err(e) => return (Classification::Error, Some(e.to_string())),
    };

    if current_text == snapshot_text {
        (Classification::Unchanged, None)
    } else {
        (Classification::Modified, None)
    }
}
