//! Replaying snapshot content into a live store.

use tracing::{debug, warn};

use basket_canon::encode_object;
use basket_live::{LiveError, LiveObjectStore};
use basket_store::Snapshot;
use basket_types::{ConfigObject, ObjectRef, PolicyTable};

use crate::error::{RestoreError, RestoreResult};
use crate::report::{RestoreOutcome, RestoreReport, SkipReason};

/// Which part of the snapshot to restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Every object in the snapshot.
    All,
    /// A single `(type, key)`.
    One(ObjectRef),
}

/// Replay the selected snapshot objects into the live store.
///
/// The target store is whatever the caller passes in — restoring into a
/// different environment than the snapshot's origin is the normal
/// cross-promotion path, not a special case.
///
/// Apply order follows the store's `dependency_order` hint when it gives
/// one, otherwise the snapshot's stable type/key order. Each apply is an
/// idempotent upsert; a per-object failure is recorded and the batch
/// continues. Only [`LiveError::Transaction`] aborts the run, leaving
/// already-applied objects in place (the engine never rolls back).
pub fn restore_snapshot(
    snapshot: &Snapshot,
    live: &dyn LiveObjectStore,
    selector: &Selector,
    policy: &PolicyTable,
) -> RestoreResult<RestoreReport> {
    let selected = select(snapshot, selector)?;
    let ordered = order_for_apply(live, selected);

    let mut report = RestoreReport::default();
    for reference in ordered {
        // Selection was validated against the snapshot above.
        let Some(object) = snapshot.content().get_ref(&reference) else {
            continue;
        };

        if !policy.is_restorable(&reference.object_type) {
            report.push(reference, RestoreOutcome::Skipped(SkipReason::NotRestorable));
            continue;
        }

        if is_identical_in_store(&reference, object, live) {
            report.push(reference, RestoreOutcome::Skipped(SkipReason::Identical));
            continue;
        }

        match live.apply(&reference.object_type, &reference.key, object) {
            Ok(()) => report.push(reference, RestoreOutcome::Applied),
            Err(LiveError::Transaction(reason)) => {
                warn!(object = %reference, %reason, "live store aborted restore batch");
                return Err(RestoreError::Fatal {
                    object: reference,
                    source: LiveError::Transaction(reason),
                });
            }
            Err(e) => {
                report.push(reference, RestoreOutcome::Failed(e.to_string()));
            }
        }
    }

    debug!(
        selected = report.len(),
        applied = report.applied(),
        skipped = report.skipped(),
        failed = report.failed(),
        "restored snapshot into live store"
    );
    Ok(report)
}

fn select(snapshot: &Snapshot, selector: &Selector) -> RestoreResult<Vec<ObjectRef>> {
    match selector {
        Selector::All => Ok(snapshot.content().refs()),
        Selector::One(reference) => {
            if snapshot.content().get_ref(reference).is_none() {
                return Err(RestoreError::ObjectNotInSnapshot(reference.clone()));
            }
            Ok(vec![reference.clone()])
        }
    }
}

/// Apply the store's dependency hint if it gives one.
///
/// The hint is treated as advisory: references it drops are appended in
/// stable order, references it invents are ignored, so the engine always
/// processes exactly the selected set.
fn order_for_apply(live: &dyn LiveObjectStore, selected: Vec<ObjectRef>) -> Vec<ObjectRef> {
    let Some(hint) = live.dependency_order(&selected) else {
        return selected;
    };
    let mut ordered: Vec<ObjectRef> = hint
        .into_iter()
        .filter(|r| selected.contains(r))
        .collect();
    for reference in selected {
        if !ordered.contains(&reference) {
            ordered.push(reference);
        }
    }
    ordered
}

/// Skip-identical probe. A read failure here is deliberately ignored:
/// lookup errors affect diffs only, and the apply below decides the
/// object's fate.
fn is_identical_in_store(
    reference: &ObjectRef,
    from_snapshot: &ConfigObject,
    live: &dyn LiveObjectStore,
) -> bool {
    let Ok(Some(current)) = live.export(&reference.object_type, &reference.key) else {
        return false;
    };
    match (encode_object(&current), encode_object(from_snapshot)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_diff::{diff_snapshot, Classification};
    use basket_live::{InMemoryLiveStore, SelectionProvider};
    use basket_store::{Basket, FixedProvider, InMemorySnapshotStore, SnapshotStore};
    use basket_types::{ObjectGraph, TimestampMs};

    fn host(address: &str) -> ConfigObject {
        ConfigObject::new().with("address", address)
    }

    fn snapshot_of(graph: ObjectGraph) -> Snapshot {
        let basket = Basket::new("net").unwrap();
        Snapshot::capture_at(
            &basket,
            &FixedProvider::new(graph),
            TimestampMs::from_millis(1000),
        )
        .unwrap()
    }

    fn two_host_graph() -> ObjectGraph {
        let mut graph = ObjectGraph::new();
        graph.insert("Host", "srv1", host("10.0.0.1"));
        graph.insert("Host", "srv2", host("10.0.0.2"));
        graph
    }

    // -----------------------------------------------------------------------
    // Full restore
    // -----------------------------------------------------------------------

    #[test]
    fn full_restore_into_empty_store_applies_everything() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        assert_eq!(report.applied(), 2);
        assert!(report.is_clean());
        assert_eq!(live.raw("Host", "srv1").unwrap(), host("10.0.0.1"));
        assert_eq!(live.raw("Host", "srv2").unwrap(), host("10.0.0.2"));
    }

    #[test]
    fn restore_is_idempotent() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();
        let policy = PolicyTable::new();

        restore_snapshot(&snapshot, &live, &Selector::All, &policy).unwrap();
        let first_state = (live.raw("Host", "srv1"), live.raw("Host", "srv2"));

        let second = restore_snapshot(&snapshot, &live, &Selector::All, &policy).unwrap();
        assert_eq!(second.applied(), 0);
        assert_eq!(second.skipped(), 2);
        assert_eq!(
            (live.raw("Host", "srv1"), live.raw("Host", "srv2")),
            first_state
        );
    }

    #[test]
    fn modified_object_is_overwritten_with_snapshot_state() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();
        live.put("Host", "srv1", host("10.0.0.1"));
        live.put("Host", "srv2", host("10.99.99.99")); // drifted

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        assert_eq!(
            report.outcome("Host", "srv1"),
            Some(&RestoreOutcome::Skipped(SkipReason::Identical))
        );
        assert_eq!(report.outcome("Host", "srv2"), Some(&RestoreOutcome::Applied));
        assert_eq!(live.raw("Host", "srv2").unwrap(), host("10.0.0.2"));
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn single_object_restore_leaves_others_alone() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();
        live.put("Host", "srv1", host("drifted-1"));
        live.put("Host", "srv2", host("drifted-2"));

        let report = restore_snapshot(
            &snapshot,
            &live,
            &Selector::One(ObjectRef::new("Host", "srv2")),
            &PolicyTable::new(),
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.applied(), 1);
        assert_eq!(live.raw("Host", "srv1").unwrap(), host("drifted-1"));
        assert_eq!(live.raw("Host", "srv2").unwrap(), host("10.0.0.2"));
    }

    #[test]
    fn selecting_an_object_outside_the_snapshot_fails() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();

        let err = restore_snapshot(
            &snapshot,
            &live,
            &Selector::One(ObjectRef::new("Host", "ghost")),
            &PolicyTable::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RestoreError::ObjectNotInSnapshot(_)));
    }

    // -----------------------------------------------------------------------
    // Policy
    // -----------------------------------------------------------------------

    #[test]
    fn non_restorable_types_are_skipped() {
        let mut graph = two_host_graph();
        graph.insert("Datafield", "1", ConfigObject::new().with("varname", "os"));
        let snapshot = snapshot_of(graph);
        let live = InMemoryLiveStore::new();
        let policy = PolicyTable::new().skip("Datafield");

        let report = restore_snapshot(&snapshot, &live, &Selector::All, &policy).unwrap();
        assert_eq!(
            report.outcome("Datafield", "1"),
            Some(&RestoreOutcome::Skipped(SkipReason::NotRestorable))
        );
        assert_eq!(report.applied(), 2);
        assert!(live.raw("Datafield", "1").is_none());
    }

    // -----------------------------------------------------------------------
    // Failure isolation
    // -----------------------------------------------------------------------

    #[test]
    fn per_object_apply_failure_does_not_abort_the_batch() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();
        live.fail_writes("Host", "srv1", LiveError::Constraint("missing zone".into()));

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.applied(), 1);
        let RestoreOutcome::Failed(reason) = report.outcome("Host", "srv1").unwrap() else {
            panic!("expected Failed outcome");
        };
        assert!(reason.contains("missing zone"));
        assert_eq!(live.raw("Host", "srv2").unwrap(), host("10.0.0.2"));
    }

    #[test]
    fn read_failure_does_not_block_the_apply() {
        // Lookup errors are diff-only: the skip-identical probe fails, the
        // apply still runs. Reads and writes fault independently here.
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();
        live.fail_reads("Host", "srv1", LiveError::Backend("db gone".into()));

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        assert_eq!(report.outcome("Host", "srv1"), Some(&RestoreOutcome::Applied));
        assert_eq!(live.raw("Host", "srv1").unwrap(), host("10.0.0.1"));
    }

    #[test]
    fn transactional_abort_is_fatal_and_keeps_prior_applies() {
        let mut graph = two_host_graph();
        graph.insert("Host", "srv3", host("10.0.0.3"));
        let snapshot = snapshot_of(graph);

        let live = InMemoryLiveStore::new();
        live.fail_writes("Host", "srv2", LiveError::Transaction("deadlock".into()));

        let err = restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new())
            .unwrap_err();
        let RestoreError::Fatal { object, .. } = err else {
            panic!("expected Fatal error");
        };
        assert_eq!(object, ObjectRef::new("Host", "srv2"));
        // srv1 was applied before the abort and stays; srv3 never ran.
        assert!(live.raw("Host", "srv1").is_some());
        assert!(live.raw("Host", "srv3").is_none());
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn dependency_hint_orders_the_applies() {
        let mut graph = ObjectGraph::new();
        graph.insert("Host", "srv1", host("10.0.0.1"));
        graph.insert("Zone", "master", ConfigObject::new().with("is_global", false));
        let snapshot = snapshot_of(graph);

        let live = InMemoryLiveStore::new();
        live.set_dependency_rank("Zone", 0);
        live.set_dependency_rank("Host", 1);

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        let order: Vec<&ObjectRef> = report.entries().iter().map(|e| &e.object).collect();
        assert_eq!(order[0], &ObjectRef::new("Zone", "master"));
        assert_eq!(order[1], &ObjectRef::new("Host", "srv1"));
    }

    #[test]
    fn without_hint_applies_follow_snapshot_order() {
        let snapshot = snapshot_of(two_host_graph());
        let live = InMemoryLiveStore::new();

        let report =
            restore_snapshot(&snapshot, &live, &Selector::All, &PolicyTable::new()).unwrap();
        let order: Vec<String> = report
            .entries()
            .iter()
            .map(|e| e.object.key.clone())
            .collect();
        assert_eq!(order, ["srv1", "srv2"]);
    }

    // -----------------------------------------------------------------------
    // End-to-end: snapshot → drift → diff → restore → diff
    // -----------------------------------------------------------------------

    #[test]
    fn drifted_object_round_trip_converges() {
        let live = InMemoryLiveStore::new();
        live.put("Host", "srv1", host("10.0.0.1"));
        live.put("Host", "srv2", host("10.0.0.2"));

        let snapshots = InMemorySnapshotStore::new();
        let basket = snapshots.create_basket("net").unwrap();
        let provider = SelectionProvider::new(
            &live,
            vec![ObjectRef::new("Host", "srv1"), ObjectRef::new("Host", "srv2")],
        );
        let s1 = snapshots.create_snapshot(&basket, &provider).unwrap();

        // srv2 drifts in the live store.
        live.put("Host", "srv2", host("10.99.99.99"));

        let policy = PolicyTable::new();
        let diff = diff_snapshot(&s1, &live, &policy);
        assert_eq!(
            diff.entry("Host", "srv1").unwrap().classification,
            Classification::Unchanged
        );
        assert_eq!(
            diff.entry("Host", "srv2").unwrap().classification,
            Classification::Modified
        );

        // Restore only srv2 from the snapshot.
        let report = restore_snapshot(
            &s1,
            &live,
            &Selector::One(ObjectRef::new("Host", "srv2")),
            &policy,
        )
        .unwrap();
        assert_eq!(report.applied(), 1);

        let diff = diff_snapshot(&s1, &live, &policy);
        assert_eq!(diff.unchanged(), 2);
        assert_eq!(diff.modified(), 0);
    }

    #[test]
    fn cross_store_promotion_targets_the_given_store() {
        // Snapshot captured from one environment, restored into another.
        let origin = InMemoryLiveStore::new();
        origin.put("Host", "srv1", host("10.0.0.1"));

        let snapshots = InMemorySnapshotStore::new();
        let basket = snapshots.create_basket("net").unwrap();
        let provider = SelectionProvider::new(&origin, vec![ObjectRef::new("Host", "srv1")]);
        let snapshot = snapshots.create_snapshot(&basket, &provider).unwrap();

        let target = InMemoryLiveStore::new();
        let report =
            restore_snapshot(&snapshot, &target, &Selector::All, &PolicyTable::new()).unwrap();
        assert_eq!(report.applied(), 1);
        assert_eq!(target.raw("Host", "srv1").unwrap(), host("10.0.0.1"));
        // The origin store is untouched by the promotion.
        assert_eq!(origin.len(), 1);
    }
}
