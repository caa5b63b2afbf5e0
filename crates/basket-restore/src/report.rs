use basket_types::ObjectRef;

/// Why an object was skipped instead of applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The live export is already byte-identical to the snapshot value.
    Identical,
    /// The policy table marks this type as not restorable.
    NotRestorable,
}

/// Outcome of restoring one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The object was applied to the live store.
    Applied,
    /// The object was not applied, for a benign reason.
    Skipped(SkipReason),
    /// The store rejected the apply; the batch continued.
    Failed(String),
}

/// One object's restore result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreEntry {
    pub object: ObjectRef,
    pub outcome: RestoreOutcome,
}

/// Per-object outcomes of a restore run, in apply order.
///
/// A report is only produced when the run itself completed; a fatal
/// transactional abort surfaces as a
/// [`RestoreError`](crate::RestoreError) instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    entries: Vec<RestoreEntry>,
}

impl RestoreReport {
    pub(crate) fn push(&mut self, object: ObjectRef, outcome: RestoreOutcome) {
        self.entries.push(RestoreEntry { object, outcome });
    }

    /// All entries, in the order objects were processed.
    pub fn entries(&self) -> &[RestoreEntry] {
        &self.entries
    }

    /// The outcome recorded for `(object_type, key)`, if it was selected.
    pub fn outcome(&self, object_type: &str, key: &str) -> Option<&RestoreOutcome> {
        self.entries
            .iter()
            .find(|e| e.object.object_type == object_type && e.object.key == key)
            .map(|e| &e.outcome)
    }

    /// Number of selected objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of applied objects.
    pub fn applied(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == RestoreOutcome::Applied)
            .count()
    }

    /// Number of skipped objects (identical or not restorable).
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RestoreOutcome::Skipped(_)))
            .count()
    }

    /// Number of per-object failures.
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RestoreOutcome::Failed(_)))
            .count()
    }

    /// Returns `true` if every selected object was applied or skipped.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_partition_the_entries() {
        let mut report = RestoreReport::default();
        report.push(ObjectRef::new("Host", "a"), RestoreOutcome::Applied);
        report.push(
            ObjectRef::new("Host", "b"),
            RestoreOutcome::Skipped(SkipReason::Identical),
        );
        report.push(
            ObjectRef::new("Host", "c"),
            RestoreOutcome::Failed("boom".into()),
        );

        assert_eq!(report.len(), 3);
        assert_eq!(report.applied(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn outcome_lookup_by_identity() {
        let mut report = RestoreReport::default();
        report.push(ObjectRef::new("Host", "a"), RestoreOutcome::Applied);

        assert_eq!(report.outcome("Host", "a"), Some(&RestoreOutcome::Applied));
        assert_eq!(report.outcome("Host", "z"), None);
    }

    #[test]
    fn empty_report_is_clean() {
        let report = RestoreReport::default();
        assert!(report.is_empty());
        assert!(report.is_clean());
    }
}
