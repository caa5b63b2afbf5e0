//! Line-level diff of one object's canonical forms.
//!
//! Compares the pretty-printed canonical encoding of the live store's
//! export (empty when the object is absent) against the snapshot value.
//! This is a textual diff, order-sensitive, not a semantic merge.

use similar::{ChangeTag, TextDiff};

use basket_canon::encode_object_pretty;
use basket_live::LiveObjectStore;
use basket_types::ConfigObject;

use crate::error::{DiffError, DiffResult};

/// Number of context lines kept around each change.
const CONTEXT_LINES: usize = 3;

/// Line-level diff between a live object and its snapshot value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectDiff {
    /// Change regions, in document order.
    pub hunks: Vec<DiffHunk>,
}

impl ObjectDiff {
    /// Returns `true` if the two sides are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }

    /// Render as unified-diff text (`@@` headers, `-`/`+`/space prefixes).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for hunk in &self.hunks {
            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            ));
            for line in &hunk.lines {
                let (prefix, text) = match line {
                    DiffLine::Context(t) => (' ', t),
                    DiffLine::Removed(t) => ('-', t),
                    DiffLine::Added(t) => ('+', t),
                };
                out.push(prefix);
                out.push_str(text);
                out.push('\n');
            }
        }
        out
    }
}

/// A contiguous region of changes with surrounding context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based start line on the old (live) side.
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based start line on the new (snapshot) side.
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A single line in a hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// Present on both sides.
    Context(String),
    /// Only in the snapshot value.
    Added(String),
    /// Only in the live export.
    Removed(String),
}

/// Diff one object between the live store and its snapshot value.
///
/// The live side is the canonical export of `(object_type, key)`, or the
/// empty string when the store has no such object (the whole snapshot
/// value then renders as additions). A live store failure here is fatal to
/// this single-object operation and propagates.
pub fn diff_object(
    object_type: &str,
    key: &str,
    from_snapshot: &ConfigObject,
    live: &dyn LiveObjectStore,
) -> DiffResult<ObjectDiff> {
    let current = live
        .export(object_type, key)
        .map_err(|source| DiffError::Live {
            object_type: object_type.to_string(),
            key: key.to_string(),
            source,
        })?;

    let old_text = match &current {
        Some(object) => encode_object_pretty(object)?,
        None => String::new(),
    };
    let new_text = encode_object_pretty(from_snapshot)?;

    Ok(diff_texts(&old_text, &new_text))
}

/// Line diff between two already-encoded canonical texts.
pub fn diff_texts(old: &str, new: &str) -> ObjectDiff {
    if old == new {
        return ObjectDiff { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let Some(first) = group.first() else {
            continue;
        };
        let Some(last) = group.last() else {
            continue;
        };

        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    ObjectDiff { hunks }
}
