//! Comparison report: per-category counts plus the classified changes for
//! one version pair, in display and machine-readable form.

use std::fmt;

use serde::{Deserialize, Serialize};

use drg_core::RecordSet;

use crate::classify::{ChangeKind, ChangeSet, classify};

/// Entry counts per change category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
    pub mdc_changed: usize,
    pub type_changed: usize,
    pub description_changed: usize,
    pub unchanged: usize,
}

impl ChangeCounts {
    /// Tally the entries of a change set.
    pub fn tally(changes: &ChangeSet) -> Self {
        let mut counts = ChangeCounts::default();
        for change in changes {
            match change.kind() {
                ChangeKind::Added => counts.added += 1,
                ChangeKind::Removed => counts.removed += 1,
                ChangeKind::MdcChanged => counts.mdc_changed += 1,
                ChangeKind::TypeChanged => counts.type_changed += 1,
                ChangeKind::DescriptionChanged => counts.description_changed += 1,
                ChangeKind::Unchanged => counts.unchanged += 1,
            }
        }
        counts
    }

    /// Count for one category.
    pub fn get(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Added => self.added,
            ChangeKind::Removed => self.removed,
            ChangeKind::MdcChanged => self.mdc_changed,
            ChangeKind::TypeChanged => self.type_changed,
            ChangeKind::DescriptionChanged => self.description_changed,
            ChangeKind::Unchanged => self.unchanged,
        }
    }

    /// Total classified codes, i.e. the size of the code union.
    pub fn total(&self) -> usize {
        self.added
            + self.removed
            + self.mdc_changed
            + self.type_changed
            + self.description_changed
            + self.unchanged
    }
}

/// Everything the presentation layer needs about one comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub old_version: String,
    pub new_version: String,
    /// Record totals of the two inputs.
    pub old_total: usize,
    pub new_total: usize,
    pub counts: ChangeCounts,
    pub changes: ChangeSet,
}

impl ComparisonReport {
    /// Classify `old` against `new` and aggregate the result.
    pub fn new(
        old_version: impl Into<String>,
        new_version: impl Into<String>,
        old: &RecordSet,
        new: &RecordSet,
    ) -> Self {
        let changes = classify(old, new);
        let counts = ChangeCounts::tally(&changes);
        Self {
            old_version: old_version.into(),
            new_version: new_version.into(),
            old_total: old.len(),
            new_total: new.len(),
            counts,
            changes,
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary of changes:")?;
        writeln!(f, "  Total DRGs in {}: {}", self.old_version, self.old_total)?;
        writeln!(f, "  Total DRGs in {}: {}", self.new_version, self.new_total)?;
        writeln!(f, "  New DRGs: {}", self.counts.added)?;
        writeln!(f, "  Removed DRGs: {}", self.counts.removed)?;
        writeln!(f, "  MDC changes: {}", self.counts.mdc_changed)?;
        writeln!(f, "  Type changes (Medical/Surgical): {}", self.counts.type_changed)?;
        writeln!(f, "  Description changes: {}", self.counts.description_changed)?;
        writeln!(f, "  Unchanged DRGs: {}", self.counts.unchanged)
    }
}
