//! Change classification between two versions of the DRG definition table.
//!
//! Every code present in either version lands in exactly one category. For
//! codes present in both, fields are compared in priority order (MDC, then
//! the medical/surgical pair, then the description) and the record is
//! classified by the most significant difference alone, even when several
//! fields changed at once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use drg_core::{DrgRecord, RecordSet};

/// The six change categories.
///
/// Declaration order is display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    MdcChanged,
    TypeChanged,
    DescriptionChanged,
    Unchanged,
}

impl core::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            ChangeKind::Added => "new",
            ChangeKind::Removed => "removed",
            ChangeKind::MdcChanged => "MDC changed",
            ChangeKind::TypeChanged => "type changed",
            ChangeKind::DescriptionChanged => "description changed",
            ChangeKind::Unchanged => "unchanged",
        };
        write!(f, "{label}")
    }
}

/// One classified DRG code with the record(s) behind the classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// Present only in the newer version.
    Added { code: String, new: DrgRecord },
    /// Present only in the older version.
    Removed { code: String, old: DrgRecord },
    /// MDC assignment differs. Takes precedence over every other
    /// difference.
    MdcChanged {
        code: String,
        old: DrgRecord,
        new: DrgRecord,
    },
    /// Same MDC, but the medical/surgical pair differs.
    TypeChanged {
        code: String,
        old: DrgRecord,
        new: DrgRecord,
    },
    /// Only the description differs.
    DescriptionChanged {
        code: String,
        old: DrgRecord,
        new: DrgRecord,
    },
    /// Identical in both versions.
    Unchanged { code: String, record: DrgRecord },
}

impl Change {
    pub fn code(&self) -> &str {
        match self {
            Change::Added { code, .. }
            | Change::Removed { code, .. }
            | Change::MdcChanged { code, .. }
            | Change::TypeChanged { code, .. }
            | Change::DescriptionChanged { code, .. }
            | Change::Unchanged { code, .. } => code,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Added { .. } => ChangeKind::Added,
            Change::Removed { .. } => ChangeKind::Removed,
            Change::MdcChanged { .. } => ChangeKind::MdcChanged,
            Change::TypeChanged { .. } => ChangeKind::TypeChanged,
            Change::DescriptionChanged { .. } => ChangeKind::DescriptionChanged,
            Change::Unchanged { .. } => ChangeKind::Unchanged,
        }
    }
}

/// The result of one comparison: every code from either version, classified
/// and in ascending code order. Produced once by [`classify`] and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn iter(&self) -> impl Iterator<Item = &Change> + '_ {
        self.changes.iter()
    }

    /// Entries of one category, still in code order.
    pub fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &Change> + '_ {
        self.changes.iter().filter(move |change| change.kind() == kind)
    }

    /// Number of classified codes, i.e. the size of the code union.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Compare two record sets and classify every DRG code present in either.
pub fn classify(old: &RecordSet, new: &RecordSet) -> ChangeSet {
    let codes: BTreeSet<&str> = old.codes().chain(new.codes()).collect();

    let mut changes = Vec::with_capacity(codes.len());
    for code in codes {
        let change = match (old.get(code), new.get(code)) {
            (None, Some(added)) => Change::Added {
                code: code.to_string(),
                new: added.clone(),
            },
            (Some(removed), None) => Change::Removed {
                code: code.to_string(),
                old: removed.clone(),
            },
            (Some(before), Some(after)) => classify_pair(code, before, after),
            (None, None) => unreachable!("code comes from the union of both sets"),
        };
        changes.push(change);
    }

    ChangeSet { changes }
}

/// Priority-ordered field comparison for codes present in both versions.
fn classify_pair(code: &str, old: &DrgRecord, new: &DrgRecord) -> Change {
    let code = code.to_string();
    if old.mdc != new.mdc {
        Change::MdcChanged {
            code,
            old: old.clone(),
            new: new.clone(),
        }
    } else if (old.is_medical, old.is_surgical) != (new.is_medical, new.is_surgical) {
        Change::TypeChanged {
            code,
            old: old.clone(),
            new: new.clone(),
        }
    } else if old.description != new.description {
        Change::DescriptionChanged {
            code,
            old: old.clone(),
            new: new.clone(),
        }
    } else {
        Change::Unchanged {
            code,
            record: new.clone(),
        }
    }
}
