//! Comparison engine for MS-DRG definition versions: change classification,
//! description diff highlighting, and report aggregation.

pub mod classify;
pub mod highlight;
pub mod report;

pub use classify::{Change, ChangeKind, ChangeSet, classify};
pub use highlight::{MarkedSpan, MarkedText, highlight};
pub use report::{ChangeCounts, ComparisonReport};
