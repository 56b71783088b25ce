//! DRG definition records and the per-version record set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One MS-DRG definition as listed in Appendix A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrgRecord {
    /// Major Diagnostic Category: `01`..`25`, `PRE`, or `--` when unassigned.
    pub mdc: String,
    pub is_medical: bool,
    pub is_surgical: bool,
    /// DRG title with runs of whitespace collapsed to single spaces.
    pub description: String,
}

impl DrgRecord {
    /// Label for the medical/surgical flag pair.
    ///
    /// DRGs that are neither (the invalid/ungroupable codes) read as
    /// `Other`.
    pub fn type_label(&self) -> &'static str {
        if self.is_medical {
            "Medical"
        } else if self.is_surgical {
            "Surgical"
        } else {
            "Other"
        }
    }
}

/// All DRG definitions of one dataset version, keyed by DRG code.
///
/// Codes keep their source spelling (zero padding included) and iterate in
/// ascending order, so anything derived from a set is reproducible run to
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: BTreeMap<String, DrgRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record under the same code.
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, code: impl Into<String>, record: DrgRecord) -> Option<DrgRecord> {
        self.records.insert(code.into(), record)
    }

    pub fn get(&self, code: &str) -> Option<&DrgRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// DRG codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// `(code, record)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DrgRecord)> + '_ {
        self.records.iter().map(|(code, record)| (code.as_str(), record))
    }
}

impl<C: Into<String>> FromIterator<(C, DrgRecord)> for RecordSet {
    fn from_iter<I: IntoIterator<Item = (C, DrgRecord)>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for (code, record) in iter {
            set.insert(code, record);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mdc: &str, is_medical: bool, is_surgical: bool, description: &str) -> DrgRecord {
        DrgRecord {
            mdc: mdc.to_string(),
            is_medical,
            is_surgical,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_type_label_covers_all_flag_pairs() {
        assert_eq!(record("01", true, false, "X").type_label(), "Medical");
        assert_eq!(record("01", false, true, "X").type_label(), "Surgical");
        assert_eq!(record("--", false, false, "X").type_label(), "Other");
    }

    #[test]
    fn test_codes_iterate_in_ascending_order() {
        let set: RecordSet = [
            ("470", record("08", false, true, "HIP REPLACEMENT")),
            ("001", record("PRE", false, true, "HEART TRANSPLANT")),
            ("103", record("01", true, false, "HEADACHES")),
        ]
        .into_iter()
        .collect();

        let codes: Vec<&str> = set.codes().collect();
        assert_eq!(codes, vec!["001", "103", "470"]);
    }

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let mut set = RecordSet::new();
        assert!(set.insert("064", record("01", true, false, "OLD TITLE")).is_none());

        let previous = set.insert("064", record("01", true, false, "NEW TITLE"));
        assert_eq!(previous.unwrap().description, "OLD TITLE");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("064").unwrap().description, "NEW TITLE");
    }

    #[test]
    fn test_zero_padded_codes_are_distinct_keys() {
        let mut set = RecordSet::new();
        set.insert("64", record("01", true, false, "A"));
        set.insert("064", record("01", true, false, "B"));
        assert_eq!(set.len(), 2);
        assert!(set.contains("64"));
        assert!(set.contains("064"));
    }
}
