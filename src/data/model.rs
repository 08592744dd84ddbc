use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// TopicRecord – one row of the wide table
// ---------------------------------------------------------------------------

/// One topic row: a display name plus its per-year paper counts.
///
/// The source table is wide (one column per year); a year absent from
/// `counts` was absent in the source, which is not the same as a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    /// Topic display name. Empty when the source row had a null topic;
    /// such rows never match a search but still participate in aggregates.
    pub topic: String,
    /// year → paper count, ordered ascending by year.
    pub counts: BTreeMap<i32, u64>,
}

impl TopicRecord {
    /// Sum of this topic's counts across all years it reports.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

// ---------------------------------------------------------------------------
// TopicTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with a pre-computed year index.
#[derive(Debug, Clone, Default)]
pub struct TopicTable {
    /// All topic rows, in source order.
    pub records: Vec<TopicRecord>,
    /// Union of all years reported by any topic, sorted.
    pub years: BTreeSet<i32>,
}

impl TopicTable {
    /// Build the year index from the loaded records.
    ///
    /// Duplicate topic names are kept as independent rows; downstream
    /// aggregation never merges them, so they are only warned about here.
    pub fn from_records(records: Vec<TopicRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();

        for rec in &records {
            years.extend(rec.counts.keys().copied());
            if !rec.topic.is_empty() && !seen.insert(rec.topic.as_str()) {
                log::warn!("duplicate topic '{}' in dataset", rec.topic);
            }
        }

        TopicTable { records, years }
    }

    /// Number of topic rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct topic names in source order, for the selection control.
    pub fn topics(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.topic.as_str())
            .filter(|t| !t.is_empty() && seen.insert(*t))
            .collect()
    }

    /// Smallest and largest year present, for range-control bounds.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }
}
