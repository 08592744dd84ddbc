use std::collections::BTreeMap;

use super::model::TopicTable;

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// Inclusive year interval for the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        YearRange { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

// ---------------------------------------------------------------------------
// Aggregations over a filtered row view
// ---------------------------------------------------------------------------
//
// All of these take the table plus the row indices the caller wants to see
// (the output of `filter::matching_rows`), sum in exact integer arithmetic,
// and return empty results for an empty view.

/// Total papers per topic, ordered pairs in row order.
///
/// Duplicate topic names stay independent entries; merging is never done
/// here, the table builder only warns about them.
pub fn totals_by_topic(table: &TopicTable, rows: &[usize]) -> Vec<(String, u64)> {
    rows.iter()
        .map(|&i| {
            let r = &table.records[i];
            (r.topic.clone(), r.total())
        })
        .collect()
}

/// Total papers per year across the selected rows, ascending by year.
/// Only years reported by at least one selected row appear.
pub fn totals_by_year(table: &TopicTable, rows: &[usize]) -> Vec<(i32, u64)> {
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();
    for &i in rows {
        for (&year, &count) in &table.records[i].counts {
            *totals.entry(year).or_insert(0) += count;
        }
    }
    totals.into_iter().collect()
}

/// Grand total of papers across the selected rows.
pub fn grand_total(table: &TopicTable, rows: &[usize]) -> u64 {
    rows.iter().map(|&i| table.records[i].total()).sum()
}

/// The (year, count) series for one topic, restricted to `range` and sorted
/// ascending by year.  Years the topic never reported are omitted, not
/// zeroed.
///
/// The match is exact, not substring.  An unknown topic yields an empty
/// series; if duplicates slipped into the source the first row wins and the
/// rest are warned about, never merged.
pub fn series_for_topic(table: &TopicTable, topic: &str, range: YearRange) -> Vec<(i32, u64)> {
    let mut matches = table.records.iter().filter(|r| r.topic == topic);

    let Some(row) = matches.next() else {
        return Vec::new();
    };
    if matches.next().is_some() {
        log::warn!("topic '{topic}' appears more than once; using the first row");
    }

    row.counts
        .iter()
        .filter(|(&year, _)| range.contains(year))
        .map(|(&year, &count)| (year, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{TopicRecord, TopicTable};

    fn record(topic: &str, counts: &[(i32, u64)]) -> TopicRecord {
        TopicRecord {
            topic: topic.to_string(),
            counts: counts.iter().copied().collect(),
        }
    }

    fn scenario() -> TopicTable {
        TopicTable::from_records(vec![
            record("NLP", &[(2019, 10), (2020, 20)]),
            record("Vision", &[(2019, 5), (2020, 0)]),
        ])
    }

    fn all_rows(table: &TopicTable) -> Vec<usize> {
        (0..table.len()).collect()
    }

    #[test]
    fn scenario_totals() {
        let t = scenario();
        let rows = all_rows(&t);

        assert_eq!(
            totals_by_topic(&t, &rows),
            vec![("NLP".to_string(), 30), ("Vision".to_string(), 5)]
        );
        assert_eq!(totals_by_year(&t, &rows), vec![(2019, 15), (2020, 20)]);
        assert_eq!(
            series_for_topic(&t, "NLP", YearRange::new(2019, 2020)),
            vec![(2019, 10), (2020, 20)]
        );
    }

    #[test]
    fn topic_totals_sum_to_grand_total() {
        let t = TopicTable::from_records(vec![
            record("A", &[(2018, 1), (2019, 2)]),
            record("B", &[(2018, 4)]),
            record("C", &[(2020, 8), (2021, 16)]),
        ]);
        let rows = all_rows(&t);

        let by_topic: u64 = totals_by_topic(&t, &rows).iter().map(|(_, n)| n).sum();
        let by_year: u64 = totals_by_year(&t, &rows).iter().map(|(_, n)| n).sum();
        assert_eq!(by_topic, grand_total(&t, &rows));
        assert_eq!(by_year, grand_total(&t, &rows));
    }

    #[test]
    fn series_respects_inclusive_range_and_order() {
        let t = TopicTable::from_records(vec![record(
            "NLP",
            &[(2017, 1), (2018, 2), (2019, 3), (2020, 4), (2021, 5)],
        )]);

        let series = series_for_topic(&t, "NLP", YearRange::new(2018, 2020));
        assert_eq!(series, vec![(2018, 2), (2019, 3), (2020, 4)]);
        assert!(series.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn series_match_is_exact_not_substring() {
        let t = TopicTable::from_records(vec![record("Computer Vision", &[(2019, 5)])]);
        assert!(series_for_topic(&t, "Vision", YearRange::new(2000, 2030)).is_empty());
    }

    #[test]
    fn unknown_topic_yields_empty_series() {
        let t = scenario();
        assert!(series_for_topic(&t, "Robotics", YearRange::new(2019, 2020)).is_empty());
    }

    #[test]
    fn duplicate_topics_stay_independent_in_totals() {
        let t = TopicTable::from_records(vec![
            record("NLP", &[(2019, 1)]),
            record("NLP", &[(2019, 2)]),
        ]);
        let rows = all_rows(&t);

        assert_eq!(
            totals_by_topic(&t, &rows),
            vec![("NLP".to_string(), 1), ("NLP".to_string(), 2)]
        );
        // The detail series uses the first row only.
        assert_eq!(
            series_for_topic(&t, "NLP", YearRange::new(2019, 2019)),
            vec![(2019, 1)]
        );
    }

    #[test]
    fn empty_view_yields_empty_results() {
        let t = scenario();
        assert!(totals_by_topic(&t, &[]).is_empty());
        assert!(totals_by_year(&t, &[]).is_empty());
        assert_eq!(grand_total(&t, &[]), 0);

        let empty = TopicTable::default();
        assert!(totals_by_year(&empty, &[]).is_empty());
    }

    #[test]
    fn yearly_totals_only_cover_selected_rows() {
        let t = scenario();
        // Only the Vision row selected.
        assert_eq!(totals_by_year(&t, &[1]), vec![(2019, 5), (2020, 0)]);
    }
}
