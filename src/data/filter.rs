use super::model::TopicTable;

// ---------------------------------------------------------------------------
// Topic search
// ---------------------------------------------------------------------------

/// Return indices of rows whose topic matches the search query.
///
/// * Empty query → every row (identity)
/// * Otherwise → rows whose topic contains `query`, case-insensitively
/// * Rows with an empty topic never match a non-empty query
///
/// The returned index set is the filtered view the aggregations consume;
/// the table itself is never mutated.
pub fn matching_rows(table: &TopicTable, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..table.len()).collect();
    }

    let needle = query.to_lowercase();
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.topic.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
