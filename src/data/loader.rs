use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{TopicRecord, TopicTable};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Tagged load failure, rendered by the UI as an error banner.
/// `Clone` so a cached outcome can hand it out on every repaint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("the file '{0}' was not found")]
    FileNotFound(String),

    #[error("error decoding '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error("'{0}' has no 'topic' column")]
    ColumnMissing(String),

    #[error("an error occurred reading '{path}': {reason}")]
    Unknown { path: String, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a topic/year table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – records (`[{"topic": "NLP", "2019": 10}, ...]`) or
///   column-oriented (`{"topic": ["NLP"], "2019": [10]}`)
/// * `.csv`  – header `topic,<year>,<year>,...`, one row per topic
pub fn load_file(path: &Path) -> Result<TopicTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::Unknown {
            path: display(path),
            reason: format!("unsupported file extension: .{other}"),
        }),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Column names made entirely of ASCII digits are year columns;
/// everything else is excluded from aggregation by construction.
fn year_column(name: &str) -> Option<i32> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<TopicTable, LoadError> {
    let text = read_text(path)?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| LoadError::Decode {
            path: display(path),
            reason: e.to_string(),
        })?;

    match root {
        JsonValue::Array(records) => json_records(path, &records),
        JsonValue::Object(columns) => json_columns(path, &columns),
        _ => Err(LoadError::Decode {
            path: display(path),
            reason: "expected a top-level JSON array or object".into(),
        }),
    }
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound(display(path))
        } else {
            LoadError::Unknown {
                path: display(path),
                reason: e.to_string(),
            }
        }
    })
}

/// Records orientation, the default `df.to_json(orient='records')` shape.
fn json_records(path: &Path, records: &[JsonValue]) -> Result<TopicTable, LoadError> {
    let mut rows = Vec::with_capacity(records.len());
    let mut saw_topic_column = records.is_empty();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Decode {
            path: display(path),
            reason: format!("row {i} is not a JSON object"),
        })?;

        let topic = match obj.get("topic") {
            Some(JsonValue::String(s)) => {
                saw_topic_column = true;
                s.clone()
            }
            Some(JsonValue::Null) => {
                saw_topic_column = true;
                log::warn!("row {i}: null topic");
                String::new()
            }
            Some(other) => {
                return Err(LoadError::Decode {
                    path: display(path),
                    reason: format!("row {i}: 'topic' is not a string: {other}"),
                })
            }
            None => String::new(),
        };

        let mut counts = BTreeMap::new();
        for (key, val) in obj {
            let Some(year) = year_column(key) else {
                continue;
            };
            // null means the topic did not report this year.
            if val.is_null() {
                continue;
            }
            let count = json_count(val).ok_or_else(|| LoadError::Decode {
                path: display(path),
                reason: format!("row {i}, year {year}: '{val}' is not a non-negative integer"),
            })?;
            counts.insert(year, count);
        }

        rows.push(TopicRecord { topic, counts });
    }

    if !saw_topic_column {
        return Err(LoadError::ColumnMissing(display(path)));
    }
    Ok(TopicTable::from_records(rows))
}

/// Column orientation: one array per column, all the same length.
fn json_columns(
    path: &Path,
    columns: &serde_json::Map<String, JsonValue>,
) -> Result<TopicTable, LoadError> {
    let topic_col = columns
        .get("topic")
        .ok_or_else(|| LoadError::ColumnMissing(display(path)))?;
    let topics = topic_col.as_array().ok_or_else(|| LoadError::Decode {
        path: display(path),
        reason: "'topic' column is not an array".into(),
    })?;

    let mut year_cols: Vec<(i32, &Vec<JsonValue>)> = Vec::new();
    for (key, val) in columns {
        let Some(year) = year_column(key) else {
            continue;
        };
        let cells = val.as_array().ok_or_else(|| LoadError::Decode {
            path: display(path),
            reason: format!("column '{key}' is not an array"),
        })?;
        if cells.len() != topics.len() {
            return Err(LoadError::Decode {
                path: display(path),
                reason: format!(
                    "column '{key}' has {} values but 'topic' has {}",
                    cells.len(),
                    topics.len()
                ),
            });
        }
        year_cols.push((year, cells));
    }

    let mut rows = Vec::with_capacity(topics.len());
    for (i, cell) in topics.iter().enumerate() {
        let topic = match cell {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => String::new(),
            other => {
                return Err(LoadError::Decode {
                    path: display(path),
                    reason: format!("row {i}: 'topic' is not a string: {other}"),
                })
            }
        };

        let mut counts = BTreeMap::new();
        for &(year, cells) in &year_cols {
            let val = &cells[i];
            if val.is_null() {
                continue;
            }
            let count = json_count(val).ok_or_else(|| LoadError::Decode {
                path: display(path),
                reason: format!("row {i}, year {year}: '{val}' is not a non-negative integer"),
            })?;
            counts.insert(year, count);
        }
        rows.push(TopicRecord { topic, counts });
    }

    Ok(TopicTable::from_records(rows))
}

fn json_count(val: &JsonValue) -> Option<u64> {
    val.as_u64()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row `topic,2018,2019,...`; an empty cell means the
/// topic did not report that year.
fn load_csv(path: &Path) -> Result<TopicTable, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            LoadError::FileNotFound(display(path))
        }
        _ => LoadError::Unknown {
            path: display(path),
            reason: e.to_string(),
        },
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Decode {
            path: display(path),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let topic_idx = headers
        .iter()
        .position(|h| h == "topic")
        .ok_or_else(|| LoadError::ColumnMissing(display(path)))?;

    let year_cols: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| year_column(h).map(|y| (i, y)))
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Decode {
            path: display(path),
            reason: format!("row {row_no}: {e}"),
        })?;

        let topic = record.get(topic_idx).unwrap_or("").to_string();

        let mut counts = BTreeMap::new();
        for &(col_idx, year) in &year_cols {
            let cell = record.get(col_idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let count: u64 = cell.parse().map_err(|_| LoadError::Decode {
                path: display(path),
                reason: format!(
                    "row {row_no}, year {year}: '{cell}' is not a non-negative integer"
                ),
            })?;
            counts.insert(year, count);
        }

        rows.push(TopicRecord { topic, counts });
    }

    Ok(TopicTable::from_records(rows))
}

// ---------------------------------------------------------------------------
// DatasetCache – load once per path, hand out a shared snapshot
// ---------------------------------------------------------------------------

/// Outcome of a (possibly failed) load.  On failure the table is empty so
/// the rest of the app degrades to empty charts instead of crashing.
#[derive(Debug, Clone)]
pub struct CachedLoad {
    pub table: Arc<TopicTable>,
    pub error: Option<LoadError>,
}

/// Explicitly owned one-shot cache for the dataset file.
///
/// The file is read and parsed at most once per generation; `invalidate`
/// starts a new generation, `retarget` additionally switches files.  The
/// cached table is immutable and shared via `Arc`.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    generation: u64,
    slot: OnceLock<CachedLoad>,
}

impl DatasetCache {
    pub fn new(path: PathBuf) -> Self {
        DatasetCache {
            path,
            generation: 0,
            slot: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How many times the cache has been invalidated or retargeted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load on first call, then return the cached outcome.
    pub fn get(&self) -> &CachedLoad {
        self.slot.get_or_init(|| match load_file(&self.path) {
            Ok(table) => {
                log::info!(
                    "loaded {} topics, years {:?}",
                    table.len(),
                    table.year_bounds()
                );
                CachedLoad {
                    table: Arc::new(table),
                    error: None,
                }
            }
            Err(e) => {
                log::error!("failed to load '{}': {e}", self.path.display());
                CachedLoad {
                    table: Arc::new(TopicTable::default()),
                    error: Some(e),
                }
            }
        })
    }

    /// Drop the cached outcome; the next `get` re-reads the file.
    pub fn invalidate(&mut self) {
        self.slot = OnceLock::new();
        self.generation += 1;
    }

    /// Point the cache at a different file and drop the cached outcome.
    pub fn retarget(&mut self, path: PathBuf) {
        self.path = path;
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn records_json_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "topics.json",
            r#"[{"topic":"NLP","2019":10,"2020":20},{"topic":"Vision","2019":5,"2020":0}]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].topic, "NLP");
        assert_eq!(table.records[0].counts[&2019], 10);
        assert_eq!(table.records[1].counts[&2020], 0);
        assert_eq!(table.year_bounds(), Some((2019, 2020)));
    }

    #[test]
    fn columns_json_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "topics.json",
            r#"{"topic":["NLP","Vision"],"2019":[10,5],"2020":[20,0]}"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].topic, "Vision");
        assert_eq!(table.records[1].counts[&2019], 5);
    }

    #[test]
    fn csv_loads_with_absent_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "topics.csv", "topic,2019,2020\nNLP,10,20\nVision,5,\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.records[1].counts.get(&2020), None);
        assert_eq!(table.records[0].total(), 30);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_file(&path),
            Err(LoadError::FileNotFound(_))
        ));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "topics.json", "{not json");
        assert!(matches!(load_file(&path), Err(LoadError::Decode { .. })));
    }

    #[test]
    fn negative_count_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "topics.json", r#"[{"topic":"NLP","2019":-1}]"#);
        assert!(matches!(load_file(&path), Err(LoadError::Decode { .. })));
    }

    #[test]
    fn missing_topic_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "topics.json", r#"[{"2019":10},{"2019":5}]"#);
        assert!(matches!(
            load_file(&path),
            Err(LoadError::ColumnMissing(_))
        ));

        let csv = write_file(&dir, "topics.csv", "name,2019\nNLP,10\n");
        assert!(matches!(load_file(&csv), Err(LoadError::ColumnMissing(_))));
    }

    #[test]
    fn null_counts_and_extra_columns_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "topics.json",
            r#"[{"topic":"NLP","2019":null,"2020":20,"note":"ignored"}]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.records[0].counts.get(&2019), None);
        assert_eq!(table.records[0].counts[&2020], 20);
        assert_eq!(
            table.years.iter().copied().collect::<Vec<_>>(),
            [2019, 2020]
        );
    }

    #[test]
    fn cache_yields_empty_table_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new(dir.path().join("missing.json"));

        let outcome = cache.get();
        assert!(outcome.table.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::FileNotFound(_))));

        // Invalidation starts a new generation and re-reads the file.
        let path = write_file(&dir, "missing.json", r#"[{"topic":"NLP","2019":1}]"#);
        assert_eq!(cache.generation(), 0);
        cache.invalidate();
        assert_eq!(cache.generation(), 1);
        assert_eq!(cache.path(), path);
        let outcome = cache.get();
        assert!(outcome.error.is_none());
        assert_eq!(outcome.table.len(), 1);
    }
}
