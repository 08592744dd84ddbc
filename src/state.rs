use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::matching_rows;
use crate::data::loader::DatasetCache;
use crate::data::model::TopicTable;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    DetailedView,
    About,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::DetailedView, Page::About];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DetailedView => "Detailed View",
            Page::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// One-shot loader cache for the dataset file.
    pub cache: DatasetCache,

    /// Snapshot of the loaded table (empty when the load failed).
    pub table: Arc<TopicTable>,

    /// Active page.
    pub page: Page,

    /// Sidebar search query.
    pub search: String,

    /// Indices of rows matching the current search (cached).
    pub visible_rows: Vec<usize>,

    /// Topic shown on the detail page.
    pub selected_topic: Option<String>,

    /// Detail-page year range, inclusive on both ends.
    pub year_min: i32,
    pub year_max: i32,

    /// Per-topic bar colours.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Set up state for the given dataset path and perform the initial load.
    pub fn new(path: PathBuf) -> Self {
        let mut state = AppState {
            cache: DatasetCache::new(path),
            table: Arc::new(TopicTable::default()),
            page: Page::Home,
            search: String::new(),
            visible_rows: Vec::new(),
            selected_topic: None,
            year_min: 0,
            year_max: 0,
            color_map: ColorMap::default(),
            status_message: None,
        };
        state.refresh_from_cache();
        state
    }

    /// Pull the (possibly re-loaded) table out of the cache and rebuild
    /// everything derived from it.
    pub fn refresh_from_cache(&mut self) {
        let outcome = self.cache.get().clone();
        self.table = outcome.table;
        self.status_message = outcome.error.map(|e| e.to_string());

        self.color_map = ColorMap::new(self.table.topics());
        self.selected_topic = self.table.topics().first().map(|t| t.to_string());
        if let Some((min, max)) = self.table.year_bounds() {
            self.year_min = min;
            self.year_max = max;
        } else {
            self.year_min = 0;
            self.year_max = 0;
        }
        self.refilter();
    }

    /// Re-read the current file on the next access.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.refresh_from_cache();
    }

    /// Switch to a different dataset file.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.retarget(path);
        self.refresh_from_cache();
    }

    /// Recompute `visible_rows` after a search change.
    pub fn refilter(&mut self) {
        self.visible_rows = matching_rows(&self.table, self.search.trim());
    }

    /// Clamp the detail-page range back to validity after a slider move.
    pub fn clamp_year_range(&mut self) {
        if self.year_min > self.year_max {
            std::mem::swap(&mut self.year_min, &mut self.year_max);
        }
        if let Some((min, max)) = self.table.year_bounds() {
            self.year_min = self.year_min.clamp(min, max);
            self.year_max = self.year_max.clamp(min, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn state_for(content: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, AppState::new(path))
    }

    #[test]
    fn initial_load_populates_derived_state() {
        let (_dir, state) = state_for(
            r#"[{"topic":"NLP","2019":10,"2020":20},{"topic":"Vision","2018":5}]"#,
        );

        assert_eq!(state.table.len(), 2);
        assert_eq!(state.visible_rows, vec![0, 1]);
        assert_eq!(state.selected_topic.as_deref(), Some("NLP"));
        assert_eq!((state.year_min, state.year_max), (2018, 2020));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_load_degrades_to_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("missing.json"));

        assert!(state.table.is_empty());
        assert!(state.visible_rows.is_empty());
        assert!(state.selected_topic.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn search_updates_visible_rows() {
        let (_dir, mut state) = state_for(
            r#"[{"topic":"NLP","2019":10},{"topic":"Computer Vision","2019":5}]"#,
        );

        state.search = "vision".to_string();
        state.refilter();
        assert_eq!(state.visible_rows, vec![1]);

        state.search.clear();
        state.refilter();
        assert_eq!(state.visible_rows, vec![0, 1]);
    }

    #[test]
    fn year_range_clamps_to_bounds() {
        let (_dir, mut state) =
            state_for(r#"[{"topic":"NLP","2018":1,"2019":2,"2020":3}]"#);

        state.year_min = 2025;
        state.year_max = 2019;
        state.clamp_year_range();
        assert_eq!((state.year_min, state.year_max), (2019, 2020));
    }
}
