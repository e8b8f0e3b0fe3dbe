use std::time::{Duration, Instant};

use dashboard_core::StockRecord;

use crate::group::group_results;
use crate::index::{SearchIndex, SearchResult};

/// Idle time after the last keystroke before a search runs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);

/// One rendered row of the result list. Label rows are not selectable.
#[derive(Debug, Clone)]
pub enum Row {
    Label(String),
    Result(SearchResult),
}

/// What a key event asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    None,
    /// Navigate to `/asset/{symbol}`.
    Navigate(String),
}

/// State machine behind the search box: query edits arm a debounce
/// deadline, `poll` runs the search at most once per idle window, and the
/// keyboard contract cycles a highlight over the selectable rows.
pub struct SearchPanel {
    index: SearchIndex,
    query: String,
    rows: Vec<Row>,
    visible: bool,
    /// Position within the selectable (non-label) rows.
    highlighted: Option<usize>,
    pending: Option<Instant>,
}

impl SearchPanel {
    pub fn new(index: SearchIndex) -> Self {
        Self {
            index,
            query: String::new(),
            rows: Vec::new(),
            visible: false,
            highlighted: None,
            pending: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn record(&self, result: &SearchResult) -> Option<&StockRecord> {
        self.index.record(result.record)
    }

    /// Row index currently highlighted, if any.
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted
            .and_then(|pos| self.selectable_rows().get(pos).copied())
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.arm(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.query.pop();
        self.arm(now);
    }

    pub fn set_query(&mut self, query: &str, now: Instant) {
        self.query = query.to_string();
        self.arm(now);
    }

    /// Each edit replaces the pending deadline, so at most one search runs
    /// per idle window.
    fn arm(&mut self, now: Instant) {
        self.pending = Some(now + SEARCH_DEBOUNCE);
    }

    /// Run the search if the debounce deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if matches!(self.pending, Some(deadline) if deadline <= now) {
            self.pending = None;
            self.perform_search();
        }
    }

    fn perform_search(&mut self) {
        self.highlighted = None;
        let query = self.query.trim();
        if query.is_empty() {
            self.rows.clear();
            self.visible = false;
            return;
        }

        let results = self.index.search(query);
        self.rows.clear();
        if results.is_empty() {
            self.rows.push(Row::Label("No matches found".to_string()));
        } else {
            self.rows.push(Row::Label("Search Results".to_string()));
            let grouped = group_results(results);
            for (bucket, bucket_results) in grouped.buckets() {
                // The first bucket sits directly under the heading; later
                // buckets get their own separator label.
                if self.rows.len() > 1 {
                    self.rows.push(Row::Label(bucket.label().to_string()));
                }
                for result in bucket_results {
                    self.rows.push(Row::Result(result.clone()));
                }
            }
        }
        self.visible = true;
    }

    fn selectable_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| matches!(row, Row::Result(_)).then_some(i))
            .collect()
    }

    /// Down arrow: advance the highlight, wrapping past the end.
    pub fn key_down(&mut self) {
        let count = self.selectable_rows().len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(pos) => (pos + 1) % count,
            None => 0,
        });
    }

    /// Up arrow: move the highlight back, wrapping to the last row.
    pub fn key_up(&mut self) {
        let count = self.selectable_rows().len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(pos) => (pos + count - 1) % count,
            None => count - 1,
        });
    }

    /// Enter: navigate to the highlighted row's symbol, or fall back to
    /// the raw query treated as a symbol.
    pub fn enter(&mut self) -> PanelAction {
        if let Some(row) = self.highlighted_row() {
            if let Row::Result(result) = &self.rows[row] {
                if let Some(record) = self.index.record(result.record) {
                    let symbol = record.symbol.clone();
                    self.select(&symbol);
                    return PanelAction::Navigate(symbol);
                }
            }
        }
        let query = self.query.trim();
        if !query.is_empty() {
            let symbol = query.to_uppercase();
            self.select(&symbol);
            return PanelAction::Navigate(symbol);
        }
        PanelAction::None
    }

    fn select(&mut self, symbol: &str) {
        self.query = symbol.to_string();
        self.visible = false;
        self.highlighted = None;
        self.pending = None;
    }

    /// Escape: drop results and highlight, hide the panel.
    pub fn escape(&mut self) {
        self.rows.clear();
        self.visible = false;
        self.highlighted = None;
        self.pending = None;
    }
}
