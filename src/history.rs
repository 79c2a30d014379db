//! Recent search queries, newest first.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_HISTORY_ITEMS, RECENT_SEARCHES};
use crate::error::Result;
use crate::io_util::{read_json_or_default, write_json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryItem {
    pub query: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub results_count: usize,
}

#[derive(Debug, Clone)]
pub struct SearchHistory {
    items: Vec<SearchHistoryItem>,
    max_items: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_ITEMS)
    }
}

impl SearchHistory {
    pub fn with_capacity(max_items: usize) -> Self {
        SearchHistory {
            items: Vec::new(),
            max_items,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, max_items: usize) -> Result<Self> {
        let mut items: Vec<SearchHistoryItem> = read_json_or_default(path)?;
        items.truncate(max_items);
        Ok(SearchHistory { items, max_items })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(path, &self.items)
    }

    /// Record a query. Blank queries are ignored; repeating a query moves it
    /// to the front with the new count.
    pub fn add(&mut self, query: &str, results_count: usize) {
        self.add_at(query, results_count, Utc::now().timestamp_millis());
    }

    fn add_at(&mut self, query: &str, results_count: usize, timestamp: i64) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.items.retain(|item| item.query != query);
        self.items.insert(
            0,
            SearchHistoryItem {
                query: query.to_string(),
                timestamp,
                results_count,
            },
        );
        self.items.truncate(self.max_items);
    }

    pub fn remove(&mut self, query: &str) {
        self.items.retain(|item| item.query != query);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn recent(&self, limit: usize) -> &[SearchHistoryItem] {
        &self.items[..limit.min(self.items.len())]
    }

    pub fn recent_default(&self) -> &[SearchHistoryItem] {
        self.recent(RECENT_SEARCHES)
    }

    pub fn items(&self) -> &[SearchHistoryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
