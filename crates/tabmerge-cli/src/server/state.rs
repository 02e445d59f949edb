//! Application state for the web server.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use tabmerge::{DataTable, TabMerge};

/// Merged tables kept for download before the oldest is dropped.
const MAX_STORED_RESULTS: usize = 16;

/// Merged tables awaiting download, oldest first.
#[derive(Default)]
pub struct ResultStore {
    tables: HashMap<String, Arc<DataTable>>,
    order: VecDeque<String>,
}

impl ResultStore {
    fn insert(&mut self, id: String, table: DataTable) {
        while self.order.len() >= MAX_STORED_RESULTS {
            if let Some(oldest) = self.order.pop_front() {
                self.tables.remove(&oldest);
            }
        }
        self.order.push_back(id.clone());
        self.tables.insert(id, Arc::new(table));
    }

    fn get(&self, id: &str) -> Option<Arc<DataTable>> {
        self.tables.get(id).cloned()
    }

    fn len(&self) -> usize {
        self.tables.len()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configured merger (schema, parser settings).
    pub merger: Arc<TabMerge>,
    /// Merged tables by result id.
    pub results: Arc<RwLock<ResultStore>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(merger: TabMerge) -> Self {
        Self {
            merger: Arc::new(merger),
            results: Arc::new(RwLock::new(ResultStore::default())),
        }
    }

    /// Keep a merged table and return the id to download it by.
    pub async fn store(&self, table: DataTable) -> String {
        let id: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(12)
            .collect();
        self.results.write().await.insert(id.clone(), table);
        id
    }

    /// Look up a stored table.
    pub async fn get(&self, id: &str) -> Option<Arc<DataTable>> {
        self.results.read().await.get(id)
    }

    /// Number of stored tables.
    pub async fn stored(&self) -> usize {
        self.results.read().await.len()
    }
}
