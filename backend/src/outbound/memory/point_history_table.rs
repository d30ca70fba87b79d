//! In-memory append-only history table.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SimulatedLatency;
use crate::domain::ports::{PointHistoryRepository, PointHistoryRepositoryError};
use crate::domain::{NewPointHistory, PointHistory, UserId};

#[derive(Debug)]
struct HistoryRows {
    next_id: u64,
    rows: Vec<PointHistory>,
}

/// Process-local history table.
///
/// Identifiers start at 1 and increase by one per append, across all users.
/// Listing returns a user's records in append order.
pub struct InMemoryPointHistoryTable {
    state: Mutex<HistoryRows>,
    latency: SimulatedLatency,
}

impl InMemoryPointHistoryTable {
    /// Create an empty table. `max_latency_ms` enables a random per-call delay.
    pub fn new(max_latency_ms: Option<u64>) -> Self {
        Self {
            state: Mutex::new(HistoryRows {
                next_id: 1,
                rows: Vec::new(),
            }),
            latency: SimulatedLatency::new(max_latency_ms),
        }
    }

    /// Total number of records across all users.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// Whether no record has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.rows.is_empty()
    }
}

impl Default for InMemoryPointHistoryTable {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl PointHistoryRepository for InMemoryPointHistoryTable {
    async fn append(
        &self,
        entry: &NewPointHistory,
    ) -> Result<PointHistory, PointHistoryRepositoryError> {
        self.latency.pause().await;
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        let record = PointHistory::from_new(id, entry.clone());
        state.rows.push(record.clone());
        Ok(record)
    }

    async fn list_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PointHistory>, PointHistoryRepositoryError> {
        self.latency.pause().await;
        let state = self.state.lock().await;
        Ok(state
            .rows
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}
