//! In-memory balance table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::RwLock;

use super::SimulatedLatency;
use crate::domain::ports::{UserPointRepository, UserPointRepositoryError};
use crate::domain::{UserId, UserPoint};

/// Process-local balance table keyed by user.
///
/// Each `upsert` stamps the snapshot with the injected clock's current time.
/// The table does not serialise read-modify-write cycles; callers hold the
/// user's lock for that.
pub struct InMemoryUserPointTable {
    rows: RwLock<HashMap<UserId, UserPoint>>,
    clock: Arc<dyn Clock>,
    latency: SimulatedLatency,
}

impl InMemoryUserPointTable {
    /// Create an empty table. `max_latency_ms` enables a random per-call delay.
    pub fn new(clock: Arc<dyn Clock>, max_latency_ms: Option<u64>) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            clock,
            latency: SimulatedLatency::new(max_latency_ms),
        }
    }

    /// Number of users with a stored balance.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no balance has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl UserPointRepository for InMemoryUserPointTable {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserPoint>, UserPointRepositoryError> {
        self.latency.pause().await;
        Ok(self.rows.read().await.get(&user_id).cloned())
    }

    async fn upsert(&self, point: &UserPoint) -> Result<UserPoint, UserPointRepositoryError> {
        self.latency.pause().await;
        let stored = point.stamped(self.clock.utc());
        self.rows
            .write()
            .await
            .insert(stored.user_id(), stored.clone());
        Ok(stored)
    }
}
