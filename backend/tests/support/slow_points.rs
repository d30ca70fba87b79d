//! Balance store double with fixed per-user read delays.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use point_ledger::domain::ports::{UserPointRepository, UserPointRepositoryError};
use point_ledger::domain::{PointService, UserId, UserPoint};
use point_ledger::outbound::memory::{InMemoryPointHistoryTable, InMemoryUserPointTable};

/// Wraps the in-memory table and sleeps before reading selected users.
///
/// The delay lands inside the service's critical section, which makes lock
/// hold times deterministic.
pub struct SlowPoints {
    inner: InMemoryUserPointTable,
    delays: HashMap<UserId, Duration>,
}

impl SlowPoints {
    pub fn new(delays: impl IntoIterator<Item = (UserId, Duration)>) -> Self {
        Self {
            inner: InMemoryUserPointTable::new(Arc::new(DefaultClock), None),
            delays: delays.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserPointRepository for SlowPoints {
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserPoint>, UserPointRepositoryError> {
        if let Some(delay) = self.delays.get(&user_id) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.find_by_user_id(user_id).await
    }

    async fn upsert(&self, point: &UserPoint) -> Result<UserPoint, UserPointRepositoryError> {
        self.inner.upsert(point).await
    }
}

pub type SlowLedger = PointService<SlowPoints, InMemoryPointHistoryTable>;

/// Build a service over [`SlowPoints`], returning the history table handle.
pub fn slow_ledger(
    delays: impl IntoIterator<Item = (UserId, Duration)>,
) -> (SlowLedger, Arc<InMemoryPointHistoryTable>) {
    let history = Arc::new(InMemoryPointHistoryTable::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = PointService::new(
        Arc::new(SlowPoints::new(delays)),
        Arc::clone(&history),
        clock,
    );
    (service, history)
}
