//! Driving port for balance and history reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, PointHistory, UserId, UserPoint};

/// Read-side use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointQuery: Send + Sync {
    /// Current balance, or the zero balance for unknown users.
    async fn fetch_point(&self, user_id: UserId) -> Result<UserPoint, Error>;

    /// Every history record for the user, in store order.
    async fn fetch_history(&self, user_id: UserId) -> Result<Vec<PointHistory>, Error>;
}

/// Fixture query returning an empty ledger for every user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePointQuery;

#[async_trait]
impl PointQuery for FixturePointQuery {
    async fn fetch_point(&self, user_id: UserId) -> Result<UserPoint, Error> {
        Ok(UserPoint::empty(user_id, DateTime::<Utc>::UNIX_EPOCH))
    }

    async fn fetch_history(&self, _user_id: UserId) -> Result<Vec<PointHistory>, Error> {
        Ok(Vec::new())
    }
}
