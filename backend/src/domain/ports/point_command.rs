//! Driving port for balance mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, UserId, UserPoint};

/// Write-side use-cases exposed to inbound adapters.
///
/// Implementations must make every mutation for one user linearizable and
/// must reject invalid requests before touching any store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointCommand: Send + Sync {
    /// Add `amount` points, returning the persisted balance.
    async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error>;

    /// Spend `amount` points, returning the persisted balance.
    async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error>;
}

/// Fixture command applying every request to a fresh zero balance.
///
/// Validation still runs, so adapter tests see the same rejections as the
/// real service. Nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePointCommand;

#[async_trait]
impl PointCommand for FixturePointCommand {
    async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error> {
        Ok(UserPoint::empty(user_id, DateTime::<Utc>::UNIX_EPOCH).charge(amount)?)
    }

    async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error> {
        Ok(UserPoint::empty(user_id, DateTime::<Utc>::UNIX_EPOCH).use_points(amount)?)
    }
}
