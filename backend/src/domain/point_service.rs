//! Point ledger domain service.
//!
//! This module implements the driving ports for balances and history. Every
//! mutation for a user runs its read-modify-write cycle under that user's
//! [`KeyedLock`] entry, which makes per-user mutations linearizable while
//! leaving different users fully parallel.
//!
//! The history append runs after the lock is released. A crash between the
//! balance write and the append leaves a balance change without its audit
//! record; the two stores are never written atomically.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    PointCommand, PointHistoryRepository, PointHistoryRepositoryError, PointQuery,
    UserPointRepository, UserPointRepositoryError,
};
use crate::domain::{
    Error, KeyedLock, NewPointHistory, PointHistory, TraceId, TransactionType, UserId, UserPoint,
};

/// Point ledger service implementing the driving ports.
pub struct PointService<B, H> {
    points: Arc<B>,
    history: Arc<H>,
    locks: Arc<KeyedLock<UserId>>,
    clock: Arc<dyn Clock>,
}

impl<B, H> Clone for PointService<B, H> {
    fn clone(&self) -> Self {
        Self {
            points: Arc::clone(&self.points),
            history: Arc::clone(&self.history),
            locks: Arc::clone(&self.locks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, H> PointService<B, H> {
    /// Create a service with its own lock registry.
    pub fn new(points: Arc<B>, history: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self::with_locks(points, history, clock, Arc::new(KeyedLock::new()))
    }

    /// Create a service sharing an existing lock registry.
    ///
    /// Services that write the same balance store must share one registry,
    /// otherwise their mutations are not serialised against each other.
    pub fn with_locks(
        points: Arc<B>,
        history: Arc<H>,
        clock: Arc<dyn Clock>,
        locks: Arc<KeyedLock<UserId>>,
    ) -> Self {
        Self {
            points,
            history,
            locks,
            clock,
        }
    }
}

impl<B, H> PointService<B, H>
where
    B: UserPointRepository + 'static,
    H: PointHistoryRepository + 'static,
{
    fn map_point_error(error: UserPointRepositoryError) -> Error {
        match error {
            UserPointRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("point repository unavailable: {message}"))
            }
            UserPointRepositoryError::Query { message } => {
                Error::internal(format!("point repository error: {message}"))
            }
        }
    }

    fn map_history_error(error: PointHistoryRepositoryError) -> Error {
        match error {
            PointHistoryRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("history repository unavailable: {message}"))
            }
            PointHistoryRepositoryError::Query { message } => {
                Error::internal(format!("history repository error: {message}"))
            }
        }
    }

    async fn current_point(&self, user_id: UserId) -> Result<UserPoint, Error> {
        let stored = self
            .points
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_point_error)?;
        Ok(stored.unwrap_or_else(|| UserPoint::empty(user_id, self.clock.utc())))
    }

    /// Read, validate and persist the next balance. Callers hold the user's lock.
    async fn read_modify_write(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        amount: i64,
    ) -> Result<UserPoint, Error> {
        let current = self.current_point(user_id).await?;
        let next = match transaction_type {
            TransactionType::Charge => current.charge(amount),
            TransactionType::Use => current.use_points(amount),
        }
        .map_err(|err| {
            warn!(
                user_id = %user_id,
                transaction_type = %transaction_type,
                amount,
                point = current.point(),
                reason = err.code(),
                "point mutation rejected"
            );
            Error::from(err)
        })?;

        self.points
            .upsert(&next)
            .await
            .map_err(Self::map_point_error)
    }

    async fn mutate(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        amount: i64,
    ) -> Result<UserPoint, Error> {
        let persisted = self
            .locks
            .with_lock(&user_id, move || {
                self.read_modify_write(user_id, transaction_type, amount)
            })
            .await?;

        let entry = NewPointHistory {
            user_id,
            transaction_type,
            amount,
            recorded_at: persisted.updated_at(),
        };
        self.history
            .append(&entry)
            .await
            .map_err(Self::map_history_error)?;

        debug!(
            user_id = %user_id,
            transaction_type = %transaction_type,
            amount,
            point = persisted.point(),
            "point mutation applied"
        );
        Ok(persisted)
    }

    /// Run [`Self::mutate`] on its own task.
    ///
    /// Dropping the caller's future (for example when a client disconnects)
    /// does not cancel a spawned task, so a started mutation always runs to
    /// completion and the lock is never released mid-write.
    async fn mutate_detached(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        amount: i64,
    ) -> Result<UserPoint, Error> {
        let service = self.clone();
        let trace_id = TraceId::current();
        let task = tokio::spawn(TraceId::scope_if_present(trace_id, async move {
            service.mutate(user_id, transaction_type, amount).await
        }));

        task.await.map_err(|err| {
            error!(
                user_id = %user_id,
                transaction_type = %transaction_type,
                error = %err,
                "point mutation task aborted"
            );
            Error::internal("point mutation aborted")
        })?
    }
}

#[async_trait]
impl<B, H> PointQuery for PointService<B, H>
where
    B: UserPointRepository + 'static,
    H: PointHistoryRepository + 'static,
{
    async fn fetch_point(&self, user_id: UserId) -> Result<UserPoint, Error> {
        self.current_point(user_id).await
    }

    async fn fetch_history(&self, user_id: UserId) -> Result<Vec<PointHistory>, Error> {
        self.history
            .list_by_user_id(user_id)
            .await
            .map_err(Self::map_history_error)
    }
}

#[async_trait]
impl<B, H> PointCommand for PointService<B, H>
where
    B: UserPointRepository + 'static,
    H: PointHistoryRepository + 'static,
{
    async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error> {
        self.mutate_detached(user_id, TransactionType::Charge, amount)
            .await
    }

    async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserPoint, Error> {
        self.mutate_detached(user_id, TransactionType::Use, amount)
            .await
    }
}
