//! Port for balance persistence.
//!
//! The [`UserPointRepository`] trait is the balance store the ledger reads
//! from and writes to. It is a plain key-value contract: serialising
//! concurrent read-modify-write cycles is the ledger's job, not the store's.

use async_trait::async_trait;

use crate::domain::{UserId, UserPoint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by balance store adapters.
    pub enum UserPointRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "point repository connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "point repository query failed: {message}",
    }
}

/// Port for balance storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPointRepository: Send + Sync {
    /// Fetch the stored balance for a user.
    ///
    /// Returns `None` for users the store has never written. Callers treat
    /// that as a zero balance.
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserPoint>, UserPointRepositoryError>;

    /// Insert or replace the balance for `point.user_id()`.
    ///
    /// The store assigns `updated_at`; the returned snapshot is the one that
    /// was persisted and carries the new timestamp.
    async fn upsert(&self, point: &UserPoint) -> Result<UserPoint, UserPointRepositoryError>;
}
