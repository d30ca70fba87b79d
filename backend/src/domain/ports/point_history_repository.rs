//! Port for the append-only point history.

use async_trait::async_trait;

use crate::domain::{NewPointHistory, PointHistory, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by history store adapters.
    pub enum PointHistoryRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "history repository connection failed: {message}",
        /// Insert or lookup failed during execution.
        Query { message: String } =>
            "history repository query failed: {message}",
    }
}

/// Port for appending and listing history records.
///
/// Records are immutable once appended; the trait deliberately offers no
/// update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointHistoryRepository: Send + Sync {
    /// Append a record, returning it with its store-assigned identifier.
    async fn append(
        &self,
        entry: &NewPointHistory,
    ) -> Result<PointHistory, PointHistoryRepositoryError>;

    /// List every record for a user in store order.
    async fn list_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PointHistory>, PointHistoryRepositoryError>;
}
