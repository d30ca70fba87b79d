//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixturePointCommand, FixturePointQuery, PointCommand, PointQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub points: Arc<dyn PointCommand>,
    pub points_query: Arc<dyn PointQuery>,
}

impl HttpState {
    /// Construct state from the ledger ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use point_ledger::domain::ports::{FixturePointCommand, FixturePointQuery};
    /// use point_ledger::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixturePointCommand), Arc::new(FixturePointQuery));
    /// let _query = state.points_query.clone();
    /// ```
    pub fn new(points: Arc<dyn PointCommand>, points_query: Arc<dyn PointQuery>) -> Self {
        Self {
            points,
            points_query,
        }
    }

    /// Construct state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: PointCommand + PointQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixturePointCommand), Arc::new(FixturePointQuery))
    }
}
