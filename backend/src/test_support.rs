//! Test utilities for the point ledger crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{KeyedLock, PointService, UserId};
use crate::outbound::memory::{InMemoryPointHistoryTable, InMemoryUserPointTable};

/// Manually advanced clock.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.lock_clock() += TimeDelta::milliseconds(millis);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Deterministic "now" used across fixtures.
pub fn fixed_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp"),
    }
}

/// Service wired to in-memory tables, plus handles on the tables.
pub struct InMemoryLedger {
    pub service: PointService<InMemoryUserPointTable, InMemoryPointHistoryTable>,
    pub points: Arc<InMemoryUserPointTable>,
    pub history: Arc<InMemoryPointHistoryTable>,
    pub locks: Arc<KeyedLock<UserId>>,
}

impl InMemoryLedger {
    /// Build a ledger on the system clock with no simulated latency.
    pub fn new() -> Self {
        Self::with_latency(None)
    }

    /// Build a ledger whose tables sleep up to `max_latency_ms` per call.
    pub fn with_latency(max_latency_ms: Option<u64>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(mockable::DefaultClock);
        let points = Arc::new(InMemoryUserPointTable::new(Arc::clone(&clock), max_latency_ms));
        let history = Arc::new(InMemoryPointHistoryTable::new(max_latency_ms));
        let locks = Arc::new(KeyedLock::new());
        let service = PointService::with_locks(
            Arc::clone(&points),
            Arc::clone(&history),
            clock,
            Arc::clone(&locks),
        );
        Self {
            service,
            points,
            history,
            locks,
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}
