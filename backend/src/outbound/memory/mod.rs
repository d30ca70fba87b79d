//! In-memory tables backing the balance and history ports.
//!
//! Both tables can inject a random per-call delay so concurrency behaviour
//! can be exercised against something slower than a hash map.

mod latency;
mod point_history_table;
mod user_point_table;

pub use latency::SimulatedLatency;
pub use point_history_table::InMemoryPointHistoryTable;
pub use user_point_table::InMemoryUserPointTable;
