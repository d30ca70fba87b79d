//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local balance and history tables with optional
//!   simulated latency.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
