//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserPointRepository`], [`PointHistoryRepository`]) are
//! implemented by outbound adapters. Driving ports ([`PointQuery`],
//! [`PointCommand`]) are implemented by domain services and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod point_command;
mod point_history_repository;
mod point_query;
mod user_point_repository;

#[cfg(test)]
pub use point_command::MockPointCommand;
pub use point_command::{FixturePointCommand, PointCommand};
#[cfg(test)]
pub use point_history_repository::MockPointHistoryRepository;
pub use point_history_repository::{PointHistoryRepository, PointHistoryRepositoryError};
#[cfg(test)]
pub use point_query::MockPointQuery;
pub use point_query::{FixturePointQuery, PointQuery};
#[cfg(test)]
pub use user_point_repository::MockUserPointRepository;
pub use user_point_repository::{UserPointRepository, UserPointRepositoryError};
