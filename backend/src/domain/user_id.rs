//! Opaque user identifier keying balances, history and locks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must be a non-negative integer, got '{input}'")]
    NotNumeric { input: String },
}

/// Stable user identifier.
///
/// The ledger treats the value as opaque: it is only compared, hashed and
/// echoed back, never interpreted.
///
/// # Examples
/// ```
/// use point_ledger::domain::UserId;
///
/// let id: UserId = "42".parse().expect("numeric id");
/// assert_eq!(id, UserId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| UserIdValidationError::NotNumeric {
                input: s.to_owned(),
            })
    }
}
