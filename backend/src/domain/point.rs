//! User point balance value type.
//!
//! A [`UserPoint`] is an immutable snapshot of one user's balance. Every
//! mutation returns a new snapshot; the store stamps `updated_at` when the
//! snapshot is persisted, so the transformations here stay deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Error, UserId};

/// Upper bound on a balance, inclusive. Also caps a single use request.
pub const MAX_POINT: i64 = 1_000_000;

/// Validation failures raised while constructing or mutating a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PointValidationError {
    /// The balance would leave `0..=MAX_POINT`.
    #[error("balance {point} is outside the permitted range 0..={max}", max = MAX_POINT)]
    InvalidBalance { point: i64 },
    /// Charge amounts must be strictly positive.
    #[error("charge amount must be greater than zero, got {amount}")]
    InvalidChargeAmount { amount: i64 },
    /// Use amounts must be positive and at most `MAX_POINT`.
    #[error("use amount must be between 1 and {max}, got {amount}", max = MAX_POINT)]
    InvalidUseAmount { amount: i64 },
}

impl PointValidationError {
    /// Stable machine-readable identifier for adapters.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidBalance { .. } => "invalid_balance",
            Self::InvalidChargeAmount { .. } => "invalid_charge_amount",
            Self::InvalidUseAmount { .. } => "invalid_use_amount",
        }
    }
}

impl From<PointValidationError> for Error {
    fn from(value: PointValidationError) -> Self {
        let details = match value {
            PointValidationError::InvalidBalance { point } => json!({
                "code": value.code(),
                "point": point,
                "max": MAX_POINT,
            }),
            PointValidationError::InvalidChargeAmount { amount }
            | PointValidationError::InvalidUseAmount { amount } => json!({
                "code": value.code(),
                "amount": amount,
            }),
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Immutable balance snapshot for a single user.
///
/// ## Invariants
/// - `0 <= point <= MAX_POINT`; no instance outside that range can exist.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use point_ledger::domain::{UserId, UserPoint};
///
/// let empty = UserPoint::empty(UserId::new(1), Utc::now());
/// let charged = empty.charge(1_000).expect("within bounds");
/// let used = charged.use_points(400).expect("sufficient balance");
///
/// assert_eq!(used.point(), 600);
/// assert_eq!(empty.point(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserPointDto", into = "UserPointDto")]
pub struct UserPoint {
    user_id: UserId,
    point: i64,
    updated_at: DateTime<Utc>,
}

impl UserPoint {
    /// Validate and construct a balance snapshot.
    pub fn new(
        user_id: UserId,
        point: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, PointValidationError> {
        if !(0..=MAX_POINT).contains(&point) {
            return Err(PointValidationError::InvalidBalance { point });
        }
        Ok(Self {
            user_id,
            point,
            updated_at,
        })
    }

    /// The implicit balance of a user the store has never seen.
    pub fn empty(user_id: UserId, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            point: 0,
            updated_at,
        }
    }

    /// Owner of the balance.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current point total.
    pub fn point(&self) -> i64 {
        self.point
    }

    /// Timestamp assigned by the store on the last persisted mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of this snapshot stamped with a persistence time.
    ///
    /// Stores call this when writing; the balance itself is unchanged.
    pub fn stamped(&self, updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at,
            ..self.clone()
        }
    }

    /// Return a new snapshot with `amount` added.
    ///
    /// `updated_at` is carried over unchanged.
    pub fn charge(&self, amount: i64) -> Result<Self, PointValidationError> {
        if amount <= 0 {
            return Err(PointValidationError::InvalidChargeAmount { amount });
        }
        let next = self
            .point
            .checked_add(amount)
            .ok_or(PointValidationError::InvalidBalance { point: i64::MAX })?;
        Self::new(self.user_id, next, self.updated_at)
    }

    /// Return a new snapshot with `amount` removed.
    ///
    /// The per-request ceiling is checked before the balance, so an oversized
    /// request is reported as such even when the balance could never cover it.
    pub fn use_points(&self, amount: i64) -> Result<Self, PointValidationError> {
        if amount <= 0 || amount > MAX_POINT {
            return Err(PointValidationError::InvalidUseAmount { amount });
        }
        Self::new(self.user_id, self.point - amount, self.updated_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPointDto {
    user_id: UserId,
    point: i64,
    updated_at: DateTime<Utc>,
}

impl From<UserPoint> for UserPointDto {
    fn from(value: UserPoint) -> Self {
        Self {
            user_id: value.user_id,
            point: value.point,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<UserPointDto> for UserPoint {
    type Error = PointValidationError;

    fn try_from(value: UserPointDto) -> Result<Self, Self::Error> {
        Self::new(value.user_id, value.point, value.updated_at)
    }
}
