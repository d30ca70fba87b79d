//! Append-only audit records of point transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Kind of balance mutation recorded in the history.
///
/// # Examples
///
/// ```
/// # use point_ledger::domain::TransactionType;
/// assert_eq!(TransactionType::Charge.as_str(), "CHARGE");
/// assert_eq!(TransactionType::Use.to_string(), "USE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Points were added.
    Charge,
    /// Points were spent.
    Use,
}

impl TransactionType {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "CHARGE",
            Self::Use => "USE",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to append one history record.
///
/// Built only by the ledger service after a successful balance mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointHistory {
    pub user_id: UserId,
    pub transaction_type: TransactionType,
    /// Requested delta, always positive.
    pub amount: i64,
    /// Copied from the persisted balance's `updated_at`.
    pub recorded_at: DateTime<Utc>,
}

/// Stored history record. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointHistory {
    /// Identifier assigned by the history store.
    pub id: u64,
    pub user_id: UserId,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub recorded_at: DateTime<Utc>,
}

impl PointHistory {
    /// Materialise a stored record from an append request.
    pub fn from_new(id: u64, entry: NewPointHistory) -> Self {
        let NewPointHistory {
            user_id,
            transaction_type,
            amount,
            recorded_at,
        } = entry;
        Self {
            id,
            user_id,
            transaction_type,
            amount,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn from_new_keeps_every_field() {
        let at = Utc
            .with_ymd_and_hms(2026, 10, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let entry = NewPointHistory {
            user_id: UserId::new(8),
            transaction_type: TransactionType::Use,
            amount: 120,
            recorded_at: at,
        };

        let record = PointHistory::from_new(3, entry);

        assert_eq!(record.id, 3);
        assert_eq!(record.user_id, UserId::new(8));
        assert_eq!(record.transaction_type, TransactionType::Use);
        assert_eq!(record.amount, 120);
        assert_eq!(record.recorded_at, at);
    }

    #[rstest]
    fn serialises_with_wire_type_names() {
        let record = PointHistory {
            id: 1,
            user_id: UserId::new(2),
            transaction_type: TransactionType::Charge,
            amount: 50,
            recorded_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&record).expect("serialises");

        assert_eq!(value["transactionType"], json!("CHARGE"));
        assert_eq!(value["userId"], json!(2));
    }
}
