// 🧾 Receipt Model
// Wire shape of a submitted receipt plus the scored record kept in the store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SUBMITTED RECEIPT
// ============================================================================

/// One purchased line. Owned by exactly one receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub short_description: String,

    /// Two-decimal amount kept as text, e.g. "6.49"
    pub price: String,
}

/// Receipt as submitted by a client.
///
/// Every field is text on the wire, including the numeric-looking ones.
/// Missing fields decode as empty values and are rejected by
/// [`crate::schema::validate`], so absent and empty are the same failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,

    /// Calendar date, `YYYY-MM-DD`
    pub purchase_date: String,

    /// 24-hour clock, `HH:MM`
    pub purchase_time: String,

    pub items: Vec<Item>,

    /// Two-decimal amount kept as text, e.g. "35.35"
    pub total: String,
}

impl Item {
    pub fn new(short_description: &str, price: &str) -> Self {
        Item {
            short_description: short_description.to_string(),
            price: price.to_string(),
        }
    }
}

impl Receipt {
    /// Decode a receipt from raw JSON bytes
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

// ============================================================================
// SCORED RECEIPT
// ============================================================================

/// An accepted receipt together with its points, addressed by `id`.
/// Created once on acceptance and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredReceipt {
    pub id: String,
    pub receipt: Receipt,
    pub points: u64,
    pub accepted_at: DateTime<Utc>,
}

#[cfg(test)]
pub(crate) fn sample_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            Item::new("Mountain Dew 12PK", "6.49"),
            Item::new("Emils Cheese Pizza", "12.25"),
            Item::new("Knorr Creamy Chicken", "1.26"),
            Item::new("Doritos Nacho Cheese", "3.35"),
            Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
