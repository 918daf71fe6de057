//! Normalized bank-statement line records (service-agnostic).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyId;

/// One normalized statement line, ready for import into the reconciliation
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    /// 1-based position within this call's batch, in fetch order.
    pub sequence: u32,
    /// Settlement instant, UTC.
    pub date: DateTime<Utc>,
    /// Display name: label and reference joined, or "/" when both are empty.
    pub name: String,
    /// Free-text reference as supplied by the remote service.
    pub payment_ref: String,
    /// Remote transaction id. Globally unique per remote transaction; the
    /// host keys its deduplication on this for idempotent re-import.
    pub unique_import_id: String,
    /// Signed amount in the journal currency.
    pub amount: Decimal,
    /// Set only when the line's currency differs from the journal currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<CurrencyId>,
    /// Signed amount in the line's own currency, paired with `currency_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_currency: Option<Decimal>,
}

/// The result of one provider call: ordered lines plus a slot for host-level
/// metadata (unused by providers, reserved for the host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementData {
    pub lines: Vec<StatementLine>,
    pub extra_values: serde_json::Map<String, serde_json::Value>,
}

impl StatementData {
    pub fn new(lines: Vec<StatementLine>) -> Self {
        Self {
            lines,
            extra_values: serde_json::Map::new(),
        }
    }
}
