//! Raw JSON shapes of the Qonto thirdparty API (v2).

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /organizations/{id}` response.
#[derive(Debug, Deserialize)]
pub struct OrganizationResponse {
    pub organization: Organization,
}

#[derive(Debug, Default, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
}

/// Accounts without both an IBAN and a slug are unusable for lookups and get
/// skipped silently.
#[derive(Debug, Deserialize)]
pub struct BankAccount {
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// One page of `GET /transactions`.
#[derive(Debug, Deserialize)]
pub struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<QontoTransaction>,
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub total_pages: u32,
}

/// A settled transaction as Qonto reports it. Amounts are positive; `side`
/// carries the direction.
#[derive(Debug, Clone, Deserialize)]
pub struct QontoTransaction {
    pub transaction_id: String,
    /// UTC timestamp with fractional seconds, e.g. "2023-05-01T10:00:00.000Z".
    pub settled_at: String,
    /// "credit" or "debit".
    pub side: String,
    /// Magnitude in the account's journal currency.
    pub amount: Decimal,
    /// Mandatory per the API contract, but kept optional at the wire level:
    /// its absence is a data-integrity error raised at mapping time.
    #[serde(default)]
    pub local_currency: Option<String>,
    /// Magnitude in `local_currency`. Required: a payload without it is
    /// undecodable rather than defaulted, so a foreign-currency line can
    /// never come out as zero.
    pub local_amount: Decimal,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_requires_local_amount() {
        let err = serde_json::from_value::<QontoTransaction>(serde_json::json!({
            "transaction_id": "t1",
            "settled_at": "2023-05-01T10:00:00.000Z",
            "side": "credit",
            "amount": "10.00",
            "local_currency": "EUR",
            "label": "x",
            "reference": ""
        }))
        .unwrap_err();
        assert!(err.to_string().contains("local_amount"));
    }

    #[test]
    fn test_transaction_decodes_without_local_currency() {
        let txn: QontoTransaction = serde_json::from_value(serde_json::json!({
            "transaction_id": "t1",
            "settled_at": "2023-05-01T10:00:00.000Z",
            "side": "credit",
            "amount": "10.00",
            "local_amount": "10.00"
        }))
        .unwrap();
        assert_eq!(txn.local_currency, None);
        assert_eq!(txn.label, "");
    }
}
