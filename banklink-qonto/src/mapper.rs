//! Qonto transaction → normalized statement line.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use banklink_core::{Currency, CurrencyTable, ProviderError, ProviderResult, StatementLine};

use crate::wire::QontoTransaction;

const SETTLED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// The API always sends fractional seconds; chrono's `%.f` would also accept
/// their absence, so a fraction-less timestamp is rejected explicitly to keep
/// the format fixed-width.
fn parse_settled_at(value: &str) -> ProviderResult<DateTime<Utc>> {
    let parsed = NaiveDateTime::parse_from_str(value, SETTLED_AT_FORMAT).map_err(|source| {
        ProviderError::BadTimestamp {
            value: value.to_string(),
            source: Some(source),
        }
    })?;
    if !value.contains('.') {
        return Err(ProviderError::BadTimestamp {
            value: value.to_string(),
            source: None,
        });
    }
    Ok(parsed.and_utc())
}

/// Map one transaction into a statement line.
///
/// `sequence` is purely positional: 1-based, assigned in fetch order, not
/// derived from any remote field.
pub fn prepare_statement_line(
    transaction: &QontoTransaction,
    sequence: u32,
    journal_currency: &Currency,
    currencies: &CurrencyTable,
) -> ProviderResult<StatementLine> {
    let date = parse_settled_at(&transaction.settled_at)?;
    let side = if transaction.side == "credit" {
        Decimal::ONE
    } else {
        -Decimal::ONE
    };
    let name: String = [&transaction.label, &transaction.reference]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(" - ");
    let name = if name.is_empty() { "/".to_string() } else { name };

    let code = transaction
        .local_currency
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ProviderError::MissingLocalCurrency {
            transaction_id: transaction.transaction_id.clone(),
        })?;
    let line_currency = currencies
        .lookup(code)
        .ok_or_else(|| ProviderError::UnknownCurrency {
            code: code.to_string(),
            transaction_id: transaction.transaction_id.clone(),
        })?;
    let (currency_id, amount_currency) = if line_currency != journal_currency.id {
        (Some(line_currency), Some(transaction.local_amount * side))
    } else {
        (None, None)
    };

    Ok(StatementLine {
        sequence,
        date,
        name,
        payment_ref: transaction.reference.clone(),
        unique_import_id: transaction.transaction_id.clone(),
        amount: transaction.amount * side,
        currency_id,
        amount_currency,
    })
}
