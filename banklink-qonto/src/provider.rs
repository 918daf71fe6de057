//! The Qonto implementation of the statement provider trait.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Europe::Paris;
use tracing::info;

use banklink_core::{
    sanitize_account_number, Currency, CurrencyTable, ProviderConfig, ProviderError,
    ProviderResult, StatementData, StatementProvider,
};

use crate::client::QontoClient;
use crate::mapper::prepare_statement_line;
use crate::wire::QontoTransaction;

pub struct QontoProvider {
    config: ProviderConfig,
}

impl QontoProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl StatementProvider for QontoProvider {
    fn obtain_statement_data(
        &self,
        date_since: Option<DateTime<Utc>>,
        date_until: Option<DateTime<Utc>>,
    ) -> ProviderResult<Option<StatementData>> {
        let client = QontoClient::new(
            self.config.login.as_deref(),
            self.config.secret_key.as_deref(),
            self.config.allow_invalid_certs,
        )?;
        let slugs = client.organization_slugs()?;
        let account = sanitize_account_number(&self.config.account_number);
        let slug = slugs
            .get(&account)
            .ok_or_else(|| ProviderError::UnknownAccount {
                account: self.config.account_number.clone(),
            })?;
        let transactions =
            client.fetch_transactions(slug, &self.config.account_number, date_since, date_until)?;
        info!(count = transactions.len(), %slug, "mapping transactions");

        let currencies = CurrencyTable::from_currencies(&self.config.currencies);
        build_statement_data(&transactions, &self.config.journal.currency, &currencies)
    }

    /// Statement periods are labeled with the bank's local civil date, so the
    /// UTC window start is viewed from Paris before truncating.
    fn statement_date(
        &self,
        date_since: DateTime<Utc>,
        _date_until: Option<DateTime<Utc>>,
    ) -> NaiveDate {
        date_since.with_timezone(&Paris).date_naive()
    }
}

/// Map fetched transactions into statement data, in fetch order with 1-based
/// sequences. An empty period yields `None` ("nothing to import"), distinct
/// from an error; any transaction that fails invalidates the whole batch.
pub(crate) fn build_statement_data(
    transactions: &[QontoTransaction],
    journal_currency: &Currency,
    currencies: &CurrencyTable,
) -> ProviderResult<Option<StatementData>> {
    let mut lines = Vec::with_capacity(transactions.len());
    for (index, transaction) in transactions.iter().enumerate() {
        let sequence = index as u32 + 1;
        lines.push(prepare_statement_line(
            transaction,
            sequence,
            journal_currency,
            currencies,
        )?);
    }
    if lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(StatementData::new(lines)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use banklink_core::{CurrencyId, Journal, Service};
    use chrono::TimeZone;

    fn provider() -> QontoProvider {
        QontoProvider::new(ProviderConfig {
            service: Service::Qonto,
            account_number: "FR76 3000 6000 0112 3456 7890 189".to_string(),
            login: Some("login".to_string()),
            secret_key: Some("key".to_string()),
            journal: Journal {
                name: "Bank".to_string(),
                currency: Currency {
                    id: CurrencyId(1),
                    code: "EUR".to_string(),
                },
            },
            currencies: vec![],
            allow_invalid_certs: false,
        })
    }

    #[test]
    fn test_statement_date_is_paris_local() {
        let p = provider();
        // 23:30 UTC on June 30 is already July 1 in Paris (CEST, UTC+2).
        let since = Utc.with_ymd_and_hms(2023, 6, 30, 23, 30, 0).unwrap();
        assert_eq!(
            p.statement_date(since, None),
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
        );
    }

    fn eur() -> Currency {
        Currency {
            id: CurrencyId(1),
            code: "EUR".to_string(),
        }
    }

    fn txn(id: &str) -> QontoTransaction {
        serde_json::from_value(serde_json::json!({
            "transaction_id": id,
            "settled_at": "2023-05-01T10:00:00.000Z",
            "side": "credit",
            "amount": "10.00",
            "local_currency": "EUR",
            "local_amount": "10.00",
            "label": "x",
            "reference": ""
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_period_is_nothing_to_import() {
        let currencies = CurrencyTable::from_currencies(&[eur()]);
        let out = build_statement_data(&[], &eur(), &currencies).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_build_statement_data_assigns_sequences() {
        let currencies = CurrencyTable::from_currencies(&[eur()]);
        let data = build_statement_data(&[txn("a"), txn("b")], &eur(), &currencies)
            .unwrap()
            .unwrap();
        assert_eq!(
            data.lines.iter().map(|l| l.sequence).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(data.lines[1].unique_import_id, "b");
        assert!(data.extra_values.is_empty());
    }

    #[test]
    fn test_one_bad_transaction_fails_the_batch() {
        let currencies = CurrencyTable::from_currencies(&[eur()]);
        let mut bad = txn("b");
        bad.local_currency = None;
        let err = build_statement_data(&[txn("a"), bad], &eur(), &currencies).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingLocalCurrency { transaction_id } if transaction_id == "b"
        ));
    }

    #[test]
    fn test_statement_date_winter_offset() {
        let p = provider();
        // CET is UTC+1: 22:30 UTC stays on the same Paris date.
        let since = Utc.with_ymd_and_hms(2023, 1, 15, 22, 30, 0).unwrap();
        assert_eq!(
            p.statement_date(since, None),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }
}
