//! The online statement provider abstraction: one variant per remote service,
//! selected through the provider configuration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, Journal};
use crate::error::ProviderResult;
use crate::statement::StatementData;

/// Remote services banklink can pull statements from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "qonto")]
    Qonto,
}

impl Service {
    /// Stable machine tag, used in configuration files.
    pub fn code(&self) -> &'static str {
        match self {
            Service::Qonto => "qonto",
        }
    }

    /// Human-readable service name.
    pub fn label(&self) -> &'static str {
        match self {
            Service::Qonto => "Qonto",
        }
    }
}

/// Registry of (code, label) pairs for every supported service.
pub fn available_services() -> Vec<(&'static str, &'static str)> {
    vec![(Service::Qonto.code(), Service::Qonto.label())]
}

/// Configuration for one provider instance. Owned and persisted by the host;
/// read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub service: Service,
    /// Bank account identifier (IBAN or plain account number, any formatting).
    pub account_number: String,
    pub login: Option<String>,
    pub secret_key: Option<String>,
    pub journal: Journal,
    /// Host's currency master-data snapshot.
    pub currencies: Vec<Currency>,
    /// Opt-in escape hatch: skip TLS certificate verification on remote
    /// calls. Defaults to false; verification stays on unless a deployment
    /// explicitly asks otherwise.
    #[serde(default)]
    pub allow_invalid_certs: bool,
}

/// One remote banking service's statement adapter.
///
/// Implementations are fully synchronous and stateless between calls; the
/// host serializes calls per provider configuration.
pub trait StatementProvider {
    /// Fetch and normalize all settled transactions in the given window.
    ///
    /// Returns `Ok(None)` when the period holds no transactions ("nothing to
    /// import"), which the host treats differently from an error.
    fn obtain_statement_data(
        &self,
        date_since: Option<DateTime<Utc>>,
        date_until: Option<DateTime<Utc>>,
    ) -> ProviderResult<Option<StatementData>>;

    /// The civil date the host should label the statement period with.
    /// Computed independently of the fetch window.
    fn statement_date(&self, date_since: DateTime<Utc>, date_until: Option<DateTime<Utc>>)
        -> NaiveDate;
}
