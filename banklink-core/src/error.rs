//! Error model shared by all statement providers.

use thiserror::Error;

/// Result type used across provider implementations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure while obtaining statement data from a remote service.
///
/// Every variant aborts the whole call: a page or transaction that fails
/// invalidates the entire batch, and nothing is retried locally.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Login or secret key missing from the provider configuration.
    #[error("please fill login and secret key for the {service} provider")]
    MissingCredentials { service: &'static str },

    /// The configured account number matches no account at the remote
    /// organization. Misconfiguration, not a transient fetch failure.
    #[error("wrong configuration, unknown account {account}")]
    UnknownAccount { account: String },

    /// A transaction carries a currency code the ledger does not know.
    #[error("currency {code} used in transaction {transaction_id} doesn't exist in the ledger")]
    UnknownCurrency { code: String, transaction_id: String },

    /// A transaction arrived without its mandatory local currency. Upstream
    /// API contract violation; should never happen in practice.
    #[error("transaction {transaction_id} has no local currency, this should never happen")]
    MissingLocalCurrency { transaction_id: String },

    /// Non-200 response from the remote service, body passed through verbatim.
    #[error("{status}\n\n{body}")]
    Remote { status: u16, body: String },

    /// A settled_at timestamp that does not match the documented format.
    #[error("malformed settled_at timestamp {value:?}")]
    BadTimestamp {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Request-level failure (connect, TLS, timeout) before any status code.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}
