//! TOML provider configuration for the CLI.
//!
//! Stands in for the host framework's persisted provider records: one file
//! describes the provider, the journal it feeds, and the ledger's currency
//! master data.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use banklink_core::{Currency, CurrencyId, Journal, ProviderConfig, Service};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub provider: ProviderSection,
    pub journal: JournalSection,
    /// Ledger currency master data; every code a transaction may carry must
    /// be listed here.
    #[serde(default)]
    pub currencies: Vec<CurrencySection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    pub service: Service,
    pub account_number: String,
    pub login: Option<String>,
    pub secret_key: Option<String>,
    /// Opt-in: skip TLS verification on remote calls. Leave unset.
    #[serde(default)]
    pub allow_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSection {
    pub name: String,
    /// ISO code of the journal currency; must appear in `currencies`.
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySection {
    pub id: i64,
    pub code: String,
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

impl ConfigFile {
    /// Resolve the file into the provider configuration the adapters consume.
    pub fn into_provider_config(self) -> Result<ProviderConfig> {
        let currencies: Vec<Currency> = self
            .currencies
            .iter()
            .map(|c| Currency {
                id: CurrencyId(c.id),
                code: c.code.clone(),
            })
            .collect();
        let journal_currency = currencies
            .iter()
            .find(|c| c.code == self.journal.currency)
            .cloned()
            .with_context(|| {
                format!(
                    "journal currency {} is not in the currencies list",
                    self.journal.currency
                )
            })?;
        Ok(ProviderConfig {
            service: self.provider.service,
            account_number: self.provider.account_number,
            login: self.provider.login,
            secret_key: self.provider.secret_key,
            journal: Journal {
                name: self.journal.name,
                currency: journal_currency,
            },
            currencies,
            allow_invalid_certs: self.provider.allow_invalid_certs,
        })
    }
}
