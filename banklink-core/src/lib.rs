//! banklink-core: service-agnostic statement model, currency master data, and
//! the online statement provider abstraction.

pub mod account;
pub mod currency;
pub mod error;
pub mod provider;
pub mod statement;

pub use account::sanitize_account_number;
pub use currency::{Currency, CurrencyId, CurrencyTable, Journal};
pub use error::{ProviderError, ProviderResult};
pub use provider::{available_services, ProviderConfig, Service, StatementProvider};
pub use statement::{StatementData, StatementLine};
