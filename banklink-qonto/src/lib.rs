//! banklink-qonto: Qonto statement adapter (auth, slug resolution, paginated
//! transaction fetch, statement-line mapping).

pub mod client;
pub mod mapper;
pub mod provider;
pub mod wire;

pub use client::QontoClient;
pub use provider::QontoProvider;

use banklink_core::{ProviderConfig, Service, StatementProvider};

/// Build the statement provider selected by the configuration's service kind.
pub fn provider_for(config: ProviderConfig) -> Box<dyn StatementProvider> {
    match config.service {
        Service::Qonto => Box::new(QontoProvider::new(config)),
    }
}
