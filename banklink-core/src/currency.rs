//! Currency master data and journal types supplied by the host ledger.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ledger-internal identifier of a currency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyId(pub i64);

/// One currency record from the host's master data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    /// ISO code, e.g. "EUR".
    pub code: String,
}

/// Snapshot of all currencies known to the ledger, indexed by ISO code.
/// Built fresh on every provider call; never cached across calls.
#[derive(Debug, Clone, Default)]
pub struct CurrencyTable {
    by_code: HashMap<String, CurrencyId>,
}

impl CurrencyTable {
    pub fn from_currencies(currencies: &[Currency]) -> Self {
        Self {
            by_code: currencies
                .iter()
                .map(|c| (c.code.clone(), c.id))
                .collect(),
        }
    }

    pub fn lookup(&self, code: &str) -> Option<CurrencyId> {
        self.by_code.get(code).copied()
    }
}

/// The accounting journal a provider feeds. Its currency is the ledger's
/// functional currency for this journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur() -> Currency {
        Currency {
            id: CurrencyId(1),
            code: "EUR".to_string(),
        }
    }

    #[test]
    fn test_table_lookup() {
        let table = CurrencyTable::from_currencies(&[
            eur(),
            Currency {
                id: CurrencyId(2),
                code: "USD".to_string(),
            },
        ]);
        assert_eq!(table.lookup("USD"), Some(CurrencyId(2)));
        assert_eq!(table.lookup("GBP"), None);
    }
}
