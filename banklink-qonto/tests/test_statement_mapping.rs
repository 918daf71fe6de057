use banklink_qonto::mapper::prepare_statement_line;
use banklink_qonto::wire::TransactionsPage;
use banklink_core::{Currency, CurrencyId, CurrencyTable, StatementData};
use rust_decimal::Decimal;
use std::str::FromStr;

fn eur() -> Currency {
    Currency {
        id: CurrencyId(1),
        code: "EUR".to_string(),
    }
}

fn currency_table() -> CurrencyTable {
    CurrencyTable::from_currencies(&[
        eur(),
        Currency {
            id: CurrencyId(2),
            code: "USD".to_string(),
        },
    ])
}

const PAGE: &str = r#"{
    "transactions": [
        {
            "transaction_id": "qonto-1",
            "settled_at": "2023-05-01T10:00:00.000Z",
            "side": "credit",
            "amount": "1250.00",
            "local_currency": "EUR",
            "local_amount": "1250.00",
            "label": "ACME invoice",
            "reference": "INV-2023-18"
        },
        {
            "transaction_id": "qonto-2",
            "settled_at": "2023-05-02T08:30:15.250Z",
            "side": "debit",
            "amount": "99.90",
            "local_currency": "USD",
            "local_amount": "108.50",
            "label": "SaaS subscription",
            "reference": ""
        },
        {
            "transaction_id": "qonto-3",
            "settled_at": "2023-05-03T16:45:00.000Z",
            "side": "debit",
            "amount": "12.00",
            "local_currency": "EUR",
            "local_amount": "12.00",
            "label": "",
            "reference": ""
        }
    ],
    "meta": { "total_pages": 1 }
}"#;

/// A whole page decodes off the wire and maps in order with 1-based sequences.
#[test]
fn test_map_full_page_in_order() {
    let page: TransactionsPage = serde_json::from_str(PAGE).unwrap();
    assert_eq!(page.meta.total_pages, 1);

    let table = currency_table();
    let lines: Vec<_> = page
        .transactions
        .iter()
        .enumerate()
        .map(|(i, t)| prepare_statement_line(t, i as u32 + 1, &eur(), &table).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines.iter().map(|l| l.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        lines.iter().map(|l| l.unique_import_id.as_str()).collect::<Vec<_>>(),
        vec!["qonto-1", "qonto-2", "qonto-3"]
    );

    // Credit in the journal currency: positive, no foreign-currency fields.
    assert_eq!(lines[0].amount, Decimal::from_str("1250.00").unwrap());
    assert_eq!(lines[0].name, "ACME invoice - INV-2023-18");
    assert!(lines[0].currency_id.is_none());

    // Debit in a foreign currency: both amounts negative, currency carried.
    assert_eq!(lines[1].amount, Decimal::from_str("-99.90").unwrap());
    assert_eq!(lines[1].currency_id, Some(CurrencyId(2)));
    assert_eq!(lines[1].amount_currency, Some(Decimal::from_str("-108.50").unwrap()));

    // Label and reference both empty falls back to the placeholder name.
    assert_eq!(lines[2].name, "/");
}

/// A transaction with `local_currency: null` still decodes; the failure is a
/// mapping-time data-integrity error, not a parse error.
#[test]
fn test_null_local_currency_decodes_then_fails_mapping() {
    let page: TransactionsPage = serde_json::from_str(
        r#"{
            "transactions": [
                {
                    "transaction_id": "qonto-9",
                    "settled_at": "2023-05-01T10:00:00.000Z",
                    "side": "credit",
                    "amount": "1.00",
                    "local_currency": null,
                    "local_amount": "1.00",
                    "label": "x",
                    "reference": ""
                }
            ],
            "meta": { "total_pages": 1 }
        }"#,
    )
    .unwrap();
    let err = prepare_statement_line(&page.transactions[0], 1, &eur(), &currency_table())
        .unwrap_err();
    assert!(err.to_string().contains("qonto-9"));
}

/// Statement data serializes without the optional currency fields when they
/// are unset.
#[test]
fn test_statement_line_serialization_omits_empty_currency() {
    let page: TransactionsPage = serde_json::from_str(PAGE).unwrap();
    let table = currency_table();
    let line = prepare_statement_line(&page.transactions[0], 1, &eur(), &table).unwrap();
    let data = StatementData::new(vec![line]);

    let json = serde_json::to_value(&data).unwrap();
    let first = &json["lines"][0];
    assert!(first.get("currency_id").is_none());
    assert!(first.get("amount_currency").is_none());
    assert_eq!(json["extra_values"], serde_json::json!({}));
}
