//! Account-number canonicalization shared by providers and their slug maps.

use regex::Regex;
use std::sync::OnceLock;

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("static regex"))
}

/// Canonicalize an account number (IBAN or otherwise) for lookups: strip
/// whitespace and punctuation, uppercase. Lookups built on this are
/// format-independent, so `"FR76 3000..."` and `"fr76-3000..."` collide.
pub fn sanitize_account_number(account_number: &str) -> String {
    non_word().replace_all(account_number, "").to_uppercase()
}
