//! Currency and date token extraction.
//!
//! Tokens are returned in order of appearance; answer templates rely on
//! "first" and "second" positions.

use std::sync::LazyLock;

use regex::Regex;

/// Optional `$`, digits with optional `,` thousands groups, optional cents.
static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?[0-9]+(?:,[0-9]{3})*(?:\.[0-9]{2})?").expect("valid currency regex")
});

/// `M/D/YY[YY]` or `M-D-YY[YY]`. Day and month are not validated.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}|[0-9]{1,2}-[0-9]{1,2}-[0-9]{2,4}")
        .expect("valid date regex")
});

/// All currency-like tokens. Bare numbers count: `"03/15"` yields `"03"`
/// and `"15"`.
#[must_use]
pub fn extract_currency(text: &str) -> Vec<&str> {
    CURRENCY_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// All date-like tokens.
#[must_use]
pub fn extract_dates(text: &str) -> Vec<&str> {
    DATE_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// The first currency-like token immediately followed by a `kWh` unit
/// (whitespace allowed in between, case-insensitive).
#[must_use]
pub fn kwh_quantity(text: &str) -> Option<&str> {
    CURRENCY_RE
        .find_iter(text)
        .find(|m| followed_by_kwh(&text[m.end()..]))
        .map(|m| m.as_str())
}

fn followed_by_kwh(rest: &str) -> bool {
    rest.trim_start()
        .get(..3)
        .is_some_and(|unit| unit.eq_ignore_ascii_case("kwh"))
}
