use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Any Unicode whitespace, including the no-break spaces used as Swedish
/// thousands separators.
static THOUSANDS_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseDecimalError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Normalizes Swedish-formatted input: drops whitespace (thousands
/// separator) and turns the decimal comma into a point.
fn normalize_decimal_input(s: &str) -> String {
    THOUSANDS_SEPARATOR.replace_all(s, "").replace(',', ".")
}

/// Parses a Swedish-formatted number such as `"67 000"` or `"33,93"`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses an optional Swedish-formatted number.
///
/// Returns `None` for empty input, or when parsing fails (logs a warning
/// on parse failure).
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid optional number: {}", e);
                None
            },
            Some,
        )
    }
}

/// Converts a percentage (`1.95`) to a fraction (`0.0195`).
pub fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / HUNDRED
}
