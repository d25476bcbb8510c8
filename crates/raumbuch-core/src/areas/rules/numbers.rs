//! German number parsing.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::error::ExtractionError;

/// Parse a German-formatted number (e.g. "1.070,55", "22,79" or "50.37").
///
/// With both separators present the dot is a thousands separator and the
/// comma the decimal mark. A lone comma is the decimal mark. Anything else is
/// parsed as-is.
pub fn parse_german_number(s: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = s.trim();

    let normalized = if trimmed.contains('.') && trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.replace(',', ".")
    };

    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(parse_error(s));
    }

    Decimal::from_str(&normalized).map_err(|_| parse_error(s))
}

/// Largest value accepted from a captured token (m² or m).
pub const MAX_CAPTURED_VALUE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Parse a captured area token, logging and discarding failures and values
/// above [`MAX_CAPTURED_VALUE`].
pub(crate) fn parse_capture(field: &str, token: &str) -> Option<Decimal> {
    match parse_german_number(token) {
        Ok(value) if value > MAX_CAPTURED_VALUE => {
            debug!("Dropping {} candidate: {} is out of range", field, token);
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Dropping {} candidate: {}", field, e);
            None
        }
    }
}

fn parse_error(value: &str) -> ExtractionError {
    ExtractionError::Parse {
        field: "number".to_string(),
        value: value.to_string(),
    }
}
