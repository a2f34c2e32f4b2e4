//! Editor cell rendering

use crate::{
    format_currency, format_fixed, ColumnType, CustomColumn, FieldValue, Formula, OrderItem,
};
use lazy_regex::regex_is_match;

/// Text shown in the editor for one custom column cell
///
/// - Formula columns show the computed value with two decimals
/// - Currency columns show the stored value as money; text that is not a
///   number is shown as typed
/// - Number and text columns show the stored value
pub fn render_cell(column: &CustomColumn, item: &OrderItem) -> String {
    let stored = item.custom_field(&column.name);

    match column.column_type {
        ColumnType::Formula => {
            let value = Formula::from_column(column)
                .map(|formula| formula.evaluate(item))
                .unwrap_or(0.0);
            if value.is_nan() {
                "Error".to_string()
            } else {
                format_fixed(value, 2)
            }
        }
        ColumnType::Currency => match stored {
            None => format_currency(0.0),
            Some(FieldValue::Number(n)) => format_currency(if n.is_nan() { 0.0 } else { *n }),
            Some(FieldValue::Text(text)) => match parse_number_strict(text) {
                Some(n) => format_currency(n),
                None => text.clone(),
            },
        },
        ColumnType::Number | ColumnType::Text => {
            stored.map(FieldValue::to_string).unwrap_or_default()
        }
    }
}

/// Parse a whole string as a number
///
/// Surrounding whitespace is ignored and blank text is `0`. Accepts decimal
/// literals with an optional sign and exponent, `0x`/`0o`/`0b` integers,
/// and `Infinity` with an optional sign. Anything else, including trailing
/// text, gives `None`.
pub fn parse_number_strict(s: &str) -> Option<f64> {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(value) = parse_radix_literal(s) {
        return Some(value);
    }

    if regex_is_match!(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$", s) {
        return s.parse::<f64>().ok();
    }

    None
}

/// `0x1F`, `0o17`, `0b101` (unsigned)
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let mut value = 0.0_f64;
    for c in s[2..].chars() {
        let digit = c.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}
