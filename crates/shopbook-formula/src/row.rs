//! Row lookup and numeric coercion
//!
//! A placeholder key is resolved in two tiers: the line's fixed numeric
//! fields first, then its custom fields. Whatever is found is coerced to a
//! number permissively (leading numeric prefix, otherwise `0`).

use ahash::AHashMap;
use shopbook_core::{FieldValue, OrderItem};

/// Field access for one order line
pub trait RowFields {
    /// Fixed field value, if `key` names a numeric fixed field
    fn fixed_number(&self, key: &str) -> Option<f64>;

    /// Custom field value, whatever is stored
    fn custom_value(&self, key: &str) -> Option<&FieldValue>;
}

impl RowFields for OrderItem {
    fn fixed_number(&self, key: &str) -> Option<f64> {
        OrderItem::fixed_number(self, key)
    }

    fn custom_value(&self, key: &str) -> Option<&FieldValue> {
        self.custom_field(key)
    }
}

impl<T: RowFields + ?Sized> RowFields for &T {
    fn fixed_number(&self, key: &str) -> Option<f64> {
        (**self).fixed_number(key)
    }

    fn custom_value(&self, key: &str) -> Option<&FieldValue> {
        (**self).custom_value(key)
    }
}

/// A free-standing row, for callers without an [`OrderItem`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fixed: AHashMap<String, f64>,
    custom: AHashMap<String, FieldValue>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixed numeric field
    pub fn with_fixed(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fixed.insert(key.into(), value);
        self
    }

    /// Add a custom field
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Set a fixed numeric field
    pub fn set_fixed(&mut self, key: impl Into<String>, value: f64) {
        self.fixed.insert(key.into(), value);
    }

    /// Set a custom field
    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.custom.insert(key.into(), value.into());
    }
}

impl RowFields for Row {
    fn fixed_number(&self, key: &str) -> Option<f64> {
        self.fixed.get(key).copied()
    }

    fn custom_value(&self, key: &str) -> Option<&FieldValue> {
        self.custom.get(key)
    }
}

/// Resolve a placeholder key to the number substituted for it
pub fn resolve<R: RowFields + ?Sized>(row: &R, key: &str) -> f64 {
    match row.fixed_number(key) {
        Some(n) => normalize(n),
        None => coerce(row.custom_value(key)),
    }
}

/// Coerce a stored value to a number; missing or unparsable gives `0`
pub fn coerce(value: Option<&FieldValue>) -> f64 {
    let n = match value {
        None => return 0.0,
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Text(s)) => parse_float_prefix(s).unwrap_or(0.0),
    };
    normalize(n)
}

/// NaN and -0 collapse to 0; infinities pass through
fn normalize(n: f64) -> f64 {
    if n.is_nan() || n == 0.0 {
        0.0
    } else {
        n
    }
}

/// Parse the longest numeric prefix of a string
///
/// Leading whitespace is skipped. Accepts an optional sign followed by
/// `Infinity`, or by digits with an optional fraction and exponent
/// (`12`, `12.5`, `.5`, `5.`, `1e3`). Trailing text is ignored, so `"12cm"`
/// gives `12`. Returns `None` when no digits lead the string.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // Integer part
    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    // Fraction part
    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let frac_digits = j - (i + 1);
        if digits > 0 || frac_digits > 0 {
            digits += frac_digits;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent, only if complete
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().ok()
}

/// Render a substituted number as plain decimal text
///
/// Finite values never use exponent notation. Non-finite values render as
/// words, which the expression gate then rejects.
pub fn render_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}
