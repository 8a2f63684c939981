// Locale-aware normalization for amounts typed by users or read from imports.
// Both Turkish ("1.234,56") and US/UK ("1,234.56") conventions are accepted;
// `.` and `,` are classified as decimal point or thousands grouping per input.
use serde_json::Value;

/// Untyped input handed over by forms, CSV cells or JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Absent,
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        RawValue::Text(value.clone())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Absent,
            Value::Number(n) => n.as_f64().map_or(RawValue::Absent, RawValue::Number),
            Value::String(s) => RawValue::Text(s),
            // An object has no numeric reading; its JSON text could still contain digits.
            Value::Object(_) => RawValue::Absent,
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        RawValue::from(value.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Dot,
    Comma,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Comma => ',',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Separator::Dot),
            ',' => Some(Separator::Comma),
            _ => None,
        }
    }
}

/// The three decisions taken for a sanitized string, in the order they are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorAnalysis {
    pub thousand_separated: bool,
    pub decimal: Option<Separator>,
    pub thousand: Option<Separator>,
}

impl SeparatorAnalysis {
    pub fn of(sanitized: &str) -> Self {
        let thousand_separated = has_thousand_separators(sanitized);
        let decimal = determine_decimal_separator(sanitized, thousand_separated);
        let thousand = determine_thousand_separator(sanitized, decimal, thousand_separated);
        SeparatorAnalysis {
            thousand_separated,
            decimal,
            thousand,
        }
    }
}

fn unsigned_part(value: &str) -> &str {
    value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value)
}

/// Keeps digits, `.` and `,`, with a single leading `-` when the text started with one.
/// Returns `"-"` for sign-only input and an empty string when nothing usable is left.
pub fn sanitize_numeric_input(text: &str) -> String {
    let raw: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(*c, '.' | ',' | '+' | '-'))
        .collect();

    let has_leading_minus = raw.starts_with('-');
    let body: String = raw.chars().filter(|c| !matches!(*c, '+' | '-')).collect();

    if has_leading_minus {
        format!("-{}", body)
    } else {
        body
    }
}

/// Whether the separators in `value` include a thousands grouping separator.
///
/// Mixed separators always mean grouping. A single separator type means grouping when it
/// occurs at least twice, or once with exactly three digits after it and a nonzero
/// integer part before it (so `0.123` stays a fraction).
pub fn has_thousand_separators(value: &str) -> bool {
    let unsigned = unsigned_part(value);
    let has_dot = unsigned.contains('.');
    let has_comma = unsigned.contains(',');

    match (has_dot, has_comma) {
        (false, false) => false,
        (true, true) => true,
        _ => {
            let separator = if has_dot { '.' } else { ',' };
            let parts: Vec<&str> = unsigned.split(separator).collect();
            match parts.as_slice() {
                [integer_part, fractional_part] => {
                    is_nonzero_integer(integer_part)
                        && fractional_part.chars().filter(char::is_ascii_digit).count() == 3
                }
                [_] => false,
                _ => true,
            }
        }
    }
}

fn is_nonzero_integer(part: &str) -> bool {
    part.chars().filter(char::is_ascii_digit).any(|d| d != '0')
}

/// The rightmost separator when both appear; the lone separator type when no grouping was found.
pub fn determine_decimal_separator(value: &str, thousand_separated: bool) -> Option<Separator> {
    let unsigned = unsigned_part(value);
    match (unsigned.rfind('.'), unsigned.rfind(',')) {
        (None, None) => None,
        (Some(dot), Some(comma)) => Some(if dot > comma {
            Separator::Dot
        } else {
            Separator::Comma
        }),
        (Some(_), None) if !thousand_separated => Some(Separator::Dot),
        (None, Some(_)) if !thousand_separated => Some(Separator::Comma),
        _ => None,
    }
}

pub fn determine_thousand_separator(
    value: &str,
    decimal_separator: Option<Separator>,
    thousand_separated: bool,
) -> Option<Separator> {
    if !thousand_separated {
        return None;
    }

    let mut present = unsigned_part(value).chars().filter_map(Separator::from_char);
    match decimal_separator {
        Some(decimal) => present.find(|separator| *separator != decimal),
        None => present.next(),
    }
}

fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        // -0.0 would otherwise render as "-0"
        return "0".to_string();
    }
    value.to_string()
}

fn normalise_text(text: &str) -> String {
    let sanitized = sanitize_numeric_input(text);

    // Covers empty and sign-only input as well as separator-only input.
    if !sanitized.chars().any(|c| c.is_ascii_digit()) {
        return "0".to_string();
    }

    let analysis = SeparatorAnalysis::of(&sanitized);
    let (negative, body) = match sanitized.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, sanitized.as_str()),
    };

    let mut normalized = String::with_capacity(sanitized.len());
    if negative {
        normalized.push('-');
    }

    let mut seen_decimal = false;
    for c in body.chars() {
        match Separator::from_char(c) {
            None => normalized.push(c),
            Some(separator) if Some(separator) == analysis.decimal => {
                // A second decimal point ends the number.
                if seen_decimal {
                    break;
                }
                seen_decimal = true;
                normalized.push('.');
            }
            Some(separator) => debug_assert_eq!(Some(separator), analysis.thousand),
        }
    }

    tracing::trace!(
        input = %text,
        sanitized = %sanitized,
        ?analysis,
        normalized = %normalized,
        "Normalised numeric text"
    );

    normalized
}

/// Canonical decimal-point string for `value`: digits, an optional leading `-` and at
/// most one `.`. Anything without significant digits becomes `"0"`.
pub fn normalise_numeric_string(value: impl Into<RawValue>) -> String {
    match value.into() {
        RawValue::Number(n) => format_number(n),
        RawValue::Text(text) => normalise_text(&text),
        RawValue::Absent => "0".to_string(),
    }
}

/// Finite amount for `value`, `0.0` when it cannot be read. Never fails.
pub fn parse_currency_to_number(value: impl Into<RawValue>) -> f64 {
    match value.into() {
        RawValue::Number(n) if n.is_finite() => n,
        RawValue::Number(_) | RawValue::Absent => 0.0,
        RawValue::Text(text) => normalise_text(&text)
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .unwrap_or(0.0),
    }
}

/// Serde adapters for record fields that may hold a JSON number, a locale string or null.
///
/// ```ignore
/// #[serde(default, deserialize_with = "serde_amount::deserialize")]
/// pub amount: f64,
/// ```
pub mod serde_amount {
    use super::parse_currency_to_number;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_currency_to_number(value))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => None,
            other => Some(parse_currency_to_number(other)),
        })
    }
}
