use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// A single non-missing cell. Missing cells are `None` in an `Option<Value>`.
#[derive(Debug, Clone, Serialize)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    (*n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

// Signed zeros compare equal and every NaN is the same value, so numbers can
// live in hashed and ordered sets.
fn canonical(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(n) => {
                0u8.hash(state);
                canonical(*n).to_bits().hash(state);
            }
            Value::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Returns true for spellings that tabular tools conventionally read as a
/// missing value.
pub fn is_missing_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_ascii_lowercase();
    matches!(
        lowered.as_str(),
        "na" | "n/a" | "#n/a" | "<na>" | "nan" | "-nan" | "null" | "none"
    )
}

/// Parses a raw CSV field, returning `None` for missing markers.
pub fn parse_cell(raw: &str, numeric: bool) -> Option<Value> {
    if is_missing_marker(raw) {
        return None;
    }
    if numeric && let Ok(parsed) = raw.trim().parse::<f64>() {
        return Some(Value::Number(parsed));
    }
    Some(Value::Text(raw.to_string()))
}

pub fn is_numeric_literal(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn numbers_display_without_trailing_fraction() {
        assert_eq!(Value::Number(3.0).as_display(), "3");
        assert_eq!(Value::Number(2.5).as_display(), "2.5");
        assert_eq!(Value::from("x").as_display(), "x");
    }

    #[test]
    fn signed_zero_and_nan_collapse_in_sets() {
        let mut hashed = HashSet::new();
        hashed.insert(Value::Number(0.0));
        hashed.insert(Value::Number(-0.0));
        hashed.insert(Value::Number(f64::NAN));
        hashed.insert(Value::Number(-f64::NAN));
        assert_eq!(hashed.len(), 2);

        let ordered: BTreeSet<Value> = hashed.into_iter().collect();
        assert_eq!(ordered.len(), 2);
    }

    #[test]
    fn numbers_order_before_text() {
        assert!(Value::Number(1000.0) < Value::from("0"));
        assert!(Value::Number(-1.0) < Value::Number(1.0));
        assert_ne!(Value::Number(1.0), Value::from("1"));
    }

    #[test]
    fn missing_markers_are_case_insensitive() {
        for raw in ["", "  ", "NA", "n/a", "NaN", "NULL", "None", "#N/A", "<NA>"] {
            assert!(is_missing_marker(raw), "{raw:?} should be missing");
        }
        assert!(!is_missing_marker("0"));
        assert!(!is_missing_marker("nano"));
    }

    #[test]
    fn parse_cell_respects_column_kind() {
        assert_eq!(parse_cell("42", true), Some(Value::Number(42.0)));
        assert_eq!(parse_cell("42", false), Some(Value::from("42")));
        assert_eq!(parse_cell("NA", true), None);
    }
}
