//! Sort state and row ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::text::locale_cmp;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Header indicator.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

impl SortState {
    /// No active sort column.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            sort_key: Some(key.into()),
            sort_direction: direction,
        }
    }

    /// Direction of `key` if it is the active sort column.
    pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
        (self.sort_key.as_deref() == Some(key)).then_some(self.sort_direction)
    }

    /// Apply a header click: a new column starts ascending, the active one flips.
    pub fn toggle(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggle();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }
}

/// The key a row is ordered by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn is_number(&self) -> bool {
        matches!(self, SortValue::Number(_))
    }
}

impl From<&Value> for SortValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SortValue::Number(if *b { 1.0 } else { 0.0 }),
            Value::Int(v) => SortValue::Number(*v as f64),
            Value::Float(v) => SortValue::Number(*v),
            Value::String(s) => SortValue::Text(s.clone()),
            Value::Null => SortValue::Text(String::new()),
            Value::Json(v) => SortValue::Text(v.to_string()),
        }
    }
}

impl From<f64> for SortValue {
    fn from(v: f64) -> Self {
        SortValue::Number(v)
    }
}

impl From<i64> for SortValue {
    fn from(v: i64) -> Self {
        SortValue::Number(v as f64)
    }
}

impl From<String> for SortValue {
    fn from(v: String) -> Self {
        SortValue::Text(v)
    }
}

impl From<&str> for SortValue {
    fn from(v: &str) -> Self {
        SortValue::Text(v.to_string())
    }
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Number(n) => write!(f, "{}", n),
            SortValue::Text(s) => f.write_str(s),
        }
    }
}

/// Rank of a key's group: empty first, then numbers, then other text.
fn group(value: &SortValue) -> u8 {
    match value {
        SortValue::Text(s) if s.is_empty() => 0,
        SortValue::Number(_) => 1,
        SortValue::Text(_) => 2,
    }
}

/// Compare two sort keys in ascending order.
///
/// Two numbers compare numerically and two texts by locale-style string
/// order. Otherwise empty values come first, then numbers, then text.
pub fn compare(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(y),
        (SortValue::Text(x), SortValue::Text(y)) if !x.is_empty() && !y.is_empty() => {
            locale_cmp(x, y)
        }
        _ => group(a).cmp(&group(b)),
    }
}

/// Stable ordering of `keys` (one per row) in `direction`.
pub fn order(keys: &[SortValue], direction: SortDirection) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    indices.sort_by(|&a, &b| direction.apply(compare(&keys[a], &keys[b])));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_active_and_resets_new() {
        let mut state = SortState::by("name", SortDirection::Asc);
        state.toggle("name");
        assert_eq!(state, SortState::by("name", SortDirection::Desc));
        state.toggle("email");
        assert_eq!(state, SortState::by("email", SortDirection::Asc));
    }

    #[test]
    fn booleans_sort_as_numbers() {
        let keys: Vec<SortValue> = [true, false, true]
            .iter()
            .map(|b| SortValue::from(&Value::Bool(*b)))
            .collect();
        assert_eq!(order(&keys, SortDirection::Asc), vec![1, 0, 2]);
    }

    #[test]
    fn numbers_do_not_sort_as_text() {
        let keys = vec![SortValue::from(10i64), SortValue::from(9i64)];
        assert_eq!(order(&keys, SortDirection::Asc), vec![1, 0]);
    }

    #[test]
    fn missing_values_keep_numbers_numeric() {
        let keys = vec![
            SortValue::from(10i64),
            SortValue::from(9i64),
            SortValue::from(&Value::Null),
        ];
        assert_eq!(order(&keys, SortDirection::Asc), vec![2, 1, 0]);
        assert_eq!(order(&keys, SortDirection::Desc), vec![0, 1, 2]);
    }

    #[test]
    fn mixed_keys_group_empty_numbers_text() {
        let keys = vec![
            SortValue::from("5a"),
            SortValue::from(10i64),
            SortValue::from(""),
            SortValue::from(9i64),
        ];
        assert_eq!(order(&keys, SortDirection::Asc), vec![2, 3, 1, 0]);
    }

    #[test]
    fn descending_keeps_ties_stable() {
        let keys = vec![
            SortValue::from("b"),
            SortValue::from("a"),
            SortValue::from("b"),
        ];
        assert_eq!(order(&keys, SortDirection::Desc), vec![0, 2, 1]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
    }
}
