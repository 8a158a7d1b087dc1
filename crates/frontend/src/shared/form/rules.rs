//! Declared constraints between two fields

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// `first` must not be later (or greater) than `second`
    NotAfter,
}

/// Constraint over a pair of fields, checked on submit and, when
/// `on_change` is set, on every edit of either field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFieldRule {
    pub first: String,
    pub second: String,
    pub kind: RuleKind,
    pub on_change: bool,
}

impl CrossFieldRule {
    pub fn not_after(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            kind: RuleKind::NotAfter,
            on_change: false,
        }
    }

    /// Also reject an edit that breaks the rule
    pub fn on_change(mut self) -> Self {
        self.on_change = true;
        self
    }

    pub fn involves(&self, key: &str) -> bool {
        self.first == key || self.second == key
    }

    /// Unset or incomparable values never violate the rule
    pub fn is_violated(&self, values: &Map<String, Value>) -> bool {
        let (Some(first), Some(second)) = (
            values.get(&self.first).and_then(Comparable::parse),
            values.get(&self.second).and_then(Comparable::parse),
        ) else {
            return false;
        };
        match self.kind {
            RuleKind::NotAfter => first.compare(&second) == Some(Ordering::Greater),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Comparable {
    Moment(NaiveDateTime),
    Number(f64),
}

impl Comparable {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return date.and_hms_opt(0, 0, 0).map(Self::Moment);
                }
                if let Ok(moment) = DateTime::parse_from_rfc3339(s) {
                    return Some(Self::Moment(moment.naive_utc()));
                }
                s.parse::<f64>().ok().map(Self::Number)
            }
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Moment(a), Self::Moment(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_dates_in_order_pass() {
        let rule = CrossFieldRule::not_after("startdate", "enddate");
        assert!(!rule.is_violated(&values(json!({ "startdate": "2024-01-01", "enddate": "2024-02-01" }))));
        assert!(!rule.is_violated(&values(json!({ "startdate": "2024-01-01", "enddate": "2024-01-01" }))));
    }

    #[test]
    fn test_inverted_dates_fail() {
        let rule = CrossFieldRule::not_after("from", "to");
        assert!(rule.is_violated(&values(json!({ "from": "2024-03-01", "to": "2024-02-01" }))));
        assert!(rule.is_violated(&values(json!({
            "from": "2024-02-01T12:00:00Z",
            "to": "2024-02-01T08:00:00+00:00"
        }))));
    }

    #[test]
    fn test_unset_side_never_fails() {
        let rule = CrossFieldRule::not_after("from", "to");
        assert!(!rule.is_violated(&values(json!({ "from": "2024-03-01", "to": "" }))));
        assert!(!rule.is_violated(&values(json!({ "from": "2024-03-01" }))));
    }

    #[test]
    fn test_numbers_compare() {
        let rule = CrossFieldRule::not_after("min", "max");
        assert!(rule.is_violated(&values(json!({ "min": 10, "max": "9.5" }))));
        assert!(!rule.is_violated(&values(json!({ "min": 1, "max": 2 }))));
    }

    #[test]
    fn test_mixed_kinds_are_incomparable() {
        let rule = CrossFieldRule::not_after("from", "to");
        assert!(!rule.is_violated(&values(json!({ "from": "2024-03-01", "to": 5 }))));
    }
}
