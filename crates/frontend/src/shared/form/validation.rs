//! Submit-time checks. The first failure wins: one message per attempt.

use super::field::{FieldKind, FieldSchema};
use super::rules::CrossFieldRule;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { key: String, label: String },
    #[error("{first_label} cannot be after {second_label}")]
    RangeInverted {
        first: String,
        second: String,
        first_label: String,
        second_label: String,
    },
}

impl ValidationError {
    pub fn key(&self) -> &str {
        match self {
            Self::Required { key, .. } => key,
            Self::RangeInverted { first, .. } => first,
        }
    }

    pub(crate) fn range_inverted(rule: &CrossFieldRule, fields: &[FieldSchema]) -> Self {
        Self::RangeInverted {
            first: rule.first.clone(),
            second: rule.second.clone(),
            first_label: label_of(fields, &rule.first),
            second_label: label_of(fields, &rule.second),
        }
    }
}

fn label_of(fields: &[FieldSchema], key: &str) -> String {
    fields
        .iter()
        .find(|f| f.key == key)
        .map(|f| f.label.clone())
        .unwrap_or_else(|| key.to_string())
}

/// Falsy the way a browser form treats values: null, `false`, `""`, `0`.
/// Arrays and objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn check_required(field: &FieldSchema, value: &Value) -> bool {
    match &field.kind {
        FieldKind::MultiSelect { .. } => value.as_array().map(|a| !a.is_empty()).unwrap_or(false),
        FieldKind::Image => value.as_str().map(|s| !s.is_empty()).unwrap_or(false),
        FieldKind::Switch | FieldKind::Checkbox | FieldKind::Custom { .. } => true,
        _ => is_truthy(value),
    }
}

/// Required fields in declaration order, then the cross-field rules
pub fn validate(
    fields: &[FieldSchema],
    rules: &[CrossFieldRule],
    values: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for field in fields.iter().filter(|f| f.required) {
        let value = values.get(&field.key).unwrap_or(&Value::Null);
        if !check_required(field, value) {
            return Err(ValidationError::Required {
                key: field.key.clone(),
                label: field.label.clone(),
            });
        }
    }

    match rules.iter().find(|rule| rule.is_violated(values)) {
        Some(rule) => Err(ValidationError::range_inverted(rule, fields)),
        None => Ok(()),
    }
}
