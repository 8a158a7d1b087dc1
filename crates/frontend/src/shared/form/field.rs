//! Form schema: what each field is and how it may be edited

use leptos::prelude::{AnyView, Signal};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Renderer of a `Custom` field: its value (reactive) and its dispatcher.
/// Called once; the view tracks the value itself.
pub type CustomRender = Arc<dyn Fn(Signal<Value>, FieldDispatch) -> AnyView + Send + Sync>;

/// Side channel fired after a field is set. The returned actions (for
/// example clearing a dependent select) are applied right after; they do
/// not fire hooks of their own.
pub type ChangeHook = Arc<dyn Fn(&Value) -> Vec<FormAction> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Value as sent through an HTML `<option value>`
    pub fn value_key(&self) -> String {
        option_key(&self.value)
    }
}

/// Key under which a JSON value travels through `<option value>`
pub fn option_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    Date,
    Textarea,
    Select { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
    Switch,
    Checkbox,
    /// Single image kept as a data URL
    Image,
    /// List of sub-records; sub-fields are flat (no arrays, no custom)
    Array { sub_fields: Vec<FieldSchema> },
    Custom { render: CustomRender },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Date => "date",
            Self::Textarea => "textarea",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multiselect",
            Self::Switch => "switch",
            Self::Checkbox => "checkbox",
            Self::Image => "image",
            Self::Array { .. } => "array",
            Self::Custom { .. } => "custom",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Switch | Self::Checkbox)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::MultiSelect { .. } | Self::Array { .. })
    }

    /// Value of a field that was not given one
    pub fn default_value(&self) -> Value {
        if self.is_list() {
            Value::Array(Vec::new())
        } else if self.is_boolean() {
            Value::Bool(false)
        } else {
            Value::String(String::new())
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { options } => f.debug_struct("Select").field("options", options).finish(),
            Self::MultiSelect { options } => f
                .debug_struct("MultiSelect")
                .field("options", options)
                .finish(),
            Self::Array { sub_fields } => f
                .debug_struct("Array")
                .field("sub_fields", sub_fields)
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Clone)]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub on_change: Option<ChangeHook>,
}

impl FieldSchema {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            disabled: false,
            on_change: None,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn select(key: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(key, label, FieldKind::Select { options })
    }

    pub fn switch(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Switch)
    }

    pub fn array(key: impl Into<String>, label: impl Into<String>, sub_fields: Vec<FieldSchema>) -> Self {
        Self::new(key, label, FieldKind::Array { sub_fields })
    }

    pub fn custom<F>(key: impl Into<String>, label: impl Into<String>, render: F) -> Self
    where
        F: Fn(Signal<Value>, FieldDispatch) -> AnyView + Send + Sync + 'static,
    {
        Self::new(key, label, FieldKind::Custom { render: Arc::new(render) })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn on_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Vec<FormAction> + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(hook));
        self
    }

    /// Empty sub-record for a new row of an `Array` field
    pub fn blank_row(&self) -> Value {
        let mut row = Map::new();
        if let FieldKind::Array { sub_fields } = &self.kind {
            for sub in sub_fields {
                row.insert(sub.key.clone(), sub.kind.default_value());
            }
        }
        Value::Object(row)
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("array field `{0}` has no sub-fields")]
    MissingSubFields(String),
    #[error("array field `{parent}` nests another array `{child}`")]
    NestedArray { parent: String, child: String },
    #[error("array field `{parent}` nests a custom field `{child}`")]
    NestedCustom { parent: String, child: String },
    #[error("duplicate field key `{0}`")]
    DuplicateKey(String),
}

/// Reject schemas the form cannot render or edit
pub fn check_schema(fields: &[FieldSchema]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.key.as_str()) {
            return Err(SchemaError::DuplicateKey(field.key.clone()));
        }
        if let FieldKind::Array { sub_fields } = &field.kind {
            if sub_fields.is_empty() {
                return Err(SchemaError::MissingSubFields(field.key.clone()));
            }
            let mut sub_seen = HashSet::new();
            for sub in sub_fields {
                match sub.kind {
                    FieldKind::Array { .. } => {
                        return Err(SchemaError::NestedArray {
                            parent: field.key.clone(),
                            child: sub.key.clone(),
                        })
                    }
                    FieldKind::Custom { .. } => {
                        return Err(SchemaError::NestedCustom {
                            parent: field.key.clone(),
                            child: sub.key.clone(),
                        })
                    }
                    _ => {}
                }
                if !sub_seen.insert(sub.key.as_str()) {
                    return Err(SchemaError::DuplicateKey(format!("{}.{}", field.key, sub.key)));
                }
            }
        }
    }
    Ok(())
}

/// One edit of the form state
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Set { key: String, value: Value },
    AddRow { key: String },
    RemoveRow { key: String, index: usize },
    SetCell { key: String, index: usize, sub_key: String, value: Value },
}

impl FormAction {
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. }
            | Self::AddRow { key }
            | Self::RemoveRow { key, .. }
            | Self::SetCell { key, .. } => key,
        }
    }
}

/// Edits scoped to one field. Handed to custom renderers and array editors
/// instead of a raw state setter.
#[derive(Clone)]
pub struct FieldDispatch {
    key: String,
    sink: Arc<dyn Fn(FormAction) + Send + Sync>,
}

impl FieldDispatch {
    pub fn new<F>(key: impl Into<String>, sink: F) -> Self
    where
        F: Fn(FormAction) + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            sink: Arc::new(sink),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set(&self, value: impl Into<Value>) {
        (self.sink)(FormAction::Set {
            key: self.key.clone(),
            value: value.into(),
        });
    }

    pub fn add_row(&self) {
        (self.sink)(FormAction::AddRow { key: self.key.clone() });
    }

    pub fn remove_row(&self, index: usize) {
        (self.sink)(FormAction::RemoveRow {
            key: self.key.clone(),
            index,
        });
    }

    pub fn set_cell(&self, index: usize, sub_key: impl Into<String>, value: impl Into<Value>) {
        (self.sink)(FormAction::SetCell {
            key: self.key.clone(),
            index,
            sub_key: sub_key.into(),
            value: value.into(),
        });
    }
}

impl fmt::Debug for FieldDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDispatch").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn values_field() -> FieldSchema {
        FieldSchema::array(
            "values",
            "Values",
            vec![FieldSchema::text("name", "Name"), FieldSchema::switch("status", "Active")],
        )
    }

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(FieldKind::Text.default_value(), json!(""));
        assert_eq!(FieldKind::Checkbox.default_value(), json!(false));
        assert_eq!(FieldKind::MultiSelect { options: vec![] }.default_value(), json!([]));
        assert_eq!(values_field().blank_row(), json!({ "name": "", "status": false }));
    }

    #[test]
    fn test_check_schema_accepts_flat_array() {
        let fields = vec![FieldSchema::text("name", "Name").required(), values_field()];
        assert_eq!(check_schema(&fields), Ok(()));
    }

    #[test]
    fn test_check_schema_rejects_bad_arrays() {
        let empty = vec![FieldSchema::array("values", "Values", vec![])];
        assert_eq!(
            check_schema(&empty),
            Err(SchemaError::MissingSubFields("values".into()))
        );

        let nested = vec![FieldSchema::array("outer", "Outer", vec![values_field()])];
        assert!(matches!(check_schema(&nested), Err(SchemaError::NestedArray { .. })));

        let custom = vec![FieldSchema::array(
            "outer",
            "Outer",
            vec![FieldSchema::custom("c", "C", |_, _| leptos::prelude::IntoAny::into_any(()))],
        )];
        assert!(matches!(check_schema(&custom), Err(SchemaError::NestedCustom { .. })));
    }

    #[test]
    fn test_check_schema_rejects_duplicate_keys() {
        let fields = vec![FieldSchema::text("name", "Name"), FieldSchema::text("name", "Other")];
        assert_eq!(check_schema(&fields), Err(SchemaError::DuplicateKey("name".into())));
    }

    #[test]
    fn test_dispatch_is_scoped_to_its_key() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let dispatch = FieldDispatch::new("values", move |a| sink.lock().unwrap().push(a));

        dispatch.add_row();
        dispatch.set_cell(0, "name", "Red");
        dispatch.remove_row(0);

        let actions = seen.lock().unwrap().clone();
        assert_eq!(actions.len(), 3);
        assert!(actions.iter().all(|a| a.key() == "values"));
        assert_eq!(
            actions[1],
            FormAction::SetCell {
                key: "values".into(),
                index: 0,
                sub_key: "name".into(),
                value: json!("Red"),
            }
        );
    }

    #[test]
    fn test_option_key() {
        assert_eq!(SelectOption::new("Shirts", "c1").value_key(), "c1");
        assert_eq!(SelectOption::new("One", 1).value_key(), "1");
    }
}
