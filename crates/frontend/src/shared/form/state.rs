use super::field::{FieldSchema, FormAction};
use super::rules::CrossFieldRule;
use super::validation::ValidationError;
use serde_json::{Map, Value};

/// Values of one form, keyed by field key.
///
/// Built from the schema and the initial record; after that only
/// [`FormAction`]s change it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: Map<String, Value>,
}

impl FormState {
    /// Lists are coerced to arrays. A missing key falls back to the kind's
    /// default; a key present with `null` keeps the `null`.
    pub fn hydrate(fields: &[FieldSchema], initial: &Value) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let given = initial.get(&field.key);
                let value = match (&field.kind, given) {
                    (kind, Some(Value::Array(items))) if kind.is_list() => Value::Array(items.clone()),
                    (kind, _) if kind.is_list() => Value::Array(Vec::new()),
                    (_, Some(v)) => v.clone(),
                    (kind, None) => kind.default_value(),
                };
                (field.key.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Replace everything, e.g. when the edited record changes
    pub fn reset(&mut self, fields: &[FieldSchema], initial: &Value) {
        *self = Self::hydrate(fields, initial);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Apply an edit and the follow-ups of the field's change hook.
    ///
    /// An edit that breaks an edit-time rule is rejected: the edited field is
    /// emptied and the rule's error returned.
    pub fn apply(
        &mut self,
        fields: &[FieldSchema],
        rules: &[CrossFieldRule],
        action: FormAction,
    ) -> Result<(), ValidationError> {
        let Some(field) = fields.iter().find(|f| f.key == action.key()) else {
            log::warn!("form action for unknown field `{}`", action.key());
            return Ok(());
        };

        match action {
            FormAction::Set { key, value } => {
                self.values.insert(key.clone(), value.clone());

                if let Some(rule) = rules
                    .iter()
                    .find(|r| r.on_change && r.involves(&key) && r.is_violated(&self.values))
                {
                    self.values.insert(key, Value::String(String::new()));
                    return Err(ValidationError::range_inverted(rule, fields));
                }

                if let Some(hook) = &field.on_change {
                    for follow_up in hook(&value) {
                        self.apply_plain(fields, follow_up);
                    }
                }
            }
            other => self.apply_plain(fields, other),
        }
        Ok(())
    }

    /// Edit without hooks or rules
    fn apply_plain(&mut self, fields: &[FieldSchema], action: FormAction) {
        match action {
            FormAction::Set { key, value } => {
                self.values.insert(key, value);
            }
            FormAction::AddRow { key } => {
                let Some(field) = fields.iter().find(|f| f.key == key) else {
                    return;
                };
                let row = field.blank_row();
                if let Some(rows) = self.rows_mut(&key) {
                    rows.push(row);
                }
            }
            FormAction::RemoveRow { key, index } => {
                if let Some(rows) = self.rows_mut(&key) {
                    if index < rows.len() {
                        rows.remove(index);
                    }
                }
            }
            FormAction::SetCell {
                key,
                index,
                sub_key,
                value,
            } => {
                if let Some(Value::Object(row)) = self.rows_mut(&key).and_then(|rows| rows.get_mut(index)) {
                    row.insert(sub_key, value);
                }
            }
        }
    }

    /// Rows of a list field; a non-array value is replaced by `[]`
    fn rows_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        let slot = self.values.entry(key.to_string()).or_insert(Value::Null);
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        slot.as_array_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::field::{FieldKind, SelectOption};
    use serde_json::json;

    fn attribute_fields() -> Vec<FieldSchema> {
        vec![
            FieldSchema::text("name", "Name").required(),
            FieldSchema::switch("status", "Active"),
            FieldSchema::new("tags", "Tags", FieldKind::MultiSelect { options: vec![] }),
            FieldSchema::array(
                "values",
                "Values",
                vec![FieldSchema::text("name", "Value"), FieldSchema::switch("status", "Active")],
            ),
        ]
    }

    #[test]
    fn test_hydrate_defaults() {
        let state = FormState::hydrate(&attribute_fields(), &json!({}));
        assert_eq!(
            state.snapshot(),
            json!({ "name": "", "status": false, "tags": [], "values": [] })
        );
    }

    #[test]
    fn test_hydrate_coerces_lists_and_keeps_values() {
        let initial = json!({
            "name": "Size",
            "status": true,
            "tags": "oops",
            "values": [{ "name": "S", "status": true }],
            "_id": "ignored"
        });
        let state = FormState::hydrate(&attribute_fields(), &initial);
        assert_eq!(state.get("name"), Some(&json!("Size")));
        assert_eq!(state.get("tags"), Some(&json!([])));
        assert_eq!(state.get("values"), Some(&json!([{ "name": "S", "status": true }])));
        assert_eq!(state.get("_id"), None);
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let fields = attribute_fields();
        let initial = json!({ "name": "Color", "tags": null, "values": [{ "name": "Red", "status": true }] });
        let once = FormState::hydrate(&fields, &initial);
        let twice = FormState::hydrate(&fields, &initial);
        assert_eq!(once, twice);
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_hydrate_keeps_explicit_null() {
        let fields = attribute_fields();
        let state = FormState::hydrate(&fields, &json!({ "name": null, "status": null, "tags": null }));
        assert_eq!(state.get("name"), Some(&Value::Null));
        assert_eq!(state.get("status"), Some(&Value::Null));
        assert_eq!(state.get("tags"), Some(&json!([])));
        assert_eq!(state.get("values"), Some(&json!([])));
    }

    #[test]
    fn test_reset_discards_edits() {
        let fields = attribute_fields();
        let mut state = FormState::hydrate(&fields, &json!({ "name": "Size" }));
        state.apply(&fields, &[], FormAction::set("name", "Edited")).unwrap();

        state.reset(&fields, &json!({ "name": "Color" }));

        assert_eq!(state.get("name"), Some(&json!("Color")));
    }

    #[test]
    fn test_array_rows_add_edit_remove() {
        let fields = attribute_fields();
        let mut state = FormState::hydrate(&fields, &json!({}));

        state.apply(&fields, &[], FormAction::AddRow { key: "values".into() }).unwrap();
        state.apply(&fields, &[], FormAction::AddRow { key: "values".into() }).unwrap();
        state
            .apply(
                &fields,
                &[],
                FormAction::SetCell {
                    key: "values".into(),
                    index: 1,
                    sub_key: "name".into(),
                    value: json!("XL"),
                },
            )
            .unwrap();
        assert_eq!(
            state.get("values"),
            Some(&json!([{ "name": "", "status": false }, { "name": "XL", "status": false }]))
        );

        state
            .apply(&fields, &[], FormAction::RemoveRow { key: "values".into(), index: 0 })
            .unwrap();
        assert_eq!(state.get("values"), Some(&json!([{ "name": "XL", "status": false }])));

        state
            .apply(&fields, &[], FormAction::RemoveRow { key: "values".into(), index: 7 })
            .unwrap();
        assert_eq!(state.get("values").and_then(Value::as_array).map(Vec::len), Some(1));
    }

    #[test]
    fn test_change_hook_clears_dependent_field() {
        let fields = vec![
            FieldSchema::select("country", "Country", vec![SelectOption::new("France", "fr")])
                .on_change(|_| vec![FormAction::set("city", "")]),
            FieldSchema::text("city", "City"),
        ];
        let mut state = FormState::hydrate(&fields, &json!({ "country": "de", "city": "Berlin" }));

        state.apply(&fields, &[], FormAction::set("country", "fr")).unwrap();

        assert_eq!(state.get("country"), Some(&json!("fr")));
        assert_eq!(state.get("city"), Some(&json!("")));
    }

    #[test]
    fn test_edit_time_rule_rejects_inverted_range() {
        let fields = vec![FieldSchema::date("startdate", "Start date"), FieldSchema::date("enddate", "End date")];
        let rules = vec![CrossFieldRule::not_after("startdate", "enddate").on_change()];
        let mut state = FormState::hydrate(&fields, &json!({ "startdate": "2024-05-10" }));

        let err = state
            .apply(&fields, &rules, FormAction::set("enddate", "2024-05-01"))
            .unwrap_err();

        assert_eq!(err.to_string(), "Start date cannot be after End date");
        assert_eq!(state.get("enddate"), Some(&json!("")));
        assert_eq!(state.get("startdate"), Some(&json!("2024-05-10")));

        state
            .apply(&fields, &rules, FormAction::set("enddate", "2024-05-20"))
            .unwrap();
        assert_eq!(state.get("enddate"), Some(&json!("2024-05-20")));
    }

    #[test]
    fn test_submit_only_rule_does_not_block_edits() {
        let fields = vec![FieldSchema::date("from", "From"), FieldSchema::date("to", "To")];
        let rules = vec![CrossFieldRule::not_after("from", "to")];
        let mut state = FormState::hydrate(&fields, &json!({ "from": "2024-05-10" }));

        assert!(state.apply(&fields, &rules, FormAction::set("to", "2024-05-01")).is_ok());
        assert_eq!(state.get("to"), Some(&json!("2024-05-01")));
    }
}
