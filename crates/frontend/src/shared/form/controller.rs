use super::field::{check_schema, FieldDispatch, FieldKind, FieldSchema, FormAction, SelectOption};
use super::rules::CrossFieldRule;
use super::state::FormState;
use super::validation::validate;
use crate::shared::notify::Notifier;
use leptos::prelude::*;
use serde_json::Value;

/// Reactive handle on one form: schema, rules and the current values.
///
/// `Copy`, so pages can move it into as many closures as they need.
#[derive(Clone, Copy)]
pub struct FormController {
    state: RwSignal<FormState>,
    fields: RwSignal<Vec<FieldSchema>>,
    rules: StoredValue<Vec<CrossFieldRule>>,
}

impl FormController {
    pub fn new(fields: Vec<FieldSchema>, rules: Vec<CrossFieldRule>, initial: &Value) -> Self {
        if let Err(e) = check_schema(&fields) {
            log::error!("invalid form schema: {}", e);
        }
        Self {
            state: RwSignal::new(FormState::hydrate(&fields, initial)),
            fields: RwSignal::new(fields),
            rules: StoredValue::new(rules),
        }
    }

    /// Rebuild the values for another record
    pub fn reset(&self, initial: &Value) {
        self.fields
            .with_untracked(|fields| self.state.update(|s| s.reset(fields, initial)));
    }

    /// Apply an edit; a rejected edit is reported through `notifier`
    pub fn dispatch(&self, action: FormAction, notifier: &dyn Notifier) {
        let mut outcome = Ok(());
        self.fields.with_untracked(|fields| {
            self.rules.with_value(|rules| {
                self.state.update(|s| outcome = s.apply(fields, rules, action));
            })
        });
        if let Err(e) = outcome {
            notifier.error(&e.to_string());
        }
    }

    /// Dispatcher bound to `key`, for field editors and custom renderers
    pub fn dispatcher<N>(&self, key: impl Into<String>, notifier: N) -> FieldDispatch
    where
        N: Notifier + 'static,
    {
        let form = *self;
        FieldDispatch::new(key, move |action| form.dispatch(action, &notifier))
    }

    /// Snapshot of the values when they pass validation; otherwise the first
    /// problem is reported and `None` returned
    pub fn submit(&self, notifier: &dyn Notifier) -> Option<Value> {
        let outcome = self.fields.with_untracked(|fields| {
            self.rules
                .with_value(|rules| self.state.with_untracked(|s| validate(fields, rules, s.values())))
        });
        match outcome {
            Ok(()) => Some(self.snapshot()),
            Err(e) => {
                log::debug!("form rejected: {}", e);
                notifier.error(&e.to_string());
                None
            }
        }
    }

    /// Current value of `key` (tracked)
    pub fn value(&self, key: &str) -> Value {
        self.state
            .with(|s| s.get(key).cloned())
            .unwrap_or(Value::Null)
    }

    pub fn snapshot(&self) -> Value {
        self.state.with_untracked(|s| s.snapshot())
    }

    /// Schema (tracked: changes when select options arrive)
    pub fn fields(&self) -> Vec<FieldSchema> {
        self.fields.get()
    }

    /// Options of a select field loaded after the form was built. Values
    /// are kept.
    pub fn set_options(&self, key: &str, options: Vec<SelectOption>) {
        self.fields.update(|fields| {
            match fields.iter_mut().find(|f| f.key == key).map(|f| &mut f.kind) {
                Some(FieldKind::Select { options: current }) | Some(FieldKind::MultiSelect { options: current }) => {
                    *current = options;
                }
                _ => log::warn!("`{}` is not a select field", key),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notify::testing::CollectingNotifier;
    use serde_json::json;

    fn product_form() -> FormController {
        FormController::new(
            vec![
                FieldSchema::text("name", "Name").required(),
                FieldSchema::select("category", "Category", vec![SelectOption::new("Shirts", "c1")]).required(),
                FieldSchema::date("startdate", "Start date"),
                FieldSchema::date("enddate", "End date"),
                FieldSchema::new("variations", "Variations", FieldKind::Text),
            ],
            vec![CrossFieldRule::not_after("startdate", "enddate").on_change()],
            &json!({}),
        )
    }

    #[test]
    fn test_submit_reports_missing_category() {
        let owner = Owner::new();
        owner.with(|| {
            let form = product_form();
            let toasts = CollectingNotifier::default();
            form.dispatch(FormAction::set("name", "Tee"), &toasts);

            assert_eq!(form.submit(&toasts), None);
            assert_eq!(toasts.errors().len(), 1);
            assert!(toasts.errors()[0].contains("Category"));
        });
    }

    #[test]
    fn test_submit_returns_snapshot() {
        let owner = Owner::new();
        owner.with(|| {
            let form = product_form();
            let toasts = CollectingNotifier::default();
            form.dispatch(FormAction::set("name", "Tee"), &toasts);
            form.dispatch(FormAction::set("category", "c1"), &toasts);

            let submitted = form.submit(&toasts);

            assert!(toasts.events().is_empty());
            assert_eq!(submitted.as_ref().and_then(|v| v.get("category")), Some(&json!("c1")));
        });
    }

    #[test]
    fn test_rejected_edit_is_toasted() {
        let owner = Owner::new();
        owner.with(|| {
            let form = product_form();
            let toasts = CollectingNotifier::default();
            form.dispatch(FormAction::set("enddate", "2024-01-01"), &toasts);
            form.dispatch(FormAction::set("startdate", "2024-02-01"), &toasts);

            assert_eq!(form.value("startdate"), json!(""));
            assert_eq!(form.value("enddate"), json!("2024-01-01"));
            assert_eq!(toasts.errors(), vec!["Start date cannot be after End date".to_string()]);
        });
    }

    #[test]
    fn test_set_options_keeps_values() {
        let owner = Owner::new();
        owner.with(|| {
            let form = product_form();
            form.dispatch(FormAction::set("category", "c2"), &CollectingNotifier::default());
            form.set_options("category", vec![SelectOption::new("Shoes", "c2")]);

            assert_eq!(form.value("category"), json!("c2"));
            let options = form.fields().into_iter().find_map(|f| match f.kind {
                FieldKind::Select { options } => Some(options),
                _ => None,
            });
            assert_eq!(options, Some(vec![SelectOption::new("Shoes", "c2")]));
        });
    }

    #[test]
    fn test_reset_switches_record() {
        let owner = Owner::new();
        owner.with(|| {
            let form = product_form();
            form.dispatch(FormAction::set("name", "Draft"), &CollectingNotifier::default());
            form.reset(&json!({ "name": "Loaded" }));
            assert_eq!(form.value("name"), json!("Loaded"));
        });
    }
}
