use super::controller::FormController;
use super::field::{option_key, FieldKind, FieldSchema, FormAction, SelectOption};
use super::image::{preview_src, read_image_file};
use crate::shared::icons::icon;
use crate::shared::notify::{Notifier, ToastService};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;
use wasm_bindgen::JsCast;

/// Text shown in an input for a stored value
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Number inputs store numbers; a cleared input stores `""`
fn number_value(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn selected_option(options: &[SelectOption], key: &str) -> Value {
    options
        .iter()
        .find(|o| o.value_key() == key)
        .map(|o| o.value.clone())
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Editor of one non-list value, shared by top-level fields and array cells
fn value_input(
    kind: FieldKind,
    value: Signal<Value>,
    on_set: Callback<Value>,
    placeholder: String,
    disabled: bool,
    toasts: ToastService,
) -> AnyView {
    let input_type = match &kind {
        FieldKind::Number => "number",
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Date => "date",
        _ => "text",
    };
    let kind_name = kind.name();
    let check_class = if matches!(kind, FieldKind::Switch) { "form__switch" } else { "form__checkbox" };

    match kind {
        FieldKind::Textarea => view! {
            <textarea
                class="form__textarea"
                rows="4"
                placeholder=placeholder
                disabled=disabled
                prop:value=move || value.with(text_of)
                on:input=move |ev| on_set.run(Value::String(event_target_value(&ev)))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select { options } => {
            let choices = options.clone();
            view! {
                <select
                    class="form__select"
                    disabled=disabled
                    prop:value=move || value.with(option_key)
                    on:change=move |ev| on_set.run(selected_option(&options, &event_target_value(&ev)))
                >
                    <option value="">{if placeholder.is_empty() { "Select...".to_string() } else { placeholder }}</option>
                    {choices.into_iter().map(|o| {
                        let key = o.value_key();
                        let key_for_selected = key.clone();
                        view! {
                            <option
                                value=key
                                selected=move || value.with(option_key) == key_for_selected
                            >
                                {o.label}
                            </option>
                        }
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::MultiSelect { options } => view! {
            <div class="form__multiselect">
                {options.into_iter().map(|o| {
                    let option_value = o.value.clone();
                    let option_value_for_check = o.value.clone();
                    view! {
                        <label class="form__multiselect-option">
                            <input
                                type="checkbox"
                                disabled=disabled
                                prop:checked=move || value.with(|v| {
                                    v.as_array().map(|a| a.contains(&option_value_for_check)).unwrap_or(false)
                                })
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    let mut chosen = value.with_untracked(|v| v.as_array().cloned().unwrap_or_default());
                                    chosen.retain(|v| v != &option_value);
                                    if checked {
                                        chosen.push(option_value.clone());
                                    }
                                    on_set.run(Value::Array(chosen));
                                }
                            />
                            {o.label}
                        </label>
                    }
                }).collect_view()}
            </div>
        }
        .into_any(),
        FieldKind::Switch | FieldKind::Checkbox => {
            view! {
                <input
                    type="checkbox"
                    class=check_class
                    disabled=disabled
                    prop:checked=move || value.with(|v| v.as_bool().unwrap_or(false))
                    on:change=move |ev| on_set.run(Value::Bool(event_target_checked(&ev)))
                />
            }
            .into_any()
        }
        FieldKind::Image => {
            let on_file = move |ev: leptos::ev::Event| {
                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                input.set_value("");
                spawn_local(async move {
                    match read_image_file(file).await {
                        Ok(data_url) => on_set.run(Value::String(data_url)),
                        Err(e) => toasts.error(&e.to_string()),
                    }
                });
            };
            view! {
                <div class="form__image">
                    {move || {
                        let src = value.with(text_of);
                        (!src.is_empty()).then(|| view! {
                            <div class="form__image-preview">
                                <img src=preview_src(&src) alt="" />
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    disabled=disabled
                                    on_click=move |_| on_set.run(Value::String(String::new()))
                                >
                                    {icon("x")}
                                </Button>
                            </div>
                        })
                    }}
                    <input
                        type="file"
                        accept="image/jpeg,image/png,image/gif,image/webp"
                        disabled=disabled
                        on:change=on_file
                    />
                </div>
            }
            .into_any()
        }
        FieldKind::Number => view! {
            <input
                type=input_type
                class="form__input"
                step="any"
                placeholder=placeholder
                disabled=disabled
                prop:value=move || value.with(text_of)
                on:input=move |ev| on_set.run(number_value(&event_target_value(&ev)))
            />
        }
        .into_any(),
        FieldKind::Array { .. } | FieldKind::Custom { .. } => {
            log::warn!("{} field cannot be edited as a single value", kind_name);
            ().into_any()
        }
        _ => view! {
            <input
                type=input_type
                class="form__input"
                placeholder=placeholder
                disabled=disabled
                prop:value=move || value.with(text_of)
                on:input=move |ev| on_set.run(Value::String(event_target_value(&ev)))
            />
        }
        .into_any(),
    }
}

/// Rows of an `Array` field: one line per sub-record plus add/remove
fn array_editor(form: FormController, field: FieldSchema, toasts: ToastService) -> AnyView {
    let FieldKind::Array { sub_fields } = field.kind.clone() else {
        return ().into_any();
    };
    let key = field.key.clone();
    let disabled = field.disabled;
    let dispatch = form.dispatcher(key.clone(), toasts);
    let dispatch_add = dispatch.clone();
    let sub_fields = StoredValue::new(sub_fields);
    let row_count = Memo::new(move |_| {
        form.value(&key).as_array().map(Vec::len).unwrap_or(0)
    });
    let list_key = StoredValue::new(field.key.clone());

    view! {
        <div class="form__array">
            <table class="form__array-table">
                <thead>
                    <tr>
                        {sub_fields.with_value(|subs| subs.iter().map(|s| view! { <th>{s.label.clone()}</th> }).collect_view())}
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || 0..row_count.get()
                        key=|index| *index
                        children=move |index| {
                            let dispatch_remove = dispatch.clone();
                            let cells = sub_fields.with_value(|subs| {
                                subs.iter().map(|sub| {
                                    let sub_key = sub.key.clone();
                                    let dispatch_cell = dispatch.clone();
                                    let cell_value = Signal::derive({
                                        let sub_key = sub_key.clone();
                                        move || {
                                            list_key.with_value(|k| form.value(k))
                                                .get(index)
                                                .and_then(|row| row.get(&sub_key))
                                                .cloned()
                                                .unwrap_or(Value::Null)
                                        }
                                    });
                                    let on_set = Callback::new(move |v: Value| dispatch_cell.set_cell(index, sub_key.clone(), v));
                                    view! {
                                        <td>
                                            {value_input(
                                                sub.kind.clone(),
                                                cell_value,
                                                on_set,
                                                sub.placeholder.clone().unwrap_or_default(),
                                                disabled || sub.disabled,
                                                toasts,
                                            )}
                                        </td>
                                    }
                                }).collect_view()
                            });
                            view! {
                                <tr>
                                    {cells}
                                    <td>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            disabled=disabled
                                            on_click=move |_| dispatch_remove.remove_row(index)
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                disabled=disabled
                on_click=move |_| dispatch_add.add_row()
            >
                {icon("plus")}
                "Add row"
            </Button>
        </div>
    }
    .into_any()
}

fn field_view(form: FormController, field: FieldSchema, toasts: ToastService) -> AnyView {
    let label = field.label.clone();
    let required = field.required;
    let editor = match &field.kind {
        FieldKind::Array { .. } => array_editor(form, field.clone(), toasts),
        FieldKind::Custom { render } => {
            let key = field.key.clone();
            let value = Signal::derive(move || form.value(&key));
            render(value, form.dispatcher(field.key.clone(), toasts))
        }
        kind => {
            let key = field.key.clone();
            let value_key = key.clone();
            let value = Signal::derive(move || form.value(&value_key));
            let on_set = Callback::new(move |v: Value| form.dispatch(FormAction::Set { key: key.clone(), value: v }, &toasts));
            value_input(
                kind.clone(),
                value,
                on_set,
                field.placeholder.clone().unwrap_or_default(),
                field.disabled,
                toasts,
            )
        }
    };

    view! {
        <div class="form__group" class:form__group--wide=matches!(field.kind, FieldKind::Array { .. } | FieldKind::Custom { .. })>
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {editor}
        </div>
    }
    .into_any()
}

/// Schema-driven create/edit form.
///
/// Validates on submit and hands the values to `on_submit`; it never talks to
/// the network itself.
#[component]
pub fn AddPage(
    form: FormController,

    on_submit: Callback<Value>,

    on_cancel: Callback<()>,

    /// Submission in flight
    #[prop(optional, into)]
    loading: MaybeProp<bool>,

    #[prop(optional, into)]
    submit_button_text: Option<String>,
) -> impl IntoView {
    let toasts = expect_context::<ToastService>();
    let submit_text = submit_button_text.unwrap_or_else(|| "Save".to_string());
    let loading = Signal::derive(move || loading.get().unwrap_or(false));

    let handle_submit = move || {
        if loading.get_untracked() {
            return;
        }
        if let Some(data) = form.submit(&toasts) {
            on_submit.run(data);
        }
    };

    view! {
        <div class="form">
            <div class="form__fields">
                {move || form.fields().into_iter().map(|field| field_view(form, field, toasts)).collect_view()}
            </div>
            <div class="form__actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=loading
                    on_click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=loading
                    on_click=move |_| handle_submit()
                >
                    {move || if loading.get() { "Saving...".to_string() } else { submit_text.clone() }}
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(""), json!(""));
        assert_eq!(number_value(" 12 "), json!(12));
        assert_eq!(number_value("12.5"), json!(12.5));
        assert_eq!(number_value("1e"), json!("1e"));
    }

    #[test]
    fn test_text_of() {
        assert_eq!(text_of(&json!(null)), "");
        assert_eq!(text_of(&json!("a")), "a");
        assert_eq!(text_of(&json!(3)), "3");
    }

    #[test]
    fn test_selected_option_keeps_value_type() {
        let options = vec![SelectOption::new("One", 1), SelectOption::new("Two", "two")];
        assert_eq!(selected_option(&options, "1"), json!(1));
        assert_eq!(selected_option(&options, "two"), json!("two"));
        assert_eq!(selected_option(&options, ""), json!(""));
    }
}
