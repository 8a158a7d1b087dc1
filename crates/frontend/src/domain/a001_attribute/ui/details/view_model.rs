use super::model::{initial_values, to_payload, ATTRIBUTES_URL};
use crate::shared::api_utils::record_url;
use crate::shared::form::{FieldSchema, FormController};
use crate::shared::hooks::{use_get, use_post, use_put, UseGet, UseMutation};
use crate::shared::notify::{Notifier, ToastService};
use contracts::domain::a001_attribute::aggregate::Attribute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};

fn attribute_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::text("name", "Name").required().placeholder("e.g. Size"),
        FieldSchema::switch("status", "Active"),
        FieldSchema::array(
            "values",
            "Values",
            vec![
                FieldSchema::text("name", "Value").placeholder("e.g. XL"),
                FieldSchema::switch("status", "Active"),
            ],
        ),
    ]
}

#[derive(Clone)]
pub struct AttributeDetailsViewModel {
    pub id: Memo<Option<String>>,
    pub form: FormController,
    pub attribute: UseGet<Attribute>,
    create: UseMutation,
    update: UseMutation,
    toasts: ToastService,
}

impl AttributeDetailsViewModel {
    pub fn new(id: Memo<Option<String>>) -> Self {
        let attribute = use_get::<Attribute>(Signal::derive(move || {
            id.get().map(|id| record_url(ATTRIBUTES_URL, &id))
        }));
        let form = FormController::new(attribute_fields(), Vec::new(), &json!({}));

        Effect::new(move |_| {
            if id.get().is_none() {
                form.reset(&json!({}));
            }
        });
        {
            let attribute = attribute.clone();
            Effect::new(move |_| {
                if let Some(loaded) = attribute.data() {
                    form.reset(&initial_values(&loaded));
                }
            });
        }

        Self {
            id,
            form,
            attribute,
            create: use_post(ATTRIBUTES_URL),
            update: use_put(ATTRIBUTES_URL),
            toasts: expect_context::<ToastService>(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with(Option::is_some)
    }

    pub fn saving(&self) -> Signal<bool> {
        let create = self.create.loading;
        let update = self.update.loading;
        Signal::derive(move || create.get() || update.get())
    }

    pub fn save_command(&self, values: Value, on_saved: Callback<()>) {
        let payload = match to_payload(&values) {
            Ok(p) => p,
            Err(e) => {
                log::error!("attribute form produced an invalid payload: {}", e);
                self.toasts.error(&format!("Invalid attribute data: {}", e));
                return;
            }
        };

        let id = self.id.get_untracked();
        let create = self.create.clone();
        let update = self.update.clone();
        spawn_local(async move {
            let result = match id {
                Some(id) => update.put_data(&payload, Some(&record_url(ATTRIBUTES_URL, &id))).await,
                None => create.post_data(&payload).await,
            };
            if result.is_ok() {
                on_saved.run(());
            }
        });
    }
}
