use super::model::{
    category_options, initial_values, to_payload, CATEGORIES_URL, PRODUCTS_URL, VARIANTS_KEY, VARIATIONS_URL,
};
use super::variant_matrix::VariantMatrix;
use crate::shared::api_utils::record_url;
use crate::shared::form::{CrossFieldRule, FieldKind, FieldSchema, FormController};
use crate::shared::hooks::{use_get, use_post, use_put, UseGet, UseMutation};
use crate::shared::notify::{Notifier, ToastService};
use contracts::domain::a002_product::aggregate::{CategoryDto, Product, VariationDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};

fn product_fields(catalogue: Signal<Vec<VariationDto>>) -> Vec<FieldSchema> {
    vec![
        FieldSchema::text("name", "Name").required().placeholder("Product name"),
        FieldSchema::text("code", "Code").placeholder("SKU or barcode"),
        FieldSchema::select("category", "Category", Vec::new()).required(),
        FieldSchema::number("price", "Price").required(),
        FieldSchema::new("image", "Image", FieldKind::Image),
        FieldSchema::switch("status", "Active"),
        FieldSchema::date("startdate", "Available from"),
        FieldSchema::date("enddate", "Available until"),
        FieldSchema::custom(VARIANTS_KEY, "Variations", move |value, dispatch| {
            view! { <VariantMatrix value=value dispatch=dispatch catalogue=catalogue /> }.into_any()
        }),
    ]
}

fn product_rules() -> Vec<CrossFieldRule> {
    vec![CrossFieldRule::not_after("startdate", "enddate").on_change()]
}

/// State and commands of the product create/edit page
#[derive(Clone)]
pub struct ProductDetailsViewModel {
    pub id: Memo<Option<String>>,
    pub form: FormController,
    pub product: UseGet<Product>,
    pub categories: UseGet<Vec<CategoryDto>>,
    pub variations: UseGet<Vec<VariationDto>>,
    create: UseMutation,
    update: UseMutation,
    toasts: ToastService,
}

impl ProductDetailsViewModel {
    pub fn new(id: Memo<Option<String>>) -> Self {
        let product = use_get::<Product>(Signal::derive(move || {
            id.get().map(|id| record_url(PRODUCTS_URL, &id))
        }));
        let categories = use_get::<Vec<CategoryDto>>(Some(CATEGORIES_URL.to_string()));
        let variations = use_get::<Vec<VariationDto>>(Some(VARIATIONS_URL.to_string()));

        let catalogue = {
            let variations = variations.clone();
            Signal::derive(move || variations.data().unwrap_or_default())
        };
        let form = FormController::new(product_fields(catalogue), product_rules(), &json!({}));

        // switching records (or to "new") rebuilds the form explicitly
        Effect::new(move |_| {
            if id.get().is_none() {
                form.reset(&json!({}));
            }
        });
        {
            let product = product.clone();
            Effect::new(move |_| {
                if let Some(loaded) = product.data() {
                    form.reset(&initial_values(&loaded));
                }
            });
        }
        {
            let categories = categories.clone();
            Effect::new(move |_| {
                if let Some(list) = categories.data() {
                    form.set_options("category", category_options(&list));
                }
            });
        }

        Self {
            id,
            form,
            product,
            categories,
            variations,
            create: use_post(PRODUCTS_URL),
            update: use_put(PRODUCTS_URL),
            toasts: expect_context::<ToastService>(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with(Option::is_some)
    }

    pub fn loading(&self) -> bool {
        self.product.loading()
    }

    /// First load error of the record or its lookups
    pub fn error(&self) -> Option<String> {
        self.product
            .error()
            .or_else(|| self.categories.error())
            .or_else(|| self.variations.error())
    }

    pub fn saving(&self) -> Signal<bool> {
        let create = self.create.loading;
        let update = self.update.loading;
        Signal::derive(move || create.get() || update.get())
    }

    /// POST a new product or PUT the edited one; `on_saved` runs only on success
    pub fn save_command(&self, values: Value, on_saved: Callback<()>) {
        let payload = match to_payload(&values) {
            Ok(p) => p,
            Err(e) => {
                log::error!("product form produced an invalid payload: {}", e);
                self.toasts.error(&format!("Invalid product data: {}", e));
                return;
            }
        };

        let id = self.id.get_untracked();
        let create = self.create.clone();
        let update = self.update.clone();
        spawn_local(async move {
            let result = match id {
                Some(id) => update.put_data(&payload, Some(&record_url(PRODUCTS_URL, &id))).await,
                None => create.post_data(&payload).await,
            };
            if result.is_ok() {
                on_saved.run(());
            }
        });
    }
}
