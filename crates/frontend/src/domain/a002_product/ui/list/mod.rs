use crate::domain::a002_product::ui::details::PRODUCTS_URL;
use crate::shared::api::ApiClient;
use crate::shared::api_utils::{record_url, url_with_query};
use crate::shared::components::PageHeader;
use crate::shared::config::AppConfig;
use crate::shared::data_table::{cell_text, row_id, ColumnSchema, DataTable, EditPath, SearchApi};
use crate::shared::export::export_rows;
use crate::shared::hooks::{use_delete, use_get};
use crate::shared::notify::{Notifier, ToastService};
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::shared::bulk::BulkDeleteRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ProductQuery<'a> {
    search: &'a str,
}

fn product_columns() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("name", "Name"),
        ColumnSchema::new("code", "Code"),
        ColumnSchema::new("category.name", "Category").filterable(),
        ColumnSchema::new("price", "Price").render(|value, _| {
            let text = value.as_f64().map(|p| format!("{:.2}", p)).unwrap_or_default();
            view! { <span class="cell--number">{text}</span> }.into_any()
        }),
        ColumnSchema::new("status", "Status").filterable().render(|value, _| {
            let active = value.as_bool().unwrap_or(false);
            let (class, label) = if active {
                ("badge badge--success", "Active")
            } else {
                ("badge badge--muted", "Inactive")
            };
            view! { <span class=class>{label}</span> }.into_any()
        }),
    ]
}

/// Row whose code equals the scanned term exactly
fn exact_code_match(rows: &[Value], term: &str) -> Option<String> {
    let mut matches = rows
        .iter()
        .filter(|row| row.get("code").and_then(cell_text).as_deref() == Some(term));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    row_id(first)
}

/// `/products`
#[component]
pub fn ProductList() -> impl IntoView {
    let query = RwSignal::new(None::<String>);
    let products = use_get::<Vec<Value>>(Signal::derive(move || {
        Some(match query.get() {
            Some(term) => url_with_query(PRODUCTS_URL, &ProductQuery { search: &term }),
            None => PRODUCTS_URL.to_string(),
        })
    }));
    let remove = use_delete(PRODUCTS_URL);
    let client = expect_context::<ApiClient>();
    let toasts = expect_context::<ToastService>();
    let navigate = StoredValue::new_local(use_navigate());

    let rows = {
        let products = products.clone();
        Signal::derive(move || products.data().unwrap_or_default())
    };

    // Enter in the search box: an exact code hit opens the product (scanner flow),
    // anything else becomes a server-side search
    let search_api: SearchApi = Arc::new(move |term: String| -> Pin<Box<dyn Future<Output = bool>>> {
        let client = client.clone();
        Box::pin(async move {
            let term = term.trim().to_string();
            if term.is_empty() {
                query.set(None);
                return false;
            }
            let url = url_with_query(PRODUCTS_URL, &ProductQuery { search: &term });
            match client.get_as::<Vec<Value>>(&url).await {
                Ok(found) => {
                    if let Some(id) = exact_code_match(&found, &term) {
                        log::debug!("Barcode {} matched product {}", term, id);
                        navigate.with_value(|nav| nav(&record_url("/products", &id), Default::default()));
                        return true;
                    }
                    query.set(Some(term));
                    false
                }
                Err(e) => {
                    log::warn!("Product search failed: {}", e);
                    false
                }
            }
        })
    });

    let on_delete = {
        let remove = remove.clone();
        let products = products.clone();
        Callback::new(move |row: Value| {
            let Some(id) = row_id(&row) else {
                return;
            };
            let remove = remove.clone();
            let products = products.clone();
            spawn_local(async move {
                if remove.delete_data(Some(&record_url(PRODUCTS_URL, &id)), None).await.is_ok() {
                    products.refetch();
                }
            });
        })
    };

    let on_bulk_delete = {
        let remove = remove.clone();
        let products = products.clone();
        Callback::new(move |ids: Vec<String>| {
            let remove = remove.clone();
            let products = products.clone();
            spawn_local(async move {
                let body = match serde_json::to_value(BulkDeleteRequest::new(ids)) {
                    Ok(body) => body,
                    Err(e) => {
                        log::error!("Failed to encode bulk delete: {}", e);
                        return;
                    }
                };
                if remove.delete_data(None, Some(body)).await.is_ok() {
                    products.refetch();
                }
            });
        })
    };

    let on_export = Callback::new(move |rows: Vec<Value>| {
        if let Err(e) = export_rows(&product_columns(), &rows, "products.csv") {
            toasts.error(&e.to_string());
        }
    });

    let loading = {
        let products = products.clone();
        Signal::derive(move || products.loading())
    };
    let deleting = Signal::derive(move || remove.loading.get());

    view! {
        <PageFrame page_id="a002_product--list" category=PageCategory::List>
            <PageHeader title="Products" subtitle="Scan a barcode or search by name".to_string()>
                {()}
            </PageHeader>

            {
                let products = products.clone();
                move || products.error().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })
            }

            <div class="page__content">
                <DataTable
                    data=rows
                    columns=product_columns()
                    items_per_page=AppConfig::get().page_size
                    on_delete=on_delete
                    on_bulk_delete=on_bulk_delete
                    on_export=on_export
                    on_search_api=search_api
                    add_path="/products/new"
                    edit_path=EditPath::Static("/products".to_string())
                    deleting=deleting
                    loading=loading
                />
            </div>
        </PageFrame>
    }
}
