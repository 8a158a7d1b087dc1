use crate::domain::a001_attribute::ui::details::ATTRIBUTES_URL;
use crate::shared::api_utils::record_url;
use crate::shared::components::PageHeader;
use crate::shared::config::AppConfig;
use crate::shared::data_table::{row_id, ColumnSchema, DataTable, EditPath};
use crate::shared::excel_importer::{read_excel_from_file, ImportColumn, ImportKind, ImportTable};
use crate::shared::export::{download_template, export_rows};
use crate::shared::hooks::{use_delete, use_get, use_post};
use crate::shared::notify::{Notifier, ToastService};
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::domain::a001_attribute::aggregate::AttributeDto;
use contracts::shared::bulk::BulkDeleteRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

const IMPORT_URL: &str = "/api/attributes/import";

fn attribute_columns() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("name", "Name"),
        ColumnSchema::new("values", "Values"),
        ColumnSchema::new("status", "Status").filterable().render(|value, _| {
            let (class, label) = if value.as_bool().unwrap_or(false) {
                ("badge badge--success", "Active")
            } else {
                ("badge badge--muted", "Inactive")
            };
            view! { <span class=class>{label}</span> }.into_any()
        }),
    ]
}

fn import_columns() -> Vec<ImportColumn> {
    vec![
        ImportColumn::new("name", "Name").required(),
        ImportColumn::new("status", "Status").kind(ImportKind::Bool),
    ]
}

/// Imported rows as create payloads; rows that do not decode are skipped
fn imported_attributes(table: &ImportTable) -> Vec<AttributeDto> {
    table
        .rows
        .iter()
        .filter_map(|row| match serde_json::from_value::<AttributeDto>(row.clone()) {
            Ok(dto) => Some(dto),
            Err(e) => {
                log::warn!("Skipping imported row {}: {}", row, e);
                None
            }
        })
        .collect()
}

/// `/attributes`
#[component]
pub fn AttributeList() -> impl IntoView {
    let attributes = use_get::<Vec<Value>>(Some(ATTRIBUTES_URL.to_string()));
    let remove = use_delete(ATTRIBUTES_URL);
    let import = use_post(IMPORT_URL);
    let toasts = expect_context::<ToastService>();

    let rows = {
        let attributes = attributes.clone();
        Signal::derive(move || attributes.data().unwrap_or_default())
    };

    let on_delete = {
        let remove = remove.clone();
        let attributes = attributes.clone();
        Callback::new(move |row: Value| {
            let Some(id) = row_id(&row) else {
                return;
            };
            let remove = remove.clone();
            let attributes = attributes.clone();
            spawn_local(async move {
                if remove.delete_data(Some(&record_url(ATTRIBUTES_URL, &id)), None).await.is_ok() {
                    attributes.refetch();
                }
            });
        })
    };

    let on_bulk_delete = {
        let remove = remove.clone();
        let attributes = attributes.clone();
        Callback::new(move |ids: Vec<String>| {
            let remove = remove.clone();
            let attributes = attributes.clone();
            spawn_local(async move {
                let body = match serde_json::to_value(BulkDeleteRequest::new(ids)) {
                    Ok(body) => body,
                    Err(e) => {
                        log::error!("Failed to encode bulk delete: {}", e);
                        return;
                    }
                };
                if remove.delete_data(None, Some(body)).await.is_ok() {
                    attributes.refetch();
                }
            });
        })
    };

    let on_export = Callback::new(move |rows: Vec<Value>| {
        if let Err(e) = export_rows(&attribute_columns(), &rows, "attributes.csv") {
            toasts.error(&e.to_string());
        }
    });

    let on_template = Callback::new(move |_: ()| {
        let columns: Vec<ColumnSchema> = import_columns()
            .into_iter()
            .map(|c| ColumnSchema::new(c.key, c.header))
            .collect();
        if let Err(e) = download_template(&columns, "attributes-template.csv") {
            toasts.error(&e.to_string());
        }
    });

    let on_import = {
        let import = import.clone();
        let attributes = attributes.clone();
        Callback::new(move |file: web_sys::File| {
            let import = import.clone();
            let attributes = attributes.clone();
            spawn_local(async move {
                let file_name = file.name();
                let table = match read_excel_from_file(file)
                    .await
                    .and_then(|raw| ImportTable::from_raw(raw, &import_columns(), file_name.as_str()))
                {
                    Ok(table) => table,
                    Err(e) => {
                        log::warn!("Import of {} failed: {}", file_name, e);
                        toasts.error(&e.to_string());
                        return;
                    }
                };
                let items = imported_attributes(&table);
                if items.is_empty() {
                    toasts.error("No rows to import");
                    return;
                }
                log::info!("Importing {} attributes from {}", items.len(), table.file_name);
                if import.post_data(&items).await.is_ok() {
                    attributes.refetch();
                }
            });
        })
    };

    let loading = {
        let attributes = attributes.clone();
        Signal::derive(move || attributes.loading())
    };
    let deleting = Signal::derive(move || remove.loading.get());

    view! {
        <PageFrame page_id="a001_attribute--list" category=PageCategory::List>
            <PageHeader title="Attributes">
                {()}
            </PageHeader>

            {
                let attributes = attributes.clone();
                move || attributes.error().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })
            }

            <div class="page__content">
                <DataTable
                    data=rows
                    columns=attribute_columns()
                    items_per_page=AppConfig::get().page_size
                    on_delete=on_delete
                    on_bulk_delete=on_bulk_delete
                    on_export=on_export
                    on_import=on_import
                    download_template=on_template
                    add_path="/attributes/new"
                    edit_path=EditPath::Static("/attributes".to_string())
                    deleting=deleting
                    loading=loading
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imported_rows_become_payloads() {
        let raw = vec![
            vec!["Name".to_string(), "Status".to_string()],
            vec!["Size".to_string(), "yes".to_string()],
            vec!["Color".to_string(), String::new()],
        ];
        let table = ImportTable::from_raw(raw, &import_columns(), "attrs.xlsx").unwrap();
        let items = imported_attributes(&table);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Size");
        assert!(items[0].status);
        assert!(!items[1].status);
        assert!(items[1].values.is_empty());
    }

    #[test]
    fn test_template_columns_follow_import_headers() {
        let headers: Vec<String> = import_columns().into_iter().map(|c| c.header).collect();
        assert_eq!(headers, vec!["Name", "Status"]);
    }
}
