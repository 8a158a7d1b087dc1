use super::actions::{ActionTarget, EditPath};
use super::cell::{fallback_cell, field_value, row_id};
use super::column::ColumnSchema;
use super::filter::distinct_values;
use super::pagination::PAGE_SIZE_OPTIONS;
use super::state::TableState;
use crate::shared::components::{PaginationControls, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thaw::*;
use wasm_bindgen::JsCast;

/// Server-side search hook. Resolves to `true` when the term was consumed
/// (a barcode matched), which clears the search box for the next scan.
pub type SearchApi = Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = bool>>> + Send + Sync>;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Searchable, filterable, paginated table over already-fetched rows.
///
/// The table never fetches or deletes on its own: every mutation goes
/// through the callbacks and the caller refetches `data`.
#[component]
pub fn DataTable(
    #[prop(into)]
    data: Signal<Vec<Value>>,

    columns: Vec<ColumnSchema>,

    #[prop(default = true)]
    searchable: bool,

    /// Show dropdown filters for columns marked `filterable`
    #[prop(default = true)]
    filterable: bool,

    /// Edit/delete buttons per row and the selection checkboxes
    #[prop(default = true)]
    show_actions: bool,

    #[prop(default = 10)]
    items_per_page: usize,

    #[prop(optional)]
    on_add: Option<Callback<()>>,

    #[prop(optional)]
    on_edit: Option<Callback<Value>>,

    #[prop(optional)]
    on_delete: Option<Callback<Value>>,

    /// Receives the selected row ids
    #[prop(optional)]
    on_bulk_delete: Option<Callback<Vec<String>>>,

    /// Receives the rows left after search and filters
    #[prop(optional)]
    on_export: Option<Callback<Vec<Value>>>,

    #[prop(optional)]
    on_import: Option<Callback<web_sys::File>>,

    #[prop(optional)]
    download_template: Option<Callback<()>>,

    /// Delegate search to the backend; local text filtering is then off
    #[prop(optional)]
    on_search_api: Option<SearchApi>,

    /// Route for "add"; takes precedence over `on_add`
    #[prop(optional, into)]
    add_path: Option<String>,

    /// Route for "edit"; takes precedence over `on_edit`
    #[prop(optional)]
    edit_path: Option<EditPath>,

    /// A delete is in flight; delete buttons are disabled
    #[prop(optional, into)]
    deleting: MaybeProp<bool>,

    #[prop(optional, into)]
    loading: MaybeProp<bool>,
) -> impl IntoView {
    let table = RwSignal::new(TableState::new(items_per_page, on_search_api.is_some()));
    let columns = StoredValue::new(columns);
    let navigate = StoredValue::new_local(use_navigate());
    let add_path = StoredValue::new(add_path);
    let edit_path = StoredValue::new(edit_path);
    let search_api = StoredValue::new(on_search_api);
    let deleting = Signal::derive(move || deleting.get().unwrap_or(false));
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    // new rows (refetch after a mutation) prune stale selection and clamp the page
    Effect::new(move |_| {
        let loading = loading.get().unwrap_or(false);
        data.with(|rows| table.update(|t| t.sync_loaded(rows, loading)));
    });

    let view_state = Memo::new(move |_| data.with(|rows| table.with(|t| t.view(rows))));

    let go = move |path: String| {
        navigate.with_value(|nav| nav(&path, Default::default()));
    };

    let handle_add = move || {
        let target = add_path.with_value(|p| ActionTarget::for_add(p.as_deref(), on_add.is_some()));
        match target {
            ActionTarget::Navigate(path) => go(path),
            ActionTarget::Callback => {
                if let Some(cb) = on_add {
                    cb.run(());
                }
            }
            ActionTarget::Unavailable => {}
        }
    };
    let can_add = add_path.with_value(|p| p.is_some()) || on_add.is_some();

    let handle_edit = move |row: Value| {
        let target = edit_path.with_value(|p| ActionTarget::for_edit(p.as_ref(), on_edit.is_some(), &row));
        match target {
            ActionTarget::Navigate(path) => go(path),
            ActionTarget::Callback => {
                if let Some(cb) = on_edit {
                    cb.run(row);
                }
            }
            ActionTarget::Unavailable => {}
        }
    };
    let can_edit = edit_path.with_value(|p| p.is_some()) || on_edit.is_some();

    let handle_delete = move |row: Value| {
        if let Some(cb) = on_delete {
            if confirm("Delete this item?") {
                cb.run(row);
            }
        }
    };

    let handle_bulk_delete = move || {
        let ids = table.with_untracked(|t| t.selected_ids());
        if ids.is_empty() {
            return;
        }
        if let Some(cb) = on_bulk_delete {
            if confirm(&format!("Delete {} selected items?", ids.len())) {
                cb.run(ids);
            }
        }
    };

    let on_search_input = move |ev: leptos::ev::Event| {
        let term = event_target_value(&ev);
        data.with_untracked(|rows| table.update(|t| t.set_search(term, rows)));
    };

    let on_search_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let Some(api) = search_api.get_value() else {
            return;
        };
        let term = table.with_untracked(|t| t.search.clone());
        spawn_local(async move {
            if api(term).await {
                data.with_untracked(|rows| {
                    let _ = table.try_update(|t| t.set_search(String::new(), rows));
                });
            }
        });
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let (Some(cb), Some(file)) = (on_import, input.files().and_then(|files| files.get(0))) {
            cb.run(file);
        }
        // same file can be picked again
        input.set_value("");
    };

    let filter_selects = move || {
        if !filterable {
            return None;
        }
        let selects = columns.with_value(|cols| {
            cols.iter()
                .filter(|c| c.filterable)
                .map(|col| {
                    let key = col.key.clone();
                    let key_for_change = key.clone();
                    let key_for_value = key.clone();
                    let header = col.header.clone();
                    let options = move || data.with(|rows| distinct_values(rows, &key));
                    view! {
                        <select
                            class="data-table__filter"
                            prop:value=move || {
                                table.with(|t| t.column_filters.get(&key_for_value).cloned().unwrap_or_default())
                            }
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                data.with_untracked(|rows| {
                                    table.update(|t| t.set_column_filter(&key_for_change, Some(value), rows))
                                });
                            }
                        >
                            <option value="">{format!("All: {}", header)}</option>
                            {move || options().into_iter().map(|v| view! {
                                <option value=v.clone()>{v.clone()}</option>
                            }).collect_view()}
                        </select>
                    }
                })
                .collect_view()
        });
        Some(selects)
    };

    let header_cells = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|col| {
                    let header = col.header.clone();
                    view! { <TableHeaderCell>{header}</TableHeaderCell> }
                })
                .collect_view()
        })
    };

    let render_row = move |row: Value| {
        let id = row_id(&row).unwrap_or_default();
        let id_for_check = id.clone();
        let cells = columns.with_value(|cols| {
            cols.iter()
                .map(|col| {
                    let value = field_value(&row, &col.key);
                    let content = match &col.render {
                        Some(render) => render(value.unwrap_or(&Value::Null), &row),
                        None => fallback_cell(value).into_any(),
                    };
                    view! {
                        <TableCell>
                            <TableCellLayout>{content}</TableCellLayout>
                        </TableCell>
                    }
                })
                .collect_view()
        });
        let row_for_edit = row.clone();
        let row_for_delete = row.clone();

        view! {
            <TableRow>
                {show_actions.then(|| view! {
                    <TableCellCheckbox
                        checked=Signal::derive(move || table.with(|t| t.selection.contains(&id_for_check)))
                        on_change=Callback::new(move |checked| table.update(|t| t.toggle_row(&id, checked)))
                    />
                })}
                {cells}
                {show_actions.then(|| view! {
                    <TableCell class="data-table__actions">
                        {can_edit.then(|| {
                            let row = row_for_edit.clone();
                            view! {
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| handle_edit(row.clone())
                                >
                                    {icon("edit")}
                                </Button>
                            }
                        })}
                        {on_delete.is_some().then(|| {
                            let row = row_for_delete.clone();
                            view! {
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    disabled=deleting
                                    on_click=move |_| handle_delete(row.clone())
                                >
                                    {icon("delete")}
                                </Button>
                            }
                        })}
                    </TableCell>
                })}
            </TableRow>
        }
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    {searchable.then(|| view! {
                        <div class="data-table__search">
                            {icon("search")}
                            <input
                                type="text"
                                class="form__input"
                                placeholder="Search..."
                                prop:value=move || table.with(|t| t.search.clone())
                                on:input=on_search_input
                                on:keydown=on_search_keydown
                            />
                        </div>
                    })}
                    {filter_selects}
                    <Show when=move || table.with(|t| t.has_active_filters())>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| table.update(|t| t.reset_filters())
                        >
                            {icon("x")}
                            "Reset"
                        </Button>
                    </Show>
                </Flex>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Show when=move || !table.with(|t| t.selection.is_empty())>
                        <span class="data-table__selected">
                            {move || format!("Selected: {}", table.with(|t| t.selection.len()))}
                        </span>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| table.update(|t| t.clear_selection())
                        >
                            "Clear"
                        </Button>
                        {on_bulk_delete.is_some().then(|| view! {
                            <Button
                                appearance=ButtonAppearance::Secondary
                                disabled=deleting
                                on_click=move |_| handle_bulk_delete()
                            >
                                {icon("delete")}
                                {move || format!("Delete ({})", table.with(|t| t.selection.len()))}
                            </Button>
                        })}
                    </Show>
                    {download_template.map(|cb| view! {
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| cb.run(())>
                            {icon("download")}
                            "Template"
                        </Button>
                    })}
                    {on_import.is_some().then(|| view! {
                        <input
                            node_ref=file_input_ref
                            type="file"
                            accept=".xlsx,.xls,.csv"
                            style="display: none;"
                            on:change=on_file_change
                        />
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                if let Some(input) = file_input_ref.get() {
                                    input.click();
                                }
                            }
                        >
                            {icon("upload")}
                            "Import"
                        </Button>
                    })}
                    {on_export.map(|cb| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| cb.run(view_state.with_untracked(|v| v.filtered_rows.clone()))
                        >
                            {icon("download")}
                            "Export"
                        </Button>
                    })}
                    {can_add.then(|| view! {
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_add()>
                            {icon("plus")}
                            "Add"
                        </Button>
                    })}
                </Flex>
            </div>

            {move || {
                if loading.get().unwrap_or(false) {
                    return view! {
                        <div class="data-table__loading">
                            <Spinner label="Loading..." />
                        </div>
                    }
                    .into_any();
                }
                if data.with(|rows| rows.is_empty()) {
                    return view! {
                        <div class="data-table__empty">
                            <p>"No records yet"</p>
                            {can_add.then(|| view! {
                                <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_add()>
                                    {icon("plus")}
                                    "Add the first one"
                                </Button>
                            })}
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                {show_actions.then(|| view! {
                                    <TableHeaderCheckbox
                                        state=Signal::derive(move || view_state.with(|v| v.page_check))
                                        on_change=Callback::new(move |checked| {
                                            data.with_untracked(|rows| table.update(|t| t.toggle_page(checked, rows)))
                                        })
                                    />
                                })}
                                {header_cells()}
                                {show_actions.then(|| view! {
                                    <TableHeaderCell resizable=false>"Actions"</TableHeaderCell>
                                })}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || view_state.with(|v| v.page_rows.clone().into_iter().enumerate().collect::<Vec<_>>())
                                key=|(i, row)| (*i, row.to_string())
                                children=move |(_, row)| render_row(row)
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || view_state.with(|v| v.filtered_rows.is_empty())>
                        <div class="data-table__no-match">"Nothing matches the current search"</div>
                    </Show>
                    <Show when=move || view_state.with(|v| v.total_pages > 0)>
                        <PaginationControls
                            current_page=Signal::derive(move || view_state.with(|v| v.current_page))
                            total_pages=Signal::derive(move || view_state.with(|v| v.total_pages))
                            page_window=Signal::derive(move || view_state.with(|v| v.page_window.clone()))
                            total_count=Signal::derive(move || view_state.with(|v| v.filtered_rows.len()))
                            page_size=Signal::derive(move || table.with(|t| t.pagination.page_size))
                            on_page_change=Callback::new(move |page| {
                                data.with_untracked(|rows| table.update(|t| t.go_to_page(page, rows)))
                            })
                            on_page_size_change=Callback::new(move |size| {
                                table.update(|t| {
                                    t.set_page_size(size);
                                })
                            })
                            page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                        />
                    </Show>
                }
                .into_any()
            }}
        </div>
    }
}
