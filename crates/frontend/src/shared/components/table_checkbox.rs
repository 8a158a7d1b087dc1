//! Row and header checkboxes for selectable tables

use crate::shared::data_table::PageCheckState;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Header checkbox toggling every row of the visible page.
///
/// Shows the indeterminate mark when only part of the page is checked.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<PageCheckState>,

    /// `true` = check the whole page, `false` = uncheck it
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate is a DOM property without an HTML attribute
    Effect::new(move |_| {
        let indeterminate = state.get() == PageCheckState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == PageCheckState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

/// Checkbox cell of a single row. The click does not reach the row.
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    checked: Signal<bool>,

    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableCell>
    }
}
