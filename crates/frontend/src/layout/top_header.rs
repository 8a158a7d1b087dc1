use crate::layout::global_context::LayoutContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<LayoutContext>();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__toggle"
                    title=move || if ctx.left_open.get() { "Hide menu" } else { "Show menu" }
                    on:click=move |_| ctx.toggle_left()
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"POS Admin"</span>
            </div>
        </div>
    }
}
