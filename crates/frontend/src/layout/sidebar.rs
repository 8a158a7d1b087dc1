//! Navigation menu; groups collapse independently

use crate::layout::global_context::LayoutContext;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    /// (route, label, icon)
    items: Vec<(&'static str, &'static str, &'static str)>,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![MenuGroup {
        id: "catalogue",
        label: "Catalogue",
        items: vec![
            ("/products", "Products", "products"),
            ("/attributes", "Attributes", "attributes"),
        ],
    }]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<LayoutContext>();
    let collapsed = RwSignal::new(Vec::<&'static str>::new());

    let groups = menu_groups()
        .into_iter()
        .map(|group| {
            let id = group.id;
            let is_open = move || collapsed.with(|c| !c.contains(&id));
            let toggle = move |_| {
                collapsed.update(|c| {
                    if let Some(pos) = c.iter().position(|g| *g == id) {
                        c.remove(pos);
                    } else {
                        c.push(id);
                    }
                })
            };
            let items = StoredValue::new(group.items);

            view! {
                <div class="sidebar__group">
                    <button class="sidebar__group-header" on:click=toggle>
                        {group.label}
                    </button>
                    <Show when=is_open>
                        <nav class="sidebar__items">
                            {items
                                .get_value()
                                .into_iter()
                                .map(|(href, label, icon_name)| view! {
                                    <A href=href attr:class="sidebar__link">
                                        {icon(icon_name)}
                                        <span>{label}</span>
                                    </A>
                                })
                                .collect_view()}
                        </nav>
                    </Show>
                </div>
            }
        })
        .collect_view();

    view! {
        <aside class="sidebar" class:hidden=move || !ctx.left_open.get()>
            {groups}
        </aside>
    }
}
