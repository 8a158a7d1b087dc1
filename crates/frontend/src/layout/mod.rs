//! Application shell
//!
//! ```text
//! +------------------------------+
//! |          TopHeader           |
//! +---------+--------------------+
//! | Sidebar |      content       |
//! +---------+--------------------+
//! ```

pub mod global_context;
pub mod sidebar;
pub mod top_header;

use crate::shared::notify::ToastHost;
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Sidebar />
                <main class="app-main">{children()}</main>
            </div>
            <ToastHost />
        </div>
    }
}
