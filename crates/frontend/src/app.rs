use crate::layout::global_context::LayoutContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api::ApiClient;
use crate::shared::notify::ToastService;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let toasts = ToastService::new();
    provide_context(toasts);
    provide_context(ApiClient::browser(Arc::new(toasts)));
    provide_context(LayoutContext::new());

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
