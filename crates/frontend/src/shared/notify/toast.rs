use super::Notifier;
use crate::shared::config::AppConfig;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

/// Older toasts are dropped once the stack grows past this
const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Toast stack shared through context. Each toast removes itself after the
/// configured timeout.
#[derive(Clone, Copy)]
pub struct ToastService {
    pub toasts: RwSignal<Vec<Toast>>,
    timeout_ms: u32,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            timeout_ms: AppConfig::get().toast_timeout_ms,
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let message = message.into();
        match kind {
            ToastKind::Success => log::info!("toast: {}", message),
            ToastKind::Error => log::warn!("toast: {}", message),
        }

        self.toasts.update(|toasts| {
            toasts.push(Toast { id, kind, message });
            if toasts.len() > MAX_VISIBLE_TOASTS {
                toasts.remove(0);
            }
        });

        let svc = *self;
        let timeout = self.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            svc.dismiss(id);
        });

        id
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastService {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}

/// Renders the toast stack. Mount once near the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let service = expect_context::<ToastService>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=toast.kind.css_class()
                            title="Dismiss"
                            on:click=move |_| service.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
