use super::query::{QueryState, RequestGeneration};
use crate::shared::api::{ApiClient, ApiError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

/// Reactive GET bound to a URL signal
pub struct UseGet<T: Send + Sync + 'static> {
    pub state: RwSignal<QueryState<T>>,
    url: Signal<Option<String>>,
    generation: StoredValue<RequestGeneration>,
    client: ApiClient,
}

impl<T: Send + Sync + 'static> Clone for UseGet<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            url: self.url,
            generation: self.generation,
            client: self.client.clone(),
        }
    }
}

/// Fetch `url` whenever it becomes `Some` or changes.
///
/// `None` skips fetching; used for queries that depend on another value.
/// Failures never escape: they land in `state.error`.
///
/// # Example
/// ```rust,ignore
/// let attributes = use_get::<Vec<Attribute>>(Some("/api/attributes".to_string()));
/// let rows = move || attributes.state.get().data.unwrap_or_default();
/// ```
pub fn use_get<T>(url: impl Into<Signal<Option<String>>>) -> UseGet<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let hook = UseGet {
        state: RwSignal::new(QueryState::idle()),
        url: url.into(),
        generation: StoredValue::new(RequestGeneration::default()),
        client: expect_context::<ApiClient>(),
    };

    let effect_hook = hook.clone();
    Effect::new(move |_| {
        let url = effect_hook.url.get();
        effect_hook.load(url);
    });

    hook
}

impl<T> UseGet<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Re-issue the request for the current URL
    pub fn refetch(&self) {
        self.load(self.url.get_untracked());
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|s| s.data.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    fn load(&self, url: Option<String>) {
        let mut counter = self.generation.get_value();
        let generation = counter.begin();
        self.generation.set_value(counter);

        let Some(url) = url else {
            self.state.set(QueryState::idle());
            return;
        };

        self.state.update(|s| s.start());

        let client = self.client.clone();
        let state = self.state;
        let stored = self.generation;
        spawn_local(async move {
            let is_current = || {
                stored
                    .try_get_value()
                    .map(|g| g.is_current(generation))
                    .unwrap_or(false)
            };
            match fetch_if_current::<T>(&client, &url, is_current).await {
                Some(Ok(data)) => {
                    state.try_update(|s| s.succeed(data));
                }
                Some(Err(e)) => {
                    state.try_update(|s| s.fail(e.user_message()));
                }
                None => {}
            }
        });
    }
}

/// GET `url`; `None` when a newer request was issued while this one was in
/// flight, so its response must not land in state.
async fn fetch_if_current<T: DeserializeOwned>(
    client: &ApiClient,
    url: &str,
    is_current: impl Fn() -> bool,
) -> Option<Result<T, ApiError>> {
    let result = client.get_as::<T>(url).await;
    if !is_current() {
        log::debug!("Discarding stale response for {}", url);
        return None;
    }
    if let Err(e) = &result {
        log::warn!("GET {} failed: {}", url, e);
    }
    Some(result)
}
