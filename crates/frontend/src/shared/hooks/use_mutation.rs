use crate::shared::api::{ApiClient, ApiError};
use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Write-side hook shared by `use_post`, `use_put` and `use_delete`.
///
/// Every call is exactly one request. Failures are toasted by the client and
/// returned, so code after `.await?` in the caller does not run.
#[derive(Clone)]
pub struct UseMutation {
    url: String,
    client: ApiClient,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

pub fn use_post(url: impl Into<String>) -> UseMutation {
    UseMutation::new(url.into())
}

pub fn use_put(url: impl Into<String>) -> UseMutation {
    UseMutation::new(url.into())
}

/// `default_url` is used unless `delete_data` receives its own
pub fn use_delete(default_url: impl Into<String>) -> UseMutation {
    UseMutation::new(default_url.into())
}

impl UseMutation {
    fn new(url: String) -> Self {
        Self {
            url,
            client: expect_context::<ApiClient>(),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn post_data<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        self.track(self.client.post(&self.url, body)).await
    }

    /// PUT to `override_url` when given, else to the hook URL
    pub async fn put_data<B: Serialize + ?Sized>(
        &self,
        body: &B,
        override_url: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = override_url.unwrap_or(&self.url);
        self.track(self.client.put(url, body)).await
    }

    /// DELETE `custom_url` (or the default URL); `body` is sent as JSON when given
    pub async fn delete_data(
        &self,
        custom_url: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = custom_url.unwrap_or(&self.url);
        self.track(self.client.delete(url, body)).await
    }

    async fn track<F>(&self, request: F) -> Result<Value, ApiError>
    where
        F: Future<Output = Result<Value, ApiError>>,
    {
        self.loading.set(true);
        self.error.set(None);

        let result = request.await;

        self.loading.try_set(false);
        if let Err(e) = &result {
            self.error.try_set(Some(e.user_message()));
        }
        result
    }
}
