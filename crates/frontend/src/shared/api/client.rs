use super::{ApiError, ApiRequest, GlooTransport, HttpMethod, HttpTransport};
use crate::shared::api_utils::{api_base, join_url};
use crate::shared::notify::Notifier;
use contracts::shared::api_response::{message_of, payload_of, ApiErrorBody};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Success toast for deletes whose response carries no message
pub const DEFAULT_DELETE_MESSAGE: &str = "Deleted successfully";

/// Entry point for every backend call.
///
/// Reads never notify: their failures are returned to the caller to be kept
/// in query state. Writes toast both outcomes and still return the error so
/// the caller can branch on it.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    transport: Arc<dyn HttpTransport>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        base: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base: base.into(),
            transport,
            notifier,
        }
    }

    /// Client for the configured backend over browser `fetch`
    pub fn browser(notifier: Arc<dyn Notifier>) -> Self {
        Self::new(api_base(), Arc::new(GlooTransport), notifier)
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// GET returning the envelope's `data` payload
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Get, path, None).await.map(payload_of)
    }

    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let payload = self.get(path).await?;
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST returning the full response body
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = self.encode(body)?;
        self.mutate(HttpMethod::Post, path, Some(body), None).await
    }

    /// PUT returning the full response body
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let body = self.encode(body)?;
        self.mutate(HttpMethod::Put, path, Some(body), None).await
    }

    /// DELETE, with a JSON body when given (bulk delete sends `{"ids": [...]}`)
    pub async fn delete(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.mutate(HttpMethod::Delete, path, body, Some(DEFAULT_DELETE_MESSAGE))
            .await
    }

    /// Toast every user-facing message of an error
    pub fn notify_error(&self, error: &ApiError) {
        for message in error.messages() {
            self.notifier.error(&message);
        }
    }

    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| {
            let err = ApiError::Serialize(e.to_string());
            self.notify_error(&err);
            err
        })
    }

    async fn mutate(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        fallback_success: Option<&str>,
    ) -> Result<Value, ApiError> {
        match self.execute(method, path, body).await {
            Ok(body) => {
                if let Some(message) = message_of(&body).or_else(|| fallback_success.map(str::to_string)) {
                    self.notifier.success(&message);
                }
                Ok(body)
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", method, path, err);
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let response = self
            .transport
            .send(ApiRequest { method, url, body })
            .await?;

        let rejected = response.body.get("success").and_then(Value::as_bool) == Some(false);
        if response.is_success() && !rejected {
            return Ok(response.body);
        }

        let error_body = ApiErrorBody::from_value(&response.body);
        Err(ApiError::Http {
            status: response.status,
            message: error_body.primary_message(),
            messages: error_body.messages(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::testing::MockTransport;
    use crate::shared::notify::testing::CollectingNotifier;
    use serde_json::json;

    fn client(transport: MockTransport) -> (ApiClient, Arc<MockTransport>, Arc<CollectingNotifier>) {
        let transport = Arc::new(transport);
        let notifier = Arc::new(CollectingNotifier::default());
        let client = ApiClient::new("http://api.test", transport.clone(), notifier.clone());
        (client, transport, notifier)
    }

    #[tokio::test]
    async fn test_get_unwraps_data_and_never_toasts() {
        let (client, transport, notifier) = client(
            MockTransport::new().respond(200, json!({ "success": true, "data": [{ "_id": "1" }] })),
        );

        let data = client.get("/api/attributes").await.unwrap();

        assert_eq!(data, json!([{ "_id": "1" }]));
        assert_eq!(transport.requests()[0].url, "http://api.test/api/attributes");
        assert_eq!(transport.requests()[0].method, HttpMethod::Get);
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_get_failure_is_returned_silently() {
        let (client, _, notifier) =
            client(MockTransport::new().respond(404, json!({ "message": "Not found" })));

        let err = client.get("/api/attributes/x").await.unwrap_err();

        assert_eq!(err.user_message(), "Not found");
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_get_as_reports_decode_errors() {
        let (client, _, _) = client(MockTransport::new().respond(200, json!({ "data": "oops" })));
        let err = client.get_as::<Vec<i32>>("/api/x").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_post_failure_toasts_each_detail_and_propagates() {
        let (client, transport, notifier) = client(MockTransport::new().respond(
            422,
            json!({ "error": { "message": "Invalid", "details": ["name is required", "code is taken"] } }),
        ));

        let mut navigated = false;
        let result = async {
            client.post("/api/products", &json!({ "name": "" })).await?;
            navigated = true;
            Ok::<(), ApiError>(())
        }
        .await;

        assert_eq!(result.unwrap_err().user_message(), "Invalid");
        assert!(!navigated);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(
            notifier.errors(),
            vec!["name is required".to_string(), "code is taken".to_string()]
        );
    }

    #[tokio::test]
    async fn test_post_success_toasts_backend_message() {
        let (client, transport, notifier) = client(
            MockTransport::new().respond(201, json!({ "success": true, "message": "Created", "data": { "_id": "9" } })),
        );

        let body = client.post("/api/products", &json!({ "name": "Shirt" })).await.unwrap();

        assert_eq!(body["data"]["_id"], json!("9"));
        assert_eq!(transport.requests()[0].body, Some(json!({ "name": "Shirt" })));
        assert_eq!(notifier.successes(), vec!["Created".to_string()]);
    }

    #[tokio::test]
    async fn test_success_false_is_a_failure() {
        let (client, _, notifier) = client(
            MockTransport::new().respond(200, json!({ "success": false, "message": "Code already exists" })),
        );

        let err = client.put("/api/products/1", &json!({})).await.unwrap_err();

        assert_eq!(err.status(), Some(200));
        assert_eq!(notifier.errors(), vec!["Code already exists".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_with_body_and_generic_success() {
        let (client, transport, notifier) =
            client(MockTransport::new().respond(200, json!({ "success": true })));

        client
            .delete("/api/attributes", Some(json!({ "ids": ["1", "2"] })))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.body, Some(json!({ "ids": ["1", "2"] })));
        assert_eq!(notifier.successes(), vec![DEFAULT_DELETE_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let (client, transport, notifier) =
            client(MockTransport::new().fail(ApiError::Transport("offline".into())));

        assert!(client.delete("/api/attributes/1", None).await.is_err());
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(notifier.errors(), vec!["Network error: offline".to_string()]);
    }
}
