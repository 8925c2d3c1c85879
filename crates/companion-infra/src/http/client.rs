//! HttpCompanionClient -- concrete [`CompanionRepository`] and
//! [`CategorySource`] over the companion store's JSON API.
//!
//! Routes:
//! - `POST  /api/companion`       create
//! - `PATCH /api/companion/{id}`  update
//! - `GET   /api/companion/{id}`  fetch for editing
//! - `GET   /api/categories`      category options
//!
//! Bodies are the camelCase field record. Any non-2xx status, connection
//! failure, or undecodable body becomes a [`TransportError`]; retries and
//! connection-level timeouts belong to the transport, not the workflow.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use companion_core::repository::category::CategorySource;
use companion_core::repository::companion::CompanionRepository;
use companion_types::category::Category;
use companion_types::companion::{Companion, CompanionFields, CompanionId};
use companion_types::config::ClientConfig;
use companion_types::error::TransportError;

/// HTTP client for the companion store.
#[derive(Debug, Clone)]
pub struct HttpCompanionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCompanionClient {
    /// Create a client for the store at `base_url` (trailing slashes are
    /// ignored).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("companion-forge/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/api/companion/{id}` with the id percent-encoded as a single
    /// path segment. Store ids are opaque and may contain any character.
    fn companion_url(&self, id: &CompanionId) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.url("/api/companion"))
            .map_err(|e| TransportError::Network(format!("invalid store URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::Network(format!("invalid store URL: {}", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, TransportError> {
        request
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("HTTP request failed: {e}")))
    }

    /// Turn a response into `T`, mapping non-success statuses and
    /// undecodable bodies to transport errors.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::from_status(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::MalformedResponse(format!("failed to parse response: {e}")))
    }
}

impl CompanionRepository for HttpCompanionClient {
    async fn create_companion(&self, fields: &CompanionFields) -> Result<Companion, TransportError> {
        let url = self.url("/api/companion");
        debug!(%url, "POST companion");
        let response = self.send(self.client.post(&url).json(fields)).await?;
        Self::read_json(response).await
    }

    async fn update_companion(
        &self,
        id: &CompanionId,
        fields: &CompanionFields,
    ) -> Result<Companion, TransportError> {
        let url = self.companion_url(id)?;
        debug!(%url, "PATCH companion");
        let response = self.send(self.client.patch(url).json(fields)).await?;
        Self::read_json(response).await
    }

    async fn get_companion(&self, id: &CompanionId) -> Result<Option<Companion>, TransportError> {
        let url = self.companion_url(id)?;
        debug!(%url, "GET companion");
        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        // The store answers `null` for ids it does not own.
        Self::read_json::<Option<Companion>>(response).await
    }
}

impl CategorySource for HttpCompanionClient {
    async fn list_categories(&self) -> Result<Vec<Category>, TransportError> {
        let url = self.url("/api/categories");
        debug!(%url, "GET categories");
        let response = self.send(self.client.get(&url)).await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    const KNOWN_ID: &str = "0190f2a4-7b1c-7c3e-9a55-1b2c3d4e5f60";
    const CREATED_ID: &str = "clx9created";

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    async fn create(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        seen.lock().unwrap().push(("POST".to_string(), body.clone()));
        let mut companion = body;
        companion["id"] = json!(CREATED_ID);
        companion["userId"] = json!("user_1");
        Json(companion)
    }

    async fn update(
        State(seen): State<Seen>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        seen.lock().unwrap().push((format!("PATCH {id}"), body.clone()));
        let mut companion = body;
        companion["id"] = json!(id);
        Json(companion)
    }

    async fn get_one(Path(id): Path<String>) -> Response {
        if id == KNOWN_ID {
            Json(json!({
                "id": KNOWN_ID,
                "name": "Ada",
                "description": "Mathematician",
                "instructions": "i",
                "seed": "s",
                "src": "https://img.example/ada.png",
                "categoryId": "cat-1",
                "createdAt": "2024-01-02T03:04:05.000Z",
                "updatedAt": "2024-01-02T03:04:05.000Z"
            }))
            .into_response()
        } else {
            AxumStatus::NOT_FOUND.into_response()
        }
    }

    async fn categories() -> Json<Value> {
        Json(json!([
            { "id": "0190f2a4-0000-7000-8000-000000000001", "name": "Famous People" },
            { "id": "clx1abc", "name": "Philosophy" }
        ]))
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn store() -> (HttpCompanionClient, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/api/companion", post(create))
            .route("/api/companion/{id}", get(get_one).patch(update))
            .route("/api/categories", get(categories))
            .with_state(seen.clone());
        let base = serve(router).await;
        // Trailing slash on purpose: it must not produce `//api/...`.
        let client = HttpCompanionClient::new(&format!("{base}/"), Duration::from_secs(5)).unwrap();
        (client, seen)
    }

    fn fields() -> CompanionFields {
        CompanionFields {
            src: "https://img.example/elon.png".to_string(),
            name: "Elon".to_string(),
            description: "CEO".to_string(),
            category_id: "cat-1".to_string(),
            instructions: "instructions".to_string(),
            seed: "seed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_posts_camel_case_fields() {
        let (client, seen) = store().await;

        let companion = client.create_companion(&fields()).await.unwrap();

        assert_eq!(companion.id.to_string(), CREATED_ID);
        assert_eq!(companion.fields, fields());
        assert_eq!(companion.user_id.as_deref(), Some("user_1"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "POST");
        assert_eq!(seen[0].1["categoryId"], "cat-1");
        assert!(seen[0].1.get("id").is_none());
    }

    #[tokio::test]
    async fn test_update_patches_by_id() {
        let (client, seen) = store().await;
        let id: CompanionId = KNOWN_ID.parse().unwrap();

        let companion = client.update_companion(&id, &fields()).await.unwrap();

        assert_eq!(companion.id, id);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, format!("PATCH {KNOWN_ID}"));
        assert_eq!(seen[0].1["name"], "Elon");
    }

    #[tokio::test]
    async fn test_get_companion_found_and_missing() {
        let (client, _) = store().await;

        let found = client
            .get_companion(&KNOWN_ID.parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.fields.name, "Ada");
        assert!(found.updated_at.is_some());

        let missing = client
            .get_companion(&CompanionId::new("clx9missing"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_opaque_ids_are_sent_as_one_path_segment() {
        let (client, seen) = store().await;
        let id = CompanionId::new("team/7 alpha");

        let companion = client.update_companion(&id, &fields()).await.unwrap();

        assert_eq!(companion.id, id);
        assert_eq!(seen.lock().unwrap()[0].0, "PATCH team/7 alpha");
    }

    #[test]
    fn test_companion_url_encodes_id() {
        let client =
            HttpCompanionClient::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        let url = client.companion_url(&CompanionId::new("clx9")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/companion/clx9");

        let url = client.companion_url(&CompanionId::new("a/b?c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/companion/a%2Fb%3Fc");
    }

    #[tokio::test]
    async fn test_list_categories_keeps_order() {
        let (client, _) = store().await;
        let categories = client.list_categories().await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Famous People", "Philosophy"]);
        assert_eq!(categories[1].id.as_str(), "clx1abc");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router = Router::new().route(
            "/api/companion",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "Internal Error") }),
        );
        let client = HttpCompanionClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let err = client.create_companion(&fields()).await.unwrap_err();
        assert!(
            matches!(err, TransportError::Status { status: 500, ref body } if body == "Internal Error")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_rejected() {
        let router = Router::new().route(
            "/api/companion/{id}",
            axum::routing::patch(|| async { (AxumStatus::UNAUTHORIZED, "Unauthorized") }),
        );
        let client = HttpCompanionClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let err = client
            .update_companion(&CompanionId::new("clx9locked"), &fields())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_malformed() {
        let router = Router::new().route("/api/companion", post(|| async { "saved!" }));
        let client = HttpCompanionClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let err = client.create_companion(&fields()).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpCompanionClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = client.list_categories().await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn test_from_config_uses_api_url() {
        let config = ClientConfig {
            api_url: "https://companions.example.com/".to_string(),
            ..Default::default()
        };
        let client = HttpCompanionClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://companions.example.com");
    }
}
