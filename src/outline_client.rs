use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use worker::wasm_bindgen::JsValue;
use worker::{Fetch, Headers, Method, Request, RequestInit};

use crate::error::ApiError;

/// Thin client for the three Outline endpoints this service consumes. Built
/// fresh per request from the caller-supplied API key; nothing is persisted.
pub struct OutlineClient {
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutlineDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OutlineEnvelope {
    data: OutlineDocument,
}

impl OutlineClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: Url::parse(base_url)?,
        })
    }

    pub async fn get_document(&self, document_id: &str) -> Result<OutlineDocument, ApiError> {
        self.post_json("/api/documents.info", &json!({ "id": document_id }))
            .await
    }

    pub async fn create_document(
        &self,
        collection_id: &str,
        title: &str,
        text: &str,
    ) -> Result<OutlineDocument, ApiError> {
        self.post_json(
            "/api/documents.create",
            &json!({
                "title": title,
                "text": text,
                "collectionId": collection_id,
                "publish": true,
            }),
        )
        .await
    }

    pub async fn update_document(
        &self,
        document_id: &str,
        text: &str,
    ) -> Result<OutlineDocument, ApiError> {
        self.post_json(
            "/api/documents.update",
            &json!({ "id": document_id, "text": text }),
        )
        .await
    }

    async fn post_json(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<OutlineDocument, ApiError> {
        let endpoint = self.base_url.join(path)?;

        let headers = Headers::new();
        headers.set("Authorization", &format!("Bearer {}", self.api_key))?;
        headers.set("Content-Type", "application/json")?;

        let mut init = RequestInit::new();
        init.with_method(Method::Post)
            .with_headers(headers)
            .with_body(Some(JsValue::from_str(&payload.to_string())));

        let request = Request::new_with_init(endpoint.as_str(), &init)?;
        let mut response = Fetch::Request(request).send().await?;

        let status = response.status_code();
        if status >= 400 {
            worker::console_error!("outline call {path} failed with status {status}");
            return Err(ApiError::Upstream(format!(
                "Outline API error: status {status} on {path}"
            )));
        }

        let envelope = response.json::<OutlineEnvelope>().await?;
        Ok(envelope.data)
    }
}
