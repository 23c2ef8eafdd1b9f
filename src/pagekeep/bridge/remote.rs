use crate::document::DocNode;
use crate::error::{PagekeepError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/pages/{id}/content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveContentRequest {
    pub content: DocNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Success body of `POST /api/pages/{id}/content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContentResponse {
    pub success: bool,
    pub page_id: String,
    pub content: Value,
    pub html: Option<String>,
    pub markdown: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// Server-side persistence of page content.
#[async_trait]
pub trait ContentRemote: Send + Sync {
    async fn save_content(&self, page_id: &str, request: &SaveContentRequest) -> Result<()>;
}

/// Talks to the content API over HTTP.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PagekeepError::Remote(format!("Invalid remote url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PagekeepError::Remote(format!(
                "Remote url cannot be a base: {}",
                base_url
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn content_url(&self, page_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "pages", page_id, "content"]);
        }
        url
    }
}

#[async_trait]
impl ContentRemote for HttpRemote {
    async fn save_content(&self, page_id: &str, request: &SaveContentRequest) -> Result<()> {
        let response = self
            .client
            .post(self.content_url(page_id))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: Value = response.json().await.unwrap_or_default();
        let reason = body
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| status.canonical_reason())
            .unwrap_or("unknown error")
            .to_string();
        Err(PagekeepError::Remote(format!("{}: {}", status.as_u16(), reason)))
    }
}
