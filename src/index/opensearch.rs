//! OpenSearch 客户端

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::index::SearchBackend;
use crate::index::signing::{OutboundRequest, RequestSigner};
use crate::models::{SearchQuery, SearchResponseBody};

const JSON_CONTENT_TYPE: &str = "application/json";

/// 托管 OpenSearch 域的搜索客户端
///
/// 进程启动时创建一次，之后只读共享。每次搜索只发出一个 POST，不重试。
pub struct OpenSearchClient {
    client: reqwest::Client,
    search_url: String,
    signer: Arc<dyn RequestSigner>,
}

impl std::fmt::Debug for OpenSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchClient")
            .field("search_url", &self.search_url)
            .field("signer", &"Arc<dyn RequestSigner>")
            .finish()
    }
}

impl OpenSearchClient {
    pub fn new(config: &SearchConfig, signer: Arc<dyn RequestSigner>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url(),
            signer,
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl SearchBackend for OpenSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponseBody> {
        let body = serde_json::to_vec(query)?;
        let headers = vec![(CONTENT_TYPE.as_str().to_string(), JSON_CONTENT_TYPE.to_string())];

        let auth_headers = self
            .signer
            .sign(&OutboundRequest {
                method: "POST",
                url: &self.search_url,
                headers: &headers,
                body: &body,
            })
            .await?;

        debug!("POST {}", self.search_url);

        let mut request = self
            .client
            .post(&self.search_url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in auth_headers {
            request = request.header(name, value);
        }

        let response = request.body(body).send().await.map_err(|e| {
            error!("OpenSearch query failed: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenSearch query failed: {} {}", status, error_text);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
