//! 索引模块
//!
//! 搜索引擎后端以及出站请求签名。

pub mod opensearch;
pub mod signing;

pub use opensearch::OpenSearchClient;
pub use signing::{
    OutboundRequest, RequestSigner, SigV4Signer, UnsignedSigner, create_request_signer,
};

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{SearchQuery, SearchResponseBody};

/// 搜索引擎后端
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// 提交查询文档并返回解析后的响应体
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponseBody>;
}

/// 创建共享的搜索后端：签名器与 HTTP 客户端都只在启动时构造一次
pub async fn create_search_backend(config: &SearchConfig) -> Result<Arc<dyn SearchBackend>> {
    let signer = create_request_signer(config).await?;
    let client = OpenSearchClient::new(config, signer)?;
    tracing::info!("Search backend initialized: {}", client.search_url());
    Ok(Arc::new(client))
}
