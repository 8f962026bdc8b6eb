//! 搜索服务
//!
//! 构造查询文档、调用搜索后端并扁平化命中结果。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::index::SearchBackend;
use crate::models::{SearchHit, SearchQuery};

#[async_trait]
pub trait SearchService: Send + Sync {
    /// 按非空搜索词执行一次搜索
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>>;
}

pub struct SearchServiceImpl {
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
}

impl SearchServiceImpl {
    pub fn new(backend: Arc<dyn SearchBackend>, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    pub fn build_query(&self, term: &str) -> SearchQuery {
        SearchQuery::from_config(term, &self.config)
    }
}

#[async_trait]
impl SearchService for SearchServiceImpl {
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        if term.is_empty() {
            return Err(AppError::missing_term());
        }

        let query = self.build_query(term);
        let response = self.backend.search(&query).await?;
        let hits = response.into_hits();

        debug!("Search for {:?} returned {} hits", term, hits.len());
        Ok(hits)
    }
}

pub fn create_search_service(
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
) -> Arc<dyn SearchService> {
    Arc::new(SearchServiceImpl::new(backend, config))
}
