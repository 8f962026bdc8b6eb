//! 搜索结果模型
//!
//! 上游响应 `{"hits": {"hits": [{"_source": {...}, "_score": n}]}}` 以及
//! 扁平化后的 `{"fields": {...}, "_score": n}`。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 搜索引擎响应体，只保留需要的部分
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub hits: Option<HitsEnvelope>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Option<Vec<RawHit>>,
}

/// 上游单条命中记录
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_source")]
    pub source: Value,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
}

/// 扁平化后的命中结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// 命中文档的返回字段
    pub fields: Value,
    /// 相关度分数，由搜索引擎计算
    #[serde(rename = "_score")]
    pub relevance_score: Option<f64>,
}

impl From<RawHit> for SearchHit {
    fn from(hit: RawHit) -> Self {
        Self {
            fields: hit.source,
            relevance_score: hit.score,
        }
    }
}

impl SearchResponseBody {
    /// 扁平化 `hits.hits`，保持上游顺序；缺失或为空时返回空列表
    pub fn into_hits(self) -> Vec<SearchHit> {
        self.hits
            .and_then(|envelope| envelope.hits)
            .unwrap_or_default()
            .into_iter()
            .map(SearchHit::from)
            .collect()
    }
}
