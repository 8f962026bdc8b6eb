//! 搜索查询文档
//!
//! 固定结构的 multi_match 查询，序列化后的键顺序为 `size`、`query`、`_source`。

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

/// 发往搜索引擎的查询文档
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// 返回结果数量上限
    pub size: u32,
    /// 查询子句
    pub query: QueryClause,
    /// 返回的字段
    #[serde(rename = "_source")]
    pub source_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryClause {
    pub multi_match: MultiMatch,
}

/// 多字段匹配：同一个词在多个字段上打分并合并
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiMatch {
    pub query: String,
    pub fields: Vec<String>,
}

impl SearchQuery {
    pub fn new(
        term: impl Into<String>,
        size: u32,
        match_fields: Vec<String>,
        source_fields: Vec<String>,
    ) -> Self {
        Self {
            size,
            query: QueryClause {
                multi_match: MultiMatch {
                    query: term.into(),
                    fields: match_fields,
                },
            },
            source_fields,
        }
    }

    /// 按配置中的字段列表和结果上限构造查询
    pub fn from_config(term: impl Into<String>, config: &SearchConfig) -> Self {
        Self::new(
            term,
            config.result_size,
            config.match_fields.clone(),
            config.source_fields.clone(),
        )
    }

    pub fn term(&self) -> &str {
        &self.query.multi_match.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_document() {
        let query = SearchQuery::from_config("rust ownership", &SearchConfig::default());

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "size": 25,
                "query": {
                    "multi_match": {
                        "query": "rust ownership",
                        "fields": ["Title", "Author", "Date", "Body"]
                    }
                },
                "_source": ["Title", "Author", "Date", "Summary"]
            })
        );
    }

    #[test]
    fn test_key_order_on_the_wire() {
        let query = SearchQuery::from_config("x", &SearchConfig::default());
        let wire = serde_json::to_string(&query).unwrap();

        let size = wire.find("\"size\"").unwrap();
        let body = wire.find("\"query\"").unwrap();
        let source = wire.find("\"_source\"").unwrap();
        assert!(size < body && body < source);
    }

    #[test]
    fn test_term_is_only_json_escaped() {
        let query = SearchQuery::from_config("say \"hi\"  twice", &SearchConfig::default());
        let wire = serde_json::to_string(&query).unwrap();

        assert!(wire.contains(r#""query":"say \"hi\"  twice""#));
        assert_eq!(query.term(), "say \"hi\"  twice");
    }
}
