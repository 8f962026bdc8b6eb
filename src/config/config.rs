use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// 搜索引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索域地址，例如 https://search-domain.us-east-1.es.amazonaws.com
    pub endpoint: String,
    /// 索引名称
    pub index: String,
    /// AWS 区域
    pub region: String,
    /// 签名服务名：托管域为 "es"，Serverless 为 "aoss"
    pub service: String,
    /// 是否对请求进行 SigV4 签名
    pub signing: bool,
    /// 返回结果数量上限
    pub result_size: u32,
    /// 参与匹配的字段
    pub match_fields: Vec<String>,
    /// 返回的字段
    pub source_fields: Vec<String>,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://localhost:9200".into(),
            index: "opensearch".into(),
            region: "us-east-1".into(),
            service: "es".into(),
            signing: true,
            result_size: 25,
            match_fields: vec![
                "Title".into(),
                "Author".into(),
                "Date".into(),
                "Body".into(),
            ],
            source_fields: vec![
                "Title".into(),
                "Author".into(),
                "Date".into(),
                "Summary".into(),
            ],
            timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    /// `{endpoint}/{index}/_search`
    pub fn search_url(&self) -> String {
        format!(
            "{}/{}/_search",
            self.endpoint.trim_end_matches('/'),
            self.index
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录，未设置时输出到 stdout
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 搜索引擎配置
    pub search: SearchConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_config() {
        let config = SearchConfig::default();
        assert_eq!(config.result_size, 25);
        assert_eq!(config.match_fields, ["Title", "Author", "Date", "Body"]);
        assert_eq!(config.source_fields, ["Title", "Author", "Date", "Summary"]);
        assert!(config.signing);
    }

    #[test]
    fn test_search_url_strips_trailing_slash() {
        let config = SearchConfig {
            endpoint: "https://search.example.com/".into(),
            index: "articles".into(),
            ..SearchConfig::default()
        };
        assert_eq!(
            config.search_url(),
            "https://search.example.com/articles/_search"
        );
    }
}
