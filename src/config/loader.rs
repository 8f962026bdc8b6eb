use crate::config::config::AppConfig;
use crate::error::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DOCSEARCH_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 内置默认值
    /// 2. ./config.yaml
    /// 3. 环境变量，例如 `DOCSEARCH_SEARCH__ENDPOINT`
    pub fn load() -> Result<AppConfig> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        Ok(Self::figment(path).extract()?)
    }

    fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> std::result::Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.search.endpoint.is_empty() {
            return Err(ConfigValidationError::MissingEndpoint);
        }

        if reqwest::Url::parse(&config.search.endpoint).is_err() {
            return Err(ConfigValidationError::InvalidEndpoint(
                config.search.endpoint.clone(),
            ));
        }

        if config.search.index.is_empty() {
            return Err(ConfigValidationError::MissingIndex);
        }

        if config.search.result_size == 0 {
            return Err(ConfigValidationError::InvalidResultSize);
        }

        if config.search.match_fields.is_empty() || config.search.source_fields.is_empty() {
            return Err(ConfigValidationError::EmptyFieldList);
        }

        if config.search.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if config.search.signing && config.search.region.is_empty() {
            return Err(ConfigValidationError::MissingRegion);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("search endpoint is not configured")]
    MissingEndpoint,

    #[error("search endpoint is not a valid URL: {0}")]
    InvalidEndpoint(String),

    #[error("search index is not configured")]
    MissingIndex,

    #[error("result size must be greater than 0")]
    InvalidResultSize,

    #[error("match and source field lists must not be empty")]
    EmptyFieldList,

    #[error("search timeout must be greater than 0")]
    InvalidTimeout,

    #[error("signing is enabled but no region is configured")]
    MissingRegion,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().expect("defaults should load");
            assert_eq!(config.search.index, "opensearch");
            assert_eq!(config.search.result_size, 25);
            assert_eq!(config.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
search:
  endpoint: "https://search.example.com"
  index: "articles"
  result_size: 10
"#,
            )?;
            jail.set_env("DOCSEARCH_SEARCH__INDEX", "library");
            jail.set_env("DOCSEARCH_SERVER__PORT", "9000");

            let config = ConfigLoader::load().expect("config should load");
            assert_eq!(config.search.endpoint, "https://search.example.com");
            assert_eq!(config.search.index, "library");
            assert_eq!(config.search.result_size, 10);
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.search.service, "es");
            Ok(())
        });
    }

    #[test]
    fn test_malformed_env_value_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("DOCSEARCH_SERVER__PORT", "not-a-port");

            let err = ConfigLoader::load().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().starts_with("Configuration error"));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_yaml_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "search: [unclosed")?;

            let err = ConfigLoader::load_from("custom.yaml").unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.search.endpoint = "not a url".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidEndpoint(_))
        ));

        let mut config = AppConfig::default();
        config.search.result_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidResultSize)
        ));

        let mut config = AppConfig::default();
        config.search.match_fields.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::EmptyFieldList)
        ));
    }
}
