//! 入站请求模型

use std::collections::HashMap;

/// 单次调用的入站请求表示
///
/// 同时覆盖 GET 风格（查询参数）和 POST 风格（JSON 或表单请求体）。
/// 请求体是否为 JSON 或表单在解析时才确定。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundRequest {
    /// 查询参数
    pub query_parameters: Option<HashMap<String, String>>,
    /// 原始请求体
    pub body: Option<Vec<u8>>,
    /// 请求体是否经过 base64 编码
    pub body_is_encoded: bool,
}

impl InboundRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query_param(mut self, key: &str, value: &str) -> Self {
        self.query_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_encoded_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self.body_is_encoded = true;
        self
    }

    /// 查询参数值，不存在时返回 None
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// 非空请求体
    pub fn non_empty_body(&self) -> Option<&[u8]> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}
