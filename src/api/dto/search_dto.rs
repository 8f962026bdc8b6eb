//! 搜索 DTO
//!
//! 定义搜索相关的请求和响应数据结构，包括 API Gateway 代理事件格式。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::error::{AppError, ErrorResponse, Result};
use crate::models::{InboundRequest, SearchHit};

const JSON_CONTENT_TYPE: &str = "application/json";

/// API Gateway 代理事件
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyEvent {
    /// 查询参数，值可能为 null
    pub query_string_parameters: Option<HashMap<String, Option<String>>>,
    /// 请求体
    pub body: Option<String>,
    /// 请求体是否经过 base64 编码，null 视为 false
    pub is_base64_encoded: Option<bool>,
}

impl ProxyEvent {
    /// 从原始请求体解析代理事件，不依赖 Content-Type
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }
}

impl From<ProxyEvent> for InboundRequest {
    fn from(event: ProxyEvent) -> Self {
        let query_parameters = event.query_string_parameters.map(|params| {
            params
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value)))
                .collect()
        });

        Self {
            query_parameters,
            body: event.body.map(String::into_bytes),
            body_is_encoded: event.is_base64_encoded.unwrap_or(false),
        }
    }
}

/// API Gateway 代理响应
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// HTTP 状态码
    pub status_code: u16,
    /// 响应头
    pub headers: BTreeMap<String, String>,
    /// JSON 编码后的响应体
    pub body: String,
}

/// 单次调用的处理结果
#[derive(Debug, Clone)]
pub struct AdapterResponse {
    /// HTTP 状态码
    pub status: StatusCode,
    /// 响应体
    pub body: Value,
}

impl AdapterResponse {
    /// 成功：扁平化后的命中列表（可能为空）
    pub fn success(hits: &[SearchHit]) -> Self {
        match serde_json::to_value(hits) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body,
            },
            Err(e) => Self::from(AppError::from(e)),
        }
    }

    pub fn from_result(result: Result<Vec<SearchHit>>) -> Self {
        match result {
            Ok(hits) => Self::success(&hits),
            Err(err) => Self::from(err),
        }
    }

    /// 转换为代理响应格式
    pub fn into_proxy_response(self) -> ProxyResponse {
        ProxyResponse {
            status_code: self.status.as_u16(),
            headers: BTreeMap::from([("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())]),
            body: self.body.to_string(),
        }
    }
}

impl From<AppError> for AdapterResponse {
    fn from(err: AppError) -> Self {
        let body = serde_json::to_value(ErrorResponse::new(&err.to_string()))
            .unwrap_or_else(|_| serde_json::json!({"status": false, "message": err.to_string()}));
        Self {
            status: err.status_code(),
            body,
        }
    }
}

impl IntoResponse for AdapterResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proxy_event_from_api_gateway_shape() {
        let event: ProxyEvent = serde_json::from_value(json!({
            "httpMethod": "POST",
            "queryStringParameters": null,
            "headers": {"content-type": "application/json"},
            "body": "eyJzZWFyY2hUZXJtIjoiWCJ9",
            "isBase64Encoded": true
        }))
        .unwrap();

        let request = InboundRequest::from(event);
        assert!(request.query_parameters.is_none());
        assert!(request.body_is_encoded);
        assert_eq!(request.body.as_deref(), Some(&b"eyJzZWFyY2hUZXJtIjoiWCJ9"[..]));
    }

    #[test]
    fn test_proxy_event_accepts_null_fields() {
        let event = ProxyEvent::from_slice(
            br#"{"queryStringParameters": {"q": null, "page": "2"}, "body": null, "isBase64Encoded": null}"#,
        )
        .unwrap();

        let request = InboundRequest::from(event);
        assert_eq!(request.query_param("q"), None);
        assert_eq!(request.query_param("page"), Some("2"));
        assert!(request.body.is_none());
        assert!(!request.body_is_encoded);
    }

    #[test]
    fn test_proxy_event_rejects_malformed_json() {
        let err = ProxyEvent::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_term_response() {
        let response = AdapterResponse::from(AppError::missing_term()).into_proxy_response();

        assert_eq!(response.status_code, 400);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(
            serde_json::from_str::<Value>(&response.body).unwrap(),
            json!({"status": false, "message": "Missing search term"})
        );
    }

    #[test]
    fn test_success_response_with_no_hits() {
        let response = AdapterResponse::from_result(Ok(vec![]));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([]));
    }

    #[test]
    fn test_failure_response_has_message() {
        let response = AdapterResponse::from_result(Err(AppError::Transport(
            "connection refused".into(),
        )));

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["status"], json!(false));
        assert!(
            response.body["message"]
                .as_str()
                .unwrap()
                .contains("connection refused")
        );
    }
}
