//! 搜索词提取
//!
//! 依次尝试：查询参数 `q` → JSON 请求体 `searchTerm` → 表单请求体 `searchTerm`。
//! 第一个非空结果生效，不做合并，也不做 trim。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::Result;
use crate::models::InboundRequest;

/// 查询参数名
pub const QUERY_PARAM: &str = "q";
/// 请求体字段名
pub const BODY_FIELD: &str = "searchTerm";

/// 请求体的解析结果
#[derive(Debug, Clone, PartialEq)]
enum BodyTerm {
    /// 请求体是 JSON 对象
    Json(Option<String>),
    /// 请求体按表单解析
    Form(Option<String>),
}

impl BodyTerm {
    fn into_term(self) -> Option<String> {
        match self {
            BodyTerm::Json(term) | BodyTerm::Form(term) => term,
        }
    }
}

/// 从入站请求中提取搜索词
///
/// 空字符串视为缺失。请求体解码失败（非法 base64、非 UTF-8）返回错误。
pub fn extract_search_term(request: &InboundRequest) -> Result<Option<String>> {
    if let Some(term) = request.query_param(QUERY_PARAM).filter(|q| !q.is_empty()) {
        return Ok(Some(term.to_string()));
    }

    let Some(raw) = request.non_empty_body() else {
        return Ok(None);
    };

    let text = decode_body(raw, request.body_is_encoded)?;
    Ok(parse_body(&text).into_term().filter(|t| !t.is_empty()))
}

/// 按传输编码还原文本请求体
///
/// base64 内容中的 ASCII 空白（如按行折断的编码输出）在解码前去除。
fn decode_body(raw: &[u8], is_encoded: bool) -> Result<String> {
    let bytes = if is_encoded {
        let compact: Vec<u8> = raw
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        STANDARD.decode(compact)?
    } else {
        raw.to_vec()
    };
    Ok(String::from_utf8(bytes)?)
}

fn parse_body(text: &str) -> BodyTerm {
    parse_json_body(text)
        .map(BodyTerm::Json)
        .unwrap_or_else(|| BodyTerm::Form(parse_form_body(text)))
}

/// 请求体不是 JSON 对象时返回 None
fn parse_json_body(text: &str) -> Option<Option<String>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map.get(BODY_FIELD).and_then(json_term)),
        _ => None,
    }
}

/// 字符串原样使用，非零数字与 `true` 取其 JSON 文本；null、`false`、`0`、数组和对象视为缺失
fn json_term(value: &Value) -> Option<String> {
    match value {
        Value::String(term) => Some(term.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some(true.to_string()),
        _ => None,
    }
}

/// 取第一个非空的 `searchTerm` 值
fn parse_form_body(text: &str) -> Option<String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(text)
        .ok()?
        .into_iter()
        .find(|(key, value)| key == BODY_FIELD && !value.is_empty())
        .map(|(_, value)| value)
}
