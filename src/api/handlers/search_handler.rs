use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
    http::HeaderMap,
};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{Instrument, debug, error, info_span, warn};
use uuid::Uuid;

use crate::{
    api::{app_state::AppState, dto::search_dto::*},
    error::{AppError, Result},
    models::{InboundRequest, SearchHit},
    services::extract_search_term,
};

/// 声明请求体为 base64 编码的请求头
pub const BODY_ENCODING_HEADER: &str = "content-transfer-encoding";

/// GET/POST 搜索：`?q=` 或 JSON / 表单请求体中的 `searchTerm`
pub async fn search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> AdapterResponse {
    let request = inbound_from_http(query.as_deref(), &headers, body);
    handle_search(&state, request).await
}

/// API Gateway 代理事件入口
///
/// 事件自行解析，格式错误同样以代理响应返回。
pub async fn invoke(State(state): State<AppState>, body: Bytes) -> Json<ProxyResponse> {
    let response = match ProxyEvent::from_slice(&body) {
        Ok(event) => handle_search(&state, InboundRequest::from(event)).await,
        Err(err) => {
            state.metrics.record_error();
            error!("Malformed proxy event: {}", err);
            AdapterResponse::from(err)
        }
    };
    Json(response.into_proxy_response())
}

/// 处理一次搜索调用，所有错误都在这里转换为 JSON 响应
pub async fn handle_search(state: &AppState, request: InboundRequest) -> AdapterResponse {
    let span = info_span!("search", request_id = %Uuid::new_v4());

    async move {
        debug!("Inbound request: {:?}", request);

        let result = run_search(state, &request).await;
        if let Err(err) = &result {
            match err {
                AppError::Validation(message) => {
                    state.metrics.record_missing_term();
                    warn!("Rejected request: {}", message);
                }
                _ => {
                    state.metrics.record_error();
                    error!("Search failed: {}", err);
                }
            }
        }

        AdapterResponse::from_result(result)
    }
    .instrument(span)
    .await
}

async fn run_search(state: &AppState, request: &InboundRequest) -> Result<Vec<SearchHit>> {
    let term = extract_search_term(request)?.ok_or_else(AppError::missing_term)?;

    let start_time = Instant::now();
    let result = state.search_service.search(&term).await;
    state
        .metrics
        .record_search(start_time.elapsed().as_millis() as u64);

    let hits = result?;
    debug!("Returning {} hits", hits.len());
    Ok(hits)
}

fn inbound_from_http(query: Option<&str>, headers: &HeaderMap, body: Bytes) -> InboundRequest {
    let query_parameters = query
        .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
        .filter(|pairs| !pairs.is_empty())
        .map(|pairs| pairs.into_iter().collect::<HashMap<_, _>>());

    let body_is_encoded = headers
        .get(BODY_ENCODING_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("base64"));

    InboundRequest {
        query_parameters,
        body: (!body.is_empty()).then(|| body.to_vec()),
        body_is_encoded,
    }
}
