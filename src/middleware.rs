//! HTTP 中间件
//! 应用状态与请求追踪

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{backend::BackendClient, config::AppConfig, views::Views};

tokio::task_local! {
    /// 当前请求的 request_id，错误页与响应头使用同一个值
    static REQUEST_ID: String;
}

/// 当前请求的 request_id，不在请求上下文中时返回 None
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 应用状态
///
/// 请求之间不共享可变状态，会话数据由会话层单独管理。
pub struct AppState {
    pub config: AppConfig,
    pub backend: BackendClient,
    pub views: Views,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, crate::error::AppError> {
        let backend = BackendClient::new(config.backend_base_url())
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        let views = Views::new()?;

        Ok(Self {
            config,
            backend,
            views,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let scoped_id = request_id.clone();
    async move {
        let start = Instant::now();

        let mut response = REQUEST_ID.scope(scoped_id, next.run(req)).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!(
            "portal_http_requests_total",
            "method" => method.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("portal_http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
