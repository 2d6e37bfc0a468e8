//! 统一错误模型
//! 所有请求失败都经由 AppError 呈现为同一种 HTML 错误页

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("{action}: {source}")]
    Backend {
        action: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// 后端写操作失败，`action` 是展示给用户的提示
    pub fn backend(action: &'static str, source: BackendError) -> Self {
        AppError::Backend { action, source }
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Backend { .. } => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Session(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含后端返回的细节）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend { action, .. } => action.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Config(_) | AppError::Session(_) | AppError::Template(_) => {
                "Erro interno do servidor".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = crate::middleware::current_request_id()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        // 完整错误只进日志
        tracing::error!(
            code = self.code(),
            message = %self,
            request_id = %request_id,
            "Application error"
        );

        (status, Html(error_page(self.code(), &self.user_message(), &request_id))).into_response()
    }
}

fn error_page(code: u16, message: &str, request_id: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>Erro {code}</title></head>\n\
         <body>\n<main class=\"erro\" data-code=\"{code}\">\n<h1>{message}</h1>\n\
         <p>Código da requisição: <code>{request_id}</code></p>\n\
         <p><a href=\"/\">Voltar ao início</a></p>\n</main>\n</body>\n</html>\n",
        code = code,
        message = tera::escape_html(message),
        request_id = request_id,
    )
}
