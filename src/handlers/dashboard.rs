//! 仪表盘处理器

use crate::{
    auth::SessionUser,
    backend::Endpoint,
    error::AppError,
    middleware::AppState,
    models::DashboardMetrics,
    views::{DashboardPage, Nav, Page, Section},
};
use axum::{extract::State, response::Html};
use std::sync::Arc;

pub const CONNECTION_ERROR: &str = "Erro de conexão";

/// 仪表盘
///
/// 后端不可用时展示全零指标和连接错误提示，页面本身不报错。
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Html<String>, AppError> {
    let (dados, erro) = match state
        .backend
        .fetch::<DashboardMetrics>(&Endpoint::Dashboard, Some(user.credentials()))
        .await
    {
        Ok(dados) => (dados, None),
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard metrics unavailable");
            (DashboardMetrics::default(), Some(CONNECTION_ERROR))
        }
    };

    state.views.render(
        Page::Dashboard,
        &DashboardPage {
            nav: Nav::new(&user, Section::Dashboard),
            dados,
            erro,
        },
    )
}
