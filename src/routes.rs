//! 路由注册
//! 创建所有页面路由并应用中间件

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    auth::{require_admin, require_authenticated, with_sessions},
    error::AppError,
    handlers::{auth, clientes, dashboard, health, ordens, usuarios},
    middleware::AppState,
};

/// 表单请求体上限
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
///
/// 管理员路由先经过登录检查再经过管理员检查。
pub fn create_router(state: Arc<AppState>) -> Result<Router, AppError> {
    // 公开端点
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout));

    // 仅管理员
    let admin_routes = Router::new()
        .route("/excluir/{id}", get(clientes::delete_cliente))
        .route("/os/excluir/{id}", get(ordens::delete_ordem))
        .route("/usuarios/novo", get(usuarios::new_usuario_form))
        .route("/usuarios/salvar", post(usuarios::create_usuario))
        .route_layer(from_fn(require_admin));

    // 需要登录的路由
    let authenticated_routes = Router::new()
        .route("/", get(dashboard::dashboard))
        // 客户
        .route("/clientes", get(clientes::list_clientes))
        .route("/cadastro", get(clientes::new_cliente_form))
        .route("/salvar", post(clientes::create_cliente))
        .route("/editar/{id}", get(clientes::edit_cliente_form))
        .route("/atualizar", post(clientes::update_cliente))
        // 服务单
        .route("/os", get(ordens::list_ordens))
        .route("/os/nova", get(ordens::new_ordem_form))
        .route("/os/salvar", post(ordens::create_ordem))
        .route("/os/finalizar/{id}", get(ordens::finalize_ordem))
        .route("/os/cancelar/{id}", get(ordens::cancel_ordem))
        .route("/os/detalhes/{id}", get(ordens::ordem_detalhes))
        .merge(admin_routes)
        .route_layer(from_fn(require_authenticated));

    let router = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(state.clone());

    let router = with_sessions(router, &state.config.session)?;

    Ok(router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(from_fn(crate::middleware::request_tracking_middleware))
        .layer(TraceLayer::new_for_http()))
}
