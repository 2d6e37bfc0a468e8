//! 用户管理的 HTTP 处理器（仅管理员）

use crate::{
    auth::{SessionUser, HOME_PATH},
    backend::Endpoint,
    error::AppError,
    middleware::AppState,
    models::FormFields,
    views::{Nav, Page, Section, UsuarioFormPage},
};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;

/// 新建用户表单
pub async fn new_usuario_form(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Html<String>, AppError> {
    state.views.render(
        Page::UsuarioForm,
        &UsuarioFormPage {
            nav: Nav::new(&user, Section::Admin),
        },
    )
}

/// 创建用户，表单原样转发
pub async fn create_usuario(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute(&Endpoint::CreateUsuario, Some(user.credentials()), Some(&fields))
        .await
        .map_err(|e| AppError::backend("Erro ao criar usuário", e))?;

    tracing::info!(
        created = fields.get("username").map(String::as_str).unwrap_or("-"),
        by = %user.username,
        "Usuario created"
    );

    Ok(Redirect::to(HOME_PATH))
}
