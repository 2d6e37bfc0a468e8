//! 客户管理的 HTTP 处理器

use crate::{
    auth::SessionUser,
    backend::Endpoint,
    error::AppError,
    middleware::AppState,
    models::FormFields,
    views::{ClienteFormPage, ClientesPage, Nav, Page, Section},
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde_json::Value;
use std::sync::Arc;

pub const CLIENTES_PATH: &str = "/clientes";

/// 列表加载失败时的提示
pub const LIST_ERROR: &str = "Erro ao carregar os dados";

/// 列出客户
pub async fn list_clientes(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Html<String>, AppError> {
    let (clientes, erro) = match state
        .backend
        .fetch::<Vec<Value>>(&Endpoint::ListClientes, Some(user.credentials()))
        .await
    {
        Ok(clientes) => (clientes, None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list clientes");
            (Vec::new(), Some(LIST_ERROR))
        }
    };

    state.views.render(
        Page::Clientes,
        &ClientesPage {
            nav: Nav::new(&user, Section::Clientes),
            clientes,
            erro,
        },
    )
}

/// 新建客户表单
pub async fn new_cliente_form(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Html<String>, AppError> {
    state.views.render(
        Page::ClienteForm,
        &ClienteFormPage {
            nav: Nav::new(&user, Section::Clientes),
            cliente: None,
        },
    )
}

/// 创建客户，表单原样转发
pub async fn create_cliente(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute(&Endpoint::CreateCliente, Some(user.credentials()), Some(&fields))
        .await
        .map_err(|e| AppError::backend("Erro ao salvar cliente", e))?;

    Ok(Redirect::to(CLIENTES_PATH))
}

/// 编辑客户表单，客户不存在或后端不可用时回到列表
pub async fn edit_cliente_form(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let cliente = match state
        .backend
        .fetch::<Value>(&Endpoint::GetCliente(id.clone()), Some(user.credentials()))
        .await
    {
        Ok(cliente) => cliente,
        Err(e) => {
            tracing::warn!(id = %id, not_found = e.is_not_found(), error = %e, "Failed to load cliente");
            return Ok(Redirect::to(CLIENTES_PATH).into_response());
        }
    };

    Ok(state
        .views
        .render(
            Page::ClienteForm,
            &ClienteFormPage {
                nav: Nav::new(&user, Section::Clientes),
                cliente: Some(cliente),
            },
        )?
        .into_response())
}

/// 更新客户，id 取自表单
pub async fn update_cliente(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    let id = fields
        .get("id")
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Cliente sem identificador".to_string()))?;

    state
        .backend
        .execute(&Endpoint::UpdateCliente(id), Some(user.credentials()), Some(&fields))
        .await
        .map_err(|e| AppError::backend("Erro ao atualizar cliente", e))?;

    Ok(Redirect::to(CLIENTES_PATH))
}

/// 删除客户（仅管理员）
pub async fn delete_cliente(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute::<()>(&Endpoint::DeleteCliente(id.clone()), Some(user.credentials()), None)
        .await
        .map_err(|e| AppError::backend("Erro ao excluir cliente", e))?;

    tracing::info!(id = %id, username = %user.username, "Cliente deleted");

    Ok(Redirect::to(CLIENTES_PATH))
}
