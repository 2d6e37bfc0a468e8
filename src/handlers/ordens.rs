//! 服务单的 HTTP 处理器

use crate::{
    auth::SessionUser,
    backend::Endpoint,
    error::AppError,
    handlers::clientes::LIST_ERROR,
    middleware::AppState,
    models::{NovaOrdemServico, OrdemServicoForm},
    views::{Nav, OrdemDetalhesPage, OrdemNovaPage, OrdensPage, Page, Section},
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde_json::Value;
use std::sync::Arc;

pub const ORDENS_PATH: &str = "/os";

/// 列出服务单
pub async fn list_ordens(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Html<String>, AppError> {
    let (lista_os, erro) = match state
        .backend
        .fetch::<Vec<Value>>(&Endpoint::ListOrdens, Some(user.credentials()))
        .await
    {
        Ok(lista) => (lista, None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list ordens de servico");
            (Vec::new(), Some(LIST_ERROR))
        }
    };

    state.views.render(
        Page::OrdensLista,
        &OrdensPage {
            nav: Nav::new(&user, Section::Os),
            lista_os,
            erro,
        },
    )
}

/// 新建服务单表单，需要客户列表供选择
pub async fn new_ordem_form(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
) -> Result<Response, AppError> {
    let clientes = match state
        .backend
        .fetch::<Vec<Value>>(&Endpoint::ListClientes, Some(user.credentials()))
        .await
    {
        Ok(clientes) => clientes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load clientes for new ordem");
            return Ok(Redirect::to(ORDENS_PATH).into_response());
        }
    };

    Ok(state
        .views
        .render(
            Page::OrdemNova,
            &OrdemNovaPage {
                nav: Nav::new(&user, Section::Os),
                clientes,
            },
        )?
        .into_response())
}

/// 创建服务单
///
/// 表单在这里被组装成后端结构；该端点需要会话凭据。
pub async fn create_ordem(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Form(form): Form<OrdemServicoForm>,
) -> Result<Redirect, AppError> {
    let nova = NovaOrdemServico::from(form);

    state
        .backend
        .execute(&Endpoint::CreateOrdem, Some(user.credentials()), Some(&nova))
        .await
        .map_err(|e| AppError::backend("Erro ao salvar ordem de serviço", e))?;

    tracing::info!(username = %user.username, "Ordem de servico created");

    Ok(Redirect::to(ORDENS_PATH))
}

/// 完成服务单
pub async fn finalize_ordem(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute::<()>(&Endpoint::FinalizeOrdem(id), Some(user.credentials()), None)
        .await
        .map_err(|e| AppError::backend("Erro ao finalizar ordem de serviço", e))?;

    Ok(Redirect::to(ORDENS_PATH))
}

/// 取消服务单
pub async fn cancel_ordem(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute::<()>(&Endpoint::CancelOrdem(id), Some(user.credentials()), None)
        .await
        .map_err(|e| AppError::backend("Erro ao cancelar ordem de serviço", e))?;

    Ok(Redirect::to(ORDENS_PATH))
}

/// 删除服务单（仅管理员）
pub async fn delete_ordem(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .backend
        .execute::<()>(&Endpoint::DeleteOrdem(id.clone()), Some(user.credentials()), None)
        .await
        .map_err(|e| AppError::backend("Erro ao excluir ordem de serviço", e))?;

    tracing::info!(id = %id, username = %user.username, "Ordem de servico deleted");

    Ok(Redirect::to(ORDENS_PATH))
}

/// 服务单详情，该端点需要会话凭据；失败时回到列表
pub async fn ordem_detalhes(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let os = match state
        .backend
        .fetch::<Value>(&Endpoint::GetOrdem(id.clone()), Some(user.credentials()))
        .await
    {
        Ok(os) => os,
        Err(e) => {
            tracing::warn!(
                id = %id,
                status = e.status().map(|s| s.as_u16()),
                error = %e,
                "Failed to load ordem de servico"
            );
            return Ok(Redirect::to(ORDENS_PATH).into_response());
        }
    };

    Ok(state
        .views
        .render(
            Page::OrdemDetalhes,
            &OrdemDetalhesPage {
                nav: Nav::new(&user, Section::Os),
                os,
            },
        )?
        .into_response())
}
