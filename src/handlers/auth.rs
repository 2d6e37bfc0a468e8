//! 登录与登出处理器

use crate::{
    auth::{end_session, start_session, SessionUser, HOME_PATH, LOGIN_PATH},
    error::AppError,
    middleware::AppState,
    models::LoginForm,
    views::{LoginPage, Page},
};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tower_sessions::Session;

/// 登录失败时展示的通用提示，不暴露后端的具体原因
pub const LOGIN_ERROR: &str = "Usuário ou senha incorretos!";

/// 登录页
pub async fn login_page(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    Ok(state
        .views
        .render(Page::Login, &LoginPage { erro: None })?
        .into_response())
}

/// 登录
///
/// 凭据原样转发给后端校验，成功后写入会话。
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let role = match state.backend.authenticate(&form).await {
        Ok(role) => role,
        Err(e) => {
            tracing::error!(
                username = form.username.as_deref().unwrap_or("-"),
                error = %e,
                "Login failed"
            );
            return Ok(state
                .views
                .render(Page::Login, &LoginPage { erro: Some(LOGIN_ERROR) })?
                .into_response());
        }
    };

    let user = SessionUser::new(
        form.username.unwrap_or_default(),
        form.password.unwrap_or_default(),
        role,
    );
    start_session(&session, &user).await?;

    tracing::info!(username = %user.username, role = %user.role, "User logged in");

    Ok(Redirect::to(HOME_PATH).into_response())
}

/// 登出
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    end_session(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}
