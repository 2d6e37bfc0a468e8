//! 访问控制中间件
//!
//! `require_authenticated` 必须先于 `require_admin` 执行，
//! 这样匿名访问管理页面时看到的是登录页而不是首页。

use crate::{
    auth::session::{current_user, SessionUser},
    error::AppError,
};
use axum::{
    extract::{FromRequestParts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

// 实现 FromRequestParts 以便在 handler 中直接提取 SessionUser
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// 登录检查：未登录重定向到登录页
pub async fn require_authenticated(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match current_user(&session).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Anonymous request redirected to login");
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
    }
}

/// 管理员检查：非管理员静默重定向到首页
pub async fn require_admin(req: Request, next: Next) -> Response {
    let user = req.extensions().get::<SessionUser>();

    if user.is_some_and(SessionUser::is_admin) {
        return next.run(req).await;
    }

    tracing::info!(
        username = user.map(|u| u.username.as_str()).unwrap_or("-"),
        path = %req.uri().path(),
        "Non-admin request redirected to home"
    );
    Redirect::to(HOME_PATH).into_response()
}
