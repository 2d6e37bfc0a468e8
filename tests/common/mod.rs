//! 测试公共模块
//! 提供测试配置、请求构造与登录辅助函数

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use mockito::{Matcher, ServerGuard};
use oficina_portal::{
    config::{AppConfig, BackendConfig, LoggingConfig, ServerConfig, SessionConfig},
    middleware::AppState,
    routes,
};
use secrecy::Secret;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "portal.sid";

pub const ADMIN: (&str, &str) = ("ana", "pw-ana");
pub const STAFF: (&str, &str) = ("bia", "pw-bia");

/// `ana:pw-ana` 的 Basic 认证头
pub const ADMIN_BASIC_AUTH: &str = "Basic YW5hOnB3LWFuYQ==";
/// `bia:pw-bia` 的 Basic 认证头
pub const STAFF_BASIC_AUTH: &str = "Basic YmlhOnB3LWJpYQ==";

/// 创建测试配置
pub fn create_test_config(backend_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        backend: BackendConfig {
            base_url: backend_url.to_string(),
        },
        session: SessionConfig {
            secret: Secret::new(
                "test-session-secret-for-testing-only-0123456789-abcdefghijklmnopqrstuvwxyz"
                    .to_string(),
            ),
            cookie_name: COOKIE_NAME.to_string(),
            secure_cookie: false,
            idle_timeout_secs: 0,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// 创建指向给定后端的应用
pub fn create_test_app(backend_url: &str) -> Router {
    let state = AppState::new(create_test_config(backend_url)).expect("Failed to build app state");
    routes::create_router(Arc::new(state)).expect("Failed to build router")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// 提取会话 Cookie（`name=value`）
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", COOKIE_NAME)))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// 断言响应是重定向到 `target`
pub fn assert_redirect(response: &Response<Body>, target: &str) {
    assert!(
        response.status().is_redirection(),
        "expected redirect to {}, got {}",
        target,
        response.status()
    );
    assert_eq!(location(response).as_deref(), Some(target));
}

/// 通过模拟后端登录，返回会话 Cookie
///
/// `papel` 为 None 时后端响应中不带角色字段。
pub async fn login(
    app: &Router,
    server: &mut ServerGuard,
    user: (&str, &str),
    papel: Option<&str>,
) -> String {
    let (username, password) = user;
    let body = match papel {
        Some(papel) => json!({ "papel": papel }),
        None => json!({}),
    };

    let login_mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "username": username,
            "password": password
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let response = send(
        app,
        post_form(
            "/login",
            &format!("username={}&password={}", username, password),
            None,
        ),
    )
    .await;

    login_mock.assert_async().await;
    assert_redirect(&response, "/");

    session_cookie(&response).expect("login should set a session cookie")
}

pub async fn login_admin(app: &Router, server: &mut ServerGuard) -> String {
    login(app, server, ADMIN, Some("ADMIN")).await
}

pub async fn login_staff(app: &Router, server: &mut ServerGuard) -> String {
    login(app, server, STAFF, Some("FUNCIONARIO")).await
}
