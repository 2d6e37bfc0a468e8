//! 会话存储
//!
//! 会话数据只保存在服务端内存中，Cookie 里只有加密后的会话 id。
//! 密码以明文形式保留在会话记录里，仅用于转发给需要凭据的后端端点，
//! 这是本层唯一的信任边界：内存中始终以 `Secret` 包装，不进入日志。

use axum::Router;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};
use tower_sessions::{
    cookie::{time::Duration, Key, SameSite},
    session, Expiry, MemoryStore, Session, SessionManagerLayer,
};

use crate::{backend::Credentials, config::SessionConfig, error::AppError, models::Role};

/// 会话中保存用户信息的键
pub const SESSION_USER_KEY: &str = "usuario";

/// 已登录的会话用户，登录后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(serialize_with = "expose_password")]
    password: Secret<String>,
    pub role: Role,
}

impl SessionUser {
    pub fn new(username: String, password: String, role: Role) -> Self {
        Self {
            username,
            password: Secret::new(password),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// 转发给后端的凭据
    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

fn expose_password<S>(password: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(password.expose_secret())
}

/// 读取当前会话用户
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, session::Error> {
    session.get::<SessionUser>(SESSION_USER_KEY).await
}

/// 登录成功后建立会话，先轮换会话 id 防止会话固定
pub async fn start_session(session: &Session, user: &SessionUser) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user).await
}

/// 销毁会话
pub async fn end_session(session: &Session) -> Result<(), session::Error> {
    session.flush().await
}

/// 根据配置给路由挂载会话层
///
/// 会话 id 使用私有 Cookie（加密 + 认证）下发。
pub fn with_sessions<S>(router: Router<S>, config: &SessionConfig) -> Result<Router<S>, AppError>
where
    S: Clone + Send + Sync + 'static,
{
    let key = Key::try_from(config.secret.expose_secret().as_bytes())
        .map_err(|e| AppError::Config(format!("Invalid session secret: {}", e)))?;

    let expiry = match config.idle_timeout_secs {
        0 => Expiry::OnSessionEnd,
        secs => Expiry::OnInactivity(Duration::seconds(secs as i64)),
    };

    let layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure_cookie)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(expiry)
        .with_private(key);

    Ok(router.layer(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_leak_password() {
        let user = SessionUser::new("ana".to_string(), "pw-ana".to_string(), Role::Admin);
        let debug = format!("{:?}", user);
        assert!(debug.contains("ana"));
        assert!(!debug.contains("pw-ana"));
    }

    #[test]
    fn test_session_record_roundtrip_keeps_credentials() {
        let user = SessionUser::new("ana".to_string(), "pw-ana".to_string(), Role::Funcionario);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "FUNCIONARIO");

        let restored: SessionUser = serde_json::from_value(value).unwrap();
        let credentials = restored.credentials();
        assert_eq!(credentials.username, "ana");
        assert_eq!(credentials.password, "pw-ana");
        assert!(!restored.is_admin());
    }

    #[test]
    fn test_sessions_reject_short_key() {
        let config = SessionConfig {
            secret: Secret::new("short".to_string()),
            cookie_name: "portal.sid".to_string(),
            secure_cookie: false,
            idle_timeout_secs: 0,
        };
        let result = with_sessions(Router::<()>::new(), &config);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
