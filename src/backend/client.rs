//! 后端 API HTTP 客户端

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::endpoint::{AuthPolicy, Endpoint};
use crate::models::{LoginForm, LoginResponse, Role};

/// 后端调用错误
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid backend base url: {0}")]
    InvalidBaseUrl(String),

    #[error("Backend request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Endpoint {0} requires session credentials")]
    MissingCredentials(String),
}

impl BackendError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// 转发给后端的会话凭据
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 后端 API 客户端
///
/// 内部的 `reqwest::Client` 自带连接池，Clone 成本低。
/// 不设置超时，也不做重试。
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// 创建新的客户端
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder().build().map_err(BackendError::Transport)?;

        Ok(Self { client, base_url })
    }

    /// 拼接端点地址，路径段逐个转义
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    /// 发送请求
    ///
    /// 只有声明为 `SessionCredentials` 的端点才会附带凭据，其余端点即使传入
    /// 凭据也会忽略。非 2xx 响应视为失败。
    pub async fn send<B>(
        &self,
        endpoint: &Endpoint,
        credentials: Option<Credentials<'_>>,
        body: Option<&B>,
    ) -> Result<Response, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(endpoint)?;
        let mut request = self.client.request(endpoint.method(), url);

        let authenticated = match endpoint.auth_policy() {
            AuthPolicy::SessionCredentials => {
                let credentials = credentials
                    .ok_or_else(|| BackendError::MissingCredentials(endpoint.path()))?;
                request = request.basic_auth(credentials.username, Some(credentials.password));
                true
            }
            AuthPolicy::Anonymous => false,
        };

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(
            method = %endpoint.method(),
            path = %endpoint.path(),
            authenticated,
            "Calling backend"
        );

        let response = request.send().await.map_err(BackendError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                method = %endpoint.method(),
                path = %endpoint.path(),
                status = status.as_u16(),
                "Backend returned error status"
            );
            return Err(BackendError::Status { status, body });
        }

        Ok(response)
    }

    /// GET 并解析 JSON
    pub async fn fetch<T>(
        &self,
        endpoint: &Endpoint,
        credentials: Option<Credentials<'_>>,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let response = self.send::<()>(endpoint, credentials, None).await?;
        response.json::<T>().await.map_err(BackendError::Decode)
    }

    /// 执行写操作，忽略响应体
    pub async fn execute<B>(
        &self,
        endpoint: &Endpoint,
        credentials: Option<Credentials<'_>>,
        body: Option<&B>,
    ) -> Result<(), BackendError>
    where
        B: Serialize + ?Sized,
    {
        self.send(endpoint, credentials, body).await?;
        Ok(())
    }

    /// 登录校验，成功时返回后端给出的角色
    ///
    /// 响应体缺失或无法解析时按 `FUNCIONARIO` 处理。
    pub async fn authenticate(&self, form: &LoginForm) -> Result<Role, BackendError> {
        let response = self.send(&Endpoint::Login, None, Some(form)).await?;
        let bytes = response.bytes().await.map_err(BackendError::Decode)?;
        let login: LoginResponse = serde_json::from_slice(&bytes).unwrap_or_default();
        Ok(Role::from_papel(login.papel.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_keeps_base_path_and_escapes_ids() {
        let client = BackendClient::new("http://backend:8080/v1/").unwrap();

        let url = client.url_for(&Endpoint::Dashboard).unwrap();
        assert_eq!(url.as_str(), "http://backend:8080/v1/api/dashboard");

        let url = client
            .url_for(&Endpoint::GetCliente("../auth/login".to_string()))
            .unwrap();
        assert_eq!(url.as_str(), "http://backend:8080/v1/api/clientes/..%2Fauth%2Flogin");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(BackendError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            BackendClient::new("mailto:ops@example.com"),
            Err(BackendError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "joao",
            password: "segredo",
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("joao"));
        assert!(!debug.contains("segredo"));
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected_before_sending() {
        let client = BackendClient::new("http://127.0.0.1:9").unwrap();
        let result = client
            .fetch::<serde_json::Value>(&Endpoint::GetOrdem("1".to_string()), None)
            .await;
        assert!(matches!(result, Err(BackendError::MissingCredentials(_))));
    }

    #[test]
    fn test_not_found_detection() {
        let err = BackendError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!BackendError::MissingCredentials("/api/os".into()).is_not_found());
    }
}
