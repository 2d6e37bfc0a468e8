//! 后端端点声明
//!
//! 每个端点自带 HTTP 方法、路径和认证策略。是否附带会话凭据由端点本身
//! 决定，而不是由各个 handler 临时选择。

use reqwest::Method;

/// 端点认证策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// 不附带凭据
    Anonymous,
    /// 以 HTTP Basic 方式附带会话中的用户名和密码
    SessionCredentials,
}

/// 本系统调用的全部后端端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Dashboard,
    ListClientes,
    CreateCliente,
    GetCliente(String),
    UpdateCliente(String),
    DeleteCliente(String),
    ListOrdens,
    CreateOrdem,
    GetOrdem(String),
    FinalizeOrdem(String),
    CancelOrdem(String),
    DeleteOrdem(String),
    CreateUsuario,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::CreateCliente
            | Endpoint::CreateOrdem
            | Endpoint::CreateUsuario => Method::POST,
            Endpoint::UpdateCliente(_) | Endpoint::FinalizeOrdem(_) | Endpoint::CancelOrdem(_) => {
                Method::PUT
            }
            Endpoint::DeleteCliente(_) | Endpoint::DeleteOrdem(_) => Method::DELETE,
            Endpoint::Dashboard
            | Endpoint::ListClientes
            | Endpoint::GetCliente(_)
            | Endpoint::ListOrdens
            | Endpoint::GetOrdem(_) => Method::GET,
        }
    }

    /// 后端对服务单的新建与详情做归属校验，只有这两个端点需要会话凭据
    pub fn auth_policy(&self) -> AuthPolicy {
        match self {
            Endpoint::CreateOrdem | Endpoint::GetOrdem(_) => AuthPolicy::SessionCredentials,
            _ => AuthPolicy::Anonymous,
        }
    }

    /// 路径段（未编码），由客户端负责拼接与转义
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Login => vec!["api", "auth", "login"],
            Endpoint::Dashboard => vec!["api", "dashboard"],
            Endpoint::ListClientes | Endpoint::CreateCliente => vec!["api", "clientes"],
            Endpoint::GetCliente(id) | Endpoint::UpdateCliente(id) | Endpoint::DeleteCliente(id) => {
                vec!["api", "clientes", id.as_str()]
            }
            Endpoint::ListOrdens | Endpoint::CreateOrdem => vec!["api", "os"],
            Endpoint::GetOrdem(id) | Endpoint::DeleteOrdem(id) => vec!["api", "os", id.as_str()],
            Endpoint::FinalizeOrdem(id) => vec!["api", "os", id.as_str(), "finalizar"],
            Endpoint::CancelOrdem(id) => vec!["api", "os", id.as_str(), "cancelar"],
            Endpoint::CreateUsuario => vec!["api", "usuarios"],
        }
    }

    /// 用于日志的路径
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}
