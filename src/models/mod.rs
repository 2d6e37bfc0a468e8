//! 数据模型模块
//! 后端 API 的请求与响应结构

use std::collections::BTreeMap;

pub mod auth;
pub mod dashboard;
pub mod ordem_servico;
pub mod role;

/// 原样转发给后端的表单字段（客户、用户表单）
pub type FormFields = BTreeMap<String, String>;

pub use auth::{LoginForm, LoginResponse};
pub use dashboard::DashboardMetrics;
pub use ordem_servico::{NovaOrdemServico, OrdemServicoForm};
pub use role::Role;
