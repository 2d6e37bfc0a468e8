//! 角色模型
//! 后端登录响应中的 `papel` 字段决定会话角色

use serde::{Deserialize, Serialize};
use std::fmt;

/// 会话角色
///
/// 只有 `ADMIN` 被识别为管理员，其余取值（包括缺失）一律视为 `FUNCIONARIO`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Funcionario,
}

impl Role {
    /// 从后端返回的 `papel` 解析角色
    pub fn from_papel(papel: Option<&str>) -> Self {
        match papel {
            Some("ADMIN") => Role::Admin,
            _ => Role::Funcionario,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Funcionario => "FUNCIONARIO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
