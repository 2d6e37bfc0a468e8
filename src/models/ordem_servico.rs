//! 服务单（Ordem de Serviço）模型
//! 表单字段在这里被组装成后端需要的结构，这是本层唯一做输入整形的地方

use serde::{Deserialize, Serialize};

/// 浏览器提交的新建服务单表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdemServicoForm {
    pub descricao: Option<String>,
    pub valor: Option<String>,
    pub cliente_id: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub imei: Option<String>,
    pub senha_dispositivo: Option<String>,
    pub acessorios: Option<String>,
}

/// 客户引用，后端按 id 关联，id 按表单原样提交
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClienteRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// 发往后端 `POST /api/os` 的请求体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaOrdemServico {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    /// 无法解析时序列化为 null
    pub valor: Option<f64>,
    pub cliente: ClienteRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha_dispositivo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acessorios: Option<String>,
}

impl From<OrdemServicoForm> for NovaOrdemServico {
    fn from(form: OrdemServicoForm) -> Self {
        Self {
            descricao: form.descricao,
            valor: form.valor.as_deref().and_then(parse_valor),
            cliente: ClienteRef {
                id: form.cliente_id,
            },
            marca: form.marca,
            modelo: form.modelo,
            imei: form.imei,
            senha_dispositivo: form.senha_dispositivo,
            acessorios: form.acessorios,
        }
    }
}

/// 解析金额，只接受有限的十进制数
pub fn parse_valor(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
