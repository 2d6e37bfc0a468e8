//! 仪表盘指标

use serde::{Deserialize, Deserializer, Serialize};

/// 后端 `/api/dashboard` 返回的汇总指标
///
/// 字段缺失或为 null（例如空表上的聚合）时按 0 处理。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub total_clientes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub os_abertas: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub faturamento_total: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zeroed_metrics_shape() {
        let value = serde_json::to_value(DashboardMetrics::default()).unwrap();
        assert_eq!(
            value,
            json!({"totalClientes": 0, "osAbertas": 0, "faturamentoTotal": 0.0})
        );
    }

    #[test]
    fn test_partial_payload_defaults_missing_fields() {
        let metrics: DashboardMetrics =
            serde_json::from_value(json!({"totalClientes": 12})).unwrap();
        assert_eq!(metrics.total_clientes, 12);
        assert_eq!(metrics.os_abertas, 0);
    }

    #[test]
    fn test_null_metrics_read_as_zero() {
        let metrics: DashboardMetrics = serde_json::from_value(json!({
            "totalClientes": 4,
            "osAbertas": null,
            "faturamentoTotal": null
        }))
        .unwrap();
        assert_eq!(metrics.total_clientes, 4);
        assert_eq!(metrics.os_abertas, 0);
        assert_eq!(metrics.faturamento_total, 0.0);
    }
}
