// ==========================================
// 今日环境累计量看板 - 领域类型定义
// ==========================================
// 计量单位 + 指标标识
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计量单位 (Quantity Unit)
// ==========================================
// 序列化格式: snake_case (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Kilograms,  // 千克
    Milligrams, // 毫克
    Hectares,   // 公顷
    MetricTons, // 公吨
}

impl QuantityUnit {
    /// 展示用单位符号
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantityUnit::Kilograms => "kg",
            QuantityUnit::Milligrams => "mg",
            QuantityUnit::Hectares => "ha",
            QuantityUnit::MetricTons => "t",
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ==========================================
// 指标标识 (Metric Id)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    PlasticProduced,      // 今日塑料产量
    OceanPlastic,         // 今日入海塑料
    MicroplasticIngested, // 今日人均摄入微塑料
    LandLost,             // 今日土地流失
    Co2Emitted,           // 今日二氧化碳排放
}

impl MetricId {
    /// i18n 标签键
    pub fn label_key(&self) -> &'static str {
        match self {
            MetricId::PlasticProduced => "metric.plastic_produced",
            MetricId::OceanPlastic => "metric.ocean_plastic",
            MetricId::MicroplasticIngested => "metric.microplastic_ingested",
            MetricId::LandLost => "metric.land_lost",
            MetricId::Co2Emitted => "metric.co2_emitted",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricId::PlasticProduced => write!(f, "plastic_produced"),
            MetricId::OceanPlastic => write!(f, "ocean_plastic"),
            MetricId::MicroplasticIngested => write!(f, "microplastic_ingested"),
            MetricId::LandLost => write!(f, "land_lost"),
            MetricId::Co2Emitted => write!(f, "co2_emitted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_symbol() {
        assert_eq!(QuantityUnit::Kilograms.to_string(), "kg");
        assert_eq!(QuantityUnit::Milligrams.to_string(), "mg");
        assert_eq!(QuantityUnit::MetricTons.symbol(), "t");
    }

    #[test]
    fn test_metric_id_serde_snake_case() {
        let json = serde_json::to_string(&MetricId::MicroplasticIngested).unwrap();
        assert_eq!(json, "\"microplastic_ingested\"");

        let parsed: MetricId = serde_json::from_str("\"co2_emitted\"").unwrap();
        assert_eq!(parsed, MetricId::Co2Emitted);
    }
}
