use serde::Serialize;

use super::Assumptions;

/// 환경 효과 추정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalImpact {
    /// 분석 기간 동안 회피한 CO₂ [t]
    pub co2_tons: f64,
    /// 나무 환산 그루 수
    pub trees_equivalent: u64,
}

/// 첫해 연간 발전량으로 분석 기간 동안의 CO₂ 회피량을 추정한다.
///
/// 열화는 반영하지 않는다.
pub fn estimate_impact(base_annual_generation_kwh: f64, assumptions: &Assumptions) -> EnvironmentalImpact {
    let co2_kg = base_annual_generation_kwh.max(0.0)
        * f64::from(assumptions.horizon_years)
        * assumptions.co2_kg_per_kwh;
    EnvironmentalImpact {
        co2_tons: co2_kg / 1000.0,
        trees_equivalent: (co2_kg / assumptions.co2_kg_per_tree).floor() as u64,
    }
}
