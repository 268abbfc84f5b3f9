use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_positive, CalcError};

/// 계산 전반에 쓰이는 도메인 가정값 테이블.
///
/// 지역 보정이나 테스트를 위해 각 값을 개별적으로 덮어쓸 수 있다.
/// config.toml의 `[assumptions]` 섹션에서 읽으며, 빠진 항목은 기본값을 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// 시스템 손실(배선, 인버터, 온도, 오염)을 반영한 기본 성능비(0~1)
    pub base_performance_ratio: f64,
    /// 월 환산 일수 [일]. 달력 기준이 아닌 고정 근사값
    pub days_per_month: f64,
    /// 모듈 1장당 점유 면적 [m²]
    pub module_area_m2: f64,
    /// 카탈로그에 모듈이 없을 때 쓰는 정격 출력 [W]
    pub default_module_power_w: f64,
    /// 과적재 경고 기준 (DC/AC)
    pub oversizing_advisory_limit: f64,
    /// 분석 기간 [년]
    pub horizon_years: u32,
    /// 대규모 정비(인버터 교체) 발생 연도
    pub maintenance_year: u32,
    /// 대규모 정비 비용 비율 (총 투자비 대비, 0~1)
    pub maintenance_fraction: f64,
    /// 계통 대체 CO₂ 배출계수 [kg/kWh]
    pub co2_kg_per_kwh: f64,
    /// 나무 1그루 환산 CO₂ 흡수량 [kg]
    pub co2_kg_per_tree: f64,
    /// 월별 발전 계수 (1월~12월). 평균 1.0 기준
    pub monthly_yield_factors: [f64; 12],
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            base_performance_ratio: 0.78,
            days_per_month: 30.0,
            module_area_m2: 2.27,
            default_module_power_w: 550.0,
            oversizing_advisory_limit: 1.35,
            horizon_years: 25,
            maintenance_year: 12,
            maintenance_fraction: 0.35,
            co2_kg_per_kwh: 0.4,
            co2_kg_per_tree: 150.0,
            // 북동부 해안 기준: 건기(9~2월) 상승, 우기(4~7월) 하락
            monthly_yield_factors: [
                1.08, 1.05, 1.03, 0.95, 0.88, 0.84, 0.86, 0.95, 1.03, 1.10, 1.12, 1.11,
            ],
        }
    }
}

impl Assumptions {
    /// 나눗셈 분모로 쓰이는 값과 비율 범위를 검사한다.
    pub fn validate(&self) -> Result<(), CalcError> {
        ensure_positive(
            self.base_performance_ratio,
            "기본 성능비는 0보다 커야 합니다.",
        )?;
        if self.base_performance_ratio > 1.0 {
            return Err(CalcError::InvalidInput("기본 성능비는 1 이하여야 합니다."));
        }
        ensure_positive(self.days_per_month, "월 환산 일수는 0보다 커야 합니다.")?;
        ensure_non_negative(self.module_area_m2, "모듈 면적은 0 이상이어야 합니다.")?;
        ensure_positive(
            self.default_module_power_w,
            "기본 모듈 출력은 0보다 커야 합니다.",
        )?;
        ensure_positive(
            self.oversizing_advisory_limit,
            "과적재 경고 기준은 0보다 커야 합니다.",
        )?;
        if self.horizon_years == 0 {
            return Err(CalcError::InvalidInput("분석 기간은 1년 이상이어야 합니다."));
        }
        ensure_non_negative(
            self.maintenance_fraction,
            "정비 비용 비율은 0 이상이어야 합니다.",
        )?;
        ensure_non_negative(self.co2_kg_per_kwh, "CO₂ 배출계수는 0 이상이어야 합니다.")?;
        ensure_positive(self.co2_kg_per_tree, "나무 흡수량은 0보다 커야 합니다.")?;
        if self
            .monthly_yield_factors
            .iter()
            .any(|f| !f.is_finite() || *f < 0.0)
        {
            return Err(CalcError::InvalidInput("월별 발전 계수는 0 이상이어야 합니다."));
        }
        Ok(())
    }
}
