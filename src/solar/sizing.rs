use serde::Serialize;

use super::{ensure_positive, Assumptions, CalcError};

/// 사이징 계산 입력.
#[derive(Debug, Clone)]
pub struct SizingInput {
    /// 월 소비 전력량 [kWh/월]
    pub monthly_consumption_kwh: f64,
    /// 일평균 일사 시간(HSP) [h/일]
    pub full_sun_hours: f64,
    /// 모듈 정격 출력 [W]
    pub module_power_w: f64,
    /// 목표 인버터 AC 용량 [kW]
    pub inverter_capacity_kw: f64,
    /// 방위각/경사 손실 [%], 0 이상 100 미만
    pub azimuth_loss_percent: f64,
}

/// 사이징 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// 손실 보정 후 성능비
    pub performance_ratio: f64,
    /// 이론상 필요한 용량 [kW]
    pub required_capacity_kw: f64,
    /// 모듈 수 [장]
    pub module_count: u32,
    /// 모듈 정격 출력 [W]
    pub module_power_w: f64,
    /// 설치 DC 용량 [kWp]
    pub installed_capacity_kw: f64,
    /// 인버터 AC 용량 [kW]
    pub inverter_capacity_kw: f64,
    /// 과적재율 (DC/AC)
    pub oversizing_ratio: f64,
    /// 필요 지붕 면적 [m²]
    pub roof_area_m2: f64,
}

impl SizingResult {
    /// 첫해 월평균 발전량 [kWh/월]. 열화는 반영하지 않는다.
    pub fn base_monthly_generation_kwh(&self, full_sun_hours: f64, days_per_month: f64) -> f64 {
        self.installed_capacity_kw * full_sun_hours * days_per_month * self.performance_ratio
    }
}

/// 방위각 손실을 반영한 성능비를 계산한다.
pub fn effective_performance_ratio(base_ratio: f64, azimuth_loss_percent: f64) -> f64 {
    base_ratio * (1.0 - azimuth_loss_percent / 100.0)
}

/// 월 소비량과 일사량으로 필요한 모듈 수와 설치 용량을 계산한다.
///
/// 모듈 수는 항상 올림하므로 설치 용량은 이론 요구치보다 작아지지 않는다.
pub fn compute_sizing(
    input: &SizingInput,
    assumptions: &Assumptions,
) -> Result<SizingResult, CalcError> {
    let consumption = ensure_positive(
        input.monthly_consumption_kwh,
        "월 소비량은 0보다 커야 합니다.",
    )?;
    let hsp = ensure_positive(input.full_sun_hours, "일사 시간은 0보다 커야 합니다.")?;
    let module_w = ensure_positive(input.module_power_w, "모듈 출력은 0보다 커야 합니다.")?;
    let inverter_kw = ensure_positive(
        input.inverter_capacity_kw,
        "인버터 용량은 0보다 커야 합니다.",
    )?;
    let loss = input.azimuth_loss_percent;
    if !loss.is_finite() || !(0.0..100.0).contains(&loss) {
        return Err(CalcError::InvalidInput(
            "방위각 손실은 0 이상 100 미만이어야 합니다.",
        ));
    }

    let performance_ratio = effective_performance_ratio(assumptions.base_performance_ratio, loss);
    let required_capacity_kw =
        consumption / (hsp * assumptions.days_per_month * performance_ratio);
    let count = ((required_capacity_kw * 1000.0) / module_w).ceil().max(1.0);
    // u32 범위를 넘으면 잘린 값이 요구 용량보다 작아진다
    if count > f64::from(u32::MAX) {
        return Err(CalcError::InvalidInput(
            "필요한 모듈 수가 표현 가능한 범위를 넘습니다.",
        ));
    }
    let module_count = count as u32;
    let installed_capacity_kw = f64::from(module_count) * module_w / 1000.0;

    Ok(SizingResult {
        performance_ratio,
        required_capacity_kw,
        module_count,
        module_power_w: module_w,
        installed_capacity_kw,
        inverter_capacity_kw: inverter_kw,
        oversizing_ratio: installed_capacity_kw / inverter_kw,
        roof_area_m2: f64::from(module_count) * assumptions.module_area_m2,
    })
}
