use serde::Serialize;

/// 월별 발전/소비 비교 한 줄.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyYield {
    /// 월 (1~12)
    pub month: u8,
    /// 계절 보정 발전량 [kWh]
    pub generation_kwh: f64,
    /// 소비량 [kWh]. 연중 동일
    pub consumption_kwh: f64,
}

/// 월평균 발전량에 월별 계수를 곱해 12개월 프로파일을 만든다.
pub fn monthly_profile(
    base_monthly_generation_kwh: f64,
    monthly_consumption_kwh: f64,
    factors: &[f64; 12],
) -> Vec<MonthlyYield> {
    factors
        .iter()
        .zip(1u8..)
        .map(|(factor, month)| MonthlyYield {
            month,
            generation_kwh: base_monthly_generation_kwh * factor,
            consumption_kwh: monthly_consumption_kwh,
        })
        .collect()
}
