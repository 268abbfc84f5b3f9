use serde::Serialize;

use super::{ensure_non_negative, ensure_positive, Assumptions, CalcError, LoanQuote};

/// 현금흐름 시뮬레이션 입력.
#[derive(Debug, Clone)]
pub struct CashFlowInput {
    /// 첫해 월평균 발전량 [kWh/월]
    pub base_monthly_generation_kwh: f64,
    /// 월 소비량 [kWh/월]
    pub monthly_consumption_kwh: f64,
    /// 첫해 전력 요금 [R$/kWh]
    pub tariff: f64,
    /// 연간 전기요금 상승률 [%]
    pub energy_inflation_percent: f64,
    /// 연간 모듈 열화율 [%]
    pub panel_degradation_percent: f64,
    /// 총 투자비 [R$]
    pub total_investment: f64,
    /// 대출 견적. 현금 구매면 None
    pub loan: Option<LoanQuote>,
}

/// 연도별 현금흐름 한 줄.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowYear {
    /// 연도 (0 = 투자 시점)
    pub year: u32,
    /// 해당 연도 발전량 [kWh]
    pub generation_kwh: f64,
    /// 해당 연도 적용 요금 [R$/kWh]
    pub tariff: f64,
    /// 해당 연도 절감액 [R$]
    pub savings: f64,
    /// 해당 연도 정비 비용 [R$]
    pub maintenance: f64,
    /// 해당 연도 대출 상환액 [R$]
    pub loan_payment: f64,
    /// 해당 연도 순현금흐름 [R$]
    pub net_cash_flow: f64,
    /// 누적 잔액 [R$]
    pub balance: f64,
    /// 태양광이 없을 때의 누적 전기요금 (항상 0 이하) [R$]
    pub cumulative_grid_cost: f64,
}

/// 시뮬레이션 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowProjection {
    /// 0년차부터 분석 종료 연도까지의 현금흐름
    pub years: Vec<CashFlowYear>,
    /// 회수 기간 [년]. 분석 기간으로 상한을 둔다.
    pub payback_years: f64,
    /// 분석 기간 안에 누적 잔액이 0 이상으로 돌아섰는지 여부
    pub payback_reached: bool,
    /// 최종 누적 잔액 [R$]
    pub final_balance: f64,
    /// 분석 기간 ROI [%]. 분모는 총 투자비(계약금 차감 전)
    pub roi_percent: f64,
}

impl CashFlowProjection {
    pub fn year(&self, year: u32) -> Option<&CashFlowYear> {
        self.years.get(year as usize)
    }
}

/// 열화, 요금 상승, 정비, 대출 상환을 반영해 연도별 누적 잔액을 계산한다.
///
/// 회수 시점은 누적 잔액이 처음 음수에서 0 이상으로 바뀐 해에 선형 보간으로 구하며,
/// 이후 정비 등으로 다시 음수가 되어도 바뀌지 않는다.
pub fn simulate(
    input: &CashFlowInput,
    assumptions: &Assumptions,
) -> Result<CashFlowProjection, CalcError> {
    let total_investment =
        ensure_positive(input.total_investment, "총 투자비는 0보다 커야 합니다.")?;
    ensure_non_negative(
        input.base_monthly_generation_kwh,
        "발전량은 0 이상이어야 합니다.",
    )?;
    ensure_non_negative(input.monthly_consumption_kwh, "소비량은 0 이상이어야 합니다.")?;
    ensure_non_negative(input.tariff, "전력 요금은 0 이상이어야 합니다.")?;
    let degradation = ensure_non_negative(
        input.panel_degradation_percent,
        "열화율은 0 이상이어야 합니다.",
    )?;
    if degradation >= 100.0 {
        return Err(CalcError::InvalidInput("열화율은 100 미만이어야 합니다."));
    }
    let inflation = input.energy_inflation_percent;
    if !inflation.is_finite() || inflation <= -100.0 {
        return Err(CalcError::InvalidInput(
            "요금 상승률은 -100보다 커야 합니다.",
        ));
    }

    let horizon = assumptions.horizon_years;
    let down_payment = input.loan.map(|l| l.down_payment).unwrap_or(0.0);
    let initial_balance = -(total_investment - down_payment);

    let mut years = Vec::with_capacity(horizon as usize + 1);
    years.push(CashFlowYear {
        year: 0,
        generation_kwh: 0.0,
        tariff: input.tariff,
        savings: 0.0,
        maintenance: 0.0,
        loan_payment: 0.0,
        net_cash_flow: initial_balance,
        balance: initial_balance,
        cumulative_grid_cost: 0.0,
    });

    let mut balance = initial_balance;
    let mut current_tariff = input.tariff;
    let mut cumulative_grid_cost = 0.0;
    let mut payback: Option<f64> = None;

    for year in 1..=horizon {
        let efficiency = (1.0 - f64::from(year - 1) * degradation / 100.0).max(0.0);
        let generation_kwh = input.base_monthly_generation_kwh * efficiency * 12.0;
        let savings = generation_kwh * current_tariff;

        cumulative_grid_cost -= input.monthly_consumption_kwh * 12.0 * current_tariff;

        let maintenance = if year == assumptions.maintenance_year {
            total_investment * assumptions.maintenance_fraction
        } else {
            0.0
        };
        let loan_payment = input
            .loan
            .map(|l| l.payment_for_year(year))
            .unwrap_or(0.0);

        let net_cash_flow = savings - maintenance - loan_payment;
        let previous = balance;
        balance += net_cash_flow;

        if payback.is_none() && previous < 0.0 && balance >= 0.0 && net_cash_flow != 0.0 {
            payback = Some(f64::from(year) + previous.abs() / net_cash_flow);
        }

        years.push(CashFlowYear {
            year,
            generation_kwh,
            tariff: current_tariff,
            savings,
            maintenance,
            loan_payment,
            net_cash_flow,
            balance,
            cumulative_grid_cost,
        });

        current_tariff *= 1.0 + inflation / 100.0;
    }

    let cap = f64::from(horizon);
    Ok(CashFlowProjection {
        years,
        payback_years: payback.map(|p| p.min(cap)).unwrap_or(cap),
        payback_reached: payback.is_some(),
        final_balance: balance,
        roi_percent: balance / total_investment * 100.0,
    })
}
