//! 계산 결과를 사람이 읽는 제안서 형태로 바꾼다.
//! 표시용 반올림/내림은 여기서만 하고, 엔진 결과는 원값을 유지한다.
use serde::Serialize;

use crate::i18n::{keys, Translator};
use crate::solar::{Advisory, ProjectResult};

/// 소수 자릿수 반올림.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 정수 헤알 표기 (pt-BR 천 단위 구분). 소수점 아래는 버린다.
pub fn format_brl(value: f64) -> String {
    let whole = value.floor();
    let negative = whole < 0.0;
    let digits = format!("{:.0}", whole.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-R$ {grouped}")
    } else {
        format!("R$ {grouped}")
    }
}

/// 차트용 연도별 값. 금액은 내림한 정수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: u32,
    pub balance: f64,
    pub economy: f64,
    pub cumulative_grid_cost: f64,
}

/// 화면/문서 표시용으로 반올림한 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalSummary {
    pub city: String,
    pub state: String,
    pub system_size_kw: f64,
    pub modules_count: u32,
    pub module_power_w: f64,
    pub inverter_size_kw: f64,
    pub oversizing_factor: f64,
    pub area_m2: f64,
    pub monthly_generation: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub payback_years: f64,
    pub payback_reached: bool,
    pub total_investment: f64,
    pub roi_25_years: f64,
    pub co2_saved_tons: f64,
    pub trees_planted: u64,
    pub financed: bool,
    pub monthly_payment: Option<f64>,
    pub total_financing_cost: Option<f64>,
    pub chart: Vec<ChartPoint>,
}

impl ProposalSummary {
    pub fn from_result(result: &ProjectResult) -> Self {
        let sizing = &result.sizing;
        Self {
            city: result.inputs.locality.name.clone(),
            state: result.inputs.locality.state.clone(),
            system_size_kw: round_to(sizing.installed_capacity_kw, 2),
            modules_count: sizing.module_count,
            module_power_w: sizing.module_power_w,
            inverter_size_kw: sizing.inverter_capacity_kw,
            oversizing_factor: round_to(sizing.oversizing_ratio, 2),
            area_m2: round_to(sizing.roof_area_m2, 1),
            monthly_generation: result.monthly_generation_kwh.floor(),
            monthly_savings: result.monthly_savings.floor(),
            annual_savings: result.annual_savings.floor(),
            payback_years: round_to(result.payback_years(), 1),
            payback_reached: result.cash_flow.payback_reached,
            total_investment: result.total_investment.floor(),
            roi_25_years: result.roi_percent().floor(),
            co2_saved_tons: round_to(result.impact.co2_tons, 1),
            trees_planted: result.impact.trees_equivalent,
            financed: result.financed,
            monthly_payment: result.loan.map(|l| round_to(l.monthly_payment, 2)),
            total_financing_cost: result.loan.map(|l| l.total_cost.floor()),
            chart: result
                .cash_flow
                .years
                .iter()
                .map(|y| ChartPoint {
                    year: y.year,
                    balance: y.balance.floor(),
                    economy: y.savings.floor(),
                    cumulative_grid_cost: y.cumulative_grid_cost.floor(),
                })
                .collect(),
        }
    }
}

/// 결과 전체를 JSON으로 직렬화한다.
pub fn to_json(result: &ProjectResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// 텍스트 제안서를 만든다.
pub fn render_text(result: &ProjectResult, tr: &Translator) -> String {
    let s = ProposalSummary::from_result(result);
    let mut out = String::new();

    out.push_str(&format!("=== {} {}/{} ===\n", tr.t(keys::REPORT_TITLE), s.city, s.state));

    out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_SYSTEM)));
    out.push_str(&format!(
        "{}: {:.2} kWp\n",
        tr.t(keys::REPORT_SYSTEM_SIZE),
        s.system_size_kw
    ));
    out.push_str(&format!(
        "{}: {} x {:.0} W\n",
        tr.t(keys::REPORT_MODULES),
        s.modules_count,
        s.module_power_w
    ));
    out.push_str(&format!("{}: {} kW\n", tr.t(keys::REPORT_INVERTER), s.inverter_size_kw));
    out.push_str(&format!(
        "{}: {:.2}x\n",
        tr.t(keys::REPORT_OVERSIZING),
        s.oversizing_factor
    ));
    out.push_str(&format!("{}: {:.1} m²\n", tr.t(keys::REPORT_AREA), s.area_m2));
    out.push_str(&format!(
        "{}: {:.0} kWh\n",
        tr.t(keys::REPORT_MONTHLY_GENERATION),
        s.monthly_generation
    ));

    out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_FINANCIAL)));
    out.push_str(&format!(
        "{}: {}\n",
        tr.t(keys::REPORT_INVESTMENT),
        format_brl(s.total_investment)
    ));
    out.push_str(&format!(
        "{}: {}/kWp\n",
        tr.t(keys::REPORT_COST_PER_KWP),
        format_brl(result.cost_per_kwp)
    ));
    out.push_str(&format!(
        "{}: {}\n",
        tr.t(keys::REPORT_MONTHLY_SAVINGS),
        format_brl(s.monthly_savings)
    ));
    out.push_str(&format!(
        "{}: {}\n",
        tr.t(keys::REPORT_ANNUAL_SAVINGS),
        format_brl(s.annual_savings)
    ));
    if s.payback_reached {
        out.push_str(&format!(
            "{}: {:.1} {}\n",
            tr.t(keys::REPORT_PAYBACK),
            s.payback_years,
            tr.t(keys::REPORT_YEARS)
        ));
    } else {
        out.push_str(&format!(
            "{}: > {:.0} {}\n",
            tr.t(keys::REPORT_PAYBACK),
            s.payback_years,
            tr.t(keys::REPORT_YEARS)
        ));
    }
    out.push_str(&format!("{}: {:.0}%\n", tr.t(keys::REPORT_ROI), s.roi_25_years));

    if let Some(loan) = &result.loan {
        out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_FINANCING)));
        out.push_str(&format!(
            "{}: {}\n",
            tr.t(keys::REPORT_DOWN_PAYMENT),
            format_brl(loan.down_payment)
        ));
        out.push_str(&format!(
            "{}: {} x R$ {:.2}\n",
            tr.t(keys::REPORT_INSTALLMENT),
            loan.term_months,
            loan.monthly_payment
        ));
        out.push_str(&format!(
            "{}: {}\n",
            tr.t(keys::REPORT_FINANCING_TOTAL),
            format_brl(loan.total_cost)
        ));
    }

    out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_ENVIRONMENT)));
    out.push_str(&format!("{}: {:.1} t\n", tr.t(keys::REPORT_CO2), s.co2_saved_tons));
    out.push_str(&format!("{}: {}\n", tr.t(keys::REPORT_TREES), s.trees_planted));

    for advisory in &result.advisories {
        match advisory {
            Advisory::Oversizing { ratio, limit } => {
                out.push_str(&format!(
                    "\n[!] {} ({:.2}x > {:.2}x)\n",
                    tr.t(keys::REPORT_OVERSIZING_WARNING),
                    ratio,
                    limit
                ));
            }
        }
    }

    out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_CASH_FLOW)));
    out.push_str(tr.t(keys::REPORT_CASH_FLOW_HEADER));
    out.push('\n');
    for (point, year) in s.chart.iter().zip(&result.cash_flow.years) {
        out.push_str(&format!(
            "{:>4} {:>14} {:>14} {:>14} {:>16} {:>16}\n",
            point.year,
            format_brl(point.economy),
            format_brl(year.maintenance),
            format_brl(year.loan_payment),
            format_brl(point.balance),
            format_brl(point.cumulative_grid_cost)
        ));
    }

    out.push_str(&format!("\n-- {} --\n", tr.t(keys::REPORT_SEASONALITY)));
    out.push_str(tr.t(keys::REPORT_SEASONALITY_HEADER));
    out.push('\n');
    for m in &result.seasonality {
        out.push_str(&format!(
            "{:>4} {:>12.0} {:>12.0}\n",
            m.month, m.generation_kwh, m.consumption_kwh
        ));
    }
    out
}
