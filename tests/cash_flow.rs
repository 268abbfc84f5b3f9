//! 25년 현금흐름 시뮬레이션 테스트.
use solar_proposal_toolbox::solar::{
    amortize, estimate_impact, monthly_profile, simulate, Assumptions, CashFlowInput,
    FinancingTerms,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

/// 열화/상승률 없이 연 1200 R$를 절감하는 단순 입력.
fn flat_input(total_investment: f64) -> CashFlowInput {
    CashFlowInput {
        base_monthly_generation_kwh: 100.0,
        monthly_consumption_kwh: 100.0,
        tariff: 1.0,
        energy_inflation_percent: 0.0,
        panel_degradation_percent: 0.0,
        total_investment,
        loan: None,
    }
}

#[test]
fn payback_inside_first_year_is_fractional() {
    let mut input = flat_input(5_000.0);
    input.base_monthly_generation_kwh = 1_000.0;
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    assert!(res.payback_reached);
    assert!(res.payback_years > 1.0 && res.payback_years < 2.0);
    assert_close("payback", res.payback_years, 1.0 + 5_000.0 / 12_000.0, 1e-12);
}

#[test]
fn series_has_year_zero_through_horizon() {
    let res = simulate(&flat_input(3_000.0), &Assumptions::default()).expect("simulate");
    assert_eq!(res.years.len(), 26);
    assert_eq!(res.years[0].year, 0);
    assert_eq!(res.years[0].balance, -3_000.0);
    assert_eq!(res.years[0].cumulative_grid_cost, 0.0);
    assert_eq!(res.years[25].year, 25);
}

#[test]
fn maintenance_only_in_year_twelve() {
    let res = simulate(&flat_input(3_000.0), &Assumptions::default()).expect("simulate");
    for y in &res.years {
        if y.year == 12 {
            assert_close("maintenance", y.maintenance, 1_050.0, 1e-9);
        } else {
            assert_eq!(y.maintenance, 0.0);
        }
    }
}

#[test]
fn first_crossing_is_never_overwritten() {
    let assumptions = Assumptions {
        maintenance_fraction: 5.0,
        ..Assumptions::default()
    };
    let res = simulate(&flat_input(3_000.0), &assumptions).expect("simulate");
    // 12년차 정비로 다시 음수가 된 뒤 15년차에 회복한다
    assert!(res.year(12).expect("y12").balance < 0.0);
    assert!(res.year(15).expect("y15").balance >= 0.0);
    assert_close("payback", res.payback_years, 3.5, 1e-12);
}

#[test]
fn never_recovered_reports_horizon() {
    let mut input = flat_input(3_000.0);
    input.tariff = 0.0;
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    assert!(!res.payback_reached);
    assert_eq!(res.payback_years, 25.0);
    assert!(res.payback_years.is_finite());
}

#[test]
fn tariff_inflates_after_first_year() {
    let mut input = flat_input(3_000.0);
    input.energy_inflation_percent = 10.0;
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    assert_eq!(res.years[1].tariff, 1.0);
    assert_close("y1 savings", res.years[1].savings, 1_200.0, 1e-9);
    assert_close("y2 tariff", res.years[2].tariff, 1.1, 1e-12);
    assert_close("y2 savings", res.years[2].savings, 1_320.0, 1e-9);
}

#[test]
fn degradation_starts_in_second_year() {
    let mut input = flat_input(3_000.0);
    input.panel_degradation_percent = 0.7;
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    assert_eq!(res.years[1].generation_kwh, 1_200.0);
    assert_close("y2 gen", res.years[2].generation_kwh, 1_200.0 * 0.993, 1e-9);
    assert_close("y25 gen", res.years[25].generation_kwh, 1_200.0 * 0.832, 1e-9);
}

#[test]
fn grid_cost_is_monotonically_decreasing() {
    let mut input = flat_input(3_000.0);
    input.energy_inflation_percent = 6.0;
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    for w in res.years.windows(2) {
        assert!(w[1].cumulative_grid_cost < w[0].cumulative_grid_cost);
    }
    assert!(res.years.iter().all(|y| y.cumulative_grid_cost <= 0.0));
}

#[test]
fn financed_balance_starts_net_of_down_payment() {
    let total = 12_000.0;
    let quote = amortize(
        total,
        &FinancingTerms {
            down_payment: 2_000.0,
            monthly_rate_percent: 0.0,
            term_months: 20,
        },
    )
    .expect("quote");
    let mut input = flat_input(total);
    input.loan = Some(quote);
    let res = simulate(&input, &Assumptions::default()).expect("simulate");
    assert_eq!(res.years[0].balance, -10_000.0);
    assert_eq!(res.years[1].loan_payment, 6_000.0);
    assert_eq!(res.years[2].loan_payment, 4_000.0);
    assert_eq!(res.years[3].loan_payment, 0.0);
    // ROI 분모는 계약금과 무관하게 총 투자비
    assert_close(
        "roi",
        res.roi_percent,
        res.final_balance / total * 100.0,
        1e-12,
    );
}

#[test]
fn invalid_simulation_inputs_are_rejected() {
    let assumptions = Assumptions::default();
    assert!(simulate(&flat_input(0.0), &assumptions).is_err());
    let mut input = flat_input(1_000.0);
    input.panel_degradation_percent = -1.0;
    assert!(simulate(&input, &assumptions).is_err());
    let mut input = flat_input(1_000.0);
    input.energy_inflation_percent = f64::INFINITY;
    assert!(simulate(&input, &assumptions).is_err());
}

#[test]
fn impact_uses_undegraded_generation() {
    let impact = estimate_impact(1_239.381 * 12.0, &Assumptions::default());
    assert_close("co2", impact.co2_tons, 148.725_72, 1e-6);
    assert_eq!(impact.trees_equivalent, 991);
}

#[test]
fn seasonality_profile_has_twelve_months() {
    let assumptions = Assumptions::default();
    let profile = monthly_profile(1_000.0, 800.0, &assumptions.monthly_yield_factors);
    assert_eq!(profile.len(), 12);
    assert_eq!(profile[0].month, 1);
    assert_eq!(profile[11].month, 12);
    assert!(profile.iter().all(|m| m.consumption_kwh == 800.0));
    let total: f64 = profile.iter().map(|m| m.generation_kwh).sum();
    assert_close("annual", total, 12_000.0, 1e-6);
}
