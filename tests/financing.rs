//! Price 방식 대출 상환 테스트.
use solar_proposal_toolbox::solar::{amortize, monthly_payment, CalcError, FinancingTerms};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn standard_formula_30000_at_1_49_over_60() {
    let pm = monthly_payment(30_000.0, 1.49, 60).expect("payment");
    let i: f64 = 0.0149;
    let growth = (1.0 + i).powi(60);
    let expected = 30_000.0 * (i * growth) / (growth - 1.0);
    assert_close("payment", pm, expected, 1e-9);
    assert_close("payment 2dp", (pm * 100.0).round() / 100.0, 759.85, 1e-9);
}

#[test]
fn zero_interest_splits_principal_evenly() {
    let pm = monthly_payment(12_000.0, 0.0, 24).expect("payment");
    assert_eq!(pm, 500.0);
}

#[test]
fn non_positive_principal_pays_nothing() {
    assert_eq!(monthly_payment(0.0, 1.2, 36).expect("zero"), 0.0);
    assert_eq!(monthly_payment(-10.0, 1.2, 36).expect("negative"), 0.0);
}

#[test]
fn malformed_terms_are_rejected() {
    assert!(matches!(
        monthly_payment(10_000.0, -0.5, 12),
        Err(CalcError::InvalidInput(_))
    ));
    assert!(monthly_payment(10_000.0, 1.0, 0).is_err());
    let terms = FinancingTerms {
        down_payment: -1.0,
        monthly_rate_percent: 1.0,
        term_months: 12,
    };
    assert!(amortize(10_000.0, &terms).is_err());
}

#[test]
fn down_payment_above_investment_needs_no_loan() {
    let terms = FinancingTerms {
        down_payment: 20_000.0,
        monthly_rate_percent: 1.0,
        term_months: 12,
    };
    let quote = amortize(10_000.0, &terms).expect("quote");
    assert_eq!(quote.principal, 0.0);
    assert_eq!(quote.monthly_payment, 0.0);
    assert_eq!(quote.down_payment, 10_000.0);
    assert_eq!(quote.total_cost, 10_000.0);
    assert!((1..=2).all(|y| quote.payment_for_year(y) == 0.0));
}

#[test]
fn total_cost_includes_down_payment() {
    let terms = FinancingTerms {
        down_payment: 5_000.0,
        monthly_rate_percent: 1.49,
        term_months: 60,
    };
    let quote = amortize(33_660.0, &terms).expect("quote");
    assert_close("principal", quote.principal, 28_660.0, 1e-9);
    assert_close("payment", quote.monthly_payment, 725.906_006_8, 1e-6);
    assert_close(
        "total",
        quote.total_cost,
        quote.monthly_payment * 60.0 + 5_000.0,
        1e-9,
    );
}

#[test]
fn full_down_payment_means_no_installments() {
    let terms = FinancingTerms {
        down_payment: 10_000.0,
        monthly_rate_percent: 2.0,
        term_months: 48,
    };
    let quote = amortize(10_000.0, &terms).expect("quote");
    assert_eq!(quote.monthly_payment, 0.0);
    assert_eq!(quote.total_cost, 10_000.0);
}

#[test]
fn yearly_payments_follow_term() {
    let terms = FinancingTerms {
        down_payment: 0.0,
        monthly_rate_percent: 0.0,
        term_months: 30,
    };
    let quote = amortize(3_000.0, &terms).expect("quote");
    assert_eq!(quote.monthly_payment, 100.0);
    assert_eq!(quote.payment_for_year(1), 1_200.0);
    assert_eq!(quote.payment_for_year(2), 1_200.0);
    assert_eq!(quote.payment_for_year(3), 600.0);
    assert_eq!(quote.payment_for_year(4), 0.0);

    let even = amortize(
        2_400.0,
        &FinancingTerms {
            down_payment: 0.0,
            monthly_rate_percent: 0.0,
            term_months: 24,
        },
    )
    .expect("even");
    assert_eq!(even.payment_for_year(2), 1_200.0);
    assert_eq!(even.payment_for_year(3), 0.0);
}
