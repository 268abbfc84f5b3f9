//! 카탈로그 주입부터 전체 결과까지의 통합 테스트.
use solar_proposal_toolbox::catalog::{
    Equipment, EquipmentCatalog, EquipmentKind, EquipmentTable, Locality, LocalityCatalog,
    LocalityTable,
};
use solar_proposal_toolbox::solar::{
    Advisory, Assumptions, CalcError, CatalogMiss, CostTable, Financing, FinancingTerms,
    ProjectInput, SolarEngine,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn synthetic_localities() -> LocalityTable {
    LocalityTable::new(
        vec![
            Locality::new("Maceió", "AL", 5.35, 0.98),
            Locality::new("Sertão", "AL", 6.0, 1.10),
        ],
        Locality::new("Padrão", "AL", 5.0, 0.90),
    )
}

fn synthetic_equipment() -> EquipmentTable {
    EquipmentTable::new(vec![
        Equipment {
            id: "m600".into(),
            name: "Módulo 600W".into(),
            kind: EquipmentKind::Module,
            unit_price: 700.0,
            rated_power_w: Some(600.0),
        },
        Equipment {
            id: "inv5".into(),
            name: "Inversor 5kW".into(),
            kind: EquipmentKind::Inverter,
            unit_price: 4_000.0,
            rated_power_w: None,
        },
    ])
}

#[test]
fn maceio_1200_kwh_end_to_end() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let res = engine
        .compute(&ProjectInput::new("Maceió", 1_200.0, 8.0))
        .expect("compute");

    assert_eq!(res.sizing.module_count, 18);
    assert_close("installed", res.sizing.installed_capacity_kw, 9.9, 1e-9);
    assert_close("oversizing", res.sizing.oversizing_ratio, 1.2375, 1e-9);
    assert_eq!(res.cost_per_kwp, 3_400.0);
    assert_close("investment", res.total_investment, 33_660.0, 1e-6);
    assert_close("generation", res.monthly_generation_kwh, 1_239.381, 1e-6);
    assert_close("monthly savings", res.monthly_savings, 1_239.381 * 0.98, 1e-6);
    assert_close("annual savings", res.annual_savings, 1_239.381 * 0.98 * 12.0, 1e-6);
    assert_close("payback", res.payback_years(), 3.231_827_7, 1e-6);
    assert_close("roi", res.roi_percent(), 1_992.442_232_6, 1e-6);
    assert_eq!(res.impact.trees_equivalent, 991);
    assert_eq!(res.cash_flow.years.len(), 26);
    assert_eq!(res.seasonality.len(), 12);
    assert!(!res.financed);
    assert!(res.loan.is_none());
    assert!(res.advisories.is_empty());
    assert!(res.catalog_misses.is_empty());
}

#[test]
fn catalog_lookup_is_case_insensitive() {
    let localities = synthetic_localities();
    assert_eq!(
        localities.lookup("  maceió ").map(|l| l.full_sun_hours),
        Some(5.35)
    );
    assert!(localities.lookup("Recife").is_none());
    assert_eq!(localities.fallback().name, "Padrão");
}

#[test]
fn unknown_locality_falls_back_with_notice() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let res = engine
        .compute(&ProjectInput::new("Atlântida", 500.0, 3.0))
        .expect("compute");
    assert_eq!(res.inputs.locality.name, "Padrão");
    assert_eq!(res.inputs.tariff, 0.90);
    assert_eq!(
        res.catalog_misses,
        vec![CatalogMiss::UnknownLocality {
            requested: "Atlântida".into(),
            fallback: "Padrão".into(),
        }]
    );
}

#[test]
fn module_selection_and_fallbacks() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let mut input = ProjectInput::new("Maceió", 1_200.0, 8.0);
    input.module_id = Some("m600".into());
    let res = engine.compute(&input).expect("m600");
    assert_eq!(res.inputs.module_power_w, 600.0);
    assert_eq!(res.sizing.module_count, 16);
    assert_eq!(res.inputs.module_name.as_deref(), Some("Módulo 600W"));

    input.module_id = Some("nope".into());
    let res = engine.compute(&input).expect("unknown");
    assert_eq!(res.inputs.module_power_w, 550.0);
    assert!(matches!(
        res.catalog_misses.as_slice(),
        [CatalogMiss::UnknownModule { .. }]
    ));

    input.module_id = Some("inv5".into());
    let res = engine.compute(&input).expect("inverter as module");
    assert_eq!(res.inputs.module_power_w, 550.0);
    assert!(matches!(
        res.catalog_misses.as_slice(),
        [CatalogMiss::MissingRatedPower { .. }]
    ));
}

#[test]
fn tariff_override_replaces_locality_default() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let mut input = ProjectInput::new("Maceió", 800.0, 5.0);
    input.tariff_override = Some(1.25);
    let res = engine.compute(&input).expect("compute");
    assert_eq!(res.inputs.tariff, 1.25);
    assert_eq!(res.cash_flow.years[1].tariff, 1.25);

    input.tariff_override = Some(-0.1);
    assert!(engine.compute(&input).is_err());
}

#[test]
fn oversizing_is_advisory_not_error() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let res = engine
        .compute(&ProjectInput::new("Maceió", 1_200.0, 5.0))
        .expect("compute");
    assert!(res.is_oversized());
    match res.advisories.as_slice() {
        [Advisory::Oversizing { ratio, limit }] => {
            assert_close("ratio", *ratio, 1.98, 1e-9);
            assert_eq!(*limit, 1.35);
        }
        other => panic!("unexpected advisories {other:?}"),
    }
}

#[test]
fn financed_project_carries_loan_quote() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let mut input = ProjectInput::new("Maceió", 1_200.0, 8.0);
    input.financing = Financing::Loan(FinancingTerms {
        down_payment: 5_000.0,
        monthly_rate_percent: 1.49,
        term_months: 60,
    });
    let res = engine.compute(&input).expect("compute");
    let loan = res.loan.expect("loan");
    assert!(res.financed);
    assert_close("payment", loan.monthly_payment, 725.906_006_8, 1e-6);
    assert_close("year0", res.cash_flow.years[0].balance, -28_660.0, 1e-6);
    assert_close("y5 loan", res.cash_flow.years[5].loan_payment, loan.monthly_payment * 12.0, 1e-9);
    assert_eq!(res.cash_flow.years[6].loan_payment, 0.0);
}

#[test]
fn invalid_input_returns_no_result() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let err = engine
        .compute(&ProjectInput::new("Maceió", 0.0, 5.0))
        .expect_err("zero consumption");
    assert!(matches!(err, CalcError::InvalidInput(_)));

    let mut input = ProjectInput::new("Maceió", 800.0, 5.0);
    input.financing = Financing::Loan(FinancingTerms {
        down_payment: 0.0,
        monthly_rate_percent: 1.0,
        term_months: 0,
    });
    assert!(engine.compute(&input).is_err());
}

#[test]
fn builtin_catalogs_match_source_tables() {
    let localities = LocalityTable::builtin();
    assert_eq!(localities.all().len(), 27);
    assert_eq!(localities.fallback().name, "Arapiraca");
    let piranhas = localities.lookup("Piranhas").expect("piranhas");
    assert_eq!(piranhas.full_sun_hours, 5.60);
    assert_eq!(piranhas.tariff, 0.98);

    let equipment = EquipmentTable::builtin();
    assert_eq!(equipment.lookup("1").and_then(|e| e.rated_power_w), Some(550.0));
    assert_eq!(equipment.modules().count(), 1);
}

#[test]
fn extra_catalog_entries_override_builtin() {
    let localities = LocalityTable::with_extra(vec![
        Locality::new("maceió", "AL", 5.5, 1.05),
        Locality::new("Recife", "PE", 5.3, 0.95),
    ]);
    assert_eq!(localities.all().len(), 28);
    assert_eq!(localities.lookup("Maceió").map(|l| l.tariff), Some(1.05));
    assert!(localities.lookup("Recife").is_some());
}

#[test]
fn demo_inputs_parse_and_compute() {
    let localities = LocalityTable::builtin();
    let equipment = EquipmentTable::builtin();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);

    let cash: ProjectInput =
        toml::from_str(include_str!("../demos/maceio_cash.toml")).expect("cash demo");
    assert_eq!(cash.financing, Financing::Cash);
    assert_eq!(cash.energy_inflation_percent, 6.0);
    engine.compute(&cash).expect("cash");

    let loan: ProjectInput =
        toml::from_str(include_str!("../demos/arapiraca_loan.toml")).expect("loan demo");
    assert!(loan.financing.is_financed());
    let res = engine.compute(&loan).expect("loan");
    assert!(res.catalog_misses.is_empty());
    assert_eq!(res.inputs.module_name.as_deref().map(|n| n.contains("550")), Some(true));
}

#[test]
fn down_payment_covering_investment_needs_no_installments() {
    let localities = synthetic_localities();
    let equipment = synthetic_equipment();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    let engine = SolarEngine::new(&localities, &equipment, &assumptions, &costs);
    assert_eq!(engine.assumptions().horizon_years, 25);

    let mut input = ProjectInput::new("Maceió", 1_200.0, 8.0);
    input.financing = Financing::Loan(FinancingTerms {
        down_payment: 40_000.0,
        monthly_rate_percent: 1.49,
        term_months: 60,
    });
    assert_eq!(input.financing.terms().map(|t| t.term_months), Some(60));

    let res = engine.compute(&input).expect("compute");
    let loan = res.loan.expect("loan");
    assert!(res.financed);
    assert_eq!(loan.principal, 0.0);
    assert_eq!(loan.monthly_payment, 0.0);
    assert_close("capped down payment", loan.down_payment, 33_660.0, 1e-6);
    assert_eq!(res.cash_flow.years[0].balance, 0.0);
    assert!(res.cash_flow.years.iter().all(|y| y.loan_payment == 0.0));
    assert!(Financing::Cash.terms().is_none());
}
