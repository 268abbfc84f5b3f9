//! 설정 파일 로드/저장/검증 테스트.
use std::fs;

use solar_proposal_toolbox::catalog::{Locality, LocalityCatalog};
use solar_proposal_toolbox::config::{self, Config, ConfigError};
use solar_proposal_toolbox::solar::CostTier;

fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("solar-cfg-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("mkdir");
    dir
}

#[test]
fn default_config_is_valid() {
    let cfg = Config::default();
    cfg.validate().expect("valid");
    assert_eq!(cfg.defaults.locality, "Maceió");
    assert_eq!(cfg.cost_table.base_rate_per_kwp, 3_800.0);
    assert_eq!(cfg.cost_table.tiers.len(), 4);
}

#[test]
fn toml_round_trip_keeps_values() {
    let mut cfg = Config::default();
    cfg.language = Some("en".into());
    cfg.localities.push(Locality::new("Recife", "PE", 5.3, 0.95));
    let text = toml::to_string_pretty(&cfg).expect("serialize");
    let back: Config = toml::from_str(&text).expect("parse");
    assert_eq!(back, cfg);
}

#[test]
fn partial_file_fills_defaults() {
    let cfg: Config = toml::from_str(
        r#"
        language = "pt"

        [assumptions]
        maintenance_fraction = 0.3
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.assumptions.maintenance_fraction, 0.3);
    assert_eq!(cfg.assumptions.horizon_years, 25);
    assert_eq!(cfg.defaults.monthly_consumption_kwh, 800.0);
}

#[test]
fn unsorted_cost_tiers_are_rejected() {
    let mut cfg = Config::default();
    cfg.cost_table.tiers = vec![CostTier::new(10.0, 2_900.0), CostTier::new(4.0, 3_400.0)];
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn bad_extra_locality_is_rejected() {
    let mut cfg = Config::default();
    cfg.localities.push(Locality::new("Nowhere", "XX", 0.0, 1.0));
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = temp_dir();
    let path = dir.join("config.toml");
    let cfg = config::load_or_default(&path).expect("create");
    assert!(path.exists());
    assert_eq!(cfg, Config::default());

    let again = config::load_or_default(&path).expect("reload");
    assert_eq!(again, cfg);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_file_reports_parse_error() {
    let dir = temp_dir();
    let path = dir.join("config.toml");
    fs::write(&path, "lead_store = [").expect("write");
    assert!(matches!(
        config::load_or_default(&path),
        Err(ConfigError::Parse(_))
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn extra_localities_reach_catalog() {
    let mut cfg = Config::default();
    cfg.localities.push(Locality::new("Recife", "PE", 5.3, 0.95));
    let table = cfg.locality_table();
    assert_eq!(table.lookup("recife").map(|l| l.state.as_str()), Some("PE"));
}
