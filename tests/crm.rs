//! 계산 결과를 리드로 저장하는 흐름 테스트.
use std::fs;

use solar_proposal_toolbox::catalog::{EquipmentTable, LocalityTable};
use solar_proposal_toolbox::crm::{
    CrmError, LeadStatus, LocalLeadStore, MemorySink, OpportunityDraft, OpportunitySink,
};
use solar_proposal_toolbox::solar::{
    Assumptions, CostTable, ProjectInput, ProjectResult, SolarEngine,
};

fn sample_result() -> ProjectResult {
    let localities = LocalityTable::builtin();
    let equipment = EquipmentTable::builtin();
    let assumptions = Assumptions::default();
    let costs = CostTable::default();
    SolarEngine::new(&localities, &equipment, &assumptions, &costs)
        .compute(&ProjectInput::new("Maceió", 1_200.0, 8.0))
        .expect("compute")
}

#[test]
fn draft_is_seeded_from_result() {
    let result = sample_result();
    let draft = OpportunityDraft::from_result("  Maria Silva ", &result, 1_200.0).expect("draft");
    assert_eq!(draft.name, "Maria Silva");
    assert_eq!(draft.city, "Maceió");
    assert_eq!(draft.monthly_consumption_kwh, 1_200.0);
    assert_eq!(draft.value, 33_660.0);
}

#[test]
fn empty_name_is_rejected() {
    let result = sample_result();
    assert!(matches!(
        OpportunityDraft::from_result("   ", &result, 1_200.0),
        Err(CrmError::EmptyName)
    ));
}

#[test]
fn memory_sink_creates_lead_in_first_stage() {
    let result = sample_result();
    let mut sink = MemorySink::default();
    let draft = OpportunityDraft::from_result("João", &result, 1_200.0).expect("draft");
    let record = sink.create(draft).expect("create");
    assert_eq!(record.status, LeadStatus::Lead);
    assert_eq!(record.history.len(), 1);
    assert_eq!(record.created_at, record.updated_at);
    assert!(record.phone.is_empty());
    assert_eq!(sink.records.len(), 1);
}

#[test]
fn local_store_prepends_and_persists() {
    let path = std::env::temp_dir().join(format!("leads-{}.json", uuid::Uuid::new_v4()));
    let result = sample_result();
    let mut store = LocalLeadStore::new(&path, "teste");
    assert_eq!(store.path(), path.as_path());
    assert!(store.load().expect("empty").is_empty());

    let first = store
        .create(OpportunityDraft::from_result("Primeiro", &result, 1_200.0).expect("draft"))
        .expect("first");
    let second = store
        .create(OpportunityDraft::from_result("Segundo", &result, 1_200.0).expect("draft"))
        .expect("second");

    let reopened = LocalLeadStore::new(&path, "teste");
    let leads = reopened.load().expect("load");
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].id, second.id);
    assert_eq!(leads[1].id, first.id);
    assert_eq!(leads[1].history[0].author, "teste");

    let raw = fs::read_to_string(&path).expect("raw");
    assert!(raw.contains("\"monthlyConsumption\""));
    let _ = fs::remove_file(&path);
}
