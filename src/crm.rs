//! 계산 결과를 영업 파이프라인 리드로 넘기는 외부 협력자 인터페이스.
//! 엔진은 이 모듈을 호출하지 않으며, 사용자가 결과를 저장할 때 호출 측이 사용한다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::solar::ProjectResult;

/// 리드 저장 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("리드 파일 형식 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("리드 이름이 비어 있습니다.")]
    EmptyName,
}

/// 파이프라인 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Lead,
    Qualificacao,
    Proposta,
    Fechado,
}

/// 리드 이력 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadHistoryLog {
    pub id: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
}

/// 저장된 리드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub city: String,
    /// 제안 금액 [R$]
    pub value: f64,
    /// 월 소비량 [kWh/월]
    pub monthly_consumption: f64,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub history: Vec<LeadHistoryLog>,
}

/// 계산 결과에서 뽑아낸 신규 리드 초안.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityDraft {
    pub name: String,
    pub city: String,
    pub monthly_consumption_kwh: f64,
    /// 총 투자비 [R$]
    pub value: f64,
}

impl OpportunityDraft {
    /// 표시 이름과 계산 결과로 초안을 만든다. 이름은 앞뒤 공백을 제거한다.
    pub fn from_result(
        name: &str,
        result: &ProjectResult,
        monthly_consumption_kwh: f64,
    ) -> Result<Self, CrmError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CrmError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            city: result.inputs.locality.name.clone(),
            monthly_consumption_kwh,
            value: result.total_investment.floor(),
        })
    }

    /// 초안을 상태 `Lead`의 신규 레코드로 만든다.
    pub fn into_record(self, author: &str, now: DateTime<Utc>) -> LeadRecord {
        let log = LeadHistoryLog {
            id: Uuid::new_v4().to_string(),
            action: "Criação".to_string(),
            details: format!(
                "Lead criado a partir do dimensionamento ({} kWh/mês)",
                self.monthly_consumption_kwh
            ),
            timestamp: now,
            author: author.to_string(),
        };
        LeadRecord {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            phone: String::new(),
            city: self.city,
            value: self.value,
            monthly_consumption: self.monthly_consumption_kwh,
            status: LeadStatus::Lead,
            created_at: now,
            updated_at: now,
            history: vec![log],
        }
    }
}

/// 리드를 생성하는 저장소.
pub trait OpportunitySink {
    fn create(&mut self, draft: OpportunityDraft) -> Result<LeadRecord, CrmError>;
}

/// 테스트용 메모리 저장소.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<LeadRecord>,
}

impl OpportunitySink for MemorySink {
    fn create(&mut self, draft: OpportunityDraft) -> Result<LeadRecord, CrmError> {
        let record = draft.into_record("local", Utc::now());
        self.records.push(record.clone());
        Ok(record)
    }
}

/// JSON 파일 기반 로컬 리드 캐시. 원격 저장소가 없을 때의 대체 저장소다.
#[derive(Debug, Clone)]
pub struct LocalLeadStore {
    path: PathBuf,
    author: String,
}

impl LocalLeadStore {
    pub fn new(path: impl Into<PathBuf>, author: &str) -> Self {
        Self {
            path: path.into(),
            author: author.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 저장된 리드를 모두 읽는다. 파일이 없으면 빈 목록이다.
    pub fn load(&self) -> Result<Vec<LeadRecord>, CrmError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, records: &[LeadRecord]) -> Result<(), CrmError> {
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl OpportunitySink for LocalLeadStore {
    fn create(&mut self, draft: OpportunityDraft) -> Result<LeadRecord, CrmError> {
        let mut records = self.load()?;
        let record = draft.into_record(&self.author, Utc::now());
        // 최신 리드가 앞에 오도록 유지
        records.insert(0, record.clone());
        self.store(&records)?;
        tracing::info!(
            id = %record.id,
            name = %record.name,
            path = %self.path.display(),
            "리드 저장"
        );
        Ok(record)
    }
}
