use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Equipment, EquipmentTable, Locality, LocalityTable};
use crate::solar::{Assumptions, CostTable};

/// 대화형 계산기의 초기 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub locality: String,
    /// 월 소비량 [kWh/월]
    pub monthly_consumption_kwh: f64,
    /// 인버터 용량 [kW]
    pub inverter_capacity_kw: f64,
    /// 연간 전기요금 상승률 [%]
    pub energy_inflation_percent: f64,
    /// 연간 모듈 열화율 [%]
    pub panel_degradation_percent: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            locality: "Maceió".to_string(),
            monthly_consumption_kwh: 800.0,
            inverter_capacity_kw: 5.0,
            energy_inflation_percent: 6.0,
            panel_degradation_percent: 0.7,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (pt, en). 없으면 시스템 로케일을 따른다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 리드 로컬 캐시 파일 경로
    pub lead_store: PathBuf,
    pub defaults: InputDefaults,
    pub assumptions: Assumptions,
    pub cost_table: CostTable,
    /// 내장 지역 목록에 더할 항목
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub localities: Vec<Locality>,
    /// 내장 장비 목록에 더할 항목
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<Equipment>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            lead_store: PathBuf::from("leads.json"),
            defaults: InputDefaults::default(),
            assumptions: Assumptions::default(),
            cost_table: CostTable::default(),
            localities: Vec::new(),
            equipment: Vec::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값 범위 오류
    #[error("설정값 오류: {0}")]
    Invalid(String),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "설정 로드");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 가정값, 단가표, 추가 카탈로그 항목을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.assumptions
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[assumptions] {e}")))?;
        self.cost_table
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[cost_table] {e}")))?;
        for loc in &self.localities {
            if loc.name.trim().is_empty() {
                return Err(ConfigError::Invalid("지역 이름이 비어 있습니다.".into()));
            }
            if !(loc.full_sun_hours.is_finite() && loc.full_sun_hours > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "지역 '{}'의 일사 시간은 0보다 커야 합니다.",
                    loc.name
                )));
            }
            if !(loc.tariff.is_finite() && loc.tariff >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "지역 '{}'의 요금은 0 이상이어야 합니다.",
                    loc.name
                )));
            }
        }
        for item in &self.equipment {
            if let Some(w) = item.rated_power_w {
                if !(w.is_finite() && w > 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "장비 '{}'의 정격 출력은 0보다 커야 합니다.",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// 내장 지역 목록과 설정의 추가 항목을 합친 카탈로그.
    pub fn locality_table(&self) -> LocalityTable {
        LocalityTable::with_extra(self.localities.clone())
    }

    /// 내장 장비 목록과 설정의 추가 항목을 합친 카탈로그.
    pub fn equipment_table(&self) -> EquipmentTable {
        EquipmentTable::with_extra(self.equipment.clone())
    }
}
