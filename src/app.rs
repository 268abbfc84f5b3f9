use std::fs;
use std::path::Path;

use crate::config::{self, Config};
use crate::crm::{self, LocalLeadStore, OpportunityDraft, OpportunitySink};
use crate::i18n::{self, Translator};
use crate::report;
use crate::solar::{Advisory, CalcError, ProjectInput, ProjectResult, SolarEngine};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    /// 계산 입력 오류
    #[error("계산 오류: {0}")]
    Calc(#[from] CalcError),
    /// 입력 파일 파싱 오류
    #[error("입력 파일 오류: {0}")]
    Input(#[from] toml::de::Error),
    /// JSON 출력 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 리드 저장 오류
    #[error("리드 저장 오류: {0}")]
    Crm(#[from] crm::CrmError),
}

/// 설정의 카탈로그와 가정값으로 계산하고, 대체/주의 사항을 로그로 남긴다.
pub fn compute(cfg: &Config, input: &ProjectInput) -> Result<ProjectResult, AppError> {
    let localities = cfg.locality_table();
    let equipment = cfg.equipment_table();
    let engine = SolarEngine::new(&localities, &equipment, &cfg.assumptions, &cfg.cost_table);
    let result = engine.compute(input)?;
    log_notices(&result);
    Ok(result)
}

fn log_notices(result: &ProjectResult) {
    for miss in &result.catalog_misses {
        tracing::warn!(%miss, "카탈로그 조회 실패, 기본값 사용");
    }
    for advisory in &result.advisories {
        match advisory {
            Advisory::Oversizing { ratio, limit } => {
                tracing::info!(ratio, limit, "과적재율이 권장 상한을 넘음");
            }
        }
    }
}

/// 결과를 로컬 리드 캐시에 저장한다.
pub fn save_lead(
    cfg: &Config,
    name: &str,
    result: &ProjectResult,
    monthly_consumption_kwh: f64,
) -> Result<crm::LeadRecord, AppError> {
    let draft = OpportunityDraft::from_result(name, result, monthly_consumption_kwh)?;
    let mut store = LocalLeadStore::new(&cfg.lead_store, "cli");
    Ok(store.create(draft)?)
}

/// 입력 파일 하나를 계산해 출력 문자열을 돌려준다.
pub fn run_once(
    cfg: &Config,
    input_path: &Path,
    json: bool,
    lead_name: Option<&str>,
    tr: &Translator,
) -> Result<String, AppError> {
    let content = fs::read_to_string(input_path)?;
    let input: ProjectInput = toml::from_str(&content)?;
    let result = compute(cfg, &input)?;
    let mut out = if json {
        report::to_json(&result)?
    } else {
        report::render_text(&result, tr)
    };
    if let Some(name) = lead_name {
        let record = save_lead(cfg, name, &result, input.monthly_consumption_kwh)?;
        if !json {
            out.push_str(&format!(
                "\n{}: {} ({})\n",
                tr.t(i18n::keys::LEAD_SAVED),
                record.name,
                record.id
            ));
        }
    }
    Ok(out)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Calculator => ui_cli::handle_calculator(tr, config)?,
            MenuChoice::Localities => ui_cli::print_localities(tr, config),
            MenuChoice::Modules => ui_cli::print_modules(tr, config),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let code = config.language.clone().unwrap_or_default();
                    *tr = Translator::new_with_pack(&i18n::resolve_language(&code, None), None);
                }
                config.save(config_path)?;
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
