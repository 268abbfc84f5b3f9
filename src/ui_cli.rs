use std::io::{self, Write};

use crate::app::{self, AppError};
use crate::catalog::{EquipmentCatalog, EquipmentKind, LocalityCatalog};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::report;
use crate::solar::{Financing, FinancingTerms, ProjectInput};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator,
    Localities,
    Modules,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("\n{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATOR));
    println!("{}", tr.t(keys::MAIN_MENU_LOCALITIES));
    println!("{}", tr.t(keys::MAIN_MENU_MODULES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculator),
            "2" => return Ok(MenuChoice::Localities),
            "3" => return Ok(MenuChoice::Modules),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 계산기 메뉴를 처리한다. 엔터는 괄호 안 기본값을 그대로 쓴다.
pub fn handle_calculator(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("\n{}", tr.t(keys::CALC_HEADING));
    let d = &cfg.defaults;
    let locality = read_text_or(tr.t(keys::PROMPT_LOCALITY), &d.locality)?;
    let consumption = read_f64_or(tr, keys::PROMPT_CONSUMPTION, d.monthly_consumption_kwh)?;
    let tariff = read_f64_or(tr, keys::PROMPT_TARIFF, 0.0)?;
    let module_id = read_text_or(tr.t(keys::PROMPT_MODULE_ID), "")?;
    let inverter = read_f64_or(tr, keys::PROMPT_INVERTER, d.inverter_capacity_kw)?;
    let azimuth = read_f64_or(tr, keys::PROMPT_AZIMUTH_LOSS, 0.0)?;
    let inflation = read_f64_or(tr, keys::PROMPT_INFLATION, d.energy_inflation_percent)?;
    let degradation = read_f64_or(tr, keys::PROMPT_DEGRADATION, d.panel_degradation_percent)?;

    let financing = if read_yes(tr.t(keys::PROMPT_FINANCED))? {
        let down_payment = read_f64_or(tr, keys::PROMPT_DOWN_PAYMENT, 0.0)?;
        let monthly_rate_percent = read_f64_or(tr, keys::PROMPT_MONTHLY_RATE, 1.49)?;
        let term = read_f64_or(tr, keys::PROMPT_TERM_MONTHS, 60.0)?;
        Financing::Loan(FinancingTerms {
            down_payment,
            monthly_rate_percent,
            term_months: term.max(0.0).round() as u32,
        })
    } else {
        Financing::Cash
    };

    let input = ProjectInput {
        locality,
        monthly_consumption_kwh: consumption,
        tariff_override: (tariff > 0.0).then_some(tariff),
        module_id: (!module_id.is_empty()).then_some(module_id),
        inverter_capacity_kw: inverter,
        azimuth_loss_percent: azimuth,
        financing,
        energy_inflation_percent: inflation,
        panel_degradation_percent: degradation,
    };

    let result = match app::compute(cfg, &input) {
        Ok(r) => r,
        Err(AppError::Calc(e)) => {
            // 잘못된 입력이면 결과를 보여주지 않는다
            println!("{}: {e}", tr.t(keys::CALC_INVALID_INPUT));
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("\n{}", report::render_text(&result, tr));

    if read_yes(tr.t(keys::PROMPT_SAVE_LEAD))? {
        let name = read_line(tr.t(keys::PROMPT_LEAD_NAME))?;
        match app::save_lead(cfg, &name, &result, consumption) {
            Ok(record) => println!("{}: {} ({})", tr.t(keys::LEAD_SAVED), record.name, record.id),
            Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
        }
    }
    Ok(())
}

/// 지역 목록을 출력한다.
pub fn print_localities(tr: &Translator, cfg: &Config) {
    println!("\n{}", tr.t(keys::LOCALITIES_HEADING));
    let table = cfg.locality_table();
    for loc in table.all() {
        println!(
            "{:<24} {:>3}  HSP {:.2}  R$ {:.2}/kWh",
            loc.name, loc.state, loc.full_sun_hours, loc.tariff
        );
    }
}

/// 장비 목록을 출력한다.
pub fn print_modules(tr: &Translator, cfg: &Config) {
    println!("\n{}", tr.t(keys::MODULES_HEADING));
    let table = cfg.equipment_table();
    for item in table.all() {
        let power = match (item.kind, item.rated_power_w) {
            (EquipmentKind::Module, Some(w)) => format!("{w:.0} W"),
            _ => "-".to_string(),
        };
        println!(
            "[{}] {:<28} {:>8} {}",
            item.id,
            item.name,
            power,
            report::format_brl(item.unit_price)
        );
    }
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("\n{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}: {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        tr.language_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let code = match sel.trim() {
        "" => return Ok(false),
        "1" => "pt",
        "2" => "en",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = Some(code.to_string());
    println!("{}: {code}", tr.t(keys::SETTINGS_SAVED));
    Ok(true)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_text_or(label: &str, default: &str) -> Result<String, AppError> {
    let s = read_line(&format!("{label} [{default}]: "))?;
    let s = s.trim();
    Ok(if s.is_empty() {
        default.to_string()
    } else {
        s.to_string()
    })
}

fn read_f64_or(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{} [{default}]: ", tr.t(key)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        // pt-BR 입력의 소수점 쉼표 허용
        match s.replace(',', ".").parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_yes(prompt: &str) -> Result<bool, AppError> {
    let s = read_line(prompt)?;
    Ok(matches!(
        s.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    ))
}
