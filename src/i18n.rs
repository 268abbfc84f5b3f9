use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATOR: &str = "main_menu.calculator";
    pub const MAIN_MENU_LOCALITIES: &str = "main_menu.localities";
    pub const MAIN_MENU_MODULES: &str = "main_menu.modules";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const CALC_HEADING: &str = "calculator.heading";
    pub const PROMPT_LOCALITY: &str = "prompt.locality";
    pub const PROMPT_CONSUMPTION: &str = "prompt.consumption";
    pub const PROMPT_TARIFF: &str = "prompt.tariff";
    pub const PROMPT_MODULE_ID: &str = "prompt.module_id";
    pub const PROMPT_INVERTER: &str = "prompt.inverter";
    pub const PROMPT_AZIMUTH_LOSS: &str = "prompt.azimuth_loss";
    pub const PROMPT_INFLATION: &str = "prompt.inflation";
    pub const PROMPT_DEGRADATION: &str = "prompt.degradation";
    pub const PROMPT_FINANCED: &str = "prompt.financed";
    pub const PROMPT_DOWN_PAYMENT: &str = "prompt.down_payment";
    pub const PROMPT_MONTHLY_RATE: &str = "prompt.monthly_rate";
    pub const PROMPT_TERM_MONTHS: &str = "prompt.term_months";
    pub const PROMPT_SAVE_LEAD: &str = "prompt.save_lead";
    pub const PROMPT_LEAD_NAME: &str = "prompt.lead_name";
    pub const CALC_INVALID_INPUT: &str = "calculator.invalid_input";
    pub const LEAD_SAVED: &str = "crm.lead_saved";

    pub const LOCALITIES_HEADING: &str = "localities.heading";
    pub const MODULES_HEADING: &str = "modules.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SYSTEM: &str = "report.system";
    pub const REPORT_SYSTEM_SIZE: &str = "report.system_size";
    pub const REPORT_MODULES: &str = "report.modules";
    pub const REPORT_INVERTER: &str = "report.inverter";
    pub const REPORT_OVERSIZING: &str = "report.oversizing";
    pub const REPORT_AREA: &str = "report.area";
    pub const REPORT_MONTHLY_GENERATION: &str = "report.monthly_generation";
    pub const REPORT_FINANCIAL: &str = "report.financial";
    pub const REPORT_INVESTMENT: &str = "report.investment";
    pub const REPORT_COST_PER_KWP: &str = "report.cost_per_kwp";
    pub const REPORT_MONTHLY_SAVINGS: &str = "report.monthly_savings";
    pub const REPORT_ANNUAL_SAVINGS: &str = "report.annual_savings";
    pub const REPORT_PAYBACK: &str = "report.payback";
    pub const REPORT_YEARS: &str = "report.years";
    pub const REPORT_ROI: &str = "report.roi";
    pub const REPORT_FINANCING: &str = "report.financing";
    pub const REPORT_DOWN_PAYMENT: &str = "report.down_payment";
    pub const REPORT_INSTALLMENT: &str = "report.installment";
    pub const REPORT_FINANCING_TOTAL: &str = "report.financing_total";
    pub const REPORT_ENVIRONMENT: &str = "report.environment";
    pub const REPORT_CO2: &str = "report.co2";
    pub const REPORT_TREES: &str = "report.trees";
    pub const REPORT_OVERSIZING_WARNING: &str = "report.oversizing_warning";
    pub const REPORT_CASH_FLOW: &str = "report.cash_flow";
    pub const REPORT_CASH_FLOW_HEADER: &str = "report.cash_flow_header";
    pub const REPORT_SEASONALITY: &str = "report.seasonality";
    pub const REPORT_SEASONALITY_HEADER: &str = "report.seasonality_header";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pt,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Pt
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(pt/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 pt로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 순이며, 영어 번역이 없으면 pt로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| pt(key)),
            Language::Pt => pt(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "pt-br".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("pt") => Some("pt-br".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "pt" => Some("pt-br".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 점으로 이은 키로 평탄화한다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 언어팩 TOML을 플랫 맵으로 변환한다. 문자열이 하나도 없으면 None.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn pt(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando.",
        MAIN_MENU_TITLE => "=== Dimensionamento Solar ===",
        MAIN_MENU_CALCULATOR => "1) Calculadora de sistema",
        MAIN_MENU_LOCALITIES => "2) Cidades (HSP / tarifa)",
        MAIN_MENU_MODULES => "3) Módulos e equipamentos",
        MAIN_MENU_SETTINGS => "4) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Opção: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        ERROR_INVALID_NUMBER => "Digite um número.",
        CALC_HEADING => "-- Calculadora --",
        PROMPT_LOCALITY => "Cidade",
        PROMPT_CONSUMPTION => "Consumo mensal [kWh]",
        PROMPT_TARIFF => "Tarifa [R$/kWh] (0 = padrão da cidade)",
        PROMPT_MODULE_ID => "Id do módulo (vazio = 550 W)",
        PROMPT_INVERTER => "Inversor [kW]",
        PROMPT_AZIMUTH_LOSS => "Perda por azimute/inclinação [%]",
        PROMPT_INFLATION => "Inflação energética [% a.a.]",
        PROMPT_DEGRADATION => "Degradação dos painéis [% a.a.]",
        PROMPT_FINANCED => "Financiado? (s/N): ",
        PROMPT_DOWN_PAYMENT => "Entrada [R$]",
        PROMPT_MONTHLY_RATE => "Juros mensais [%]",
        PROMPT_TERM_MONTHS => "Prazo [meses]",
        PROMPT_SAVE_LEAD => "Salvar como lead? (s/N): ",
        PROMPT_LEAD_NAME => "Nome do cliente: ",
        CALC_INVALID_INPUT => "Dados inválidos, resultado não exibido",
        LEAD_SAVED => "Lead salvo",
        LOCALITIES_HEADING => "-- Cidades --",
        MODULES_HEADING => "-- Equipamentos --",
        SETTINGS_HEADING => "-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual",
        SETTINGS_OPTIONS => "1) Português  2) English",
        SETTINGS_PROMPT_CHANGE => "Número (Enter para cancelar): ",
        SETTINGS_INVALID => "Entrada inválida, nada foi alterado.",
        SETTINGS_SAVED => "Idioma definido",
        REPORT_TITLE => "Proposta Técnica",
        REPORT_SYSTEM => "Sistema",
        REPORT_SYSTEM_SIZE => "Potência pico",
        REPORT_MODULES => "Módulos",
        REPORT_INVERTER => "Inversor",
        REPORT_OVERSIZING => "Fator de oversizing (CC/CA)",
        REPORT_AREA => "Área necessária",
        REPORT_MONTHLY_GENERATION => "Geração mensal",
        REPORT_FINANCIAL => "Financeiro",
        REPORT_INVESTMENT => "Investimento total",
        REPORT_COST_PER_KWP => "Custo por kWp",
        REPORT_MONTHLY_SAVINGS => "Economia mensal",
        REPORT_ANNUAL_SAVINGS => "Economia anual",
        REPORT_PAYBACK => "Payback",
        REPORT_YEARS => "anos",
        REPORT_ROI => "ROI em 25 anos",
        REPORT_FINANCING => "Financiamento",
        REPORT_DOWN_PAYMENT => "Entrada",
        REPORT_INSTALLMENT => "Parcelas",
        REPORT_FINANCING_TOTAL => "Custo total financiado",
        REPORT_ENVIRONMENT => "Impacto ambiental",
        REPORT_CO2 => "CO₂ evitado",
        REPORT_TREES => "Árvores equivalentes",
        REPORT_OVERSIZING_WARNING => "Oversizing acima do recomendado pelo fabricante",
        REPORT_CASH_FLOW => "Fluxo de caixa",
        REPORT_CASH_FLOW_HEADER => {
            " Ano       Economia     Manutenção        Parcela      Saldo acumulado   Custo sem solar"
        }
        REPORT_SEASONALITY => "Sazonalidade",
        REPORT_SEASONALITY_HEADER => " Mês   Geração kWh  Consumo kWh",
        _ => "?",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "=== Solar Sizing ===",
        MAIN_MENU_CALCULATOR => "1) System calculator",
        MAIN_MENU_LOCALITIES => "2) Cities (sun hours / tariff)",
        MAIN_MENU_MODULES => "3) Modules and equipment",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CALC_HEADING => "-- Calculator --",
        PROMPT_LOCALITY => "City",
        PROMPT_CONSUMPTION => "Monthly consumption [kWh]",
        PROMPT_TARIFF => "Tariff [R$/kWh] (0 = city default)",
        PROMPT_MODULE_ID => "Module id (empty = 550 W)",
        PROMPT_INVERTER => "Inverter [kW]",
        PROMPT_AZIMUTH_LOSS => "Azimuth/tilt loss [%]",
        PROMPT_INFLATION => "Energy inflation [%/yr]",
        PROMPT_DEGRADATION => "Panel degradation [%/yr]",
        PROMPT_FINANCED => "Financed? (y/N): ",
        PROMPT_DOWN_PAYMENT => "Down payment [R$]",
        PROMPT_MONTHLY_RATE => "Monthly interest [%]",
        PROMPT_TERM_MONTHS => "Term [months]",
        PROMPT_SAVE_LEAD => "Save as lead? (y/N): ",
        PROMPT_LEAD_NAME => "Customer name: ",
        CALC_INVALID_INPUT => "Invalid input, no result shown",
        LEAD_SAVED => "Lead saved",
        LOCALITIES_HEADING => "-- Cities --",
        MODULES_HEADING => "-- Equipment --",
        SETTINGS_HEADING => "-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language",
        SETTINGS_OPTIONS => "1) Português  2) English",
        SETTINGS_PROMPT_CHANGE => "Number (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Language set",
        REPORT_TITLE => "Technical Proposal",
        REPORT_SYSTEM => "System",
        REPORT_SYSTEM_SIZE => "Peak power",
        REPORT_MODULES => "Modules",
        REPORT_INVERTER => "Inverter",
        REPORT_OVERSIZING => "Oversizing ratio (DC/AC)",
        REPORT_AREA => "Required area",
        REPORT_MONTHLY_GENERATION => "Monthly generation",
        REPORT_FINANCIAL => "Financial",
        REPORT_INVESTMENT => "Total investment",
        REPORT_COST_PER_KWP => "Cost per kWp",
        REPORT_MONTHLY_SAVINGS => "Monthly savings",
        REPORT_ANNUAL_SAVINGS => "Annual savings",
        REPORT_PAYBACK => "Payback",
        REPORT_YEARS => "years",
        REPORT_ROI => "25-year ROI",
        REPORT_FINANCING => "Financing",
        REPORT_DOWN_PAYMENT => "Down payment",
        REPORT_INSTALLMENT => "Installments",
        REPORT_FINANCING_TOTAL => "Total financed cost",
        REPORT_ENVIRONMENT => "Environmental impact",
        REPORT_CO2 => "CO₂ avoided",
        REPORT_TREES => "Tree equivalents",
        REPORT_OVERSIZING_WARNING => "Oversizing above the manufacturer recommendation",
        REPORT_CASH_FLOW => "Cash flow",
        REPORT_CASH_FLOW_HEADER => {
            "Year        Savings    Maintenance    Installment    Cumulative bal.    Grid-only cost"
        }
        REPORT_SEASONALITY => "Seasonality",
        REPORT_SEASONALITY_HEADER => "Month Generation kWh Consumption kWh",
        _ => return None,
    };
    Some(s)
}
