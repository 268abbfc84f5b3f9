use clap::{Parser, Subcommand};
use std::path::PathBuf;

use solar_proposal_toolbox::{app, config, i18n, telemetry, ui_cli};

/// 태양광 시스템 사이징 및 재무 전망 도구.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 언어 (auto, pt, en)
    #[arg(long, default_value = "auto", global = true)]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// TOML 입력 파일로 한 번 계산한다
    Calc {
        #[arg(long)]
        input: PathBuf,
        /// 텍스트 대신 JSON으로 출력
        #[arg(long)]
        json: bool,
        /// 결과를 이 이름의 리드로 저장
        #[arg(long)]
        save_lead: Option<String>,
    },
    /// 지역 목록
    Cities,
    /// 장비 목록
    Modules,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = try_run(&cli) {
        let tr = i18n::Translator::new(&i18n::resolve_language(&cli.lang, None));
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: &Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, cfg.language.as_deref());
    let mut tr = i18n::Translator::new_with_pack(&lang, None);
    match &cli.command {
        None => app::run(&mut cfg, &cli.config, &mut tr)?,
        Some(Command::Calc {
            input,
            json,
            save_lead,
        }) => {
            let out = app::run_once(&cfg, input, *json, save_lead.as_deref(), &tr)?;
            println!("{out}");
        }
        Some(Command::Cities) => ui_cli::print_localities(&tr, &cfg),
        Some(Command::Modules) => ui_cli::print_modules(&tr, &cfg),
    }
    Ok(())
}
