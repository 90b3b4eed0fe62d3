use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zeta_torsion_controller::{app, config, i18n, lay_length::LAY_LENGTH_DEFAULT_MM, session, ui_cli};

#[derive(Parser)]
#[command(author, version, about = "Lay length / untwist rotation calculator", long_about = None)]
struct Args {
    /// 언어 코드 (auto/ko/en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 한 번 계산하고 종료한다
    Calc {
        /// 전체 전선 길이 [mm] (`12in`처럼 인치도 가능)
        #[arg(long, value_parser = parse_length_arg)]
        total: f64,
        /// 피치 [mm] (100~4950으로 고정)
        #[arg(long, default_value_t = LAY_LENGTH_DEFAULT_MM, value_parser = parse_length_arg)]
        lay: f64,
        /// 해꼬임을 끄고 바이패스로 계산
        #[arg(long)]
        bypass: bool,
    },
}

fn parse_length_arg(s: &str) -> Result<f64, String> {
    session::parse_length_mm(s).map_err(|e| e.to_string())
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app::DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = try_run(args) {
        tracing::error!(error = %err, "cli terminated");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run(args: Args) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&args.config)?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    match args.command {
        Some(Command::Calc { total, lay, bypass }) => {
            let readout = app::calc(total, lay, bypass)?;
            ui_cli::print_readout(&tr, &readout);
        }
        None => app::run(&mut cfg, &args.config, &mut tr)?,
    }
    Ok(())
}
