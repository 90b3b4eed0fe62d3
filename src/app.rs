use std::path::Path;

use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::session::{Action, InputError, Readout, Session, TOTAL_LENGTH_DEFAULT_MM};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// `RUST_LOG`가 없을 때 두 실행 파일이 쓰는 로그 필터.
pub const DEFAULT_LOG_FILTER: &str = "zeta_torsion_controller=info";

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 입력값 해석 오류
    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 설정 메뉴에서 바꾼 내용은 `config_path`에 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut session = Session::from_config(config);
    tracing::info!(
        total_length_mm = session.total_length_mm(),
        bypass = session.bypass_active(),
        "interactive session started"
    );
    ui_cli::print_readout(tr, &session.readout());
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Adjust => ui_cli::handle_adjust(tr, &mut session)?,
            MenuChoice::SetLayLength => ui_cli::handle_set_lay_length(tr, &mut session)?,
            MenuChoice::TotalLength => ui_cli::handle_total_length(tr, &mut session)?,
            MenuChoice::ToggleBypass => ui_cli::handle_toggle_bypass(tr, &mut session),
            MenuChoice::Reset => ui_cli::handle_reset(tr, &mut session),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let code = i18n::resolve_language("auto", Some(config.language.as_str()));
                    *tr = Translator::new_with_pack(&code, config.language_pack_dir.as_deref());
                }
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 한 번만 계산하는 비대화식 모드. 피치는 허용 범위로 고정된다.
///
/// 전체 길이나 피치가 유한한 수가 아니면 계산하지 않고 오류를 돌려준다.
pub fn calc(
    total_length_mm: f64,
    lay_length_mm: f64,
    bypass_active: bool,
) -> Result<Readout, AppError> {
    if !lay_length_mm.is_finite() {
        return Err(InputError::NotFinite(lay_length_mm.to_string()).into());
    }
    let mut session = Session::new(TOTAL_LENGTH_DEFAULT_MM, bypass_active);
    session.set_total_length(total_length_mm)?;
    let readout = session.apply(Action::SetLayLength(lay_length_mm));
    tracing::debug!(result = ?readout.result, "one-shot calculation");
    Ok(readout)
}
