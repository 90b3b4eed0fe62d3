use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::lay_length::{find_step, AdjustStep, ADJUST_STEPS};
use crate::session::{parse_length_mm, Action, Readout, Session};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Adjust,
    SetLayLength,
    TotalLength,
    ToggleBypass,
    Reset,
    Settings,
    Exit,
}

/// 메뉴 번호를 선택지로 바꾼다.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Adjust),
        "2" => Some(MenuChoice::SetLayLength),
        "3" => Some(MenuChoice::TotalLength),
        "4" => Some(MenuChoice::ToggleBypass),
        "5" => Some(MenuChoice::Reset),
        "6" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면(EOF) 종료로 본다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_ADJUST,
        keys::MAIN_MENU_SET_LAY_LENGTH,
        keys::MAIN_MENU_TOTAL_LENGTH,
        keys::MAIN_MENU_BYPASS,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line(&tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(s) => s,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            Err(e) => return Err(e),
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 조정 버튼 패널을 처리한다. 빈 입력이 올 때까지 반복한다.
pub fn handle_adjust(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ADJUST_HEADING));
    println!("{}", button_row());
    loop {
        let sel = read_line(&tr.t(keys::ADJUST_PROMPT))?;
        if sel.trim().is_empty() {
            return Ok(());
        }
        match find_step(&sel) {
            Some(step) => {
                let readout = session.apply(Action::Adjust(step.delta));
                print_readout(tr, &readout);
            }
            None => println!("{}", tr.t(keys::ADJUST_UNKNOWN)),
        }
    }
}

/// 피치 직접 입력을 처리한다. 범위 밖 값은 경계로 고정된다.
pub fn handle_set_lay_length(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let value = read_length_mm(tr, &tr.t(keys::PROMPT_LAY_LENGTH))?;
    let readout = session.apply(Action::SetLayLength(value));
    print_readout(tr, &readout);
    Ok(())
}

/// 전체 전선 길이 입력을 처리한다. 숫자가 아니면 이전 값을 유지하고 안내만 한다.
pub fn handle_total_length(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let text = read_line(&tr.t(keys::PROMPT_TOTAL_LENGTH))?;
    match session.set_total_length_text(&text) {
        Ok(readout) => print_readout(tr, &readout),
        Err(e) => {
            println!(
                "{}: {} ({e})",
                tr.t(keys::ERROR_PREFIX),
                tr.t(keys::ERROR_INVALID_TOTAL_LENGTH)
            );
        }
    }
    Ok(())
}

pub fn handle_toggle_bypass(tr: &Translator, session: &mut Session) {
    let readout = session.apply(Action::ToggleBypass);
    if readout.bypass_active {
        println!("{}", tr.t(keys::UNTWIST_OFF));
    } else {
        println!("{}", tr.t(keys::UNTWIST_ON));
    }
    print_readout(tr, &readout);
}

pub fn handle_reset(tr: &Translator, session: &mut Session) {
    let readout = session.apply(Action::Reset);
    print_readout(tr, &readout);
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(false);
    }
    let lang = match sel.trim() {
        "1" => "auto",
        "2" => "ko-kr",
        "3" => "en-us",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = lang.to_string();
    tracing::info!(language = lang, "language changed");
    Ok(true)
}

/// 조정 버튼을 한 줄로 나열한다. 감소/증가 그룹 사이는 `|`로 구분한다.
pub fn button_row() -> String {
    let (dec, inc): (Vec<&AdjustStep>, Vec<&AdjustStep>) =
        ADJUST_STEPS.iter().partition(|s| s.is_decrease());
    let join = |steps: &[&AdjustStep]| {
        steps
            .iter()
            .map(|s| format!("[{}]", s.label))
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!("{} | {}", join(&dec), join(&inc))
}

/// 현재 결과를 출력한다.
pub fn print_readout(tr: &Translator, readout: &Readout) {
    println!(
        "{}: {}  ({}: {})",
        tr.t(keys::READOUT_LAY_LENGTH),
        readout.lay_length_text(),
        tr.t(keys::READOUT_LAY_LENGTH_IN),
        readout.lay_length_in_text()
    );
    println!("{}", progress_bar(readout.progress, 30));
    println!(
        "{}: {:.1} mm  ({}: {})",
        tr.t(keys::READOUT_TOTAL_LENGTH),
        readout.total_length_mm,
        tr.t(keys::READOUT_TOTAL_INCHES),
        readout.total_length_in_text()
    );
    println!(">> {}", readout.result_text(tr));
}

/// 텍스트 진행 바.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress.clamp(0.0, 1.0) * 100.0
    )
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    Ok(buf)
}

/// 길이를 읽는다. `12in`, `12"` 처럼 인치로도 입력할 수 있다.
fn read_length_mm(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match parse_length_mm(&s) {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
