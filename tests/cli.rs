//! CLI 보조 함수 테스트.
use approx::assert_relative_eq;
use zeta_torsion_controller::app::{self, AppError};
use zeta_torsion_controller::session::InputError;
use zeta_torsion_controller::torsion::RotationResult;
use zeta_torsion_controller::ui_cli::{button_row, parse_menu_choice, progress_bar, MenuChoice};

#[test]
fn menu_numbers_map_to_choices() {
    assert_eq!(parse_menu_choice("1\n"), Some(MenuChoice::Adjust));
    assert_eq!(parse_menu_choice(" 4 "), Some(MenuChoice::ToggleBypass));
    assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
    assert_eq!(parse_menu_choice("9"), None);
}

#[test]
fn button_row_groups_by_direction() {
    assert_eq!(
        button_row(),
        "[-1000] [-500] [-50] [-5] [-1] | [+1] [+5] [+50] [+500] [+1000]"
    );
}

#[test]
fn progress_bar_renders_ends() {
    assert_eq!(progress_bar(0.0, 4), "[----]   0%");
    assert_eq!(progress_bar(1.0, 4), "[####] 100%");
    assert_eq!(progress_bar(2.0, 4), "[####] 100%");
}

#[test]
fn one_shot_calc_clamps_lay_length() {
    let r = app::calc(10000.0, 50.0, false).expect("finite inputs");
    assert_relative_eq!(r.lay_length_mm, 100.0);
    assert_eq!(r.result, RotationResult::Rotations(100.0));

    let r = app::calc(10000.0, 1000.0, true).expect("finite inputs");
    assert_eq!(r.result, RotationResult::Bypassed);
}

#[test]
fn one_shot_calc_rejects_non_finite_input() {
    for total in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = app::calc(total, 1000.0, false).unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::NotFinite(_))));
    }
    let err = app::calc(10000.0, f64::NAN, false).unwrap_err();
    assert!(matches!(err, AppError::Input(InputError::NotFinite(_))));
    // 바이패스여도 입력 검증이 먼저다
    assert!(app::calc(f64::NAN, 1000.0, true).is_err());
}

#[test]
fn default_log_filter_shows_info() {
    assert_eq!(app::DEFAULT_LOG_FILTER, "zeta_torsion_controller=info");
    let filter = tracing_subscriber::EnvFilter::try_new(app::DEFAULT_LOG_FILTER);
    assert!(filter.is_ok());
}
