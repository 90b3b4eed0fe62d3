//! 세션 갱신 규칙과 전체 시나리오 테스트.
use approx::assert_relative_eq;
use zeta_torsion_controller::config::Config;
use zeta_torsion_controller::i18n::Translator;
use zeta_torsion_controller::session::{
    parse_length_mm, parse_total_length, Action, InputError, Session,
};
use zeta_torsion_controller::torsion::RotationResult;

fn rotations(result: RotationResult) -> f64 {
    result
        .rotations()
        .unwrap_or_else(|| panic!("expected rotations, got {result:?}"))
}

#[test]
fn default_to_clamp_to_reset_scenario() {
    let mut session = Session::default();
    let r = session.readout();
    assert_eq!(r.result, RotationResult::Rotations(10.0));

    let r = session.apply(Action::Adjust(500.0));
    assert_relative_eq!(r.lay_length_mm, 1500.0);
    assert_relative_eq!(rotations(r.result), 10000.0 / 1500.0);
    assert_eq!(r.result.format(3).as_deref(), Some("6.667"));

    let r = session.apply(Action::Adjust(5000.0));
    assert_relative_eq!(r.lay_length_mm, 4950.0);
    assert_relative_eq!(rotations(r.result), 2.020_202_020_2, epsilon = 1e-9);

    let r = session.apply(Action::Reset);
    assert_relative_eq!(r.lay_length_mm, 1000.0);
    assert_eq!(r.result, RotationResult::Rotations(10.0));
}

#[test]
fn every_mutation_refreshes_readout() {
    let mut session = Session::default();
    let r = session.apply(Action::SetTotalLength(20000.0));
    assert_eq!(r.result, RotationResult::Rotations(20.0));
    assert_relative_eq!(r.total_length_in, 20000.0 * 0.0393701);

    let r = session.apply(Action::SetLayLength(2000.0));
    assert_eq!(r.result, RotationResult::Rotations(10.0));
    assert_eq!(r, session.readout());

    let r = session.apply(Action::ToggleBypass);
    assert!(r.bypass_active);
    assert_eq!(r.result, RotationResult::Bypassed);

    let r = session.apply(Action::SetBypass(false));
    assert_eq!(r.result, RotationResult::Rotations(10.0));
}

#[test]
fn sessions_do_not_share_state() {
    let mut a = Session::default();
    let b = Session::default();
    a.apply(Action::Adjust(1000.0));
    a.apply(Action::SetBypass(true));
    assert_relative_eq!(a.lay_length().value(), 2000.0);
    assert_relative_eq!(b.lay_length().value(), 1000.0);
    assert!(!b.bypass_active());
}

#[test]
fn malformed_total_length_is_rejected_and_previous_kept() {
    let mut session = Session::default();
    let err = session.set_total_length_text("abc").unwrap_err();
    assert_eq!(err, InputError::NotANumber("abc".into()));
    assert_relative_eq!(session.total_length_mm(), 10000.0);

    let r = session.set_total_length_text(" 5000 mm ").expect("valid length");
    assert_relative_eq!(r.total_length_mm, 5000.0);
    assert_eq!(r.result, RotationResult::Rotations(5.0));
}

#[test]
fn parse_total_length_cases() {
    assert_eq!(parse_total_length("10000"), Ok(10000.0));
    assert_eq!(parse_total_length("-12.5"), Ok(-12.5));
    assert_eq!(parse_total_length("0"), Ok(0.0));
    assert_eq!(parse_total_length("   "), Err(InputError::Empty));
    assert_eq!(parse_total_length("mm"), Err(InputError::Empty));
    assert!(matches!(parse_total_length("inf"), Err(InputError::NotFinite(_))));
    assert!(matches!(parse_total_length("1,000"), Err(InputError::NotANumber(_))));
    assert!(matches!(parse_total_length("nan"), Err(InputError::NotFinite(_))));
    assert!(matches!(parse_total_length("12ft"), Err(InputError::NotANumber(_))));
}

#[test]
fn inch_entry_converts_to_mm() {
    assert_relative_eq!(parse_length_mm("12in").unwrap(), 304.8, epsilon = 1e-3);
    assert_relative_eq!(parse_length_mm("1\"").unwrap(), 25.4, epsilon = 1e-3);
    assert_relative_eq!(parse_length_mm(" 2 INCH ").unwrap(), 50.8, epsilon = 1e-3);
    assert_relative_eq!(parse_length_mm("1000 mm").unwrap(), 1000.0);
    assert_eq!(parse_length_mm("in"), Err(InputError::Empty));

    let mut session = Session::default();
    let r = session.set_total_length_text("393.701 in").expect("inch length");
    assert_relative_eq!(r.total_length_mm, 10000.0, epsilon = 1e-2);
}

#[test]
fn non_finite_initial_total_length_falls_back_to_default() {
    let session = Session::new(f64::NAN, false);
    assert_relative_eq!(session.total_length_mm(), 10000.0);
    assert_eq!(session.readout().result, RotationResult::Rotations(10.0));

    let session = Session::new(f64::INFINITY, false);
    assert_relative_eq!(session.total_length_mm(), 10000.0);
}

#[test]
fn set_total_length_rejects_non_finite() {
    let mut session = Session::default();
    let err = session.set_total_length(f64::NEG_INFINITY).unwrap_err();
    assert!(matches!(err, InputError::NotFinite(_)));
    assert_relative_eq!(session.total_length_mm(), 10000.0);

    let r = session.set_total_length(2000.0).expect("finite length");
    assert_eq!(r.result, RotationResult::Rotations(2.0));
}

#[test]
fn non_finite_total_length_action_is_ignored() {
    let mut session = Session::default();
    let r = session.apply(Action::SetTotalLength(f64::NAN));
    assert_relative_eq!(r.total_length_mm, 10000.0);
}

#[test]
fn from_config_uses_defaults() {
    let cfg = Config {
        default_total_length_mm: 3000.0,
        untwist_active_by_default: false,
        ..Config::default()
    };
    let session = Session::from_config(&cfg);
    assert_relative_eq!(session.total_length_mm(), 3000.0);
    assert!(session.bypass_active());
    assert_eq!(session.readout().result, RotationResult::Bypassed);
}

#[test]
fn result_text_per_outcome() {
    let tr = Translator::new("en-us");
    let mut session = Session::default();
    let r = session.apply(Action::Adjust(500.0));
    assert_eq!(r.result_text(&tr), "TOTAL UNTWIST ROTATIONS: 6.667");
    assert_eq!(r.lay_length_text(), "1500 mm");
    assert_eq!(r.lay_length_in_text(), "59.055 in");
    assert_eq!(r.total_length_in_text(), "393.701 in");

    let r = session.apply(Action::SetBypass(true));
    assert_eq!(r.result_text(&tr), "SYSTEM BYPASS");

    let invalid = zeta_torsion_controller::session::Readout {
        result: RotationResult::InvalidPitch,
        ..session.readout()
    };
    assert_eq!(
        invalid.result_text(&tr),
        "Lay length must be greater than zero"
    );
}
