//! 해꼬임 회전수 계산과 mm→inch 환산 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use zeta_torsion_controller::torsion::{compute, RotationResult, DISPLAY_DECIMALS};
use zeta_torsion_controller::units::{
    convert_length, inch_to_mm, mm_to_inch, parse_length_unit, LengthUnit,
};

#[test]
fn rotations_is_plain_quotient() {
    assert_eq!(compute(10000.0, 1000.0, false), RotationResult::Rotations(10.0));
    let l = 12345.678;
    let p = 987.65;
    assert_eq!(compute(l, p, false), RotationResult::Rotations(l / p));
}

#[test]
fn bypass_wins_over_everything() {
    for (l, p) in [(10000.0, 1000.0), (0.0, 0.0), (-5.0, -1.0), (1.0, f64::NAN)] {
        assert_eq!(compute(l, p, true), RotationResult::Bypassed);
    }
}

#[test]
fn non_positive_pitch_is_invalid() {
    assert_eq!(compute(10000.0, 0.0, false), RotationResult::InvalidPitch);
    assert_eq!(compute(10000.0, -0.0, false), RotationResult::InvalidPitch);
    assert_eq!(compute(10000.0, -100.0, false), RotationResult::InvalidPitch);
    assert_eq!(compute(10000.0, f64::NAN, false), RotationResult::InvalidPitch);
}

#[test]
fn zero_and_negative_total_length_still_compute() {
    assert_eq!(compute(0.0, 1000.0, false), RotationResult::Rotations(0.0));
    assert_eq!(compute(-2000.0, 1000.0, false), RotationResult::Rotations(-2.0));
}

#[test]
fn compute_is_repeatable() {
    let a = compute(10000.0, 1500.0, false);
    let b = compute(10000.0, 1500.0, false);
    match (a, b) {
        (RotationResult::Rotations(x), RotationResult::Rotations(y)) => {
            assert_eq!(x.to_bits(), y.to_bits())
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn format_uses_three_decimals() {
    let r = compute(10000.0, 1500.0, false);
    assert_eq!(r.format(DISPLAY_DECIMALS).as_deref(), Some("6.667"));
    assert_eq!(RotationResult::Bypassed.format(DISPLAY_DECIMALS), None);
    assert_eq!(RotationResult::InvalidPitch.rotations(), None);
}

#[test]
fn mm_to_inch_fixed_factor() {
    assert_abs_diff_eq!(mm_to_inch(1000.0), 39.3701, epsilon = 1e-4);
    assert_eq!(mm_to_inch(1000.0), 1000.0 * 0.0393701);
    assert_abs_diff_eq!(mm_to_inch(10000.0), 393.701, epsilon = 1e-3);
    assert_eq!(mm_to_inch(0.0), 0.0);
}

#[test]
fn inch_entry_round_trips() {
    assert_relative_eq!(inch_to_mm(mm_to_inch(2500.0)), 2500.0, epsilon = 1e-9);
    assert_relative_eq!(
        convert_length(1.0, LengthUnit::Inch, LengthUnit::Millimeter),
        25.39999,
        epsilon = 1e-4
    );
    assert_eq!(parse_length_unit("IN"), Some(LengthUnit::Inch));
    assert_eq!(parse_length_unit(" mm "), Some(LengthUnit::Millimeter));
    assert_eq!(parse_length_unit("ft"), None);
}
