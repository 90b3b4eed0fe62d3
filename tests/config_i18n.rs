//! 설정 파일 저장/로드와 번역기 폴백 테스트.
use std::fs;
use std::path::PathBuf;

use zeta_torsion_controller::config::{self, Config};
use zeta_torsion_controller::i18n::{keys, parse_toml_to_map, resolve_language, Language, Translator};

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("zeta_torsion_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn missing_config_is_created_with_defaults() {
    let path = temp_path("missing").join("config.toml");
    let _ = fs::remove_file(&path);
    let cfg = config::load_from(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn config_round_trips_through_file() {
    let path = temp_path("roundtrip").join("config.toml");
    let cfg = Config {
        language: "ko-kr".into(),
        default_total_length_mm: 2500.0,
        always_on_top: true,
        ..Config::default()
    };
    cfg.save_to(&path).expect("save");
    let loaded = config::load_from(&path).expect("load");
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_config_fills_defaults_and_clamps_alpha() {
    let path = temp_path("partial").join("config.toml");
    fs::write(&path, "language = \"en\"\nwindow_alpha = 5.0\n").expect("write");
    let cfg = config::load_from(&path).expect("load");
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.window_alpha, 1.0);
    assert_eq!(cfg.default_total_length_mm, 10000.0);
    assert!(cfg.untwist_active_by_default);
}

#[test]
fn broken_config_reports_parse_error() {
    let path = temp_path("broken").join("config.toml");
    fs::write(&path, "language = [").expect("write");
    let err = config::load_from(&path).unwrap_err();
    assert!(matches!(err, config::ConfigError::Parse(_)), "{err}");
}

#[test]
fn language_resolution_prefers_cli_then_config() {
    assert_eq!(resolve_language("ko", Some("en")), "ko");
    assert_eq!(resolve_language("auto", Some("en-uk")), "en-us");
    assert_eq!(resolve_language("", Some("ko-KR")), "ko-kr");
}

#[test]
fn translator_builtins_and_overrides() {
    let en = Translator::new("en-us");
    assert_eq!(en.language(), Language::En);
    assert_eq!(en.t(keys::STATUS_BYPASS), "SYSTEM BYPASS");
    let ko = Translator::new("ko");
    assert_eq!(ko.language_code(), "ko");
    assert_eq!(ko.t(keys::STATUS_INVALID_PITCH), "피치는 0보다 커야 합니다");
    assert_eq!(en.t("no.such.key"), "[missing translation]");

    let dir = temp_path("pack");
    fs::write(
        dir.join("en.toml"),
        "[status]\nbypass = \"BYPASS MODE\"\n",
    )
    .expect("write pack");
    let dir_str = dir.to_string_lossy().to_string();
    let packed = Translator::new_with_pack("en-us", Some(&dir_str));
    assert_eq!(packed.t(keys::STATUS_BYPASS), "BYPASS MODE");
    assert_eq!(packed.t(keys::RESULT_ROTATIONS), "TOTAL UNTWIST ROTATIONS");
}

#[test]
fn toml_pack_is_flattened() {
    let map = parse_toml_to_map("[a]\nb = \"x\"\n[a.c]\nd = \"y\"\n").expect("map");
    assert_eq!(map.get("a.b").map(String::as_str), Some("x"));
    assert_eq!(map.get("a.c.d").map(String::as_str), Some("y"));
    assert!(parse_toml_to_map("n = 1").is_none());
}
