use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ADJUST: &str = "main_menu.adjust";
    pub const MAIN_MENU_SET_LAY_LENGTH: &str = "main_menu.set_lay_length";
    pub const MAIN_MENU_TOTAL_LENGTH: &str = "main_menu.total_length";
    pub const MAIN_MENU_BYPASS: &str = "main_menu.bypass";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const ADJUST_HEADING: &str = "adjust.heading";
    pub const ADJUST_PROMPT: &str = "adjust.prompt";
    pub const ADJUST_UNKNOWN: &str = "adjust.unknown";
    pub const PROMPT_LAY_LENGTH: &str = "prompt.lay_length";
    pub const PROMPT_TOTAL_LENGTH: &str = "prompt.total_length";
    pub const DIRECT_SET: &str = "adjust.direct_set";

    pub const READOUT_LAY_LENGTH: &str = "readout.lay_length";
    pub const READOUT_LAY_LENGTH_IN: &str = "readout.lay_length_in";
    pub const READOUT_TOTAL_LENGTH: &str = "readout.total_length";
    pub const READOUT_TOTAL_INCHES: &str = "readout.total_inches";
    pub const RESULT_ROTATIONS: &str = "result.rotations";
    pub const STATUS_BYPASS: &str = "status.bypass";
    pub const STATUS_INVALID_PITCH: &str = "status.invalid_pitch";
    pub const UNTWIST_ACTIVE: &str = "control.untwist_active";
    pub const UNTWIST_ON: &str = "control.untwist_on";
    pub const UNTWIST_OFF: &str = "control.untwist_off";
    pub const RESET_BUTTON: &str = "control.reset";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_TOTAL_LENGTH: &str = "error.invalid_total_length";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_ALPHA: &str = "settings.alpha";
    pub const SETTINGS_ALWAYS_ON_TOP: &str = "settings.always_on_top";
    pub const SETTINGS_LANG_PACK_DIR: &str = "settings.lang_pack_dir";
    pub const SETTINGS_BROWSE: &str = "settings.browse";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_LANG_AUTO: &str = "settings.lang_auto";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
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
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 locales/ 를 시도하고, 그래도 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        tracing::debug!(
            lang = lang_code,
            overrides = overrides.as_ref().map_or(0, |m| m.len()),
            "translator created"
        );
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

    /// 키를 언어팩에서만 조회한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며 한국어에 없는 키는 영어로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션/키 = "문자열" 로 구성된 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 중첩 테이블을 `a.b.c` 형태의 평평한 키로 펼친다.
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

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "Zeta Torsion Controller",
        MAIN_MENU_TITLE => "\n=== Zeta Torsion Controller ===",
        MAIN_MENU_ADJUST => "1) 피치 정밀 조정",
        MAIN_MENU_SET_LAY_LENGTH => "2) 피치 직접 입력",
        MAIN_MENU_TOTAL_LENGTH => "3) 전체 전선 길이 입력",
        MAIN_MENU_BYPASS => "4) 해꼬임 ON/OFF",
        MAIN_MENU_RESET => "5) 1000mm로 리셋",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ADJUST_HEADING => "\n-- 피치 정밀 조정 --",
        ADJUST_PROMPT => "버튼 입력 (예: +50, -5, 엔터=완료): ",
        ADJUST_UNKNOWN => "없는 버튼입니다.",
        PROMPT_LAY_LENGTH => "피치 [mm / in]: ",
        PROMPT_TOTAL_LENGTH => "전체 전선 길이 (L) [mm / in]: ",
        DIRECT_SET => "직접 설정",
        READOUT_LAY_LENGTH => "피치 (P)",
        READOUT_LAY_LENGTH_IN => "피치 (IN)",
        READOUT_TOTAL_LENGTH => "전체 전선 길이 (L)",
        READOUT_TOTAL_INCHES => "전체 길이 (IN)",
        RESULT_ROTATIONS => "총 해꼬임 회전수",
        STATUS_BYPASS => "시스템 바이패스",
        STATUS_INVALID_PITCH => "피치는 0보다 커야 합니다",
        UNTWIST_ACTIVE => "해꼬임 활성",
        UNTWIST_ON => "해꼬임이 켜졌습니다.",
        UNTWIST_OFF => "해꼬임이 꺼졌습니다 (바이패스).",
        RESET_BUTTON => "1000mm로 리셋",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_TOTAL_LENGTH => "전체 길이를 숫자로 해석할 수 없습니다",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_TITLE => "설정",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 자동  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        SETTINGS_ALPHA => "창 투명도",
        SETTINGS_ALWAYS_ON_TOP => "항상 위",
        SETTINGS_LANG_PACK_DIR => "언어팩 폴더",
        SETTINGS_BROWSE => "찾아보기…",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_LANG_AUTO => "시스템",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Zeta Torsion Controller",
        MAIN_MENU_TITLE => "\n=== Zeta Torsion Controller ===",
        MAIN_MENU_ADJUST => "1) Precision lay adjustment",
        MAIN_MENU_SET_LAY_LENGTH => "2) Set lay length",
        MAIN_MENU_TOTAL_LENGTH => "3) Set total wire length",
        MAIN_MENU_BYPASS => "4) Toggle untwisting",
        MAIN_MENU_RESET => "5) Reset to 1000mm",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ADJUST_HEADING => "\n-- Precision Lay Adjustment Controls --",
        ADJUST_PROMPT => "Button (e.g. +50, -5, Enter=done): ",
        ADJUST_UNKNOWN => "No such button.",
        PROMPT_LAY_LENGTH => "Lay length [mm / in]: ",
        PROMPT_TOTAL_LENGTH => "TOTAL WIRE LENGTH (L) [mm / in]: ",
        DIRECT_SET => "Direct set",
        READOUT_LAY_LENGTH => "LAY LENGTH (P)",
        READOUT_LAY_LENGTH_IN => "LAY LENGTH (IN)",
        READOUT_TOTAL_LENGTH => "TOTAL WIRE LENGTH (L)",
        READOUT_TOTAL_INCHES => "TOTAL INCHES",
        RESULT_ROTATIONS => "TOTAL UNTWIST ROTATIONS",
        STATUS_BYPASS => "SYSTEM BYPASS",
        STATUS_INVALID_PITCH => "Lay length must be greater than zero",
        UNTWIST_ACTIVE => "Untwisting Active",
        UNTWIST_ON => "Untwisting enabled.",
        UNTWIST_OFF => "Untwisting disabled (bypass).",
        RESET_BUTTON => "RESET TO 1000mm",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_TOTAL_LENGTH => "Total length is not a number",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_TITLE => "Settings",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) Auto  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_ALPHA => "Window transparency",
        SETTINGS_ALWAYS_ON_TOP => "Always on top",
        SETTINGS_LANG_PACK_DIR => "Language pack folder",
        SETTINGS_BROWSE => "Browse…",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_LANG_AUTO => "System",
        _ => return None,
    })
}
