use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
///
/// 피치 값은 세션 상태라서 여기에 저장하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us 등)
    pub language: String,
    /// 언어팩 디렉터리. 없으면 locales/ → 내장 문자열 순으로 사용
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    /// GUI 창을 항상 위에 둘지 여부
    pub always_on_top: bool,
    /// 세션 시작 시 전체 전선 길이(mm)
    pub default_total_length_mm: f64,
    /// 세션 시작 시 해꼬임 활성 여부(false면 바이패스로 시작)
    pub untwist_active_by_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            always_on_top: false,
            default_total_length_mm: 10000.0,
            untwist_active_by_default: true,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 만들어 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg.sanitized())
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 범위를 벗어난 값을 보정한다.
    fn sanitized(mut self) -> Self {
        self.window_alpha = if self.window_alpha.is_finite() {
            self.window_alpha.clamp(0.3, 1.0)
        } else {
            1.0
        };
        if !self.default_total_length_mm.is_finite() {
            tracing::warn!("default_total_length_mm is not finite, using 10000");
            self.default_total_length_mm = Config::default().default_total_length_mm;
        }
        self
    }
}
