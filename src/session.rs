//! 한 사용자 세션의 입력 상태와 갱신 규칙.
//!
//! 모든 변경 뒤에 결과를 새로 계산해서 돌려주므로 화면은 항상 최신 입력을 반영한다.

use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::lay_length::LayLengthState;
use crate::torsion::{self, RotationResult, DISPLAY_DECIMALS};
use crate::units::{convert_length, mm_to_inch, parse_length_unit, LengthUnit};

/// 입력값 해석 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// 빈 입력
    #[error("empty input")]
    Empty,
    /// 숫자로 해석할 수 없음
    #[error("not a number: {0}")]
    NotANumber(String),
    /// 무한대/NaN
    #[error("value is not finite: {0}")]
    NotFinite(String),
}

/// 길이 문자열을 mm 값으로 해석한다.
///
/// 뒤에 단위(`mm`, `in`, `inch`, `"`)를 붙일 수 있고 단위가 없으면 mm로 본다.
pub fn parse_length_mm(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    let number = trimmed.trim_end_matches(|c: char| c.is_alphabetic() || c == '"');
    let suffix = &trimmed[number.len()..];
    // "inf", "nan" 처럼 단위가 아닌 꼬리는 숫자 전체로 다시 해석한다.
    let (number, unit) = match parse_length_unit(suffix) {
        Some(unit) if !suffix.is_empty() => (number.trim(), unit),
        _ => (trimmed, LengthUnit::Millimeter),
    };
    if number.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = number
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NotFinite(trimmed.to_string()));
    }
    Ok(convert_length(value, unit, LengthUnit::Millimeter))
}

/// 전체 전선 길이 입력을 mm 값으로 해석한다.
pub fn parse_total_length(text: &str) -> Result<f64, InputError> {
    parse_length_mm(text)
}

/// 세션 상태를 바꾸는 사용자 동작.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// 조정 버튼: 현재 피치에 delta를 더한다
    Adjust(f64),
    /// 슬라이더 등 피치 직접 설정
    SetLayLength(f64),
    /// 피치를 1000mm로 리셋
    Reset,
    /// 전체 전선 길이(mm) 설정
    SetTotalLength(f64),
    /// 바이패스 설정
    SetBypass(bool),
    /// 해꼬임 ON/OFF 전환
    ToggleBypass,
}

/// 화면에 표시할 계산 결과 묶음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub lay_length_mm: f64,
    pub lay_length_in: f64,
    pub total_length_mm: f64,
    pub total_length_in: f64,
    /// 피치 진행 바 위치(0.0~1.0)
    pub progress: f64,
    pub bypass_active: bool,
    pub result: RotationResult,
}

impl Readout {
    /// 결과 줄 문자열. 숫자는 소수 셋째 자리까지 표시한다.
    pub fn result_text(&self, tr: &Translator) -> String {
        match self.result {
            RotationResult::Rotations(_) => format!(
                "{}: {}",
                tr.t(keys::RESULT_ROTATIONS),
                self.result.format(DISPLAY_DECIMALS).unwrap_or_default()
            ),
            RotationResult::Bypassed => tr.t(keys::STATUS_BYPASS),
            RotationResult::InvalidPitch => tr.t(keys::STATUS_INVALID_PITCH),
        }
    }

    pub fn lay_length_text(&self) -> String {
        format!("{:.0} mm", self.lay_length_mm)
    }

    pub fn lay_length_in_text(&self) -> String {
        format!("{:.3} in", self.lay_length_in)
    }

    pub fn total_length_in_text(&self) -> String {
        format!("{:.3} in", self.total_length_in)
    }
}

/// 한 사용자 세션. 세션끼리 상태를 공유하지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    lay_length: LayLengthState,
    total_length_mm: f64,
    bypass_active: bool,
}

/// 세션 시작 시 기본 전체 전선 길이(mm).
pub const TOTAL_LENGTH_DEFAULT_MM: f64 = 10000.0;

impl Default for Session {
    fn default() -> Self {
        Self::new(TOTAL_LENGTH_DEFAULT_MM, false)
    }
}

impl Session {
    /// 유한하지 않은 전체 길이는 기본값(10000mm)으로 바꾼다.
    pub fn new(total_length_mm: f64, bypass_active: bool) -> Self {
        let total_length_mm = if total_length_mm.is_finite() {
            total_length_mm
        } else {
            tracing::warn!("initial total length is not finite, using default");
            TOTAL_LENGTH_DEFAULT_MM
        };
        Self {
            lay_length: LayLengthState::initialize(None),
            total_length_mm,
            bypass_active,
        }
    }

    /// 설정의 기본 전체 길이/해꼬임 여부로 세션을 시작한다.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.default_total_length_mm, !cfg.untwist_active_by_default)
    }

    pub fn lay_length(&self) -> &LayLengthState {
        &self.lay_length
    }

    pub fn total_length_mm(&self) -> f64 {
        self.total_length_mm
    }

    pub fn bypass_active(&self) -> bool {
        self.bypass_active
    }

    /// 동작을 적용하고 결과를 다시 계산한다.
    pub fn apply(&mut self, action: Action) -> Readout {
        match action {
            Action::Adjust(delta) => {
                self.lay_length.adjust_by(delta);
            }
            Action::SetLayLength(value) => {
                self.lay_length.set_absolute(value);
            }
            Action::Reset => {
                self.lay_length.reset();
            }
            Action::SetTotalLength(mm) => {
                if mm.is_finite() {
                    self.total_length_mm = mm;
                } else {
                    tracing::warn!("total length update ignored: not finite");
                }
            }
            Action::SetBypass(on) => self.bypass_active = on,
            Action::ToggleBypass => self.bypass_active = !self.bypass_active,
        }
        tracing::trace!(?action, lay_length_mm = self.lay_length.value(), "session updated");
        self.readout()
    }

    /// 전체 길이(mm)를 적용한다. 유한하지 않으면 거부하고 이전 값을 유지한다.
    pub fn set_total_length(&mut self, total_length_mm: f64) -> Result<Readout, InputError> {
        if !total_length_mm.is_finite() {
            return Err(InputError::NotFinite(total_length_mm.to_string()));
        }
        Ok(self.apply(Action::SetTotalLength(total_length_mm)))
    }

    /// 문자열로 받은 전체 길이를 적용한다. 해석에 실패하면 이전 값을 유지한다.
    pub fn set_total_length_text(&mut self, text: &str) -> Result<Readout, InputError> {
        let mm = parse_total_length(text).map_err(|e| {
            tracing::debug!(error = %e, "total length input rejected");
            e
        })?;
        Ok(self.apply(Action::SetTotalLength(mm)))
    }

    /// 현재 입력으로 결과를 계산한다. 캐시하지 않는다.
    pub fn readout(&self) -> Readout {
        let p = self.lay_length.value();
        Readout {
            lay_length_mm: p,
            lay_length_in: mm_to_inch(p),
            total_length_mm: self.total_length_mm,
            total_length_in: mm_to_inch(self.total_length_mm),
            progress: self.lay_length.progress(),
            bypass_active: self.bypass_active,
            result: torsion::compute(self.total_length_mm, p, self.bypass_active),
        }
    }
}
