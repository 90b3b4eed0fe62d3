//! 꼬임 피치(lay length, P) 상태와 조정 버튼 테이블.

/// 피치 하한(mm).
pub const LAY_LENGTH_MIN_MM: f64 = 100.0;
/// 피치 상한(mm).
pub const LAY_LENGTH_MAX_MM: f64 = 4950.0;
/// 초기값/리셋값(mm).
pub const LAY_LENGTH_DEFAULT_MM: f64 = 1000.0;

/// 세션마다 하나씩 소유하는 피치 상태.
///
/// 값은 어떤 조작 뒤에도 항상 `[LAY_LENGTH_MIN_MM, LAY_LENGTH_MAX_MM]` 안에 있다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayLengthState {
    value_mm: f64,
}

impl Default for LayLengthState {
    fn default() -> Self {
        Self {
            value_mm: LAY_LENGTH_DEFAULT_MM,
        }
    }
}

impl LayLengthState {
    /// 기본값(1000mm)으로 시작하는 상태를 만든다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 상태가 있으면 그대로, 없으면 기본값 상태를 돌려준다.
    pub fn initialize(existing: Option<LayLengthState>) -> Self {
        existing.unwrap_or_default()
    }

    /// 현재 피치(mm).
    pub fn value(&self) -> f64 {
        self.value_mm
    }

    /// 현재 값에 delta를 더한 뒤 범위로 고정한다. 범위를 넘으면 경계값에 붙는다.
    pub fn adjust_by(&mut self, delta: f64) -> f64 {
        self.store(self.value_mm + delta)
    }

    /// 슬라이더 등 직접 입력값을 범위로 고정해 저장한다.
    pub fn set_absolute(&mut self, value_mm: f64) -> f64 {
        self.store(value_mm)
    }

    /// 기본값(1000mm)으로 되돌린다.
    pub fn reset(&mut self) -> f64 {
        self.value_mm = LAY_LENGTH_DEFAULT_MM;
        self.value_mm
    }

    /// 진행 바 표시용 정규화 위치(0.0~1.0).
    pub fn progress(&self) -> f64 {
        (self.value_mm - LAY_LENGTH_MIN_MM) / (LAY_LENGTH_MAX_MM - LAY_LENGTH_MIN_MM)
    }

    fn store(&mut self, candidate: f64) -> f64 {
        // NaN은 min/max를 거치면 상한값이 되므로 먼저 걸러낸다.
        if candidate.is_nan() {
            tracing::warn!("lay length update ignored: NaN input");
            return self.value_mm;
        }
        let clamped = clamp_lay_length(candidate);
        if clamped != candidate {
            tracing::debug!(requested = candidate, clamped, "lay length pinned to bound");
        }
        self.value_mm = clamped;
        self.value_mm
    }
}

/// 피치 값을 허용 범위로 포화 고정한다.
pub fn clamp_lay_length(value_mm: f64) -> f64 {
    LAY_LENGTH_MAX_MM.min(value_mm).max(LAY_LENGTH_MIN_MM)
}

/// 조정 버튼 하나(라벨과 증감량).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustStep {
    pub label: &'static str,
    pub delta: f64,
}

impl AdjustStep {
    const fn new(label: &'static str, delta: f64) -> Self {
        Self { label, delta }
    }

    /// 감소 버튼 여부. GUI에서 색상 구분에 쓴다.
    pub fn is_decrease(&self) -> bool {
        self.delta < 0.0
    }
}

/// 표준 조정 패널. 왼쪽부터 감소(큰 값→작은 값), 이어서 증가(작은 값→큰 값).
pub static ADJUST_STEPS: [AdjustStep; 10] = [
    AdjustStep::new("-1000", -1000.0),
    AdjustStep::new("-500", -500.0),
    AdjustStep::new("-50", -50.0),
    AdjustStep::new("-5", -5.0),
    AdjustStep::new("-1", -1.0),
    AdjustStep::new("+1", 1.0),
    AdjustStep::new("+5", 5.0),
    AdjustStep::new("+50", 50.0),
    AdjustStep::new("+500", 500.0),
    AdjustStep::new("+1000", 1000.0),
];

/// 라벨로 조정 단계를 찾는다. 부호 없는 숫자("50")는 증가로 해석한다.
pub fn find_step(label: &str) -> Option<&'static AdjustStep> {
    let label = label.trim();
    ADJUST_STEPS.iter().find(|s| {
        s.label == label || (!label.starts_with('-') && s.label.strip_prefix('+') == Some(label))
    })
}
