/// 결과 표시 기본 소수 자릿수.
pub const DISPLAY_DECIMALS: usize = 3;

/// 해꼬임 회전수 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationResult {
    /// 회전수 L / P (반올림하지 않은 값)
    Rotations(f64),
    /// 바이패스 상태. 계산을 건너뛴다.
    Bypassed,
    /// 피치가 0 이하라 나눗셈이 의미 없음
    InvalidPitch,
}

impl RotationResult {
    /// 숫자 결과일 때만 회전수를 돌려준다.
    pub fn rotations(&self) -> Option<f64> {
        match self {
            RotationResult::Rotations(r) => Some(*r),
            _ => None,
        }
    }

    /// 숫자 결과를 지정 자릿수 문자열로 만든다. 비숫자 결과는 None.
    pub fn format(&self, decimals: usize) -> Option<String> {
        self.rotations().map(|r| format!("{r:.decimals$}"))
    }
}

/// 전체 전선 길이와 피치로 해꼬임 회전수를 구한다.
///
/// 바이패스가 켜져 있으면 피치 값과 상관없이 `Bypassed`를 돌려준다.
/// 그 다음 피치가 0 이하(또는 NaN)이면 `InvalidPitch`, 아니면 `L / P`.
pub fn compute(total_length_mm: f64, lay_length_mm: f64, bypass_active: bool) -> RotationResult {
    if bypass_active {
        return RotationResult::Bypassed;
    }
    if lay_length_mm.is_nan() || lay_length_mm <= 0.0 {
        return RotationResult::InvalidPitch;
    }
    RotationResult::Rotations(total_length_mm / lay_length_mm)
}
