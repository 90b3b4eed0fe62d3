use serde::{Deserialize, Serialize};

/// mm → inch 고정 환산 계수.
pub const MM_TO_INCH: f64 = 0.0393701;

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Inch,
}

/// 밀리미터를 인치로 바꾼다.
pub fn mm_to_inch(mm: f64) -> f64 {
    mm * MM_TO_INCH
}

/// 인치를 밀리미터로 바꾼다. `mm_to_inch`의 역변환.
pub fn inch_to_mm(inch: f64) -> f64 {
    inch / MM_TO_INCH
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let mm = match from {
        LengthUnit::Millimeter => value,
        LengthUnit::Inch => inch_to_mm(value),
    };
    match to {
        LengthUnit::Millimeter => mm,
        LengthUnit::Inch => mm_to_inch(mm),
    }
}

/// 단위 문자열(`mm`, `in`, `inch`, `"`)을 enum으로 바꾼다.
pub fn parse_length_unit(s: &str) -> Option<LengthUnit> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" | "millimetre" => Some(LengthUnit::Millimeter),
        "in" | "inch" | "inches" | "\"" => Some(LengthUnit::Inch),
        _ => None,
    }
}
