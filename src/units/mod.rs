//! 단위 정의 및 변환 모듈 모음.

pub mod length;

pub use length::{
    convert_length, inch_to_mm, mm_to_inch, parse_length_unit, LengthUnit, MM_TO_INCH,
};
