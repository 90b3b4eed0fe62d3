//! 해꼬임 회전수 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod lay_length;
pub mod session;
pub mod torsion;
pub mod ui_cli;
pub mod units;
