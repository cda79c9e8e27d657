//! Config - 통합 설정 관리
//!
//! - `roster.rs` - RosterConfig (데이터 파일, 색상, 로그 레벨), ConfigOverlay (레이어 단위 부분 설정)

mod roster;

pub use roster::{ConfigOverlay, RosterConfig, ROSTER_CONFIG_FILE};
