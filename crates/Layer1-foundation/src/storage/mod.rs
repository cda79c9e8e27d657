//! Storage module for Roster
//!
//! - `csv`: 견습생 레코드 파일 (aprendices.csv)
//! - `json`: 글로벌/프로젝트 설정 레이어 (roster.json)
//! - `atomic`: 임시 파일 + rename 교체 (두 저장소 공용)

mod atomic;
mod csv;
mod json;

// CSV Storage (레코드)
pub use self::csv::{RecordStore, RECORDS_FILE};

// JSON Storage (설정)
pub use json::{JsonStore, SettingsScope, PROJECT_DIR, ROSTER_DIR};
