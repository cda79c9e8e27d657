//! # roster-foundation
//!
//! Foundation layer for Roster:
//! - Core: 레코드 모델 (Record, Column, FieldValue, RecordPatch)
//! - Storage: CSV 레코드 저장소 (RecordStore), JsonStore (글로벌/프로젝트 설정 레이어)
//! - Config: 통합 설정 (RosterConfig)
//!
//! ## 저장소 연산
//!
//! ```text
//! create_record ──┐
//! update_by_index ┼──▶ load (전체) ──▶ 메모리 병합 ──▶ rewrite (전체, tmp + rename)
//! update_by_name ─┘
//! list_records ──────▶ load (전체, 파일 없으면 빈 목록)
//! ```
//!
//! 동시 쓰기는 지원하지 않는다. 여러 프로세스가 같은 파일을 쓰면
//! 파일 단위로 마지막 쓰기가 남는다.

pub mod config;
pub mod core;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core (레코드 모델)
// ============================================================================
pub use core::{Column, FieldValue, Record, RecordPatch, UpdateFailure, UpdateOutcome};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{ConfigOverlay, RosterConfig, ROSTER_CONFIG_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{
    JsonStore, RecordStore, SettingsScope, PROJECT_DIR, RECORDS_FILE, ROSTER_DIR,
};
