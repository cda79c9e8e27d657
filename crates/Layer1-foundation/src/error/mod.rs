//! Error types for Roster
//!
//! 모든 에러를 중앙에서 관리
//!
//! 업데이트 실패(인덱스 범위, 미존재 컬럼 등)는 에러가 아니라
//! [`crate::UpdateOutcome`] 값으로 반환된다. 여기에는 I/O, 설정,
//! 손상된 저장소처럼 호출자가 분기할 수 없는 조건만 들어간다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Roster 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 저장소 관련
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt store at line {line}: {reason}")]
    CorruptStore { line: u64, reason: String },

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::CorruptStore { .. })
    }

    /// 손상된 저장소 에러 생성 헬퍼
    pub fn corrupt(line: u64, reason: impl Into<String>) -> Self {
        Error::CorruptStore {
            line,
            reason: reason.into(),
        }
    }
}
