//! Roster Config - 통합 설정
//!
//! 글로벌(~/.config/roster/roster.json)과 프로젝트(.roster/roster.json)
//! 설정을 병합한다. 프로젝트 설정이 우선한다.
//!
//! 각 레이어는 `ConfigOverlay`로 읽는다. 파일에 적힌 키만 적용되므로
//! 프로젝트 파일에 없는 키는 글로벌 값이 유지된다.

use crate::storage::{JsonStore, RECORDS_FILE};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 설정 파일명
pub const ROSTER_CONFIG_FILE: &str = "roster.json";

/// Roster 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 레코드 CSV 파일 경로
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// 콘솔 색상 사용
    #[serde(default = "default_true")]
    pub color: bool,

    /// 로그 레벨 (RUST_LOG가 없을 때)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_file: default_data_file(),
            color: true,
            log_level: None,
        }
    }
}

/// 레이어 하나의 부분 설정
///
/// 파일에 있는 키만 `Some`이 된다. 기본값과 같은 값이라도 명시했다면
/// 적용되고, 없는 키는 아래 레이어 값을 건드리지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl ConfigOverlay {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl RosterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        Self::load_from(&JsonStore::layers())
    }

    /// 지정한 레이어들을 순서대로 적용 (뒤가 우선)
    pub fn load_from(layers: &[JsonStore]) -> Result<Self> {
        let mut config = Self::new();
        for layer in layers {
            if let Some(overlay) = layer.load_layer::<ConfigOverlay>(ROSTER_CONFIG_FILE)? {
                tracing::debug!(
                    "Applying {} config from {}",
                    layer.scope(),
                    layer.base_dir().display()
                );
                config.apply(overlay);
            }
        }
        Ok(config)
    }

    /// 프로젝트 설정 저장. 저장된 파일 경로를 반환한다.
    pub fn save_project(&self) -> Result<PathBuf> {
        JsonStore::current_project()?.save(ROSTER_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 레이어 적용: `Some`인 필드만 덮어쓴다
    pub fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(version) = overlay.version {
            self.version = version;
        }
        if let Some(data_file) = overlay.data_file {
            self.data_file = data_file;
        }
        if let Some(color) = overlay.color {
            self.color = color;
        }
        if overlay.log_level.is_some() {
            self.log_level = overlay.log_level;
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_file
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn default_version() -> u32 {
    1
}

fn default_data_file() -> PathBuf {
    PathBuf::from(RECORDS_FILE)
}

fn default_true() -> bool {
    true
}
