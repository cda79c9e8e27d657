//! 설정 레이어 저장소
//!
//! 설정은 글로벌(~/.config/roster/)과 프로젝트(.roster/) 두 레이어에
//! 나뉘어 있다. `JsonStore::layers()`는 적용 순서(글로벌 → 프로젝트)로
//! 레이어를 돌려준다. 뒤 레이어가 앞 레이어를 덮어쓴다.

use crate::storage::atomic;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 글로벌/프로젝트 설정 디렉토리 이름
pub const ROSTER_DIR: &str = "roster";
pub const PROJECT_DIR: &str = ".roster";

/// 설정 레이어 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    Global,
    Project,
}

impl fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// 설정 레이어 하나 (범위 + 디렉토리)
#[derive(Debug, Clone)]
pub struct JsonStore {
    scope: SettingsScope,
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(scope: SettingsScope, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            scope,
            base_dir: base_dir.into(),
        }
    }

    /// 글로벌 설정 (~/.config/roster/)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join(ROSTER_DIR);
        Ok(Self::new(SettingsScope::Global, dir))
    }

    /// 프로젝트 설정 (<root>/.roster/)
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(SettingsScope::Project, root.as_ref().join(PROJECT_DIR))
    }

    /// 현재 디렉토리 프로젝트 설정
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Ok(Self::project(cwd))
    }

    /// 적용 순서대로 정렬된 레이어 목록. 찾을 수 없는 레이어는 건너뛴다.
    pub fn layers() -> Vec<Self> {
        [Self::global(), Self::current_project()]
            .into_iter()
            .filter_map(|layer| match layer {
                Ok(layer) => Some(layer),
                Err(e) => {
                    tracing::debug!("Skipping settings layer: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn scope(&self) -> SettingsScope {
        self.scope
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// 레이어 파일 로드
    ///
    /// 파일이 없거나 공백뿐이면 `None`. 레이어에 없는 키는 `T`가
    /// `Option`으로 표현해야 "설정 안 됨"과 기본값이 구분된다.
    pub fn load_layer<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Config(format!(
                    "Failed to read {} settings {}: {}",
                    self.scope,
                    path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            tracing::debug!("Empty {} settings at {}", self.scope, path.display());
            return Ok(None);
        }

        let layer = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse {} settings {}: {}",
                self.scope,
                path.display(),
                e
            ))
        })?;
        tracing::debug!("Loaded {} settings from {}", self.scope, path.display());
        Ok(Some(layer))
    }

    /// 레이어 파일 저장 (임시 파일 + rename)
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<PathBuf> {
        let path = self.file_path(filename);
        let mut content = serde_json::to_string_pretty(data)?;
        content.push('\n');
        atomic::replace_with(&path, |temp| Ok(fs::write(temp, &content)?))?;
        tracing::info!("Saved {} settings to {}", self.scope, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_layer() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::project(temp.path());

        let mut data = BTreeMap::new();
        data.insert("dataFile".to_string(), "grupo.csv".to_string());
        let path = store.save("roster.json", &data).unwrap();

        assert_eq!(path, temp.path().join(".roster").join("roster.json"));
        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));
        let loaded: Option<BTreeMap<String, String>> = store.load_layer("roster.json").unwrap();
        assert_eq!(loaded, Some(data));
    }

    #[test]
    fn test_missing_and_blank_layers_are_absent() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::new(SettingsScope::Global, temp.path());

        let missing: Option<BTreeMap<String, String>> = store.load_layer("roster.json").unwrap();
        assert!(missing.is_none());

        fs::write(temp.path().join("roster.json"), "  \n").unwrap();
        let blank: Option<BTreeMap<String, String>> = store.load_layer("roster.json").unwrap();
        assert!(blank.is_none());
    }

    #[test]
    fn test_invalid_layer_names_scope() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::project(temp.path());
        fs::create_dir_all(store.base_dir()).unwrap();
        fs::write(store.file_path("roster.json"), "{ not json").unwrap();

        let err = store
            .load_layer::<BTreeMap<String, String>>("roster.json")
            .unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("project settings"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_project_scope() {
        let store = JsonStore::project("/srv/sena");
        assert_eq!(store.scope(), SettingsScope::Project);
        assert_eq!(store.base_dir(), Path::new("/srv/sena/.roster"));
    }
}
