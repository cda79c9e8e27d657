//! 임시 파일 + rename 교체
//!
//! `<file>.tmp`에 먼저 쓰고 대상 위치로 rename 한다. 쓰기나 rename이
//! 실패하면 임시 파일을 지우고 대상은 이전 내용 그대로 남는다.

use crate::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// 대상 파일의 임시 경로 (`<file>.tmp`)
pub(crate) fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// `write`로 임시 파일을 채운 뒤 `target`을 교체
pub(crate) fn replace_with<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let temp = temp_path(target);
    if let Err(e) = write(&temp) {
        discard(&temp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&temp, target) {
        discard(&temp);
        return Err(Error::Storage(format!(
            "Failed to replace {}: {}",
            target.display(),
            e
        )));
    }
    Ok(())
}

fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {}", temp.display(), e);
        }
    }
}
