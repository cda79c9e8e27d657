//! CSV 레코드 저장소
//!
//! 파일 하나에 견습생 레코드 전체를 보관한다. 모든 연산은
//! 전체 로드 → 메모리 병합 → 전체 재작성 순서로 동작한다.
//!
//! 잠금은 없다. 여러 프로세스가 동시에 쓰면 파일 단위로
//! 마지막 쓰기가 이긴다.

use crate::core::{Column, FieldValue, Record, RecordPatch, UpdateFailure, UpdateOutcome};
use crate::storage::atomic;
use crate::{Error, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// 기본 데이터 파일명
pub const RECORDS_FILE: &str = "aprendices.csv";

/// CSV 레코드 저장소 핸들
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 디렉토리 안의 기본 파일 (aprendices.csv)
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(RECORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일 존재 여부 (첫 추가 전에는 없다)
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    // ========================================================================
    // Append
    // ========================================================================

    /// 새 레코드를 마지막 행으로 추가
    pub fn create_record(
        &self,
        name: &str,
        surname: &str,
        address: &str,
        phone: i64,
        group: i64,
    ) -> Result<()> {
        self.append(Record::new(name, surname, address, phone, group))
    }

    /// 텍스트 입력 그대로 추가. 전화/Ficha가 정수가 아니면 쓰기 전에 거부한다.
    pub fn append_raw(
        &self,
        name: &str,
        surname: &str,
        address: &str,
        phone: impl Into<FieldValue>,
        group: impl Into<FieldValue>,
    ) -> Result<()> {
        let phone = coerce_integer(Column::Phone, phone.into())?;
        let group = coerce_integer(Column::Group, group.into())?;
        self.create_record(name, surname, address, phone, group)
    }

    pub fn append(&self, record: Record) -> Result<()> {
        let mut records = self.load()?.unwrap_or_default();
        tracing::info!(
            "Appending apprentice {} at index {}",
            record,
            records.len()
        );
        records.push(record);
        self.rewrite(&records)
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 전체 레코드 (디스크 순서). 파일이 없으면 빈 목록이며 파일을 만들지 않는다.
    pub fn list_records(&self) -> Result<Vec<Record>> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.list_records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// 위치 인덱스로 셀 하나를 갱신
    ///
    /// 검사 순서: 저장소 없음 → 인덱스 범위 → 컬럼 이름 → 정수 변환.
    /// 실패 시 쓰기 없이 `UpdateOutcome::Failed`를 반환한다.
    pub fn update_by_index(
        &self,
        index: i64,
        column: &str,
        new_value: impl Into<FieldValue>,
    ) -> Result<UpdateOutcome> {
        let Some(mut records) = self.load()? else {
            return Ok(rejected(UpdateFailure::EmptyStore));
        };

        let len = records.len();
        let slot = usize::try_from(index).ok().filter(|i| *i < len);
        let Some(slot) = slot else {
            return Ok(rejected(UpdateFailure::IndexOutOfRange { index, len }));
        };

        let column = match column.parse::<Column>() {
            Ok(column) => column,
            Err(reason) => return Ok(rejected(reason)),
        };

        if let Err(reason) = records[slot].set(column, new_value.into()) {
            return Ok(rejected(reason));
        }

        self.rewrite(&records)?;
        tracing::info!("Updated {} of apprentice at index {}", column, slot);
        Ok(UpdateOutcome::Updated { count: 1 })
    }

    /// (Nombre, Apellido)가 일치하는 모든 행에 변경을 적용 (broadcast)
    pub fn update_by_name(
        &self,
        name: &str,
        surname: &str,
        patch: RecordPatch,
    ) -> Result<UpdateOutcome> {
        if patch.is_empty() {
            tracing::debug!("Empty patch for {} {}", name, surname);
        }
        let assignments = match patch.resolve() {
            Ok(assignments) => assignments,
            Err(reason) => return Ok(rejected(reason)),
        };

        let Some(mut records) = self.load()? else {
            return Ok(rejected(UpdateFailure::EmptyStore));
        };

        let mut count = 0;
        for record in records.iter_mut().filter(|r| r.matches(name, surname)) {
            for (column, value) in &assignments {
                if let Err(reason) = record.set(*column, value.clone()) {
                    return Ok(rejected(reason));
                }
            }
            count += 1;
        }

        if count == 0 {
            return Ok(rejected(UpdateFailure::NotFound {
                name: name.to_string(),
                surname: surname.to_string(),
            }));
        }

        self.rewrite(&records)?;
        tracing::info!("Updated {} row(s) for apprentice {} {}", count, name, surname);
        Ok(UpdateOutcome::Updated { count })
    }

    // ========================================================================
    // File I/O
    // ========================================================================

    /// 파일 전체 로드. 파일이 없으면 `None`.
    fn load(&self) -> Result<Option<Vec<Record>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No store at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers()?;
        if !headers.iter().eq(Column::headers()) {
            return Err(Error::corrupt(
                1,
                format!(
                    "expected header '{}', found '{}'",
                    Column::headers().join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<Record>().enumerate() {
            // header is line 1
            records.push(row.map_err(|e| row_error(e, i as u64 + 2))?);
        }

        tracing::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(Some(records))
    }

    /// 임시 파일에 전체를 쓰고 rename으로 교체
    fn rewrite(&self, records: &[Record]) -> Result<()> {
        atomic::replace_with(&self.path, |temp| write_table(temp, records))?;
        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

fn write_table(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    writer.write_record(Column::headers())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn row_error(e: csv::Error, fallback_line: u64) -> Error {
    if e.is_io_error() {
        return Error::Csv(e);
    }
    let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
    Error::corrupt(line, e.to_string())
}

fn coerce_integer(column: Column, value: FieldValue) -> Result<i64> {
    value
        .coerce_for(column)
        .ok()
        .and_then(|v| v.as_integer())
        .ok_or_else(|| Error::InvalidInput(format!("{} must be an integer", column)))
}

fn rejected(reason: UpdateFailure) -> UpdateOutcome {
    tracing::warn!("Update rejected: {}", reason);
    UpdateOutcome::Failed(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_store() -> (RecordStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = RecordStore::in_dir(temp.path());
        (store, temp)
    }

    #[test]
    fn test_header_written_exactly() {
        let (store, _temp) = test_store();
        store
            .create_record("Juan", "Perez", "Calle 1", 3000000000, 12345)
            .unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "Nombre,Apellido,Direccion,Telefono,Ficha\nJuan,Perez,Calle 1,3000000000,12345\n"
        );
    }

    #[test]
    fn test_quoted_fields_round_trip() {
        let (store, _temp) = test_store();
        store
            .create_record("Ana", "Gomez", "Calle 5, \"Apto\" 2", 300, 1)
            .unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"Calle 5, \"\"Apto\"\" 2\""));

        let records = store.list_records().unwrap();
        assert_eq!(records[0].address, "Calle 5, \"Apto\" 2");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, _temp) = test_store();
        store.create_record("Juan", "Perez", "Calle 1", 1, 2).unwrap();
        assert!(!atomic::temp_path(store.path()).exists());
    }

    #[test]
    fn test_corrupt_numeric_cell() {
        let (store, _temp) = test_store();
        fs::write(
            store.path(),
            "Nombre,Apellido,Direccion,Telefono,Ficha\nJuan,Perez,Calle 1,abc,12345\n",
        )
        .unwrap();

        let err = store.list_records().unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }), "{err}");
    }

    #[test]
    fn test_wrong_header() {
        let (store, _temp) = test_store();
        fs::write(store.path(), "Name,Surname,Address,Phone,Group\n").unwrap();

        let err = store.list_records().unwrap_err();
        assert!(matches!(err, Error::CorruptStore { line: 1, .. }));
    }

    #[test]
    fn test_append_raw_rejects_before_write() {
        let (store, _temp) = test_store();
        let err = store
            .append_raw("Juan", "Perez", "Calle 1", "300-abc", "12345")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!store.exists());

        store
            .append_raw("Juan", "Perez", "Calle 1", "3000000000", "12345")
            .unwrap();
        assert_eq!(store.list_records().unwrap()[0].phone, 3000000000);
    }

    #[test]
    fn test_failed_replace_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = RecordStore::new(temp.path().join("aprendices.csv"));
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep.txt"), "x").unwrap();

        let records = vec![Record::new("Juan", "Perez", "Calle 1", 1, 2)];
        let err = store.rewrite(&records).unwrap_err();

        assert!(matches!(err, Error::Storage(_)), "{err}");
        assert!(!atomic::temp_path(store.path()).exists());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store = RecordStore::new(temp.path().join("data").join("roster.csv"));
        store.create_record("Juan", "Perez", "Calle 1", 1, 2).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }
}
