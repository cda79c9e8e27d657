//! Core Types - 공용 타입 정의
//!
//! 저장소와 CLI가 공통으로 사용하는 레코드 모델

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Column - 고정 컬럼
// ============================================================================

/// 저장 파일의 다섯 컬럼 (순서 고정)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Surname,
    Address,
    Phone,
    Group,
}

impl Column {
    /// 디스크 상의 컬럼 순서
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Surname,
        Column::Address,
        Column::Phone,
        Column::Group,
    ];

    /// CSV 헤더에 기록되는 이름
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Nombre",
            Column::Surname => "Apellido",
            Column::Address => "Direccion",
            Column::Phone => "Telefono",
            Column::Group => "Ficha",
        }
    }

    /// 정수 컬럼 여부 (Telefono, Ficha)
    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Phone | Column::Group)
    }

    pub fn headers() -> [&'static str; 5] {
        Self::ALL.map(Column::header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = UpdateFailure;

    /// 헤더 이름과 정확히 일치해야 한다 (대소문자 구분)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.header() == s)
            .ok_or_else(|| UpdateFailure::UnknownColumn(s.to_string()))
    }
}

// ============================================================================
// FieldValue - 태그된 셀 값
// ============================================================================

/// 업데이트용 셀 값
///
/// 대상 컬럼의 타입에 맞춰 호출 시점에 [`FieldValue::coerce_for`]로 해석된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    /// 컬럼 타입에 맞게 변환
    ///
    /// 정수 컬럼에 들어온 텍스트는 10진 정수로 파싱되어야 한다.
    /// 텍스트 컬럼에 들어온 정수는 10진 문자열로 바뀐다.
    pub fn coerce_for(self, column: Column) -> Result<FieldValue, UpdateFailure> {
        match (column.is_numeric(), self) {
            (true, FieldValue::Integer(n)) => Ok(FieldValue::Integer(n)),
            (true, FieldValue::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| UpdateFailure::InvalidInteger { column, value: s }),
            (false, FieldValue::Text(s)) => Ok(FieldValue::Text(s)),
            (false, FieldValue::Integer(n)) => Ok(FieldValue::Text(n.to_string())),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

// ============================================================================
// Record - 견습생 레코드
// ============================================================================

/// 견습생 한 명의 다섯 필드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Nombre")]
    pub name: String,

    #[serde(rename = "Apellido")]
    pub surname: String,

    #[serde(rename = "Direccion")]
    pub address: String,

    #[serde(rename = "Telefono")]
    pub phone: i64,

    /// Ficha (수강 그룹 ID)
    #[serde(rename = "Ficha")]
    pub group: i64,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        address: impl Into<String>,
        phone: i64,
        group: i64,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            address: address.into(),
            phone,
            group,
        }
    }

    pub fn get(&self, column: Column) -> FieldValue {
        match column {
            Column::Name => FieldValue::Text(self.name.clone()),
            Column::Surname => FieldValue::Text(self.surname.clone()),
            Column::Address => FieldValue::Text(self.address.clone()),
            Column::Phone => FieldValue::Integer(self.phone),
            Column::Group => FieldValue::Integer(self.group),
        }
    }

    /// 셀 하나를 덮어쓴다. 변환 실패 시 레코드는 바뀌지 않는다.
    pub fn set(&mut self, column: Column, value: FieldValue) -> Result<(), UpdateFailure> {
        let value = value.coerce_for(column)?;
        match column {
            Column::Name => self.name = value.to_string(),
            Column::Surname => self.surname = value.to_string(),
            Column::Address => self.address = value.to_string(),
            Column::Phone | Column::Group => {
                let n = value
                    .as_integer()
                    .ok_or_else(|| UpdateFailure::InvalidInteger {
                        column,
                        value: value.to_string(),
                    })?;
                if column == Column::Phone {
                    self.phone = n;
                } else {
                    self.group = n;
                }
            }
        }
        Ok(())
    }

    /// (Nombre, Apellido) 정확 일치
    pub fn matches(&self, name: &str, surname: &str) -> bool {
        self.name == name && self.surname == surname
    }

    /// 표시용 필드 문자열 (컬럼 순서)
    pub fn cells(&self) -> [String; 5] {
        Column::ALL.map(|column| self.get(column).to_string())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

// ============================================================================
// RecordPatch - 부분 업데이트
// ============================================================================

/// 이름 기반 업데이트에 쓰이는 부분 변경
///
/// `None`은 "변경 없음"을 뜻한다. 빈 문자열은 유효한 값이다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub address: Option<String>,
    pub phone: Option<FieldValue>,
    pub group: Option<FieldValue>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<FieldValue>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn group(mut self, group: impl Into<FieldValue>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.phone.is_none() && self.group.is_none()
    }

    /// 모든 값을 컬럼 타입으로 변환해 (컬럼, 값) 목록으로 만든다
    pub fn resolve(self) -> Result<Vec<(Column, FieldValue)>, UpdateFailure> {
        let mut assignments = Vec::with_capacity(3);
        if let Some(address) = self.address {
            assignments.push((Column::Address, FieldValue::Text(address)));
        }
        if let Some(phone) = self.phone {
            assignments.push((Column::Phone, phone.coerce_for(Column::Phone)?));
        }
        if let Some(group) = self.group {
            assignments.push((Column::Group, group.coerce_for(Column::Group)?));
        }
        Ok(assignments)
    }
}

// ============================================================================
// Update Outcome
// ============================================================================

/// 업데이트가 거부된 이유. 어떤 경우에도 쓰기는 일어나지 않는다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateFailure {
    #[error("no records to update")]
    EmptyStore,

    #[error("index {index} not found ({len} records)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("column '{0}' is not valid")]
    UnknownColumn(String),

    #[error("value '{value}' for '{column}' must be an integer")]
    InvalidInteger { column: Column, value: String },

    #[error("apprentice {name} {surname} not found")]
    NotFound { name: String, surname: String },
}

/// 업데이트 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 변경된 행 수와 함께 성공
    Updated { count: usize },
    Failed(UpdateFailure),
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }

    pub fn failure(&self) -> Option<&UpdateFailure> {
        match self {
            UpdateOutcome::Failed(reason) => Some(reason),
            UpdateOutcome::Updated { .. } => None,
        }
    }
}

impl From<UpdateFailure> for UpdateOutcome {
    fn from(reason: UpdateFailure) -> Self {
        UpdateOutcome::Failed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juan() -> Record {
        Record::new("Juan", "Perez", "Calle 1", 3000000000, 12345)
    }

    #[test]
    fn test_column_from_header() {
        assert_eq!("Ficha".parse::<Column>(), Ok(Column::Group));
        assert_eq!("Telefono".parse::<Column>(), Ok(Column::Phone));
        assert_eq!(
            "ficha".parse::<Column>(),
            Err(UpdateFailure::UnknownColumn("ficha".to_string()))
        );
        assert_eq!(
            Column::headers(),
            ["Nombre", "Apellido", "Direccion", "Telefono", "Ficha"]
        );
    }

    #[test]
    fn test_coerce_text_to_integer() {
        let value = FieldValue::from("99999").coerce_for(Column::Group).unwrap();
        assert_eq!(value, FieldValue::Integer(99999));

        let err = FieldValue::from("not-a-number")
            .coerce_for(Column::Phone)
            .unwrap_err();
        assert_eq!(
            err,
            UpdateFailure::InvalidInteger {
                column: Column::Phone,
                value: "not-a-number".to_string()
            }
        );
    }

    #[test]
    fn test_coerce_integer_to_text() {
        let value = FieldValue::from(42i64).coerce_for(Column::Address).unwrap();
        assert_eq!(value, FieldValue::Text("42".to_string()));
    }

    #[test]
    fn test_record_set() {
        let mut record = juan();
        record.set(Column::Group, "99999".into()).unwrap();
        assert_eq!(record.group, 99999);

        record.set(Column::Address, "Carrera 7".into()).unwrap();
        assert_eq!(record.address, "Carrera 7");

        let before = record.clone();
        assert!(record.set(Column::Phone, "abc".into()).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_record_matches_is_exact() {
        let record = juan();
        assert!(record.matches("Juan", "Perez"));
        assert!(!record.matches("juan", "Perez"));
        assert!(!record.matches("Juan ", "Perez"));
    }

    #[test]
    fn test_patch_resolve() {
        let assignments = RecordPatch::new()
            .phone("3222222222")
            .group(5i64)
            .resolve()
            .unwrap();
        assert_eq!(
            assignments,
            vec![
                (Column::Phone, FieldValue::Integer(3222222222)),
                (Column::Group, FieldValue::Integer(5)),
            ]
        );

        assert!(RecordPatch::new().is_empty());
        assert!(RecordPatch::new().group("x").resolve().is_err());
    }

    #[test]
    fn test_outcome() {
        assert!(UpdateOutcome::Updated { count: 2 }.is_success());
        let failed: UpdateOutcome = UpdateFailure::EmptyStore.into();
        assert!(!failed.is_success());
        assert_eq!(failed.failure(), Some(&UpdateFailure::EmptyStore));
    }
}
