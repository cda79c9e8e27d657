//! Non-interactive CLI mode
//!
//! 저장소 연산마다 함수 하나. 대화형 메뉴도 같은 함수를 쓴다.

use crate::console::Console;
use roster_foundation::{
    Error, Record, RecordPatch, RecordStore, RosterConfig, UpdateFailure, UpdateOutcome,
};
use std::io::Write;

/// 견습생 추가. 전화/Ficha는 입력 텍스트 그대로 받는다.
pub fn add<W: Write>(
    store: &RecordStore,
    console: &mut Console<W>,
    name: &str,
    surname: &str,
    address: &str,
    phone: &str,
    ficha: &str,
) -> anyhow::Result<bool> {
    match store.append_raw(name, surname, address, phone, ficha) {
        Ok(()) => {
            console.success(&format!("Apprentice {} {} added.", name, surname))?;
            Ok(true)
        }
        Err(Error::InvalidInput(_)) => {
            console.error("Phone and ficha must be integers.")?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// 전체 레코드를 인덱스와 함께 출력
pub fn list<W: Write>(store: &RecordStore, console: &mut Console<W>) -> anyhow::Result<Vec<Record>> {
    let records = store.list_records()?;
    console.heading("APPRENTICE DIRECTORY")?;
    console.records_table(&records)?;
    Ok(records)
}

/// 인덱스 위치의 셀 하나 갱신. 실패 사유는 패널로 보여 준다.
pub fn update_by_index<W: Write>(
    store: &RecordStore,
    console: &mut Console<W>,
    index: i64,
    column: &str,
    value: &str,
) -> anyhow::Result<bool> {
    let outcome = store.update_by_index(index, column, value)?;
    report(
        console,
        &outcome,
        &format!("Apprentice at index {} updated.", index),
    )
}

/// 이름이 같은 모든 견습생에 patch 적용
pub fn update_by_name<W: Write>(
    store: &RecordStore,
    console: &mut Console<W>,
    name: &str,
    surname: &str,
    patch: RecordPatch,
) -> anyhow::Result<bool> {
    let outcome = store.update_by_name(name, surname, patch)?;
    let message = match &outcome {
        UpdateOutcome::Updated { count } if *count > 1 => {
            format!("{} apprentices named {} {} updated.", count, name, surname)
        }
        _ => format!("Apprentice {} {} updated.", name, surname),
    };
    report(console, &outcome, &message)
}

/// 적용된 설정을 JSON으로 출력
pub fn show_config<W: Write>(console: &mut Console<W>, config: &RosterConfig) -> anyhow::Result<()> {
    console.line(&serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// 결과 패널 출력. 성공 여부는 종료 코드에 쓰인다.
fn report<W: Write>(
    console: &mut Console<W>,
    outcome: &UpdateOutcome,
    success: &str,
) -> anyhow::Result<bool> {
    match outcome {
        UpdateOutcome::Updated { .. } => console.success(success)?,
        UpdateOutcome::Failed(UpdateFailure::EmptyStore) => {
            console.warning("No records to update.")?
        }
        UpdateOutcome::Failed(reason) => console.error(&format!("Update failed: {}.", reason))?,
    }
    Ok(outcome.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (RecordStore, Console<Vec<u8>>, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = RecordStore::in_dir(temp.path());
        (store, Console::new(Vec::new(), false), temp)
    }

    fn output(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (store, mut console, _temp) = setup();

        assert!(add(&store, &mut console, "Juan", "Perez", "Calle 1", "3000000000", "12345").unwrap());
        let records = list(&store, &mut console).unwrap();

        assert_eq!(records.len(), 1);
        let out = output(console);
        assert!(out.contains("Apprentice Juan Perez added."));
        assert!(out.contains("3000000000"));
    }

    #[test]
    fn test_add_rejects_non_integer() {
        let (store, mut console, _temp) = setup();

        assert!(!add(&store, &mut console, "Juan", "Perez", "Calle 1", "tel", "12345").unwrap());
        assert!(!store.exists());
        assert!(output(console).contains("Phone and ficha must be integers."));
    }

    #[test]
    fn test_update_reports_failure_reason() {
        let (store, mut console, _temp) = setup();
        store.create_record("Juan", "Perez", "Calle 1", 1, 2).unwrap();

        assert!(!update_by_index(&store, &mut console, 7, "Ficha", "3").unwrap());
        assert!(!update_by_index(&store, &mut console, 0, "Email", "x").unwrap());
        assert!(update_by_index(&store, &mut console, 0, "Ficha", "3").unwrap());

        let out = output(console);
        assert!(out.contains("index 7 not found"));
        assert!(out.contains("column 'Email' is not valid"));
        assert!(out.contains("Apprentice at index 0 updated."));
    }

    #[test]
    fn test_update_on_empty_store_warns() {
        let (store, mut console, _temp) = setup();

        let patch = RecordPatch::new().phone("3111111111");
        assert!(!update_by_name(&store, &mut console, "Pedro", "Torres", patch).unwrap());
        assert!(output(console).contains("No records to update."));
    }

    #[test]
    fn test_update_by_name_counts_matches() {
        let (store, mut console, _temp) = setup();
        store.create_record("Luis", "Diaz", "Calle 1", 1, 2).unwrap();
        store.create_record("Luis", "Diaz", "Calle 2", 3, 4).unwrap();

        let patch = RecordPatch::new().group("9");
        assert!(update_by_name(&store, &mut console, "Luis", "Diaz", patch).unwrap());
        assert!(output(console).contains("2 apprentices named Luis Diaz updated."));
    }

    #[test]
    fn test_show_config() {
        let (_store, mut console, _temp) = setup();
        show_config(&mut console, &RosterConfig::new()).unwrap();
        assert!(output(console).contains("\"dataFile\": \"aprendices.csv\""));
    }
}
