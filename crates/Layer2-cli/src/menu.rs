//! Interactive menu
//!
//! 줄 단위 프롬프트 루프. 입력이 끝나면(EOF) 종료한다.

use crate::cli;
use crate::console::{Console, Tone};
use roster_foundation::{Column, RecordPatch, RecordStore};
use std::io::{BufRead, Write};

/// 메뉴 동작 후 루프 계속 여부
enum Flow {
    Continue,
    Exit,
}

/// 메인 메뉴 루프
pub struct Menu<'a, R, W: Write> {
    store: &'a RecordStore,
    input: R,
    console: Console<W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a RecordStore, input: R, console: Console<W>) -> Self {
        Self {
            store,
            input,
            console,
        }
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<W> {
        self.console
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        tracing::debug!("Menu started on {}", self.store.path().display());

        loop {
            self.print_menu()?;
            let Some(choice) = self.ask("Select an option")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.create()?,
                "2" => {
                    cli::list(self.store, &mut self.console)?;
                    Flow::Continue
                }
                "3" => self.update_by_index()?,
                "4" => self.update_by_name()?,
                "5" => {
                    self.console.panel(Tone::Info, "Goodbye!")?;
                    Flow::Exit
                }
                _ => {
                    self.console.error("Invalid option. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> anyhow::Result<()> {
        self.console.panel(Tone::Info, "MAIN MENU")?;
        self.console.menu_item("1", "Create apprentice")?;
        self.console.menu_item("2", "List apprentices")?;
        self.console.menu_item("3", "Update apprentice by index")?;
        self.console.menu_item("4", "Update apprentice by name")?;
        self.console.menu_item("5", "Exit")?;
        Ok(())
    }

    /// 프롬프트 후 한 줄 읽기 (trim). 입력이 끝나면 `None`.
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        self.console.prompt(label)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // ========================================================================
    // 메뉴 동작
    // ========================================================================

    /// 1. 견습생 추가 (전화/Ficha가 정수가 아니면 저장하지 않음)
    fn create(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.ask("Name")? else {
            return Ok(Flow::Exit);
        };
        let Some(surname) = self.ask("Surname")? else {
            return Ok(Flow::Exit);
        };
        let Some(address) = self.ask("Address")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.ask("Phone (digits only)")? else {
            return Ok(Flow::Exit);
        };
        let Some(ficha) = self.ask("Ficha (digits only)")? else {
            return Ok(Flow::Exit);
        };

        cli::add(
            self.store,
            &mut self.console,
            &name,
            &surname,
            &address,
            &phone,
            &ficha,
        )?;
        Ok(Flow::Continue)
    }

    /// 3. 목록을 먼저 보여 주고, 비어 있으면 메뉴로 돌아간다
    fn update_by_index(&mut self) -> anyhow::Result<Flow> {
        let records = cli::list(self.store, &mut self.console)?;
        if records.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(index) = self.ask("Index of the apprentice to update")? else {
            return Ok(Flow::Exit);
        };
        let Ok(index) = index.parse::<i64>() else {
            self.console.error("Invalid input: index must be an integer.")?;
            return Ok(Flow::Continue);
        };

        let columns = format!("Column to update ({})", Column::headers().join("/"));
        let Some(column) = self.ask(&columns)? else {
            return Ok(Flow::Exit);
        };
        let Some(value) = self.ask(&format!("New value for '{}'", column))? else {
            return Ok(Flow::Exit);
        };

        cli::update_by_index(self.store, &mut self.console, index, &column, &value)?;
        Ok(Flow::Continue)
    }

    /// 4. 빈 입력은 "변경 없음"
    fn update_by_name(&mut self) -> anyhow::Result<Flow> {
        let Some(name) = self.ask("Name")? else {
            return Ok(Flow::Exit);
        };
        let Some(surname) = self.ask("Surname")? else {
            return Ok(Flow::Exit);
        };

        let mut patch = RecordPatch::new();
        let Some(address) = self.ask("New address (blank to keep)")? else {
            return Ok(Flow::Exit);
        };
        if !address.is_empty() {
            patch = patch.address(address);
        }
        let Some(phone) = self.ask("New phone (blank to keep)")? else {
            return Ok(Flow::Exit);
        };
        if !phone.is_empty() {
            patch = patch.phone(phone);
        }
        let Some(ficha) = self.ask("New ficha (blank to keep)")? else {
            return Ok(Flow::Exit);
        };
        if !ficha.is_empty() {
            patch = patch.group(ficha);
        }

        cli::update_by_name(self.store, &mut self.console, &name, &surname, patch)?;
        Ok(Flow::Continue)
    }
}
