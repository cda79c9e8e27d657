//! Styled console output
//!
//! 패널과 레코드 표 출력. 색상이 켜져 있으면 crossterm으로 칠한다.

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use roster_foundation::{Column, Record};
use std::io::{self, Write};

/// 패널 종류 (색상 + 제목)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Info => Color::Blue,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Success => "✔ Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Info => "Roster",
        }
    }
}

/// 콘솔 출력기
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(
                self.out,
                SetForegroundColor(color),
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )
        } else {
            self.out.write_all(text.as_bytes())
        }
    }

    // ========================================================================
    // Panels
    // ========================================================================

    /// 박스 패널: 윗변에 제목, 안쪽에 메시지
    pub fn panel(&mut self, tone: Tone, message: &str) -> io::Result<()> {
        let title = tone.title();
        let title_len = title.chars().count();
        let message_len = message.chars().count();
        let width = (message_len + 2).max(title_len + 4);

        let top = format!("╭─ {} {}╮\n", title, "─".repeat(width - title_len - 3));
        let bottom = format!("╰{}╯\n", "─".repeat(width));

        self.styled(tone.color(), &top)?;
        self.styled(tone.color(), "│")?;
        write!(self.out, " {}{}", message, " ".repeat(width - 1 - message_len))?;
        self.styled(tone.color(), "│\n")?;
        self.styled(tone.color(), &bottom)?;
        self.out.flush()
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.panel(Tone::Success, message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.panel(Tone::Warning, message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.panel(Tone::Error, message)
    }

    // ========================================================================
    // 줄 출력 / 프롬프트
    // ========================================================================

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        self.styled(Color::Cyan, text)?;
        self.out.write_all(b"\n")
    }

    pub fn menu_item(&mut self, key: &str, label: &str) -> io::Result<()> {
        self.styled(Color::Cyan, &format!("{}.", key))?;
        writeln!(self.out, " {}", label)
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn prompt(&mut self, label: &str) -> io::Result<()> {
        self.styled(Color::Magenta, label)?;
        self.out.write_all(b": ")?;
        self.out.flush()
    }

    // ========================================================================
    // 레코드 표
    // ========================================================================

    /// 인덱스 컬럼 + 레코드 컬럼 다섯 개
    pub fn records_table(&mut self, records: &[Record]) -> io::Result<()> {
        if records.is_empty() {
            return self.warning("No records yet.");
        }

        let mut headers = vec!["Index"];
        headers.extend(Column::headers());

        let rows: Vec<Vec<String>> = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut row = vec![i.to_string()];
                row.extend(record.cells());
                row
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_line = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect::<Vec<_>>()
            .join(" │ ");
        self.heading(&header_line)?;

        let rule = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.line(&rule)?;

        for row in &rows {
            self.styled(Color::Yellow, &pad(&row[0], widths[0]))?;
            let rest = row[1..]
                .iter()
                .zip(&widths[1..])
                .map(|(cell, w)| pad(cell, *w))
                .collect::<Vec<_>>()
                .join(" │ ");
            writeln!(self.out, " │ {}", rest)?;
        }

        self.out.flush()
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}
