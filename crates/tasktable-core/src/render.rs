use std::io::{self, IsTerminal, Write};

use chrono::NaiveDate;
use tasktable_shared::Task;
use tasktable_shared::expiry::is_deadline_expired;
use tasktable_shared::form::FormErrors;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

pub const EMPTY_MESSAGE: &str = "Нет задач для отображения";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn print_task_table(&self, tasks: &[&Task], today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_task_table(&mut out, tasks, today)
    }

    pub fn write_task_table<W: Write>(
        &self,
        mut out: W,
        tasks: &[&Task],
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        if tasks.is_empty() {
            writeln!(out, "{EMPTY_MESSAGE}")?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Описание".to_string(),
            "Статус".to_string(),
            "Дедлайн".to_string(),
        ];

        let rows = tasks
            .iter()
            .map(|task| {
                let deadline = if is_deadline_expired(&task.deadline, task.status, today) {
                    self.paint(&task.deadline, "1;31")
                } else {
                    task.deadline.clone()
                };
                vec![
                    self.paint(&task.id.to_string(), "33"),
                    task.title.clone(),
                    task.status.label().to_string(),
                    deadline,
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)
    }

    #[tracing::instrument(skip(self, task))]
    pub fn print_task_info(&self, task: &Task, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id        {}", task.id)?;
        writeln!(out, "title     {}", task.title)?;
        writeln!(out, "status    {}", task.status)?;
        if is_deadline_expired(&task.deadline, task.status, today) {
            writeln!(out, "deadline  {} (просрочено)", self.paint(&task.deadline, "1;31"))?;
        } else {
            writeln!(out, "deadline  {}", task.deadline)?;
        }

        Ok(())
    }

    pub fn print_form_errors(&self, errors: &FormErrors) -> anyhow::Result<()> {
        let mut err = io::stderr().lock();
        for (field, message) in errors.iter() {
            writeln!(err, "{}: {}", field.label(), message)?;
        }
        Ok(())
    }

    pub fn print_notice(&self, message: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        let padding = width.saturating_sub(UnicodeWidthStr::width(header.as_str()));
        write!(writer, "{}{} ", header, " ".repeat(padding))?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
