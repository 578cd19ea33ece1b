use super::{Sink, SinkError};
use crate::domain::{Color, EntryBody, LogEntry, Record};
use chrono::Local;
use colored::Colorize;
use parking_lot::Mutex;
use serde_json::Value;
use std::io::{self, Write};

/// Human-readable output: `[LEVEL] [HH:MM:SS] message`.
///
/// Records print one field per line. The first line carries the level tag
/// and time; following lines are indented to the same column. Float values
/// print with five decimals and `null` values print the key alone, which
/// makes them usable as headers.
pub struct ConsoleSink<W: Write + Send = io::Stdout> {
    writer: Mutex<W>,
    colored: bool,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl ConsoleSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            colored: true,
        }
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Render an entry exactly as `accept` writes it.
    pub fn render(&self, entry: &LogEntry) -> String {
        let time = format!(
            "[{}]",
            entry.timestamp.with_timezone(&Local).format("%H:%M:%S")
        );

        let (tag, tag_width) = match &entry.level {
            Some(level) => {
                let tag = format!("[{}] ", level.name());
                let width = tag.chars().count();
                (self.paint(&tag, level.color()), width)
            }
            None => (String::new(), 0),
        };

        match &entry.body {
            EntryBody::Text(text) => format!("{tag}{time} {text}\n"),
            EntryBody::Record(record) => render_record(record, &tag, tag_width, &time),
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        match ansi_color(color) {
            Some(ansi) if self.colored => text.color(ansi).to_string(),
            _ => text.to_string(),
        }
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn accept(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let rendered = self.render(entry);
        self.writer.lock().write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

fn render_record(record: &Record, tag: &str, tag_width: usize, time: &str) -> String {
    let blank_tag = " ".repeat(tag_width);
    let blank_time = " ".repeat(time.chars().count());
    let mut out = String::new();

    for (index, (key, value)) in record.iter().enumerate() {
        let (tag, time) = if index == 0 {
            (tag, time)
        } else {
            (blank_tag.as_str(), blank_time.as_str())
        };

        match value {
            Value::Null => out.push_str(&format!("{tag}{time} {key}\n")),
            Value::Number(number) if number.is_f64() => {
                let float = number.as_f64().unwrap_or_default();
                out.push_str(&format!("{tag}{time} {key}: {float:.5}\n"));
            }
            Value::String(text) => out.push_str(&format!("{tag}{time} {key}: {text}\n")),
            other => out.push_str(&format!("{tag}{time} {key}: {other}\n")),
        }
    }

    out
}

fn ansi_color(color: Color) -> Option<colored::Color> {
    match color {
        Color::Default => None,
        Color::Black => Some(colored::Color::Black),
        Color::Red => Some(colored::Color::Red),
        Color::Green => Some(colored::Color::Green),
        Color::Yellow => Some(colored::Color::Yellow),
        Color::Blue => Some(colored::Color::Blue),
        Color::Magenta => Some(colored::Color::Magenta),
        Color::Cyan => Some(colored::Color::Cyan),
        Color::White => Some(colored::Color::White),
        Color::Grey => Some(colored::Color::BrightBlack),
    }
}
