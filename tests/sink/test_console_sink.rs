use crate::common::isolated_builder;
use parking_lot::Mutex;
use rask_log_dispatch::sink::ConsoleSink;
use rask_log_dispatch::{Color, Logger, SinkHandle, messages, record};
use std::io::{self, Write};
use std::sync::Arc;

/// Clonable in-memory writer so the output can be read after the sink is
/// handed to a logger.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_logger(buffer: &SharedBuffer) -> rask_log_dispatch::MultiLogger {
    isolated_builder()
        .separator(" ")
        .sink(SinkHandle::new(
            "console",
            ConsoleSink::new(buffer.clone()).with_colors(false),
        ))
        .build()
        .unwrap()
}

#[test]
fn test_lines_carry_level_tag_and_time() {
    let buffer = SharedBuffer::default();
    let logger = console_logger(&buffer);

    logger.info(messages!["epoch", 1, "done"]).unwrap();
    logger.bare(["plain"]).unwrap();

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[INFO] ["));
    assert!(lines[0].ends_with("] epoch 1 done"));
    assert!(lines[1].starts_with('['));
    assert!(!lines[1].contains("INFO"));
    assert!(lines[1].ends_with("plain"));
}

#[test]
fn test_custom_level_name_in_tag() {
    let buffer = SharedBuffer::default();
    let logger = console_logger(&buffer);
    logger
        .registry()
        .register("success", Color::Green, Some(2))
        .unwrap();

    logger.log(["all green"], "SUCCESS").unwrap();
    assert!(buffer.contents().starts_with("[SUCCESS] ["));
}

#[test]
fn test_record_prints_one_field_per_line() {
    let buffer = SharedBuffer::default();
    let logger = console_logger(&buffer);

    logger
        .warn([record! { "Validation" => rask_log_dispatch::Value::Null, "accuracy" => 0.9 }])
        .unwrap();

    let output = buffer.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[WARN] "));
    assert!(lines[0].ends_with(" Validation"));
    assert!(lines[1].starts_with("       "));
    assert!(lines[1].ends_with(" accuracy: 0.90000"));
}
