use std::io::Write;

use crate::error::{CorruptRecord, InputError, StoreError};

pub const SEPARATOR: &str = "____________________________________________________________";
pub const FILE_ERROR: &str = "☹ OOPS!!! Failed to open file! Is the path correct?";
pub const UNKNOWN_TASK: &str = "An error occurred when trying to re-create a task from the saved file!";

/// Where user-facing output goes. Framing and styling are the implementor's business.
pub trait Notifier {
    /// A message that the front-end should frame as one reply.
    fn show(&mut self, text: &str);

    /// Text shown as-is, e.g. the reminders banner.
    fn show_raw(&mut self, text: &str);

    fn report(&mut self, err: &InputError) {
        self.show(&err.to_string());
    }

    fn report_file_error(&mut self, _err: &StoreError) {
        self.show(FILE_ERROR);
    }

    fn report_unknown_task(&mut self, _record: &CorruptRecord) {
        self.show(UNKNOWN_TASK);
    }
}

/// Writes replies between separator lines.
pub struct ConsoleNotifier<W: Write> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write to console");
        }
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn show(&mut self, text: &str) {
        let body: String = text.lines().map(|l| format!(" {}\n", l)).collect();
        self.emit(&format!("{SEPARATOR}\n{body}{SEPARATOR}\n"));
    }

    fn show_raw(&mut self, text: &str) {
        self.emit(&format!("{}\n", text));
    }
}

/// Keeps everything it is told. Used by the TUI transcript and by tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub messages: Vec<String>,
    pub errors: Vec<InputError>,
    pub file_errors: usize,
    pub unknown_tasks: Vec<CorruptRecord>,
}

impl MemoryNotifier {
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl Notifier for MemoryNotifier {
    fn show(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn show_raw(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn report(&mut self, err: &InputError) {
        self.errors.push(err.clone());
        self.show(&err.to_string());
    }

    fn report_file_error(&mut self, _err: &StoreError) {
        self.file_errors += 1;
        self.show(FILE_ERROR);
    }

    fn report_unknown_task(&mut self, record: &CorruptRecord) {
        self.unknown_tasks.push(record.clone());
        self.show(UNKNOWN_TASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_frames_each_line() {
        let mut buf = Vec::new();
        {
            let mut n = ConsoleNotifier::new(&mut buf);
            n.show("Got it.\n  [T][✗] x");
            n.show_raw("raw");
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, format!("{SEPARATOR}\n Got it.\n   [T][✗] x\n{SEPARATOR}\nraw\n"));
    }

    #[test]
    fn memory_records_errors() {
        let mut n = MemoryNotifier::default();
        n.report(&InputError::MissingIndex);
        assert_eq!(n.errors, vec![InputError::MissingIndex]);
        assert_eq!(n.last(), Some(InputError::MissingIndex.to_string().as_str()));
    }
}
