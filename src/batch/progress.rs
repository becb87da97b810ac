//! Batch progress reporting.
//!
//! Reporters receive one event per sheet plus start/finish events. The
//! console reporter prints human-readable lines to stderr, the JSON reporter
//! prints one JSON object per line.

use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Events reported while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Batch started
    BatchStarted {
        /// Number of sheets to generate
        total_sheets: usize,
    },
    /// One sheet finished
    SheetCompleted {
        /// Sheet identifier, e.g. `player_orange_1`
        sheet_id: String,
        /// Error message if the sheet failed
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// Batch finished
    BatchCompleted {
        /// Number of sheets written
        succeeded: usize,
        /// Number of sheets that failed
        failed: usize,
        /// Total duration in milliseconds
        duration_ms: u64,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    current: AtomicUsize,
    total: AtomicUsize,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a new console progress reporter writing to stderr.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        let tag = self.paint("[sprites]", "\x1b[36m");
        match event {
            ProgressEvent::BatchStarted { total_sheets } => {
                self.total.store(total_sheets, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Drawing {} sheet{}...",
                    tag,
                    total_sheets,
                    if total_sheets == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::SheetCompleted { sheet_id, error, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                let total = self.total.load(Ordering::SeqCst);
                let status = match error {
                    None => self.paint("ok", "\x1b[32m"),
                    Some(_) => self.paint("FAILED", "\x1b[31m"),
                };
                self.writeln(&format!(
                    "{} [{}/{}] {} {} ({})",
                    tag,
                    current,
                    total,
                    status,
                    sheet_id,
                    format_duration(duration_ms)
                ));
                if let Some(err) = error {
                    self.writeln(&format!("        {}", self.paint(&err, "\x1b[31m")));
                }
            }
            ProgressEvent::BatchCompleted { succeeded, failed, duration_ms } => {
                if failed == 0 {
                    self.writeln(&format!(
                        "\n{} {} sheet{} written in {}",
                        self.paint("[done]", "\x1b[32m"),
                        succeeded,
                        if succeeded == 1 { "" } else { "s" },
                        format_duration(duration_ms)
                    ));
                } else {
                    self.writeln(&format!(
                        "\n{} {} written, {} failed in {}",
                        self.paint("[error]", "\x1b[31m"),
                        succeeded,
                        failed,
                        format_duration(duration_ms)
                    ));
                }
            }
        }
    }
}

/// JSON-lines progress reporter for machine-readable output.
pub struct JsonProgress {
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let Ok(json) = serde_json::to_string(&event) else {
            return;
        };
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", json);
        }
    }
}

/// Format a duration in human-readable form.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Shared buffer so tests can read what a reporter wrote.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1500), "1.50s");
    }

    #[test]
    fn test_console_progress_counts_sheets() {
        let buffer = SharedBuffer::default();
        let reporter = ConsoleProgress::with_output(buffer.clone());

        reporter.report(ProgressEvent::BatchStarted { total_sheets: 2 });
        reporter.report(ProgressEvent::SheetCompleted {
            sheet_id: "player_orange_1".to_string(),
            error: None,
            duration_ms: 3,
        });
        reporter.report(ProgressEvent::SheetCompleted {
            sheet_id: "player_orange_2".to_string(),
            error: Some("disk full".to_string()),
            duration_ms: 4,
        });
        reporter.report(ProgressEvent::BatchCompleted { succeeded: 1, failed: 1, duration_ms: 9 });

        let out = buffer.contents();
        assert!(out.contains("Drawing 2 sheets"));
        assert!(out.contains("[1/2] ok player_orange_1 (3ms)"));
        assert!(out.contains("[2/2] FAILED player_orange_2"));
        assert!(out.contains("disk full"));
        assert!(out.contains("1 written, 1 failed"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_json_progress_lines() {
        let buffer = SharedBuffer::default();
        let reporter = JsonProgress::with_output(buffer.clone());

        reporter.report(ProgressEvent::BatchStarted { total_sheets: 1 });
        reporter.report(ProgressEvent::SheetCompleted {
            sheet_id: "player_blue_1".to_string(),
            error: None,
            duration_ms: 2,
        });

        let out = buffer.contents();
        let lines: Vec<serde_json::Value> =
            out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "batch_started");
        assert_eq!(lines[0]["total_sheets"], 1);
        assert_eq!(lines[1]["event"], "sheet_completed");
        assert_eq!(lines[1]["sheet_id"], "player_blue_1");
        assert!(lines[1].get("error").is_none());
    }
}
