//! Decoupled logging pipeline for the launcher.
//!
//! # Architecture
//!
//! ```text
//! log::info!/warn!/error!
//!     |
//! [LogCollector] (non-blocking, crossbeam unbounded)
//!     |
//! [DiskPersister thread]
//!     |                         |
//! logs/launcher_<ts>.log    logs/errors_<ts>.log
//! (every line)              (target "observability" only)
//! ```
//!
//! Warnings and errors are mirrored to stderr. `wait_for_empty()` pushes a
//! flush marker through the same channel, so every line sent before it has
//! reached disk once it returns.

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{Level, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log target used by [`crate::observability::report_error`]
pub const REPORT_TARGET: &str = "observability";

enum LogMessage {
    Line(LogLine),
    /// Flush marker; the sender is signalled once everything before it is on disk
    Flush(std::sync::mpsc::Sender<()>),
}

/// Logs directory relative to the current working directory: ./logs
pub fn get_global_logs_path() -> Result<PathBuf, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to get current working directory: {}", e))?;
    Ok(cwd.join("logs"))
}

pub fn ensure_logs_dir_exists(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create logs directory: {}", e))
}

/// A log line with metadata
#[derive(Clone, Debug)]
pub struct LogLine {
    pub message: String,
    pub level: Level,
    /// Came from the error reporter and also belongs in the errors file
    pub is_report: bool,
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: Level, message: String) -> Self {
        LogLine {
            message,
            level,
            is_report: false,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    pub fn report(message: String) -> Self {
        LogLine {
            is_report: true,
            ..LogLine::new(Level::Error, message)
        }
    }

    fn formatted(&self) -> String {
        format!("[{}] [{}] {}\n", self.timestamp, self.level, self.message)
    }
}

/// Process-wide logger that persists every line to disk
pub struct LogCollector {
    tx: Sender<LogMessage>,
    session_log: PathBuf,
    error_log: PathBuf,
}

impl LogCollector {
    /// Create the collector and its background disk thread
    pub fn new(log_dir: PathBuf) -> Result<Self, String> {
        ensure_logs_dir_exists(&log_dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let session_log = log_dir.join(format!("launcher_{}.log", stamp));
        let error_log = log_dir.join(format!("errors_{}.log", stamp));

        // Create the session file up front so it exists before the first line
        File::create(&session_log).map_err(|e| format!("Failed to create log file: {}", e))?;

        let (tx, rx) = unbounded::<LogMessage>();
        let session_path = session_log.clone();
        let error_path = error_log.clone();

        // OS thread rather than a tokio task: works from any runtime or none
        std::thread::spawn(move || {
            let mut session_file = open_append(&session_path);
            let mut error_file: Option<File> = None;

            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        let formatted = line.formatted();

                        if let Some(file) = session_file.as_mut() {
                            let _ = file.write_all(formatted.as_bytes());
                        }

                        if line.is_report {
                            if error_file.is_none() {
                                error_file = open_append(&error_path);
                            }
                            if let Some(file) = error_file.as_mut() {
                                let _ = file.write_all(formatted.as_bytes());
                            }
                        }

                        if line.level <= Level::Warn {
                            eprint!("{}", formatted);
                        }
                    }
                    LogMessage::Flush(done) => {
                        if let Some(file) = session_file.as_mut() {
                            let _ = file.flush();
                        }
                        if let Some(file) = error_file.as_mut() {
                            let _ = file.flush();
                        }
                        let _ = done.send(());
                    }
                }
            }
        });

        Ok(LogCollector {
            tx,
            session_log,
            error_log,
        })
    }

    pub fn session_log_path(&self) -> &Path {
        &self.session_log
    }

    /// Path of the reported-errors file (created on the first report)
    pub fn error_log_path(&self) -> &Path {
        &self.error_log
    }

    /// Send a line (never blocks)
    pub fn log_line(&self, line: LogLine) {
        let _ = self.tx.send(LogMessage::Line(line));
    }

    pub fn log_str(&self, message: impl Into<String>) {
        self.log_line(LogLine::new(Level::Info, message.into()));
    }

    /// Wait until every line sent before this call is written to disk
    pub async fn wait_for_empty(&self) -> Result<(), String> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        self.tx
            .send(LogMessage::Flush(tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;

        tokio::task::spawn_blocking(move || rx.recv())
            .await
            .map_err(|e| format!("Flush wait task failed: {}", e))?
            .map_err(|e| format!("Flush signal interrupted: {}", e))
    }
}

impl Clone for LogCollector {
    fn clone(&self) -> Self {
        LogCollector {
            tx: self.tx.clone(),
            session_log: self.session_log.clone(),
            error_log: self.error_log.clone(),
        }
    }
}

fn open_append(path: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Wires all log::* macro calls into the collector
impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        if record.target() == REPORT_TARGET {
            self.log_line(LogLine::report(message));
        } else {
            self.log_line(LogLine::new(record.level(), message));
        }
    }

    fn flush(&self) {}
}
