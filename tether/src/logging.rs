//! Debug log file next to the executable, behind the `log` facade.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Path of the debug log: `tether_debug.log` beside the executable.
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_default()
        .parent()
        .unwrap_or(std::path::Path::new("."))
        .join("tether_debug.log")
}

/// Appends every enabled record to the debug log and mirrors warnings and
/// errors to stderr.
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl FileLogger {
    /// Open (or create) the log file for appending. A file that cannot be
    /// opened leaves only the stderr mirror.
    pub fn new(level: LevelFilter) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path())
            .ok();
        Self {
            level,
            file: Mutex::new(file),
        }
    }

    /// Install as the global logger, starting at `level`.
    ///
    /// The level can be changed later with `log::set_max_level`, e.g. once
    /// the config file has been read. It never rises above the level given
    /// to [`new`](Self::new).
    pub fn init(self, level: LevelFilter) -> Result<(), log::SetLoggerError> {
        let level = level.min(self.level);
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// One log line, without the trailing newline.
pub fn format_record(record: &Record<'_>) -> String {
    format!("[{:<5} {}] {}", record.level(), record.target(), record.args())
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        if record.level() <= Level::Warn {
            eprintln!("{line}");
        }
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Record};

    use super::{FileLogger, format_record, log_path};

    #[test]
    fn log_file_sits_beside_the_executable() {
        assert_eq!(
            log_path().file_name().and_then(|n| n.to_str()),
            Some("tether_debug.log")
        );
    }

    #[test]
    fn record_format_has_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Info)
                .target("tether_core::atlas")
                .args(format_args!("atlas {}x{}", 64, 32))
                .build(),
        );
        assert_eq!(line, "[INFO  tether_core::atlas] atlas 64x32");
    }

    #[test]
    fn level_filter_gates_records() {
        let logger = FileLogger {
            level: LevelFilter::Warn,
            file: parking_lot::Mutex::new(None),
        };
        let debug = Record::builder().level(Level::Debug).build();
        let error = Record::builder().level(Level::Error).build();
        assert!(!logger.enabled(debug.metadata()));
        assert!(logger.enabled(error.metadata()));
    }
}
