use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// `log` backend writing to stderr and, optionally, a file
pub struct Logger {
    severity: Level,
    file: Option<Mutex<File>>,
    enable_colors: bool,
}

impl Logger {
    pub fn new(severity: Level, file_path: Option<PathBuf>, enable_colors: bool) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new().create(true).append(true).open(path).ok().map(Mutex::new)
        });

        Logger { severity, file, enable_colors }
    }

    /// Install the logger, configured from the environment:
    /// `WIKID_LOG` (or `RUST_LOG`) for the level, `WIKID_LOG_FILE` for a log
    /// file, `NO_COLOR` to disable colours.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("WIKID_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .as_deref()
            .map(parse_level)
            .unwrap_or(Level::Info);

        let file_path = std::env::var_os("WIKID_LOG_FILE").map(PathBuf::from);
        let enable_colors = std::env::var_os("NO_COLOR").is_none();

        let logger = Logger::new(severity, file_path, enable_colors);
        log::set_max_level(severity.to_level_filter());
        log::set_logger(Box::leak(Box::new(logger)))
    }

    fn timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }

    fn color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }
}

/// Unknown level names fall back to `info`.
fn parse_level(value: &str) -> Level {
    value.trim().parse::<LevelFilter>().ok().and_then(|f| f.to_level()).unwrap_or(Level::Info)
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::timestamp();
        let level = record.level();
        let args = record.args();

        let line = if self.enable_colors {
            format!("{}[{timestamp}] {level}\x1b[0m {args}\n", Self::color(level))
        } else {
            format!("[{timestamp}] {level} {args}\n")
        };
        let _ = std::io::stderr().write_all(line.as_bytes());

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "[{timestamp}] {level} {args}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
