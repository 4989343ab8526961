//! Process-wide logger setup.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once, writing rotated files under a
//!   configured directory or plain lines to stderr.
//! - Route panics through the logger before the previous hook runs.
//!
//! # Invariants
//! - Repeating `init_logging` with the same settings is a no-op; different
//!   settings are an error, never a silent switch.
//! - Setup reports failures as `Err` and does not panic.
//! - Log lines carry ids and counts only, never names, CPFs or passwords.

use crate::config::LoggingConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Once;

const FILE_BASENAME: &str = "cartorio";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_MESSAGE_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotating `cartorio*.log` files in this directory.
    Directory(PathBuf),
}

impl LogTarget {
    fn from_config(log_dir: Option<&Path>) -> Result<Self, String> {
        let Some(dir) = log_dir else {
            return Ok(Self::Stderr);
        };
        if dir.as_os_str().is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        if !dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                dir.display()
            ));
        }
        Ok(Self::Directory(dir.to_path_buf()))
    }
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

struct ActiveLogger {
    level: LevelFilter,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Starts logging as described by `config`.
///
/// # Errors
/// - The level is not one of trace, debug, info, warn or error.
/// - `log_dir` is relative or cannot be created.
/// - Logging already runs with another level or target.
/// - The backend fails to start.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let level = parse_level(&config.level)?;
    let target = LogTarget::from_config(config.log_dir.as_deref())?;

    let active = ACTIVE.get_or_try_init(|| start(level, target.clone()))?;

    if active.target != target {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{target}`",
            active.target
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already runs at `{}`; refusing to switch to `{level}`",
            active.level
        ));
    }
    Ok(())
}

/// Level and target of the running logger, `None` before `init_logging`.
pub fn active_logging() -> Option<(LevelFilter, LogTarget)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.target.clone()))
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    let name = if normalized == "warning" {
        "warn"
    } else {
        normalized.as_str()
    };

    name.parse::<LevelFilter>()
        .ok()
        .filter(|level| *level != LevelFilter::Off)
        .ok_or_else(|| {
            format!("unsupported log level `{raw}`; expected trace|debug|info|warn|error")
        })
}

fn start(level: LevelFilter, target: LogTarget) -> Result<ActiveLogger, String> {
    let logger = Logger::with(LogSpecification::builder().default(level).build());

    let logger = match &target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.clone())
                        .basename(FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(flexi_logger::detailed_format)
        }
    };

    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    PANIC_HOOK.call_once(install_panic_hook);

    info!(
        "event=app_start module=core status=ok platform={} version={} debug_build={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        cfg!(debug_assertions)
    );
    info!("event=core_init module=core status=ok level={level} target={target}");

    Ok(ActiveLogger {
        level,
        target,
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map_or_else(
            || "unknown".to_string(),
            |location| format!("{}:{}", location.file(), location.line()),
        );
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            panic_summary(info.payload())
        );
        previous(info);
    }));
}

/// Panic payloads may echo submitted form values, so they are capped.
fn panic_summary(payload: &(dyn Any + Send)) -> String {
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    one_line(text, PANIC_MESSAGE_LIMIT)
}

fn one_line(text: &str, limit: usize) -> String {
    let mut line: String = text
        .chars()
        .take(limit)
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();
    if text.chars().nth(limit).is_some() {
        line.push_str("...");
    }
    line
}
