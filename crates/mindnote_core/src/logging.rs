//! Rolling file logs for the library and the `mindnote` tool.
//!
//! The first successful call decides level, directory and stderr mirroring
//! for the whole process. Later calls with the same level and directory are
//! accepted as no-ops; anything else is refused with a message.
//!
//! Events carry metadata only (paths, counts, keys), never document text.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "mindnote";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;
const LEVELS: &str = "trace|debug|info|warn|error";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

impl LoggingState {
    /// Refuses a request that differs from the active setup.
    fn check(&self, level: &str, log_dir: &Path) -> Result<(), String> {
        if self.log_dir != log_dir {
            return Err(format!(
                "logs already go to `{}`; cannot move them to `{}`",
                self.log_dir.display(),
                log_dir.display()
            ));
        }
        if self.level != level {
            return Err(format!(
                "log level is already `{}`; cannot change it to `{}`",
                self.level, level
            ));
        }
        Ok(())
    }
}

/// Starts file logging in `log_dir` (absolute) at `level` without a stderr copy.
///
/// # Errors
/// Unknown level, empty or relative directory, directory creation failure,
/// logger startup failure, or a conflicting earlier initialization.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    init_logging_with(level, log_dir, false)
}

/// Starts file logging; with `mirror_to_stderr` warnings and errors are also
/// printed to stderr, which is what the command-line tool wants.
pub fn init_logging_with(level: &str, log_dir: &str, mirror_to_stderr: bool) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        return state.check(level, &log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        std::fs::create_dir_all(&log_dir).map_err(|err| {
            format!("cannot create log directory `{}`: {err}", log_dir.display())
        })?;
        let logger = start_logger(level, &log_dir, mirror_to_stderr)?;

        install_panic_hook_once();
        info!(
            "event=logging_init module=logging status=ok version={} build_mode={} os={} level={} log_dir={} stderr={}",
            env!("CARGO_PKG_VERSION"),
            build_mode(),
            std::env::consts::OS,
            level,
            log_dir.display(),
            mirror_to_stderr
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    // Another thread may have won the race with different arguments.
    state.check(level, &log_dir)
}

fn start_logger(
    level: &'static str,
    log_dir: &Path,
    mirror_to_stderr: bool,
) -> Result<LoggerHandle, String> {
    let duplicate = if mirror_to_stderr {
        Duplicate::Warn
    } else {
        Duplicate::None
    };
    Logger::try_with_str(level)
        .map_err(|err| format!("log level `{level}` rejected: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .duplicate_to_stderr(duplicate)
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("logger did not start: {err}"))
}

/// Active `(level, directory)`, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!("unknown log level `{other}`; use {LEVELS}")),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory is empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log directory `{trimmed}` is not absolute"));
    }
    Ok(path.to_path_buf())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payload may quote configuration text; keep one capped line.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=logging status=error location={} payload={}",
            location,
            panic_payload_summary(panic_info)
        );
        previous_hook(panic_info);
    }));
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// One line, at most `max_chars` characters plus an ellipsis marker.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut shortened: String = flattened.chars().take(max_chars).collect();
    if flattened.chars().count() > max_chars {
        shortened.push_str("...");
    }
    shortened
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, init_logging_with, logging_status, normalize_level, normalize_log_dir,
        sanitize_message,
    };

    #[test]
    fn level_names_are_case_and_alias_tolerant() {
        assert_eq!(
            normalize_level("INFO").expect("upper-case level should be accepted"),
            "info"
        );
        assert_eq!(
            normalize_level(" warning ").expect("`warning` should alias `warn`"),
            "warn"
        );
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert!(normalize_log_dir("logs/dev")
            .expect_err("relative directory should be refused")
            .contains("not absolute"));
        assert!(normalize_log_dir("  ")
            .expect_err("blank directory should be refused")
            .contains("empty"));
    }

    #[test]
    fn sanitized_payload_is_one_capped_line() {
        let sanitized = sanitize_message("* Key: a\n* Key: b\r", 8);
        assert_eq!(sanitized, "* Key: a...");
        assert_eq!(sanitize_message("short", 8), "short");
    }

    #[test]
    fn first_initialization_wins_and_conflicts_are_refused() {
        let first = tempfile::tempdir().expect("first log dir should be created");
        let second = tempfile::tempdir().expect("second log dir should be created");
        let first_dir = first
            .path()
            .to_str()
            .expect("temp path should be valid UTF-8")
            .to_string();
        let second_dir = second
            .path()
            .to_str()
            .expect("temp path should be valid UTF-8")
            .to_string();

        init_logging("info", &first_dir).expect("first initialization should succeed");
        init_logging("info", &first_dir).expect("same arguments should be a no-op");
        init_logging_with("info", &first_dir, true)
            .expect("mirror flag of a later call should be ignored");

        let level_error = init_logging("debug", &first_dir)
            .expect_err("changing the level should be refused");
        assert!(level_error.contains("cannot change"));

        let dir_error = init_logging("info", &second_dir)
            .expect_err("moving the directory should be refused");
        assert!(dir_error.contains("cannot move"));

        let (active_level, active_dir) =
            logging_status().expect("logging should report its active setup");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, first.path());
    }
}
