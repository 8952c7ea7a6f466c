//! Logging bootstrap.
//!
//! Interactive sessions log to rotating files only, so the terminal UI is
//! never overwritten. One-shot commands and the dev server log to stderr.
//! Initialization happens at most once per process; asking again with the
//! same target is a no-op, asking with a different target is an error.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "phonebook";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
    Stderr,
    Dir(PathBuf),
}

struct LoggingState {
    level: &'static str,
    target: Target,
    _logger: LoggerHandle,
}

pub fn init_file_logging(level: &str, log_dir: &Path) -> Result<()> {
    let level = normalize_level(level)?;
    let target = Target::Dir(log_dir.to_path_buf());
    if already_initialized(level, &target)? {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;

    let logger = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {}", level))?
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
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("start file logger")?;

    install(level, target, logger);
    info!(
        "event=logging_init status=ok target=file level={} dir={}",
        level,
        log_dir.display()
    );
    Ok(())
}

pub fn init_stderr_logging(level: &str) -> Result<()> {
    let level = normalize_level(level)?;
    if already_initialized(level, &Target::Stderr)? {
        return Ok(());
    }

    let logger = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {}", level))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .context("start stderr logger")?;

    install(level, Target::Stderr, logger);
    Ok(())
}

pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "error" => Ok("error"),
        "warn" | "warning" => Ok("warn"),
        "info" => Ok("info"),
        "debug" => Ok("debug"),
        "trace" => Ok("trace"),
        other => anyhow::bail!("unsupported log level {:?}", other),
    }
}

fn already_initialized(level: &'static str, target: &Target) -> Result<bool> {
    let Some(state) = LOGGING_STATE.get() else {
        return Ok(false);
    };
    if &state.target != target {
        anyhow::bail!("logging already initialized with {:?}", state.target);
    }
    if state.level != level {
        anyhow::bail!(
            "logging already initialized at level {}; refusing to switch to {}",
            state.level,
            level
        );
    }
    Ok(true)
}

fn install(level: &'static str, target: Target, logger: LoggerHandle) {
    let _ = LOGGING_STATE.set(LoggingState {
        level,
        target,
        _logger: logger,
    });
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
