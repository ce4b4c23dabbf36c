use crate::error::{Result as ServerErrorResult, ServerError};

use mt_config::LoggingConfig;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

/// Install the global `log` dispatcher.
///
/// Lines go to `log_file` when given (never colored), otherwise to stdout,
/// colored when `config.colored` is set.
pub fn initialize(config: &LoggingConfig, log_file: Option<PathBuf>) -> ServerErrorResult<()> {
    let level = *config.level;

    let output = match log_file {
        Some(ref path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ServerError::Logger {
                    message: format!("Failed to open log file {}: {}", path.display(), e),
                })?;
            line_format(None).chain(file)
        }
        None if config.colored => line_format(Some(level_colors())).chain(std::io::stdout()),
        None => line_format(None).chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level)
        // sqlx logs every statement at info
        .level_for("sqlx", LevelFilter::Warn)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    let target = log_file
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    info!("Logger initialized: level={:?}, output={}", level, target);

    Ok(())
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

/// `[date - LEVEL] message [file:line]`
fn line_format(colors: Option<ColoredLevelConfig>) -> Dispatch {
    Dispatch::new().format(move |out, message, record| {
        let date = humantime::format_rfc3339(SystemTime::now());
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        match colors {
            Some(colors) => out.finish(format_args!(
                "[{} - {}] {} [{}:{}]",
                date,
                colors.color(record.level()),
                message,
                file,
                line
            )),
            None => out.finish(format_args!(
                "[{} - {}] {} [{}:{}]",
                date,
                record.level(),
                message,
                file,
                line
            )),
        }
    })
}
