use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Environment variable holding the log level (`error` through `trace`).
pub const LOG_ENV: &str = "TMENU_LOG";

/// The terminal belongs to the menu, so records go to a file and only when asked for.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(level) = level_from_env() else {
        return Ok(None);
    };
    let path = log_file_path().context("no state or cache directory for the log file")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&path).with_context(|| format!("opening {}", path.display()))?)
        .apply()
        .context("logger already installed")?;

    Ok(Some(path))
}

fn level_from_env() -> Option<LevelFilter> {
    std::env::var(LOG_ENV).ok().and_then(|v| parse_level(&v))
}

/// `off` and unparseable values disable logging.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => None,
        Ok(level) => Some(level),
    }
}

fn log_file_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|d| d.join("tmenu").join("tmenu.log"))
}
