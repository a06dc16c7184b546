//! Logger set-up for equation runs.
//!
//! Terminal logging through simplelog, optionally mirrored into a
//! `log_<date>_<time>.txt` file in the working directory. Terminal output goes to
//! stderr; stdout carries the rendered Markdown.
use std::fs::{self, File};
use std::path::Path;

use chrono::Local;
use simplelog::*;

use crate::errors::EquationError;

/// Maps a loglevel name onto a filter. `None` means the default (info).
pub fn parse_loglevel(loglevel: Option<&str>) -> Result<LevelFilter, EquationError> {
    match loglevel {
        None => Ok(LevelFilter::Info),
        Some(level) => match level {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" | "none" => Ok(LevelFilter::Off),
            other => Err(EquationError::Config(format!(
                "loglevel must be debug, info, warn, error, off or none, got '{}'",
                other
            ))),
        },
    }
}

/// Terminal stream for log records; stdout is reserved for the rendered document
fn terminal_mode() -> TerminalMode {
    TerminalMode::Stderr
}

/// true once a global logger has been installed
fn logger_installed() -> bool {
    log::max_level() != LevelFilter::Off
}

/// Installs the global logger. A logger that is already installed is kept and no log
/// file is created for it.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> Result<(), EquationError> {
    let log_option = parse_loglevel(loglevel)?;
    if log_option == LevelFilter::Off || logger_installed() {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        log_option,
        Config::default(),
        terminal_mode(),
        ColorChoice::Auto,
    ));
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        let file = File::create(&name)
            .map_err(|e| EquationError::Config(format!("cannot create {}: {}", name, e)))?;
        loggers.push(WriteLogger::new(log_option, Config::default(), file));
    }
    // a concurrent initialisation may still win the race; its logger stays active
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

/// Removes `log_*.txt` files from `dir`
pub fn delete_old_logs(dir: &str) -> std::io::Result<()> {
    for entry in fs::read_dir(Path::new(dir))? {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("log_") && n.ends_with(".txt"));
        if is_log && path.is_file() {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel(None).unwrap(), LevelFilter::Info);
        assert_eq!(parse_loglevel(Some("warn")).unwrap(), LevelFilter::Warn);
        assert_eq!(parse_loglevel(Some("none")).unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_loglevel(Some("verbose")),
            Err(EquationError::Config(_))
        ));
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(Some("error"), false).unwrap();
        init_logger(Some("error"), false).unwrap();
        init_logger(Some("off"), false).unwrap();
    }

    fn log_files_in_cwd() -> usize {
        std::fs::read_dir(".")
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.starts_with("log_") && name.ends_with(".txt")
            })
            .count()
    }

    #[test]
    fn test_terminal_logs_stay_off_stdout() {
        assert!(matches!(terminal_mode(), TerminalMode::Stderr));
    }

    #[test]
    fn test_installed_logger_creates_no_log_file() {
        init_logger(Some("error"), false).unwrap();
        assert!(logger_installed());
        let before = log_files_in_cwd();
        init_logger(Some("debug"), true).unwrap();
        assert_eq!(log_files_in_cwd(), before);
    }

    #[test]
    fn test_delete_old_logs_only_touches_log_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("log_2024-01-01_00-00-00.txt"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        delete_old_logs(dir.path().to_str().unwrap()).unwrap();
        assert!(!dir.path().join("log_2024-01-01_00-00-00.txt").exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
