use std::fs::File;
use std::path::PathBuf;

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::error::LoggingError;

/// Where the tree's `log` output goes.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub term_level: LevelFilter,
    /// also write everything up to `file_level` into this file
    pub file: Option<PathBuf>,
    pub file_level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            term_level: LevelFilter::Warn,
            file: None,
            file_level: LevelFilter::Info,
        }
    }
}

/// Installs a global logger for the `log` macros used throughout the crate.
///
/// This can only succeed once per process.
pub fn initialize_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(config.term_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
    ];
    if let Some(path) = &config.file {
        loggers.push(WriteLogger::new(config.file_level, Config::default(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Routes log output through the test harness' captured stdout.
///
/// Safe to call from every test; only the first call installs anything.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = simplelog::TestLogger::init(LevelFilter::Debug, Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_terminal_only() {
        let config = LogConfig::default();
        assert_eq!(config.term_level, LevelFilter::Warn);
        assert!(config.file.is_none());
    }

    #[test]
    fn second_install_is_reported() {
        init_test_logging();
        // a logger is already installed by now, whichever test got there first
        let err = initialize_logging(&LogConfig::default()).unwrap_err();
        assert!(matches!(err, LoggingError::SetLogger(_)));
    }
}
