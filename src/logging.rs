//! log4rs set-up for the binary.

use crate::config::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {M} - {l} - {m}{n}";

/// Initialise logging from the yaml file named in `config`, or a stderr
/// console logger at the configured level when that file is missing.
///
/// Logs always go to stderr so stdout stays machine readable.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if Path::new(&config.log_config).exists() {
        log4rs::init_file(&config.log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", config.log_config))?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(config.log_level()))
        .map_err(|e| format!("Invalid log4rs config: {e}"))?;
    log4rs::init_config(log_config).map_err(|e| format!("Error initializing log4rs: {e}"))?;
    Ok(())
}
