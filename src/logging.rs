use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use thiserror::Error;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {M} - {m}{n}";
const LOG_FILE: &str = "feedin_yield.log";
const LOG_ROLL_SIZE: u64 = 10 * 1024 * 1024;
const LOG_ROLL_COUNT: u32 = 5;

/// Sets up logging to a rolling log file and, optionally, to stdout
///
/// # Arguments
///
/// * 'log_path' - directory for the log files
/// * 'log_level' - maximum level to log
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: &str, log_level: LevelFilter, log_to_stdout: bool) -> Result<Handle, LoggerError> {
    let log_path = log_path.trim_end_matches('/');

    let roller = FixedWindowRoller::builder()
        .build(&format!("{}/{}.{{}}", log_path, LOG_FILE), LOG_ROLL_COUNT)
        .map_err(|e| LoggerError::RollerError(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_ROLL_SIZE)), Box::new(roller));

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(format!("{}/{}", log_path, LOG_FILE), Box::new(policy))?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(log_level))?;

    Ok(log4rs::init_config(config)?)
}

/// Error depicting errors that occur while setting up the logger
///
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("FileError: {0}")]
    FileError(#[from] std::io::Error),
    #[error("RollerError: {0}")]
    RollerError(String),
    #[error("ConfigError: {0}")]
    ConfigError(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("InitError: {0}")]
    InitError(#[from] log::SetLoggerError),
}
