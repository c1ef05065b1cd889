use std::env;
use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_pv::models::PVSystem;
use crate::manager_wind::errors::WindError;
use crate::manager_wind::WindTurbine;
use crate::presentation::Presentation;

pub struct Mgr {
    pub wind: WindTurbine,
    pub pv_system: PVSystem,
    pub presentation: Presentation,
}

/// Initializes and returns configuration and a Mgr struct holding various of initialized structs
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = config_path(&args)?;

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting feedin yield version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let wind = WindTurbine::new(&config.turbine)?;
    let pv_system = PVSystem::new(&config.pv_system);
    let presentation = Presentation::new(&config.plots);
    info!("plot backend available: {}", presentation.has_backend());

    let mgr = Mgr {
        wind,
        pv_system,
        presentation,
    };

    Ok((config, mgr))
}

/// Returns the path given by the --config= argument
///
/// # Arguments
///
/// * 'args' - command line arguments
fn config_path(args: &[String]) -> Result<&str, InitializationError> {
    args.iter()
        .find_map(|p| p.strip_prefix("--config="))
        .filter(|p| !p.is_empty())
        .ok_or(InitializationError::ArgumentError("usage: feedin_yield --config=<path>".into()))
}

/// Error depicting errors that occur while initializing
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ArgumentError: {0}")]
    ArgumentError(String),
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("TurbineSetupError: {0}")]
    TurbineSetupError(#[from] WindError),
}
