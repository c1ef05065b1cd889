use thiserror::Error;
use crate::errors::TimeSeriesError;
use crate::location::SolarPositionError;
use crate::manager_weather::errors::WeatherError;

/// Error depicting errors that occur while preparing for or running the PV model chain
///
#[derive(Debug, Error)]
pub enum PVError {
    #[error("WeatherDataError: {0}")]
    WeatherDataError(#[from] WeatherError),
    #[error("SolarPositionError: {0}")]
    SolarPositionError(#[from] SolarPositionError),
    #[error("SeriesError: {0}")]
    SeriesError(#[from] TimeSeriesError),
    #[error("UnequalLengths: {0}")]
    UnequalLengths(String),
}
