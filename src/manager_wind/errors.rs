use thiserror::Error;
use crate::errors::{SplineError, TimeSeriesError};
use crate::manager_weather::errors::WeatherError;

/// Error depicting errors that occur while calculating turbine power output
///
#[derive(Debug, Error)]
pub enum WindError {
    #[error("UnknownTurbine: {0}")]
    UnknownTurbine(String),
    #[error("CurveError: {0}")]
    CurveError(#[from] SplineError),
    #[error("WeatherDataError: {0}")]
    WeatherDataError(#[from] WeatherError),
    #[error("SeriesError: {0}")]
    SeriesError(#[from] TimeSeriesError),
}
