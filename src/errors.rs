use thiserror::Error;

/// Error depicting errors that occur during Monotonic Cubic Spline interpolation
///
#[derive(Debug, Error)]
pub enum SplineError {
    #[error("x is too short")]
    IllegalLength,
    #[error("control points not monotonically increasing")]
    ControlPoint,
}

/// Error depicting errors that occur while building time series
///
#[derive(Debug, Error)]
pub enum TimeSeriesError {
    #[error("UnequalLengths: index has {0} entries while values has {1}")]
    UnequalLengths(usize, usize),
}
