use thiserror::Error;

/// Error depicting errors that occur while reading or reshaping weather data
///
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("FileError: {0}")]
    FileError(#[from] std::io::Error),
    #[error("CsvError: {0}")]
    CsvError(#[from] csv::Error),
    #[error("MetadataError: {0}")]
    MetadataError(String),
    #[error("ParseError: line {line}, column '{column}': {message}")]
    ParseError { line: u64, column: String, message: String },
    #[error("MissingColumn: {0}")]
    MissingColumn(String),
    #[error("DuplicateColumn: {0}")]
    DuplicateColumn(String),
    #[error("UnequalLengths: column '{0}' has {1} values, index has {2}")]
    UnequalLengths(String, usize, usize),
}
