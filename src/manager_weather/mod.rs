pub mod errors;
pub mod models;

use std::fs;
use std::io::Read;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use crate::manager_weather::errors::WeatherError;
use crate::manager_weather::models::WeatherData;

impl WeatherData {
    /// Reads a feedinlib style weather file
    ///
    /// The file starts with `key: value` metadata lines (latitude, longitude and an optional
    /// timezone, each optionally prefixed with `#`) followed by a csv table where the first
    /// column holds the time index.
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the weather file
    pub fn read_feedinlib_csv(path: &str) -> Result<WeatherData, WeatherError> {
        let file = fs::File::open(path)?;
        let weather = WeatherData::from_reader(file)?;
        info!("read {} weather records from {} (lat {}, long {}), columns: {}",
            weather.len(), path, weather.latitude, weather.longitude, weather.column_names().join(", "));
        if weather.is_empty() {
            warn!("weather file {} has no records", path);
        }

        Ok(weather)
    }

    /// Reads feedinlib style weather data from any reader
    ///
    /// # Arguments
    ///
    /// * 'reader' - source of the weather data
    pub fn from_reader(mut reader: impl Read) -> Result<WeatherData, WeatherError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut latitude: Option<f64> = None;
        let mut longitude: Option<f64> = None;
        let mut timezone: Option<String> = None;

        // Split metadata lines from the csv part
        let mut offset = 0usize;
        let mut meta_lines = 0u64;
        for line in content.split_inclusive('\n') {
            let trimmed = line.trim();
            let commented = trimmed.starts_with('#');
            let stripped = trimmed.trim_start_matches('#').trim();

            let meta = stripped.split_once(':')
                .map(|(k, v)| (k.trim().to_lowercase(), v.trim()))
                .filter(|(k, _)| matches!(k.as_str(), "latitude" | "longitude" | "timezone"));

            match meta {
                Some((key, value)) => match key.as_str() {
                    "latitude" => latitude = Some(parse_meta(&key, value)?),
                    "longitude" => longitude = Some(parse_meta(&key, value)?),
                    _ => timezone = Some(value.to_string()),
                },
                None if commented || trimmed.is_empty() => (),
                None => break,
            }
            offset += line.len();
            meta_lines += 1;
        }

        let latitude = latitude.ok_or(WeatherError::MetadataError("latitude is missing".into()))?;
        let longitude = longitude.ok_or(WeatherError::MetadataError("longitude is missing".into()))?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content[offset..].as_bytes());

        let headers = csv_reader.headers()?.clone();
        let names = headers.iter().skip(1).map(|h| h.to_string()).collect::<Vec<String>>();
        if names.is_empty() {
            return Err(WeatherError::MetadataError("no data columns found".into()));
        }

        let mut index: Vec<DateTime<Utc>> = Vec::new();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line()) + meta_lines;

            let time_str = record.get(0).unwrap_or_default();
            let time = parse_timestamp(time_str).ok_or_else(|| WeatherError::ParseError {
                line,
                column: headers.get(0).unwrap_or_default().to_string(),
                message: format!("invalid timestamp '{}'", time_str),
            })?;
            index.push(time);

            for (i, name) in names.iter().enumerate() {
                let cell = record.get(i + 1).unwrap_or_default();
                let value = if cell.is_empty() {
                    f64::NAN
                } else {
                    cell.parse::<f64>().map_err(|e| WeatherError::ParseError {
                        line,
                        column: name.clone(),
                        message: format!("'{}': {}", cell, e),
                    })?
                };
                values[i].push(value);
            }
        }

        let mut weather = WeatherData::new(latitude, longitude, index);
        weather.timezone = timezone;
        for (name, column) in names.iter().zip(values) {
            if weather.has_column(name) {
                return Err(WeatherError::DuplicateColumn(name.clone()));
            }
            weather.set_column(name, column)?;
        }

        Ok(weather)
    }
}

/// Parses a numeric metadata value
///
/// # Arguments
///
/// * 'key' - metadata key, used in error messages
/// * 'value' - the raw value
fn parse_meta(key: &str, value: &str) -> Result<f64, WeatherError> {
    value.parse::<f64>()
        .map_err(|e| WeatherError::MetadataError(format!("{} '{}': {}", key, value, e)))
}

/// Parses a timestamp with offset, or a naive timestamp which is taken as Utc
///
/// # Arguments
///
/// * 'value' - the timestamp string
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}
