use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use crate::location::Location;
use crate::manager_pv::models::{InverterParameters, ModuleParameters, OrientationStrategy, TemperatureModelParameters};
use crate::manager_wind::models::FetchCurve;

#[derive(Deserialize)]
pub struct WeatherFile {
    pub path: String,
}

/// Measurement height in metres of the weather columns the wind model moves to hub height
///
#[derive(Deserialize, Clone, Debug)]
pub struct DataHeight {
    pub pressure: f64,
    pub temp_air: f64,
    pub v_wind: f64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TurbineParameters {
    pub h_hub: f64,
    pub d_rotor: f64,
    pub wind_conv_type: String,
    /// (wind speed m/s, power W) pairs, overrides the built-in turbine library
    #[serde(default)]
    pub power_curve: Option<Vec<(f64, f64)>>,
    /// (wind speed m/s, cp) pairs, overrides the built-in turbine library
    #[serde(default)]
    pub cp_curve: Option<Vec<(f64, f64)>>,
    /// Library curve used when no curve is configured
    #[serde(default)]
    pub fetch_curve: FetchCurve,
}

#[derive(Deserialize)]
pub struct LocationParameters {
    pub name: String,
    pub altitude: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationParameters {
    /// Returns a Location where missing coordinates are taken from the weather data
    ///
    /// # Arguments
    ///
    /// * 'latitude' - fallback latitude
    /// * 'longitude' - fallback longitude
    pub fn location(&self, latitude: f64, longitude: f64) -> Location {
        Location::new(
            &self.name,
            self.altitude,
            self.latitude.unwrap_or(latitude),
            self.longitude.unwrap_or(longitude),
        )
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PVSystemParameters {
    pub module: ModuleParameters,
    pub inverter: InverterParameters,
    pub surface_azimuth: f64,
    pub surface_tilt: f64,
    pub albedo: f64,
    #[serde(default = "one")]
    pub modules_per_string: u32,
    #[serde(default = "one")]
    pub strings_per_inverter: u32,
    #[serde(default)]
    pub orientation_strategy: OrientationStrategy,
    #[serde(default)]
    pub temperature_model: TemperatureModelParameters,
}

#[derive(Deserialize)]
pub struct Plots {
    /// Set to false to skip plotting even when the plot feature is built in
    #[serde(default = "enabled")]
    pub enabled: bool,
    pub output_dir: String,
    #[serde(default = "plot_width")]
    pub width: u32,
    #[serde(default = "plot_height")]
    pub height: u32,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub weather: WeatherFile,
    pub data_height: DataHeight,
    pub turbine: TurbineParameters,
    pub location: LocationParameters,
    pub pv_system: PVSystemParameters,
    pub plots: Plots,
    pub general: General,
}

fn one() -> u32 { 1 }
fn enabled() -> bool { true }
fn plot_width() -> u32 { 1200 }
fn plot_height() -> u32 { 600 }

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("FileError: {0}")]
    FileError(#[from] std::io::Error),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_demo_config() {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/config.toml")).unwrap();
        assert_eq!(config.turbine.wind_conv_type, "ENERCON E 126 7500");
        assert_eq!(config.turbine.h_hub, 135.0);
        assert_eq!(config.turbine.fetch_curve, FetchCurve::Cp);
        assert_eq!(config.data_height.temp_air, 2.0);
        assert_eq!(config.data_height.v_wind, 10.0);
        assert_eq!(config.pv_system.surface_azimuth, 180.0);
        assert_eq!(config.pv_system.orientation_strategy, OrientationStrategy::SouthAtLatitudeTilt);
        assert_eq!(config.pv_system.modules_per_string, 1);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.plots.enabled);
    }

    #[test]
    fn location_falls_back_to_weather_coordinates() {
        let params = LocationParameters { name: "Wittenberg".into(), altitude: 34.0, latitude: None, longitude: Some(13.0) };
        let loc = params.location(51.87, 12.65);
        assert_eq!(loc.latitude, 51.87);
        assert_eq!(loc.longitude, 13.0);
        assert_eq!(loc.altitude, 34.0);
    }

    #[test]
    fn missing_file_is_a_file_error() {
        assert!(matches!(load_config("/nonexistent/config.toml"), Err(LoadConfigurationError::FileError(_))));
    }
}
