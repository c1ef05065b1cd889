use chrono::{DateTime, Utc};
use log::{info, warn};
use crate::location::Location;
use crate::manager_pv::errors::PVError;
use crate::manager_weather::models::WeatherData;

const ZERO_CELSIUS: f64 = 273.15;

/// Weather data reshaped for the PV model chain
///
pub struct PVInput {
    pub times: Vec<DateTime<Utc>>,
    /// ghi, dhi and dni columns
    pub irradiance: WeatherData,
    /// temp_air (°C) and wind_speed columns
    pub weather: WeatherData,
}

/// Translates the common weather schema into the PV schema
///
/// The weather data is changed in place: v_wind is renamed to wind_speed, temp_air is
/// converted from K to °C and a ghi column is added. Irradiance (ghi, dhi) and ambient
/// weather (temp_air, wind_speed) are then split out, and dni is derived if missing.
///
/// # Arguments
///
/// * 'weather' - weather data in the common schema
/// * 'location' - site used for the solar zenith of the dni derivation
pub fn prepare_weather(weather: &mut WeatherData, location: &Location) -> Result<PVInput, PVError> {
    weather.rename_column("v_wind", "wind_speed")?;
    weather.map_column("temp_air", kelvin_to_celsius)?;

    let ghi = global_horizontal(weather.column("dirhi")?, weather.column("dhi")?);
    weather.set_column("ghi", ghi)?;

    let mut irradiance = weather.select(&["ghi", "dhi"])?;
    let ambient = weather.select(&["temp_air", "wind_speed"])?;
    let times = weather.index.clone();

    if !irradiance.has_column("dni") {
        let zenith = location.get_solar_position(&times)?
            .into_iter()
            .map(|sp| sp.zenith)
            .collect::<Vec<f64>>();
        let dni = direct_normal(irradiance.column("ghi")?, irradiance.column("dhi")?, &zenith);

        let unstable = dni.iter().filter(|v| !v.is_finite() || **v < 0.0).count();
        if unstable > 0 {
            warn!("dni is negative or not finite at {} of {} steps (sun at or below the horizon)", unstable, dni.len());
        }
        irradiance.set_column("dni", dni)?;
    }

    info!("prepared {} steps of irradiance and weather for {}", times.len(), location.name);

    Ok(PVInput { times, irradiance, weather: ambient })
}

/// Converts a temperature from K to °C
///
/// # Arguments
///
/// * 'kelvin' - temperature in K
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - ZERO_CELSIUS
}

/// Global horizontal irradiance as the sum of direct and diffuse horizontal irradiance
///
/// # Arguments
///
/// * 'dirhi' - direct horizontal irradiance
/// * 'dhi' - diffuse horizontal irradiance
pub fn global_horizontal(dirhi: &[f64], dhi: &[f64]) -> Vec<f64> {
    dirhi.iter().zip(dhi).map(|(dir, dif)| dir + dif).collect()
}

/// Direct normal irradiance as `(ghi - dhi) / cos(zenith)`
///
/// The division is not guarded. At a zenith of 90° the cosine is close to zero and the
/// result is huge or infinite, beyond 90° it turns negative.
///
/// # Arguments
///
/// * 'ghi' - global horizontal irradiance
/// * 'dhi' - diffuse horizontal irradiance
/// * 'zenith' - solar zenith in degrees
pub fn direct_normal(ghi: &[f64], dhi: &[f64], zenith: &[f64]) -> Vec<f64> {
    ghi.iter()
        .zip(dhi)
        .zip(zenith)
        .map(|((g, d), z)| (g - d) / z.to_radians().cos())
        .collect()
}
