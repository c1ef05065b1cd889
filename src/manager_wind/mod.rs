pub mod errors;
pub mod library;
pub mod models;

use std::f64::consts::PI;
use log::{info, warn};
use crate::config::{DataHeight, TurbineParameters};
use crate::manager_weather::models::WeatherData;
use crate::manager_wind::errors::WindError;
use crate::manager_wind::models::FetchCurve;
use crate::models::TimeSeries;
use crate::spline::MonotonicCubicSpline;

/// Specific gas constant of dry air in J/(kg*K)
const R_AIR: f64 = 287.058;

/// Temperature gradient of the standard atmosphere in K/m
const TEMPERATURE_GRADIENT: f64 = 0.0064;

/// How a turbine converts hub height wind into power
///
enum TurbineCurve {
    /// Power in W given wind speed
    Power(MonotonicCubicSpline),
    /// Power coefficient given wind speed
    Cp(MonotonicCubicSpline),
}

/// A single wind turbine following the basic windpowerlib model
///
pub struct WindTurbine {
    h_hub: f64,
    d_rotor: f64,
    wind_conv_type: String,
    curve: TurbineCurve,
}

impl WindTurbine {
    /// Returns a new WindTurbine
    ///
    /// A configured power or cp curve is used if present, otherwise the curve chosen by
    /// `fetch_curve` is looked up in the turbine library using the turbine type.
    ///
    /// # Arguments
    ///
    /// * 'params' - turbine parameters
    pub fn new(params: &TurbineParameters) -> Result<WindTurbine, WindError> {
        let curve = if let Some(power_curve) = &params.power_curve {
            TurbineCurve::Power(spline_from_pairs(power_curve)?)
        } else if let Some(cp_curve) = &params.cp_curve {
            TurbineCurve::Cp(spline_from_pairs(cp_curve)?)
        } else {
            let unknown = || WindError::UnknownTurbine(format!("'{}' has no {:?} curve, known types: {}",
                params.wind_conv_type, params.fetch_curve, library::turbine_types().join(", ")));
            match params.fetch_curve {
                FetchCurve::Power => {
                    let power_curve = library::power_curve(&params.wind_conv_type).ok_or_else(unknown)?;
                    TurbineCurve::Power(spline_from_pairs(power_curve)?)
                },
                FetchCurve::Cp => {
                    let cp_curve = library::cp_curve(&params.wind_conv_type).ok_or_else(unknown)?;
                    TurbineCurve::Cp(spline_from_pairs(cp_curve)?)
                },
            }
        };

        Ok(WindTurbine {
            h_hub: params.h_hub,
            d_rotor: params.d_rotor,
            wind_conv_type: params.wind_conv_type.clone(),
            curve,
        })
    }

    /// Calculates the turbine power output in W for every row of the weather data
    ///
    /// # Arguments
    ///
    /// * 'weather' - weather data with v_wind, Z0, temp_air and pressure columns
    /// * 'data_height' - measurement heights of the weather data columns
    pub fn turbine_power_output(&self, weather: &WeatherData, data_height: &DataHeight) -> Result<TimeSeries, WindError> {
        let v_wind = weather.column("v_wind")?;
        let z0 = weather.column("Z0")?;
        let temp_air = weather.column("temp_air")?;
        let pressure = weather.column("pressure")?;

        let mut power = Vec::with_capacity(weather.len());
        for i in 0..weather.len() {
            let v_hub = self.v_wind_hub(v_wind[i], z0[i], data_height.v_wind);
            let p = match &self.curve {
                TurbineCurve::Power(curve) => curve_value(curve, v_hub),
                TurbineCurve::Cp(curve) => {
                    let rho = self.rho_hub(temp_air[i], data_height.temp_air, pressure[i], data_height.pressure);
                    self.cp_power(rho, v_hub, curve_value(curve, v_hub))
                },
            };
            power.push(p);
        }

        let missing = power.iter().filter(|p| !p.is_finite()).count();
        if missing > 0 {
            warn!("{} of {} turbine power values could not be calculated", missing, power.len());
        }

        let output = TimeSeries::new(&format!("{} power output", self.wind_conv_type), "W", &weather.index, &power)?;
        info!("turbine {} mean power output {:.1} kW over {} steps",
            self.wind_conv_type, output.mean().unwrap_or(0.0) / 1000.0, output.len());

        Ok(output)
    }

    /// Wind speed at hub height by the logarithmic wind profile
    ///
    /// # Arguments
    ///
    /// * 'v_wind' - wind speed at measurement height in m/s
    /// * 'z0' - roughness length in m
    /// * 'h_data' - measurement height in m
    pub fn v_wind_hub(&self, v_wind: f64, z0: f64, h_data: f64) -> f64 {
        v_wind * (self.h_hub / z0).ln() / (h_data / z0).ln()
    }

    /// Air density at hub height in kg/m³
    ///
    /// Temperature is moved to hub height with a linear gradient and pressure with
    /// the barometric rule of 1 hPa per 8 m.
    ///
    /// # Arguments
    ///
    /// * 'temp_air' - air temperature in K
    /// * 'h_temp' - measurement height of the temperature in m
    /// * 'pressure' - air pressure in Pa
    /// * 'h_pressure' - measurement height of the pressure in m
    pub fn rho_hub(&self, temp_air: f64, h_temp: f64, pressure: f64, h_pressure: f64) -> f64 {
        let t_hub = temp_air - TEMPERATURE_GRADIENT * (self.h_hub - h_temp);
        let p_hub = (pressure / 100.0 - (self.h_hub - h_pressure) / 8.0) * 100.0;

        p_hub / (R_AIR * t_hub)
    }

    /// Power in W from the power coefficient
    ///
    /// # Arguments
    ///
    /// * 'rho' - air density at hub height in kg/m³
    /// * 'v_hub' - wind speed at hub height in m/s
    /// * 'cp' - power coefficient
    fn cp_power(&self, rho: f64, v_hub: f64, cp: f64) -> f64 {
        rho * self.d_rotor.powi(2) * PI * v_hub.powi(3) * cp / 8.0
    }
}

/// Evaluates a curve, zero outside its wind speed range
///
/// # Arguments
///
/// * 'curve' - the curve
/// * 'v' - wind speed in m/s
fn curve_value(curve: &MonotonicCubicSpline, v: f64) -> f64 {
    if !v.is_finite() {
        return f64::NAN;
    }
    let (v_min, v_max) = curve.domain();
    if v < v_min || v > v_max {
        return 0.0;
    }

    curve.interpolate(v).max(0.0)
}

fn spline_from_pairs(pairs: &[(f64, f64)]) -> Result<MonotonicCubicSpline, WindError> {
    let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();

    Ok(MonotonicCubicSpline::new(&x, &y)?)
}
