pub mod errors;
pub mod models;
pub mod prepare;
pub mod sapm;

use chrono::{DateTime, Utc};
use log::info;
use crate::location::Location;
use crate::manager_pv::errors::PVError;
use crate::manager_pv::models::{DcOutput, ModelChainResult, OrientationStrategy, PVSystem};
use crate::manager_weather::models::WeatherData;
use crate::models::TimeSeries;

/// Runs the PV modelling steps from weather to AC power for one system at one location
///
pub struct ModelChain {
    system: PVSystem,
    location: Location,
}

impl ModelChain {
    /// Returns a new ModelChain with the orientation strategy applied to the system
    ///
    /// # Arguments
    ///
    /// * 'system' - the PV system
    /// * 'location' - where the system is installed
    /// * 'orientation_strategy' - how to orient the system
    pub fn new(mut system: PVSystem, location: Location, orientation_strategy: OrientationStrategy) -> ModelChain {
        match orientation_strategy {
            OrientationStrategy::None => (),
            OrientationStrategy::Flat => {
                system.surface_tilt = 0.0;
                system.surface_azimuth = 180.0;
            },
            OrientationStrategy::SouthAtLatitudeTilt => {
                system.surface_tilt = location.latitude;
                system.surface_azimuth = 180.0;
            },
        }

        ModelChain { system, location }
    }

    pub fn system(&self) -> &PVSystem {
        &self.system
    }

    /// Runs the model chain
    ///
    /// # Arguments
    ///
    /// * 'times' - points in time to model
    /// * 'irradiance' - ghi, dhi and dni columns in W/m²
    /// * 'weather' - temp_air (°C) and wind_speed (m/s) columns
    pub fn run_model(&self, times: &[DateTime<Utc>], irradiance: &WeatherData, weather: &WeatherData) -> Result<ModelChainResult, PVError> {
        if irradiance.len() != times.len() || weather.len() != times.len() {
            return Err(PVError::UnequalLengths(format!("times: {}, irradiance: {}, weather: {}",
                times.len(), irradiance.len(), weather.len())));
        }

        let ghi = irradiance.column("ghi")?;
        let dhi = irradiance.column("dhi")?;
        let dni = irradiance.column("dni")?;
        let temp_air = weather.column("temp_air")?;
        let wind_speed = weather.column("wind_speed")?;

        let system = &self.system;
        let pressure = self.location.pressure();
        let surface_position = self.location.get_surface_position(times, system.surface_tilt, system.surface_azimuth)?;

        let n = times.len();
        let mut airmass_absolute = Vec::with_capacity(n);
        let mut poa = Vec::with_capacity(n);
        let mut effective_irradiance = Vec::with_capacity(n);
        let mut cell_temperature = Vec::with_capacity(n);
        let mut dc = DcOutput::default();
        let mut ac = Vec::with_capacity(n);

        for i in 0..n {
            let sp = &surface_position[i];
            let am = sapm::absolute_airmass(sapm::relative_airmass(sp.solar.apparent_zenith), pressure);
            let irr = sapm::poa_isotropic(system.surface_tilt, sp.aoi, dni[i], ghi[i], dhi[i], system.albedo);
            let ee = sapm::effective_irradiance(irr.poa_direct, irr.poa_diffuse, am, sp.aoi, &system.module);
            let t_cell = sapm::cell_temperature(irr.poa_global, temp_air[i], wind_speed[i], &system.temperature_model);

            let point = sapm::sapm(ee, t_cell, &system.module)
                .map(|p| p.scale(system.modules_per_string, system.strings_per_inverter));
            ac.push(point.map(|p| sapm::snl_inverter(p.v_mp, p.p_mp, &system.inverter)));
            dc.push(point);

            airmass_absolute.push(am);
            poa.push(irr);
            effective_irradiance.push(ee);
            cell_temperature.push(t_cell);
        }

        let missing = dc.p_mp.iter().filter(|p| p.is_none()).count();
        info!("model chain for {} on {} at {} ran {} steps, {} without dc output",
            system.module.name, system.inverter.name, self.location.name, n, missing);

        Ok(ModelChainResult {
            times: times.to_vec(),
            surface_position,
            airmass_absolute,
            poa,
            effective_irradiance,
            cell_temperature,
            dc,
            ac,
        })
    }
}

impl ModelChainResult {
    /// DC power at the maximum power point in W, missing where the model had no output
    ///
    pub fn dc_p_mp(&self) -> Result<TimeSeries, PVError> {
        Ok(TimeSeries::from_options("dc p_mp", "W", &self.times, &self.dc.p_mp)?)
    }

    /// AC power in W, missing where the model had no output
    ///
    pub fn ac_power(&self) -> Result<TimeSeries, PVError> {
        Ok(TimeSeries::from_options("ac power", "W", &self.times, &self.ac)?)
    }

    /// DC energy over plane of array irradiance on the module area, counting only steps
    /// with DC output. None if no irradiance reached the array at those steps.
    ///
    /// # Arguments
    ///
    /// * 'system' - the system the result was calculated for
    pub fn array_efficiency(&self, system: &PVSystem) -> Option<f64> {
        let area = system.module.area * (system.modules_per_string * system.strings_per_inverter) as f64;
        let (dc, irradiance) = self.dc.p_mp.iter()
            .zip(&self.poa)
            .filter_map(|(p, poa)| p.map(|p| (p, poa.poa_global)))
            .filter(|(_, g)| g.is_finite())
            .fold((0.0, 0.0), |(dc, irr), (p, g)| (dc + p, irr + g * area));

        if irradiance > 0.0 { Some(dc / irradiance) } else { None }
    }

    /// Logs peak values of the intermediate model steps
    ///
    /// # Arguments
    ///
    /// * 'system' - the system the result was calculated for
    pub fn log_summary(&self, system: &PVSystem) {
        let poa = peak(self.poa.iter().map(|p| p.poa_global));
        let effective = peak(self.effective_irradiance.iter().copied());
        let t_cell = peak(self.cell_temperature.iter().copied());
        let aoi = -peak(self.surface_position.iter().map(|p| -p.aoi));
        let airmass = -peak(self.airmass_absolute.iter().map(|am| -am));

        info!("peak poa {:.0} W/m², peak effective irradiance {:.0} W/m², max cell temperature {:.1} °C, min aoi {:.1}°, min air mass {:.2}",
            poa, effective, t_cell, aoi, airmass);
        match self.array_efficiency(system) {
            Some(eff) => info!("array efficiency {:.1} %", eff * 100.0),
            None => info!("no irradiance on the array while producing"),
        }
    }
}

/// Largest finite value, NaN when there is none
fn peak(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(f64::NAN, f64::max)
}
