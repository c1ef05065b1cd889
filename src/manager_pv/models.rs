use chrono::{DateTime, Utc};
use serde::Deserialize;
use crate::config::PVSystemParameters;
use crate::location::SurfacePosition;

/// Sandia PV Array Performance Model parameters of one module
///
#[derive(Deserialize, Clone, Debug)]
pub struct ModuleParameters {
    pub name: String,
    pub area: f64,
    pub cells_in_series: u32,
    pub isco: f64,
    pub voco: f64,
    pub impo: f64,
    pub vmpo: f64,
    pub aisc: f64,
    pub aimp: f64,
    pub bvoco: f64,
    pub mbvoc: f64,
    pub bvmpo: f64,
    pub mbvmp: f64,
    pub n: f64,
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    /// Air mass polynomial, A0 first
    pub a: [f64; 5],
    /// Angle of incidence polynomial, B0 first
    pub b: [f64; 6],
    pub fd: f64,
}

/// Sandia grid connected inverter model parameters
///
#[derive(Deserialize, Clone, Debug)]
pub struct InverterParameters {
    pub name: String,
    pub paco: f64,
    pub pdco: f64,
    pub vdco: f64,
    pub pso: f64,
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub pnt: f64,
}

/// Sandia cell temperature model parameters, defaults are for an open rack glass/glass module
///
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TemperatureModelParameters {
    pub a: f64,
    pub b: f64,
    pub delta_t: f64,
}

impl Default for TemperatureModelParameters {
    fn default() -> Self {
        TemperatureModelParameters { a: -3.47, b: -0.0594, delta_t: 3.0 }
    }
}

/// How the model chain orients the system before running
///
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OrientationStrategy {
    /// Keep the configured surface tilt and azimuth
    #[default]
    None,
    /// Horizontal modules
    Flat,
    /// Facing south, tilted by the site latitude
    SouthAtLatitudeTilt,
}

/// A PV system of identical modules connected to one inverter
///
#[derive(Clone, Debug)]
pub struct PVSystem {
    pub module: ModuleParameters,
    pub inverter: InverterParameters,
    pub temperature_model: TemperatureModelParameters,
    pub surface_azimuth: f64,
    pub surface_tilt: f64,
    pub albedo: f64,
    pub modules_per_string: u32,
    pub strings_per_inverter: u32,
}

impl PVSystem {
    /// Returns a new PVSystem from configuration
    ///
    /// # Arguments
    ///
    /// * 'params' - PV system configuration
    pub fn new(params: &PVSystemParameters) -> PVSystem {
        PVSystem {
            module: params.module.clone(),
            inverter: params.inverter.clone(),
            temperature_model: params.temperature_model.clone(),
            surface_azimuth: params.surface_azimuth,
            surface_tilt: params.surface_tilt,
            albedo: params.albedo,
            modules_per_string: params.modules_per_string,
            strings_per_inverter: params.strings_per_inverter,
        }
    }
}

/// Plane of array irradiance components in W/m²
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoaIrradiance {
    pub poa_global: f64,
    pub poa_direct: f64,
    pub poa_diffuse: f64,
    pub poa_sky_diffuse: f64,
    pub poa_ground_diffuse: f64,
}

/// Module operating point from the Sandia model
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DcPoint {
    pub i_sc: f64,
    pub v_oc: f64,
    pub i_mp: f64,
    pub v_mp: f64,
    pub p_mp: f64,
}

impl DcPoint {
    /// Scales a module operating point to a system of strings of modules
    ///
    /// # Arguments
    ///
    /// * 'modules_per_string' - modules in series
    /// * 'strings' - parallel strings
    pub fn scale(&self, modules_per_string: u32, strings: u32) -> DcPoint {
        let m = modules_per_string as f64;
        let s = strings as f64;
        DcPoint {
            i_sc: self.i_sc * s,
            v_oc: self.v_oc * m,
            i_mp: self.i_mp * s,
            v_mp: self.v_mp * m,
            p_mp: self.p_mp * m * s,
        }
    }
}

/// DC output of the system, None where the model has no valid operating point
///
#[derive(Clone, Debug, Default)]
pub struct DcOutput {
    pub i_sc: Vec<Option<f64>>,
    pub v_oc: Vec<Option<f64>>,
    pub i_mp: Vec<Option<f64>>,
    pub v_mp: Vec<Option<f64>>,
    pub p_mp: Vec<Option<f64>>,
}

impl DcOutput {
    pub fn push(&mut self, point: Option<DcPoint>) {
        self.i_sc.push(point.map(|p| p.i_sc));
        self.v_oc.push(point.map(|p| p.v_oc));
        self.i_mp.push(point.map(|p| p.i_mp));
        self.v_mp.push(point.map(|p| p.v_mp));
        self.p_mp.push(point.map(|p| p.p_mp));
    }
}

/// Everything calculated by a model chain run, one entry per point in time
///
#[derive(Clone, Debug)]
pub struct ModelChainResult {
    pub times: Vec<DateTime<Utc>>,
    pub surface_position: Vec<SurfacePosition>,
    pub airmass_absolute: Vec<f64>,
    pub poa: Vec<PoaIrradiance>,
    pub effective_irradiance: Vec<f64>,
    pub cell_temperature: Vec<f64>,
    pub dc: DcOutput,
    pub ac: Vec<Option<f64>>,
}
