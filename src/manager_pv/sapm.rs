use crate::manager_pv::models::{DcPoint, InverterParameters, ModuleParameters, PoaIrradiance, TemperatureModelParameters};

/// Elementary charge in C
const Q: f64 = 1.60218e-19;

/// Boltzmann constant in J/K
const K_B: f64 = 1.38066e-23;

/// Reference conditions of the module parameters
const TEMP_REF: f64 = 25.0;
const IRRAD_REF: f64 = 1000.0;

/// Sea level pressure in Pa
const PRESSURE_REF: f64 = 101325.0;

/// Plane of array irradiance with an isotropic sky and a uniformly reflecting ground
///
/// A NaN beam stays NaN, any other negative beam projection is clipped to zero.
///
/// # Arguments
///
/// * 'surface_tilt' - surface tilt in degrees
/// * 'aoi' - angle of incidence in degrees
/// * 'dni' - direct normal irradiance in W/m²
/// * 'ghi' - global horizontal irradiance in W/m²
/// * 'dhi' - diffuse horizontal irradiance in W/m²
/// * 'albedo' - ground reflectance
pub fn poa_isotropic(surface_tilt: f64, aoi: f64, dni: f64, ghi: f64, dhi: f64, albedo: f64) -> PoaIrradiance {
    let cos_tilt = surface_tilt.to_radians().cos();

    let beam = dni * aoi.to_radians().cos();
    let poa_direct = if beam.is_nan() { f64::NAN } else { beam.max(0.0) };
    let poa_sky_diffuse = dhi * (1.0 + cos_tilt) / 2.0;
    let poa_ground_diffuse = ghi * albedo * (1.0 - cos_tilt) / 2.0;
    let poa_diffuse = poa_sky_diffuse + poa_ground_diffuse;

    PoaIrradiance {
        poa_global: poa_direct + poa_diffuse,
        poa_direct,
        poa_diffuse,
        poa_sky_diffuse,
        poa_ground_diffuse,
    }
}

/// Relative air mass after Kasten and Young (1989), NaN with the sun below the horizon
///
/// # Arguments
///
/// * 'zenith' - solar zenith in degrees
pub fn relative_airmass(zenith: f64) -> f64 {
    if !(zenith <= 90.0) {
        return f64::NAN;
    }

    1.0 / (zenith.to_radians().cos() + 0.50572 * (96.07995 - zenith).powf(-1.6364))
}

/// Pressure corrected air mass
///
/// # Arguments
///
/// * 'airmass_relative' - relative air mass
/// * 'pressure' - site pressure in Pa
pub fn absolute_airmass(airmass_relative: f64, pressure: f64) -> f64 {
    airmass_relative * pressure / PRESSURE_REF
}

/// Irradiance in W/m² reaching the cells after spectral and reflection losses
///
/// # Arguments
///
/// * 'poa_direct' - direct plane of array irradiance in W/m²
/// * 'poa_diffuse' - diffuse plane of array irradiance in W/m²
/// * 'airmass_absolute' - absolute air mass
/// * 'aoi' - angle of incidence in degrees
/// * 'module' - module parameters
pub fn effective_irradiance(poa_direct: f64, poa_diffuse: f64, airmass_absolute: f64, aoi: f64, module: &ModuleParameters) -> f64 {
    let f1 = polyval(&module.a, airmass_absolute).max(0.0);
    let f2 = if aoi >= 90.0 { 0.0 } else { polyval(&module.b, aoi).max(0.0) };

    f1 * (poa_direct * f2 + module.fd * poa_diffuse)
}

/// Cell temperature in °C by the Sandia array temperature model
///
/// # Arguments
///
/// * 'poa_global' - plane of array irradiance in W/m²
/// * 'temp_air' - ambient temperature in °C
/// * 'wind_speed' - wind speed in m/s
/// * 'params' - temperature model parameters
pub fn cell_temperature(poa_global: f64, temp_air: f64, wind_speed: f64, params: &TemperatureModelParameters) -> f64 {
    let module_temperature = poa_global * (params.a + params.b * wind_speed).exp() + temp_air;

    module_temperature + poa_global / IRRAD_REF * params.delta_t
}

/// Module operating point by the Sandia PV Array Performance Model
///
/// Returns None when there is no effective irradiance or the result is not finite.
///
/// # Arguments
///
/// * 'effective_irradiance' - irradiance reaching the cells in W/m²
/// * 'temp_cell' - cell temperature in °C
/// * 'module' - module parameters
pub fn sapm(effective_irradiance: f64, temp_cell: f64, module: &ModuleParameters) -> Option<DcPoint> {
    if !(effective_irradiance > 0.0) || !temp_cell.is_finite() {
        return None;
    }

    let ee = effective_irradiance / IRRAD_REF;
    let dt = temp_cell - TEMP_REF;
    let ns = module.cells_in_series as f64;
    let delta = module.n * K_B * (temp_cell + 273.15) / Q;
    let log_ee = ee.ln();

    let bvmpo = module.bvmpo + module.mbvmp * (1.0 - ee);
    let bvoco = module.bvoco + module.mbvoc * (1.0 - ee);

    let i_sc = module.isco * ee * (1.0 + module.aisc * dt);
    let i_mp = module.impo * (module.c0 * ee + module.c1 * ee * ee) * (1.0 + module.aimp * dt);
    let v_oc = (module.voco + ns * delta * log_ee + bvoco * dt).max(0.0);
    let v_mp = (module.vmpo
        + module.c2 * ns * delta * log_ee
        + module.c3 * ns * (delta * log_ee).powi(2)
        + bvmpo * dt).max(0.0);

    let point = DcPoint { i_sc, v_oc, i_mp, v_mp, p_mp: i_mp * v_mp };
    if point.p_mp.is_finite() { Some(point) } else { None }
}

/// AC output in W by the Sandia inverter model
///
/// Output is capped at the rated AC power; below the start up power the inverter draws
/// its night tare.
///
/// # Arguments
///
/// * 'v_dc' - DC voltage in V
/// * 'p_dc' - DC power in W
/// * 'inverter' - inverter parameters
pub fn snl_inverter(v_dc: f64, p_dc: f64, inverter: &InverterParameters) -> f64 {
    let dv = v_dc - inverter.vdco;
    let a = inverter.pdco * (1.0 + inverter.c1 * dv);
    let b = inverter.pso * (1.0 + inverter.c2 * dv);
    let c = inverter.c0 * (1.0 + inverter.c3 * dv);

    if p_dc < inverter.pso {
        return -inverter.pnt.abs();
    }

    let ac = (inverter.paco / (a - b) - c * (a - b)) * (p_dc - b) + c * (p_dc - b).powi(2);

    ac.min(inverter.paco)
}

/// Evaluates a polynomial given its coefficients, constant term first
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn module() -> ModuleParameters {
        ModuleParameters {
            name: "Yingli YL210 (2008)".into(),
            area: 1.7,
            cells_in_series: 54,
            isco: 8.4,
            voco: 33.1,
            impo: 7.8,
            vmpo: 27.1,
            aisc: 0.0005,
            aimp: -0.0001,
            bvoco: -0.12,
            mbvoc: 0.0,
            bvmpo: -0.12,
            mbvmp: 0.0,
            n: 1.3,
            c0: 1.0004,
            c1: -0.0004,
            c2: 0.5,
            c3: -5.0,
            a: [0.9282, 0.06, -0.0098, 0.0006, -0.00001],
            b: [1.0, -0.002438, 0.0003103, -1.246e-05, 2.112e-07, -1.359e-09],
            fd: 1.0,
        }
    }

    pub(crate) fn inverter() -> InverterParameters {
        InverterParameters {
            name: "ABB MICRO 0.25 208V".into(),
            paco: 250.0,
            pdco: 259.5,
            vdco: 40.0,
            pso: 1.77,
            c0: -2.48e-5,
            c1: -9.01e-5,
            c2: 6.69e-4,
            c3: -0.0189,
            pnt: 0.02,
        }
    }

    #[test]
    fn poa_on_horizontal_surface() {
        let poa = poa_isotropic(0.0, 30.0, 800.0, 800.0, 100.0, 0.2);
        assert!((poa.poa_direct - 800.0 * 30f64.to_radians().cos()).abs() < 1e-9);
        assert!((poa.poa_sky_diffuse - 100.0).abs() < 1e-12);
        assert!(poa.poa_ground_diffuse.abs() < 1e-12);
        assert!((poa.poa_global - poa.poa_direct - poa.poa_diffuse).abs() < 1e-12);
    }

    #[test]
    fn poa_beam_from_behind_is_clipped_but_nan_stays() {
        let poa = poa_isotropic(60.0, 120.0, 500.0, 300.0, 100.0, 0.2);
        assert_eq!(poa.poa_direct, 0.0);
        assert!((poa.poa_ground_diffuse - 300.0 * 0.2 * 0.25).abs() < 1e-9);

        let poa = poa_isotropic(60.0, 120.0, f64::INFINITY, 300.0, 100.0, 0.2);
        assert_eq!(poa.poa_direct, 0.0);

        let poa = poa_isotropic(60.0, 30.0, f64::NAN, 300.0, 100.0, 0.2);
        assert!(poa.poa_direct.is_nan());
        assert!(poa.poa_global.is_nan());
    }

    #[test]
    fn airmass_values() {
        assert!((relative_airmass(0.0) - 1.0).abs() < 0.01);
        assert!((relative_airmass(60.0) - 2.0).abs() < 0.01);
        assert!(relative_airmass(95.0).is_nan());
        assert!(relative_airmass(f64::NAN).is_nan());
        assert!((absolute_airmass(2.0, 50662.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn effective_irradiance_at_reference() {
        let m = module();
        let ee = effective_irradiance(1000.0, 0.0, 1.5, 0.0, &m);
        let f1 = 0.9282 + 0.06 * 1.5 - 0.0098 * 2.25 + 0.0006 * 3.375 - 0.00001 * 5.0625;
        assert!((ee - 1000.0 * f1).abs() < 1e-9);
        assert_eq!(effective_irradiance(1000.0, 0.0, 1.5, 95.0, &m), 0.0);
    }

    #[test]
    fn cell_temperature_rises_with_irradiance() {
        let p = TemperatureModelParameters::default();
        assert_eq!(cell_temperature(0.0, 10.0, 2.0, &p), 10.0);
        let hot = cell_temperature(1000.0, 25.0, 1.0, &p);
        let windy = cell_temperature(1000.0, 25.0, 10.0, &p);
        assert!(hot > 45.0 && hot < 70.0, "{}", hot);
        assert!(windy < hot);
    }

    #[test]
    fn sapm_at_reference_conditions() {
        let m = module();
        let dc = sapm(1000.0, 25.0, &m).unwrap();
        assert!((dc.i_mp - 7.8).abs() < 1e-9);
        assert!((dc.v_mp - 27.1).abs() < 1e-9);
        assert!((dc.p_mp - 7.8 * 27.1).abs() < 1e-6);
        assert!((dc.i_sc - 8.4).abs() < 1e-9);
        assert!((dc.v_oc - 33.1).abs() < 1e-9);
    }

    #[test]
    fn sapm_without_irradiance_is_missing() {
        let m = module();
        assert_eq!(sapm(0.0, 25.0, &m), None);
        assert_eq!(sapm(f64::NAN, 25.0, &m), None);
        assert_eq!(sapm(500.0, f64::NAN, &m), None);
        let low = sapm(200.0, 25.0, &m).unwrap();
        assert!(low.p_mp > 0.0 && low.p_mp < 0.25 * 7.8 * 27.1);
    }

    #[test]
    fn inverter_caps_and_tares() {
        let inv = inverter();
        assert_eq!(snl_inverter(30.0, 1.0, &inv), -0.02);
        assert_eq!(snl_inverter(40.0, 400.0, &inv), 250.0);
        let ac = snl_inverter(40.0, 200.0, &inv);
        assert!(ac > 180.0 && ac < 200.0, "{}", ac);
    }

    #[test]
    fn polynomial_evaluation() {
        assert_eq!(polyval(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(polyval(&[], 2.0), 0.0);
    }
}
