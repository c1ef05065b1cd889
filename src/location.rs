use chrono::{DateTime, Utc};
use spa_sra::errors::SpaError;
use spa_sra::spa::{Function, Input, SpaData};
use thiserror::Error;

/// Air temperature assumed by the solar position algorithm when none is given (°C)
const SPA_TEMPERATURE: f64 = 12.0;

/// A site for which solar positions are calculated
///
#[derive(Clone, Debug)]
pub struct Location {
    pub name: String,
    pub altitude: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Solar position at one point in time, all angles in degrees
///
/// `zenith` is the true topocentric zenith, `apparent_zenith` and `elevation` include
/// atmospheric refraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarPosition {
    pub zenith: f64,
    pub apparent_zenith: f64,
    pub azimuth: f64,
    pub elevation: f64,
}

/// Angle of incidence on a tilted surface together with the solar position
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePosition {
    pub solar: SolarPosition,
    pub aoi: f64,
}

impl Location {
    /// Returns a new Location
    ///
    /// # Arguments
    ///
    /// * 'name' - name of the site
    /// * 'altitude' - altitude above sea level in metres
    /// * 'latitude' - latitude in degrees, north positive
    /// * 'longitude' - longitude in degrees, east positive
    pub fn new(name: &str, altitude: f64, latitude: f64, longitude: f64) -> Location {
        Location { name: name.to_string(), altitude, latitude, longitude }
    }

    /// Returns the standard atmosphere pressure at the site altitude in Pa
    ///
    pub fn pressure(&self) -> f64 {
        alt2pres(self.altitude)
    }

    /// Returns solar positions for the given points in time
    ///
    /// # Arguments
    ///
    /// * 'times' - points in time to calculate for
    pub fn get_solar_position(&self, times: &[DateTime<Utc>]) -> Result<Vec<SolarPosition>, SolarPositionError> {
        let positions = self.surface_positions(times, 0.0, 180.0)?;

        Ok(positions.into_iter().map(|p| p.solar).collect())
    }

    /// Returns solar positions and the angle of incidence on a surface
    ///
    /// # Arguments
    ///
    /// * 'times' - points in time to calculate for
    /// * 'surface_tilt' - surface tilt from horizontal in degrees
    /// * 'surface_azimuth' - surface azimuth in degrees, north = 0, south = 180
    pub fn get_surface_position(&self, times: &[DateTime<Utc>], surface_tilt: f64, surface_azimuth: f64) -> Result<Vec<SurfacePosition>, SolarPositionError> {
        self.surface_positions(times, surface_tilt, surface_azimuth)
    }

    fn surface_positions(&self, times: &[DateTime<Utc>], surface_tilt: f64, surface_azimuth: f64) -> Result<Vec<SurfacePosition>, SolarPositionError> {
        let Some(first) = times.first() else {
            return Ok(Vec::new());
        };

        let mut input = Input::from_date_time(*first);
        input.latitude = self.latitude;
        input.longitude = self.longitude;
        input.pressure = self.pressure() / 100.0;
        input.temperature = SPA_TEMPERATURE;
        input.elevation = self.altitude;
        input.slope = surface_tilt;
        // The algorithm measures surface rotation from south, negative towards east
        input.azm_rotation = surface_azimuth - 180.0;
        input.function = Function::SpaZaInc;

        let mut spa = SpaData::new(input);
        let mut result = Vec::with_capacity(times.len());

        for toi in times {
            spa.input.date_time(*toi);
            spa.spa_calculate()?;

            result.push(SurfacePosition {
                solar: SolarPosition {
                    zenith: 90.0 - spa.spa_za.e0,
                    apparent_zenith: spa.spa_za.zenith,
                    azimuth: spa.spa_za.azimuth,
                    elevation: spa.spa_za.e,
                },
                aoi: spa.spa_za_inc.incidence,
            });
        }

        Ok(result)
    }
}

/// Standard atmosphere pressure in Pa at the given altitude in metres
///
/// # Arguments
///
/// * 'altitude' - altitude above sea level in metres
pub fn alt2pres(altitude: f64) -> f64 {
    100.0 * ((44331.514 - altitude) / 11880.516).powf(1.0 / 0.1902632)
}

/// Error depicting errors that occur while calculating solar positions
///
#[derive(Debug, Error)]
pub enum SolarPositionError {
    #[error("SolarPositionsError: {0}")]
    SolarPositionsError(#[from] SpaError),
}
