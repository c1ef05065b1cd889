use log::info;
use thiserror::Error;
use crate::config::Config;
use crate::initialization::Mgr;
use crate::manager_pv::errors::PVError;
use crate::manager_pv::prepare::prepare_weather;
use crate::manager_pv::ModelChain;
use crate::manager_weather::errors::WeatherError;
use crate::manager_weather::models::WeatherData;
use crate::manager_wind::errors::WindError;
use crate::presentation::PlotOutcome;

/// Runs the whole feed-in calculation: wind first, then PV, presenting each result
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
pub fn run(config: &Config, mgr: &Mgr) -> Result<Vec<PlotOutcome>, WorkerError> {
    let mut outcomes = Vec::new();

    // Weather data shared by both models
    let mut weather = WeatherData::read_feedinlib_csv(&config.weather.path)?;

    // Wind turbine power output
    let wind_power = mgr.wind.turbine_power_output(&weather, &config.data_height)?;
    outcomes.push(mgr.presentation.show(&wind_power));

    // PV system output, the weather data is reshaped in place for the PV schema
    let location = config.location.location(weather.latitude, weather.longitude);
    let pv_input = prepare_weather(&mut weather, &location)?;

    let mc = ModelChain::new(mgr.pv_system.clone(), location, config.pv_system.orientation_strategy);
    let result = mc.run_model(&pv_input.times, &pv_input.irradiance, &pv_input.weather)?;

    result.log_summary(mc.system());

    let p_mp = result.dc_p_mp()?.fill_missing(0.0);
    let ac = result.ac_power()?;
    info!("pv system mean output {:.1} W dc and {:.1} W ac over {} steps",
        p_mp.mean().unwrap_or(0.0), ac.mean().unwrap_or(0.0), p_mp.len());
    outcomes.push(mgr.presentation.show(&p_mp));

    info!("Done!");

    Ok(outcomes)
}

/// Error depicting errors that occur during a run
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("WeatherError: {0}")]
    WeatherError(#[from] WeatherError),
    #[error("WindError: {0}")]
    WindError(#[from] WindError),
    #[error("PVError: {0}")]
    PVError(#[from] PVError),
}

#[cfg(test)]
mod tests {
    use crate::config::load_config;
    use crate::manager_pv::models::PVSystem;
    use crate::manager_wind::WindTurbine;
    use crate::presentation::{Presentation, NO_BACKEND_NOTICE};
    use super::*;

    fn demo_config() -> Config {
        let mut config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/config.toml")).unwrap();
        config.weather.path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/weather_wittenberg.csv").to_string();
        config
    }

    #[test]
    fn demo_run_without_plot_backend() {
        let config = demo_config();
        let mgr = Mgr {
            wind: WindTurbine::new(&config.turbine).unwrap(),
            pv_system: PVSystem::new(&config.pv_system),
            presentation: Presentation::without_backend(),
        };

        let outcomes = run(&config, &mgr).unwrap();
        assert_eq!(outcomes, vec![
            PlotOutcome::Skipped(NO_BACKEND_NOTICE.to_string()),
            PlotOutcome::Skipped(NO_BACKEND_NOTICE.to_string()),
        ]);
    }

    #[test]
    fn missing_weather_file_fails_the_run() {
        let mut config = demo_config();
        config.weather.path = "/nonexistent/weather.csv".to_string();
        let mgr = Mgr {
            wind: WindTurbine::new(&config.turbine).unwrap(),
            pv_system: PVSystem::new(&config.pv_system),
            presentation: Presentation::without_backend(),
        };

        assert!(matches!(run(&config, &mgr), Err(WorkerError::WeatherError(_))));
    }
}
