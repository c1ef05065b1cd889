use anyhow::Result;
use log::error;
use crate::initialization::init;
use crate::worker::run;

mod config;
mod errors;
mod initialization;
mod location;
mod logging;
mod manager_pv;
mod manager_weather;
mod manager_wind;
mod models;
mod presentation;
mod spline;
mod worker;

fn main() -> Result<()> {
    // Load config and set up logging and managers. If initialization fails we can't even log.
    let (config, mgr) = init()?;

    if let Err(e) = run(&config, &mgr) {
        error!("Run failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
