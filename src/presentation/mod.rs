#[cfg(feature = "plot")]
pub mod png;

use std::path::PathBuf;
use log::{info, warn};
use thiserror::Error;
use crate::config::Plots;
use crate::models::TimeSeries;

/// Notice logged once per series when no plotting backend is available
pub const NO_BACKEND_NOTICE: &str = "No plots shown. Build with the plot feature to see the plots.";

/// Something that can render a time series as a plot
///
pub trait PlotBackend {
    /// Renders the series and returns where the plot was written
    fn render(&self, series: &TimeSeries) -> Result<PathBuf, PlotError>;
}

/// What happened to a series handed to presentation
///
#[derive(Debug, PartialEq)]
pub enum PlotOutcome {
    Rendered(PathBuf),
    Skipped(String),
    Failed(String),
}

/// Terminal step presenting model output
///
pub struct Presentation {
    backend: Option<Box<dyn PlotBackend>>,
}

impl Presentation {
    /// Returns a Presentation using the PNG backend unless plots are disabled
    ///
    /// # Arguments
    ///
    /// * 'plots' - plot configuration
    #[cfg(feature = "plot")]
    pub fn new(plots: &Plots) -> Presentation {
        if plots.enabled {
            Presentation::with_backend(Box::new(png::PngPlotter::new(plots)))
        } else {
            Presentation::without_backend()
        }
    }

    /// Returns a Presentation without backend, the plot feature is not built in
    ///
    /// # Arguments
    ///
    /// * 'plots' - plot configuration
    #[cfg(not(feature = "plot"))]
    pub fn new(_plots: &Plots) -> Presentation {
        Presentation::without_backend()
    }

    pub fn with_backend(backend: Box<dyn PlotBackend>) -> Presentation {
        Presentation { backend: Some(backend) }
    }

    pub fn without_backend() -> Presentation {
        Presentation { backend: None }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Presents a series, never fails
    ///
    /// Without a backend exactly one warning is logged for the series. Render errors are
    /// logged as warnings as well.
    ///
    /// # Arguments
    ///
    /// * 'series' - the series to present
    pub fn show(&self, series: &TimeSeries) -> PlotOutcome {
        let Some(backend) = &self.backend else {
            warn!("{}", NO_BACKEND_NOTICE);
            return PlotOutcome::Skipped(NO_BACKEND_NOTICE.to_string());
        };

        match backend.render(series) {
            Ok(path) => {
                info!("plot of '{}' written to {}", series.name, path.display());
                PlotOutcome::Rendered(path)
            },
            Err(e) => {
                warn!("plot of '{}' failed: {}", series.name, e);
                PlotOutcome::Failed(e.to_string())
            },
        }
    }
}

/// Error depicting errors that occur while rendering plots
///
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "plot")]
    #[error("ImageError: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("SizeError: {0}")]
    SizeError(String),
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Once;
    use chrono::{TimeDelta, TimeZone, Utc};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use super::*;

    thread_local! {
        static WARNINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts warnings logged on the calling thread
    struct WarnCounter;

    impl Log for WarnCounter {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if record.level() == Level::Warn {
                WARNINGS.with(|w| w.set(w.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static COUNTER: WarnCounter = WarnCounter;
    static INIT: Once = Once::new();

    fn warnings_during(f: impl FnOnce()) -> usize {
        INIT.call_once(|| {
            log::set_logger(&COUNTER).unwrap();
            log::set_max_level(LevelFilter::Warn);
        });
        WARNINGS.with(|w| w.set(0));
        f();
        WARNINGS.with(|w| w.get())
    }

    struct FailingBackend;

    impl PlotBackend for FailingBackend {
        fn render(&self, _series: &TimeSeries) -> Result<PathBuf, PlotError> {
            Err(PlotError::SizeError("too small".into()))
        }
    }

    struct NamingBackend;

    impl PlotBackend for NamingBackend {
        fn render(&self, series: &TimeSeries) -> Result<PathBuf, PlotError> {
            Ok(PathBuf::from(format!("{}.png", series.name)))
        }
    }

    fn series(name: &str) -> TimeSeries {
        let start = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let index = (0..3).map(|i| start + TimeDelta::hours(i)).collect::<Vec<_>>();
        TimeSeries::new(name, "W", &index, &[1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn without_backend_every_series_is_skipped_once() {
        let p = Presentation::without_backend();
        assert!(!p.has_backend());
        let outcomes = [series("wind"), series("pv")].iter().map(|s| p.show(s)).collect::<Vec<_>>();
        assert_eq!(outcomes, vec![
            PlotOutcome::Skipped(NO_BACKEND_NOTICE.to_string()),
            PlotOutcome::Skipped(NO_BACKEND_NOTICE.to_string()),
        ]);
    }

    #[test]
    fn without_backend_one_warning_is_logged_per_series() {
        let p = Presentation::without_backend();
        let count = warnings_during(|| {
            p.show(&series("wind"));
            p.show(&series("pv"));
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn rendered_series_log_no_warning() {
        let p = Presentation::with_backend(Box::new(NamingBackend));
        let mut outcome = None;
        let count = warnings_during(|| outcome = Some(p.show(&series("wind"))));
        assert_eq!(count, 0);
        assert_eq!(outcome, Some(PlotOutcome::Rendered(PathBuf::from("wind.png"))));
    }

    #[test]
    fn render_errors_do_not_propagate() {
        let p = Presentation::with_backend(Box::new(FailingBackend));
        let mut outcome = None;
        let count = warnings_during(|| outcome = Some(p.show(&series("wind"))));
        assert!(matches!(outcome, Some(PlotOutcome::Failed(_))));
        assert_eq!(count, 1);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn plots_can_be_disabled_in_config() {
        let mut plots = Plots { enabled: true, output_dir: "plots".into(), width: 200, height: 120 };
        assert!(Presentation::new(&plots).has_backend());
        plots.enabled = false;
        assert!(!Presentation::new(&plots).has_backend());
    }
}
