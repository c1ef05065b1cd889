use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};
use crate::config::Plots;
use crate::models::TimeSeries;
use crate::presentation::{PlotBackend, PlotError};

const MARGIN: u32 = 40;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const ZERO_LINE: Rgb<u8> = Rgb([190, 190, 190]);
const LINE: Rgb<u8> = Rgb([31, 119, 180]);

type Canvas = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Renders series as line plots into PNG files, one file per series
///
pub struct PngPlotter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngPlotter {
    pub fn new(plots: &Plots) -> PngPlotter {
        PngPlotter {
            output_dir: PathBuf::from(&plots.output_dir),
            width: plots.width,
            height: plots.height,
        }
    }

    /// Draws the series onto a new canvas
    fn draw(&self, series: &TimeSeries) -> Canvas {
        let mut img: Canvas = ImageBuffer::from_pixel(self.width, self.height, BACKGROUND);

        let left = MARGIN as i64;
        let right = (self.width - MARGIN) as i64;
        let top = MARGIN as i64;
        let bottom = (self.height - MARGIN) as i64;

        draw_line(&mut img, (left, top), (left, bottom), AXIS);
        draw_line(&mut img, (left, bottom), (right, bottom), AXIS);

        let Some((lo, hi)) = series.value_range() else {
            return img;
        };
        // Always show zero, and give a flat series some height
        let lo = lo.min(0.0);
        let hi = if hi > lo { hi.max(0.0) } else { lo + 1.0 };

        let n = series.len();
        let x_of = |i: usize| -> i64 {
            if n < 2 { left } else { left + ((right - left) as f64 * i as f64 / (n - 1) as f64).round() as i64 }
        };
        let y_of = |v: f64| -> i64 {
            bottom - ((bottom - top) as f64 * (v - lo) / (hi - lo)).round() as i64
        };

        if lo < 0.0 {
            draw_line(&mut img, (left, y_of(0.0)), (right, y_of(0.0)), ZERO_LINE);
        }

        let mut previous: Option<(i64, i64)> = None;
        for (i, tv) in series.data.iter().enumerate() {
            if !tv.data.is_finite() {
                previous = None;
                continue;
            }
            let point = (x_of(i), y_of(tv.data));
            match previous {
                Some(p) => draw_line(&mut img, p, point, LINE),
                None => put(&mut img, point, LINE),
            }
            previous = Some(point);
        }

        img
    }
}

impl PlotBackend for PngPlotter {
    fn render(&self, series: &TimeSeries) -> Result<PathBuf, PlotError> {
        if self.width <= 2 * MARGIN || self.height <= 2 * MARGIN {
            return Err(PlotError::SizeError(format!("{}x{} leaves no room for the plot area", self.width, self.height)));
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.png", file_stem(&series.name)));

        let img = self.draw(series);

        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        let encoder = PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
        encoder.write_image(
            img.as_raw(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(path)
    }
}

/// Turns a series name into a file name friendly stem
fn file_stem(name: &str) -> String {
    let stem = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect::<String>();
    let stem = stem.trim_matches('_').to_string();

    if stem.is_empty() { "series".to_string() } else { stem }
}

fn put(img: &mut Canvas, (x, y): (i64, i64), color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two points, clipped to the canvas
fn draw_line(img: &mut Canvas, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, (x, y), color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use tempfile::tempdir;
    use super::*;

    fn plotter(dir: &std::path::Path, width: u32, height: u32) -> PngPlotter {
        PngPlotter::new(&Plots { enabled: true, output_dir: dir.to_string_lossy().to_string(), width, height })
    }

    fn series(values: &[f64]) -> TimeSeries {
        let start = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let index = (0..values.len()).map(|i| start + TimeDelta::hours(i as i64)).collect::<Vec<_>>();
        TimeSeries::new("ENERCON E 126 7500 power output", "W", &index, values).unwrap()
    }

    #[test]
    fn renders_png_file() {
        let dir = tempdir().unwrap();
        let path = plotter(dir.path(), 200, 120).render(&series(&[0.0, 5.0, f64::NAN, 3.0, -1.0])).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "enercon_e_126_7500_power_output.png");
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn draws_series_within_plot_area() {
        let dir = tempdir().unwrap();
        let img = plotter(dir.path(), 200, 120).draw(&series(&[0.0, 10.0]));
        // first point at the lower left corner, last at the upper right corner
        assert_eq!(*img.get_pixel(40, 80), LINE);
        assert_eq!(*img.get_pixel(160, 40), LINE);
        assert_eq!(*img.get_pixel(100, 100), BACKGROUND);
    }

    #[test]
    fn empty_and_flat_series_render() {
        let dir = tempdir().unwrap();
        let p = plotter(dir.path(), 200, 120);
        assert!(p.render(&series(&[])).is_ok());
        assert!(p.render(&series(&[f64::NAN])).is_ok());
        assert!(p.render(&series(&[2.0, 2.0, 2.0])).is_ok());
    }

    #[test]
    fn too_small_canvas_fails() {
        let dir = tempdir().unwrap();
        assert!(matches!(plotter(dir.path(), 60, 60).render(&series(&[1.0])), Err(PlotError::SizeError(_))));
    }

    #[test]
    fn file_stems() {
        assert_eq!(file_stem("dc p_mp"), "dc_p_mp");
        assert_eq!(file_stem("%%"), "series");
    }
}
