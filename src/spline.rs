use crate::errors::SplineError;

/// Struct for making a Monotonic Cube Spline interpolation
///
pub struct MonotonicCubicSpline {
    m_x: Vec<f64>,
    m_y: Vec<f64>,
    m_m: Vec<f64>
}

impl MonotonicCubicSpline {
    /// Returns a new instance with prepared slopes
    ///
    /// # Argument
    /// * 'x' - control point x:es, strictly increasing
    /// * 'y' - control point y:s
    pub fn new(x: &[f64], y: &[f64]) -> Result<MonotonicCubicSpline, SplineError> {
        if x.len() != y.len() || x.len() < 2 {
            return Err(SplineError::IllegalLength);
        }

        let n = x.len();

        let mut secants = vec![0.0; n - 1];
        let mut slopes = vec![0.0; n];

        for i in 0..(n - 1) {
            let h = x[i + 1] - x[i];
            if h <= 0.0 || h.is_nan() {
                return Err(SplineError::ControlPoint);
            }
            secants[i] = (y[i + 1] - y[i]) / h;
        }

        slopes[0] = secants[0];
        for i in 1..(n - 1) {
            slopes[i] = (secants[i - 1] + secants[i]) * 0.5;
        }
        slopes[n - 1] = secants[n - 2];

        // Fritsch-Carlson limiter keeps every segment monotonic
        for i in 0..(n - 1) {
            if secants[i] == 0.0 {
                slopes[i] = 0.0;
                slopes[i + 1] = 0.0;
            } else {
                let alpha = slopes[i] / secants[i];
                let beta = slopes[i + 1] / secants[i];
                let h = alpha.hypot(beta);
                if h > 9.0 {
                    let t = 3.0 / h;
                    slopes[i] = t * alpha * secants[i];
                    slopes[i + 1] = t * beta * secants[i];
                }
            }
        }

        Ok(MonotonicCubicSpline {
            m_x: x.to_vec(),
            m_y: y.to_vec(),
            m_m: slopes,
        })
    }

    /// Returns the x range covered by the control points
    ///
    pub fn domain(&self) -> (f64, f64) {
        (self.m_x[0], self.m_x[self.m_x.len() - 1])
    }

    fn hermite(point: f64, x: (f64, f64), y: (f64, f64), m: (f64, f64)) -> f64 {
        let h: f64 = x.1 - x.0;
        let t = (point - x.0) / h;
        (y.0 * (1.0 + 2.0 * t) + h * m.0 * t) * (1.0 - t) * (1.0 - t)
            + (y.1 * (3.0 - 2.0 * t) + h * m.1 * (t - 1.0)) * t * t
    }

    /// Interpolates a y for the given point.
    /// Points outside the control points get the nearest end value.
    ///
    /// # Arguments
    ///
    /// * 'point' - x to get an interpolated y for
    pub fn interpolate(&self, point: f64) -> f64 {
        let n = self.m_x.len();

        if point.is_nan() {
            return f64::NAN;
        }
        if point <= self.m_x[0] {
            return self.m_y[0];
        }
        if point >= self.m_x[n - 1] {
            return self.m_y[n - 1];
        }

        // Index of the last control point not greater than point
        let i = self.m_x.partition_point(|x| *x <= point) - 1;
        if point == self.m_x[i] {
            return self.m_y[i];
        }

        MonotonicCubicSpline::hermite(
            point,
            (self.m_x[i], self.m_x[i + 1]),
            (self.m_y[i], self.m_y[i + 1]),
            (self.m_m[i], self.m_m[i + 1]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_unordered_control_points() {
        assert!(matches!(MonotonicCubicSpline::new(&[1.0], &[1.0]), Err(SplineError::IllegalLength)));
        assert!(matches!(MonotonicCubicSpline::new(&[1.0, 2.0], &[1.0]), Err(SplineError::IllegalLength)));
        assert!(matches!(MonotonicCubicSpline::new(&[2.0, 1.0], &[1.0, 2.0]), Err(SplineError::ControlPoint)));
    }

    #[test]
    fn hits_control_points_and_clamps_outside() {
        let s = MonotonicCubicSpline::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
        assert_eq!(s.interpolate(-1.0), 0.0);
        assert_eq!(s.interpolate(1.0), 1.0);
        assert_eq!(s.interpolate(2.0), 4.0);
        assert_eq!(s.interpolate(5.0), 9.0);
        assert_eq!(s.domain(), (0.0, 3.0));
        assert!(s.interpolate(f64::NAN).is_nan());
    }

    #[test]
    fn stays_monotonic_between_points() {
        let x = [0.0, 3.0, 4.0, 10.0, 12.0];
        let y = [0.0, 100.0, 900.0, 1000.0, 1000.0];
        let s = MonotonicCubicSpline::new(&x, &y).unwrap();
        let mut previous = s.interpolate(0.0);
        for i in 1..=120 {
            let v = s.interpolate(i as f64 * 0.1);
            assert!(v >= previous - 1e-9, "not monotonic at {}", i as f64 * 0.1);
            previous = v;
        }
    }
}
