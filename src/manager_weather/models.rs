use chrono::{DateTime, Utc};
use crate::manager_weather::errors::WeatherError;

/// Time indexed weather table with site coordinates
///
/// Columns keep their insertion order. All columns have one value per index entry.
#[derive(Clone, Debug)]
pub struct WeatherData {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub index: Vec<DateTime<Utc>>,
    columns: Vec<(String, Vec<f64>)>,
}

impl WeatherData {
    /// Returns a new, column less, WeatherData
    ///
    /// # Arguments
    ///
    /// * 'latitude' - site latitude in degrees
    /// * 'longitude' - site longitude in degrees
    /// * 'index' - the time index
    pub fn new(latitude: f64, longitude: f64, index: Vec<DateTime<Utc>>) -> WeatherData {
        WeatherData { latitude, longitude, timezone: None, index, columns: Vec::new() }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Returns the values of a column
    ///
    /// # Arguments
    ///
    /// * 'name' - column name
    pub fn column(&self, name: &str) -> Result<&[f64], WeatherError> {
        self.columns.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| WeatherError::MissingColumn(name.to_string()))
    }

    /// Sets a column, replacing it in place if it exists or appending it otherwise
    ///
    /// # Arguments
    ///
    /// * 'name' - column name
    /// * 'values' - one value per index entry
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), WeatherError> {
        if values.len() != self.index.len() {
            return Err(WeatherError::UnequalLengths(name.to_string(), values.len(), self.index.len()));
        }

        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = values,
            None => self.columns.push((name.to_string(), values)),
        }

        Ok(())
    }

    /// Renames a column, keeping its position and all other columns untouched
    ///
    /// # Arguments
    ///
    /// * 'from' - current column name
    /// * 'to' - new column name, must not already exist
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), WeatherError> {
        if from == to {
            return self.column(from).map(|_| ());
        }
        if self.has_column(to) {
            return Err(WeatherError::DuplicateColumn(to.to_string()));
        }

        let (name, _) = self.columns.iter_mut()
            .find(|(n, _)| n == from)
            .ok_or_else(|| WeatherError::MissingColumn(from.to_string()))?;
        *name = to.to_string();

        Ok(())
    }

    /// Applies a function to every value of a column in place
    ///
    /// # Arguments
    ///
    /// * 'name' - column name
    /// * 'f' - function to apply
    pub fn map_column(&mut self, name: &str, f: impl Fn(f64) -> f64) -> Result<(), WeatherError> {
        let (_, values) = self.columns.iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| WeatherError::MissingColumn(name.to_string()))?;
        values.iter_mut().for_each(|v| *v = f(*v));

        Ok(())
    }

    /// Returns a new WeatherData holding only the given columns, in the given order
    ///
    /// # Arguments
    ///
    /// * 'names' - columns to keep
    pub fn select(&self, names: &[&str]) -> Result<WeatherData, WeatherError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push((name.to_string(), self.column(name)?.to_vec()));
        }

        Ok(WeatherData {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            index: self.index.clone(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use super::*;

    fn weather() -> WeatherData {
        let start = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let index = (0..3).map(|i| start + TimeDelta::hours(i)).collect();
        let mut w = WeatherData::new(51.87, 12.65, index);
        w.set_column("dhi", vec![0.0, 10.0, 20.0]).unwrap();
        w.set_column("v_wind", vec![3.0, 4.0, 5.0]).unwrap();
        w.set_column("temp_air", vec![270.0, 271.0, 272.0]).unwrap();
        w
    }

    #[test]
    fn rename_keeps_position_and_other_columns() {
        let mut w = weather();
        w.rename_column("v_wind", "wind_speed").unwrap();
        assert_eq!(w.column_names(), vec!["dhi", "wind_speed", "temp_air"]);
        assert_eq!(w.column("wind_speed").unwrap(), &[3.0, 4.0, 5.0]);
        assert!(matches!(w.column("v_wind"), Err(WeatherError::MissingColumn(_))));
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let mut w = weather();
        assert!(matches!(w.rename_column("v_wind", "dhi"), Err(WeatherError::DuplicateColumn(_))));
        assert!(matches!(w.rename_column("nope", "x"), Err(WeatherError::MissingColumn(_))));
        assert_eq!(w.column_names(), vec!["dhi", "v_wind", "temp_air"]);
    }

    #[test]
    fn set_column_checks_length() {
        let mut w = weather();
        assert!(matches!(w.set_column("ghi", vec![1.0]), Err(WeatherError::UnequalLengths(_, 1, 3))));
        w.set_column("dhi", vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(w.column_names(), vec!["dhi", "v_wind", "temp_air"]);
    }

    #[test]
    fn select_copies_requested_columns() {
        let w = weather();
        let s = w.select(&["temp_air", "dhi"]).unwrap();
        assert_eq!(s.column_names(), vec!["temp_air", "dhi"]);
        assert_eq!(s.len(), 3);
        assert!(w.select(&["ghi"]).is_err());
    }
}
