use chrono::{DateTime, Utc};
use crate::errors::TimeSeriesError;

#[derive(Clone, Debug, PartialEq)]
pub struct TimeValue {
    pub valid_time: DateTime<Utc>,
    pub data: f64
}

/// A named, time indexed series of model output
///
/// Missing values are kept as NaN until `fill_missing` is called.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    pub name: String,
    pub unit: String,
    pub data: Vec<TimeValue>,
}

impl TimeSeries {
    /// Creates a new TimeSeries by pairing index and values
    ///
    /// # Arguments
    ///
    /// * 'name' - name of the series, used as plot title
    /// * 'unit' - unit of the values
    /// * 'index' - time index
    /// * 'values' - one value per index entry
    pub fn new(name: &str, unit: &str, index: &[DateTime<Utc>], values: &[f64]) -> Result<TimeSeries, TimeSeriesError> {
        if index.len() != values.len() {
            return Err(TimeSeriesError::UnequalLengths(index.len(), values.len()));
        }

        let data = index.iter()
            .zip(values)
            .map(|(t, v)| TimeValue { valid_time: *t, data: *v })
            .collect::<Vec<TimeValue>>();

        Ok(TimeSeries { name: name.to_string(), unit: unit.to_string(), data })
    }

    /// Creates a new TimeSeries where None values are recorded as missing (NaN)
    ///
    /// # Arguments
    ///
    /// * 'name' - name of the series, used as plot title
    /// * 'unit' - unit of the values
    /// * 'index' - time index
    /// * 'values' - one optional value per index entry
    pub fn from_options(name: &str, unit: &str, index: &[DateTime<Utc>], values: &[Option<f64>]) -> Result<TimeSeries, TimeSeriesError> {
        let values = values.iter().map(|v| v.unwrap_or(f64::NAN)).collect::<Vec<f64>>();
        TimeSeries::new(name, unit, index, &values)
    }

    /// Returns a copy where every missing (non-finite) value is replaced
    ///
    /// # Arguments
    ///
    /// * 'fill' - value to use instead of missing values
    pub fn fill_missing(&self, fill: f64) -> TimeSeries {
        let data = self.data.iter()
            .map(|tv| TimeValue {
                valid_time: tv.valid_time,
                data: if tv.data.is_finite() { tv.data } else { fill },
            })
            .collect::<Vec<TimeValue>>();

        TimeSeries { name: self.name.clone(), unit: self.unit.clone(), data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns min and max over finite values, or None if there are none
    ///
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data.iter()
            .map(|tv| tv.data)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Returns the sum of all finite values
    ///
    pub fn total(&self) -> f64 {
        self.data.iter().map(|tv| tv.data).filter(|v| v.is_finite()).sum()
    }

    /// Mean over all points in time with missing values counted as zero, None if empty
    ///
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        Some(self.total() / self.len() as f64)
    }
}
