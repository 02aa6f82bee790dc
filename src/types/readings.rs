//! Typed rows and series handed to the presentation layer.

use crate::types::pollutant::Pollutant;
use chrono::NaiveDateTime;
use serde::Serialize;

/// District-level mean of every field at one timestamp.
///
/// Values are `None` when no location in the district reported the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictReading {
    pub district: String,
    pub aqi: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub dust: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub ozone: Option<f64>,
    pub pm_10: Option<f64>,
    pub pm_25: Option<f64>,
    pub sulphur_dioxide: Option<f64>,
}

impl DistrictReading {
    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Aqi => self.aqi,
            Pollutant::CarbonMonoxide => self.carbon_monoxide,
            Pollutant::Dust => self.dust,
            Pollutant::NitrogenDioxide => self.nitrogen_dioxide,
            Pollutant::Ozone => self.ozone,
            Pollutant::Pm10 => self.pm_10,
            Pollutant::Pm25 => self.pm_25,
            Pollutant::SulphurDioxide => self.sulphur_dioxide,
        }
    }
}

/// One point of a chartable series. Gaps left by resampling are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: NaiveDateTime,
    pub value: Option<f64>,
}

/// A named time series, ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The value at an exact timestamp, if that timestamp is on the series.
    pub fn value_at(&self, time: NaiveDateTime) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.time == time)
            .and_then(|p| p.value)
    }
}

/// Hourly AQI bar, colored by its AQI category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiBar {
    pub time: NaiveDateTime,
    pub aqi: Option<f64>,
    pub color: Option<&'static str>,
}

/// Forecast value of one pollutant with its ±10 % uncertainty band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundsPoint {
    pub time: NaiveDateTime,
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantBounds {
    pub district: String,
    pub pollutant: Pollutant,
    pub points: Vec<BoundsPoint>,
}
