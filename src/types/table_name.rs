//! Defines the logical names of the flat tables the dashboard reads, with the
//! schema each one must satisfy after loading.

use crate::types::columns::{AQI, DISTRICT, LOCATION_ID, VALUE_COLUMNS};
use serde::Serialize;
use std::fmt;

/// A flat table refreshed out-of-band by the forecasting job.
///
/// The file name and required columns are the contract with that job; the
/// byte format is an implementation detail of the [`crate::TableSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableName {
    /// Hourly per-location forecast of every pollutant.
    ForecastPollutant,
    /// Hourly per-location readings from the previous year.
    LastYearPollutant,
    /// Daily AQI as forecast 7 days ahead.
    AqiLag7,
    /// Daily AQI as forecast 14 days ahead.
    AqiLag14,
    /// Daily AQI as forecast 30 days ahead.
    AqiLag30,
    /// Observed historical AQI.
    ReadyHistorical,
    /// Long-range (60 day) AQI forecast.
    AqiForecast,
}

impl TableName {
    pub const ALL: [TableName; 7] = [
        TableName::ForecastPollutant,
        TableName::LastYearPollutant,
        TableName::AqiLag7,
        TableName::AqiLag14,
        TableName::AqiLag30,
        TableName::ReadyHistorical,
        TableName::AqiForecast,
    ];

    /// File name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableName::ForecastPollutant => "forecasted_pollutant.csv",
            TableName::LastYearPollutant => "last_year_pollutant.csv",
            TableName::AqiLag7 => "aqi_7_days_lag.csv",
            TableName::AqiLag14 => "aqi_14_days_lag.csv",
            TableName::AqiLag30 => "aqi_30_days_lag.csv",
            TableName::ReadyHistorical => "ready_historical.csv",
            TableName::AqiForecast => "aqi_forecast.csv",
        }
    }

    /// Columns that must exist besides the timestamp index.
    pub(crate) fn required_columns(&self) -> Vec<&'static str> {
        match self {
            TableName::ForecastPollutant => {
                let mut columns = vec![DISTRICT];
                columns.extend(VALUE_COLUMNS);
                columns.push(LOCATION_ID);
                columns
            }
            TableName::LastYearPollutant => {
                let mut columns = vec![DISTRICT];
                columns.extend(VALUE_COLUMNS);
                columns
            }
            TableName::AqiLag7
            | TableName::AqiLag14
            | TableName::AqiLag30
            | TableName::ReadyHistorical
            | TableName::AqiForecast => vec![DISTRICT, AQI],
        }
    }

    /// Lag in days for the lag tables.
    pub fn lag_days(&self) -> Option<i64> {
        match self {
            TableName::AqiLag7 => Some(7),
            TableName::AqiLag14 => Some(14),
            TableName::AqiLag30 => Some(30),
            _ => None,
        }
    }

    /// The lag table forecasting `days` ahead, if there is one.
    pub fn for_lag_days(days: i64) -> Option<TableName> {
        TableName::ALL
            .into_iter()
            .find(|table| table.lag_days() == Some(days))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
