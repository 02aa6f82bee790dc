use crate::types::columns::{is_value_column, DATE, DISTRICT};
use crate::types::pollutant::Pollutant;
use crate::types::readings::{BoundsPoint, DistrictReading, SeriesPoint, TimeSeries};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

pub(crate) fn naive_from_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|d| d.naive_utc())
}

pub(crate) fn millis_from_naive(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp_millis()
}

/// Timestamps of the `date` column. Rows with a null timestamp map to `None`.
fn times(df: &DataFrame) -> PolarsResult<Vec<Option<NaiveDateTime>>> {
    Ok(df
        .column(DATE)?
        .datetime()?
        .into_iter()
        .map(|ms| ms.and_then(naive_from_millis))
        .collect())
}

/// Values of a float column, or all `None` when the table lacks the column.
fn opt_floats(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    match df.column(column) {
        Ok(values) => Ok(values.f64()?.into_iter().collect()),
        Err(_) => Ok(vec![None; df.height()]),
    }
}

/// One [`DistrictReading`] per row of a frame with a `District` column.
pub(crate) fn extract_readings(df: &DataFrame) -> PolarsResult<Vec<DistrictReading>> {
    let districts = df.column(DISTRICT)?.str()?;
    let mut fields: Vec<Vec<Option<f64>>> = Vec::with_capacity(Pollutant::ALL.len());
    for pollutant in [
        Pollutant::Aqi,
        Pollutant::CarbonMonoxide,
        Pollutant::Dust,
        Pollutant::NitrogenDioxide,
        Pollutant::Ozone,
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::SulphurDioxide,
    ] {
        fields.push(opt_floats(df, pollutant.column_name())?);
    }

    Ok(districts
        .into_iter()
        .enumerate()
        .filter_map(|(i, district)| {
            district.map(|district| DistrictReading {
                district: district.to_string(),
                aqi: fields[0][i],
                carbon_monoxide: fields[1][i],
                dust: fields[2][i],
                nitrogen_dioxide: fields[3][i],
                ozone: fields[4][i],
                pm_10: fields[5][i],
                pm_25: fields[6][i],
                sulphur_dioxide: fields[7][i],
            })
        })
        .collect())
}

/// A named series from the `date` column and one value column.
pub(crate) fn extract_series(
    df: &DataFrame,
    name: impl Into<String>,
    column: &str,
) -> PolarsResult<TimeSeries> {
    let points = times(df)?
        .into_iter()
        .zip(opt_floats(df, column)?)
        .filter_map(|(time, value)| time.map(|time| SeriesPoint { time, value }))
        .collect();
    Ok(TimeSeries::new(name, points))
}

/// One series per value column of a resampled frame, named after the column.
pub(crate) fn extract_all_series(df: &DataFrame) -> PolarsResult<Vec<TimeSeries>> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str())
        .filter(|name| is_value_column(name))
        .map(|name| extract_series(df, name, name))
        .collect()
}

/// Rows of a bounds view (`date`, value, `min_<value>`, `max_<value>`).
pub(crate) fn extract_bounds(df: &DataFrame, column: &str) -> PolarsResult<Vec<BoundsPoint>> {
    let values = opt_floats(df, column)?;
    let mins = opt_floats(df, &format!("min_{column}"))?;
    let maxes = opt_floats(df, &format!("max_{column}"))?;

    Ok(times(df)?
        .into_iter()
        .enumerate()
        .filter_map(|(i, time)| {
            time.map(|time| BoundsPoint {
                time,
                value: values[i],
                min: mins[i],
                max: maxes[i],
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::hour;

    fn frame() -> DataFrame {
        let dates = Int64Chunked::from_vec(
            DATE.into(),
            vec![
                millis_from_naive(hour(5, 14)),
                millis_from_naive(hour(5, 15)),
            ],
        )
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
        .into_column();
        let mut df = df!(
            DISTRICT => ["Lahore", "Multan"],
            "Aqi" => [Some(180.0), None],
            "Pm_25" => [120.0, 80.0],
        )
        .unwrap();
        df.with_column(dates).unwrap();
        df
    }

    #[test]
    fn test_readings_fill_missing_fields_with_none() {
        let readings = extract_readings(&frame()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].district, "Lahore");
        assert_eq!(readings[0].aqi, Some(180.0));
        assert_eq!(readings[0].pm_25, Some(120.0));
        assert_eq!(readings[0].ozone, None);
        assert_eq!(readings[1].aqi, None);
    }

    #[test]
    fn test_series_keeps_null_values() {
        let series = extract_series(&frame(), "AQI", "Aqi").unwrap();
        assert_eq!(series.name, "AQI");
        assert_eq!(series.len(), 2);
        assert_eq!(series.value_at(hour(5, 14)), Some(180.0));
        assert_eq!(series.points[1].value, None);
    }

    #[test]
    fn test_millis_round_trip() {
        let time = hour(5, 14);
        assert_eq!(naive_from_millis(millis_from_naive(time)), Some(time));
    }
}
