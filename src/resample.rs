//! Bucketing of irregular readings onto a regular hourly or daily grid.

use crate::types::columns::{is_value_column, AQI, DATE};
use crate::types::granularity::{Aggregation, Granularity};
use crate::types::pollutant::Pollutant;
use log::debug;
use polars::prelude::*;

/// Resamples a normalized frame to `granularity`, reducing each bucket with
/// `aggregation`.
///
/// Only the value columns take part; `District` and `Location_id` are dropped.
/// Buckets are aligned to the top of the hour or to midnight. Every bucket
/// between the first and the last populated one is present in the output, with
/// nulls where no reading fell. The output is sorted by `date`, and resampling
/// an already resampled frame returns it unchanged.
pub fn resample(
    frame: LazyFrame,
    granularity: Granularity,
    aggregation: Aggregation,
) -> PolarsResult<DataFrame> {
    let mut frame = frame;
    let schema = frame.collect_schema()?;
    let values: Vec<Expr> = schema
        .iter_names()
        .filter(|name| is_value_column(name.as_str()))
        .map(|name| aggregation.apply(col(name.clone())))
        .collect();

    let aggregated = frame
        .group_by([col(DATE).dt().truncate(lit(granularity.every())).alias(DATE)])
        .agg(values)
        .sort([DATE], SortMultipleOptions::default())
        .collect()?;

    debug!(
        "Resampled to {} {} buckets ({} populated)",
        granularity,
        aggregation,
        aggregated.height()
    );
    fill_gaps(aggregated, granularity)
}

fn fill_gaps(aggregated: DataFrame, granularity: Granularity) -> PolarsResult<DataFrame> {
    let populated: Vec<i64> = aggregated
        .column(DATE)?
        .datetime()?
        .into_iter()
        .flatten()
        .collect();
    let (Some(first), Some(last)) = (
        populated.iter().min().copied(),
        populated.iter().max().copied(),
    ) else {
        return Ok(aggregated);
    };

    let step = granularity.step_millis();
    let grid: Vec<i64> = (0..=(last - first) / step).map(|i| first + i * step).collect();
    if grid.len() == aggregated.height() {
        return Ok(aggregated);
    }

    let grid = Int64Chunked::from_vec(DATE.into(), grid)
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
        .into_column();
    DataFrame::new(vec![grid])?
        .lazy()
        .left_join(aggregated.lazy(), col(DATE), col(DATE))
        .sort([DATE], SortMultipleOptions::default())
        .collect()
}

/// Expression for the composite index as a weighted sum of the seven species.
pub(crate) fn synthetic_aqi() -> Expr {
    Pollutant::SPECIES
        .iter()
        .filter_map(|p| p.synthetic_aqi_weight().map(|w| col(p.column_name()) * lit(w)))
        .reduce(|sum, term| sum + term)
        .unwrap_or_else(|| col(AQI))
        .alias(AQI)
}

/// Adds the ±10 % band around `pollutant` to an hourly-resampled forecast.
///
/// `Aqi` is first recomputed from the species, so the band around it follows
/// the weighted sum rather than the stored index. The result has the columns
/// `date`, `<p>`, `min_<p>` and `max_<p>`.
pub fn with_bounds(hourly: LazyFrame, pollutant: Pollutant) -> LazyFrame {
    let column = pollutant.column_name();
    hourly.with_column(synthetic_aqi()).select([
        col(DATE),
        col(column),
        (col(column) * lit(0.9)).alias(format!("min_{column}")),
        (col(column) * lit(1.1)).alias(format!("max_{column}")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::PollutantFrameFilterExt;
    use crate::tables::extractor::millis_from_naive;
    use crate::test_support::{forecast_frame, hour};
    use chrono::NaiveDateTime;

    fn date_at(df: &DataFrame, row: usize) -> Option<NaiveDateTime> {
        df.column(DATE)
            .unwrap()
            .datetime()
            .unwrap()
            .get(row)
            .and_then(crate::tables::extractor::naive_from_millis)
    }

    #[test]
    fn test_hourly_gap_is_filled_with_nulls() -> PolarsResult<()> {
        let lahore = forecast_frame().lazy().filter_district("Lahore");
        let df = resample(lahore, Granularity::Hour, Aggregation::Mean)?;

        assert_eq!(df.height(), 4);
        assert_eq!(date_at(&df, 2), Some(hour(5, 16)));
        let aqi = df.column("Aqi")?.f64()?;
        assert_eq!(aqi.get(1), Some(120.0));
        assert_eq!(aqi.get(2), None);
        assert_eq!(aqi.get(3), Some(160.0));
        Ok(())
    }

    #[test]
    fn test_non_value_columns_are_dropped() -> PolarsResult<()> {
        let df = resample(forecast_frame().lazy(), Granularity::Hour, Aggregation::Mean)?;
        assert!(df.column("District").is_err());
        assert!(df.column("Location_id").is_err());
        assert!(df.column("Pm_25").is_ok());
        Ok(())
    }

    #[test]
    fn test_mean_across_districts_in_one_bucket() -> PolarsResult<()> {
        let df = resample(forecast_frame().lazy(), Granularity::Hour, Aggregation::Mean)?;
        // Lahore 100 and Multan 80 at 14:00.
        assert_eq!(df.column("Aqi")?.f64()?.get(0), Some(90.0));
        Ok(())
    }

    #[test]
    fn test_daily_buckets_start_at_midnight() -> PolarsResult<()> {
        let lahore = forecast_frame().lazy().filter_district("Lahore");
        let max = resample(lahore.clone(), Granularity::Day, Aggregation::Max)?;
        let mean = resample(lahore, Granularity::Day, Aggregation::Mean)?;

        assert_eq!(max.height(), 1);
        assert_eq!(date_at(&max, 0), Some(hour(5, 0)));
        assert_eq!(max.column("Aqi")?.f64()?.get(0), Some(160.0));

        let avg = mean.column("Aqi")?.f64()?.get(0).unwrap();
        assert!((avg - 380.0 / 3.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_resample_is_idempotent() -> PolarsResult<()> {
        let once = resample(forecast_frame().lazy(), Granularity::Hour, Aggregation::Mean)?;
        let twice = resample(once.clone().lazy(), Granularity::Hour, Aggregation::Mean)?;
        assert!(once.equals_missing(&twice));
        Ok(())
    }

    #[test]
    fn test_empty_input_gives_empty_output() -> PolarsResult<()> {
        let empty = forecast_frame().lazy().filter_district("Nowhere");
        let df = resample(empty, Granularity::Day, Aggregation::Max)?;
        assert_eq!(df.height(), 0);
        Ok(())
    }

    #[test]
    fn test_bounds_are_ten_percent() -> PolarsResult<()> {
        let date = Int64Chunked::from_vec(DATE.into(), vec![millis_from_naive(hour(5, 14))])
            .into_datetime(TimeUnit::Milliseconds, None)
            .into_series()
            .into_column();
        let mut df = df!(
            "Aqi" => [999.0],
            "Carbon_monoxide" => [10.0],
            "Dust" => [20.0],
            "Nitrogen_dioxide" => [30.0],
            "Ozone" => [40.0],
            "Pm_10" => [200.0],
            "Pm_25" => [100.0],
            "Sulphur_dioxide" => [50.0],
        )?;
        df.with_column(date)?;

        let pm = with_bounds(df.clone().lazy(), Pollutant::Pm25).collect()?;
        let names: Vec<&str> = pm.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["date", "Pm_25", "min_Pm_25", "max_Pm_25"]);
        let min = pm.column("min_Pm_25")?.f64()?.get(0).unwrap();
        let max = pm.column("max_Pm_25")?.f64()?.get(0).unwrap();
        assert!((min - 90.0).abs() < 1e-9);
        assert!((max - 110.0).abs() < 1e-9);

        // 0.25*100 + 0.25*200 + 0.15*30 + 0.10*50 + 0.10*10 + 0.10*40 + 0.05*20
        let aqi = with_bounds(df.lazy(), Pollutant::Aqi).collect()?;
        let value = aqi.column("Aqi")?.f64()?.get(0).unwrap();
        assert!((value - 90.5).abs() < 1e-9);
        Ok(())
    }
}
