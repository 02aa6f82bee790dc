//! Fixtures shared by the unit tests.

use crate::tables::extractor::millis_from_naive;
use crate::types::columns::DATE;
use crate::types::table_name::TableName;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

/// `2024-11-<day> <hour>:00:00`.
pub(crate) fn hour(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub(crate) fn write_table(dir: &Path, table: TableName, contents: &str) -> std::io::Result<()> {
    std::fs::write(dir.join(table.file_name()), contents)
}

/// A normalized frame with a gap: Lahore at 14, 15 and 17 o'clock on the 5th,
/// Multan at 14 and 15.
pub(crate) fn forecast_frame() -> DataFrame {
    let rows = [
        (hour(5, 14), "Lahore", 100.0, 100.0, 1.0),
        (hour(5, 15), "Lahore", 120.0, 50.0, 1.0),
        (hour(5, 17), "Lahore", 160.0, 70.0, 1.0),
        (hour(5, 14), "Multan", 80.0, 40.0, 2.0),
        (hour(5, 15), "Multan", 90.0, 60.0, 2.0),
    ];
    let dates = Int64Chunked::from_vec(
        DATE.into(),
        rows.iter().map(|r| millis_from_naive(r.0)).collect(),
    )
    .into_datetime(TimeUnit::Milliseconds, None)
    .into_series()
    .into_column();

    let mut df = df!(
        "District" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "Aqi" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        "Pm_25" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        "Location_id" => rows.iter().map(|r| r.4).collect::<Vec<_>>(),
    )
    .unwrap();
    df.insert_column(0, dates).unwrap();
    df
}

const FORECAST_HEADER: &str = "Unnamed: 0,Aqi,Carbon_monoxide,Dust,Nitrogen_dioxide,Ozone,Pm_10,Pm_25,Sulphur_dioxide,Location_id,District";

/// Writes every table a dashboard reads, anchored at `2024-11-05 14:00`.
///
/// * forecast: Lahore (two locations) and Dera Ghazi Khan hourly from the 5th
///   14:00 for 60 hours, Aqi rising one point per hour from 40 (DG Khan) and
///   150 (Lahore)
/// * last year: Lahore daily at 14:00 from 2023-10-01 for 60 days
/// * lag and historical tables: Lahore daily, 40 days back from the 5th
/// * aqi forecast: Lahore daily at midnight for 61 days from the 5th, Aqi = day index
pub(crate) fn write_fixture_tables(dir: &Path) -> std::io::Result<()> {
    let start = hour(5, 14);

    let mut forecast = format!("{FORECAST_HEADER}\n");
    for h in 0..60i64 {
        let time = start + chrono::Duration::hours(h);
        let t = time.format("%Y-%m-%d %H:%M:%S");
        let dg = 42.0 + h as f64;
        forecast.push_str(&format!(
            "{t},{dg},300,20,10,30,40,30,5,9,Dera Ghazi Khan\n"
        ));
        for (location, offset) in [(1, -10.0), (2, 10.0)] {
            let aqi = 150.0 + h as f64 + offset;
            forecast.push_str(&format!(
                "{t},{aqi},900,60,40,70,180,100,20,{location},Lahore\n"
            ));
        }
    }
    write_table(dir, TableName::ForecastPollutant, &forecast)?;

    let last_year_start = NaiveDate::from_ymd_opt(2023, 10, 1)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let mut last_year = String::from(
        "date,Aqi,Carbon_monoxide,Dust,Nitrogen_dioxide,Ozone,Pm_10,Pm_25,Sulphur_dioxide,District\n",
    );
    for d in 0..60i64 {
        let t = (last_year_start + chrono::Duration::days(d)).format("%Y-%m-%d %H:%M:%S");
        last_year.push_str(&format!("{t},{},800,50,30,60,150,90,15,Lahore\n", 100 + d));
    }
    write_table(dir, TableName::LastYearPollutant, &last_year)?;

    let day = hour(5, 0);
    for table in [
        TableName::AqiLag7,
        TableName::AqiLag14,
        TableName::AqiLag30,
        TableName::ReadyHistorical,
    ] {
        let mut lag = String::from("date,District,Aqi\n");
        for d in 0..=40i64 {
            let t = (day - chrono::Duration::days(d)).format("%Y-%m-%d");
            lag.push_str(&format!("{t},Lahore,{}\n", 200 + d));
            lag.push_str(&format!("{t},Multan,{}\n", 100 + d));
        }
        write_table(dir, table, &lag)?;
    }

    let mut aqi_forecast = String::from("date,District,Aqi\n");
    for d in 0..=60i64 {
        let t = (day + chrono::Duration::days(d)).format("%Y-%m-%d");
        aqi_forecast.push_str(&format!("{t},Lahore,{d}\n"));
    }
    write_table(dir, TableName::AqiForecast, &aqi_forecast)?;
    Ok(())
}
