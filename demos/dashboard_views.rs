//! Builds the views of one dashboard page from a data directory.
//!
//! Run with `cargo run --example dashboard_views -- /path/to/data [District]`.

use punjab_aqi::{aqi_legend, parse_district, Dashboard, DashboardConfig, DashboardError, RenderCache};
use std::env;

fn main() -> Result<(), DashboardError> {
    let mut args = env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| "data".to_string());
    let district = parse_district(&args.next().unwrap_or_else(|| "Lahore".to_string()))?;

    let dashboard = Dashboard::new(DashboardConfig::builder().data_dir(data_dir).build());
    let mut cache = RenderCache::new();
    cache.begin_render();

    // --- Current hour across all districts ---
    if let Some(extremes) = dashboard.current().best_and_worst(&mut cache).call()? {
        println!(
            "Cleanest: {} ({:?}), most polluted: {} ({:?})",
            extremes.best.district, extremes.best.aqi, extremes.worst.district, extremes.worst.aqi
        );
    }
    for row in dashboard.current().ranking_table(&mut cache).limit(5).call()? {
        println!("{:>2}. {:<16} {:?} {}", row.ranking + 1, row.district, row.aqi, row.color);
    }

    // --- Forecast of the selected district ---
    let bars = dashboard.forecast().hourly_aqi_bars(&mut cache, district).call()?;
    println!("\n{district}: {} hourly AQI bars", bars.len());
    for series in dashboard.forecast().daily(&mut cache, district).call()? {
        println!("{:<18} {} days", series.name, series.len());
    }

    // --- Forecast drift ---
    match dashboard.history().lag_comparison(&mut cache, district).call() {
        Ok(lags) => {
            for series in lags {
                println!("{:<12} {} days", series.name, series.len());
            }
        }
        Err(e) if e.is_data_unavailable() => println!("Lag comparison unavailable: {e}"),
        Err(e) => return Err(e),
    }

    // --- Map ---
    let maps = dashboard.maps();
    let colors = maps.aqi_colors(&mut cache).call()?;
    let map = maps.choropleth(&mut cache, &colors)?;
    println!("\nMap centered on {:?} with {} districts", map.center, map.districts.features.len());
    for entry in aqi_legend() {
        println!("{:<32} {:<8} {}", entry.label, entry.range, entry.color);
    }

    Ok(())
}
