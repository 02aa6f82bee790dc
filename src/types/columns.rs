//! Column names shared by every normalized forecast table.

/// The timestamp index column, promoted from the first column of the source file.
pub const DATE: &str = "date";
/// The district name column.
pub const DISTRICT: &str = "District";
/// Monitoring location identifier. Numeric in the source, but never aggregated.
pub const LOCATION_ID: &str = "Location_id";
/// Composite index column.
pub const AQI: &str = "Aqi";

/// Numeric value columns that take part in aggregation, in source order.
pub const VALUE_COLUMNS: [&str; 8] = [
    "Aqi",
    "Carbon_monoxide",
    "Dust",
    "Nitrogen_dioxide",
    "Ozone",
    "Pm_10",
    "Pm_25",
    "Sulphur_dioxide",
];

pub(crate) fn is_value_column(name: &str) -> bool {
    VALUE_COLUMNS.contains(&name)
}
