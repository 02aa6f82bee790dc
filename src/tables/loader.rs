use crate::frames::pollutant_frame::PollutantLazyFrame;
use crate::tables::error::TableError;
use crate::tables::render_cache::RenderCache;
use crate::tables::source::TableSource;
use crate::types::columns::{is_value_column, DATE, DISTRICT, LOCATION_ID};
use crate::types::table_name::TableName;
use log::{info, warn};
use polars::prelude::*;

/// Timestamp layouts accepted in the index column, tried in order.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Index column names, in order of preference. Without one of these the first
/// column (the unnamed index written by the forecasting job) is promoted.
const INDEX_CANDIDATES: [&str; 2] = ["date", "Date"];

/// Loads tables from a [`TableSource`] and normalizes them to the shared schema:
///
/// * `date`: `Datetime(ms)`, timezone-naive, rows with unparsable timestamps dropped
/// * `District`: string
/// * every value column present (see [`crate::VALUE_COLUMNS`]) and `Location_id`: `f64`
///
/// Any other column is discarded.
pub struct TableLoader {
    source: Box<dyn TableSource>,
}

impl TableLoader {
    pub fn new(source: impl TableSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Loads a table through the render cache.
    pub fn load(
        &self,
        cache: &mut RenderCache,
        table: TableName,
    ) -> Result<PollutantLazyFrame, TableError> {
        let frame = cache.get_or_load(table, || self.load_uncached(table))?;
        Ok(PollutantLazyFrame::new(frame.lazy()))
    }

    /// Reads and normalizes a table, bypassing any cache.
    pub fn load_uncached(&self, table: TableName) -> Result<DataFrame, TableError> {
        let raw = self.source.read(table)?;
        normalize_table(table, raw)
    }
}

pub(crate) fn normalize_table(table: TableName, raw: DataFrame) -> Result<DataFrame, TableError> {
    let names: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let index = INDEX_CANDIDATES
        .iter()
        .find(|candidate| names.iter().any(|name| name == *candidate))
        .map(|candidate| candidate.to_string())
        .or_else(|| names.first().cloned())
        .filter(|index| index != DISTRICT && !is_value_column(index) && index != LOCATION_ID)
        .ok_or(TableError::MissingIndex { table })?;

    for required in table.required_columns() {
        if !names.iter().any(|name| name == required) {
            warn!("Table {} is missing required column {}", table, required);
            return Err(TableError::MissingColumn {
                table,
                column: required.to_string(),
            });
        }
    }

    let mut columns = vec![parse_timestamp(&index).alias(DATE), col(DISTRICT)];
    columns.extend(
        names
            .iter()
            .filter(|name| is_value_column(name) || name.as_str() == LOCATION_ID)
            .map(|name| col(name.as_str()).cast(DataType::Float64)),
    );

    let raw_height = raw.height();
    let frame = raw
        .lazy()
        .select(columns)
        .filter(col(DATE).is_not_null())
        .collect()
        .map_err(|e| TableError::Normalize { table, source: e })?;

    if frame.height() < raw_height {
        warn!(
            "Dropped {} rows with unparsable timestamps from {}",
            raw_height - frame.height(),
            table
        );
    }
    info!(
        "Loaded {} ({} rows, index column '{}')",
        table,
        frame.height(),
        index
    );
    Ok(frame)
}

fn parse_timestamp(column: &str) -> Expr {
    let parse = |format: &str| {
        col(column).str().to_datetime(
            Some(TimeUnit::Milliseconds),
            None,
            StrptimeOptions {
                format: Some(format.into()),
                strict: false,
                exact: true,
                cache: true,
            },
            lit("raise"),
        )
    };

    let mut expr = parse(DATE_FORMAT);
    for format in DATETIME_FORMATS.iter().rev() {
        let attempt = parse(format);
        expr = when(attempt.clone().is_not_null())
            .then(attempt)
            .otherwise(expr);
    }
    expr
}
