use crate::tables::error::TableError;
use crate::types::table_name::TableName;
use log::debug;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Storage the flat tables are read from.
///
/// Implementations return the table exactly as stored; normalization of the
/// index and column types happens in [`crate::TableLoader`].
pub trait TableSource {
    fn read(&self, table: TableName) -> Result<DataFrame, TableError>;
}

/// Reads `<data_dir>/<table file name>` as CSV with a header row.
///
/// Every column is read as a string so that parsing of timestamps and numbers
/// is done once, with the same rules, regardless of what the file contains.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    data_dir: PathBuf,
}

impl CsvTableSource {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, table: TableName) -> PathBuf {
        self.data_dir.join(table.file_name())
    }
}

impl TableSource for CsvTableSource {
    fn read(&self, table: TableName) -> Result<DataFrame, TableError> {
        let path = self.path_for(table);
        if !path.is_file() {
            return Err(TableError::NotFound { table, path });
        }
        debug!("Reading {} from {:?}", table, path);

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.clone()))
            .map_err(|e| TableError::CsvRead {
                table,
                path: path.clone(),
                source: e,
            })?
            .finish()
            .map_err(|e| TableError::CsvRead {
                table,
                path,
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = CsvTableSource::new(dir.path());
        let err = source.read(TableName::AqiLag7).unwrap_err();
        assert!(matches!(err, TableError::NotFound { table: TableName::AqiLag7, .. }));
    }

    #[test]
    fn test_every_column_is_read_as_string() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join("aqi_forecast.csv"),
            "date,District,Aqi\n2024-11-05,Lahore,180.5\n",
        )?;
        let df = CsvTableSource::new(dir.path()).read(TableName::AqiForecast)?;
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("Aqi")?.dtype(), &DataType::String);
        Ok(())
    }
}
