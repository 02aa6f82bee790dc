use crate::types::table_name::TableName;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// A table could not be produced. Every variant is a `DataUnavailable`
/// condition for the views that depend on the table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table '{table}' not found at '{path}'")]
    NotFound { table: TableName, path: PathBuf },

    #[error("Failed to read table '{table}' from '{path}'")]
    CsvRead {
        table: TableName,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Table '{table}' has no timestamp column")]
    MissingIndex { table: TableName },

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: TableName, column: String },

    #[error("Failed to normalize table '{table}'")]
    Normalize {
        table: TableName,
        #[source]
        source: PolarsError,
    },
}

impl TableError {
    pub fn table(&self) -> TableName {
        match self {
            TableError::NotFound { table, .. }
            | TableError::CsvRead { table, .. }
            | TableError::MissingIndex { table }
            | TableError::MissingColumn { table, .. }
            | TableError::Normalize { table, .. } => *table,
        }
    }
}
