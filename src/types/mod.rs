pub mod columns;
pub mod district;
pub mod granularity;
pub mod pollutant;
pub mod readings;
pub mod table_name;
