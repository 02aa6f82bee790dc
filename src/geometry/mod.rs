pub mod catalog;
pub mod choropleth;
pub mod error;
pub mod join;
