pub mod classification;
pub mod error;
pub mod legend;
pub mod ranking;
