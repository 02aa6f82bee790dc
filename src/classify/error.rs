use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("Unknown pollutant '{0}'")]
    UnknownPollutant(String),

    #[error("Cannot classify a missing (NaN) value")]
    NotANumber,
}
