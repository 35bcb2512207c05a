use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("no numeric method columns found")]
    NoMethodColumns,
    #[error("column lengths are inconsistent")]
    LengthMismatch,
    #[error("duplicate system '{0}'")]
    DuplicateSystem(String),
    #[error("duplicate (system, method) pair: ({system}, {method})")]
    DuplicatePair { system: String, method: String },
    #[error("unknown method '{0}'")]
    UnknownMethod(String),
    #[error("unknown system '{0}'")]
    UnknownSystem(String),
    #[error("invalid numeric value in column '{column}' at row {row}: {value}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[error("invalid label in column '{column}' at row {row}: {value}")]
    InvalidLabel {
        column: String,
        row: usize,
        value: String,
    },
    #[error("cannot fit a line: fewer than two points or zero variance")]
    DegenerateFit,
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
