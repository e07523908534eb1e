use std::{io, path::PathBuf};

use thiserror::Error;

/// A single cell or row that could not be turned into a rental.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    Date { value: String },
    #[error("expected at least 8 fields, found {found}")]
    MissingFields { found: usize },
    #[error("invalid field: {0}")]
    Field(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {source}")]
    Row { line: u64, source: ParseError },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("no rentals to aggregate")]
    EmptyInput,
    #[error("need at least two rentals, found {found}")]
    NotEnoughRentals { found: usize },
}
