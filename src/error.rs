#[cfg(feature = "csv_output")]
use csv::Error as CsvError;
use num_bigint::BigUint;
use serde_json::Error as SerdeError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub enum Error {
    AccessError {
        path: PathBuf,
        inner: io::Error,
    },
    SerdeError {
        path: PathBuf,
        inner: SerdeError,
    },
    #[cfg(feature = "csv_output")]
    /// This API requires the following crate features to be activated: csv_output
    CsvError(CsvError),
    PlotError {
        path: PathBuf,
        message: String,
    },
    InvalidInput {
        arg: &'static str,
        value: String,
    },
    InvalidFilter(regex::Error),
    UnknownAlgorithm(String),
    ValueMismatch {
        n: u64,
        first: (&'static str, BigUint),
        second: (&'static str, BigUint),
    },
    ArgParse(clap::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AccessError { path, inner } => {
                write!(f, "Failed to access file {:?}: {}", path, inner)
            }
            Error::SerdeError { path, inner } => write!(
                f,
                "Failed to write results to file {:?}: {}",
                path, inner
            ),
            #[cfg(feature = "csv_output")]
            Error::CsvError(inner) => write!(f, "Error writing CSV file: {}", inner),
            Error::PlotError { path, message } => {
                write!(f, "Failed to draw chart {:?}: {}", path, message)
            }
            Error::InvalidInput { arg, value } => write!(
                f,
                "Invalid value {:?} for {}: expected a non-negative integer",
                value, arg
            ),
            Error::InvalidFilter(inner) => {
                write!(f, "Unable to parse filter as a regular expression: {}", inner)
            }
            Error::UnknownAlgorithm(name) => write!(
                f,
                "Unknown algorithm {:?}; expected recursive, iterative or fast_doubling",
                name
            ),
            Error::ValueMismatch { n, first, second } => write!(
                f,
                "{} and {} disagree on fib({}): {} != {}",
                first.0, second.0, n, first.1, second.1
            ),
            Error::ArgParse(inner) => write!(f, "{}", inner),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::AccessError { inner, .. } => Some(inner),
            Error::SerdeError { inner, .. } => Some(inner),
            #[cfg(feature = "csv_output")]
            Error::CsvError(inner) => Some(inner),
            Error::InvalidFilter(inner) => Some(inner),
            Error::ArgParse(inner) => Some(inner),
            Error::PlotError { .. }
            | Error::InvalidInput { .. }
            | Error::UnknownAlgorithm(_)
            | Error::ValueMismatch { .. } => None,
        }
    }
}

#[cfg(feature = "csv_output")]
impl From<CsvError> for Error {
    fn from(other: CsvError) -> Error {
        Error::CsvError(other)
    }
}

impl From<regex::Error> for Error {
    fn from(other: regex::Error) -> Error {
        Error::InvalidFilter(other)
    }
}

impl From<clap::Error> for Error {
    fn from(other: clap::Error) -> Error {
        Error::ArgParse(other)
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

pub(crate) fn log_error(e: &Error) {
    error!("error: {}", e);
}
