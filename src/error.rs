use std::path::PathBuf;

use thiserror::Error;

use crate::boost::FourMomentum;

/// Boxed error of an underlying event format library
pub type FormatError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open input file {path:?}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create output file {path:?}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read event")]
    Read(#[source] FormatError),
    #[error("Failed to write event")]
    Write(#[source] FormatError),
    #[error("Cannot determine event format of {0:?}")]
    UnknownFormat(PathBuf),
    #[error("Path {0:?} has no file name")]
    NoFileName(PathBuf),
    #[error("Boost velocity {0:?} is not below the speed of light")]
    InvalidBoost([f64; 3]),
    #[error("Four-momentum {0:?} is not timelike with positive energy")]
    NotTimelike(FourMomentum),
}
