use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = DeckbrightError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeckbrightError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("No matching backlight devices exist")]
    NoDevices,

    #[error("Reading {path} did not finish within {timeout:?}")]
    ReadTimeout { path: PathBuf, timeout: Duration },

    #[error("Device {device} reports a maximum brightness of zero")]
    ZeroMaxBrightness { device: String },

    #[error("{0}")]
    Other(String),
}
