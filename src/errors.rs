//! Definition of errors.

use std::{error::Error, fmt, result};

/// A specialized Result type for Dartmap.
pub type Result<T, E = DartError> = result::Result<T, E>;

/// Errors in dartmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DartError {
    /// Contains [`InputError`].
    Input(InputError),

    /// Contains [`ScaleError`].
    Scale(ScaleError),
}

impl fmt::Display for DartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input(e) => e.fmt(f),
            Self::Scale(e) => e.fmt(f),
        }
    }
}

impl Error for DartError {}

impl DartError {
    pub(crate) const fn input(msg: &'static str) -> Self {
        Self::Input(InputError { msg })
    }

    pub(crate) const fn scale(arg: &'static str, max: u32) -> Self {
        Self::Scale(ScaleError { arg, max })
    }
}

/// Error used when the input key cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    msg: &'static str,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", self.msg)
    }
}

/// Error used when the scale of the map exceeds the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleError {
    arg: &'static str,
    max: u32,
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ScaleError: {} must be no greater than {}",
            self.arg, self.max
        )
    }
}
