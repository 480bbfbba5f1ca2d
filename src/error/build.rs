use super::DataError;
use std::{error::Error, fmt, io};

/// Errors raised while running the precompute builder end to end, i.e.
/// everything [`DataError`] covers plus the surrounding file I/O.
#[derive(Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// Failure reading the input dataset.
    Io(io::Error),
    /// See [`DataError`].
    Data(DataError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Io(ref err) => write!(f, "I/O error: {err}"),
            Self::Data(ref err) => write!(f, "{err}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::Io(ref err) => Some(err),
            Self::Data(ref err) => Some(err),
        }
    }
}

impl From<io::Error> for BuildError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DataError> for BuildError {
    fn from(value: DataError) -> Self {
        Self::Data(value)
    }
}
