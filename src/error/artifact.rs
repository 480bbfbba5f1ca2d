use std::{error::Error, fmt, io};

/// Errors raised while loading or writing a precomputed artifact.
#[derive(Debug)]
#[non_exhaustive]
pub enum ArtifactError {
    /// Failure reading or writing the artifact file.
    Io(io::Error),
    /// Failure decoding the `bincode` payload.
    Decode(bincode::Error),
    /// The file doesn't start with the expected magic bytes.
    BadMagic,
    /// The file was written by an incompatible format version.
    UnsupportedVersion(u32),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Io(ref err) => write!(f, "I/O error: {err}"),
            Self::Decode(ref err) => write!(f, "decode error: {err}"),
            Self::BadMagic => write!(f, "not a tzlookup artifact file"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported artifact version {version}")
            }
        }
    }
}

impl Error for ArtifactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::Io(ref err) => Some(err),
            Self::Decode(ref err) => Some(err),
            Self::BadMagic | Self::UnsupportedVersion(_) => None,
        }
    }
}

impl From<io::Error> for ArtifactError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bincode::Error> for ArtifactError {
    fn from(value: bincode::Error) -> Self {
        Self::Decode(value)
    }
}
