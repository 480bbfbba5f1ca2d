use std::{error::Error, fmt};

/// Which coordinate axis an out-of-range value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Axis {
    /// Latitude, expected in `[-90, 90]`.
    Latitude,
    /// Longitude, expected in `[-180, 180]`.
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        })
    }
}

/// A coordinate that is non-finite or outside its valid range.
#[derive(Clone, Copy, Debug, PartialEq)]
// `value` is an `f64`, not `Eq`.
#[allow(clippy::derive_partial_eq_without_eq)]
pub struct DomainError {
    /// The invalid value.
    pub value: f64,
    /// The axis it was supposed to be a coordinate of.
    pub axis: Axis,
    /// Why it's invalid.
    pub reason: &'static str,
}

impl DomainError {
    pub(crate) const fn new(
        value: f64,
        axis: Axis,
        reason: &'static str,
    ) -> Self {
        Self {
            value,
            axis,
            reason,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} (got {:?}): {}",
            self.axis, self.value, self.reason
        )
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
