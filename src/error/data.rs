use std::{error::Error, fmt};

/// Errors raised while ingesting a `tz_world`-style `FeatureCollection`.
#[derive(Debug)]
#[non_exhaustive]
pub enum DataError {
    /// `properties.TZID` is missing on a feature that has a `Polygon`
    /// geometry.
    MissingTzid {
        /// Index of the offending feature in the collection.
        feature_index: usize,
    },
    /// A ring has an odd number of coordinates (a `[lng, lat]` pair is
    /// missing its other half).
    OddRingLength {
        /// Index of the offending feature in the collection.
        feature_index: usize,
    },
    /// A ring has fewer than three distinct vertices, once closed.
    DegenerateRing {
        /// Index of the offending feature in the collection.
        feature_index: usize,
        /// How many vertices the ring actually had.
        vertex_count: usize,
    },
    /// A coordinate is non-finite (`NaN` or infinite).
    InvalidCoordinate {
        /// Index of the offending feature in the collection.
        feature_index: usize,
    },
    /// The input parsed as JSON but isn't a GeoJSON `FeatureCollection`, or
    /// isn't valid GeoJSON at all.
    NotAFeatureCollection(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MissingTzid { feature_index } => {
                write!(f, "feature {feature_index} has no properties.TZID")
            }
            Self::OddRingLength { feature_index } => {
                write!(
                    f,
                    "feature {feature_index} has a ring with an odd number \
                     of coordinates"
                )
            }
            Self::DegenerateRing {
                feature_index,
                vertex_count,
            } => {
                write!(
                    f,
                    "feature {feature_index} has a ring with only \
                     {vertex_count} vertex(es), need at least 3"
                )
            }
            Self::InvalidCoordinate { feature_index } => {
                write!(
                    f,
                    "feature {feature_index} has a non-finite coordinate"
                )
            }
            Self::NotAFeatureCollection(ref reason) => {
                write!(f, "not a GeoJSON FeatureCollection: {reason}")
            }
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::MissingTzid { .. }
            | Self::OddRingLength { .. }
            | Self::DegenerateRing { .. }
            | Self::InvalidCoordinate { .. }
            | Self::NotAFeatureCollection(_) => None,
        }
    }
}
