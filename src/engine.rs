//! The query engine: shortcut-index lookup plus point-in-polygon tests.

use crate::{
    error::{Axis, ConfigurationError, DomainError},
    geom::PolygonStore,
    shortcut::ShortcutIndex,
    zone::ZoneId,
};

/// Options fixed at construction time; the engine is immutable afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOptions {
    /// Whether `tz_name_at(.., force_tz: true)` must be supported.
    ///
    /// Requesting the fallback on an engine built with this set to `false`
    /// is a [`ConfigurationError`], not a degraded answer.
    pub support_nearest: bool,
}

/// A read-only handle over a [`PolygonStore`] and a [`ShortcutIndex`],
/// answering "which time zone contains this point?".
///
/// An `Engine` is meant to be constructed once (see
/// [`crate::build::Builder`] or [`crate::artifact::load_engine`]) and
/// shared across many concurrent readers; nothing about a query mutates
/// the engine itself beyond each polygon's own prepared-geometry cache.
#[derive(Debug)]
pub struct Engine {
    store: PolygonStore,
    shortcuts: ShortcutIndex,
    options: EngineOptions,
}

impl Engine {
    pub(crate) fn new(
        store: PolygonStore,
        shortcuts: ShortcutIndex,
        options: EngineOptions,
    ) -> Self {
        Self {
            store,
            shortcuts,
            options,
        }
    }

    /// The underlying polygon store.
    pub fn polygon_store(&self) -> &PolygonStore {
        &self.store
    }

    /// The underlying shortcut index.
    pub fn shortcut_index(&self) -> &ShortcutIndex {
        &self.shortcuts
    }

    /// Returns the IANA zone name containing `(latitude, longitude)`, or
    /// `None` if the point is outside every known polygon (open ocean is
    /// the normal case here, not an error).
    ///
    /// When `force_tz` is `true` and no polygon contains the point, falls
    /// back to the nearest candidate polygon within the query's 1° cell —
    /// this does not search the globe, only the already-pruned candidate
    /// set (see [`ShortcutIndex::candidates`]).
    ///
    /// # Errors
    ///
    /// [`DomainError`] if `latitude`/`longitude` is non-finite or out of
    /// range. [`ConfigurationError`] if `force_tz` is requested on an engine
    /// built with [`EngineOptions::support_nearest`] unset.
    pub fn tz_name_at(
        &self,
        latitude: f64,
        longitude: f64,
        force_tz: bool,
    ) -> Result<Option<&str>, QueryError> {
        validate(latitude, longitude)?;
        if force_tz && !self.options.support_nearest {
            return Err(QueryError::Configuration(ConfigurationError));
        }

        let candidates = self.shortcuts.candidates(latitude, longitude);

        for &(zone, ref indices) in &candidates {
            for &poly_index in indices {
                if self.store.contains(
                    zone,
                    poly_index as usize,
                    longitude,
                    latitude,
                ) {
                    return Ok(Some(self.store.zones().name(zone)));
                }
            }
        }

        if !force_tz {
            return Ok(None);
        }

        Ok(self
            .nearest(&candidates, latitude, longitude)
            .map(|zone| self.store.zones().name(zone)))
    }

    // Nearest-zone fallback, restricted to the already-pruned candidate set.
    fn nearest(
        &self,
        candidates: &[(ZoneId, Vec<u32>)],
        latitude: f64,
        longitude: f64,
    ) -> Option<ZoneId> {
        if candidates.is_empty() {
            return None;
        }
        if candidates.len() == 1 {
            return Some(candidates[0].0);
        }

        candidates
            .iter()
            .flat_map(|(zone, indices)| {
                indices.iter().map(move |&poly_index| {
                    let distance = self.store.distance(
                        *zone,
                        poly_index as usize,
                        longitude,
                        latitude,
                    );
                    (distance, *zone)
                })
            })
            .min_by(|(d1, z1), (d2, z2)| {
                d1.partial_cmp(d2)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| {
                        self.store
                            .zones()
                            .name(*z1)
                            .cmp(self.store.zones().name(*z2))
                    })
            })
            .map(|(_, zone)| zone)
    }
}

fn validate(latitude: f64, longitude: f64) -> Result<(), DomainError> {
    if !latitude.is_finite() || !(-90. ..=90.).contains(&latitude) {
        return Err(DomainError::new(
            latitude,
            Axis::Latitude,
            "must be a finite value in [-90, 90]",
        ));
    }
    if !longitude.is_finite() || !(-180. ..=180.).contains(&longitude) {
        return Err(DomainError::new(
            longitude,
            Axis::Longitude,
            "must be a finite value in [-180, 180]",
        ));
    }
    Ok(())
}

/// Errors a query can return.
///
/// "No zone contains the point" is `Ok(None)`, never one of these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryError {
    /// See [`DomainError`].
    Domain(DomainError),
    /// See [`ConfigurationError`].
    Configuration(ConfigurationError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Domain(ref err) => write!(f, "{err}"),
            Self::Configuration(ref err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::Domain(ref err) => Some(err),
            Self::Configuration(ref err) => Some(err),
        }
    }
}

impl From<DomainError> for QueryError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}
