use super::Polygon;
use crate::zone::{ZoneId, ZoneTable};
use ahash::HashMap;

/// Owns every zone's polygon geometry, keyed by [`ZoneId`] with stable
/// per-zone polygon indices.
///
/// The store is immutable after construction, aside from each [`Polygon`]'s
/// own lazily-populated prepared-geometry cache (see
/// [`Polygon::contains`][super::Polygon::contains]).
#[derive(Debug)]
pub struct PolygonStore {
    zones: ZoneTable,
    polygons: HashMap<ZoneId, Vec<Polygon>>,
}

impl PolygonStore {
    pub(crate) fn new(
        zones: ZoneTable,
        polygons: HashMap<ZoneId, Vec<Polygon>>,
    ) -> Self {
        Self { zones, polygons }
    }

    /// The zone-name interner backing this store.
    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// The ordered polygons for `zone`, or an empty slice if the zone has
    /// none (e.g. a zone name present in the shortcut index but not in this
    /// store would be a bug, not a valid state).
    pub fn polygons(&self, zone: ZoneId) -> &[Polygon] {
        self.polygons.get(&zone).map_or(&[], Vec::as_slice)
    }

    /// Does polygon `poly_index` of `zone` contain `(lng, lat)`?
    ///
    /// Strictly inside the exterior ring and strictly outside every
    /// interior ring; points exactly on a boundary edge are not contained.
    pub fn contains(
        &self,
        zone: ZoneId,
        poly_index: usize,
        lng: f64,
        lat: f64,
    ) -> bool {
        self.polygons(zone)
            .get(poly_index)
            .is_some_and(|polygon| polygon.contains(lng, lat))
    }

    /// Euclidean distance, in degrees, from `(lng, lat)` to polygon
    /// `poly_index` of `zone`; zero if the point is inside (boundary
    /// inclusive).
    pub fn distance(
        &self,
        zone: ZoneId,
        poly_index: usize,
        lng: f64,
        lat: f64,
    ) -> f64 {
        self.polygons(zone)
            .get(poly_index)
            .map_or(f64::INFINITY, |polygon| polygon.distance(lng, lat))
    }
}
