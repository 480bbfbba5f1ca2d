use super::Ring;
use crate::error::DataError;
use geo::{coord, Coord, Intersects, Rect};
use std::sync::OnceLock;

/// One exterior ring plus zero or more interior rings (holes).
///
/// Containment and distance queries go through [`Polygon::contains`] and
/// [`Polygon::distance`]; the first containment check on a given polygon
/// lazily populates a [`PreparedGeometry`] behind a [`OnceLock`], per the
/// "publish-once slot" design noted for the lazy prepared-geometry cache —
/// concurrent readers racing to populate it are fine, since both candidates
/// are semantically equivalent and only one survives.
#[derive(Debug)]
pub struct Polygon {
    exterior: Ring,
    interiors: Vec<Ring>,
    bbox: Rect<f64>,
    prepared: OnceLock<PreparedGeometry>,
}

impl Polygon {
    /// Builds a polygon from a raw exterior ring plus interior rings (both
    /// as `(lng, lat)` pairs), validating eagerly so that a malformed
    /// geometry is rejected at build time rather than at query time.
    ///
    /// # Errors
    ///
    /// [`DataError`] if any ring is malformed (see [`Ring::from_coords`]).
    pub(crate) fn new(
        exterior: &[(f64, f64)],
        interiors: &[Vec<(f64, f64)>],
        feature_index: usize,
    ) -> Result<Self, DataError> {
        let exterior = Ring::from_coords(exterior, feature_index)?;
        let interiors = interiors
            .iter()
            .map(|ring| Ring::from_coords(ring, feature_index))
            .collect::<Result<Vec<_>, _>>()?;
        let bbox = exterior.bbox();

        Ok(Self {
            exterior,
            interiors,
            bbox,
            prepared: OnceLock::new(),
        })
    }

    /// The polygon's bounding box, computed from the exterior ring.
    pub(crate) const fn bbox(&self) -> Rect<f64> {
        self.bbox
    }

    /// True if `point` lies strictly inside the exterior ring and strictly
    /// outside every interior ring.
    ///
    /// Uses the prepared form, computing and caching it on first use; its
    /// presence or absence never changes the answer.
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        let point = coord! { x: lng, y: lat };
        self.prepared().contains(point)
    }

    /// Euclidean distance, in degrees, from `point` to this polygon. Zero if
    /// the point is inside (boundary-inclusive, unlike [`Self::contains`]).
    pub fn distance(&self, lng: f64, lat: f64) -> f64 {
        let point = coord! { x: lng, y: lat };

        if self.contains_inclusive(point) {
            return 0.;
        }

        let mut min = self.exterior.boundary_distance(point);
        for ring in &self.interiors {
            min = min.min(ring.boundary_distance(point));
        }
        min
    }

    /// Returns this polygon's exterior and interior rings as raw `(lng,
    /// lat)` pairs, suitable for round-tripping through [`Self::new`].
    pub(crate) fn rings(&self) -> (Vec<(f64, f64)>, Vec<Vec<(f64, f64)>>) {
        let to_pairs = |ring: &Ring| {
            ring.line().coords().map(|c| (c.x, c.y)).collect::<Vec<_>>()
        };
        let exterior = to_pairs(&self.exterior);
        let interiors = self.interiors.iter().map(to_pairs).collect();
        (exterior, interiors)
    }

    fn contains_inclusive(&self, point: Coord<f64>) -> bool {
        self.prepared().contains(point) || {
            // `contains` treats edges as half-open (not contained); distance
            // still needs a boundary-inclusive test so that points exactly on
            // the outline report distance zero rather than their distance to
            // the nearest other edge.
            self.exterior.boundary_distance(point) == 0.
        }
    }

    fn prepared(&self) -> &PreparedGeometry {
        self.prepared.get_or_init(|| PreparedGeometry {
            exterior: self.exterior.clone(),
            interiors: self.interiors.clone(),
            bbox: self.bbox,
        })
    }
}

/// A derived, read-only form of a [`Polygon`] used for repeated containment
/// queries.
///
/// In this implementation preparation doesn't change the algorithm (both
/// forms use the same even-odd ring test); what it buys is avoiding a second
/// bbox/ring clone and borrow-juggling on every single query once a polygon
/// has been prepared — real savings show up for "hot" zones near urban
/// areas that get queried repeatedly, per the teacher's own framing of
/// preparation as amortizing build cost over repeated lookups.
#[derive(Debug)]
struct PreparedGeometry {
    exterior: Ring,
    interiors: Vec<Ring>,
    bbox: Rect<f64>,
}

impl PreparedGeometry {
    fn contains(&self, point: Coord<f64>) -> bool {
        if !self.bbox.intersects(&point) {
            return false;
        }

        self.exterior.contains_even_odd(point)
            && !self
                .interiors
                .iter()
                .any(|ring| ring.contains_even_odd(point))
    }
}
