use crate::error::DataError;
use geo::{coord, Coord, Intersects, LineString, Rect};

/// A closed ring, with its bounding box cached alongside it.
///
/// Unlike the teacher crate's `Ring`, this one carries no transmeridian
/// bookkeeping: per the dataset's contract, polygons that cross the
/// antimeridian are assumed to already be split into separate features, so
/// there is nothing to fix up here.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Ring {
    line: LineString<f64>,
    bbox: Rect<f64>,
}

impl Ring {
    /// Builds a ring from raw `(lng, lat)` pairs, closing it if the caller
    /// didn't (first vertex != last vertex).
    ///
    /// # Errors
    ///
    /// [`DataError`] if a coordinate isn't finite, or if the ring (once
    /// closed) has fewer than three distinct vertices.
    pub fn from_coords(
        coords: &[(f64, f64)],
        feature_index: usize,
    ) -> Result<Self, DataError> {
        let mut line = LineString::new(
            coords
                .iter()
                .map(|&(lng, lat)| coord! { x: lng, y: lat })
                .collect(),
        );

        for c in &line.0 {
            if !super::coord_is_valid(*c) {
                return Err(DataError::InvalidCoordinate { feature_index });
            }
        }

        line.close();

        // A closed ring needs at least 3 distinct vertices (4 coordinates,
        // since the last duplicates the first).
        let distinct = line.0.len().saturating_sub(1);
        if distinct < 3 {
            return Err(DataError::DegenerateRing {
                feature_index,
                vertex_count: distinct,
            });
        }

        let bbox = bbox_of(&line);

        Ok(Self { line, bbox })
    }

    pub const fn bbox(&self) -> Rect<f64> {
        self.bbox
    }

    pub fn line(&self) -> &LineString<f64> {
        &self.line
    }

    /// Even-odd (crossing-number) containment test against this ring alone,
    /// using a half-open interval on the edge's `y` span to avoid
    /// double-counting vertices.
    ///
    /// A point exactly on an edge is reported as NOT contained, matching the
    /// boundary rule: implementations using this rule treat edges as
    /// half-open.
    pub fn contains_even_odd(&self, point: Coord<f64>) -> bool {
        if !self.bbox.intersects(&point) {
            return false;
        }

        let mut inside = false;
        for line in self.line.lines() {
            if edge_crosses(line.start, line.end, point) {
                inside = !inside;
            }
        }
        inside
    }

    /// Minimum Euclidean distance, in degrees, from `point` to this ring's
    /// boundary (not the filled area — callers combine this with a
    /// containment check to get "0 if inside").
    pub fn boundary_distance(&self, point: Coord<f64>) -> f64 {
        self.line
            .lines()
            .map(|segment| distance_to_segment(point, segment.start, segment.end))
            .fold(f64::INFINITY, f64::min)
    }
}

fn bbox_of(line: &LineString<f64>) -> Rect<f64> {
    let mut min = coord! { x: f64::MAX, y: f64::MAX };
    let mut max = coord! { x: f64::MIN, y: f64::MIN };

    for c in line {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }

    Rect::new(min, max)
}

// Standard PNPOLY-style edge test: does the horizontal ray cast eastward from
// `point` cross the segment `(p1, p2)`? Half-open on `(ymin, ymax]`, which is
// what keeps a shared vertex from being counted by both adjacent edges.
fn edge_crosses(p1: Coord<f64>, p2: Coord<f64>, point: Coord<f64>) -> bool {
    if p1.y == p2.y {
        return false;
    }

    let (ymin, ymax) = if p1.y < p2.y { (p1.y, p2.y) } else { (p2.y, p1.y) };
    if point.y <= ymin || point.y > ymax {
        return false;
    }

    let x_at_y = (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
    point.x <= x_at_y
}

fn distance_to_segment(
    point: Coord<f64>,
    start: Coord<f64>,
    end: Coord<f64>,
) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0. {
        0.
    } else {
        (((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq)
            .clamp(0., 1.)
    };

    let proj_x = start.x + t * dx;
    let proj_y = start.y + t * dy;

    ((point.x - proj_x).powi(2) + (point.y - proj_y).powi(2)).sqrt()
}
