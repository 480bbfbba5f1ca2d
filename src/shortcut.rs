//! The 1°×1° bounding-box prefilter ("shortcut" table) that prunes the
//! polygon set down to a handful of candidates per query.

use crate::zone::ZoneId;
use geo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An integer-labeled 1°×1° grid cell: the mathematical floor of a
/// coordinate axis.
pub type GridCell = i16;

type ZoneBuckets = BTreeMap<ZoneId, Vec<u32>>;

/// The candidate set a query must test: for each matching zone, the
/// polygon indices whose bounding box covers the query's grid cell on
/// both axes.
///
/// Iteration is zone-ascending (by [`ZoneId`], which is itself name-ordered)
/// then polygon-index-ascending, so that first-hit search order is
/// deterministic across runs.
pub type Candidates = Vec<(ZoneId, Vec<u32>)>;

/// Two sibling tables mapping a grid cell to the zones (and, per zone, the
/// polygon indices) whose bounding box intersects that cell.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShortcutIndex {
    lat: BTreeMap<GridCell, ZoneBuckets>,
    lng: BTreeMap<GridCell, ZoneBuckets>,
}

impl ShortcutIndex {
    /// Builds the index from every `(zone, polygon index, bounding box)`
    /// triple in the polygon store.
    ///
    /// A polygon appears in `lat[c][zone]` for every integer `c` with
    /// `floor(min_lat) <= c <= floor(max_lat)`, and symmetrically for `lng`.
    pub(crate) fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ZoneId, u32, Rect<f64>)>,
    {
        let mut lat = BTreeMap::new();
        let mut lng = BTreeMap::new();

        for (zone, poly_index, bbox) in entries {
            let lat_lo = bbox.min().y.floor() as GridCell;
            let lat_hi = bbox.max().y.floor() as GridCell;
            let lng_lo = bbox.min().x.floor() as GridCell;
            let lng_hi = bbox.max().x.floor() as GridCell;

            insert_range(&mut lat, lat_lo, lat_hi, zone, poly_index);
            insert_range(&mut lng, lng_lo, lng_hi, zone, poly_index);
        }

        for table in [&mut lat, &mut lng] {
            for buckets in table.values_mut() {
                for indices in buckets.values_mut() {
                    indices.sort_unstable();
                    indices.dedup();
                }
            }
        }

        Self { lat, lng }
    }

    /// Returns the candidate set for `(lat, lng)`.
    ///
    /// If either grid cell is absent from its index, the candidate set is
    /// empty — this is not an error, it's the normal shape of "open ocean".
    pub fn candidates(&self, lat: f64, lng: f64) -> Candidates {
        let lat_cell = lat.floor() as GridCell;
        let lng_cell = lng.floor() as GridCell;

        let (Some(lat_zones), Some(lng_zones)) =
            (self.lat.get(&lat_cell), self.lng.get(&lng_cell))
        else {
            return Vec::new();
        };

        lat_zones
            .iter()
            .filter_map(|(&zone, lat_indices)| {
                let lng_indices = lng_zones.get(&zone)?;
                let indices = intersect_sorted(lat_indices, lng_indices);
                (!indices.is_empty()).then_some((zone, indices))
            })
            .collect()
    }
}

fn insert_range(
    table: &mut BTreeMap<GridCell, ZoneBuckets>,
    lo: GridCell,
    hi: GridCell,
    zone: ZoneId,
    poly_index: u32,
) {
    for cell in lo..=hi {
        table
            .entry(cell)
            .or_default()
            .entry(zone)
            .or_default()
            .push(poly_index);
    }
}

// Both inputs are sorted and deduplicated; merge-intersect them.
fn intersect_sorted(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect<f64> {
        Rect::new(
            geo::coord! { x: min_x, y: min_y },
            geo::coord! { x: max_x, y: max_y },
        )
    }

    #[test]
    fn single_cell_polygon_is_its_own_candidate() {
        let zone = ZoneId(0);
        let index =
            ShortcutIndex::build([(zone, 0, rect(-90.5, 35.2, -90.1, 35.8))]);

        let candidates = index.candidates(35.5, -90.3);
        assert_eq!(candidates, vec![(zone, vec![0])]);
    }

    #[test]
    fn empty_cell_yields_no_candidates() {
        let index =
            ShortcutIndex::build([(ZoneId(0), 0, rect(-90.5, 35.2, -90.1, 35.8))]);

        assert!(index.candidates(0., 0.).is_empty());
    }

    #[test]
    fn polygon_spans_multiple_cells() {
        let zone = ZoneId(0);
        let index =
            ShortcutIndex::build([(zone, 0, rect(-91.5, 34.2, -89.1, 36.8))]);

        for (lat, lng) in [(34.5, -91.2), (35.9, -90.0), (36.7, -89.2)] {
            assert_eq!(index.candidates(lat, lng), vec![(zone, vec![0])]);
        }
    }

    #[test]
    fn intersection_requires_both_axes() {
        let zone = ZoneId(0);
        // Polygon's bbox covers lat cell 35 and lng cell -90, but a point at
        // lat cell 35 / lng cell -80 shouldn't match even though the lat
        // axis alone would.
        let index =
            ShortcutIndex::build([(zone, 0, rect(-90.5, 35.2, -90.1, 35.8))]);

        assert!(index.candidates(35.5, -80.5).is_empty());
    }

    #[test]
    fn negative_coordinates_floor_correctly() {
        let zone = ZoneId(0);
        let index = ShortcutIndex::build([(zone, 0, rect(-0.9, -0.9, -0.1, -0.1))]);

        // floor(-0.3) == -1, not 0.
        assert_eq!(index.candidates(-0.3, -0.3), vec![(zone, vec![0])]);
        assert!(index.candidates(0.3, 0.3).is_empty());
    }
}
