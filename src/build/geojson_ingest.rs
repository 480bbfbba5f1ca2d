//! Turns a `tz_world`-style `FeatureCollection` into an iterator of raw
//! `(zone name, exterior ring, interior rings)` records.
//!
//! Grounded on the teacher's `geom/json.rs` `TryFrom<&geojson::Feature>`
//! pattern, generalized to the `TZID`-keyed schema this dataset uses instead
//! of a bare `geo::Geometry` conversion.

use crate::error::DataError;

/// One ingested feature, not yet validated into a [`crate::geom::Polygon`].
pub(crate) struct RawFeature {
    pub tzname: String,
    pub exterior: Vec<(f64, f64)>,
    pub interiors: Vec<Vec<(f64, f64)>>,
}

/// Ingests every `Polygon`-geometry feature of `collection`.
///
/// Features with a non-`Polygon` geometry (or no geometry at all) are
/// silently skipped, per the dataset's contract. Malformed `Polygon`
/// features are either rejected (propagating the error, `strict = true`) or
/// skipped with a logged warning (`strict = false`).
pub(crate) fn ingest(
    collection: &geojson::FeatureCollection,
    strict: bool,
) -> Result<Vec<RawFeature>, DataError> {
    let mut out = Vec::with_capacity(collection.features.len());

    for (feature_index, feature) in collection.features.iter().enumerate() {
        match ingest_feature(feature, feature_index) {
            Ok(Some(raw)) => out.push(raw),
            Ok(None) => {}
            Err(err) if strict => return Err(err),
            Err(err) => {
                log::warn!("skipping feature {feature_index}: {err}");
            }
        }
    }

    Ok(out)
}

fn ingest_feature(
    feature: &geojson::Feature,
    feature_index: usize,
) -> Result<Option<RawFeature>, DataError> {
    let Some(geometry) = feature.geometry.as_ref() else {
        return Ok(None);
    };
    let geojson::Value::Polygon(ref rings) = geometry.value else {
        return Ok(None);
    };

    let tzname = feature
        .properties
        .as_ref()
        .and_then(|props| props.get("TZID"))
        .and_then(serde_json::Value::as_str)
        .ok_or(DataError::MissingTzid { feature_index })?
        .to_owned();

    let mut rings = rings.iter();
    let exterior_positions =
        rings.next().ok_or(DataError::DegenerateRing {
            feature_index,
            vertex_count: 0,
        })?;
    let exterior = positions_to_pairs(exterior_positions, feature_index)?;
    let interiors = rings
        .map(|ring| positions_to_pairs(ring, feature_index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(RawFeature {
        tzname,
        exterior,
        interiors,
    }))
}

// A GeoJSON `Position` is `[lng, lat]` or `[lng, lat, elevation]`; anything
// shorter can't be paired up into a coordinate.
fn positions_to_pairs(
    positions: &[Vec<f64>],
    feature_index: usize,
) -> Result<Vec<(f64, f64)>, DataError> {
    positions
        .iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(DataError::OddRingLength { feature_index });
            }
            Ok((position[0], position[1]))
        })
        .collect()
}
