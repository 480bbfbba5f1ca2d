//! The precompute builder: turns a `tz_world`-style GeoJSON
//! `FeatureCollection` into the [`PolygonStore`] and [`ShortcutIndex`] an
//! [`Engine`] needs.
//!
//! Grounded on the teacher's `geom::from_geojson` ingestion entry points
//! (`src/geom/json.rs`) and, for the gzip-transparent reader, on the
//! `flate2::read::GzDecoder` + magic-byte sniff idiom used across the
//! example pack's CLI tools.

mod geojson_ingest;

use crate::{
    engine::{Engine, EngineOptions},
    error::BuildError,
    geom::{Polygon, PolygonStore},
    shortcut::ShortcutIndex,
    zone::ZoneTable,
};
use ahash::HashMap;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Builds an [`Engine`] from a `tz_world`-style dataset.
///
/// ```no_run
/// # use tzlookup::build::Builder;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("tz_world.geojson")?;
/// let engine = Builder::new().build_from_reader(file)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Builder {
    strict: bool,
    options: EngineOptions,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A builder in strict mode (the default): any malformed feature aborts
    /// the build rather than being skipped.
    pub const fn new() -> Self {
        Self {
            strict: true,
            options: EngineOptions {
                support_nearest: true,
            },
        }
    }

    /// Sets whether a malformed feature aborts the build (`true`, the
    /// default) or is skipped with a logged warning (`false`).
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the [`EngineOptions`] the built engine will carry.
    #[must_use]
    pub const fn engine_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads `reader` fully, transparently gunzipping it if it starts with
    /// the gzip magic bytes, then builds an [`Engine`] from the resulting
    /// GeoJSON text.
    ///
    /// # Errors
    ///
    /// [`BuildError::Io`] if `reader` can't be read (or degzipped).
    /// [`BuildError::Data`] if the GeoJSON is malformed, per
    /// [`Self::build_from_bytes`].
    pub fn build_from_reader<R: Read>(
        &self,
        mut reader: R,
    ) -> Result<Engine, BuildError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        self.build_from_bytes(&raw)
    }

    /// As [`Self::build_from_reader`], but from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_from_reader`].
    pub fn build_from_bytes(&self, bytes: &[u8]) -> Result<Engine, BuildError> {
        let json = if bytes.starts_with(&GZIP_MAGIC) {
            let mut decoder = flate2::read::GzDecoder::new(bytes);
            let mut text = String::new();
            decoder.read_to_string(&mut text)?;
            text
        } else {
            String::from_utf8_lossy(bytes).into_owned()
        };

        self.build_from_str(&json)
    }

    /// As [`Self::build_from_bytes`], but from already-decoded GeoJSON text.
    ///
    /// # Errors
    ///
    /// [`BuildError::Data`] if `json` isn't a valid GeoJSON
    /// `FeatureCollection`, or if a feature fails ingestion under strict
    /// mode.
    pub fn build_from_str(&self, json: &str) -> Result<Engine, BuildError> {
        let geojson = json.parse::<geojson::GeoJson>().map_err(|err| {
            crate::error::DataError::NotAFeatureCollection(err.to_string())
        })?;

        let geojson::GeoJson::FeatureCollection(collection) = geojson else {
            return Err(BuildError::Data(
                crate::error::DataError::NotAFeatureCollection(
                    "top-level value is not a FeatureCollection".to_owned(),
                ),
            ));
        };

        self.build_from_feature_collection(&collection)
            .map_err(BuildError::Data)
    }

    /// As [`Self::build_from_str`], but from an already-parsed collection.
    ///
    /// # Errors
    ///
    /// [`crate::error::DataError`] if a feature fails ingestion under
    /// strict mode.
    pub fn build_from_feature_collection(
        &self,
        collection: &geojson::FeatureCollection,
    ) -> Result<Engine, crate::error::DataError> {
        let raw = geojson_ingest::ingest(collection, self.strict)?;

        let zones = ZoneTable::build(raw.iter().map(|f| f.tzname.clone()));

        let mut polygons: HashMap<_, Vec<Polygon>> = HashMap::default();
        let mut shortcut_entries = Vec::new();

        for (feature_index, raw_feature) in raw.iter().enumerate() {
            let zone = zones
                .get(&raw_feature.tzname)
                .expect("every name was just interned into `zones`");

            let build_one = Polygon::new(
                &raw_feature.exterior,
                &raw_feature.interiors,
                feature_index,
            );

            let polygon = match build_one {
                Ok(polygon) => polygon,
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    log::warn!("skipping feature {feature_index}: {err}");
                    continue;
                }
            };

            let bucket = polygons.entry(zone).or_default();
            let poly_index = u32::try_from(bucket.len())
                .expect("fewer than u32::MAX polygons per zone");
            shortcut_entries.push((zone, poly_index, polygon.bbox()));
            bucket.push(polygon);
        }

        let store = PolygonStore::new(zones, polygons);
        let shortcuts = ShortcutIndex::build(shortcut_entries);

        Ok(Engine::new(store, shortcuts, self.options))
    }
}
