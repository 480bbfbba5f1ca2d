//! End-to-end coverage of the build → query → (de)serialize pipeline,
//! against a small synthetic dataset standing in for `tz_world`.

use tzlookup::{artifact, build::Builder, error::DataError, EngineOptions};

// Each fixture is a rectangle (or, for Europe/London, an L-shape with a
// notch) expressed directly as GeoJSON so the tests exercise the real
// ingestion path rather than constructing `Polygon`s by hand.
fn fixture_geojson() -> String {
    let ring = |coords: &[(f64, f64)]| {
        let points = coords
            .iter()
            .map(|(lng, lat)| format!("[{lng},{lat}]"))
            .collect::<Vec<_>>()
            .join(",");
        format!("[{points}]")
    };

    let feature = |tzid: &str, rings: &[String]| {
        format!(
            r#"{{"type":"Feature","properties":{{"TZID":"{tzid}"}},
               "geometry":{{"type":"Polygon","coordinates":[{}]}}}}"#,
            rings.join(",")
        )
    };

    let rect = |lng0: f64, lat0: f64, lng1: f64, lat1: f64| {
        ring(&[
            (lng0, lat0),
            (lng1, lat0),
            (lng1, lat1),
            (lng0, lat1),
            (lng0, lat0),
        ])
    };

    let features = [
        feature("America/Chicago", &[rect(-88., 41., -87., 42.)]),
        feature("America/Anchorage", &[rect(-150., 61., -149., 62.)]),
        feature("America/New_York", &[rect(-75., 40., -74., 41.)]),
        feature("Europe/Moscow", &[rect(37., 55., 38., 56.)]),
        // L-shape: the big box lng[-2,0] x lat[51,52] minus the notch
        // lng[-1,0] x lat[51.5,52]. A point in the notch falls inside the
        // bounding box (so it's still a shortcut candidate) but outside the
        // polygon itself.
        feature(
            "Europe/London",
            &[ring(&[
                (-2., 51.),
                (0., 51.),
                (0., 51.5),
                (-1., 51.5),
                (-1., 52.),
                (-2., 52.),
                (-2., 51.),
            ])],
        ),
        feature(
            "America/Phoenix",
            &[
                rect(-113., 31., -109., 37.),
                rect(-111., 34., -110., 35.),
            ],
        ),
        feature("America/Denver", &[rect(-111., 34., -110., 35.)]),
        feature("America/Denver", &[rect(-106., 37., -102., 41.)]),
    ];

    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

fn build() -> tzlookup::Engine {
    Builder::new()
        .build_from_str(&fixture_geojson())
        .expect("fixture dataset builds cleanly")
}

#[test]
fn resolves_a_point_well_inside_a_single_zone() {
    let engine = build();
    assert_eq!(
        engine.tz_name_at(41.85, -87.65, false).unwrap(),
        Some("America/Chicago")
    );
    assert_eq!(
        engine.tz_name_at(61.2181, -149.9003, false).unwrap(),
        Some("America/Anchorage")
    );
    assert_eq!(
        engine.tz_name_at(40.7128, -74.0060, false).unwrap(),
        Some("America/New_York")
    );
    assert_eq!(
        engine.tz_name_at(55.7558, 37.6173, false).unwrap(),
        Some("Europe/Moscow")
    );
}

#[test]
fn resolves_a_point_inside_an_irregular_polygon() {
    let engine = build();
    assert_eq!(
        engine.tz_name_at(51.2, -1.5, false).unwrap(),
        Some("Europe/London")
    );
}

#[test]
fn open_water_resolves_to_none() {
    let engine = build();
    assert_eq!(engine.tz_name_at(0., -160., false).unwrap(), None);
}

#[test]
fn force_tz_falls_back_to_nearest_within_the_candidate_set() {
    let engine = build();

    // The notch: inside London's bbox, outside the polygon itself.
    let notch = (51.8, -0.5);
    assert_eq!(engine.tz_name_at(notch.0, notch.1, false).unwrap(), None);
    assert_eq!(
        engine.tz_name_at(notch.0, notch.1, true).unwrap(),
        Some("Europe/London")
    );
}

#[test]
fn force_tz_without_support_is_a_configuration_error() {
    let engine = Builder::new()
        .engine_options(EngineOptions {
            support_nearest: false,
        })
        .build_from_str(&fixture_geojson())
        .unwrap();

    let err = engine.tz_name_at(51.8, -0.5, true).unwrap_err();
    assert!(matches!(err, tzlookup::QueryError::Configuration(_)));
}

#[test]
fn interior_ring_carves_out_a_hole() {
    let engine = build();
    let store = engine.polygon_store();
    let phoenix = store.zones().get("America/Phoenix").unwrap();

    // Inside Phoenix's outer box, but inside the hole: must not be
    // contained by the Phoenix polygon, hole or no hole.
    assert!(!store.contains(phoenix, 0, -110.5, 34.5));
    // Outside the hole, still inside Phoenix's outer box.
    assert!(store.contains(phoenix, 0, -112., 32.));
}

#[test]
fn a_point_in_the_hole_resolves_to_the_enclosing_zone() {
    let engine = build();
    assert_eq!(
        engine.tz_name_at(34.5, -110.5, false).unwrap(),
        Some("America/Denver")
    );
}

#[test]
fn a_zone_can_have_multiple_disjoint_polygons() {
    let engine = build();
    // Denver's second, geographically separate, polygon.
    assert_eq!(
        engine.tz_name_at(39.7392, -104.9903, false).unwrap(),
        Some("America/Denver")
    );
}

#[test]
fn out_of_range_coordinates_are_a_domain_error() {
    let engine = build();
    assert!(engine.tz_name_at(120., 0., false).is_err());
    assert!(engine.tz_name_at(0., 200., false).is_err());
    assert!(engine.tz_name_at(f64::NAN, 0., false).is_err());
}

#[test]
fn malformed_feature_collection_is_rejected_in_strict_mode() {
    let json = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{},"geometry":
            {"type":"Polygon","coordinates":[[[-1,-1],[1,-1],[1,1],[-1,1],[-1,-1]]]}}
    ]}"#;

    let err = Builder::new().build_from_str(json).unwrap_err();
    assert!(matches!(
        err,
        tzlookup::error::BuildError::Data(DataError::MissingTzid { .. })
    ));
}

#[test]
fn non_strict_mode_skips_malformed_features_instead_of_failing() {
    let json = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{},"geometry":
            {"type":"Polygon","coordinates":[[[-1,-1],[1,-1],[1,1],[-1,1],[-1,-1]]]}},
        {"type":"Feature","properties":{"TZID":"America/Chicago"},"geometry":
            {"type":"Polygon","coordinates":[[[-88,41],[-87,41],[-87,42],[-88,42],[-88,41]]]}}
    ]}"#;

    let engine = Builder::new().strict(false).build_from_str(json).unwrap();
    assert_eq!(
        engine.tz_name_at(41.5, -87.5, false).unwrap(),
        Some("America/Chicago")
    );
}

#[test]
fn artifact_round_trips_through_save_and_load() {
    let engine = build();
    let mut bytes = Vec::new();
    artifact::save(
        &mut bytes,
        engine.polygon_store(),
        engine.shortcut_index(),
    )
    .unwrap();

    let mut cursor = std::io::Cursor::new(bytes);
    let reloaded = artifact::load_engine(
        &mut cursor,
        EngineOptions {
            support_nearest: true,
        },
    )
    .unwrap();

    assert_eq!(
        reloaded.tz_name_at(41.85, -87.65, false).unwrap(),
        Some("America/Chicago")
    );
    assert_eq!(
        reloaded.tz_name_at(34.5, -110.5, false).unwrap(),
        Some("America/Denver")
    );
    assert_eq!(reloaded.tz_name_at(0., -160., false).unwrap(), None);
}

#[test]
fn loading_a_file_with_the_wrong_magic_fails() {
    let mut cursor = std::io::Cursor::new(b"not-a-real-artifact-at-all".to_vec());
    let err = artifact::load(&mut cursor).unwrap_err();
    assert!(matches!(err, tzlookup::error::ArtifactError::BadMagic));
}
