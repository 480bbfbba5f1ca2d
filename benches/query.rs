use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tzlookup::build::Builder;

fn fixture() -> tzlookup::Engine {
    let mut features = Vec::new();
    // A grid of adjacent zones, so that most queries have a handful of
    // shortcut-index candidates to disambiguate rather than just one.
    for i in 0..20 {
        let lng0 = f64::from(i) * 2. - 20.;
        let lng1 = lng0 + 2.;
        features.push(format!(
            r#"{{"type":"Feature","properties":{{"TZID":"Zone/{i}"}},
               "geometry":{{"type":"Polygon","coordinates":[[[{lng0},-10],
               [{lng1},-10],[{lng1},10],[{lng0},10],[{lng0},-10]]]}}}}"#,
        ));
    }
    let json = format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    );
    Builder::new().build_from_str(&json).expect("fixture builds")
}

fn bench_contained(c: &mut Criterion) {
    let engine = fixture();
    c.bench_function("tz_name_at/contained", |b| {
        b.iter(|| {
            engine
                .tz_name_at(black_box(0.), black_box(5.), false)
                .unwrap()
        })
    });
}

fn bench_open_water(c: &mut Criterion) {
    let engine = fixture();
    c.bench_function("tz_name_at/open_water", |b| {
        b.iter(|| {
            engine
                .tz_name_at(black_box(80.), black_box(5.), false)
                .unwrap()
        })
    });
}

fn bench_force_tz(c: &mut Criterion) {
    let engine = fixture();
    // Just north of every zone's top edge: still a shortcut candidate (the
    // bbox cell matches), but not actually contained, so this exercises the
    // nearest-distance fallback rather than a cheap empty-candidate return.
    c.bench_function("tz_name_at/force_tz", |b| {
        b.iter(|| {
            engine
                .tz_name_at(black_box(10.5), black_box(5.), true)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_contained, bench_open_water, bench_force_tz);
criterion_main!(benches);
