//! Precompute a tzlookup artifact from a `tz_world`-style GeoJSON dataset.

use anyhow::Context;
use clap::Parser;
use std::{fs::File, io::BufWriter, path::PathBuf};
use tzlookup::{build::Builder, EngineOptions};

#[derive(Parser)]
#[command(about = "Precompute a tzlookup artifact from a GeoJSON dataset")]
struct Args {
    /// Path to the input `tz_world`-style GeoJSON (optionally gzipped).
    input: PathBuf,
    /// Path to write the precomputed artifact to.
    output: PathBuf,
    /// Abort on the first malformed feature instead of skipping it.
    #[arg(long, default_value_t = true)]
    strict: bool,
    /// Build an engine that can answer `forceTZ` queries.
    #[arg(long, default_value_t = true)]
    support_nearest: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    log::info!("reading {}", args.input.display());
    let input = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let engine = Builder::new()
        .strict(args.strict)
        .engine_options(EngineOptions {
            support_nearest: args.support_nearest,
        })
        .build_from_reader(input)
        .context("building engine from input dataset")?;

    log::info!("writing {}", args.output.display());
    let output = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut output = BufWriter::new(output);

    tzlookup::artifact::save(
        &mut output,
        engine.polygon_store(),
        engine.shortcut_index(),
    )
    .context("writing artifact")?;

    let zones = engine.polygon_store().zones();
    let polygon_count: usize = zones
        .iter()
        .map(|(zone, _)| engine.polygon_store().polygons(zone).len())
        .sum();
    log::info!("done: {} zones, {polygon_count} polygons", zones.len());
    Ok(())
}
