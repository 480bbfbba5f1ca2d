//! Look up the IANA time zone for a coordinate against a precomputed
//! tzlookup artifact.

use anyhow::Context;
use clap::Parser;
use std::{fs::File, io::BufReader, path::PathBuf};
use tzlookup::EngineOptions;

#[derive(Parser)]
#[command(about = "Look up the time zone at a coordinate")]
struct Args {
    /// Path to a precomputed artifact, as written by `tzlookup-build`.
    artifact: PathBuf,
    /// Latitude, in degrees.
    latitude: f64,
    /// Longitude, in degrees.
    longitude: f64,
    /// Fall back to the nearest known zone if none contains the point.
    #[arg(long)]
    force_tz: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.artifact)
        .with_context(|| format!("opening {}", args.artifact.display()))?;
    let mut reader = BufReader::new(file);

    let engine = tzlookup::artifact::load_engine(
        &mut reader,
        EngineOptions {
            support_nearest: args.force_tz,
        },
    )
    .context("loading artifact")?;

    match engine.tz_name_at(args.latitude, args.longitude, args.force_tz)? {
        Some(name) => println!("{name}"),
        None => println!("none"),
    }
    Ok(())
}
