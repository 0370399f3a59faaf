use clap::{Parser, ValueEnum};
use outline_merge::features::{parts_from_str, polygons_to_feature_collection};
use outline_merge::provenance::missing_handles;
use outline_merge::{FallbackMode, PartMerger};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fallback {
    /// Close leftover fragments with their bounding box
    Bbox,
    /// Fail when fragments are left over
    Strict,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GeoJSON file (LineStrings / Polygons with a `handle` property)
    #[arg(short, long)]
    input: PathBuf,

    /// Output GeoJSON file (Polygons with a `handles` property)
    #[arg(short, long)]
    output: PathBuf,

    /// Endpoint matching and merge tolerance, in drawing units
    #[arg(short, long, default_value_t = 0.01)]
    tolerance: f64,

    /// Share of a nested child's area that must lie inside its parent
    #[arg(long, default_value_t = 0.9)]
    coverage: f64,

    #[arg(long, value_enum, default_value_t = Fallback::Bbox)]
    fallback: Fallback,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Reading input from {:?}", args.input);
    let text = fs::read_to_string(&args.input)?;
    let read = parts_from_str(&text, args.tolerance)?;
    println!(
        "Loaded {} parts ({} entities skipped). Merging with tolerance {}...",
        read.parts.len(),
        read.skipped.len(),
        args.tolerance
    );

    let merger = PartMerger::new(args.tolerance)
        .with_coverage_ratio(args.coverage)
        .with_fallback(match args.fallback {
            Fallback::Bbox => FallbackMode::BoundingBox,
            Fallback::Strict => FallbackMode::Strict,
        });

    let inputs = read.parts.clone();
    let polygons = merger.merge(read.parts)?;
    println!("Found {} polygons.", polygons.len());

    let lost = missing_handles(&inputs, &polygons);
    if !lost.is_empty() {
        println!("Warning: {} handles missing from the output: {:?}", lost.len(), lost);
    }

    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &polygons_to_feature_collection(&polygons))?;

    println!("Wrote output to {:?}", args.output);

    Ok(())
}
