use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tools::{DEFAULT_ICON_CLASS, DEFAULT_SURFACE_CLASS, ExtractOptions, extract_document};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_INPUT: &str = "assets/political-compass.svg";
const DEFAULT_OUTPUT: &str = "assets/party-data.json";

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract party metadata from the political compass SVG")]
struct Args {
    /// Source SVG (default: $COMPASS_SVG, then assets/political-compass.svg)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output JSON (default: $COMPASS_DATA, then assets/party-data.json)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Class marking a party icon
    #[arg(long, default_value = DEFAULT_ICON_CLASS)]
    icon_class: String,

    /// Class marking the drawable compass surface
    #[arg(long, default_value = DEFAULT_SURFACE_CLASS)]
    surface_class: String,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,
}

fn path_or_env(arg: Option<PathBuf>, var: &str, default: &str) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(env::var(var).unwrap_or_else(|_| default.to_string())))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Keep stdout clean for the document when it is printed there.
    let writer = if args.stdout {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    let input = path_or_env(args.input, "COMPASS_SVG", DEFAULT_INPUT);
    let output = path_or_env(args.output, "COMPASS_DATA", DEFAULT_OUTPUT);

    let svg = fs::read_to_string(&input).map_err(|e| format!("read {}: {e}", input.display()))?;
    info!(
        "read {} ({} bytes, blake3={})",
        input.display(),
        svg.len(),
        blake3::hash(svg.as_bytes()).to_hex()
    );

    let options = ExtractOptions {
        icon_class: args.icon_class,
        surface_class: args.surface_class,
        generated_at: chrono::Utc::now().to_rfc3339(),
    };
    let extraction = extract_document(&svg, &options)?;

    for skipped in &extraction.skipped {
        warn!("skipped icon {}: {}", skipped.label, skipped.reason);
    }
    for short in &extraction.without_seats {
        warn!("no 2025 seat count for {short}");
    }
    for party in &extraction.document.parties {
        info!(
            "{:<8} x={:>5.1}% y={:>5.1}% seats={}",
            party.short_name,
            party.position.x,
            party.position.y,
            party
                .seats()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    let document = &extraction.document;
    if args.stdout {
        println!("{}", document.to_json_pretty()?);
        return Ok(());
    }

    document.save(&output)?;
    info!(
        "wrote {} ({} parties, generated_at={})",
        output.display(),
        document.party_count,
        document.generated_at
    );
    Ok(())
}
