pub mod cli;
pub mod detector;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod writer;

use anyhow::Context;
use clap::Parser;

pub use detector::Match;
pub use model::{Action, Level, Marker, TileAngle};
pub use parser::ParseError;

/// Parse raw level text (normalizing authoring quirks first) into a `Level`.
pub fn load_level(raw: &str) -> Result<Level, ParseError> {
    parser::parse(&normalizer::normalize(raw))
}

/// Render a `Level` back to exportable text.
pub fn export_level(level: &Level) -> String {
    writer::emit(level)
}

/// Scan the chart for repeated motifs of at least `min_length` tiles.
pub fn detect_repeats(level: &Level, min_length: usize) -> Vec<Match> {
    detector::find_repeats(&level.tiles, min_length)
}

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Load ───────────────────────────────────────────────────────
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let level = load_level(&raw).with_context(|| "Parsing level file")?;
    println!(
        "Loaded level: {} tiles, {} actions, {} settings",
        level.tiles.len(),
        level.actions.len(),
        level.settings.len()
    );

    // 2. ── Analyse ────────────────────────────────────────────────────
    let matches = detect_repeats(&level, args.min_length);
    if matches.is_empty() {
        println!("No repeated motifs of length >= {}", args.min_length);
    } else {
        for m in &matches {
            println!(
                "motif at tile {} (length {}) repeats at {:?}",
                m.start, m.length, m.occurrences
            );
        }
    }

    // 3. ── Export ─────────────────────────────────────────────────────
    if let Some(out) = &args.output {
        std::fs::write(out, export_level(&level))
            .with_context(|| format!("Writing {}", out.display()))?;
        println!("Exported level to {}", out.display());
    }

    Ok(())
}
