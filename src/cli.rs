use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input .adofai level file
    pub input: PathBuf,
    /// Re-export the cleaned-up level here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Smallest motif length worth reporting
    #[arg(long, default_value_t = 2)]
    pub min_length: usize,
}
