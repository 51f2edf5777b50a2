use std::path::PathBuf;

use clap::Parser;

/// Accumulate a confusion matrix over CSV files of `predicted,target` label pairs.
#[derive(Parser, Debug)]
#[command(name = "segmeter", version)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "SEGMETER_CONFIG", default_value = "config.yml")]
    pub config: PathBuf,
    /// Number of classes, overrides the configuration
    #[arg(short = 'k', long)]
    pub classes: Option<usize>,
    /// Report row-normalized probabilities instead of counts
    #[arg(short, long)]
    pub normalized: bool,
    /// CSV files, each one counted as a separate batch
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}
