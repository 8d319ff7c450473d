//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// krafs static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Base directory containing src/content and src/templates
    pub base_dir: PathBuf,

    /// Root dir of generated files (default: <BASE_DIR>/dist)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name, relative to the base directory
    #[arg(short = 'C', long, default_value = "krafs.toml")]
    pub config: PathBuf,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Number of worker threads (0 = one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}
