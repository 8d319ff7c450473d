//! krafs - a minimal static site generator.
//!
//! Markdown pages under `src/content` are rendered into the HTML templates of
//! `src/templates`; every other file is mirrored into the output directory.

mod build;
mod cli;
mod compiler;
mod config;
mod logger;
mod template;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    log!("config"; "{} → {}", config.build.content.display(), config.build.output.display());

    let report = build_site(&config)?;
    if !report.is_success() {
        bail!("{} file(s) failed to build", report.failed);
    }
    Ok(())
}
