//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── TemplateStore::load() ──► every template, read once
//!     │
//!     ├── collect_all_files()   ──► SourceFile per content file
//!     │
//!     └── process_file() (parallel)
//!             ├── page  ──► compile + write *.html
//!             └── asset ──► copy
//! ```
//!
//! The template store is complete before any file is processed and is only
//! read afterwards. Each file owns its output path, so workers never touch
//! the same file. A failing file is logged and counted; the others still build.

use crate::{
    compiler::{FileKind, Outcome, SourceFile, collect_all_files, latest_mtime, process_file},
    config::SiteConfig,
    log,
    template::TemplateStore,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Counts of what a build did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub compiled: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildReport {
    fn record(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::Compiled) => self.compiled += 1,
            Some(Outcome::Copied) => self.copied += 1,
            Some(Outcome::Skipped) => self.skipped += 1,
            None => self.failed += 1,
        }
    }

    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Build the whole site described by `config`.
///
/// Errors are returned only for problems that stop the build from starting
/// (templates can't be read, output can't be cleared, no worker pool).
/// Per-file failures are reported through [`BuildReport::failed`].
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }

    let store = TemplateStore::load(&config.build.templates).with_context(|| {
        format!(
            "Failed to load templates from {}",
            config.build.templates.display()
        )
    })?;
    if store.is_empty() {
        log!("warn"; "no templates in {}", config.build.templates.display());
    } else {
        log!("templates"; "loaded {}", store.len());
    }

    let deps_mtime = if config.build.template_deps {
        latest_mtime(&config.build.templates)?
    } else {
        None
    };

    let files = collect_files(&config.build.content, output)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.build.jobs)
        .build()
        .context("Failed to start build workers")?;

    let outcomes: Vec<Option<Outcome>> = pool.install(|| {
        files
            .par_iter()
            .map(|file| match process_file(file, config, &store, deps_mtime) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    log!("error"; "{}: {:#}", file.relative, e);
                    None
                }
            })
            .collect()
    });

    let mut report = BuildReport::default();
    for outcome in outcomes {
        report.record(outcome);
    }

    log_build_result(&report);
    Ok(report)
}

/// Every content file with its output location.
///
/// Output paths are unique: when an asset would land on a rendered page
/// (`a.html` next to `a.md`), the page wins and the asset is dropped.
fn collect_files(content: &Path, output: &Path) -> Result<Vec<SourceFile>> {
    let mut files = collect_all_files(content)?
        .into_iter()
        .map(|path| SourceFile::from_source(path, content, output))
        .collect::<Result<Vec<_>>>()?;

    let pages: HashSet<PathBuf> = files
        .iter()
        .filter(|f| f.kind == FileKind::Page)
        .map(|f| f.dest.clone())
        .collect();
    files.retain(|f| {
        let shadowed = f.kind == FileKind::Asset && pages.contains(&f.dest);
        if shadowed {
            log!("warn"; "{} skipped, its output belongs to a page", f.relative);
        }
        !shadowed
    });
    Ok(files)
}

fn log_build_result(report: &BuildReport) {
    let BuildReport {
        compiled,
        copied,
        skipped,
        failed,
    } = report;

    if compiled + copied + skipped + failed == 0 {
        log!("warn"; "content directory is empty");
    } else if *failed > 0 {
        log!("error"; "{failed} failed ({compiled} compiled, {copied} copied, {skipped} up to date)");
    } else {
        log!("build"; "done ({compiled} compiled, {copied} copied, {skipped} up to date)");
    }
}
