//! Page compilation and asset copying.
//!
//! - **meta**: classify content files and derive their output paths
//! - **pages**: markdown → template → HTML
//! - **assets**: verbatim copies of everything else
//!
//! # Flow
//!
//! ```text
//! collect_all_files() ──► SourceFile ──┬── Page  ──► process_page()  ──► *.html
//!                                      └── Asset ──► process_asset() ──► copy
//! ```
//!
//! Both paths skip files whose output is at least as new as the source.

pub mod assets;
pub mod meta;
pub mod pages;

pub use assets::process_asset;
pub use meta::{FileKind, SourceFile};
pub use pages::process_page;

use crate::config::SiteConfig;
use crate::template::TemplateStore;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// What happened to a single content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Compiled,
    Copied,
    /// Output was already up to date
    Skipped,
}

/// Collect all files from a directory recursively, following symlinks.
///
/// Unreadable entries fail the whole scan instead of silently shrinking it.
pub fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).display().to_string();
            anyhow::Error::new(err).context(format!("Failed to scan {path}"))
        })?;
        let name = entry.file_name().to_str().unwrap_or_default();
        if entry.file_type().is_file() && !IGNORED_FILES.contains(&name) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Check if destination is up-to-date compared to source and dependencies.
///
/// A destination modified at the same instant as its source counts as fresh.
pub fn is_up_to_date(src: &Path, dst: &Path, deps_mtime: Option<SystemTime>) -> bool {
    let Ok(src_time) = src.metadata().and_then(|m| m.modified()) else {
        return false;
    };
    let Ok(dst_time) = dst.metadata().and_then(|m| m.modified()) else {
        return false;
    };

    if src_time > dst_time {
        return false;
    }

    if let Some(deps) = deps_mtime
        && deps > dst_time
    {
        return false;
    }

    true
}

/// Newest modification time of any file under `dir`.
pub fn latest_mtime(dir: &Path) -> Result<Option<SystemTime>> {
    Ok(collect_all_files(dir)?
        .iter()
        .filter_map(|path| path.metadata().and_then(|m| m.modified()).ok())
        .max())
}

/// Build one content file into the output directory.
pub fn process_file(
    file: &SourceFile,
    config: &SiteConfig,
    store: &TemplateStore,
    deps_mtime: Option<SystemTime>,
) -> Result<Outcome> {
    match file.kind {
        FileKind::Page => process_page(file, config, store, deps_mtime),
        FileKind::Asset => process_asset(file),
    }
}
