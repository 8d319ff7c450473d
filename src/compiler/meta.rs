//! Source file classification and output path derivation.
//!
//! Every file under the content directory maps to exactly one output path:
//!
//! ```text
//! content/index.md        → output/index.html   (page, depth 0)
//! content/docs/page.md    → output/docs/page.html (page, depth 1)
//! content/css/style.css   → output/css/style.css  (asset, depth 1)
//! ```

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Extension of markdown pages.
pub const PAGE_EXTENSION: &str = "md";

/// Extension of rendered pages.
pub const HTML_EXTENSION: &str = "html";

/// How a source file is turned into its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Markdown page rendered through a template
    Page,
    /// Any other file, copied verbatim
    Asset,
}

impl FileKind {
    /// Classify a path by its extension.
    pub fn of(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == PAGE_EXTENSION) {
            Self::Page
        } else {
            Self::Asset
        }
    }

    /// Short name used as log prefix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Page => "content",
            Self::Asset => "assets",
        }
    }
}

/// A content file with its derived output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Source path inside the content directory
    pub source: PathBuf,
    /// Output path inside the output directory
    pub dest: PathBuf,
    /// Relative source path (for logging)
    pub relative: String,
    /// Number of directories between the content root and the file
    pub depth: usize,
    pub kind: FileKind,
}

impl SourceFile {
    /// Derive output path and depth of `source`, which must live under `content`.
    pub fn from_source(source: PathBuf, content: &Path, output: &Path) -> Result<Self> {
        let relative = source
            .strip_prefix(content)
            .map_err(|_| anyhow!("File is not in content directory: {}", source.display()))?;

        let kind = FileKind::of(relative);
        let depth = relative.parent().map_or(0, |p| p.components().count());
        let dest = match kind {
            FileKind::Page => output.join(relative).with_extension(HTML_EXTENSION),
            FileKind::Asset => output.join(relative),
        };
        let relative = relative
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding: {}", source.display()))?
            .replace('\\', "/");

        Ok(Self {
            source,
            dest,
            relative,
            depth,
            kind,
        })
    }
}
