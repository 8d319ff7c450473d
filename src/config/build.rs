//! `[build]` section configuration.
//!
//! Paths of the content tree, templates and output, plus build switches.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// `[build]` section in krafs.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "src/content"      # Pages and assets
/// templates = "src/templates"  # *.html templates
/// output = "dist"              # Generated site
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Content source directory (markdown pages and assets).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// HTML template directory.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify rendered pages.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Rebuild pages whose output is older than any template.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub template_deps: bool,

    /// Worker threads for the build (0 = one per core).
    #[serde(default = "defaults::build::jobs")]
    #[educe(Default = defaults::build::jobs())]
    pub jobs: usize,
}
