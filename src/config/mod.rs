//! Site configuration management for `krafs.toml`.
//!
//! The file is optional: a base directory laid out as `src/content`,
//! `src/templates` builds into `dist` without any configuration.
//!
//! # Sections
//!
//! | Section       | Purpose                                     |
//! |---------------|---------------------------------------------|
//! | `[build]`     | Content, template and output paths; switches |
//! | `[markdown]`  | Markdown extensions                         |
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"
//! minify = true
//!
//! [markdown]
//! tables = true
//! ```

mod build;
pub mod defaults;
mod error;
mod markdown;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use markdown::MarkdownConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing krafs.toml
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Base directory every relative path resolves against
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Markdown settings
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config for the CLI's base directory, falling back to defaults
    /// when the config file doesn't exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = expand_tilde(&cli.base_dir);
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, &root);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides, then resolve every path against `root`
    pub fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        // CLI output paths are relative to the working directory, not the root
        if let Some(output) = &cli.output {
            self.build.output = normalize_path(&expand_tilde(output));
        }
        if cli.clean {
            self.build.clean = true;
        }
        Self::update_option(&mut self.build.minify, cli.minify.as_ref());
        Self::update_option(&mut self.build.jobs, cli.jobs.as_ref());

        self.update_path_with_root(root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths relative to the root directory and make them absolute
    fn update_path_with_root(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.templates = normalize_path(&root.join(&self.build.templates));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    /// Validate that the source directories exist and stay clear of the output
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            bail!(ConfigError::Validation(format!(
                "base directory `{}` not found",
                self.root.display()
            )));
        }
        Self::check_dir("[build.content]", &self.build.content)?;
        Self::check_dir("[build.templates]", &self.build.templates)?;

        let output = &self.build.output;
        if output.starts_with(&self.build.content) {
            bail!(ConfigError::Validation(
                "[build.output] must not be inside [build.content]".into()
            ));
        }
        // `clean` removes the output tree, which must not hold any source
        if self.root.starts_with(output)
            || self.build.content.starts_with(output)
            || self.build.templates.starts_with(output)
        {
            bail!(ConfigError::Validation(format!(
                "[build.output] `{}` must not contain the base directory, [build.content] or [build.templates]",
                output.display()
            )));
        }
        Ok(())
    }

    fn check_dir(field: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            bail!(ConfigError::Validation(format!(
                "{field} `{}` not found",
                path.display()
            )));
        }
        if !path.is_dir() {
            bail!(ConfigError::Validation(format!(
                "{field} `{}` is not a directory",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
