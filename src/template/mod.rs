//! Page templates and the metadata blocks shared by templates and pages.
//!
//! - **extract**: split a leading `<!-- ... -->` block from the body
//! - **params**: parse the block's `key: value` list
//! - **store**: load every template of a directory once
//! - **render**: strict `{key}` substitution into a template skeleton

mod extract;
mod params;
mod render;
mod store;

pub use extract::extract_config;
pub use params::ParamMap;
pub use render::render;
pub use store::{Template, TemplateStore};

use std::path::PathBuf;
use thiserror::Error;

/// Template name used when a page doesn't pick one.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Page parameter selecting the template.
pub const TEMPLATE_KEY: &str = "template";

/// Errors raised while loading or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template `{0}` not found")]
    NotFound(String),

    #[error("template `{template}` references `{{{key}}}` but no value was provided")]
    MissingParam { template: String, key: String },

    #[error("template `{template}` has an unmatched `{brace}` at byte {offset}")]
    Malformed {
        template: String,
        brace: char,
        offset: usize,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}
