//! Leading metadata block extraction.
//!
//! Pages and templates may start with an HTML comment holding parameters:
//!
//! ```text
//! <!-- template: post, title: "Hello" -->
//! # Hello
//! ```
//!
//! The comment (and one `\n` or `\r\n` after it) is removed from the body. Text that
//! doesn't start with a comment is returned untouched.

use super::params::{ParamMap, parse_params};
use regex::Regex;
use std::sync::LazyLock;

/// Anchored at the start of input; the first `-->` closes the block.
static CONFIG_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(?:\s*<!--\s*(?P<params>.*?)\s*-->\r?\n?)?(?P<content>.*)")
        .expect("static pattern is valid")
});

/// Split raw text into its parameters and the remaining body.
pub fn extract_config(source: &str) -> (ParamMap, &str) {
    let Some(caps) = CONFIG_BLOCK.captures(source) else {
        return (ParamMap::new(), source);
    };

    let params = caps
        .name("params")
        .map(|m| parse_params(m.as_str()))
        .unwrap_or_default();
    let content = caps.name("content").map_or("", |m| m.as_str());

    (params, content)
}
