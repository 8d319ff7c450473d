//! `key: value` parameter lists found inside metadata blocks.
//!
//! ```text
//! template: post, title: "Hello, world", lang: en
//! ```
//!
//! Keys and values are either bare words or double-quoted strings. Text that
//! does not fit the grammar is skipped rather than rejected.

use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// Parameters attached to a page or a template.
pub type ParamMap = HashMap<String, String>;

/// One pair per match, introduced by start-of-input or a comma.
/// Quoted tokens stop at the first closing quote.
static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|,)\s*("[^\n]*?"|\w+)\s*:\s*("[^\n]*?"|\w+)\s*"#)
        .expect("static pattern is valid")
});

/// Parse a raw parameter list. Later duplicates overwrite earlier ones.
pub fn parse_params(raw: &str) -> ParamMap {
    if raw.is_empty() {
        return ParamMap::new();
    }
    PAIR.captures_iter(raw)
        .map(|caps| {
            let key = strip_quotes(&caps[1]).to_owned();
            let value = strip_quotes(&caps[2]).to_owned();
            (key, value)
        })
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}
