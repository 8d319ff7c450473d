//! `[markdown]` section configuration.
//!
//! Toggles for markdown extensions beyond CommonMark. All are off by default.

use educe::Educe;
use pulldown_cmark::Options;
use serde::Deserialize;

/// `[markdown]` section in krafs.toml.
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// GitHub-style tables.
    pub tables: bool,

    /// `[^1]` footnotes.
    pub footnotes: bool,

    /// `~~struck~~` text.
    pub strikethrough: bool,

    /// `- [x]` task list items.
    pub tasklists: bool,

    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
}

impl MarkdownConfig {
    /// Parser options for the enabled extensions.
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_commonmark() {
        assert!(MarkdownConfig::default().options().is_empty());
    }

    #[test]
    fn test_enabled_extensions() {
        let config: MarkdownConfig = toml::from_str("tables = true\nfootnotes = true").unwrap();
        let options = config.options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
        assert!(!options.contains(Options::ENABLE_STRIKETHROUGH));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<MarkdownConfig>("math = true").is_err());
    }
}
