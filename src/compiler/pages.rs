//! Markdown pages.
//!
//! A page is compiled in three steps:
//!
//! 1. split off the `<!-- ... -->` metadata block
//! 2. convert the remaining markdown to HTML
//! 3. render it into the template named by `template` (or `default`)

use super::{Outcome, SourceFile, is_up_to_date};
use crate::config::SiteConfig;
use crate::log;
use crate::template::{
    DEFAULT_TEMPLATE, TEMPLATE_KEY, TemplateError, TemplateStore, extract_config, render,
};
use anyhow::{Context, Result};
use pulldown_cmark::{Options, Parser, html::push_html};
use std::fs;
use std::time::SystemTime;

/// Compile page source into a complete HTML document.
///
/// `depth` is the number of directories between the output root and the page.
pub fn compile_document(
    store: &TemplateStore,
    source: &str,
    depth: usize,
    options: Options,
) -> Result<String, TemplateError> {
    let (params, body) = extract_config(source);
    let content_html = markdown_to_html(body, options);
    let template = params
        .get(TEMPLATE_KEY)
        .map_or(DEFAULT_TEMPLATE, String::as_str);

    render(store, template, &content_html, &params, depth)
}

/// Convert a markdown body to an HTML fragment without trailing newlines.
pub fn markdown_to_html(markdown: &str, options: Options) -> String {
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, Parser::new_ext(markdown, options));
    html.truncate(html.trim_end_matches('\n').len());
    html
}

/// Compile a page and write it to its output path unless it is up to date.
///
/// Nothing is written when compilation fails.
pub fn process_page(
    file: &SourceFile,
    config: &SiteConfig,
    store: &TemplateStore,
    deps_mtime: Option<SystemTime>,
) -> Result<Outcome> {
    if is_up_to_date(&file.source, &file.dest, deps_mtime) {
        return Ok(Outcome::Skipped);
    }

    let source = fs::read_to_string(&file.source)
        .with_context(|| format!("Failed to read {}", file.source.display()))?;
    let html = compile_document(store, &source, file.depth, config.markdown.options())?;
    let html = if config.build.minify {
        minify(html.as_bytes())
    } else {
        html.into_bytes()
    };

    if let Some(parent) = file.dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&file.dest, html)
        .with_context(|| format!("Failed to write {}", file.dest.display()))?;

    log!(file.kind.name(); "{}", file.relative);
    Ok(Outcome::Compiled)
}

/// Minify HTML content using `minify_html` crate.
fn minify(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::tests::set_mtime;
    use crate::template::Template;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    const DEFAULT: &str =
        "<!-- greeting: \"hi\" -->\n<html><body>{root}{greeting} {content}</body></html>";

    fn store() -> TemplateStore {
        let mut store = TemplateStore::default();
        store.insert("default", Template::from_source(DEFAULT));
        store.insert("special", Template::from_source("<main>{root}|{content}</main>"));
        store
    }

    fn page(dir: &Path, relative: &str, source: &str) -> SourceFile {
        let content = dir.join("content");
        let path = content.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, source).unwrap();
        SourceFile::from_source(path, &content, &dir.join("out")).unwrap()
    }

    #[test]
    fn test_markdown_to_html() {
        assert_eq!(markdown_to_html("# Hello", Options::empty()), "<h1>Hello</h1>");
        assert_eq!(
            markdown_to_html("a\n\nb\n", Options::empty()),
            "<p>a</p>\n<p>b</p>"
        );
        assert_eq!(markdown_to_html("", Options::empty()), "");
    }

    #[test]
    fn test_markdown_extensions() {
        let source = "~~gone~~";
        assert!(!markdown_to_html(source, Options::empty()).contains("<del>"));
        assert!(markdown_to_html(source, Options::ENABLE_STRIKETHROUGH).contains("<del>gone</del>"));
    }

    #[test]
    fn test_compile_with_default_template() {
        let html = compile_document(&store(), "# Hello", 0, Options::empty()).unwrap();
        assert_eq!(html, "<html><body>hi <h1>Hello</h1></body></html>");
    }

    #[test]
    fn test_page_params_reach_template() {
        let source = "<!-- greeting: \"hello there\" -->\nx";
        let html = compile_document(&store(), source, 0, Options::empty()).unwrap();
        assert_eq!(html, "<html><body>hello there <p>x</p></body></html>");
    }

    #[test]
    fn test_compile_with_selected_template() {
        let source = "<!-- template: special -->\nbody text";
        let html = compile_document(&store(), source, 1, Options::empty()).unwrap();
        assert_eq!(html, "<main>../|<p>body text</p></main>");
    }

    #[test]
    fn test_compile_unknown_template() {
        let source = "<!-- template: missing -->\nbody";
        let err = compile_document(&store(), source, 0, Options::empty()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(name) if name == "missing"));
    }

    #[test]
    fn test_compile_without_default_template() {
        let err = compile_document(&TemplateStore::default(), "x", 0, Options::empty()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(name) if name == "default"));
    }

    #[test]
    fn test_process_page_writes_output() {
        let dir = TempDir::new().unwrap();
        let file = page(dir.path(), "docs/page.md", "<!-- template: special -->\nbody text");

        let outcome = process_page(&file, &SiteConfig::default(), &store(), None).unwrap();
        assert_eq!(outcome, Outcome::Compiled);
        assert_eq!(
            fs::read_to_string(dir.path().join("out/docs/page.html")).unwrap(),
            "<main>../|<p>body text</p></main>"
        );
    }

    #[test]
    fn test_process_page_skips_fresh_output() {
        let dir = TempDir::new().unwrap();
        let file = page(dir.path(), "index.md", "# Hello");
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(&file.dest, "sentinel").unwrap();

        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_mtime(&file.source, t);
        set_mtime(&file.dest, t);

        let outcome = process_page(&file, &SiteConfig::default(), &store(), None).unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(fs::read_to_string(&file.dest).unwrap(), "sentinel");

        // a newer template forces a rebuild when tracked
        let deps = Some(t + Duration::from_secs(1));
        let outcome = process_page(&file, &SiteConfig::default(), &store(), deps).unwrap();
        assert_eq!(outcome, Outcome::Compiled);
        assert_ne!(fs::read_to_string(&file.dest).unwrap(), "sentinel");
    }

    #[test]
    fn test_process_page_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = page(dir.path(), "a/b.md", "<!-- template: missing -->\nbody");

        let err = process_page(&file, &SiteConfig::default(), &store(), None).unwrap_err();
        assert!(err.downcast_ref::<TemplateError>().is_some());
        assert!(!file.dest.exists());
    }

    #[test]
    fn test_process_page_minified() {
        let dir = TempDir::new().unwrap();
        let file = page(dir.path(), "index.md", "# Hello\n\nworld");
        let mut config = SiteConfig::default();
        config.build.minify = true;

        process_page(&file, &config, &store(), None).unwrap();
        let html = fs::read_to_string(&file.dest).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(!html.contains('\n'));
    }
}
