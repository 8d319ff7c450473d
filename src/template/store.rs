//! Template loading.
//!
//! Every `*.html` file directly inside the templates directory becomes one
//! [`Template`], named after its file name up to the first dot
//! (`post.en.html` → `post`). The store is built once before the build starts
//! and only read afterwards, so it can be shared freely across workers.

use super::{ParamMap, TemplateError, extract_config};
use crate::log;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Extension of template files.
pub const TEMPLATE_EXTENSION: &str = "html";

/// An HTML skeleton with `{key}` slots and the defaults for those slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub html: String,
    pub defaults: ParamMap,
}

impl Template {
    /// Build a template from raw file contents, splitting off its metadata block.
    pub fn from_source(source: &str) -> Self {
        let (defaults, html) = extract_config(source);
        Self {
            html: html.to_owned(),
            defaults,
        }
    }
}

/// All templates of a site, indexed by name.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<String, Template>,
}

impl TemplateStore {
    /// Load every template file of `dir`.
    ///
    /// Files are loaded in name order; when two files share a template name
    /// the later one replaces the earlier.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut store = Self::default();
        for path in template_files(dir)? {
            let Some(name) = template_name(&path) else {
                continue;
            };
            let source = fs::read_to_string(&path)
                .map_err(|err| TemplateError::Io(path.clone(), err))?;
            if store.insert(name, Template::from_source(&source)).is_some() {
                log!("warn"; "template `{}` overridden by {}", name, path.display());
            }
        }
        Ok(store)
    }

    /// Add a template, returning the one it replaced.
    pub fn insert(&mut self, name: &str, template: Template) -> Option<Template> {
        self.templates.insert(name.to_owned(), template)
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Result<&Template, TemplateError> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Template files directly inside `dir`, sorted by file name.
///
/// Symlinks count as the file they point to.
fn template_files(dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let io_err = |err| TemplateError::Io(dir.to_path_buf(), err);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name up to the first dot.
fn template_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    file_name.split('.').next()
}
