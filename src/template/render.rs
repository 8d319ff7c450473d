//! Strict placeholder substitution.
//!
//! Slots are written `{key}`; `{{` and `}}` produce literal braces. Every
//! slot must resolve, either from the page, the template defaults, or the
//! two values supplied here:
//!
//! - `content`: the rendered page body
//! - `root`: relative prefix back to the output root (`""`, `"../"`, ...)

use super::{ParamMap, TemplateError, TemplateStore};
use std::collections::HashMap;

/// Relative path segment repeated once per directory level.
const ROOT_SEGMENT: &str = "../";

/// Prefix leading from a page at `depth` back to the output root.
pub fn root_prefix(depth: usize) -> String {
    ROOT_SEGMENT.repeat(depth)
}

/// Render `content_html` into the template called `name`.
///
/// Page parameters override template defaults; `content` and `root` are
/// always set by the renderer.
pub fn render(
    store: &TemplateStore,
    name: &str,
    content_html: &str,
    page_params: &ParamMap,
    depth: usize,
) -> Result<String, TemplateError> {
    let template = store.get(name)?;
    let root = root_prefix(depth);

    let mut values: HashMap<&str, &str> = template
        .defaults
        .iter()
        .chain(page_params)
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    values.insert("root", &root);
    values.insert("content", content_html);

    substitute(name, &template.html, &values)
}

/// Single pass over `html`; substituted values are never rescanned.
fn substitute(
    name: &str,
    html: &str,
    values: &HashMap<&str, &str>,
) -> Result<String, TemplateError> {
    let malformed = |brace, offset| TemplateError::Malformed {
        template: name.to_owned(),
        brace,
        offset,
    };

    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['{', '}']) {
        let offset = html.len() - rest.len() + pos;
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            output.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            output.push('}');
            rest = after;
        } else if tail.starts_with('}') {
            return Err(malformed('}', offset));
        } else {
            let end = tail.find('}').ok_or_else(|| malformed('{', offset))?;
            let key = &tail[1..end];
            if key.contains('{') {
                return Err(malformed('{', offset));
            }
            let value = values.get(key).ok_or_else(|| TemplateError::MissingParam {
                template: name.to_owned(),
                key: key.to_owned(),
            })?;
            output.push_str(value);
            rest = &tail[end + 1..];
        }
    }

    output.push_str(rest);
    Ok(output)
}
