//! Writing schemas (and optional READMEs) to disk.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::common::filter::filter_attributes;
use crate::common::names::derive_title;
use crate::error::{Error, Result};
use crate::options::ProcessOptions;
use crate::schema::Schema;

/// Written in place of template tokens the schema cannot fill.
pub const UNRESOLVED_MARKER: &str = "TODO";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]*?)\s*\}\}").expect("token pattern is valid"));

fn with_postfix(stem: &str, postfix: Option<&str>, ext: &str) -> String {
    match postfix {
        Some(p) if !p.is_empty() => format!("{stem}-{p}.{ext}"),
        _ => format!("{stem}.{ext}"),
    }
}

/// Create `<root>/<title>` if it does not exist yet.
pub fn ensure_directory(root: &Path, title: &str) -> Result<PathBuf> {
    let dir = root.join(title);
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(dir)
}

/// Serialize `schema` (minus blocked keys) to `<root>/<title>/<title>[-<postfix>].json`.
pub fn write_schema(
    schema: &Schema,
    root: &Path,
    title: &str,
    postfix: Option<&str>,
    block_list: &[&str],
) -> Result<PathBuf> {
    let dir = ensure_directory(root, title)?;
    let path = dir.join(with_postfix(title, postfix, "json"));
    let filtered = filter_attributes(schema, block_list);
    let mut output = serde_json::to_string_pretty(&filtered)?;
    output.push('\n');
    fs::write(&path, output).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

/// Substitute `{{key}}` tokens with values from `schema`.
///
/// Strings are inserted verbatim, other values as compact JSON. Tokens with
/// no matching key become [`UNRESOLVED_MARKER`].
pub fn render_template(template: &str, schema: &Schema) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures| match schema.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => UNRESOLVED_MARKER.to_string(),
        })
        .into_owned()
}

/// Render `template_path` against `schema` into `<root>/<title>/README[-<postfix>].md`.
pub fn write_readme(
    schema: &Schema,
    root: &Path,
    title: &str,
    postfix: Option<&str>,
    template_path: &Path,
) -> Result<PathBuf> {
    let template = fs::read_to_string(template_path).map_err(|e| Error::io(template_path, e))?;
    let dir = ensure_directory(root, title)?;
    let path = dir.join(with_postfix("README", postfix, "md"));
    fs::write(&path, render_template(&template, schema)).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

/// Write one schema, plus its README when a template is configured.
///
/// Returns the path of the schema file.
pub fn export_schema(
    schema: &Schema,
    options: &ProcessOptions,
    block_list: &[&str],
) -> Result<PathBuf> {
    let title = derive_title(schema)?;
    let postfix = options.postfix.as_deref();
    let path = write_schema(schema, &options.output_dir, &title, postfix, block_list)?;
    tracing::info!(path = %path.display(), "wrote schema");

    if let Some(template) = &options.template {
        let filtered = filter_attributes(schema, block_list);
        let readme = write_readme(&filtered, &options.output_dir, &title, postfix, template)?;
        tracing::info!(path = %readme.display(), "wrote readme");
    }

    Ok(path)
}
