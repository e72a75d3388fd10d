pub mod examples;
pub mod tabular;
pub mod uml;

pub use examples::{ExampleGenerator, RandomExamples};
pub use tabular::TabularParser;
pub use uml::UmlParser;

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::{Error, Result};
use crate::export::export_schema;
use crate::options::ProcessOptions;
use crate::schema::Schema;

/// A source format that can be turned into JSON Schema documents.
pub trait SchemaParser {
    /// Human-readable parser name, used in logs.
    fn name(&self) -> &'static str;

    /// Encoding label used when the caller does not pass one.
    fn default_encoding(&self) -> &'static str;

    /// Top-level keys removed from every schema before it is written.
    fn block_list(&self) -> &'static [&'static str];

    /// Convert an already decoded source document into schemas.
    fn parse(&mut self, source: &str, options: &ProcessOptions) -> Result<Vec<Schema>>;

    /// Read `path`, convert it and write every schema under `options.output_dir`.
    ///
    /// Returns the paths of the written schema files.
    fn process(&mut self, path: &Path, options: &ProcessOptions) -> Result<Vec<PathBuf>> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let label = options
            .encoding
            .as_deref()
            .unwrap_or_else(|| self.default_encoding());
        let source = decode(&bytes, label)?;

        tracing::info!(parser = self.name(), input = %path.display(), encoding = label, "processing");
        let schemas = self.parse(&source, options)?;

        let block_list = self.block_list();
        schemas
            .iter()
            .map(|schema| export_schema(schema, options, block_list))
            .collect()
    }
}

/// Decode `bytes` using a WHATWG encoding label.
///
/// Labels are also tried without hyphens, so `latin-1` and `utf-8` work.
/// Undecodable bytes are replaced rather than reported.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes())
        .or_else(|| Encoding::for_label(label.replace('-', "").as_bytes()))
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "input contained undecodable bytes");
    }
    Ok(text.into_owned())
}
