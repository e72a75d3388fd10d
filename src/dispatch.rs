use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::ProcessOptions;
use crate::parsers::{SchemaParser, TabularParser, UmlParser};

/// The source formats the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// UML class model exported as XMI (`.xml`).
    Uml,
    /// Tabular schema document (`.json`).
    Tabular,
}

impl ParserKind {
    /// Look up a parser by its override name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "uml" | "xml" | "enterprise-architect" => Some(ParserKind::Uml),
            "tabular" | "json" | "amsterdam-schema" => Some(ParserKind::Tabular),
            _ => None,
        }
    }

    /// Pick a parser from the file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(ParserKind::Tabular)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(ParserKind::Uml)
        } else {
            None
        }
    }

    /// A valid override wins; otherwise the extension decides.
    pub fn select(path: &Path, override_name: Option<&str>) -> Result<Self> {
        if let Some(name) = override_name {
            match Self::from_name(name) {
                Some(kind) => return Ok(kind),
                None => tracing::warn!(parser = name, "unknown parser name, using file extension"),
            }
        }
        Self::from_extension(path).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }

    pub fn parser(self) -> Box<dyn SchemaParser> {
        match self {
            ParserKind::Uml => Box::new(UmlParser::new()),
            ParserKind::Tabular => Box::new(TabularParser::new()),
        }
    }
}

/// Convert `path` with the selected parser and write its schemas.
pub fn run(
    path: &Path,
    override_name: Option<&str>,
    options: &ProcessOptions,
) -> Result<Vec<PathBuf>> {
    let kind = ParserKind::select(path, override_name)?;
    tracing::debug!(?kind, input = %path.display(), "selected parser");
    kind.parser().process(path, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_selects_parser() {
        assert_eq!(
            ParserKind::select(Path::new("model.XML"), None).unwrap(),
            ParserKind::Uml
        );
        assert_eq!(
            ParserKind::select(Path::new("gebieden.json"), None).unwrap(),
            ParserKind::Tabular
        );
    }

    #[test]
    fn override_wins_over_extension() {
        assert_eq!(
            ParserKind::select(Path::new("export.txt"), Some("Enterprise-Architect")).unwrap(),
            ParserKind::Uml
        );
    }

    #[test]
    fn invalid_override_falls_back_to_extension() {
        assert_eq!(
            ParserKind::select(Path::new("a.json"), Some("csv")).unwrap(),
            ParserKind::Tabular
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert!(matches!(
            ParserKind::select(Path::new("model.yaml"), None),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            ParserKind::select(Path::new("noext"), Some("csv")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}
