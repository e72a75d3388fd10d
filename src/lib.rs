//! # imvertor
//!
//! Convert UML class models and tabular schema documents into
//! [JSON Schema](https://json-schema.org/) (draft-07), one schema file per
//! class or table.
//!
//! ## Features
//!
//! - Reads XMI 2.1 and UML 1.3 exports of UML class diagrams, including stereotypes,
//!   tagged values, initial values and `enum`-stereotyped attributes
//! - Reads tabular schema documents (a `tables` collection with nested
//!   column definitions) and relocates their keys into JSON Schema shape
//! - Coerces source type tokens (`AN40`, `GUID`, `bedrag`, `"12"`) into
//!   JSON Schema types and typed values
//! - Generates one example object per UML class
//! - Optionally renders a README per schema from a `{{key}}` template
//! - CLI tool `imvertor`
//!
//! ## Example (Programmatic Usage)
//!
//! ```no_run
//! use imvertor::options::ProcessOptions;
//! use imvertor::parsers::{SchemaParser, TabularParser};
//!
//! let source = r#"{"tables": [{"id": "buurten", "title": "Buurten",
//!     "schema": {"properties": {"code": {"type": "string"}}}}]}"#;
//!
//! let schemas = TabularParser::new()
//!     .parse(source, &ProcessOptions::default())
//!     .unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&schemas[0]).unwrap());
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! imvertor model.xml --name Person
//! ```
//!
//! writes `person/person.json`. Use `--parser` to override the extension
//! based format detection and `--template README.tpl.md` to also write a
//! README next to each schema.
//!
//! ## Crate Layout
//!
//! - [`common`] — Type coercion, key filtering and naming helpers
//! - [`schema`] — The shared JSON Schema document shape
//! - [`parsers`] — One parser per source format
//! - [`export`] — Writing schemas and READMEs to disk
//! - [`dispatch`] — Choosing a parser for an input file
//!
//! The CLI binary is enabled with the `cli` feature (on by default).
pub mod common;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod options;
pub mod parsers;
pub mod schema;

pub use error::{Error, Result};
