//! The JSON Schema document shape shared by every parser.
use serde_json::{json, Map, Value};
use url::Url;

use crate::error::Result;

/// An ordered JSON Schema document. Key order is insertion order.
pub type Schema = Map<String, Value>;

pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema";
pub const ID_BASE_URL: &str = "https://github.com/open-objecten/objecttypes/";

/// Keys owned by the converter; descriptor metadata never overrides them.
pub const RESERVED_KEYS: &[&str] = &[
    "$schema",
    "$id",
    "title",
    "type",
    "properties",
    "additionalProperties",
    "examples",
];

/// Build the canonical `$id` URL for a schema name.
///
/// The name always becomes a single path segment under [`ID_BASE_URL`];
/// characters such as `/`, `?` and `#` are percent-encoded.
pub fn schema_id(name: &str) -> Result<String> {
    let mut url = Url::parse(ID_BASE_URL)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(&format!("{name}.json"));
    Ok(url.to_string())
}

/// Create an empty object schema with the canonical header keys.
pub fn base_schema(id: &str, title: &str) -> Schema {
    let mut schema = Schema::new();
    schema.insert("$schema".into(), json!(SCHEMA_DRAFT));
    schema.insert("$id".into(), json!(id));
    schema.insert("title".into(), json!(title));
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), json!({}));
    schema.insert("additionalProperties".into(), json!(false));
    schema
}

/// Copy `extra` into `schema` without touching reserved keys, keys the
/// schema already holds, or `null` values.
pub fn merge_missing(schema: &mut Schema, extra: &Map<String, Value>) {
    for (key, value) in extra {
        if value.is_null() || RESERVED_KEYS.contains(&key.as_str()) || schema.contains_key(key) {
            continue;
        }
        schema.insert(key.clone(), value.clone());
    }
}

/// Re-assert the keys every emitted schema must carry.
pub fn finalize(mut schema: Schema) -> Schema {
    schema.insert("$schema".into(), json!(SCHEMA_DRAFT));
    schema.insert("type".into(), json!("object"));
    schema.insert("additionalProperties".into(), json!(false));
    if !schema.get("properties").is_some_and(Value::is_object) {
        schema.insert("properties".into(), json!({}));
    }
    schema
}

/// Build a property descriptor with its `$id` and `title` set.
pub fn property_header(key: &str, title: &str) -> Map<String, Value> {
    let mut prop = Map::new();
    prop.insert("$id".into(), json!(format!("#/properties/{key}")));
    prop.insert("title".into(), json!(title));
    prop
}
