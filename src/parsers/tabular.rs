//! Tabular schema documents: a top-level `tables` collection whose entries
//! describe their columns under `schema.properties`.
use serde_json::{json, Map, Value};

use super::SchemaParser;
use crate::common::filter::{filter_attributes, TABULAR_BLOCK_LIST};
use crate::common::names::lowercase_first_letter;
use crate::error::{Error, Result};
use crate::options::ProcessOptions;
use crate::schema::{base_schema, finalize, merge_missing, schema_id, Schema, RESERVED_KEYS};

/// Top-level keys that describe the document itself rather than its tables.
const DOCUMENT_KEYS: &[&str] = &["id", "title", "type", "description", "tables"];
/// Placeholder column the source format injects into every table.
const SENTINEL_FIELD: &str = "schema";

/// Converts each table of a tabular schema document into one schema.
#[derive(Debug, Default)]
pub struct TabularParser;

impl TabularParser {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaParser for TabularParser {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn default_encoding(&self) -> &'static str {
        "utf-8"
    }

    fn block_list(&self) -> &'static [&'static str] {
        TABULAR_BLOCK_LIST
    }

    fn parse(&mut self, source: &str, _options: &ProcessOptions) -> Result<Vec<Schema>> {
        let document: Value = serde_json::from_str(source)?;
        let document = document
            .as_object()
            .ok_or_else(|| Error::Malformed("tabular document must be a JSON object".into()))?;

        let shared = shared_metadata(document);
        let tables = match document.get("tables") {
            None => {
                tracing::warn!("document has no `tables` collection");
                return Ok(Vec::new());
            }
            Some(Value::Array(tables)) => tables,
            Some(_) => return Err(Error::Malformed("`tables` must be an array".into())),
        };

        tables
            .iter()
            .map(|table| normalize_table(table, &shared))
            .collect()
    }
}

/// Document-level fields copied into every table schema.
pub fn shared_metadata(document: &Map<String, Value>) -> Map<String, Value> {
    filter_attributes(document, DOCUMENT_KEYS)
}

/// Turn one table descriptor into a JSON Schema.
///
/// Everything nested next to `properties` in the table's `schema` block is
/// lifted to the top level. Table values win over `shared` on collisions.
///
/// The schema is always named by the table's own `id` and described by its
/// `title`; `id` and `title` inside the `schema` block are ignored. Keys the
/// converter owns (`$schema`, `type`, `additionalProperties`, `examples`, ...)
/// are dropped from the table as well. Both cases are logged at debug level.
pub fn normalize_table(table: &Value, shared: &Map<String, Value>) -> Result<Schema> {
    let table = table
        .as_object()
        .ok_or_else(|| Error::Malformed("table descriptor must be an object".into()))?;

    let table_id = match table.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => {
            return Err(Error::Malformed("table descriptor has no `id`".into()))
        }
        Some(other) => other.to_string(),
    };
    tracing::debug!(table = %table_id, "normalizing table");

    let block = match table.get("schema") {
        Some(Value::Object(block)) => block,
        Some(_) => {
            return Err(Error::Malformed(format!(
                "table `{table_id}` has a non-object `schema` block"
            )))
        }
        None => {
            return Err(Error::Malformed(format!(
                "table `{table_id}` has no `schema` block"
            )))
        }
    };

    // Table-level keys, with the nested block's keys hoisted over them.
    let mut fields: Map<String, Value> = table
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "schema" | "properties" | "id" | "title"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    for (key, value) in block {
        match key.as_str() {
            "properties" => {}
            // the table's own id and title name the schema
            "id" | "title" => {
                tracing::debug!(table = %table_id, key = %key, "ignoring nested schema key");
            }
            _ => {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
    if let Some(Value::Array(required)) = fields.get_mut("required") {
        required.retain(|r| r.as_str() != Some(SENTINEL_FIELD));
    }

    let mut schema = base_schema(&schema_id(&table_id)?, &table_id);
    schema.insert("properties".into(), Value::Object(normalize_columns(block, &table_id)?));
    for (key, value) in fields {
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::debug!(table = %table_id, key = %key, "dropping reserved key");
            continue;
        }
        schema.insert(key, value);
    }
    if let Some(description) = table.get("title").filter(|v| !v.is_null()) {
        schema.insert("description".into(), description.clone());
    }
    merge_missing(&mut schema, shared);

    Ok(finalize(schema))
}

fn normalize_columns(block: &Map<String, Value>, table_id: &str) -> Result<Map<String, Value>> {
    let columns = match block.get("properties") {
        None => return Ok(Map::new()),
        Some(Value::Object(columns)) => columns,
        Some(_) => {
            return Err(Error::Malformed(format!(
                "table `{table_id}` has a non-object `properties` block"
            )))
        }
    };

    let mut properties = Map::new();
    for (name, column) in columns {
        if name == SENTINEL_FIELD {
            continue;
        }
        let column = column.as_object().ok_or_else(|| {
            Error::Malformed(format!("column `{name}` of table `{table_id}` is not an object"))
        })?;

        let key = lowercase_first_letter(name);
        let mut property = filter_attributes(column, TABULAR_BLOCK_LIST);
        property.insert("$id".into(), json!(format!("#/properties/{key}")));
        property.insert("title".into(), json!(name));
        properties.insert(key, Value::Object(property));
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_metadata_drops_document_keys() {
        let doc = json!({
            "id": "gebieden",
            "title": "Gebieden",
            "type": "dataset",
            "description": "x",
            "tables": [],
            "theme": "ruimte",
            "crs": "EPSG:28992",
        });
        let shared = shared_metadata(doc.as_object().unwrap());
        assert_eq!(Value::Object(shared), json!({"theme": "ruimte", "crs": "EPSG:28992"}));
    }

    #[test]
    fn missing_schema_block_is_malformed() {
        let err = normalize_table(&json!({"id": "t1"}), &Map::new()).unwrap_err();
        assert!(matches!(err, Error::Malformed(msg) if msg.contains("t1")));
    }

    #[test]
    fn missing_required_is_tolerated() {
        let table = json!({"id": "t1", "schema": {"properties": {"x": {"type": "string"}}}});
        let schema = normalize_table(&table, &Map::new()).unwrap();
        assert!(!schema.contains_key("required"));
        assert_eq!(schema["properties"]["x"]["$id"], json!("#/properties/x"));
    }

    #[test]
    fn nested_id_and_title_do_not_rename_the_table() {
        let table = json!({
            "id": "buurten",
            "title": "Buurten",
            "examples": [{"naam": "Centrum"}],
            "schema": {"id": "other", "title": "Other", "display": "naam"},
        });
        let schema = normalize_table(&table, &Map::new()).unwrap();

        assert_eq!(schema["title"], json!("buurten"));
        assert_eq!(schema["description"], json!("Buurten"));
        assert_eq!(
            schema["$id"],
            json!("https://github.com/open-objecten/objecttypes/buurten.json")
        );
        assert_eq!(schema["display"], json!("naam"));
        assert!(!schema.contains_key("id"));
        assert!(!schema.contains_key("examples"));
    }

    #[test]
    fn table_values_win_over_shared() {
        let table = json!({"id": "t1", "crs": "table", "schema": {"display": "naam"}});
        let shared = json!({"crs": "shared", "theme": "ruimte"});
        let schema = normalize_table(&table, shared.as_object().unwrap()).unwrap();
        assert_eq!(schema["crs"], json!("table"));
        assert_eq!(schema["theme"], json!("ruimte"));
        assert_eq!(schema["display"], json!("naam"));
    }

    #[test]
    fn columns_get_camel_case_keys_and_admin_keys_removed() {
        let table = json!({
            "id": "buurten",
            "schema": {"properties": {
                "BuurtCode": {"type": "string", "$ref": "x", "owner": "y"}
            }}
        });
        let schema = normalize_table(&table, &Map::new()).unwrap();
        assert_eq!(
            schema["properties"],
            json!({"buurtCode": {"type": "string", "$id": "#/properties/buurtCode", "title": "BuurtCode"}})
        );
    }
}
