//! UML class models exported as XMI.
//!
//! Two export layouts are understood:
//!
//! - XMI 2.1 with modeling-tool extension elements. Classes are the
//!   `element` nodes typed `uml:Class`. Each carries a `properties` and
//!   `project` descriptor block plus nested `attribute` nodes, which in turn
//!   hold `properties`, `initial`, `documentation`, `stereotype`, `bounds`
//!   and `tags` children.
//! - UML 1.3 (XMI 1.1). Classes are the named `UML:Class` nodes, their
//!   attributes sit under `UML:Classifier.feature/UML:Attribute`, and most
//!   metadata (`type`, `description`, `documentation`, `lowerBound`) lives in
//!   `UML:ModelElement.taggedValue/UML:TaggedValue` pairs.
use std::collections::HashMap;

use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::examples::{ExampleGenerator, RandomExamples};
use super::SchemaParser;
use crate::common::coercion::{coerce_map, coerce_token};
use crate::common::filter::{filter_attributes, UML_ATTRIBUTE_BLOCK_LIST};
use crate::common::names::{dedup_preserving_order, lowercase_first_letter};
use crate::error::{Error, Result};
use crate::options::ProcessOptions;
use crate::schema::{base_schema, finalize, merge_missing, property_header, schema_id, Schema};

const CLASS_TYPE: &str = "uml:Class";
const ENUM_STEREOTYPE: &str = "enum";
const ENUM_PREFIX: &str = "enum_";
/// Stands in for the values of an enumeration class with no attributes.
pub const EMPTY_ENUM_SENTINEL: &str = "TODO";

/// Name/value/notes triple copied from an attribute's `tags` block.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: Option<String>,
    pub value: Option<String>,
    pub notes: Option<String>,
}

/// Converts every selected UML class into one schema.
pub struct UmlParser {
    examples: Box<dyn ExampleGenerator>,
}

impl Default for UmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl UmlParser {
    pub fn new() -> Self {
        Self::with_examples(RandomExamples::new())
    }

    /// Use `examples` instead of the random generator.
    pub fn with_examples(examples: impl ExampleGenerator + 'static) -> Self {
        Self {
            examples: Box::new(examples),
        }
    }

    fn convert_class(&mut self, doc: &Document, class: Node) -> Result<Schema> {
        let name = class
            .attribute("name")
            .ok_or_else(|| Error::Malformed("UML class without a name".into()))?;
        tracing::debug!(class = name, "converting class");

        let tagged = tagged_values(class);
        let mut schema = base_schema(&schema_id(&name.to_lowercase())?, name);

        let mut descriptors = Map::new();
        for block in ["properties", "project"] {
            if let Some(node) = child(class, block) {
                descriptors.extend(attribute_map(node));
            }
        }
        let documentation = descriptors
            .remove("documentation")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|d| !d.is_empty())
            .or_else(|| tagged.get("documentation").cloned());
        if let Some(doc_text) = documentation {
            schema.insert("description".into(), json!(doc_text));
        }
        merge_missing(&mut schema, &coerce_map(&descriptors));

        let mut properties = Map::new();
        let mut example = Map::new();
        let mut required = Vec::new();

        for attr in class_attributes(class) {
            let converted = self.convert_attribute(doc, attr)?;
            if let Some(value) = converted.example {
                example.insert(converted.key.clone(), value);
            }
            if converted.required {
                required.push(json!(converted.key));
            }
            properties.insert(converted.key, Value::Object(converted.property));
        }

        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema.insert("examples".into(), json!([example]));

        Ok(finalize(schema))
    }

    fn convert_attribute(&mut self, doc: &Document, attr: Node) -> Result<ConvertedAttribute> {
        let name = attr
            .attribute("name")
            .ok_or_else(|| Error::Malformed("UML attribute without a name".into()))?;
        let key = lowercase_first_letter(name);
        let tagged = tagged_values(attr);

        let descriptors = child(attr, "properties").map(attribute_map).unwrap_or_default();
        let declared_type = descriptors
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| tagged.get("type").cloned());

        let mut property = property_header(&key, name);
        for (k, v) in coerce_map(&descriptors) {
            if !v.is_null() && k != "$id" && k != "title" {
                property.insert(k, v);
            }
        }
        if let Some(t) = declared_type.as_deref().and_then(coerce_token) {
            property.insert("type".into(), t);
        }

        if let Some(default) = child(attr, "initial")
            .or_else(|| child(attr, "Attribute.initialValue").and_then(|n| child(n, "Expression")))
            .and_then(|n| n.attribute("body"))
            .and_then(coerce_token)
        {
            property.insert("default".into(), default);
        }

        let description = child(attr, "documentation")
            .and_then(|n| n.attribute("value"))
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .or_else(|| tagged.get("description").cloned())
            .unwrap_or_default();
        property.insert("description".into(), json!(description));

        let stereotype = child(attr, "stereotype")
            .and_then(|n| n.attribute("stereotype"))
            .or_else(|| {
                child(attr, "ModelElement.stereotype")
                    .and_then(|n| child(n, "Stereotype"))
                    .and_then(|n| n.attribute("name"))
            });
        let mut example = None;
        if stereotype == Some(ENUM_STEREOTYPE) {
            if let Some(values) = resolve_enum(doc, declared_type.as_deref(), name) {
                example = values.first().map(|v| json!(v));
                property.insert("enum".into(), json!(values));
            }
        }
        if example.is_none() {
            let ty = property.get("type").cloned().unwrap_or(Value::Null);
            example = self.examples.example_for(&ty);
        }
        property.insert(
            "examples".into(),
            Value::Array(example.iter().cloned().collect()),
        );

        let tags = attribute_tags(attr);
        if !tags.is_empty() {
            property.insert("tags".into(), serde_json::to_value(tags)?);
        }

        let required = child(attr, "bounds")
            .and_then(|n| n.attribute("lower"))
            .or_else(|| tagged.get("lowerBound").map(String::as_str))
            .and_then(|l| l.trim().parse::<u32>().ok())
            .is_some_and(|lower| lower >= 1);

        tracing::debug!(attribute = name, key = %key, required, "converted attribute");
        Ok(ConvertedAttribute {
            key,
            property: filter_attributes(&property, UML_ATTRIBUTE_BLOCK_LIST),
            example,
            required,
        })
    }
}

struct ConvertedAttribute {
    key: String,
    property: Map<String, Value>,
    example: Option<Value>,
    required: bool,
}

impl SchemaParser for UmlParser {
    fn name(&self) -> &'static str {
        "uml"
    }

    fn default_encoding(&self) -> &'static str {
        "latin-1"
    }

    fn block_list(&self) -> &'static [&'static str] {
        &[]
    }

    fn parse(&mut self, source: &str, options: &ProcessOptions) -> Result<Vec<Schema>> {
        let mut parsing = ParsingOptions::default();
        parsing.allow_dtd = true;
        let doc = Document::parse_with_options(source, parsing)?;

        let wanted = options.class_name.as_deref();
        let classes: Vec<Node> = doc
            .descendants()
            .filter(|n| is_class(*n))
            .filter(|n| wanted.map_or(true, |w| n.attribute("name") == Some(w)))
            .collect();

        if classes.is_empty() {
            tracing::warn!(class = ?wanted, "no matching UML classes found");
        }

        classes
            .into_iter()
            .map(|class| self.convert_class(&doc, class))
            .collect()
    }
}

fn is_named(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_named(*n, name))
}

/// An extension `element` whose namespaced `type` marks it as a UML class,
/// or a named UML 1.3 `Class`.
fn is_class(node: Node) -> bool {
    let extension = is_named(node, "element")
        && node
            .attributes()
            .any(|a| a.name() == "type" && a.namespace().is_some() && a.value() == CLASS_TYPE);
    extension || (is_named(node, "Class") && node.has_attribute("name"))
}

/// Attribute nodes of a class, in document order.
fn class_attributes<'a, 'input>(class: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    if is_named(class, "Class") {
        child(class, "Classifier.feature")
            .into_iter()
            .flat_map(|f| f.children().filter(|n| is_named(*n, "Attribute")))
            .collect()
    } else {
        class.descendants().filter(|n| is_named(*n, "attribute")).collect()
    }
}

/// All unprefixed XML attributes of `node` as string values.
fn attribute_map(node: Node) -> Map<String, Value> {
    node.attributes()
        .filter(|a| a.namespace().is_none())
        .map(|a| (a.name().to_string(), json!(a.value())))
        .collect()
}

/// Tagged values of an element: `tag`/`value` pairs under
/// `ModelElement.taggedValue` and `name`/`value` pairs under `tags`.
fn tagged_values(node: Node) -> HashMap<String, String> {
    let legacy = node
        .children()
        .filter(|n| is_named(*n, "ModelElement.taggedValue"))
        .flat_map(|n| n.children().filter(|c| is_named(*c, "TaggedValue")))
        .filter_map(|tv| Some((tv.attribute("tag")?, tv.attribute("value")?)));
    let tags = child(node, "tags")
        .into_iter()
        .flat_map(|n| n.children().filter(|c| is_named(*c, "tag")))
        .filter_map(|t| Some((t.attribute("name")?, t.attribute("value")?)));

    legacy
        .chain(tags)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn attribute_tags(attr: Node) -> Vec<Tag> {
    child(attr, "tags")
        .into_iter()
        .flat_map(|n| n.children().filter(|c| is_named(*c, "tag")))
        .map(|t| Tag {
            name: t.attribute("name").map(str::to_string),
            value: t.attribute("value").map(str::to_string),
            notes: t.attribute("notes").map(str::to_string),
        })
        .collect()
}

fn find_element<'a, 'input>(doc: &'a Document<'input>, name: &str) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| {
        (is_named(*n, "element") || is_named(*n, "Class")) && n.attribute("name") == Some(name)
    })
}

/// Look up the enumeration class referenced by an `enum` attribute and
/// return its attribute names, first occurrence first.
///
/// The declared type is tried first (prefixed with `enum_` unless it already
/// is), then `enum_<attribute name>`, then the declared type as written.
/// Returns `None` if no such class exists; an existing class without
/// attributes yields the sentinel value.
pub fn resolve_enum(doc: &Document, declared_type: Option<&str>, attr_name: &str) -> Option<Vec<String>> {
    let mut candidates = Vec::new();
    if let Some(t) = declared_type {
        if t.starts_with(ENUM_PREFIX) {
            candidates.push(t.to_string());
        } else {
            candidates.push(format!("{ENUM_PREFIX}{t}"));
        }
    }
    candidates.push(format!("{ENUM_PREFIX}{attr_name}"));
    if let Some(t) = declared_type.filter(|t| !t.starts_with(ENUM_PREFIX)) {
        candidates.push(t.to_string());
    }

    let Some(class) = candidates.iter().find_map(|c| find_element(doc, c)) else {
        tracing::warn!(attribute = attr_name, ?candidates, "enumeration class not found");
        return None;
    };

    let values = dedup_preserving_order(
        class_attributes(class)
            .into_iter()
            .filter_map(|n| n.attribute("name").map(str::to_string)),
    );

    if values.is_empty() {
        tracing::warn!(attribute = attr_name, "enumeration has no values, using sentinel");
        return Some(vec![EMPTY_ENUM_SENTINEL.to_string()]);
    }
    Some(values)
}
