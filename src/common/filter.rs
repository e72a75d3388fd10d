use serde_json::{Map, Value};

/// Administrative keys stripped from tabular schema documents.
pub const TABULAR_BLOCK_LIST: &[&str] = &[
    "$ref",
    "license",
    "status",
    "version",
    "theme",
    "publisher",
    "owner",
    "authorizationGrantor",
    "keywords",
    "crs",
];

/// Modeling-tool descriptor keys stripped from UML attribute properties.
pub const UML_ATTRIBUTE_BLOCK_LIST: &[&str] = &[
    "stereotype",
    "derived",
    "collection",
    "duplicates",
    "changeability",
    "precision",
    "scale",
    "static",
    "containment",
    "ordered",
    "position",
];

/// Return a copy of `map` without the keys named in `block_list`.
pub fn filter_attributes(map: &Map<String, Value>, block_list: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| !block_list.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
