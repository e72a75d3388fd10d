use serde_json::{Map, Value};

use crate::error::{Error, Result};

const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derive a filesystem-safe name from a schema's `title`.
///
/// The title is trimmed and lower-cased, and characters that are invalid in
/// file names are replaced with `_`. A result that is empty, `.` or `..`
/// cannot name a directory and is rejected.
pub fn derive_title(schema: &Map<String, Value>) -> Result<String> {
    let title = match schema.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => return Err(Error::MissingTitle),
        Some(other) => other.to_string(),
    };

    let name: String = title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if matches!(name.as_str(), "" | "." | "..") {
        return Err(Error::Malformed(format!(
            "title `{title}` is not a usable file name"
        )));
    }
    Ok(name)
}

/// Lower-case the first character of `input`, leaving the rest untouched.
pub fn lowercase_first_letter(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
