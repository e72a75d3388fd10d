use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

/// Two-letter prefix marking alphanumeric field types (`AN40`, `AN255`, ...).
const ALPHANUMERIC_PREFIX: &str = "AN";
const ENUM_PREFIX: &str = "enum_";
const GUID_TOKEN: &str = "GUID";
const CURRENCY_TOKEN: &str = "bedrag";

static FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)$").expect("float pattern is valid"));

/// Coerce a source-format token into a JSON Schema typed value.
///
/// Rules are tried in order and the first match wins:
/// - empty token → `None`
/// - `AN…` / `enum_…` / `GUID` → `"string"`
/// - `bedrag` → `"number"`
/// - all ASCII digits → integer
/// - `-?digits.digits` → float
/// - `true` / `false` (any case) → boolean
/// - anything else is passed through unchanged
pub fn coerce_token(token: &str) -> Option<Value> {
    if token.is_empty() {
        return None;
    }

    if token.starts_with(ALPHANUMERIC_PREFIX) || token.starts_with(ENUM_PREFIX) {
        return Some(Value::String("string".to_string()));
    }
    if token == GUID_TOKEN {
        return Some(Value::String("string".to_string()));
    }
    if token == CURRENCY_TOKEN {
        return Some(Value::String("number".to_string()));
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Some(match token.parse::<u64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(token.to_string()),
        });
    }

    if FLOAT_RE.is_match(token) {
        if let Some(n) = token.parse::<f64>().ok().and_then(Number::from_f64) {
            return Some(Value::Number(n));
        }
    }

    if token.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if token.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }

    Some(Value::String(token.to_string()))
}

/// Coerce an arbitrary JSON value. Only strings are coerced; anything else
/// (including `null`) yields `None`.
pub fn coerce_value(value: &Value) -> Option<Value> {
    value.as_str().and_then(coerce_token)
}

/// Coerce every value of a mapping. Keys are kept as-is and values that
/// coerce to nothing become `null`.
pub fn coerce_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), coerce_value(v).unwrap_or(Value::Null)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("123", json!(123))]
    #[case("1.5", json!(1.5))]
    #[case("-2.25", json!(-2.25))]
    #[case("true", json!(true))]
    #[case("FALSE", json!(false))]
    #[case("GUID", json!("string"))]
    #[case("bedrag", json!("number"))]
    #[case("AN40", json!("string"))]
    #[case("enum_Kleur", json!("string"))]
    #[case("foo", json!("foo"))]
    #[case("-5", json!("-5"))]
    #[case("1.", json!("1."))]
    fn coerces_tokens(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(coerce_token(token), Some(expected));
    }

    #[test]
    fn empty_and_non_string_values_coerce_to_none() {
        assert_eq!(coerce_token(""), None);
        assert_eq!(coerce_value(&Value::Null), None);
        assert_eq!(coerce_value(&json!(12)), None);
    }

    #[test]
    fn oversized_integers_pass_through() {
        let token = "123456789012345678901234567890";
        assert_eq!(coerce_token(token), Some(json!(token)));
    }

    #[test]
    fn coerce_map_keeps_keys() {
        let input = json!({"length": "40", "type": "AN40", "note": "", "flag": "True"});
        let out = coerce_map(input.as_object().unwrap());
        assert_eq!(
            Value::Object(out),
            json!({"length": 40, "type": "string", "note": null, "flag": true})
        );
    }
}
