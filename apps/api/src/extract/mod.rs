//! Structured-Response Extractor — recovers a well-formed JSON value from
//! unreliable free-text model output.
//!
//! Models wrap JSON in prose, code fences, and trailing commas. Every
//! AI-backed service funnels raw output through [`extract`], which applies a
//! fixed recovery pipeline and degrades to a caller-supplied fallback on
//! failure. The function is total: callers always receive a usable value and
//! never need to special-case bad model output.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Expected top-level type of the extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
        }
    }

    fn delimiters(&self) -> (char, char) {
        match self {
            Shape::Object => ('{', '}'),
            Shape::Array => ('[', ']'),
        }
    }
}

/// Tagged outcome of extraction. `Fallback` is a degraded success, not an
/// error — both arms carry a usable `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredResult<T> {
    Parsed(T),
    Fallback { value: T, reason: &'static str },
}

impl<T> StructuredResult<T> {
    /// Unwraps to the usable value regardless of provenance.
    pub fn into_value(self) -> T {
        match self {
            StructuredResult::Parsed(v) => v,
            StructuredResult::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StructuredResult::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&'static str> {
        match self {
            StructuredResult::Parsed(_) => None,
            StructuredResult::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Default used to fill a missing required field.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    /// Empty string.
    Text,
    /// Empty list.
    List,
}

impl FieldDefault {
    fn empty_value(&self) -> Value {
        match self {
            FieldDefault::Text => Value::String(String::new()),
            FieldDefault::List => Value::Array(Vec::new()),
        }
    }
}

/// A field the caller requires on object-shaped results. Missing or null
/// fields are filled with an empty default rather than triggering fallback —
/// a partial structured result beats a full fallback when the shape is
/// otherwise correct.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub name: &'static str,
    pub default: FieldDefault,
}

impl RequiredField {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Text,
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::List,
        }
    }
}

/// Extracts a `T` from raw model output, or returns `fallback` if no value of
/// the expected shape can be recovered. Pure over its inputs; never errors.
pub fn extract<T: DeserializeOwned>(
    raw: &str,
    shape: Shape,
    required: &[RequiredField],
    fallback: T,
) -> StructuredResult<T> {
    let value = match recover(raw, shape) {
        Ok(v) => v,
        Err(reason) => {
            return StructuredResult::Fallback {
                value: fallback,
                reason,
            }
        }
    };

    match coerce(value, required) {
        Some(parsed) => StructuredResult::Parsed(parsed),
        None => StructuredResult::Fallback {
            value: fallback,
            reason: "schema",
        },
    }
}

/// Recovery pipeline, applied in order, stopping at the first parse that
/// matches `shape`:
///
/// 1. strip a leading/trailing code fence
/// 2. direct parse
/// 3. parse the substring between the first opening and last closing
///    delimiter of the expected shape (rescues JSON embedded in prose)
/// 4. lenient repair (collapse newlines, drop trailing commas) and re-parse
pub fn recover(raw: &str, shape: Shape) -> Result<Value, &'static str> {
    let text = strip_fences(raw.trim());
    let mut wrong_shape = false;

    if let Ok(v) = serde_json::from_str::<Value>(text) {
        if shape.matches(&v) {
            return Ok(v);
        }
        wrong_shape = true;
    }

    let candidate = match delimited_slice(text, shape) {
        Some(slice) => {
            if let Ok(v) = serde_json::from_str::<Value>(slice) {
                if shape.matches(&v) {
                    debug!("recovered JSON from delimited substring");
                    return Ok(v);
                }
                wrong_shape = true;
            }
            slice
        }
        None => text,
    };

    let repaired = repair(candidate);
    if let Ok(v) = serde_json::from_str::<Value>(&repaired) {
        if shape.matches(&v) {
            debug!("recovered JSON after lenient repair");
            return Ok(v);
        }
        wrong_shape = true;
    }

    Err(if wrong_shape { "shape" } else { "unparseable" })
}

/// Fills missing required object fields with empty defaults, then
/// deserializes. Returns `None` only when the value still does not fit `T`.
pub fn coerce<T: DeserializeOwned>(mut value: Value, required: &[RequiredField]) -> Option<T> {
    if let Value::Object(map) = &mut value {
        for field in required {
            if map.get(field.name).map_or(true, Value::is_null) {
                debug!(field = field.name, "filling missing field with default");
                map.insert(field.name.to_string(), field.default.empty_value());
            }
        }
    }
    serde_json::from_value(value).ok()
}

/// Strips a ```json ... ``` or ``` ... ``` wrapper at the very start/end of
/// the trimmed text. Fences in the middle of the text are left alone.
fn strip_fences(text: &str) -> &str {
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
        }
        None => text,
    }
}

/// The substring from the first opening delimiter to the last closing
/// delimiter, inclusive. Both delimiters are single-byte, so slicing on
/// their byte indices is safe.
fn delimited_slice(text: &str, shape: Shape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Last-resort repair: collapse raw newlines (which some models emit inside
/// string literals) and drop trailing commas before a closing delimiter.
fn repair(text: &str) -> String {
    let collapsed: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    strip_trailing_commas(&collapsed)
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
                i += 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tip {
        tip: String,
        category: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Posting {
        title: String,
        responsibilities: Vec<String>,
    }

    fn fallback_posting() -> Posting {
        Posting {
            title: "fallback".to_string(),
            responsibilities: vec![],
        }
    }

    #[test]
    fn test_clean_json_parses_directly() {
        let raw = r#"{"title": "Engineer", "responsibilities": ["ship"]}"#;
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert_eq!(
            result,
            StructuredResult::Parsed(Posting {
                title: "Engineer".to_string(),
                responsibilities: vec!["ship".to_string()],
            })
        );
    }

    #[test]
    fn test_fenced_json_is_unwrapped() {
        let raw = "```json\n{\"title\": \"Engineer\", \"responsibilities\": []}\n```";
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert!(!result.is_fallback());
        assert_eq!(result.into_value().title, "Engineer");
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "```\n[1, 2, 3]\n```";
        let result = extract::<Vec<i32>>(raw, Shape::Array, &[], vec![]);
        assert_eq!(result, StructuredResult::Parsed(vec![1, 2, 3]));
    }

    #[test]
    fn test_json_embedded_in_prose_is_rescued() {
        let raw = "Sure! Here is the structured posting you asked for:\n\
                   {\"title\": \"Analyst\", \"responsibilities\": [\"report\"]}\n\
                   Let me know if you need anything else.";
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert!(!result.is_fallback());
        assert_eq!(result.into_value().title, "Analyst");
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let raw = "Here are your tips:\n[{\"tip\": \"hydrate\", \"category\": \"general\"}]\nEnjoy!";
        let result = extract::<Vec<Tip>>(raw, Shape::Array, &[], vec![]);
        let tips = result.into_value();
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].tip, "hydrate");
    }

    #[test]
    fn test_trailing_commas_are_repaired() {
        let raw = "{\"title\": \"Engineer\",\n \"responsibilities\": [\"ship\",],\n}";
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert!(!result.is_fallback());
        assert_eq!(
            result.into_value().responsibilities,
            vec!["ship".to_string()]
        );
    }

    #[test]
    fn test_unparseable_text_returns_fallback() {
        let raw = "I'm sorry, I can't produce that right now.";
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert_eq!(result.fallback_reason(), Some("unparseable"));
        assert_eq!(result.into_value(), fallback_posting());
    }

    #[test]
    fn test_empty_input_returns_fallback() {
        let result = extract("", Shape::Array, &[], vec![0i32]);
        assert!(result.is_fallback());
        assert_eq!(result.into_value(), vec![0]);
    }

    #[test]
    fn test_object_when_array_expected_is_shape_fallback() {
        let raw = r#"{"a": 1}"#;
        let result = extract::<Vec<i32>>(raw, Shape::Array, &[], vec![]);
        assert_eq!(result.fallback_reason(), Some("shape"));
    }

    #[test]
    fn test_array_inside_envelope_object_is_rescued() {
        // Models sometimes wrap the requested array in an envelope object.
        // The delimited-substring step pulls the inner array out.
        let raw = r#"{"skills": [{"tip": "a", "category": "b"}]}"#;
        let result = extract::<Vec<Tip>>(raw, Shape::Array, &[], vec![]);
        assert!(!result.is_fallback());
        assert_eq!(result.into_value()[0].tip, "a");
    }

    #[test]
    fn test_missing_required_field_is_filled_with_default() {
        let raw = r#"{"title": "Engineer"}"#;
        let required = [RequiredField::list("responsibilities")];
        let result = extract(raw, Shape::Object, &required, fallback_posting());
        assert!(!result.is_fallback());
        assert!(result.into_value().responsibilities.is_empty());
    }

    #[test]
    fn test_null_required_field_is_replaced() {
        let raw = r#"{"title": null, "responsibilities": []}"#;
        let required = [RequiredField::text("title")];
        let result = extract(raw, Shape::Object, &required, fallback_posting());
        assert!(!result.is_fallback());
        assert_eq!(result.into_value().title, "");
    }

    #[test]
    fn test_schema_mismatch_after_parse_returns_fallback() {
        // Parses fine as an object but does not fit the target type.
        let raw = r#"{"title": 42, "responsibilities": "not a list"}"#;
        let result = extract(raw, Shape::Object, &[], fallback_posting());
        assert_eq!(result.fallback_reason(), Some("schema"));
    }

    #[test]
    fn test_recover_exposes_raw_value() {
        let value = recover("prefix {\"k\": [1, 2,]} suffix", Shape::Object).unwrap();
        assert_eq!(value, json!({"k": [1, 2]}));
    }

    #[test]
    fn test_strip_fences_leaves_inner_fences_alone() {
        let text = "{\"doc\": \"use ``` for code\"}";
        assert_eq!(strip_fences(text), text);
    }

    #[test]
    fn test_strip_trailing_commas_nested() {
        let fixed = strip_trailing_commas("[{\"a\": 1,}, {\"b\": [2,],},]");
        assert_eq!(fixed, "[{\"a\": 1}, {\"b\": [2]}]");
    }

    #[test]
    fn test_strip_trailing_commas_keeps_separators() {
        let fixed = strip_trailing_commas("[1, 2, 3]");
        assert_eq!(fixed, "[1, 2, 3]");
    }

    #[test]
    fn test_into_value_on_parsed_and_fallback() {
        let parsed = StructuredResult::Parsed(7);
        assert_eq!(parsed.into_value(), 7);
        let degraded = StructuredResult::Fallback {
            value: 9,
            reason: "unparseable",
        };
        assert!(degraded.is_fallback());
        assert_eq!(degraded.into_value(), 9);
    }
}
