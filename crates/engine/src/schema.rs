//! Typed decoding of policy engine results.
//!
//! Each phase validates the shape of its `result` object here, in one place.
//! Top-level violations are returned as errors; element violations stop the
//! array at the failing index and keep what came before it.

use pam_policy_core::{JsonKind, SchemaError};
use pam_policy_transport::JsonObject;
use serde_json::Value as JsonValue;

use crate::conversation::MessageStyle;

/// Style of a display entry as sent by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStyle {
    Known(MessageStyle),
    /// Not one of the four recognised names; the entry is skipped.
    Unrecognized(String),
}

/// One instruction from the display spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub message: String,
    pub style: DisplayStyle,
    /// Always present for prompting styles.
    pub key: Option<String>,
}

impl DisplayEntry {
    /// Decode element `index` of `display_spec`.
    pub fn decode(index: usize, value: &JsonValue) -> Result<Self, SchemaError> {
        let JsonValue::Object(entry) = value else {
            return Err(SchemaError::element("display_spec", index, JsonKind::Object));
        };

        let member = |name: &str| match entry.get(name) {
            Some(JsonValue::String(s)) => Ok(s.clone()),
            _ => Err(SchemaError::element_member(
                "display_spec",
                index,
                name,
                JsonKind::String,
            )),
        };

        let message = member("message")?;
        let style_name = member("style")?;

        let style = match MessageStyle::from_wire(&style_name) {
            Some(style) => DisplayStyle::Known(style),
            None => DisplayStyle::Unrecognized(style_name),
        };

        let key = match &style {
            DisplayStyle::Known(s) if s.is_prompt() => Some(member("key")?),
            _ => None,
        };

        Ok(Self { message, style, key })
    }
}

/// Elements of `result.display_spec`, decoded lazily in order.
pub fn display_entries(
    result: &JsonObject,
) -> Result<impl Iterator<Item = Result<DisplayEntry, SchemaError>> + '_, SchemaError> {
    match result.get("display_spec") {
        Some(JsonValue::Array(items)) => Ok(items
            .iter()
            .enumerate()
            .map(|(index, value)| DisplayEntry::decode(index, value))),
        _ => Err(SchemaError::wrong_type("display_spec", JsonKind::Array)),
    }
}

/// Leading string elements of an array member.
///
/// `violation` is set when a non-string element cut the array short (or, via
/// [`StringArray::rejected`], when the member itself was unusable).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringArray {
    pub values: Vec<String>,
    pub violation: Option<SchemaError>,
}

impl StringArray {
    pub fn rejected(err: SchemaError) -> Self {
        Self {
            values: Vec::new(),
            violation: Some(err),
        }
    }
}

/// Decode `result[field]` as an array of strings.
pub fn string_array(result: &JsonObject, field: &str) -> Result<StringArray, SchemaError> {
    let Some(JsonValue::Array(items)) = result.get(field) else {
        return Err(SchemaError::wrong_type(field, JsonKind::Array));
    };

    let mut out = StringArray::default();
    for (index, item) in items.iter().enumerate() {
        match item {
            JsonValue::String(s) => out.values.push(s.clone()),
            _ => {
                out.violation = Some(SchemaError::element(field, index, JsonKind::String));
                break;
            }
        }
    }
    Ok(out)
}

/// Decoded authz result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzResult {
    pub allow: bool,
    /// Diagnostics from the engine; a malformed field never affects `allow`.
    pub errors: StringArray,
}

impl AuthzResult {
    /// Fails only when `allow` is missing or not a boolean.
    pub fn decode(result: &JsonObject) -> Result<Self, SchemaError> {
        let Some(JsonValue::Bool(allow)) = result.get("allow") else {
            return Err(SchemaError::wrong_type("allow", JsonKind::Boolean));
        };

        let errors = string_array(result, "errors").unwrap_or_else(StringArray::rejected);

        Ok(Self {
            allow: *allow,
            errors,
        })
    }
}
