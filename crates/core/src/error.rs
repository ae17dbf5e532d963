//! Error model shared by the session phases.
//!
//! None of these errors ever escapes a phase: the engines log them and
//! degrade to an empty (or, for authz, denying) result.

use std::path::PathBuf;

use thiserror::Error;

/// JSON was present but did not have the shape a phase expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A member was missing or had the wrong JSON type.
    #[error("value of field '{field}' does not have type {expected} in JSON response")]
    WrongType {
        field: String,
        expected: JsonKind,
    },

    /// An array element (or one of its members) had the wrong JSON type.
    #[error("value of {context} in element {index} of '{array}' does not have type {expected} in JSON response")]
    WrongElementType {
        array: String,
        index: usize,
        context: String,
        expected: JsonKind,
    },
}

impl SchemaError {
    pub fn wrong_type(field: impl Into<String>, expected: JsonKind) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
        }
    }

    /// The element itself had the wrong type.
    pub fn element(array: impl Into<String>, index: usize, expected: JsonKind) -> Self {
        Self::WrongElementType {
            array: array.into(),
            index,
            context: "the value".to_string(),
            expected,
        }
    }

    /// A member of an object element had the wrong type.
    pub fn element_member(
        array: impl Into<String>,
        index: usize,
        member: &str,
        expected: JsonKind,
    ) -> Self {
        Self::WrongElementType {
            array: array.into(),
            index,
            context: format!("'{member}'"),
            expected,
        }
    }
}

/// JSON value kinds named in schema errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Boolean,
}

impl core::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Boolean => "boolean",
        })
    }
}

/// A local file could not be loaded as JSON.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("error reading JSON file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing JSON file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The interactive conversation reported a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("conversation failed: {0}")]
pub struct CallbackError(pub String);

impl CallbackError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A module argument could not be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not parse arg: {0}")]
    Malformed(String),

    #[error("got arg with multiple '=': {0}")]
    MultipleSeparators(String),

    #[error("got unknown flag: {0}")]
    UnknownFlag(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}
