//! Typed decoding of the navigation fields.
//!
//! Front matter values are untyped YAML. Each navigation field is classified
//! on its own so a wrongly typed `weight` does not hide a valid `title`.

use std::fmt;

use serde_yaml::Value;

use crate::FrontMatter;

/// Key holding the page title.
const TITLE: &str = "title";
/// Key holding the navigation title override.
const LINK_TITLE: &str = "linkTitle";
/// Key holding the sort weight.
const WEIGHT: &str = "weight";

/// Kind of a YAML value, used in mismatch reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
    Tagged,
}

impl ValueKind {
    /// Classify a YAML value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Sequence(_) => Self::Sequence,
            Value::Mapping(_) => Self::Mapping,
            Value::Tagged(_) => Self::Tagged,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "a boolean",
            Self::Integer => "an integer",
            Self::Float => "a float",
            Self::String => "a string",
            Self::Sequence => "a sequence",
            Self::Mapping => "a mapping",
            Self::Tagged => "a tagged value",
        };
        f.write_str(name)
    }
}

/// A navigation field that is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Value has the wrong type.
    #[error("unexpected value for `{field}`: expected {expected}, found {found}")]
    Mismatch {
        field: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },
    /// Integer does not fit the weight range.
    #[error("value for `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Mismatch { field, .. } | Self::OutOfRange { field, .. } => *field,
        }
    }
}

/// Navigation fields decoded from front matter.
///
/// Absent fields are `None`. Fields present with the wrong type are also
/// `None` and recorded in `errors`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NavFields {
    /// `title` value.
    pub title: Option<String>,
    /// `linkTitle` value.
    pub link_title: Option<String>,
    /// `weight` value.
    pub weight: Option<i64>,
    /// Fields that were present but could not be decoded.
    pub errors: Vec<FieldError>,
}

impl NavFields {
    /// Decode `title`, `linkTitle` and `weight`.
    #[must_use]
    pub fn decode(front: &FrontMatter) -> Self {
        let mut errors = Vec::new();
        let title = take(string_field(front, TITLE), &mut errors);
        let link_title = take(string_field(front, LINK_TITLE), &mut errors);
        let weight = take(integer_field(front, WEIGHT), &mut errors);

        Self {
            title,
            link_title,
            weight,
            errors,
        }
    }

    /// Title shown in navigation: `linkTitle` when set, `title` otherwise.
    ///
    /// Returns `None` when the page has no usable `title`, even if it has a
    /// `linkTitle`.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        let title = self.title.as_deref()?;
        Some(self.link_title.as_deref().unwrap_or(title))
    }
}

/// Unwrap a decoded field, recording the error and treating the field as absent.
fn take<T>(result: Result<Option<T>, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        errors.push(e);
        None
    })
}

fn string_field(front: &FrontMatter, field: &'static str) -> Result<Option<String>, FieldError> {
    match front.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FieldError::Mismatch {
            field,
            expected: ValueKind::String,
            found: ValueKind::of(other),
        }),
    }
}

fn integer_field(front: &FrontMatter, field: &'static str) -> Result<Option<i64>, FieldError> {
    match front.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) if n.is_f64() => Err(FieldError::Mismatch {
            field,
            expected: ValueKind::Integer,
            found: ValueKind::Float,
        }),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| FieldError::OutOfRange {
            field,
            value: n.to_string(),
        }),
        Some(other) => Err(FieldError::Mismatch {
            field,
            expected: ValueKind::Integer,
            found: ValueKind::of(other),
        }),
    }
}
