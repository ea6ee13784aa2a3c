//! Error types for form loading, rendering and notification.
//!
//! Schema problems, missing stored forms and collaborator failures each get a
//! dedicated variant so callers can tell an authoring bug from an outage.

use std::collections::HashMap;
use thiserror::Error;

/// Identifier of a stored form.
pub type FormId = i64;

/// The main error type for formwidget operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form body is not valid schema JSON.
    #[error("{0}")]
    SchemaDecode(#[from] SchemaDecodeError),

    /// A stored form was requested but does not exist.
    #[error("Form not found: no stored form with id {id}")]
    FormNotFound {
        /// The requested id.
        id: FormId,
    },

    /// A field kind or input subtype has no rule/column mapping.
    #[error("{0}")]
    UnsupportedFieldKind(#[from] UnsupportedFieldKindError),

    /// A field that binds to the model has no `name` (strict policy only).
    #[error("Field '{kind}' at row {row}, position {position} has no name")]
    MissingFieldName {
        /// The declared field kind.
        kind: String,
        /// Zero-based row index.
        row: usize,
        /// Zero-based position within the row.
        position: usize,
    },

    /// Two data fields share the same name.
    #[error("Duplicate field name: '{name}'")]
    DuplicateFieldName {
        /// The repeated name.
        name: String,
    },

    /// The form store failed while looking up a form.
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// The mail sender failed.
    #[error("Mail delivery failed: {0}")]
    Mail(#[source] anyhow::Error),

    /// Widget configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FormError {
    /// Creates a form not found error.
    #[must_use]
    pub fn form_not_found(id: FormId) -> Self {
        Self::FormNotFound { id }
    }

    /// Creates a duplicate field name error.
    #[must_use]
    pub fn duplicate_field_name(name: impl Into<String>) -> Self {
        Self::DuplicateFieldName { name: name.into() }
    }

    /// Creates a missing field name error.
    #[must_use]
    pub fn missing_field_name(kind: impl Into<String>, row: usize, position: usize) -> Self {
        Self::MissingFieldName {
            kind: kind.into(),
            row,
            position,
        }
    }

    /// Returns a stable machine-readable code for the error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SchemaDecode(_) => "SCHEMA-DECODE",
            Self::FormNotFound { .. } => "FORM-NOT-FOUND",
            Self::UnsupportedFieldKind(_) => "FIELD-UNSUPPORTED",
            Self::MissingFieldName { .. } => "FIELD-MISSING-NAME",
            Self::DuplicateFieldName { .. } => "FIELD-DUPLICATE-NAME",
            Self::Storage(_) => "STORAGE",
            Self::Mail(_) => "MAIL",
            Self::Config(_) => "CONFIG",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));

        match self {
            Self::SchemaDecode(err) => {
                map.insert("line".to_string(), serde_json::json!(err.line));
                map.insert("column".to_string(), serde_json::json!(err.column));
            }
            Self::FormNotFound { id } => {
                map.insert("form_id".to_string(), serde_json::json!(id));
            }
            Self::UnsupportedFieldKind(err) => {
                map.insert("field".to_string(), serde_json::json!(err.field));
                if let Some(ref subtype) = err.subtype {
                    map.insert("type".to_string(), serde_json::json!(subtype));
                }
            }
            Self::MissingFieldName { kind, row, position } => {
                map.insert("field".to_string(), serde_json::json!(kind));
                map.insert("row".to_string(), serde_json::json!(row));
                map.insert("position".to_string(), serde_json::json!(position));
            }
            Self::DuplicateFieldName { name } => {
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::Storage(_) | Self::Mail(_) | Self::Config(_) => {}
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Error raised when a form body cannot be decoded into a schema.
#[derive(Debug, Clone, Error)]
#[error("Schema decode error at line {line}, column {column}: {message}")]
pub struct SchemaDecodeError {
    /// The decoder message.
    pub message: String,
    /// One-based line of the failure, 0 when unknown.
    pub line: usize,
    /// One-based column of the failure, 0 when unknown.
    pub column: usize,
}

impl SchemaDecodeError {
    /// Creates a decode error without position information.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
            column: 0,
        }
    }
}

impl From<serde_json::Error> for SchemaDecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::SchemaDecode(err.into())
    }
}

/// Error raised when a field has no rule or column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported field kind: {}", describe(field, subtype.as_deref()))]
pub struct UnsupportedFieldKindError {
    /// The declared `field` value.
    pub field: String,
    /// The declared `type` value, for inputs.
    pub subtype: Option<String>,
}

fn describe(field: &str, subtype: Option<&str>) -> String {
    match subtype {
        Some(subtype) => format!("{field}/{subtype}"),
        None => field.to_string(),
    }
}

impl UnsupportedFieldKindError {
    /// Creates an error for a bare field kind.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            subtype: None,
        }
    }

    /// Creates an error for an input subtype.
    #[must_use]
    pub fn with_subtype(field: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            subtype: Some(subtype.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_not_found_message() {
        let err = FormError::form_not_found(42);
        assert!(err.to_string().contains("42"));
        assert_eq!(err.code(), "FORM-NOT-FOUND");
    }

    #[test]
    fn test_schema_decode_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("[[{").unwrap_err();
        let err: FormError = serde_err.into();

        assert_eq!(err.code(), "SCHEMA-DECODE");
        let dict = err.to_dict();
        assert_eq!(dict.get("line").unwrap(), 1);
    }

    #[test]
    fn test_unsupported_field_kind_display() {
        let err = UnsupportedFieldKindError::with_subtype("input", "file");
        assert_eq!(err.to_string(), "Unsupported field kind: input/file");

        let err = UnsupportedFieldKindError::new("slider");
        assert_eq!(err.to_string(), "Unsupported field kind: slider");
    }

    #[test]
    fn test_to_dict_duplicate_name() {
        let err = FormError::duplicate_field_name("email");
        let dict = err.to_dict();

        assert_eq!(dict.get("code").unwrap(), "FIELD-DUPLICATE-NAME");
        assert_eq!(dict.get("name").unwrap(), "email");
        assert!(dict.contains_key("message"));
    }

    #[test]
    fn test_mail_error_keeps_source() {
        let err = FormError::Mail(anyhow::anyhow!("smtp refused"));
        assert!(err.to_string().contains("smtp refused"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
