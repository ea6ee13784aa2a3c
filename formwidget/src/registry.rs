//! Field type registry.
//!
//! Maps a field's kind (and subtype, for inputs) to the validation rule kind
//! attached to its model attribute and to the storage column kind.

use crate::errors::{FormError, UnsupportedFieldKindError};
use crate::schema::{FieldDescriptor, FieldKind, InputType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract validation category of a model attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Any text.
    String,
    /// An email address.
    Email,
    /// A calendar date.
    Date,
    /// An integer.
    Integer,
    /// An absolute http(s) URL.
    Url,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Email => write!(f, "email"),
            Self::Date => write!(f, "date"),
            Self::Integer => write!(f, "integer"),
            Self::Url => write!(f, "url"),
        }
    }
}

/// Abstract storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Auto-incrementing primary key.
    PrimaryKey,
    /// Short text.
    String,
    /// Long text.
    Text,
    /// Integer.
    Integer,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey => write!(f, "primary-key"),
            Self::String => write!(f, "string"),
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

fn unsupported(field: &FieldDescriptor) -> FormError {
    match field.field {
        FieldKind::Input => UnsupportedFieldKindError::with_subtype(
            field.field.as_str(),
            field.input_type_or_default().as_str(),
        )
        .into(),
        ref other => UnsupportedFieldKindError::new(other.as_str()).into(),
    }
}

/// Returns the rule kind for a field, or `None` when it has no mapping.
#[must_use]
pub fn rule_type_lenient(field: &FieldDescriptor) -> Option<RuleKind> {
    match field.field {
        FieldKind::Input => match field.input_type_or_default() {
            InputType::Text
            | InputType::Tel
            | InputType::Color
            | InputType::Range
            | InputType::Password => Some(RuleKind::String),
            InputType::Email => Some(RuleKind::Email),
            InputType::Date => Some(RuleKind::Date),
            InputType::Number => Some(RuleKind::Integer),
            InputType::Url => Some(RuleKind::Url),
            InputType::Other(_) => None,
        },
        FieldKind::Textarea | FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select => {
            Some(RuleKind::String)
        }
        FieldKind::Description | FieldKind::Submit | FieldKind::Other(_) => None,
    }
}

/// Returns the column kind for a field, or `None` when it has no mapping.
#[must_use]
pub fn column_type_lenient(field: &FieldDescriptor) -> Option<ColumnKind> {
    match field.field {
        FieldKind::Input => match field.input_type_or_default() {
            InputType::Number => Some(ColumnKind::Integer),
            InputType::Other(_) => None,
            _ => Some(ColumnKind::String),
        },
        FieldKind::Textarea => Some(ColumnKind::Text),
        FieldKind::Checkbox | FieldKind::Radio | FieldKind::Select => Some(ColumnKind::String),
        FieldKind::Description | FieldKind::Submit | FieldKind::Other(_) => None,
    }
}

/// Returns the rule kind for a field.
///
/// Fails with [`FormError::UnsupportedFieldKind`] for description, submit,
/// unknown kinds and unknown input subtypes.
pub fn rule_type(field: &FieldDescriptor) -> Result<RuleKind, FormError> {
    rule_type_lenient(field).ok_or_else(|| unsupported(field))
}

/// Returns the column kind for a field.
///
/// Fails with [`FormError::UnsupportedFieldKind`] for description, submit,
/// unknown kinds and unknown input subtypes.
pub fn column_type(field: &FieldDescriptor) -> Result<ColumnKind, FormError> {
    column_type_lenient(field).ok_or_else(|| unsupported(field))
}
