//! Schema checks run when a widget loads its schema.
//!
//! Duplicate data field names are rejected under every policy. The strict
//! policy additionally rejects anything the lenient renderer would silently
//! skip or fail on later: unknown field kinds, unknown input subtypes,
//! binding fields without a name and named fields that cannot join the
//! validation model.

use super::{FieldDescriptor, FieldKind, FormSchema};
use crate::errors::{FormError, UnsupportedFieldKindError};
use crate::registry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How schema oddities are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPolicy {
    /// Unknown kinds and unnamed fields render as nothing.
    #[default]
    Lenient,
    /// Unknown kinds and unnamed fields fail at load time.
    Strict,
}

impl SchemaPolicy {
    /// Returns true for [`SchemaPolicy::Strict`].
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Validates a schema under the given policy.
pub fn validate_schema(schema: &FormSchema, policy: SchemaPolicy) -> Result<(), FormError> {
    validate_unique_names(schema)?;

    for (row, position, field) in schema.fields() {
        if let Err(err) = validate_field(row, position, field) {
            if policy.is_strict() {
                return Err(err);
            }
            tracing::warn!(row, position, error = %err, "Field will not be rendered");
        }

        if let Some(value) = duplicate_item_value(field) {
            tracing::warn!(
                row,
                position,
                value,
                "Duplicate item value, later text replaces earlier"
            );
        }
    }

    Ok(())
}

/// Checks that no two data fields share a name.
pub fn validate_unique_names(schema: &FormSchema) -> Result<(), FormError> {
    let mut seen = HashSet::new();
    for (_, _, field) in schema.fields() {
        if let Some(name) = field.data_name() {
            if !seen.insert(name) {
                return Err(FormError::duplicate_field_name(name));
            }
        }
    }
    Ok(())
}

fn validate_field(row: usize, position: usize, field: &FieldDescriptor) -> Result<(), FormError> {
    if !field.field.is_known() {
        return Err(UnsupportedFieldKindError::new(field.field.as_str()).into());
    }

    if field.field == FieldKind::Input {
        if let Some(ref subtype) = field.input_type {
            if !subtype.is_known() {
                return Err(
                    UnsupportedFieldKindError::with_subtype("input", subtype.as_str()).into(),
                );
            }
        }
    }

    if field.field.binds_model() && field.data_name().is_none() {
        return Err(FormError::missing_field_name(
            field.field.as_str(),
            row,
            position,
        ));
    }

    // Any named field joins the model, so it needs a rule kind.
    if field.data_name().is_some() && registry::rule_type_lenient(field).is_none() {
        return Err(UnsupportedFieldKindError::new(field.field.as_str()).into());
    }

    Ok(())
}

fn duplicate_item_value(field: &FieldDescriptor) -> Option<&str> {
    let mut seen = HashSet::new();
    field
        .items
        .iter()
        .map(|item| item.value.as_str())
        .find(|value| !seen.insert(*value))
}
