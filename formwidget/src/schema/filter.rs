//! Data field extraction and storage column derivation.

use super::{FieldDescriptor, FieldKind, FormSchema};
use crate::registry::ColumnKind;
use indexmap::IndexMap;

/// Name of the synthetic primary key column.
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// Ordered column map produced by [`table_schema`].
pub type TableSchema = IndexMap<String, ColumnKind>;

/// Returns the descriptors that carry a non-empty `name`.
///
/// Order is row-major, then position within the row.
#[must_use]
pub fn only_data_fields(schema: &FormSchema) -> Vec<&FieldDescriptor> {
    schema
        .fields()
        .filter_map(|(_, _, field)| field.data_name().map(|_| field))
        .collect()
}

/// Derives the storage columns for a schema.
///
/// The first column is always `id` as a primary key. Every data field then
/// maps to `text` when it is a textarea and to `string` otherwise; the finer
/// registry mapping is not used here. A data field named `id` does not
/// replace the primary key.
#[must_use]
pub fn table_schema(schema: &FormSchema) -> TableSchema {
    let mut columns = TableSchema::new();
    columns.insert(PRIMARY_KEY_COLUMN.to_string(), ColumnKind::PrimaryKey);

    for field in only_data_fields(schema) {
        let Some(name) = field.data_name() else {
            continue;
        };
        if name == PRIMARY_KEY_COLUMN {
            tracing::warn!(field = name, "Data field shadows the primary key column, skipped");
            continue;
        }

        let kind = if field.field == FieldKind::Textarea {
            ColumnKind::Text
        } else {
            ColumnKind::String
        };
        columns.insert(name.to_string(), kind);
    }

    columns
}
