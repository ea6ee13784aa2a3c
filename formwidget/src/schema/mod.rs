//! Form schema model.
//!
//! A schema is an ordered list of rows, each row an ordered list of field
//! descriptors. Rows only affect layout; the order of rows and of fields
//! within a row is the rendering order.
//!
//! Field kinds and input subtypes are closed enums with an `Other` variant so
//! that a schema written for a newer builder still decodes. Whether an
//! `Other` value is tolerated is decided later by a [`SchemaPolicy`].

pub mod filter;
pub mod validation;
pub mod values;

pub use filter::{only_data_fields, table_schema, TableSchema};
pub use validation::{validate_schema, SchemaPolicy};

use crate::errors::{FormError, SchemaDecodeError};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The kind of a form field, taken from the descriptor's `field` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line typed input.
    Input,
    /// Multi-line text input.
    Textarea,
    /// Radio button group.
    Radio,
    /// Checkbox group.
    Checkbox,
    /// Dropdown list.
    Select,
    /// Static markup.
    Description,
    /// Submit button.
    Submit,
    /// A kind this crate does not know about.
    Other(String),
}

impl FieldKind {
    /// Returns the schema spelling of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Description => "description",
            Self::Submit => "submit",
            Self::Other(other) => other,
        }
    }

    /// Returns true for kinds that bind a model attribute when rendered.
    #[must_use]
    pub fn binds_model(&self) -> bool {
        matches!(
            self,
            Self::Input | Self::Textarea | Self::Radio | Self::Checkbox | Self::Select
        )
    }

    /// Returns true unless the kind is [`FieldKind::Other`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "description" => Self::Description,
            "submit" => Self::Submit,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subtype of an `input` field, taken from the descriptor's `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputType {
    /// Plain text.
    Text,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Calendar date.
    Date,
    /// Number.
    Number,
    /// URL.
    Url,
    /// Telephone number.
    Tel,
    /// Color picker.
    Color,
    /// Range slider.
    Range,
    /// A subtype this crate does not know about.
    Other(String),
}

impl InputType {
    /// Returns the HTML `type` attribute value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Date => "date",
            Self::Number => "number",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Color => "color",
            Self::Range => "range",
            Self::Other(other) => other,
        }
    }

    /// Returns true unless the subtype is [`InputType::Other`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for InputType {
    fn default() -> Self {
        Self::Text
    }
}

impl From<String> for InputType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            "date" => Self::Date,
            "number" => Self::Number,
            "url" => Self::Url,
            "tel" => Self::Tel,
            "color" => Self::Color,
            "range" => Self::Range,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for InputType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<InputType> for String {
    fn from(input_type: InputType) -> Self {
        match input_type {
            InputType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option of a radio, checkbox or select field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Submitted value.
    #[serde(default, deserialize_with = "values::text")]
    pub value: String,
    /// Visible text.
    #[serde(default, deserialize_with = "values::text")]
    pub text: String,
    /// Whether the option starts selected.
    #[serde(
        default,
        deserialize_with = "values::truthy",
        skip_serializing_if = "values::is_false"
    )]
    pub checked: bool,
}

impl Item {
    /// Creates an unchecked item.
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            checked: false,
        }
    }

    /// Marks the item as checked.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

/// A single field of a form schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field kind.
    #[serde(default)]
    pub field: FieldKind,
    /// Input subtype (inputs only).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    /// Model attribute the field binds to.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Label text.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    /// Whether a value is mandatory.
    #[serde(
        default,
        deserialize_with = "values::truthy",
        skip_serializing_if = "values::is_false"
    )]
    pub require: bool,
    /// Layout class of the wrapping container.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<String>,
    /// Placeholder text.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<String>,
    /// Initial value.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// HTML id override.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// HTML class override.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
    /// Options of radio, checkbox and select fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    /// Raw markup of a description field.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub textdescription: Option<String>,
    /// Button style suffix of a submit field.
    #[serde(
        default,
        deserialize_with = "values::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub backgroundcolor: Option<String>,
    /// Keys this crate does not interpret, kept for round trips.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FieldDescriptor {
    /// Creates an empty descriptor of the given kind.
    #[must_use]
    pub fn new(field: impl Into<FieldKind>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Creates an input descriptor with the given subtype.
    #[must_use]
    pub fn input(input_type: impl Into<InputType>) -> Self {
        let mut descriptor = Self::new(FieldKind::Input);
        descriptor.input_type = Some(input_type.into());
        descriptor
    }

    /// Sets the bound attribute name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the layout width class.
    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.require = true;
        self
    }

    /// Appends an item.
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Returns the name when present and non-empty.
    ///
    /// Only fields with such a name are data fields.
    #[must_use]
    pub fn data_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the declared input subtype, `text` when absent.
    #[must_use]
    pub fn input_type_or_default(&self) -> InputType {
        self.input_type.clone().unwrap_or_default()
    }
}

/// A layout row.
pub type Row = Vec<FieldDescriptor>;

/// A decoded form schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FormSchema {
    rows: Vec<Row>,
}

struct RowsVisitor;

impl<'de> Visitor<'de> for RowsVisitor {
    type Value = FormSchema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of rows or an object of rows")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut rows = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(row) = seq.next_element::<Row>()? {
            rows.push(row);
        }
        Ok(FormSchema::from_rows(rows))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Object bodies come from builders that key rows by index.
        let mut entries: Vec<(String, Row)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Row>()? {
            entries.push(entry);
        }
        entries.sort_by(|(a, _), (b, _)| row_key(a).cmp(&row_key(b)));
        Ok(FormSchema::from_rows(
            entries.into_iter().map(|(_, row)| row).collect(),
        ))
    }
}

/// Numeric keys first in numeric order, then the rest as text.
fn row_key(key: &str) -> (bool, u64, &str) {
    key.parse::<u64>().map_or((true, 0, key), |n| (false, n, key))
}

impl<'de> Deserialize<'de> for FormSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RowsVisitor)
    }
}

impl FormSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema from rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Appends a row.
    #[must_use]
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Decodes a schema from JSON text.
    pub fn from_json(body: &str) -> Result<Self, FormError> {
        serde_json::from_str(body).map_err(|e| FormError::SchemaDecode(e.into()))
    }

    /// Encodes the schema as JSON text.
    pub fn to_json(&self) -> Result<String, FormError> {
        serde_json::to_string(self)
            .map_err(|e| FormError::SchemaDecode(SchemaDecodeError::new(e.to_string())))
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over `(row, position, descriptor)` in row-major order.
    pub fn fields(&self) -> impl Iterator<Item = (usize, usize, &FieldDescriptor)> {
        self.rows.iter().enumerate().flat_map(|(row, fields)| {
            fields
                .iter()
                .enumerate()
                .map(move |(position, field)| (row, position, field))
        })
    }

    /// Returns the total number of fields across all rows.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns true if the schema has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
