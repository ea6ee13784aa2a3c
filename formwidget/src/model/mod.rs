//! Schema-derived validation model.
//!
//! A [`ValidationModel`] is built fresh for every render or submission from
//! the schema's data fields. Its attribute set is exactly the data field
//! names, in schema order, and each attribute carries the rules derived from
//! its descriptor.

pub mod validators;

use crate::errors::FormError;
use crate::registry::{self, RuleKind};
use crate::schema::{values, FieldDescriptor, SchemaPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use validators::{is_date, is_email, is_integer, is_url};

/// A rule attached to a model attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "kind")]
pub enum ValidationRule {
    /// The value must not be empty.
    Required,
    /// The value must match the rule kind.
    Typed(RuleKind),
}

/// The value bound to a model attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// No value.
    #[default]
    Null,
    /// A single value.
    Text(String),
    /// Several values, as submitted by checkbox groups.
    List(Vec<String>),
}

impl AttributeValue {
    /// Returns true for null, empty text and empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Returns true if the value is, or contains, the given text.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Text(text) => text == candidate,
            Self::List(items) => items.iter().any(|item| item == candidate),
        }
    }

    /// Returns the single text value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts a submitted JSON value.
    ///
    /// Objects have no attribute representation and yield `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Text(if *b { "1" } else { "0" }.to_string())),
            serde_json::Value::Array(items) => Some(Self::List(
                items.iter().filter_map(values::scalar_text).collect(),
            )),
            serde_json::Value::Object(_) => None,
            scalar => values::scalar_text(scalar).map(Self::Text),
        }
    }
}

/// Attribute set, rules, values and errors of one form instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationModel {
    attributes: Vec<String>,
    labels: HashMap<String, String>,
    rules: HashMap<String, Vec<ValidationRule>>,
    values: HashMap<String, AttributeValue>,
    errors: HashMap<String, Vec<String>>,
}

impl ValidationModel {
    /// Creates a model with the given attributes and no rules.
    #[must_use]
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut model = Self::default();
        for attribute in attributes {
            model.define_attribute(attribute.into());
        }
        model
    }

    /// Builds a model from data field descriptors.
    ///
    /// Each attribute gets `required` when the field sets `require`, followed
    /// by the registry rule kind. Under the lenient policy fields without a
    /// rule kind simply get none; under the strict policy they fail.
    pub fn from_fields(
        fields: &[&FieldDescriptor],
        policy: SchemaPolicy,
    ) -> Result<Self, FormError> {
        let mut model = Self::default();

        for field in fields {
            let Some(name) = field.data_name() else {
                continue;
            };
            if model.has_attribute(name) {
                return Err(FormError::duplicate_field_name(name));
            }

            model.define_attribute(name.to_string());
            if let Some(label) = field.label.as_deref().filter(|l| !l.is_empty()) {
                model.labels.insert(name.to_string(), label.to_string());
            }

            if field.require {
                model.add_rule(name, ValidationRule::Required);
            }

            let kind = if policy.is_strict() {
                Some(registry::rule_type(field)?)
            } else {
                registry::rule_type_lenient(field)
            };
            match kind {
                Some(kind) => model.add_rule(name, ValidationRule::Typed(kind)),
                None => tracing::debug!(
                    attribute = name,
                    field = %field.field,
                    "No type rule for field"
                ),
            }
        }

        Ok(model)
    }

    fn define_attribute(&mut self, name: String) {
        if !self.has_attribute(&name) {
            self.values.insert(name.clone(), AttributeValue::Null);
            self.attributes.push(name);
        }
    }

    /// Attaches a rule to an attribute. Unknown attributes are ignored.
    pub fn add_rule(&mut self, attribute: &str, rule: ValidationRule) {
        if self.has_attribute(attribute) {
            self.rules
                .entry(attribute.to_string())
                .or_default()
                .push(rule);
        }
    }

    /// Returns the attribute names in schema order.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Returns true if the model has the attribute.
    #[must_use]
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    /// Returns the rules of an attribute, empty for unknown attributes.
    #[must_use]
    pub fn rules(&self, attribute: &str) -> &[ValidationRule] {
        self.rules.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// Returns true if the attribute carries a `required` rule.
    #[must_use]
    pub fn is_required(&self, attribute: &str) -> bool {
        self.rules(attribute).contains(&ValidationRule::Required)
    }

    /// Returns the display label of an attribute.
    #[must_use]
    pub fn attribute_label<'a>(&'a self, attribute: &'a str) -> &'a str {
        self.labels.get(attribute).map_or(attribute, String::as_str)
    }

    /// Returns the bound value, `Null` for unknown attributes.
    #[must_use]
    pub fn value(&self, attribute: &str) -> &AttributeValue {
        static NULL: AttributeValue = AttributeValue::Null;
        self.values.get(attribute).unwrap_or(&NULL)
    }

    /// Binds a value. Unknown attributes are ignored.
    pub fn set_value(&mut self, attribute: &str, value: AttributeValue) {
        if let Some(slot) = self.values.get_mut(attribute) {
            *slot = value;
        }
    }

    /// Binds submitted values for known attributes.
    ///
    /// Returns true if at least one attribute was loaded.
    pub fn load(&mut self, data: &serde_json::Map<String, serde_json::Value>) -> bool {
        let mut loaded = false;
        for (key, raw) in data {
            if !self.has_attribute(key) {
                continue;
            }
            if let Some(value) = AttributeValue::from_json(raw) {
                self.set_value(key, value);
                loaded = true;
            }
        }
        loaded
    }

    /// Runs every rule and records the failures.
    ///
    /// Previous errors are cleared. Type rules are skipped for empty values;
    /// only `required` reports those. Returns true when no rule failed.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();

        for attribute in &self.attributes {
            let value = self.value(attribute);
            let label = self.attribute_label(attribute);
            let mut messages = Vec::new();

            for rule in self.rules(attribute) {
                match *rule {
                    ValidationRule::Required => {
                        if value.is_empty() {
                            messages.push(format!("{label} cannot be blank."));
                        }
                    }
                    ValidationRule::Typed(kind) => {
                        if value.is_empty() {
                            continue;
                        }
                        if let Err(template) = validators::check(kind, value) {
                            messages.push(template.replace("{attribute}", label));
                        }
                    }
                }
            }

            if !messages.is_empty() {
                self.errors.insert(attribute.clone(), messages);
            }
        }

        tracing::debug!(
            attributes = self.attributes.len(),
            failed = self.errors.len(),
            "Model validated"
        );
        self.errors.is_empty()
    }

    /// Returns the errors of an attribute.
    #[must_use]
    pub fn errors(&self, attribute: &str) -> &[String] {
        self.errors.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// Returns the first error of an attribute.
    #[must_use]
    pub fn first_error(&self, attribute: &str) -> Option<&str> {
        self.errors(attribute).first().map(String::as_str)
    }

    /// Returns true if any attribute has errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns all bound values keyed by attribute.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, AttributeValue> {
        &self.values
    }
}
