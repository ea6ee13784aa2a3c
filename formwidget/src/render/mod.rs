//! Field and form rendering.
//!
//! Rendering never reaches for global state: every call receives the
//! [`RenderContext`] that knows how to turn a model attribute into markup.
//! [`HtmlRenderContext`] is the bundled implementation; hosts embedding the
//! crate in a web framework can supply their own.

pub mod field;
pub mod html;
pub mod template;

#[cfg(test)]
mod render_tests;

pub use field::{field_options, render_field, wrap, TEXTAREA_TEMPLATE};
pub use html::{escape_html, HtmlRenderContext};
pub use template::{render_form, TemplateVars};

use crate::model::ValidationModel;
use crate::schema::InputType;
use indexmap::IndexMap;

/// HTML attributes taken from a descriptor, in insertion order.
pub type HtmlOptions = IndexMap<String, String>;

/// Ordered `value -> text` options of a list control.
///
/// Inserting an existing value replaces its text and keeps its position.
pub type ItemMap = IndexMap<String, String>;

/// How a control's label is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// No label element at all.
    Hidden,
    /// A label with optional extra classes.
    Text {
        /// Label text.
        text: String,
        /// Extra CSS classes.
        class: Option<String>,
    },
}

impl Label {
    /// Creates a plain label.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            class: None,
        }
    }

    /// Creates a label with extra classes.
    #[must_use]
    pub fn with_class(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            class: Some(class.into()),
        }
    }

    /// Returns true for [`Label::Hidden`].
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Capability to render model-bound controls and form chrome.
#[cfg_attr(test, mockall::automock)]
pub trait RenderContext {
    /// Renders a typed single-line input bound to `attribute`.
    fn text_input(
        &self,
        model: &ValidationModel,
        attribute: &str,
        input_type: &InputType,
        options: &HtmlOptions,
        label: &Label,
    ) -> String;

    /// Renders a multi-line input bound to `attribute` using a layout template.
    fn text_area(
        &self,
        model: &ValidationModel,
        attribute: &str,
        options: &HtmlOptions,
        label: &Label,
        template: &str,
    ) -> String;

    /// Renders a radio button group.
    fn radio_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String;

    /// Renders a checkbox group.
    fn checkbox_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String;

    /// Renders a single-selection dropdown.
    fn drop_down_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String;

    /// Renders a submit button.
    fn submit_button(&self, label: &str, class: &str) -> String;

    /// Renders a hidden input outside the model.
    fn hidden_input(&self, name: &str, value: &str) -> String;

    /// Opens the form element.
    fn begin_form(&self) -> String;

    /// Closes the form element.
    fn end_form(&self) -> String;
}
