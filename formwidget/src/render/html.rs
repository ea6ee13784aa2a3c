//! Bootstrap-flavoured HTML render context.

use super::{HtmlOptions, ItemMap, Label, RenderContext};
use crate::model::ValidationModel;
use crate::schema::InputType;
use std::fmt::Write as _;

/// Default layout of a model-bound control.
const FIELD_TEMPLATE: &str = "{label}\n{input}\n{hint}\n{error}";

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders attributes as ` key="value"` pairs, skipping `None` values.
fn attributes<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if let Some(value) = value {
            let _ = write!(out, " {key}=\"{}\"", escape_html(value));
        }
    }
    out
}

/// Render context producing plain HTML with bootstrap form classes.
///
/// Controls are named `{model_name}[{attribute}]` and get the id
/// `{model-name}-{attribute}` in lower case, so a submitted form can be
/// loaded back into a [`ValidationModel`].
#[derive(Debug, Clone)]
pub struct HtmlRenderContext {
    model_name: String,
    form_id: String,
    action: String,
    method: String,
}

impl Default for HtmlRenderContext {
    fn default() -> Self {
        Self::new("DynamicModel")
    }
}

impl HtmlRenderContext {
    /// Creates a context for the given model name.
    #[must_use]
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            form_id: "form-widget".to_string(),
            action: String::new(),
            method: "post".to_string(),
        }
    }

    /// Sets the form element id.
    #[must_use]
    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = form_id.into();
        self
    }

    /// Sets the form action URL.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the form method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Returns the model name used in control names.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the default id of the control bound to `attribute`.
    #[must_use]
    pub fn input_id(&self, attribute: &str) -> String {
        format!("{}-{}", self.model_name, attribute)
            .to_lowercase()
            .replace(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'), "-")
    }

    /// Returns the submitted name of the control bound to `attribute`.
    #[must_use]
    pub fn input_name(&self, attribute: &str) -> String {
        format!("{}[{}]", self.model_name, attribute)
    }

    fn label_html(&self, label: &Label, for_id: &str) -> String {
        match label {
            Label::Hidden => String::new(),
            Label::Text { text, class } => {
                let class = match class {
                    Some(extra) => format!("control-label {extra}"),
                    None => "control-label".to_string(),
                };
                format!(
                    "<label{}>{}</label>",
                    attributes([("class", Some(class.as_str())), ("for", Some(for_id))]),
                    escape_html(text)
                )
            }
        }
    }

    /// Lays out label, control and error inside a form-group container.
    fn field_group(
        &self,
        model: &ValidationModel,
        attribute: &str,
        input_id: &str,
        label: &Label,
        input: &str,
        template: &str,
    ) -> String {
        let mut class = format!("form-group field-{input_id}");
        if model.is_required(attribute) {
            class.push_str(" required");
        }
        let error = model.first_error(attribute);
        if error.is_some() {
            class.push_str(" has-error");
        }

        let body = template
            .replace("{label}", &self.label_html(label, input_id))
            .replace("{input}", input)
            .replace("{hint}", "")
            .replace(
                "{error}",
                &format!(
                    "<div class=\"help-block\">{}</div>",
                    escape_html(error.unwrap_or_default())
                ),
            );

        format!("<div class=\"{}\">\n{body}\n</div>", escape_html(&class))
    }

    fn aria(model: &ValidationModel, attribute: &str) -> (Option<&'static str>, Option<&'static str>) {
        let required = model.is_required(attribute).then_some("true");
        let invalid = model.first_error(attribute).map(|_| "true");
        (required, invalid)
    }

    fn list_group(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
        control: &str,
    ) -> String {
        let id = self.input_id(attribute);
        let name = self.input_name(attribute);
        let value = model.value(attribute);
        let (item_name, role) = if control == "checkbox" {
            (format!("{name}[]"), None)
        } else {
            (name.clone(), Some("radiogroup"))
        };

        let mut input = format!(
            "<input{}>",
            attributes([("type", Some("hidden")), ("name", Some(name.as_str())), ("value", Some(""))])
        );
        let _ = write!(
            input,
            "<div{}>",
            attributes([("id", Some(id.as_str())), ("role", role)])
        );
        for (item_value, text) in items {
            let checked = value.contains(item_value).then_some("checked");
            let _ = write!(
                input,
                "<label><input{}> {}</label>",
                attributes([
                    ("type", Some(control)),
                    ("name", Some(item_name.as_str())),
                    ("value", Some(item_value.as_str())),
                    ("checked", checked),
                ]),
                escape_html(text)
            );
        }
        input.push_str("</div>");

        self.field_group(model, attribute, &id, label, &input, FIELD_TEMPLATE)
    }
}

impl RenderContext for HtmlRenderContext {
    fn text_input(
        &self,
        model: &ValidationModel,
        attribute: &str,
        input_type: &InputType,
        options: &HtmlOptions,
        label: &Label,
    ) -> String {
        let default_id = self.input_id(attribute);
        let id = options.get("id").map_or(default_id.as_str(), String::as_str);
        let name = self.input_name(attribute);
        let value = options
            .get("value")
            .map(String::as_str)
            .or_else(|| model.value(attribute).as_text());
        let (required, invalid) = Self::aria(model, attribute);

        let input = format!(
            "<input{}>",
            attributes([
                ("type", Some(input_type.as_str())),
                ("id", Some(id)),
                ("class", Some(options.get("class").map_or("form-control", String::as_str))),
                ("name", Some(name.as_str())),
                ("value", value),
                ("placeholder", options.get("placeholder").map(String::as_str)),
                ("aria-required", required),
                ("aria-invalid", invalid),
            ])
        );

        self.field_group(model, attribute, id, label, &input, FIELD_TEMPLATE)
    }

    fn text_area(
        &self,
        model: &ValidationModel,
        attribute: &str,
        options: &HtmlOptions,
        label: &Label,
        template: &str,
    ) -> String {
        let default_id = self.input_id(attribute);
        let id = options.get("id").map_or(default_id.as_str(), String::as_str);
        let name = self.input_name(attribute);
        let value = options
            .get("value")
            .map(String::as_str)
            .or_else(|| model.value(attribute).as_text())
            .unwrap_or_default();
        let (required, invalid) = Self::aria(model, attribute);

        let input = format!(
            "<textarea{}>{}</textarea>",
            attributes([
                ("id", Some(id)),
                ("class", Some(options.get("class").map_or("form-control", String::as_str))),
                ("name", Some(name.as_str())),
                ("placeholder", options.get("placeholder").map(String::as_str)),
                ("aria-required", required),
                ("aria-invalid", invalid),
            ]),
            escape_html(value)
        );

        self.field_group(model, attribute, id, label, &input, template)
    }

    fn radio_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String {
        self.list_group(model, attribute, items, label, "radio")
    }

    fn checkbox_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String {
        self.list_group(model, attribute, items, label, "checkbox")
    }

    fn drop_down_list(
        &self,
        model: &ValidationModel,
        attribute: &str,
        items: &ItemMap,
        label: &Label,
    ) -> String {
        let id = self.input_id(attribute);
        let name = self.input_name(attribute);
        let value = model.value(attribute);
        let (required, invalid) = Self::aria(model, attribute);

        let mut input = format!(
            "<select{}>",
            attributes([
                ("id", Some(id.as_str())),
                ("class", Some("form-control")),
                ("name", Some(name.as_str())),
                ("aria-required", required),
                ("aria-invalid", invalid),
            ])
        );
        for (item_value, text) in items {
            let selected = value.contains(item_value).then_some("selected");
            let _ = write!(
                input,
                "<option{}>{}</option>",
                attributes([("value", Some(item_value.as_str())), ("selected", selected)]),
                escape_html(text)
            );
        }
        input.push_str("</select>");

        self.field_group(model, attribute, &id, label, &input, FIELD_TEMPLATE)
    }

    fn submit_button(&self, label: &str, class: &str) -> String {
        format!(
            "<button{}>{}</button>",
            attributes([("type", Some("submit")), ("class", Some(class))]),
            escape_html(label)
        )
    }

    fn hidden_input(&self, name: &str, value: &str) -> String {
        format!(
            "<input{}>",
            attributes([("type", Some("hidden")), ("name", Some(name)), ("value", Some(value))])
        )
    }

    fn begin_form(&self) -> String {
        format!(
            "<form{}>",
            attributes([
                ("id", Some(self.form_id.as_str())),
                ("action", Some(self.action.as_str())),
                ("method", Some(self.method.as_str())),
            ])
        )
    }

    fn end_form(&self) -> String {
        "</form>".to_string()
    }
}
