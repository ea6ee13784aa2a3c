//! The form widget: schema loading, rendering and notifications.
//!
//! A [`FormWidget`] is built once per request from a [`FormWidgetConfig`]
//! and a [`FormStore`]. Initialisation does all fallible work up front
//! (store lookup, decoding, schema policy checks) so that
//! [`FormWidget::execute`] only fails when the model cannot be built.

mod config;

#[cfg(test)]
mod widget_tests;

pub use config::{FormWidgetConfig, RenderMode};

use crate::errors::{FormError, FormId};
use crate::model::ValidationModel;
use crate::observability::{RenderSpanAttributes, SpanTimer};
use crate::ports::{FormStore, MailMessage, MailSender};
use crate::render::{render_form, HtmlRenderContext, RenderContext, TemplateVars};
use crate::schema::{
    only_data_fields, table_schema, validate_schema, FieldDescriptor, FormSchema, TableSchema,
};
use crate::utils::{generate_render_id, schema_fingerprint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Element id of the client payload script tag.
pub const CLIENT_PAYLOAD_ID: &str = "form-widget-schema";

/// Schema handed to a browser-side renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPayload {
    /// The decoded schema exactly as stored.
    pub schema: serde_json::Value,
    /// Hex SHA-256 of the canonical schema JSON.
    pub fingerprint: String,
    /// Item being edited, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<FormId>,
}

impl ClientPayload {
    /// Builds a payload, fingerprinting the canonical encoding of `schema`.
    #[must_use]
    pub fn new(schema: serde_json::Value, item_id: Option<FormId>) -> Self {
        let fingerprint = schema_fingerprint(&schema.to_string());
        Self {
            schema,
            fingerprint,
            item_id,
        }
    }

    /// Renders the payload as a JSON script tag.
    ///
    /// `</` is written as `<\/` so schema text cannot close the tag.
    pub fn to_html(&self) -> Result<String, FormError> {
        let json = serde_json::to_string(self)?.replace("</", "<\\/");
        Ok(format!(
            "<script type=\"application/json\" id=\"{CLIENT_PAYLOAD_ID}\">{json}</script>"
        ))
    }
}

/// Result of [`FormWidget::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedForm {
    /// Server-rendered markup.
    Server(String),
    /// Schema for a client-side renderer.
    Client(ClientPayload),
}

impl RenderedForm {
    /// Returns the markup to embed in a page.
    pub fn into_html(self) -> Result<String, FormError> {
        match self {
            Self::Server(html) => Ok(html),
            Self::Client(payload) => payload.to_html(),
        }
    }

    /// Returns true for server-rendered output.
    #[must_use]
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server(_))
    }
}

/// A loaded, validated form ready to render.
#[derive(Debug, Clone)]
pub struct FormWidget {
    config: FormWidgetConfig,
    raw: serde_json::Value,
    schema: FormSchema,
    title: Option<String>,
}

impl FormWidget {
    /// Loads and checks the schema described by `config`.
    ///
    /// With a `form_id` the stored body replaces the inline one.
    pub fn init(mut config: FormWidgetConfig, store: &dyn FormStore) -> Result<Self, FormError> {
        let mut title = None;

        if let Some(id) = config.form_id {
            let stored = store
                .find_form(id)
                .map_err(FormError::Storage)?
                .ok_or_else(|| FormError::form_not_found(id))?;
            debug!(form_id = id, title = stored.title.as_deref(), "Loaded stored form");
            config.body = stored.body;
            title = stored.title;
        }

        let raw: serde_json::Value = serde_json::from_str(&config.body)?;
        let schema = FormSchema::from_json(&config.body)?;
        validate_schema(&schema, config.policy)?;

        debug!(
            form_id = config.form_id,
            rows = schema.rows().len(),
            fields = schema.field_count(),
            policy = ?config.policy,
            "Form widget initialised"
        );

        Ok(Self {
            config,
            raw,
            schema,
            title,
        })
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &FormWidgetConfig {
        &self.config
    }

    /// Returns the decoded schema.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the schema JSON as decoded, before typing.
    #[must_use]
    pub fn raw_body(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Returns the stored form title, if the schema came from the store.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the model-bound fields in render order.
    #[must_use]
    pub fn data_fields(&self) -> Vec<&FieldDescriptor> {
        only_data_fields(&self.schema)
    }

    /// Returns the storage columns of this form.
    #[must_use]
    pub fn table_schema(&self) -> TableSchema {
        table_schema(&self.schema)
    }

    /// Builds a fresh validation model from the data fields.
    pub fn build_model(&self) -> Result<ValidationModel, FormError> {
        ValidationModel::from_fields(&self.data_fields(), self.config.policy)
    }

    /// Returns an HTML context configured from the widget settings.
    #[must_use]
    pub fn html_context(&self) -> HtmlRenderContext {
        let form_id = self
            .config
            .form_id
            .map_or_else(|| "form-widget".to_string(), |id| format!("form-widget-{id}"));
        HtmlRenderContext::new(self.config.model_name.clone())
            .with_form_id(form_id)
            .with_action(self.config.action.clone())
            .with_method(self.config.method.clone())
    }

    /// Renders the form.
    ///
    /// Client mode returns the raw schema payload. Server mode renders every
    /// row of the unfiltered schema against a model built from the data
    /// fields.
    pub fn execute<C>(&self, ctx: &C) -> Result<RenderedForm, FormError>
    where
        C: RenderContext + ?Sized,
    {
        let render_id = generate_render_id();
        let timer = SpanTimer::start("form.render");
        let mode = self.config.render_mode;

        let rendered = match mode {
            RenderMode::Client => {
                RenderedForm::Client(ClientPayload::new(self.raw.clone(), self.config.item_id))
            }
            RenderMode::Server => {
                let mut model = self.build_model()?;
                RenderedForm::Server(render_form(
                    ctx,
                    TemplateVars {
                        form_body: &self.schema,
                        model: &mut model,
                        item_id: self.config.item_id,
                    },
                ))
            }
        };

        RenderSpanAttributes::new()
            .with_render_id(render_id.to_string())
            .with_form_id(self.config.form_id)
            .with_mode(mode.as_str())
            .with_counts(
                self.schema.rows().len(),
                self.schema.field_count(),
                self.data_fields().len(),
            )
            .with_duration_ms(timer.finish())
            .emit("Form rendered");

        Ok(rendered)
    }

    /// Renders with [`FormWidget::html_context`] and returns markup.
    pub fn render_html(&self) -> Result<String, FormError> {
        self.execute(&self.html_context())?.into_html()
    }

    /// Loads a submission into a fresh model and validates it.
    ///
    /// The model is returned whether or not validation passed; check
    /// [`ValidationModel::has_errors`] and re-render with it on failure.
    pub fn process_submission(
        &self,
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ValidationModel, FormError> {
        let mut model = self.build_model()?;
        // Accept both flat data and data nested under the model name.
        let scoped = data
            .get(&self.config.model_name)
            .and_then(serde_json::Value::as_object)
            .unwrap_or(data);
        model.load(scoped);
        let valid = model.validate();
        info!(form_id = self.config.form_id, valid, "Submission processed");
        Ok(model)
    }

    /// Sends one notification mail.
    ///
    /// Nothing is sent unless both addresses are present. Returns whether a
    /// message was handed to `mailer`.
    pub fn send_notification(
        &self,
        mailer: &dyn MailSender,
        from: Option<&str>,
        to: Option<&str>,
        subject: Option<&str>,
        body: Option<&str>,
    ) -> Result<bool, FormError> {
        let (Some(from), Some(to)) = (from, to) else {
            debug!(form_id = self.config.form_id, "Notification skipped: missing address");
            return Ok(false);
        };

        let message = MailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.map(str::to_string),
            text_body: body.map(str::to_string),
        };
        mailer.send(&message).map_err(FormError::Mail)?;

        info!(form_id = self.config.form_id, to, "Notification sent");
        Ok(true)
    }
}
