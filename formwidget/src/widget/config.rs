//! Widget configuration.

use crate::errors::{FormError, FormId};
use crate::schema::SchemaPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Where the form gets rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Markup is produced here.
    #[default]
    #[serde(alias = "php")]
    Server,
    /// The schema is handed to a browser-side renderer.
    #[serde(alias = "js")]
    Client,
}

impl RenderMode {
    /// Returns the lowercase mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a [`FormWidget`](super::FormWidget).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormWidgetConfig {
    /// Stored form to load; replaces `body` when set.
    #[serde(default)]
    pub form_id: Option<FormId>,
    /// Inline schema JSON.
    #[serde(default = "default_body")]
    pub body: String,
    /// Server or client rendering.
    #[serde(default)]
    pub render_mode: RenderMode,
    /// Item being edited, emitted as a hidden input.
    #[serde(default)]
    pub item_id: Option<FormId>,
    /// How schema oddities are handled.
    #[serde(default)]
    pub policy: SchemaPolicy,
    /// Form action URL.
    #[serde(default)]
    pub action: String,
    /// Form method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Model name used in control names.
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_body() -> String {
    "{}".to_string()
}

fn default_method() -> String {
    "post".to_string()
}

fn default_model_name() -> String {
    "DynamicModel".to_string()
}

impl Default for FormWidgetConfig {
    fn default() -> Self {
        Self {
            form_id: None,
            body: default_body(),
            render_mode: RenderMode::default(),
            item_id: None,
            policy: SchemaPolicy::default(),
            action: String::new(),
            method: default_method(),
            model_name: default_model_name(),
        }
    }
}

impl FormWidgetConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, FormError> {
        serde_json::from_str(text)
            .map_err(|e| FormError::Config(format!("invalid widget config: {e}")))
    }

    /// Reads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FormError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Sets the stored form id.
    #[must_use]
    pub fn with_form_id(mut self, form_id: FormId) -> Self {
        self.form_id = Some(form_id);
        self
    }

    /// Sets the inline schema body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the render mode.
    #[must_use]
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Sets the edited item id.
    #[must_use]
    pub fn with_item_id(mut self, item_id: FormId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Sets the schema policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SchemaPolicy) -> Self {
        self.policy = policy;
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

    /// Sets the model name.
    #[must_use]
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}
