//! Tracing setup and render span helpers.
//!
//! The crate itself only emits `tracing` events; hosts that do not install
//! their own subscriber can call [`init_tracing`].

use crate::errors::FormId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Installs a global `tracing` subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to `default_filter`.
/// Returns `false` when a global subscriber was already set.
pub fn init_tracing(format: LogFormat, default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.is_ok()
}

/// Span attributes for one form render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSpanAttributes {
    /// Render id.
    pub render_id: Option<String>,
    /// Stored form id, if the schema came from the store.
    pub form_id: Option<FormId>,
    /// `server` or `client`.
    pub mode: Option<String>,
    /// Number of schema rows.
    pub rows: usize,
    /// Number of fields across all rows.
    pub fields: usize,
    /// Number of model-bound fields.
    pub data_fields: usize,
    /// Duration in milliseconds.
    pub duration_ms: Option<f64>,
}

impl RenderSpanAttributes {
    /// Creates empty attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the render id.
    #[must_use]
    pub fn with_render_id(mut self, id: impl Into<String>) -> Self {
        self.render_id = Some(id.into());
        self
    }

    /// Sets the stored form id.
    #[must_use]
    pub fn with_form_id(mut self, form_id: Option<FormId>) -> Self {
        self.form_id = form_id;
        self
    }

    /// Sets the render mode.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets row, field and data field counts.
    #[must_use]
    pub fn with_counts(mut self, rows: usize, fields: usize, data_fields: usize) -> Self {
        self.rows = rows;
        self.fields = fields;
        self.data_fields = data_fields;
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Converts to flat `form.*` attributes, sorted by key.
    #[must_use]
    pub fn to_attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = BTreeMap::new();

        if let Some(ref v) = self.render_id {
            attrs.insert("form.render_id".to_string(), v.clone());
        }
        if let Some(v) = self.form_id {
            attrs.insert("form.id".to_string(), v.to_string());
        }
        if let Some(ref v) = self.mode {
            attrs.insert("form.mode".to_string(), v.clone());
        }
        attrs.insert("form.rows".to_string(), self.rows.to_string());
        attrs.insert("form.fields".to_string(), self.fields.to_string());
        attrs.insert("form.data_fields".to_string(), self.data_fields.to_string());
        if let Some(v) = self.duration_ms {
            attrs.insert("form.duration_ms".to_string(), v.to_string());
        }

        attrs
    }

    /// Emits the flat attributes as one `info` event.
    pub fn emit(&self, message: &str) {
        let attributes = self.to_attributes();
        tracing::info!(?attributes, "{message}");
    }
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finishes the span and returns the duration.
    #[must_use]
    pub fn finish(self) -> f64 {
        self.elapsed_ms()
    }
}
