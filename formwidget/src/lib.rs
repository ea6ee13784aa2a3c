//! # Formwidget
//!
//! Renders JSON form schemas into HTML forms bound to a validation model.
//!
//! A schema is an ordered list of rows, each an ordered list of field
//! descriptors (`input`, `textarea`, `radio`, `checkbox`, `select`,
//! `description`, `submit`). From it the crate derives:
//!
//! - **A validation model**: one attribute per named field, with `required`
//!   and type rules, able to load and validate a submission
//! - **A table schema**: storage column kinds per named field
//! - **Markup**: server-rendered HTML, or a JSON payload for a client-side
//!   renderer
//!
//! Form storage and mail delivery are reached through the [`ports`] traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use formwidget::prelude::*;
//!
//! let body = r#"[
//!     [{"field": "input", "type": "text", "name": "fullname", "require": true}],
//!     [{"field": "submit", "label": "Send", "backgroundcolor": "primary"}]
//! ]"#;
//!
//! let widget = FormWidget::init(
//!     FormWidgetConfig::new().with_body(body),
//!     &InMemoryFormStore::new(),
//! )?;
//! let html = widget.render_html()?;
//!
//! assert!(html.contains("name=\"DynamicModel[fullname]\""));
//! assert!(html.contains("class=\"btn primary\""));
//! # Ok::<(), formwidget::errors::FormError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod model;
pub mod observability;
pub mod ports;
pub mod registry;
pub mod render;
pub mod schema;
pub mod testing;
pub mod utils;
pub mod widget;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{FormError, FormId, SchemaDecodeError, UnsupportedFieldKindError};
    pub use crate::model::{AttributeValue, ValidationModel, ValidationRule};
    pub use crate::ports::{
        FormStore, InMemoryFormStore, LoggingMailSender, MailMessage, MailSender,
        NoOpMailSender, StoredForm,
    };
    pub use crate::registry::{column_type, rule_type, ColumnKind, RuleKind};
    pub use crate::render::{render_field, HtmlRenderContext, RenderContext};
    pub use crate::schema::{
        only_data_fields, table_schema, FieldDescriptor, FieldKind, FormSchema, InputType,
        Item, SchemaPolicy, TableSchema,
    };
    pub use crate::widget::{ClientPayload, FormWidget, FormWidgetConfig, RenderMode, RenderedForm};
}
