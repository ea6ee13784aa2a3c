//! Ports - collaborators the widget depends on (form storage, mail).
//!
//! The widget never talks to a database or an SMTP server directly. It is
//! handed a [`FormStore`] and a [`MailSender`]; the in-process
//! implementations here cover tests, demos and single-process hosts.

use crate::errors::FormId;
use crate::utils::timestamps::optional_timestamp;
use crate::utils::Timestamp;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, Level};

/// A persisted form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredForm {
    /// Form identifier.
    pub id: FormId,
    /// Schema JSON text.
    pub body: String,
    /// Human readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl StoredForm {
    /// Creates a stored form.
    #[must_use]
    pub fn new(id: FormId, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
            title: None,
            created_at: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Read access to stored form definitions.
#[cfg_attr(test, mockall::automock)]
pub trait FormStore: Send + Sync {
    /// Looks a form up by id. `Ok(None)` means no such form.
    fn find_form(&self, id: FormId) -> anyhow::Result<Option<StoredForm>>;
}

/// Thread-safe in-memory form store.
#[derive(Debug, Default)]
pub struct InMemoryFormStore {
    forms: RwLock<HashMap<FormId, StoredForm>>,
}

impl InMemoryFormStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a form.
    pub fn insert(&self, form: StoredForm) {
        self.forms.write().insert(form.id, form);
    }

    /// Removes a form, returning it if present.
    pub fn remove(&self, id: FormId) -> Option<StoredForm> {
        self.forms.write().remove(&id)
    }

    /// Returns the number of stored forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.read().is_empty()
    }
}

impl FormStore for InMemoryFormStore {
    fn find_form(&self, id: FormId) -> anyhow::Result<Option<StoredForm>> {
        Ok(self.forms.read().get(&id).cloned())
    }
}

/// An outgoing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: Option<String>,
    /// Plain text body.
    pub text_body: Option<String>,
}

/// Delivers mail messages.
#[cfg_attr(test, mockall::automock)]
pub trait MailSender: Send + Sync {
    /// Sends one message.
    fn send(&self, message: &MailMessage) -> anyhow::Result<()>;
}

/// A mail sender that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMailSender;

impl MailSender for NoOpMailSender {
    fn send(&self, _message: &MailMessage) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A mail sender that only logs messages through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingMailSender {
    level: Level,
}

impl Default for LoggingMailSender {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingMailSender {
    /// Creates a sender logging at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level sender.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl MailSender for LoggingMailSender {
    fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        let subject = message.subject.as_deref().unwrap_or_default();
        let body_len = message.text_body.as_ref().map_or(0, String::len);
        match self.level {
            Level::DEBUG | Level::TRACE => tracing::debug!(
                from = %message.from,
                to = %message.to,
                subject,
                body_len,
                "Mail message"
            ),
            _ => info!(
                from = %message.from,
                to = %message.to,
                subject,
                body_len,
                "Mail message"
            ),
        }
        Ok(())
    }
}
