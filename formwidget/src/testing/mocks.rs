//! Recording and failing collaborators.

use crate::errors::FormId;
use crate::ports::{FormStore, MailMessage, MailSender, StoredForm};
use parking_lot::Mutex;

/// A mail sender that keeps every message it is given.
#[derive(Debug, Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailSender {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded messages.
    #[must_use]
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().clone()
    }

    /// Returns the number of recorded messages.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Clears the recording.
    pub fn reset(&self) {
        self.sent.lock().clear();
    }
}

impl MailSender for RecordingMailSender {
    fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// A mail sender that always fails.
#[derive(Debug, Clone)]
pub struct FailingMailSender {
    reason: String,
}

impl FailingMailSender {
    /// Creates a sender failing with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MailSender for FailingMailSender {
    fn send(&self, message: &MailMessage) -> anyhow::Result<()> {
        anyhow::bail!("{} (to {})", self.reason, message.to)
    }
}

/// A form store whose lookups always fail.
#[derive(Debug, Clone)]
pub struct FailingFormStore {
    reason: String,
}

impl FailingFormStore {
    /// Creates a store failing with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl FormStore for FailingFormStore {
    fn find_form(&self, id: FormId) -> anyhow::Result<Option<StoredForm>> {
        anyhow::bail!("{} (form {id})", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> MailMessage {
        MailMessage {
            from: "site@example.com".to_string(),
            to: "owner@example.com".to_string(),
            subject: None,
            text_body: Some("hello".to_string()),
        }
    }

    #[test]
    fn test_recording_sender() {
        let sender = RecordingMailSender::new();
        sender.send(&message()).unwrap();
        sender.send(&message()).unwrap();

        assert_eq!(sender.call_count(), 2);
        assert_eq!(sender.sent()[0].text_body.as_deref(), Some("hello"));

        sender.reset();
        assert_eq!(sender.call_count(), 0);
    }

    #[test]
    fn test_failing_collaborators() {
        let err = FailingMailSender::new("smtp down").send(&message()).unwrap_err();
        assert_eq!(err.to_string(), "smtp down (to owner@example.com)");

        let err = FailingFormStore::new("db down").find_form(4).unwrap_err();
        assert_eq!(err.to_string(), "db down (form 4)");
    }
}
