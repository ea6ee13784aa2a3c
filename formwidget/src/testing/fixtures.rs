//! Sample schemas.

use crate::errors::FormId;
use crate::ports::{InMemoryFormStore, StoredForm};
use crate::schema::FormSchema;

/// Id under which [`store_with`] callers conventionally place the contact form.
pub const CONTACT_FORM_ID: FormId = 1;

/// A small contact form: name and email side by side, then a message and a
/// submit button.
#[must_use]
pub fn contact_form_json() -> &'static str {
    r#"[
        [
            {"field": "input", "type": "text", "name": "fullname", "label": "Full name", "require": true, "width": "col-md-6"},
            {"field": "input", "type": "email", "name": "email", "label": "Email", "require": true, "width": "col-md-6"}
        ],
        [
            {"field": "textarea", "name": "message", "label": "Message", "width": "col-md-12"}
        ],
        [
            {"field": "submit", "label": "Send", "backgroundcolor": "primary", "width": "col-md-12"}
        ]
    ]"#
}

/// A form using every known field kind.
#[must_use]
pub fn full_form_json() -> &'static str {
    r#"[
        [
            {"field": "description", "textdescription": "<h3>Survey</h3>", "width": "col-md-12"}
        ],
        [
            {"field": "input", "type": "number", "name": "age", "label": "Age", "width": "col-md-4"},
            {"field": "input", "type": "date", "name": "born", "label": "Born", "width": "col-md-4"},
            {"field": "input", "type": "url", "name": "site", "label": "Website", "width": "col-md-4"}
        ],
        [
            {"field": "radio", "name": "plan", "label": "Plan", "width": "col-md-4", "items": [
                {"value": "basic", "text": "Basic"},
                {"value": "pro", "text": "Pro", "checked": true}
            ]},
            {"field": "checkbox", "name": "topics", "label": "Topics", "width": "col-md-4", "items": [
                {"value": "rust", "text": "Rust", "checked": "1"},
                {"value": "web", "text": "Web"},
                {"value": "db", "text": "Databases", "checked": true}
            ]},
            {"field": "select", "name": "country", "label": "Country", "width": "col-md-4", "items": [
                {"value": 1, "text": "Poland", "checked": true},
                {"value": 2, "text": "Spain"}
            ]}
        ],
        [
            {"field": "textarea", "name": "notes", "label": "Notes", "require": "1", "width": "col-md-12"}
        ],
        [
            {"field": "submit", "label": "Submit", "backgroundcolor": "success", "width": "col-md-12"}
        ]
    ]"#
}

/// Decodes [`contact_form_json`].
///
/// # Panics
///
/// Never for the bundled fixture.
#[must_use]
#[allow(clippy::expect_used)]
pub fn contact_schema() -> FormSchema {
    FormSchema::from_json(contact_form_json()).expect("contact fixture decodes")
}

/// Creates an in-memory store holding one form.
#[must_use]
pub fn store_with(id: FormId, body: &str) -> InMemoryFormStore {
    let store = InMemoryFormStore::new();
    store.insert(StoredForm::new(id, body));
    store
}
