//! Tests for the form widget.

use super::*;
use crate::ports::{InMemoryFormStore, MockFormStore, MockMailSender, StoredForm};
use crate::registry::ColumnKind;
use crate::render::HtmlRenderContext;
use crate::schema::SchemaPolicy;
use crate::testing::{
    assert_has_control, assert_has_error, assert_order, contact_form_json, full_form_json,
    store_with, FailingFormStore, FailingMailSender, RecordingMailSender, CONTACT_FORM_ID,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn inline(body: &str) -> FormWidget {
    FormWidget::init(
        FormWidgetConfig::new().with_body(body),
        &InMemoryFormStore::new(),
    )
    .unwrap()
}

fn submission(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// === init ===

#[test]
fn test_init_default_body_is_empty_form() {
    let widget = FormWidget::init(FormWidgetConfig::default(), &InMemoryFormStore::new()).unwrap();

    assert!(widget.schema().is_empty());
    assert!(widget.data_fields().is_empty());
    assert_eq!(widget.raw_body(), &json!({}));
}

#[test]
fn test_init_loads_stored_body() {
    let store = InMemoryFormStore::new();
    store.insert(StoredForm::new(CONTACT_FORM_ID, contact_form_json()).with_title("Contact"));

    let widget = FormWidget::init(
        FormWidgetConfig::new().with_form_id(CONTACT_FORM_ID).with_body("not json"),
        &store,
    )
    .unwrap();

    assert_eq!(widget.title(), Some("Contact"));
    assert_eq!(widget.schema().field_count(), 4);
    assert_eq!(widget.config().body, contact_form_json());
}

#[test]
fn test_init_missing_stored_form() {
    let err = FormWidget::init(
        FormWidgetConfig::new().with_form_id(42),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();

    assert!(matches!(err, FormError::FormNotFound { id: 42 }));
    assert_eq!(err.code(), "FORM-NOT-FOUND");
}

#[test]
fn test_init_queries_store_once_by_id() {
    let mut store = MockFormStore::new();
    store
        .expect_find_form()
        .with(mockall::predicate::eq(7))
        .times(1)
        .returning(|id| Ok(Some(StoredForm::new(id, "[]"))));

    let widget = FormWidget::init(FormWidgetConfig::new().with_form_id(7), &store).unwrap();
    assert!(widget.schema().is_empty());
}

#[test]
fn test_init_skips_store_without_form_id() {
    let store = MockFormStore::new();
    let widget = FormWidget::init(FormWidgetConfig::new().with_body("[]"), &store).unwrap();
    assert!(widget.title().is_none());
}

#[test]
fn test_init_store_failure_is_storage_error() {
    let err = FormWidget::init(
        FormWidgetConfig::new().with_form_id(3),
        &FailingFormStore::new("connection refused"),
    )
    .unwrap_err();

    assert_eq!(err.code(), "STORAGE");
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_init_malformed_body() {
    let err = FormWidget::init(
        FormWidgetConfig::new().with_body("[[{\"field\": "),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();

    assert!(matches!(err, FormError::SchemaDecode(_)));
}

#[test]
fn test_init_bad_field_reports_line() {
    let body = "[\n  [{\"field\": \"input\", \"name\": \"a\"}],\n  [{\"field\": \"radio\", \"items\": null}]\n]";
    let err = FormWidget::init(
        FormWidgetConfig::new().with_body(body),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();

    let FormError::SchemaDecode(decode) = err else {
        panic!("expected a decode error, got {err:?}");
    };
    assert_eq!(decode.line, 3);
}

#[test]
fn test_init_malformed_stored_body() {
    let store = store_with(5, "{oops");
    let err = FormWidget::init(FormWidgetConfig::new().with_form_id(5), &store).unwrap_err();
    assert_eq!(err.code(), "SCHEMA-DECODE");
}

#[test]
fn test_init_rejects_duplicate_names_in_both_policies() {
    let body = r#"[[{"field": "input", "name": "a"}, {"field": "textarea", "name": "a"}]]"#;

    for policy in [SchemaPolicy::Lenient, SchemaPolicy::Strict] {
        let err = FormWidget::init(
            FormWidgetConfig::new().with_body(body).with_policy(policy),
            &InMemoryFormStore::new(),
        )
        .unwrap_err();
        assert!(matches!(err, FormError::DuplicateFieldName { ref name } if name == "a"));
    }
}

#[test]
fn test_strict_policy_rejects_unknown_subtype() {
    let body = r#"[[{"field": "input", "type": "file", "name": "upload"}]]"#;

    assert!(FormWidget::init(
        FormWidgetConfig::new().with_body(body),
        &InMemoryFormStore::new()
    )
    .is_ok());

    let err = FormWidget::init(
        FormWidgetConfig::new()
            .with_body(body)
            .with_policy(SchemaPolicy::Strict),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();
    assert_eq!(err.code(), "FIELD-UNSUPPORTED");
}

#[test]
fn test_strict_policy_rejects_unnamed_data_field() {
    let body = r#"[[{"field": "select", "items": [{"value": "a", "text": "A"}]}]]"#;
    let err = FormWidget::init(
        FormWidgetConfig::new()
            .with_body(body)
            .with_policy(SchemaPolicy::Strict),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();

    assert!(matches!(err, FormError::MissingFieldName { row: 0, position: 0, .. }));
}

#[test]
fn test_strict_policy_rejects_named_submit_at_init() {
    let body = r#"[
        [{"field": "input", "name": "a"}],
        [{"field": "submit", "name": "send", "label": "Send"}]
    ]"#;

    let err = FormWidget::init(
        FormWidgetConfig::new()
            .with_body(body)
            .with_policy(SchemaPolicy::Strict),
        &InMemoryFormStore::new(),
    )
    .unwrap_err();
    assert_eq!(err.code(), "FIELD-UNSUPPORTED");

    // Lenient widgets keep the button name as an untyped attribute.
    let widget = inline(body);
    assert_eq!(widget.build_model().unwrap().attributes(), ["a", "send"]);
    assert!(widget.execute(&HtmlRenderContext::default()).unwrap().is_server());
}

// === derived data ===

#[test]
fn test_table_schema() {
    let widget = inline(contact_form_json());
    let columns: Vec<_> = widget.table_schema().into_iter().collect();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), ColumnKind::PrimaryKey),
            ("fullname".to_string(), ColumnKind::String),
            ("email".to_string(), ColumnKind::String),
            ("message".to_string(), ColumnKind::Text),
        ]
    );
}

#[test]
fn test_build_model_attributes_and_rules() {
    let widget = inline(full_form_json());
    let model = widget.build_model().unwrap();

    assert_eq!(
        model.attributes(),
        ["age", "born", "site", "plan", "topics", "country", "notes"]
    );
    assert!(model.is_required("notes"));
    assert!(!model.is_required("age"));
}

// === execute ===

#[test]
fn test_execute_server_contact_form() {
    let widget = inline(contact_form_json());
    let html = widget
        .execute(&HtmlRenderContext::default())
        .unwrap()
        .into_html()
        .unwrap();

    assert_has_control(&html, "DynamicModel", "fullname");
    assert_has_control(&html, "DynamicModel", "email");
    assert_has_control(&html, "DynamicModel", "message");
    assert_order(
        &html,
        &[
            "<form",
            "<div class=\"row\">",
            "DynamicModel[fullname]",
            "DynamicModel[email]",
            "<div class=\"row\">",
            "<textarea",
            "<div class=\"row\">",
            "<button type=\"submit\" class=\"btn primary\">Send</button>",
            "</form>",
        ],
    );
}

#[test]
fn test_execute_server_emits_item_id() {
    let widget = FormWidget::init(
        FormWidgetConfig::new()
            .with_body(contact_form_json())
            .with_item_id(77),
        &InMemoryFormStore::new(),
    )
    .unwrap();

    let rendered = widget.execute(&HtmlRenderContext::default()).unwrap();
    assert!(rendered.is_server());
    let html = rendered.into_html().unwrap();
    assert!(html.contains("<input type=\"hidden\" name=\"item_id\" value=\"77\">"));
}

#[test]
fn test_execute_client_payload() {
    let store = store_with(CONTACT_FORM_ID, contact_form_json());
    let widget = FormWidget::init(
        FormWidgetConfig::new()
            .with_form_id(CONTACT_FORM_ID)
            .with_render_mode(RenderMode::Client)
            .with_item_id(3),
        &store,
    )
    .unwrap();

    let RenderedForm::Client(payload) = widget.execute(&HtmlRenderContext::default()).unwrap()
    else {
        panic!("expected a client payload");
    };

    assert_eq!(&payload.schema, widget.raw_body());
    assert_eq!(payload.item_id, Some(3));
    assert_eq!(payload.fingerprint.len(), 64);
}

#[test]
fn test_client_fingerprint_ignores_formatting() {
    let compact = ClientPayload::new(
        serde_json::from_str(r#"[[{"field":"input","name":"a"}]]"#).unwrap(),
        None,
    );
    let spaced = ClientPayload::new(
        serde_json::from_str("[ [ { \"name\" : \"a\", \"field\" : \"input\" } ] ]").unwrap(),
        None,
    );
    let other = ClientPayload::new(json!([[{"field": "input", "name": "b"}]]), None);

    assert_eq!(compact.fingerprint, spaced.fingerprint);
    assert_ne!(compact.fingerprint, other.fingerprint);
}

#[test]
fn test_client_payload_html_cannot_close_script() {
    let payload = ClientPayload::new(
        json!([[{"field": "description", "textdescription": "</script><b>x</b>"}]]),
        None,
    );
    let html = payload.to_html().unwrap();

    assert!(html.starts_with("<script type=\"application/json\" id=\"form-widget-schema\">"));
    assert_eq!(html.matches("</script>").count(), 1);
    assert!(html.contains("<\\/script>"));
    assert!(!html.contains("item_id"));
}

#[test]
fn test_html_context_follows_config() {
    let store = store_with(9, "[]");
    let widget = FormWidget::init(
        FormWidgetConfig::new()
            .with_form_id(9)
            .with_action("/forms/9")
            .with_model_name("Survey"),
        &store,
    )
    .unwrap();

    let ctx = widget.html_context();
    assert_eq!(ctx.model_name(), "Survey");
    assert_eq!(
        widget.render_html().unwrap(),
        "<form id=\"form-widget-9\" action=\"/forms/9\" method=\"post\">\n</form>"
    );
}

// === submissions ===

#[test]
fn test_process_submission_valid() {
    let widget = inline(contact_form_json());
    let model = widget
        .process_submission(&submission(json!({
            "fullname": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "Hello"
        })))
        .unwrap();

    assert!(!model.has_errors());
}

#[test]
fn test_process_submission_reports_errors() {
    let widget = inline(contact_form_json());
    let model = widget
        .process_submission(&submission(json!({"email": "not-an-email"})))
        .unwrap();

    assert_eq!(model.first_error("fullname"), Some("Full name cannot be blank."));
    assert_eq!(
        model.first_error("email"),
        Some("Email is not a valid email address.")
    );
    assert_eq!(model.first_error("message"), None);
}

#[test]
fn test_process_submission_accepts_model_scoped_data() {
    let widget = inline(full_form_json());
    let model = widget
        .process_submission(&submission(json!({
            "DynamicModel": {
                "age": "forty",
                "born": "2024-02-30",
                "site": "ftp://example.com",
                "notes": "fine"
            }
        })))
        .unwrap();

    assert_eq!(model.first_error("age"), Some("Age must be an integer."));
    assert_eq!(model.first_error("born"), Some("The format of Born is invalid."));
    assert_eq!(model.first_error("site"), Some("Website is not a valid URL."));
    assert_eq!(model.first_error("notes"), None);
}

#[test]
fn test_rerender_with_submission_errors() {
    let widget = inline(contact_form_json());
    let mut model = widget
        .process_submission(&submission(json!({"fullname": "", "email": "x@y.io"})))
        .unwrap();

    let html = render_form(
        &widget.html_context(),
        TemplateVars {
            form_body: widget.schema(),
            model: &mut model,
            item_id: None,
        },
    );

    assert_has_error(&html, "Full name cannot be blank.");
    assert!(html.contains("value=\"x@y.io\""));
}

// === notifications ===

#[test]
fn test_notification_requires_both_addresses() {
    let widget = inline("[]");
    let mut mailer = MockMailSender::new();
    mailer.expect_send().never();

    assert!(!widget
        .send_notification(&mailer, None, Some("owner@example.com"), Some("Hi"), None)
        .unwrap());
    assert!(!widget
        .send_notification(&mailer, Some("site@example.com"), None, None, None)
        .unwrap());
}

#[test]
fn test_notification_sends_one_message() {
    let widget = inline("[]");
    let mailer = RecordingMailSender::new();

    let sent = widget
        .send_notification(
            &mailer,
            Some("site@example.com"),
            Some("owner@example.com"),
            Some("New response"),
            Some("Ada replied"),
        )
        .unwrap();

    assert!(sent);
    assert_eq!(
        mailer.sent(),
        vec![MailMessage {
            from: "site@example.com".to_string(),
            to: "owner@example.com".to_string(),
            subject: Some("New response".to_string()),
            text_body: Some("Ada replied".to_string()),
        }]
    );
}

#[test]
fn test_notification_failure_propagates() {
    let widget = inline("[]");
    let err = widget
        .send_notification(
            &FailingMailSender::new("relay denied"),
            Some("a@b.io"),
            Some("c@d.io"),
            None,
            None,
        )
        .unwrap_err();

    assert_eq!(err.code(), "MAIL");
    assert!(err.to_string().contains("relay denied"));
}
