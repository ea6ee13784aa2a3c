//! Markup tests for full form rendering.

use super::*;
use crate::model::{AttributeValue, ValidationModel};
use crate::schema::{only_data_fields, FormSchema, SchemaPolicy};
use crate::testing::{assert_wrapped_in, full_form_json};
use pretty_assertions::assert_eq;
use scraper::{ElementRef, Html, Selector};

fn select<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector).collect()
}

fn render(body: &str, item_id: Option<i64>) -> (String, ValidationModel) {
    let schema = FormSchema::from_json(body).unwrap();
    let mut model =
        ValidationModel::from_fields(&only_data_fields(&schema), SchemaPolicy::Lenient).unwrap();
    let html = render_form(
        &HtmlRenderContext::default(),
        TemplateVars {
            form_body: &schema,
            model: &mut model,
            item_id,
        },
    );
    (html, model)
}

#[test]
fn test_fullname_and_submit_scenario() {
    let body = r#"[
        [{"field": "input", "type": "text", "name": "fullname", "require": true}],
        [{"field": "submit", "label": "Send", "backgroundcolor": "primary"}]
    ]"#;
    let (html, model) = render(body, None);
    let doc = Html::parse_fragment(&html);

    assert_eq!(model.attributes(), ["fullname"]);

    let inputs = select(&doc, "input[type=\"text\"]");
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].value().attr("name"), Some("DynamicModel[fullname]"));
    assert_eq!(inputs[0].value().attr("aria-required"), Some("true"));

    let buttons = select(&doc, "button[type=\"submit\"]");
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].value().attr("class"), Some("btn primary"));
    assert_eq!(buttons[0].text().collect::<String>(), "Send");

    // No label key means no label element.
    assert!(select(&doc, "label").is_empty());
}

#[test]
fn test_rows_and_width_containers() {
    let (html, _) = render(full_form_json(), None);
    let doc = Html::parse_fragment(&html);

    let rows = select(&doc, "form > div.row");
    assert_eq!(rows.len(), 5);
    assert_eq!(select(&doc, "div.row > div.col-md-4").len(), 6);
    assert_wrapped_in(&html, "col-md-12", "<h3>Survey</h3>");
}

#[test]
fn test_description_markup_is_not_escaped() {
    let (html, _) = render(full_form_json(), None);
    let doc = Html::parse_fragment(&html);

    let headings = select(&doc, "div.col-md-12 > h3");
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].text().collect::<String>(), "Survey");
}

#[test]
fn test_list_controls_carry_positions_not_values() {
    let (html, model) = render(full_form_json(), None);
    let doc = Html::parse_fragment(&html);

    assert_eq!(model.value("plan"), &AttributeValue::List(vec!["2".to_string()]));
    assert_eq!(
        model.value("topics"),
        &AttributeValue::List(vec!["1".to_string(), "3".to_string()])
    );

    // Positions never match the string item values, so nothing shows as checked.
    assert_eq!(select(&doc, "input[name=\"DynamicModel[plan]\"][type=\"radio\"]").len(), 2);
    assert!(select(&doc, "input[type=\"radio\"][checked]").is_empty());
    assert_eq!(select(&doc, "input[name=\"DynamicModel[topics][]\"]").len(), 3);
    assert!(select(&doc, "input[type=\"checkbox\"][checked]").is_empty());

    // Numeric item values line up with positions by coincidence.
    let selected = select(&doc, "select[name=\"DynamicModel[country]\"] option[selected]");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value().attr("value"), Some("1"));
}

#[test]
fn test_radio_group_label_is_bold() {
    let (html, _) = render(full_form_json(), None);
    let doc = Html::parse_fragment(&html);

    let label = select(&doc, "label[for=\"dynamicmodel-plan\"]");
    assert_eq!(label.len(), 1);
    assert_eq!(label[0].value().attr("class"), Some("control-label bold"));
    assert_eq!(select(&doc, "div[role=\"radiogroup\"]").len(), 1);
}

#[test]
fn test_required_textarea_group() {
    let (html, _) = render(full_form_json(), None);
    let doc = Html::parse_fragment(&html);

    let groups = select(&doc, "div.form-group.field-dynamicmodel-notes.required");
    assert_eq!(groups.len(), 1);
    assert_eq!(select(&doc, "textarea[name=\"DynamicModel[notes]\"]").len(), 1);
}

#[test]
fn test_labels_and_values_are_escaped() {
    let body = r#"[[{"field": "input", "name": "q", "label": "<script>alert(1)</script>", "value": "\"quoted\""}]]"#;
    let (html, _) = render(body, None);
    let doc = Html::parse_fragment(&html);

    assert!(select(&doc, "script").is_empty());
    let input = select(&doc, "input[name=\"DynamicModel[q]\"]");
    assert_eq!(input[0].value().attr("value"), Some("\"quoted\""));
    assert_eq!(
        select(&doc, "label")[0].text().collect::<String>(),
        "<script>alert(1)</script>"
    );
}

#[test]
fn test_unnamed_select_renders_empty_container() {
    let body = r#"[[{"field": "select", "width": "col-md-3", "items": [
        {"value": "a", "text": "A"},
        {"value": "b", "text": "B", "checked": true}
    ]}]]"#;
    let (html, model) = render(body, None);
    let doc = Html::parse_fragment(&html);

    assert!(model.attributes().is_empty());
    assert!(select(&doc, "select").is_empty());
    let containers = select(&doc, "div.col-md-3");
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].inner_html(), "");
}

#[test]
fn test_hidden_item_id() {
    let (html, _) = render("[]", Some(12));
    let doc = Html::parse_fragment(&html);

    let hidden = select(&doc, "form > input[type=\"hidden\"][name=\"item_id\"]");
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].value().attr("value"), Some("12"));
}
