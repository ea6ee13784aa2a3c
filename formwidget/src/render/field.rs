//! Per-field rendering dispatch.

use super::{HtmlOptions, ItemMap, Label, RenderContext};
use crate::model::{AttributeValue, ValidationModel};
use crate::schema::{FieldDescriptor, FieldKind, Item};

/// Layout template of textarea fields.
pub const TEXTAREA_TEMPLATE: &str = "{label}\n{input}\n{hint}\n{error}";

/// Class added to radio group labels.
const RADIO_LABEL_CLASS: &str = "bold";

/// Renders one field wrapped in its width container.
///
/// Unknown kinds and fields that need a name but lack one render as an
/// empty container; this function never fails. Radio, checkbox and select
/// fields assign their checked positions to the model before rendering.
pub fn render_field<C>(ctx: &C, model: &mut ValidationModel, field: &FieldDescriptor) -> String
where
    C: RenderContext + ?Sized,
{
    tracing::debug!(field = %field.field, name = field.name.as_deref(), "Rendering field");

    let fragment = match field.field {
        FieldKind::Input => input(ctx, model, field),
        FieldKind::Textarea => textarea(ctx, model, field),
        FieldKind::Radio => list(ctx, model, field, |ctx, model, name, items, label| {
            ctx.radio_list(model, name, items, label)
        }),
        FieldKind::Checkbox => list(ctx, model, field, |ctx, model, name, items, label| {
            ctx.checkbox_list(model, name, items, label)
        }),
        FieldKind::Select => list(ctx, model, field, |ctx, model, name, items, label| {
            ctx.drop_down_list(model, name, items, label)
        }),
        FieldKind::Description => field.textdescription.clone().unwrap_or_default(),
        FieldKind::Submit => submit(ctx, field),
        FieldKind::Other(ref kind) => {
            tracing::debug!(kind = kind.as_str(), "Unknown field kind rendered empty");
            String::new()
        }
    };

    wrap(field.width.as_deref().unwrap_or_default(), &fragment)
}

/// Wraps a fragment in a `div` carrying the width class.
#[must_use]
pub fn wrap(width: &str, fragment: &str) -> String {
    format!("<div class=\"{width}\">{fragment}</div>")
}

/// Collects the `placeholder`, `value`, `id` and `class` options of a field.
#[must_use]
pub fn field_options(field: &FieldDescriptor) -> HtmlOptions {
    let mut options = HtmlOptions::new();
    let candidates = [
        ("placeholder", &field.placeholder),
        ("value", &field.value),
        ("id", &field.id),
        ("class", &field.class),
    ];
    for (key, value) in candidates {
        if let Some(value) = value {
            options.insert(key.to_string(), value.clone());
        }
    }
    options
}

fn text_label(field: &FieldDescriptor) -> Label {
    match field.label.as_deref() {
        Some(text) if !text.is_empty() => Label::text(text),
        _ => Label::Hidden,
    }
}

fn input<C>(ctx: &C, model: &ValidationModel, field: &FieldDescriptor) -> String
where
    C: RenderContext + ?Sized,
{
    let Some(name) = field.data_name() else {
        return String::new();
    };
    ctx.text_input(
        model,
        name,
        &field.input_type_or_default(),
        &field_options(field),
        &text_label(field),
    )
}

fn textarea<C>(ctx: &C, model: &ValidationModel, field: &FieldDescriptor) -> String
where
    C: RenderContext + ?Sized,
{
    let Some(name) = field.data_name() else {
        return String::new();
    };
    ctx.text_area(
        model,
        name,
        &field_options(field),
        &text_label(field),
        TEXTAREA_TEMPLATE,
    )
}

/// Builds the `value -> text` map and the 1-based positions of checked items.
fn items_and_checked(items: &[Item]) -> (ItemMap, Vec<String>) {
    let mut map = ItemMap::new();
    let mut checked = Vec::new();
    for (index, item) in items.iter().enumerate() {
        map.insert(item.value.clone(), item.text.clone());
        if item.checked {
            checked.push((index + 1).to_string());
        }
    }
    (map, checked)
}

fn list<C, F>(ctx: &C, model: &mut ValidationModel, field: &FieldDescriptor, render: F) -> String
where
    C: RenderContext + ?Sized,
    F: FnOnce(&C, &ValidationModel, &str, &ItemMap, &Label) -> String,
{
    let Some(name) = field.data_name() else {
        return String::new();
    };

    let (items, checked) = items_and_checked(&field.items);
    // Positions, not values, even for radios and selects.
    model.set_value(name, AttributeValue::List(checked));

    let text = field.label.clone().unwrap_or_default();
    let label = if field.field == FieldKind::Radio {
        Label::with_class(text, RADIO_LABEL_CLASS)
    } else {
        Label::text(text)
    };

    render(ctx, model, name, &items, &label)
}

fn submit<C>(ctx: &C, field: &FieldDescriptor) -> String
where
    C: RenderContext + ?Sized,
{
    let label = field.label.as_deref().unwrap_or_default();
    let class = format!("btn {}", field.backgroundcolor.as_deref().unwrap_or_default());
    ctx.submit_button(label, &class)
}
