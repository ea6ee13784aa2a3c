//! Server-side form layout.

use super::{render_field, RenderContext};
use crate::errors::FormId;
use crate::model::ValidationModel;
use crate::schema::FormSchema;

/// Name of the hidden input carrying the edited item id.
pub const ITEM_ID_FIELD: &str = "item_id";

/// Variables passed to the form template.
#[derive(Debug)]
pub struct TemplateVars<'a> {
    /// The full, unfiltered schema; drives layout.
    pub form_body: &'a FormSchema,
    /// The model fields bind to.
    pub model: &'a mut ValidationModel,
    /// Item being edited, if any.
    pub item_id: Option<FormId>,
}

/// Renders the complete form: open tag, optional item id, rows, close tag.
///
/// Each schema row becomes a `row` container holding its rendered fields.
pub fn render_form<C>(ctx: &C, vars: TemplateVars<'_>) -> String
where
    C: RenderContext + ?Sized,
{
    let TemplateVars {
        form_body,
        model,
        item_id,
    } = vars;

    let mut parts = vec![ctx.begin_form()];
    if let Some(item_id) = item_id {
        parts.push(ctx.hidden_input(ITEM_ID_FIELD, &item_id.to_string()));
    }

    for row in form_body.rows() {
        let fields: String = row
            .iter()
            .map(|field| render_field(ctx, model, field))
            .collect();
        parts.push(format!("<div class=\"row\">{fields}</div>"));
    }

    parts.push(ctx.end_form());
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlRenderContext;
    use crate::schema::{FieldDescriptor, FieldKind};

    #[test]
    fn test_rows_in_order_with_item_id() {
        let schema = FormSchema::new()
            .with_row(vec![FieldDescriptor::input("text").with_name("a")])
            .with_row(vec![FieldDescriptor::new(FieldKind::Submit).with_label("Go")]);
        let mut model = ValidationModel::new(["a"]);
        let ctx = HtmlRenderContext::default();

        let html = render_form(
            &ctx,
            TemplateVars {
                form_body: &schema,
                model: &mut model,
                item_id: Some(9),
            },
        );

        assert!(html.starts_with("<form"));
        assert!(html.ends_with("</form>"));
        assert_eq!(html.matches("<div class=\"row\">").count(), 2);
        assert!(html.contains("name=\"item_id\" value=\"9\""));
        assert!(html.find("DynamicModel[a]").unwrap() < html.find("<button").unwrap());
    }

    #[test]
    fn test_no_item_id_input_without_item() {
        let schema = FormSchema::new();
        let mut model = ValidationModel::default();
        let ctx = HtmlRenderContext::default();

        let html = render_form(
            &ctx,
            TemplateVars {
                form_body: &schema,
                model: &mut model,
                item_id: None,
            },
        );

        assert!(!html.contains(ITEM_ID_FIELD));
        assert_eq!(html, format!("{}\n</form>", ctx.begin_form()));
    }
}
