//! Assertions over rendered form markup.

/// Asserts that the markup holds a control submitted as `model[attribute]`.
pub fn assert_has_control(html: &str, model: &str, attribute: &str) {
    let name = format!("name=\"{model}[{attribute}]");
    assert!(
        html.contains(&name),
        "Expected a control named '{model}[{attribute}]' in:\n{html}"
    );
}

/// Asserts that no control is submitted as `model[attribute]`.
pub fn assert_lacks_control(html: &str, model: &str, attribute: &str) {
    let name = format!("name=\"{model}[{attribute}]");
    assert!(
        !html.contains(&name),
        "Expected no control named '{model}[{attribute}]' in:\n{html}"
    );
}

/// Asserts that `fragment` appears inside a width container of class `width`.
pub fn assert_wrapped_in(html: &str, width: &str, fragment: &str) {
    let open = format!("<div class=\"{width}\">");
    let found = html
        .match_indices(&open)
        .any(|(start, _)| html[start + open.len()..].contains(fragment));
    assert!(
        found,
        "Expected '{fragment}' wrapped in '{open}' in:\n{html}"
    );
}

/// Asserts that the markup shows `message` as a field error.
pub fn assert_has_error(html: &str, message: &str) {
    let block = format!("<div class=\"help-block\">{message}</div>");
    assert!(
        html.contains("has-error") && html.contains(&block),
        "Expected error '{message}' in:\n{html}"
    );
}

/// Asserts that every needle appears, in the given order.
pub fn assert_order(html: &str, needles: &[&str]) {
    let mut cursor = 0;
    for needle in needles {
        match html[cursor..].find(needle) {
            Some(offset) => cursor += offset + needle.len(),
            None => panic!("Expected '{needle}' after byte {cursor} in:\n{html}"),
        }
    }
}
