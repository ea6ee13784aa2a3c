//! Value checks behind each rule kind.

use crate::registry::RuleKind;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::AttributeValue;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?$";
const URL_PATTERN: &str = r"(?i)^https?://[a-z0-9][a-z0-9_-]*(?:\.[a-z0-9][a-z0-9_-]*)+(?::\d{1,5})?(?:$|[?/#])";
const INTEGER_PATTERN: &str = r"^\s*[+-]?\d+\s*$";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> bool {
    compiled(cell, pattern).is_some_and(|re| re.is_match(text))
}

/// Returns true if the text is a syntactically valid email address.
#[must_use]
pub fn is_email(text: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    matches(&EMAIL, EMAIL_PATTERN, text)
}

/// Returns true if the text is an absolute http or https URL.
#[must_use]
pub fn is_url(text: &str) -> bool {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    matches(&URL, URL_PATTERN, text)
}

/// Returns true if the text is an optionally signed integer.
#[must_use]
pub fn is_integer(text: &str) -> bool {
    static INTEGER: OnceLock<Option<Regex>> = OnceLock::new();
    matches(&INTEGER, INTEGER_PATTERN, text)
}

/// Returns true if the text is a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn is_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).is_ok()
}

/// Checks a non-empty value against a rule kind.
///
/// Returns the error message template on failure, with `{attribute}` left
/// for the caller to substitute.
pub(crate) fn check(kind: RuleKind, value: &AttributeValue) -> Result<(), &'static str> {
    let text = match (kind, value) {
        (_, AttributeValue::Null) => return Ok(()),
        // Checkbox groups submit several values against a string rule.
        (RuleKind::String, AttributeValue::List(_)) => return Ok(()),
        (RuleKind::String, AttributeValue::Text(_)) => return Ok(()),
        (_, AttributeValue::List(_)) => return Err(message(kind)),
        (_, AttributeValue::Text(text)) => text.as_str(),
    };

    let valid = match kind {
        RuleKind::String => true,
        RuleKind::Email => is_email(text),
        RuleKind::Url => is_url(text),
        RuleKind::Integer => is_integer(text),
        RuleKind::Date => is_date(text),
    };

    if valid {
        Ok(())
    } else {
        Err(message(kind))
    }
}

fn message(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::String => "{attribute} must be a string.",
        RuleKind::Email => "{attribute} is not a valid email address.",
        RuleKind::Date => "The format of {attribute} is invalid.",
        RuleKind::Integer => "{attribute} must be an integer.",
        RuleKind::Url => "{attribute} is not a valid URL.",
    }
}
