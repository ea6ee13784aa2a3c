//! Testing utilities for code embedding form widgets.
//!
//! This module provides:
//! - Sample schemas and a pre-filled form store
//! - Recording and failing collaborators
//! - Assertions over rendered markup

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_has_control, assert_has_error, assert_lacks_control, assert_order,
    assert_wrapped_in,
};
pub use fixtures::{
    contact_form_json, contact_schema, full_form_json, store_with, CONTACT_FORM_ID,
};
pub use mocks::{FailingFormStore, FailingMailSender, RecordingMailSender};
