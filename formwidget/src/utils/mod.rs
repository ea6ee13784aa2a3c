//! Identifier, fingerprint and timestamp helpers.

mod ids;
pub mod timestamps;

pub use ids::{generate_render_id, schema_fingerprint};
pub use timestamps::{parse_timestamp, Timestamp, TimestampError};
