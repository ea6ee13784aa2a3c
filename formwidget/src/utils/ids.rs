//! Render identifiers and schema fingerprints.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generates a time-ordered id for one render.
#[must_use]
pub fn generate_render_id() -> Uuid {
    Uuid::now_v7()
}

/// Returns the lowercase hex SHA-256 of a raw schema body.
///
/// Client-side renderers use it to cache parsed schemas.
#[must_use]
pub fn schema_fingerprint(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ids_are_ordered() {
        let first = generate_render_id();
        let second = generate_render_id();
        assert!(first <= second);
    }

    #[test]
    fn test_fingerprint_known_value() {
        assert_eq!(
            schema_fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(schema_fingerprint("[]").len(), 64);
        assert_ne!(schema_fingerprint("[]"), schema_fingerprint("{}"));
    }
}
