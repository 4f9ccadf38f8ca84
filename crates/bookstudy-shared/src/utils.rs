//! Identifier helpers

use uuid::{Uuid, Variant};

/// Parse a client-supplied identifier.
///
/// Only hyphenated RFC 4122 UUIDs of versions 1 through 5 are accepted, so
/// braced, URN, or simple forms and nil ids are rejected before they reach
/// a query.
pub fn parse_entity_id(value: &str) -> Option<Uuid> {
    if value.len() != 36 {
        return None;
    }

    let id = Uuid::parse_str(value).ok()?;
    let version_ok = matches!(id.get_version_num(), 1..=5);
    if version_ok && id.get_variant() == Variant::RFC4122 {
        Some(id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_entity_id(value: &str) -> bool {
        parse_entity_id(value).is_some()
    }

    #[test]
    fn test_accepts_v4_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_entity_id(&id.to_string()), Some(id));
        assert!(is_valid_entity_id(&id.to_string().to_uppercase()));
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert!(!is_valid_entity_id(""));
        assert!(!is_valid_entity_id("not-a-uuid"));
        assert!(!is_valid_entity_id("00000000-0000-0000-0000-000000000000"));
        // simple form without hyphens
        assert!(!is_valid_entity_id("67e5504410b1426f9247bb680e5fe0c8"));
        // version 7 is outside the accepted range
        assert!(!is_valid_entity_id("01890a5d-ac96-774b-bcce-b302099a8057"));
        // NCS variant nibble
        assert!(!is_valid_entity_id("67e55044-10b1-426f-1247-bb680e5fe0c8"));
    }
}
