//! ID generation utilities for membank
//!
//! Provides identifiers for captured exchanges.

use rand::Rng;

/// Number of random bytes behind an exchange ID (24 hex chars)
const EXCHANGE_ID_BYTES: usize = 12;

/// Generate a unique exchange ID
///
/// Format: `exch-{24 lowercase hex chars}`
/// Example: `exch-3f9a0c1d2e4b5a6978c0d1e2`
pub fn generate_exchange_id() -> String {
    let random: [u8; EXCHANGE_ID_BYTES] = rand::rng().random();
    format!("exch-{}", hex::encode(random))
}

/// First eight characters of an ID, for compact display
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exchange_id_format() {
        let id = generate_exchange_id();
        assert!(id.starts_with("exch-"));
        let suffix = &id["exch-".len()..];
        assert_eq!(suffix.len(), 24);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_exchange_id_uniqueness() {
        let id1 = generate_exchange_id();
        let id2 = generate_exchange_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("exch-0123456789abcdef"), "exch-012");
    }

    #[test]
    fn test_short_id_shorter_than_prefix() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn test_short_id_multibyte() {
        assert_eq!(short_id("ééééééééé"), "éééééééé");
    }
}
