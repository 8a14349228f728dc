//! SHA256 + hex ID generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Converts a byte slice to a lowercase hex string of the specified length.
///
/// Hex characters map directly onto hash bytes (no remainder arithmetic
/// needed the way base-N encodings require), so truncation just takes the
/// leading `length` characters of the hex expansion.
pub fn encode_hex(data: &[u8], length: usize) -> String {
    let mut s = String::with_capacity(data.len() * 2);
    for byte in data {
        s.push_str(&format!("{:02x}", byte));
    }

    if s.len() < length {
        let padding = "0".repeat(length - s.len());
        s = padding + &s;
    }
    if s.len() > length {
        s.truncate(length);
    }

    s
}

/// Creates a hash-based ID for an issue.
///
/// `length` is the number of hex characters in the short hash; typical
/// values fall in the 4-12 range.
pub fn generate_hash_id(
    prefix: &str,
    title: &str,
    description: &str,
    creator: &str,
    timestamp: DateTime<Utc>,
    length: usize,
    nonce: i32,
) -> String {
    // Combine inputs into a stable content string.
    let content = format!(
        "{}|{}|{}|{}|{}",
        title,
        description,
        creator,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );

    let hash = Sha256::digest(content.as_bytes());

    // Two hex characters per byte; round up so odd lengths still have
    // enough source bytes to truncate from.
    let num_bytes = length.div_ceil(2).clamp(1, hash.len());
    let short_hash = encode_hex(&hash[..num_bytes], length);
    format!("{}-{}", prefix, short_hash)
}

/// Computes the collision probability using the birthday-paradox approximation.
///
/// P(collision) ~ 1 - e^(-n(n-1) / (2 * 16^L))
/// where n = number of items, L = hex ID length.
fn collision_probability(num_issues: usize, id_length: usize) -> f64 {
    let n = num_issues as f64;
    let total: f64 = 16.0_f64.powi(id_length as i32);
    let exponent = -(n * (n - 1.0)) / (2.0 * total);
    1.0 - exponent.exp()
}

/// Determines the optimal ID length for the current database size.
///
/// Tries lengths from `min_length` to `max_length`, returning the first
/// that keeps the collision probability at or below `max_collision_prob`.
pub fn compute_adaptive_length(
    num_issues: usize,
    min_length: usize,
    max_length: usize,
    max_collision_prob: f64,
) -> usize {
    for length in min_length..=max_length {
        let prob = collision_probability(num_issues, length);
        if prob <= max_collision_prob {
            return length;
        }
    }
    max_length
}

/// Default adaptive ID configuration constants.
pub mod adaptive_defaults {
    /// Default collision probability threshold (25%).
    pub const MAX_COLLISION_PROB: f64 = 0.25;
    /// Default minimum hash length.
    pub const MIN_LENGTH: usize = 4;
    /// Default maximum hash length.
    pub const MAX_LENGTH: usize = 12;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hex_basic() {
        let result = encode_hex(&[], 4);
        assert_eq!(result, "0000");
    }

    #[test]
    fn encode_hex_length() {
        let data = [0xFF, 0xFF];
        let result = encode_hex(&data, 4);
        assert_eq!(result, "ffff");
    }

    #[test]
    fn encode_hex_truncates() {
        let data = [0xAB, 0xCD, 0xEF];
        let result = encode_hex(&data, 3);
        assert_eq!(result, "abc");
    }

    #[test]
    fn generate_hash_id_format() {
        let ts = chrono::Utc::now();
        let id = generate_hash_id("bd", "Test Title", "desc", "alice", ts, 6, 0);
        assert!(id.starts_with("bd-"));
        // prefix "bd-" + 6 hex chars = 9 total
        assert_eq!(id.len(), 9);
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_hash_id_deterministic() {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id1 = generate_hash_id("bd", "Title", "Desc", "alice", ts, 6, 0);
        let id2 = generate_hash_id("bd", "Title", "Desc", "alice", ts, 6, 0);
        assert_eq!(id1, id2);
    }

    #[test]
    fn generate_hash_id_nonce_changes_output() {
        let ts = chrono::Utc::now();
        let id1 = generate_hash_id("bd", "Title", "Desc", "alice", ts, 6, 0);
        let id2 = generate_hash_id("bd", "Title", "Desc", "alice", ts, 6, 1);
        assert_ne!(id1, id2);
    }

    #[test]
    fn adaptive_length_small_repo() {
        let len = compute_adaptive_length(10, 4, 12, 0.25);
        assert_eq!(len, 4); // 10 issues easily fits in 4 hex chars
    }

    #[test]
    fn adaptive_length_large_repo() {
        let len = compute_adaptive_length(100_000, 4, 12, 0.25);
        assert!(len >= 7); // 100K issues needs longer IDs
    }

    #[test]
    fn adaptive_length_capped_at_max() {
        let len = compute_adaptive_length(10_000_000_000, 4, 12, 0.01);
        assert_eq!(len, 12);
    }
}
