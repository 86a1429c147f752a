//! Fallback order identifiers for orders that never reached the server.
//!
//! When the remote gateway fails (or answers with a shape nobody
//! recognizes) the placement flow still hands the customer an order
//! reference. The synthesized form is visibly different from a
//! server-assigned id so staff can spot a local-only order:
//! `SC-` followed by the last 8 digits of the epoch-millisecond clock
//! and one random uppercase letter, e.g. `SC-45678901K`.

use chrono::Utc;
use rand::Rng;

/// Prefix shared by all locally synthesized order identifiers.
pub const ORDER_ID_PREFIX: &str = "SC";

/// Synthesizes a local order identifier from the current wall clock
/// and a random letter for collision avoidance.
pub fn synthesize_local_order_id() -> String {
    synthesize_at(Utc::now().timestamp_millis(), &mut rand::rng())
}

/// Clock- and rng-injected form of [`synthesize_local_order_id`], so
/// the format can be asserted deterministically.
pub fn synthesize_at(now_ms: i64, rng: &mut impl Rng) -> String {
    let digits = now_ms.rem_euclid(100_000_000);
    let letter = (b'A' + rng.random_range(0..26)) as char;
    format!("{}-{:08}{}", ORDER_ID_PREFIX, digits, letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_fallback_format(id: &str) {
        let digits = id
            .strip_prefix("SC-")
            .unwrap_or_else(|| panic!("missing prefix: {}", id));
        assert_eq!(digits.len(), 9, "unexpected length: {}", id);
        assert!(digits[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(digits[8..].chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_format() {
        let id = synthesize_local_order_id();
        assert_fallback_format(&id);
    }

    #[test]
    fn test_takes_last_eight_digits_of_clock() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = synthesize_at(1_712_345_678_901, &mut rng);
        assert!(id.starts_with("SC-45678901"), "got {}", id);
        assert_fallback_format(&id);
    }

    #[test]
    fn test_small_clock_is_zero_padded() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = synthesize_at(42, &mut rng);
        assert!(id.starts_with("SC-00000042"), "got {}", id);
        assert_fallback_format(&id);
    }

    #[test]
    fn test_letter_varies_with_rng() {
        let letters: std::collections::HashSet<char> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                synthesize_at(0, &mut rng).chars().last().unwrap()
            })
            .collect();
        assert!(letters.len() > 1);
    }
}
