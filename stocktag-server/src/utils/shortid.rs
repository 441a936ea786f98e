//! Short identifier generation
//!
//! Candidates are drawn uniformly from a 36-symbol base36 alphabet using the
//! OS CSPRNG. Uniqueness is NOT guaranteed here - the insert-time unique
//! constraint in the item repository is the authority, and collisions are
//! retried there with a fresh draw.

use rand::rngs::OsRng;
use rand::Rng;

/// Base36 alphabet: digits + lowercase letters
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fixed identifier length (36^7 ≈ 78 billion combinations)
pub const SHORT_ID_LEN: usize = 7;

/// Draw a random base36 identifier of [`SHORT_ID_LEN`] characters
pub fn generate_short_id() -> String {
    let mut rng = OsRng;
    (0..SHORT_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn short_id_length_and_charset() {
        let sid = generate_short_id();
        assert_eq!(sid.len(), SHORT_ID_LEN);
        assert!(sid
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn short_id_randomness() {
        let values: HashSet<String> = (0..100).map(|_| generate_short_id()).collect();
        assert!(values.len() > 90);
    }
}
