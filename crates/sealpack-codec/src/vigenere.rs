//! Cyclic-key substitution cipher.
//!
//! Each alphabetic input byte is shifted by an amount derived from the next
//! key character, with the key repeating cyclically. The key cursor advances
//! only over alphabetic input; every other byte passes through unchanged, so
//! output length always equals input length and
//! `decrypt(encrypt(x, k), k) == x` for any bytes `x` and valid key `k`.
//!
//! This is an educational substitution scheme, not a secure cipher.

use std::fmt;

use crate::error::{CodecError, CodecResult};

/// Validated cipher key: non-empty, ASCII-alphabetic characters only.
///
/// Shift amounts are derived case-insensitively, so `"Sun"` and `"sun"`
/// produce identical transforms.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    shifts: Vec<u8>,
}

impl Key {
    /// Validate `value` and build a key from it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKey`] when `value` is empty or contains
    /// a character outside `A`-`Z`/`a`-`z`.
    pub fn new(value: &str) -> CodecResult<Self> {
        if value.is_empty() {
            return Err(CodecError::invalid_key("empty", None));
        }
        if !value.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(CodecError::invalid_key(
                "non_alphabetic",
                Some(value.to_string()),
            ));
        }

        Ok(Self {
            shifts: value
                .bytes()
                .map(|byte| byte.to_ascii_lowercase() - b'a')
                .collect(),
        })
    }

    fn shift(&self, cursor: usize) -> u8 {
        self.shifts[cursor % self.shifts.len()]
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Encrypt `input` with `key`.
#[must_use]
pub fn encrypt(input: &[u8], key: &Key) -> Vec<u8> {
    transform(input, key, Direction::Forward)
}

/// Decrypt `input` with `key`, inverting [`encrypt`].
#[must_use]
pub fn decrypt(input: &[u8], key: &Key) -> Vec<u8> {
    transform(input, key, Direction::Backward)
}

fn transform(input: &[u8], key: &Key, direction: Direction) -> Vec<u8> {
    let mut cursor = 0;
    input
        .iter()
        .map(|&byte| {
            if !byte.is_ascii_alphabetic() {
                return byte;
            }

            let base = if byte.is_ascii_uppercase() { b'A' } else { b'a' };
            let shift = key.shift(cursor);
            cursor += 1;
            let offset = match direction {
                Direction::Forward => (byte - base + shift) % 26,
                Direction::Backward => (byte - base + 26 - shift) % 26,
            };
            base + offset
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> Key {
        Key::new(value).expect("valid key")
    }

    #[test]
    fn key_validation_matches_contract() {
        assert!(Key::new("abc").is_ok());
        assert!(matches!(
            Key::new("ab3"),
            Err(CodecError::InvalidKey {
                reason: "non_alphabetic",
                ..
            })
        ));
        assert!(matches!(
            Key::new(""),
            Err(CodecError::InvalidKey { reason: "empty", .. })
        ));
    }

    #[test]
    fn key_shifts_are_case_insensitive() {
        assert_eq!(
            encrypt(b"attack at dawn", &key("Lemon")),
            encrypt(b"attack at dawn", &key("lemon"))
        );
    }

    #[test]
    fn encrypt_shifts_letters_and_preserves_case() {
        let output = encrypt(b"Hello, World!", &key("abc"));
        assert_eq!(output, b"Hfnlp, Yosnd!");
    }

    #[test]
    fn round_trip_restores_arbitrary_bytes() {
        let input: Vec<u8> = (0..=u8::MAX).collect();
        for k in ["a", "sun", "VigenereKey"] {
            let k = key(k);
            assert_eq!(decrypt(&encrypt(&input, &k), &k), input);
        }
    }

    #[test]
    fn non_letters_pass_through_without_advancing_cursor() {
        let digits = b"0123 !?\n\x00\xff";
        let k = key("bcd");
        assert_eq!(encrypt(digits, &k), digits);
        assert_eq!(decrypt(digits, &k), digits);

        // The cursor holds still across the gap: both letters consume
        // consecutive key positions despite the punctuation between them.
        assert_eq!(encrypt(b"a-b", &k), b"b-d");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let k = key("abc");
        assert!(encrypt(&[], &k).is_empty());
        assert!(decrypt(&[], &k).is_empty());
    }
}
