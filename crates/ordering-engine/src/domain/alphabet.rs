//! Rank alphabet
//!
//! The 36-symbol alphabet every rank key is drawn from: digits `0-9`
//! followed by lowercase letters `a-z`, bound to indices `0..=35`.
//!
//! Lexicographic byte comparison of two keys only agrees with
//! index-by-index comparison because the symbols' byte values increase
//! with their index. That property is asserted at compile time and
//! re-checked by [`invariant_alphabet_monotonic`](super::invariants::invariant_alphabet_monotonic).

use super::errors::{InvalidRankError, InvalidRankReason};
use std::cmp::Ordering;

/// Alphabet symbols in index order.
pub const ALPHABET: [u8; 36] = *b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of symbols.
pub const RADIX: u8 = 36;

/// Index used to pad a missing lower bound.
pub const MIN_INDEX: u8 = 0;

/// Index used to pad a missing upper bound.
pub const MAX_INDEX: u8 = RADIX - 1;

/// True when every symbol's byte value is strictly greater than its predecessor's.
pub const fn is_monotonic(symbols: &[u8]) -> bool {
    let mut i = 1;
    while i < symbols.len() {
        if symbols[i] <= symbols[i - 1] {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(is_monotonic(&ALPHABET));

/// Alphabet index of a symbol, or `None` if it is not part of the alphabet.
pub fn index_of(symbol: u8) -> Option<u8> {
    match symbol {
        b'0'..=b'9' => Some(symbol - b'0'),
        b'a'..=b'z' => Some(symbol - b'a' + 10),
        _ => None,
    }
}

/// Symbol for an alphabet index.
///
/// Callers only pass indices in `MIN_INDEX..=MAX_INDEX`.
pub fn symbol_at(index: u8) -> u8 {
    ALPHABET[index as usize]
}

/// Trim and lowercase `input`, rejecting anything outside the alphabet.
///
/// Only ASCII case folding is applied: a non-ASCII character that would
/// lowercase into the alphabet (e.g. KELVIN SIGN) is still rejected.
pub fn normalize(input: &str) -> Result<String, InvalidRankError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InvalidRankError::new(input, InvalidRankReason::Empty));
    }

    let mut normalized = String::with_capacity(trimmed.len());
    for (position, ch) in trimmed.chars().enumerate() {
        let lowered = ch.to_ascii_lowercase();
        let valid = lowered.is_ascii() && index_of(lowered as u8).is_some();
        if !valid {
            return Err(InvalidRankError::new(
                input,
                InvalidRankReason::IllegalCharacter { ch, position },
            ));
        }
        normalized.push(lowered);
    }

    Ok(normalized)
}

/// Plain lexicographic comparison of two normalized keys.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips_through_symbol() {
        for index in MIN_INDEX..=MAX_INDEX {
            assert_eq!(index_of(symbol_at(index)), Some(index));
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(symbol_at(MIN_INDEX), b'0');
        assert_eq!(symbol_at(MAX_INDEX), b'z');
        assert_eq!(index_of(b'a'), Some(10));
        assert_eq!(index_of(b'A'), None);
        assert_eq!(index_of(b'!'), None);
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  AbC9 ").unwrap(), "abc9");
    }

    #[test]
    fn test_normalize_rejects_illegal_input() {
        for bad in ["AB!", "", " ", "a b", "a-b", "é"] {
            assert!(normalize(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_normalize_rejects_unicode_case_folding() {
        // U+212A KELVIN SIGN lowercases to 'k' under full Unicode rules
        let err = normalize("\u{212A}").unwrap_err();
        assert!(matches!(
            err.reason,
            InvalidRankReason::IllegalCharacter { position: 0, .. }
        ));
    }

    #[test]
    fn test_normalize_reports_position() {
        let err = normalize("ab!c").unwrap_err();
        assert!(matches!(
            err.reason,
            InvalidRankReason::IllegalCharacter { ch: '!', position: 2 }
        ));
    }

    #[test]
    fn test_non_monotonic_alphabet_detected() {
        assert!(is_monotonic(&ALPHABET));
        assert!(!is_monotonic(b"0123a456"));
        assert!(!is_monotonic(b"aa"));
    }

    #[test]
    fn test_compare_matches_index_order() {
        assert_eq!(compare("9", "a"), Ordering::Less);
        assert_eq!(compare("a", "a0"), Ordering::Less);
        assert_eq!(compare("b", "az"), Ordering::Greater);
        assert_eq!(compare("h", "h"), Ordering::Equal);
    }
}
