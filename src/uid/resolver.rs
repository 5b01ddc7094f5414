//! External identifier resolution
//!
//! An xid that reads as an unsigned 64-bit integer *is* the uid. Anything else
//! is fingerprinted, so the same string always lands on the same node.
//!
//! Numeric forms (auto base):
//! - `0x` / `0X`: hexadecimal
//! - `0b` / `0B`: binary
//! - `0o` / `0O`: octal
//! - leading `0` with more digits: octal
//! - otherwise decimal
//!
//! Signs, separators, whitespace and values past `u64::MAX` are not numeric.

use xxhash_rust::xxh64::xxh64;

use crate::errors::{MutationError, MutationResult};

/// Seed for identifier fingerprints. Changing it re-homes every hashed node.
const FINGERPRINT_SEED: u64 = 0;

/// Resolve an external identifier to a uid.
///
/// Numeric zero is rejected: uid 0 means "no entity".
pub fn resolve(xid: &str) -> MutationResult<u64> {
    match parse_uid(xid) {
        Some(0) => Err(MutationError::invalid_identifier(xid)),
        Some(uid) => Ok(uid),
        None => Ok(fingerprint(xid)),
    }
}

/// 64-bit fingerprint of an identifier's bytes.
///
/// Not validated against zero.
pub fn fingerprint(xid: &str) -> u64 {
    xxh64(xid.as_bytes(), FINGERPRINT_SEED)
}

/// Parse an identifier as an auto-base unsigned integer.
pub fn parse_uid(xid: &str) -> Option<u64> {
    let (digits, radix) = split_radix(xid);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn split_radix(s: &str) -> (&str, u32) {
    let prefixed = [("0x", 16), ("0X", 16), ("0b", 2), ("0B", 2), ("0o", 8), ("0O", 8)];
    for (prefix, radix) in prefixed {
        if let Some(rest) = s.strip_prefix(prefix) {
            return (rest, radix);
        }
    }
    match s.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (rest, 8),
        _ => (s, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MutationErrorCode;

    #[test]
    fn test_decimal_is_uid() {
        assert_eq!(resolve("100").unwrap(), 100);
        assert_eq!(resolve("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_prefixed_forms() {
        assert_eq!(resolve("0x1f").unwrap(), 31);
        assert_eq!(resolve("0XFF").unwrap(), 255);
        assert_eq!(resolve("0b101").unwrap(), 5);
        assert_eq!(resolve("0o17").unwrap(), 15);
        assert_eq!(resolve("017").unwrap(), 15);
    }

    #[test]
    fn test_zero_rejected_in_every_base() {
        for xid in ["0", "0x0", "00", "0b0", "0o000"] {
            let err = resolve(xid).unwrap_err();
            assert_eq!(err.code(), MutationErrorCode::AeroInvalidIdentifier, "xid {}", xid);
        }
    }

    #[test]
    fn test_non_numeric_is_fingerprinted() {
        for xid in ["alice", "_:blank", "0x", "08", "+5", "-5", "1_000", " 7", "0xZZ", ""] {
            assert_eq!(resolve(xid).unwrap(), fingerprint(xid), "xid {:?}", xid);
        }
    }

    #[test]
    fn test_overflow_is_fingerprinted() {
        let xid = "18446744073709551616";
        assert_eq!(parse_uid(xid), None);
        assert_eq!(resolve(xid).unwrap(), fingerprint(xid));
    }

    #[test]
    fn test_fingerprint_known_value() {
        // xxHash64 of the empty input with seed 0.
        assert_eq!(fingerprint(""), 0xef46_db37_51d8_e999);
    }

    #[test]
    fn test_fingerprint_deterministic_and_distinct() {
        assert_eq!(fingerprint("alice"), fingerprint("alice"));
        assert_ne!(fingerprint("alice"), fingerprint("bob"));
        assert_ne!(fingerprint("alice"), fingerprint("Alice"));
    }
}
