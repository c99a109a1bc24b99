//! Canonical encodings (§6 External Interfaces): integer↔bytes and
//! string↔bytes, used by [`crate::hash`] to frame heterogeneous inputs.

use num_bigint::BigUint;
use num_traits::Zero;

/// Big-endian, unsigned, minimal-length encoding of a non-negative integer.
/// Zero encodes as the single byte `0x00`.
pub fn integer_to_bytes(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        return vec![0u8];
    }
    n.to_bytes_be()
}

/// Inverse of [`integer_to_bytes`].
pub fn bytes_to_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// UTF-8 encoding, no BOM, no normalization.
pub fn string_to_bytes(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}
