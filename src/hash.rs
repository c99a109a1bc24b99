//! The recursive, domain-separated Fiat-Shamir hash over a closed tagged
//! union of hashable inputs (§4.5).
//!
//! Built on the digest helper in [`crate::utils::hash`]; this module owns
//! the framing rules (leaf prefixes, list recursion) that make the digest a
//! collision-resistant function on the *structured* input rather than on
//! its raw bytes.

use crate::conversion;
use crate::error::{CoreError, CoreResult};
use crate::utils::hash::digest;
use num_bigint::BigUint;

const BYTES_TAG: u8 = 0x00;
const INTEGER_TAG: u8 = 0x01;
const STRING_TAG: u8 = 0x02;

/// The closed variant type hashed by the Fiat-Shamir transform.
#[derive(Debug, Clone)]
pub enum Hashable {
    Bytes(Vec<u8>),
    Integer(BigUint),
    String(String),
    List(Vec<Hashable>),
}

impl Hashable {
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Hashable::Bytes(b.into())
    }

    pub fn integer(n: impl Into<BigUint>) -> Self {
        Hashable::Integer(n.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Hashable::String(s.into())
    }

    pub fn list(xs: Vec<Hashable>) -> Self {
        Hashable::List(xs)
    }
}

/// `H : Hashable -> [u8; 32]`, SHA3-256 output.
pub fn hash(input: &Hashable) -> CoreResult<[u8; 32]> {
    match input {
        Hashable::Bytes(b) => {
            let mut framed = Vec::with_capacity(1 + b.len());
            framed.push(BYTES_TAG);
            framed.extend_from_slice(b);
            Ok(digest(&framed))
        }
        Hashable::Integer(n) => {
            let mut framed = vec![INTEGER_TAG];
            framed.extend(conversion::integer_to_bytes(n));
            Ok(digest(&framed))
        }
        Hashable::String(s) => {
            let mut framed = vec![STRING_TAG];
            framed.extend(conversion::string_to_bytes(s));
            Ok(digest(&framed))
        }
        Hashable::List(items) => {
            if items.is_empty() {
                return Err(CoreError::invalid("cannot hash an empty list"));
            }
            if items.len() == 1 {
                return hash(&items[0]);
            }
            let mut concatenated = Vec::with_capacity(items.len() * 32);
            for item in items {
                concatenated.extend_from_slice(&hash(item)?);
            }
            Ok(digest(&concatenated))
        }
    }
}

/// `recursiveHash(x_1, ..., x_k)`, k >= 1: equivalent to `hash(&Hashable::List(xs))`.
pub fn recursive_hash(xs: Vec<Hashable>) -> CoreResult<[u8; 32]> {
    hash(&Hashable::List(xs))
}

/// Reduces a 32-byte digest modulo `q`, as the sub-arguments need when
/// deriving a Fiat-Shamir challenge in `Z_q`. Callers MUST first confirm
/// (via [`digest_bit_length_ok`]) that the digest's bit length is strictly
/// less than `q`'s, per §4.5.
pub fn digest_to_biguint(digest_bytes: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_be(digest_bytes)
}

/// §4.5: "Implementations MUST verify that the digest bit length is
/// strictly less than the bit length of q" before reducing a digest modulo
/// `q` for use as a challenge.
pub fn digest_bit_length_ok(q: &BigUint) -> bool {
    256 < crate::bigint::bit_length(q)
}
