//! The Bayer-Groth shuffle argument: a nested stack of sub-arguments
//! (§4.7-§4.12) sharing one group, one commitment key, and one Fiat-Shamir
//! transcript.

pub mod hadamard;
pub mod multi_exp;
pub mod product;
pub mod shuffle;
pub mod svp;
pub mod zero;

use crate::commitment::Commitment;
use crate::error::CoreResult;
use crate::group::{GqElement, Group, ZqElement};
use crate::hash::{self, Hashable};

/// `(u_1 y^0 + u_2 y^1 + ...) . v`, the bilinear map used throughout the
/// Zero and Hadamard arguments.
pub fn bilinear_y(u: &[ZqElement], v: &[ZqElement], y: &ZqElement) -> CoreResult<ZqElement> {
    let group = y.group().clone();
    let mut acc = ZqElement::zero(group.clone());
    let mut y_pow = ZqElement::new(group, num_bigint::BigUint::from(1u32));
    for (u_i, v_i) in u.iter().zip(v.iter()) {
        let term = u_i.multiply(v_i)?.multiply(&y_pow)?;
        acc = acc.add(&term)?;
        y_pow = y_pow.multiply(y)?;
    }
    Ok(acc)
}

/// `(x^0, x^1, ..., x^{n-1})`.
pub fn powers(x: &ZqElement, n: usize) -> CoreResult<Vec<ZqElement>> {
    let group = x.group().clone();
    let mut out = Vec::with_capacity(n);
    let mut acc = ZqElement::new(group, num_bigint::BigUint::from(1u32));
    for _ in 0..n {
        out.push(acc.clone());
        acc = acc.multiply(x)?;
    }
    Ok(out)
}

/// Elementwise product of two equal-length vectors of `Z_q` elements.
pub fn hadamard_product(a: &[ZqElement], b: &[ZqElement]) -> CoreResult<Vec<ZqElement>> {
    a.iter().zip(b.iter()).map(|(x, y)| x.multiply(y)).collect()
}

/// `a + scalar * b`, elementwise.
pub fn add_scaled(a: &[ZqElement], b: &[ZqElement], scalar: &ZqElement) -> CoreResult<Vec<ZqElement>> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.add(&y.multiply(scalar)?))
        .collect()
}

/// Derives a Fiat-Shamir challenge in `Z_q` from the ordered transcript
/// values, reducing the digest modulo `q`. Panics (via `Unreachable`) if the
/// digest is not strictly shorter than `q`'s bit length, per §4.5.
pub fn challenge(group: &Group, transcript: Vec<Hashable>) -> CoreResult<ZqElement> {
    if !hash::digest_bit_length_ok(&group.q) {
        return Err(crate::error::CoreError::unreachable(
            "digest bit length is not strictly less than q's bit length",
        ));
    }
    let digest = hash::recursive_hash(transcript)?;
    let n = hash::digest_to_biguint(&digest);
    Ok(ZqElement::new(group.clone(), n))
}

pub fn hashable_element(e: &GqElement) -> Hashable {
    Hashable::integer(e.value().clone())
}

pub fn hashable_commitment(c: &Commitment) -> Hashable {
    hashable_element(c.value())
}

pub fn hashable_scalar(e: &ZqElement) -> Hashable {
    Hashable::integer(e.value().clone())
}
