//! Uniform random draws used by key generation and the shuffle/argument
//! provers (§4.2, §4.2.1).
//!
//! The source of randomness is always an explicit parameter — never a
//! hidden singleton — so that tests can substitute a deterministic byte
//! source. [`RandomGenerator`] is the abstraction; [`OsRngGenerator`] is the
//! default, backed by [`crate::utils::rng::OsRng`].

use crate::bigint;
use crate::error::{CoreError, CoreResult};
use crate::group::{Group, ZqElement};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

/// Abstracts the source of cryptographically strong random bytes. Any
/// `RngCore + CryptoRng` implements it for free.
pub trait RandomGenerator {
    fn fill(&mut self, buf: &mut [u8]);
}

impl<T: RngCore + CryptoRng> RandomGenerator for T {
    fn fill(&mut self, buf: &mut [u8]) {
        self.fill_bytes(buf);
    }
}

/// The library's default generator, backed by the OS CSPRNG.
pub struct OsRngGenerator(crate::utils::rng::OsRng);

impl OsRngGenerator {
    pub fn new() -> Self {
        OsRngGenerator(crate::utils::rng::OsRng)
    }
}

impl Default for OsRngGenerator {
    fn default() -> Self {
        OsRngGenerator::new()
    }
}

impl RandomGenerator for OsRngGenerator {
    fn fill(&mut self, buf: &mut [u8]) {
        self.0.fill_bytes(buf);
    }
}

/// Uniform integer in `[0, n)` via rejection sampling on `bitLength(n)`
/// random bits. Fails when `n <= 0`.
pub fn gen_random_integer(rng: &mut impl RandomGenerator, n: &BigUint) -> CoreResult<BigUint> {
    if n.is_zero() {
        return Err(CoreError::invalid("gen_random_integer requires n > 0"));
    }
    let bit_len = bigint::bit_length(n) as usize;
    let num_bytes = bit_len.div_ceil(8);
    let excess_bits = num_bytes * 8 - bit_len;
    loop {
        let mut buf = vec![0u8; num_bytes.max(1)];
        rng.fill(&mut buf);
        if excess_bits > 0 {
            buf[0] &= 0xffu8 >> excess_bits;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < n {
            return Ok(candidate);
        }
    }
}

/// Uniform nonzero element of `Z_q` (§4.2.1), drawn by rejection sampling.
pub fn gen_random_exponent(rng: &mut impl RandomGenerator, group: &Group) -> CoreResult<ZqElement> {
    loop {
        let value = gen_random_integer(rng, &group.q)?;
        if !value.is_zero() {
            return Ok(ZqElement::new(group.clone(), value));
        }
    }
}

/// RFC 4648 alphabets for `genRandomBaseString`.
const BASE16_ALPHABET: &[u8] = b"0123456789ABCDEF";
const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE64_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Draws `length` alphabet symbols uniformly for `base` in `{16, 32, 64}`.
pub fn gen_random_base_string(
    rng: &mut impl RandomGenerator,
    length: usize,
    base: u32,
) -> CoreResult<String> {
    let alphabet: &[u8] = match base {
        16 => BASE16_ALPHABET,
        32 => BASE32_ALPHABET,
        64 => BASE64_ALPHABET,
        _ => return Err(CoreError::invalid("base must be one of 16, 32, 64")),
    };
    let alphabet_len = BigUint::from(alphabet.len() as u32);
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        let index = gen_random_integer(rng, &alphabet_len)?;
        let index: u64 = index
            .try_into()
            .map_err(|_| CoreError::unreachable("alphabet index did not fit u64"))?;
        out.push(alphabet[index as usize] as char);
    }
    Ok(out)
}
