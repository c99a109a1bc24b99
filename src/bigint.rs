//! Modular big-integer arithmetic: the one place in this crate that talks
//! directly to `num-bigint`. Everything above this module works with
//! [`crate::group::GqElement`] / [`crate::group::ZqElement`] and never touches
//! a `BigUint` directly.

use crate::error::{CoreError, CoreResult};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

/// `(a * b) mod m`.
pub fn mod_multiply(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `base^exp mod m`. `exp` is a non-negative integer; callers pass a `Z_q`
/// element's value directly, since it is already in `[0, q)`.
pub fn mod_exp(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    if base.is_one() {
        return BigUint::one();
    }
    base.modpow(exp, m)
}

/// Multiplicative inverse of `a` modulo `m`, via the extended Euclidean
/// algorithm. Returns `None` when `a` and `m` are not coprime (in particular
/// when `a` is a multiple of `m`, including zero).
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a_signed = BigInt::from(a.clone());
    let m_signed = BigInt::from(m.clone());
    let egcd = a_signed.extended_gcd(&m_signed);
    if !egcd.gcd.is_one() {
        return None;
    }
    let m_signed_i = m_signed.clone();
    let mut result = egcd.x % &m_signed_i;
    if result.sign() == num_bigint::Sign::Minus {
        result += &m_signed_i;
    }
    result.to_biguint()
}

/// Deterministic-witness-free Miller-Rabin primality test with `certainty`
/// independent random rounds. The probability of a composite passing is at
/// most `4^-certainty`, which this crate treats as "prime enough" at the
/// certainty levels selected by [`crate::config::SecurityLevel`].
pub fn is_probably_prime(n: &BigUint, certainty: u32) -> bool {
    let zero = BigUint::zero();
    let one = BigUint::one();
    let two = &one + &one;

    if n < &two {
        return false;
    }
    if n == &two || n == &(&two + &one) {
        return true;
    }
    if (n % &two).is_zero() {
        return false;
    }

    // n - 1 = 2^s * d with d odd.
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u64;
    while (&d % &two).is_zero() {
        d /= &two;
        s += 1;
    }

    let mut rng = rand::thread_rng();
    let n_minus_three = n - &(&two + &one);

    'rounds: for _ in 0..certainty.max(1) {
        // witness in [2, n-2]
        let a = if n_minus_three > zero {
            rng.gen_biguint_below(&n_minus_three) + &two
        } else {
            two.clone()
        };
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue 'rounds;
        }
        for _ in 0..s.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'rounds;
            }
        }
        return false;
    }
    true
}

/// Bit length of `n`, matching the spec's `bitLength(n)` used for rejection
/// sampling in [`crate::random`].
pub fn bit_length(n: &BigUint) -> u64 {
    n.bits()
}

/// Draws `num_bytes` cryptographically strong random bytes from `rng`.
pub fn random_bytes(rng: &mut impl RngCore, num_bytes: usize) -> Vec<u8> {
    let mut buf = vec![0u8; num_bytes];
    rng.fill_bytes(&mut buf);
    buf
}

/// Validates that `p` and `q` are both prime, with certainty tied to `p`'s
/// bit length, and that `p == 2q + 1` (safe prime pair).
pub fn validate_safe_prime_pair(p: &BigUint, q: &BigUint, certainty: u32) -> CoreResult<()> {
    let two = BigUint::from(2u32);
    if &(&two * q + BigUint::one()) != p {
        return Err(CoreError::invalid("p must equal 2q + 1"));
    }
    if !is_probably_prime(p, certainty) {
        return Err(CoreError::invalid("p is not prime"));
    }
    if !is_probably_prime(q, certainty) {
        return Err(CoreError::invalid("q is not prime"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_exp_small_group() {
        let p = BigUint::from(11u32);
        let g = BigUint::from(3u32);
        // g^2 mod 11 = 9
        assert_eq!(mod_exp(&g, &BigUint::from(2u32), &p), BigUint::from(9u32));
    }

    #[test]
    fn mod_inverse_roundtrip() {
        let p = BigUint::from(11u32);
        let a = BigUint::from(9u32);
        let inv = mod_inverse(&a, &p).unwrap();
        assert_eq!((&a * &inv) % &p, BigUint::one());
        // worked example: 9^-1 mod 11 == 5 since 9*5=45=44+1
        assert_eq!(inv, BigUint::from(5u32));
    }

    #[test]
    fn mod_inverse_of_multiple_is_none() {
        let p = BigUint::from(11u32);
        assert!(mod_inverse(&BigUint::zero(), &p).is_none());
    }

    #[test]
    fn primality_small_primes() {
        for p in [2u32, 3, 5, 7, 11, 13, 23, 2027] {
            assert!(is_probably_prime(&BigUint::from(p), 64), "{p} should be prime");
        }
        for c in [4u32, 6, 8, 9, 10, 1024] {
            assert!(!is_probably_prime(&BigUint::from(c), 64), "{c} should be composite");
        }
    }

    #[test]
    fn safe_prime_pair_validates() {
        // p = 11, q = 5: 11 = 2*5 + 1
        assert!(validate_safe_prime_pair(&BigUint::from(11u32), &BigUint::from(5u32), 64).is_ok());
        // p = 23, q = 11: 23 = 2*11 + 1
        assert!(validate_safe_prime_pair(&BigUint::from(23u32), &BigUint::from(11u32), 64).is_ok());
        // wrong relation
        assert!(validate_safe_prime_pair(&BigUint::from(11u32), &BigUint::from(4u32), 64).is_err());
    }
}
