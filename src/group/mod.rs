//! The safe-prime group `G_q` and its exponent ring `Z_q`.
//!
//! `G_q` is the order-`q` multiplicative subgroup of the integers modulo `p`,
//! where `p = 2q + 1` and both `p`, `q` are prime ("safe prime" pair). `Z_q`
//! is the associated exponent ring. [`GroupParams`] holds the validated
//! triple `(p, q, g)`; [`GqElement`] and [`ZqElement`] are immutable value
//! types that each carry a shared, reference-counted handle back to the
//! parameters they were built under, so that mixed-group arithmetic is a
//! construction-time error rather than a silent wrong answer.

mod element;
mod matrix;
mod scalar;
mod vector;

pub use element::GqElement;
pub use matrix::GroupMatrix;
pub use scalar::ZqElement;
pub use vector::{GroupMember, GroupVector};

use crate::bigint;
use crate::config::SecurityLevel;
use crate::error::{CoreError, CoreResult};
use num_bigint::BigUint;
use num_traits::One;
use std::sync::Arc;

/// Validated `(p, q, g)` safe-prime group parameters, shared by reference
/// between every element built from them.
#[derive(Debug, PartialEq, Eq)]
pub struct GroupParams {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    pub security_level: SecurityLevel,
}

/// A reference-counted, immutable handle to a group's parameters. Cheap to
/// clone and compare; two handles are equal iff they describe the same
/// `(p, q, g)`.
pub type Group = Arc<GroupParams>;

impl GroupParams {
    /// Validates `(p, q, g)` and wraps them in a shareable handle.
    ///
    /// Fails when: `p != 2q + 1`; `p` or `q` is not prime at the certainty
    /// implied by `p`'s bit length; `g` is out of `(1, p)`; `g == p - 1`; or
    /// `g^q mod p != 1`.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> CoreResult<Group> {
        let security_level = SecurityLevel::for_bit_length(bigint::bit_length(&p));
        bigint::validate_safe_prime_pair(&p, &q, security_level.certainty)?;

        let one = BigUint::one();
        if g <= one || g >= p {
            return Err(CoreError::invalid("g must satisfy 1 < g < p"));
        }
        let p_minus_one = &p - &one;
        if g == p_minus_one {
            return Err(CoreError::invalid("g must not equal p - 1"));
        }
        if bigint::mod_exp(&g, &q, &p) != one {
            return Err(CoreError::invalid("g^q mod p must equal 1"));
        }

        Ok(Arc::new(GroupParams {
            p,
            q,
            g,
            security_level,
        }))
    }

    /// Constructs the small reference group `(p=11, q=5, g=3)` used in the
    /// spec's worked examples and most unit tests.
    pub fn small_test_group() -> Group {
        GroupParams::new(11u32.into(), 5u32.into(), 3u32.into())
            .expect("small reference group parameters are valid")
    }

    /// Constructs the `(p=23, q=11, g=2)` group used in the larger worked
    /// examples (diagonal products, full shuffle).
    pub fn medium_test_group() -> Group {
        GroupParams::new(23u32.into(), 11u32.into(), 2u32.into())
            .expect("medium reference group parameters are valid")
    }
}

static_assertions::assert_impl_all!(GroupParams: Send, Sync);

/// Returns the first `r` primes that lie in `G_q`, starting the search at 5
/// (the smallest prime that can plausibly be a quadratic residue mod a safe
/// prime larger than 11) and testing primality by trial division against the
/// group's certainty level.
///
/// Fails when `r > 10000`, or when `group` cannot hold `r` distinct prime
/// members with at least 4 elements of slack (`q < r + 4`) — a small margin
/// so the search is not expected to exhaust the subgroup.
pub fn small_prime_group_members(group: &Group, r: usize) -> CoreResult<Vec<GqElement>> {
    if r > 10000 {
        return Err(CoreError::invalid("small_prime_group_members: r must not exceed 10000"));
    }
    let slack = BigUint::from(r as u64 + 4);
    if group.q < slack {
        return Err(CoreError::invalid(
            "group is too small to hold r distinct prime members with required slack",
        ));
    }

    let mut members = Vec::with_capacity(r);
    let mut candidate = BigUint::from(5u32);
    let one = BigUint::one();
    while members.len() < r {
        if candidate >= group.p {
            return Err(CoreError::unreachable(
                "small_prime_group_members: exhausted candidates below p",
            ));
        }
        if bigint::is_probably_prime(&candidate, group.security_level.certainty)
            && bigint::mod_exp(&candidate, &group.q, &group.p) == one
        {
            members.push(GqElement::new_unchecked(group.clone(), candidate.clone()));
        }
        candidate += &one;
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_safe_prime() {
        assert!(GroupParams::new(11u32.into(), 4u32.into(), 3u32.into()).is_err());
    }

    #[test]
    fn rejects_generator_out_of_range() {
        assert!(GroupParams::new(11u32.into(), 5u32.into(), 0u32.into()).is_err());
        assert!(GroupParams::new(11u32.into(), 5u32.into(), 11u32.into()).is_err());
        assert!(GroupParams::new(11u32.into(), 5u32.into(), 10u32.into()).is_err()); // p - 1
    }

    #[test]
    fn rejects_generator_not_order_q() {
        // 2 is a QNR mod 11 (order 10), so 2^5 mod 11 != 1.
        assert!(GroupParams::new(11u32.into(), 5u32.into(), 2u32.into()).is_err());
    }

    #[test]
    fn accepts_small_test_group() {
        let g = GroupParams::small_test_group();
        assert_eq!(g.p, BigUint::from(11u32));
        assert_eq!(g.q, BigUint::from(5u32));
    }

    #[test]
    fn small_prime_group_members_finds_first_prime() {
        // medium_test_group: p=23, q=11, G_q = {1,2,3,4,6,8,9,12,13,16,18}.
        // Starting the search at 5, the first candidate that is both prime
        // and a member is 13 (5,7,11 aren't members; 6,8,9,12 aren't prime).
        let grp = GroupParams::medium_test_group();
        let members = small_prime_group_members(&grp, 1).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(*members[0].value(), BigUint::from(13u32));
    }

    #[test]
    fn small_prime_group_members_rejects_insufficient_slack() {
        let grp = GroupParams::small_test_group(); // q=5, can't hold even 1 with 4 slack
        assert!(small_prime_group_members(&grp, 2).is_err());
    }
}
