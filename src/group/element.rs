use super::{Group, ZqElement};
use crate::bigint;
use crate::error::{CoreError, CoreResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// An element of `G_q`, the order-`q` subgroup of `(Z/pZ)*`.
///
/// Carries the [`Group`] it belongs to so that mixing elements from two
/// different groups is a `CoreError::InvalidArgument` rather than silently
/// wrong arithmetic.
#[derive(Debug, Clone)]
pub struct GqElement {
    group: Group,
    value: BigUint,
}

impl GqElement {
    /// Wraps `value` as a member of `group`, checking `1 <= value < p` and
    /// `value^q mod p == 1`.
    pub fn new(group: Group, value: BigUint) -> CoreResult<Self> {
        if value.is_zero() || value >= group.p {
            return Err(CoreError::invalid("element value out of range [1, p)"));
        }
        if bigint::mod_exp(&value, &group.q, &group.p) != BigUint::one() {
            return Err(CoreError::invalid("value is not a member of G_q"));
        }
        Ok(GqElement { group, value })
    }

    /// Wraps `value` without membership checking. Used internally once a
    /// computation is already known to stay within the subgroup (e.g. the
    /// product of two members, or a modexp by the generator).
    pub(crate) fn new_unchecked(group: Group, value: BigUint) -> Self {
        debug_assert!(
            bigint::mod_exp(&value, &group.q, &group.p) == BigUint::one(),
            "new_unchecked invariant violated: value is not in G_q"
        );
        GqElement { group, value }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The group's identity element, `1`.
    pub fn one(group: Group) -> Self {
        let value = BigUint::one();
        GqElement { group, value }
    }

    /// The group's generator, `g`.
    pub fn generator(group: Group) -> Self {
        let value = group.g.clone();
        GqElement { group, value }
    }

    fn check_same_group(&self, other: &Self) -> CoreResult<()> {
        if self.group != other.group {
            return Err(CoreError::invalid(
                "operands belong to different G_q groups",
            ));
        }
        Ok(())
    }

    /// `self * other mod p`.
    pub fn multiply(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_group(other)?;
        let value = bigint::mod_multiply(&self.value, &other.value, &self.group.p);
        Ok(GqElement::new_unchecked(self.group.clone(), value))
    }

    /// `self^exp mod p`, for `exp` a [`ZqElement`] of the same group.
    pub fn pow(&self, exp: &ZqElement) -> CoreResult<Self> {
        if self.group != *exp.group() {
            return Err(CoreError::invalid(
                "exponent belongs to a different group than the base",
            ));
        }
        let value = bigint::mod_exp(&self.value, exp.value(), &self.group.p);
        Ok(GqElement::new_unchecked(self.group.clone(), value))
    }

    /// `self^exp mod p` for a raw, non-negative big integer exponent
    /// (reduced mod `q` first, since `G_q` has order `q`).
    pub fn pow_raw(&self, exp: &BigUint) -> Self {
        let reduced = exp % &self.group.q;
        let value = bigint::mod_exp(&self.value, &reduced, &self.group.p);
        GqElement::new_unchecked(self.group.clone(), value)
    }

    /// Embeds an arbitrary `0 < x < q` into `G_q` as `x^2 mod p`, which is
    /// always a quadratic residue and hence a member of the order-`q`
    /// subgroup. Useful for mapping plaintext integers into the group
    /// without a membership-testing retry loop.
    pub fn from_square_root(x: &BigUint, group: Group) -> CoreResult<Self> {
        if x.is_zero() || x >= &group.q {
            return Err(CoreError::invalid("from_square_root requires 0 < x < q"));
        }
        let value = bigint::mod_exp(x, &BigUint::from(2u32), &group.p);
        Ok(GqElement::new_unchecked(group, value))
    }

    /// Multiplicative inverse of `self` in `G_q`.
    ///
    /// Computed via the extended Euclidean algorithm against the full
    /// modulus `p`, which is always correct for a nonzero member of a
    /// prime-modulus group. (The shortcut `p - value`, which holds for
    /// quadratic-residue groups represented additively, does not hold here:
    /// in the worked group `p=11, q=5, g=3` the inverse of `3` is `4`, not
    /// `p - 3 = 8`, and `8` is not even a member of `G_q`.)
    pub fn invert(&self) -> CoreResult<Self> {
        let inv = bigint::mod_inverse(&self.value, &self.group.p)
            .ok_or_else(|| CoreError::unreachable("G_q element has no inverse mod p"))?;
        Ok(GqElement::new_unchecked(self.group.clone(), inv))
    }
}

static_assertions::assert_impl_all!(GqElement: Send, Sync);

impl PartialEq for GqElement {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.value == other.value
    }
}
impl Eq for GqElement {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupParams;

    #[test]
    fn rejects_non_member() {
        let g = GroupParams::small_test_group();
        // 2 is a QNR mod 11, not a member of G_q = {1,3,4,5,9}
        assert!(GqElement::new(g, BigUint::from(2u32)).is_err());
    }

    #[test]
    fn multiply_and_invert_roundtrip() {
        let grp = GroupParams::small_test_group();
        let a = GqElement::new(grp.clone(), BigUint::from(3u32)).unwrap();
        let inv = a.invert().unwrap();
        // worked example: 3^-1 mod 11 = 4
        assert_eq!(*inv.value(), BigUint::from(4u32));
        let product = a.multiply(&inv).unwrap();
        assert_eq!(*product.value(), BigUint::one());
    }

    #[test]
    fn from_square_root_embeds_into_subgroup() {
        let grp = GroupParams::small_test_group(); // p=11, q=5
        let embedded = GqElement::from_square_root(&BigUint::from(3u32), grp).unwrap();
        // 3^2 mod 11 = 9, a member of G_q = {1,3,4,5,9}.
        assert_eq!(*embedded.value(), BigUint::from(9u32));
    }

    #[test]
    fn from_square_root_rejects_out_of_range() {
        let grp = GroupParams::small_test_group(); // q=5
        assert!(GqElement::from_square_root(&BigUint::from(0u32), grp.clone()).is_err());
        assert!(GqElement::from_square_root(&BigUint::from(5u32), grp).is_err());
    }

    #[test]
    fn rejects_cross_group_multiply() {
        let small = GroupParams::small_test_group();
        let medium = GroupParams::medium_test_group();
        let a = GqElement::new(small, BigUint::from(3u32)).unwrap();
        let b = GqElement::new(medium, BigUint::from(4u32)).unwrap();
        assert!(a.multiply(&b).is_err());
    }
}
