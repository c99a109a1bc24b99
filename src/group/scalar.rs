use super::Group;
use crate::bigint;
use crate::error::{CoreError, CoreResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// An element of `Z_q`, the exponent ring of a [`super::GqElement`]'s group.
///
/// Values are always kept reduced to `[0, q)`.
#[derive(Debug, Clone)]
pub struct ZqElement {
    group: Group,
    value: BigUint,
}

impl ZqElement {
    /// Wraps `value`, reducing it mod `q` first so construction never fails
    /// on range alone.
    pub fn new(group: Group, value: BigUint) -> Self {
        let q = group.q.clone();
        let reduced = value % &q;
        ZqElement {
            group,
            value: reduced,
        }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn zero(group: Group) -> Self {
        ZqElement {
            group,
            value: BigUint::zero(),
        }
    }

    fn check_same_group(&self, other: &Self) -> CoreResult<()> {
        if self.group != other.group {
            return Err(CoreError::invalid(
                "operands belong to different Z_q rings",
            ));
        }
        Ok(())
    }

    /// `(self + other) mod q`.
    pub fn add(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_group(other)?;
        let value = (&self.value + &other.value) % &self.group.q;
        Ok(ZqElement {
            group: self.group.clone(),
            value,
        })
    }

    /// `(self - other) mod q`.
    pub fn subtract(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_group(other)?;
        let q = &self.group.q;
        let value = (q + &self.value - &other.value) % q;
        Ok(ZqElement {
            group: self.group.clone(),
            value,
        })
    }

    /// `(self * other) mod q`.
    pub fn multiply(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_group(other)?;
        let value = bigint::mod_multiply(&self.value, &other.value, &self.group.q);
        Ok(ZqElement {
            group: self.group.clone(),
            value,
        })
    }

    /// Additive inverse mod `q`.
    pub fn negate(&self) -> Self {
        let q = &self.group.q;
        let value = if self.value.is_zero() {
            BigUint::zero()
        } else {
            q - &self.value
        };
        ZqElement {
            group: self.group.clone(),
            value,
        }
    }

    /// Multiplicative inverse mod `q`. Fails only for the zero element.
    pub fn invert(&self) -> CoreResult<Self> {
        let inv = bigint::mod_inverse(&self.value, &self.group.q)
            .ok_or_else(|| CoreError::invalid("zero has no multiplicative inverse mod q"))?;
        Ok(ZqElement {
            group: self.group.clone(),
            value: inv,
        })
    }
}

static_assertions::assert_impl_all!(ZqElement: Send, Sync);

impl PartialEq for ZqElement {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.value == other.value
    }
}
impl Eq for ZqElement {}
