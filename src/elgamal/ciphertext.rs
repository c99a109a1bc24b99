use crate::error::{CoreError, CoreResult};
use crate::group::{GqElement, Group, GroupMember, ZqElement};

/// An ElGamal multi-recipient ciphertext `(γ, φ_1, ..., φ_l)`, l >= 1.
///
/// `size()` (the [`GroupMember::member_size`] reported to
/// [`crate::group::GroupVector`]) is `l`, the number of message-masking
/// components — the randomness element `γ` is not counted, matching how
/// the public key's length is compared against it in §4.3.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    gamma: GqElement,
    phi: Vec<GqElement>,
}

static_assertions::assert_impl_all!(Ciphertext: Send, Sync);

impl Ciphertext {
    pub fn new(gamma: GqElement, phi: Vec<GqElement>) -> CoreResult<Self> {
        if phi.is_empty() {
            return Err(CoreError::invalid("ciphertext must have at least one phi component"));
        }
        let group = gamma.group().clone();
        for p in &phi {
            if *p.group() != group {
                return Err(CoreError::invalid(
                    "ciphertext components must share one group",
                ));
            }
        }
        Ok(Ciphertext { gamma, phi })
    }

    pub fn gamma(&self) -> &GqElement {
        &self.gamma
    }

    pub fn phi(&self) -> &[GqElement] {
        &self.phi
    }

    pub fn size(&self) -> usize {
        self.phi.len()
    }

    /// `(1, 1, ..., 1)` of size `l`.
    pub fn neutral(group: Group, l: usize) -> CoreResult<Self> {
        if l == 0 {
            return Err(CoreError::invalid("neutral ciphertext size must be >= 1"));
        }
        let gamma = GqElement::one(group.clone());
        let phi = (0..l).map(|_| GqElement::one(group.clone())).collect();
        Ciphertext::new(gamma, phi)
    }

    fn check_compatible(&self, other: &Self) -> CoreResult<()> {
        if self.gamma.group() != other.gamma.group() {
            return Err(CoreError::invalid("ciphertexts belong to different groups"));
        }
        if self.size() != other.size() {
            return Err(CoreError::invalid("ciphertexts have different sizes"));
        }
        Ok(())
    }

    /// Componentwise multiply.
    pub fn multiply(&self, other: &Self) -> CoreResult<Self> {
        self.check_compatible(other)?;
        let gamma = self.gamma.multiply(&other.gamma)?;
        let phi = self
            .phi
            .iter()
            .zip(other.phi.iter())
            .map(|(a, b)| a.multiply(b))
            .collect::<CoreResult<Vec<_>>>()?;
        Ciphertext::new(gamma, phi)
    }

    /// Exponentiate every component by a shared `Z_q` scalar.
    pub fn pow(&self, exp: &ZqElement) -> CoreResult<Self> {
        let gamma = self.gamma.pow(exp)?;
        let phi = self
            .phi
            .iter()
            .map(|p| p.pow(exp))
            .collect::<CoreResult<Vec<_>>>()?;
        Ciphertext::new(gamma, phi)
    }
}

impl GroupMember for Ciphertext {
    fn group(&self) -> &Group {
        self.gamma.group()
    }

    fn member_size(&self) -> Option<usize> {
        Some(self.size())
    }
}

impl PartialEq for Ciphertext {
    fn eq(&self, other: &Self) -> bool {
        self.gamma == other.gamma && self.phi == other.phi
    }
}
impl Eq for Ciphertext {}

/// `∏ C_i^{a_i}`, for ciphertexts and exponents of equal, matching length.
/// Fails on empty inputs, length mismatch, or group mismatch.
pub fn vector_exponentiation(ciphertexts: &[Ciphertext], exponents: &[ZqElement]) -> CoreResult<Ciphertext> {
    if ciphertexts.is_empty() || exponents.is_empty() {
        return Err(CoreError::invalid("vector exponentiation requires non-empty inputs"));
    }
    if ciphertexts.len() != exponents.len() {
        return Err(CoreError::invalid(
            "ciphertext and exponent vectors must have equal length",
        ));
    }
    let mut acc = ciphertexts[0].pow(&exponents[0])?;
    for (c, a) in ciphertexts.iter().zip(exponents.iter()).skip(1) {
        acc = acc.multiply(&c.pow(a)?)?;
    }
    Ok(acc)
}
