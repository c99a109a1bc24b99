use super::ciphertext::Ciphertext;
use crate::error::{CoreError, CoreResult};
use crate::group::{GqElement, Group, GroupMember, ZqElement};
use crate::random::{gen_random_integer, RandomGenerator};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// An ElGamal multi-recipient public key `(pk_1, ..., pk_k)`, each
/// `pk_i != 1` and `pk_i != g`.
#[derive(Debug, Clone)]
pub struct PublicKey {
    group: Group,
    elements: Vec<GqElement>,
}

impl PublicKey {
    pub fn new(elements: Vec<GqElement>) -> CoreResult<Self> {
        if elements.is_empty() {
            return Err(CoreError::invalid("public key must have at least one element"));
        }
        let group = elements[0].group().clone();
        let generator_value = group.g.clone();
        for e in &elements {
            if *e.group() != group {
                return Err(CoreError::invalid("public key elements must share one group"));
            }
            if e.value().is_one() || *e.value() == generator_value {
                return Err(CoreError::invalid("public key element must not be 1 or g"));
            }
        }
        Ok(PublicKey { group, elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[GqElement] {
        &self.elements
    }

    /// The effective public key used to encrypt a message of length `l`:
    /// identical when `k == l`, truncated when `k > l`, and an error when
    /// `l > k` (§4.3: "this case is forbidden").
    pub fn effective(&self, l: usize) -> CoreResult<&[GqElement]> {
        if l > self.elements.len() {
            return Err(CoreError::invalid(
                "message length exceeds public key length",
            ));
        }
        Ok(&self.elements[..l])
    }

    /// Elementwise multiply a vector of public keys, all of the same length
    /// and group (§4.3 "Public-key combine").
    pub fn combine(keys: &[PublicKey]) -> CoreResult<PublicKey> {
        if keys.is_empty() {
            return Err(CoreError::invalid("combine requires at least one public key"));
        }
        let group = keys[0].group.clone();
        let len = keys[0].len();
        for k in keys {
            if k.group != group || k.len() != len {
                return Err(CoreError::invalid(
                    "all public keys combined must share group and length",
                ));
            }
        }
        let mut combined = keys[0].elements.clone();
        for k in &keys[1..] {
            for (acc, e) in combined.iter_mut().zip(k.elements.iter()) {
                *acc = acc.multiply(e)?;
            }
        }
        // combine may legitimately produce 1 or g; re-validate via new() only
        // when that must be rejected downstream. Construct directly here
        // since a combined key is used as a recipient key, not re-checked.
        Ok(PublicKey {
            group,
            elements: combined,
        })
    }
}

impl GroupMember for PublicKey {
    fn group(&self) -> &Group {
        &self.group
    }
    fn member_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// An ElGamal multi-recipient private key `(sk_1, ..., sk_k)`, each
/// `sk_i ∉ {0, 1}`.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    group: Group,
    elements: Vec<ZqElement>,
}

impl PrivateKey {
    pub fn new(elements: Vec<ZqElement>) -> CoreResult<Self> {
        if elements.is_empty() {
            return Err(CoreError::invalid("private key must have at least one element"));
        }
        let group = elements[0].group().clone();
        for e in &elements {
            if *e.group() != group {
                return Err(CoreError::invalid("private key elements must share one group"));
            }
            if e.value().is_zero() || e.value().is_one() {
                return Err(CoreError::invalid("private key element must not be 0 or 1"));
            }
        }
        Ok(PrivateKey { group, elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[ZqElement] {
        &self.elements
    }

    pub fn public_key(&self) -> CoreResult<PublicKey> {
        let generator = GqElement::generator(self.group.clone());
        let elements = self
            .elements
            .iter()
            .map(|sk| generator.pow(sk))
            .collect::<CoreResult<Vec<_>>>()?;
        PublicKey::new(elements)
    }

    /// `compress(sk, L)`: keeps the first `L - 1` slots and folds the rest
    /// into the last, `sk'[L-1] = Σ_{j=L-1..k-1} sk[j]`. Fails when `L <= 0`
    /// or `L > k`.
    pub fn compress(&self, new_length: usize) -> CoreResult<PrivateKey> {
        let k = self.elements.len();
        if new_length == 0 || new_length > k {
            return Err(CoreError::invalid(
                "compressed private key length must be in (0, k]",
            ));
        }
        if new_length == k {
            return Ok(self.clone());
        }
        let mut folded = self.elements[..new_length - 1].to_vec();
        let mut tail = self.elements[new_length - 1].clone();
        for sk in &self.elements[new_length..] {
            tail = tail.add(sk)?;
        }
        folded.push(tail);
        PrivateKey::new(folded)
    }
}

impl GroupMember for PrivateKey {
    fn group(&self) -> &Group {
        &self.group
    }
    fn member_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Samples `k` private-key exponents in `[2, q)` (§4.3.1, DECIDED) and
/// derives the matching public key, regenerating any exponent that would
/// produce a degenerate public-key element.
pub fn generate_keypair(
    rng: &mut impl RandomGenerator,
    group: &Group,
    k: usize,
) -> CoreResult<(PublicKey, PrivateKey)> {
    log::debug!("elgamal: generating a length-{k} keypair");
    if k == 0 {
        return Err(CoreError::invalid("keypair length must be >= 1"));
    }
    let two = BigUint::from(2u32);
    let generator = GqElement::generator(group.clone());
    let mut sk_elements = Vec::with_capacity(k);
    let mut pk_elements = Vec::with_capacity(k);
    for _ in 0..k {
        loop {
            let span = &group.q - &two;
            let offset = gen_random_integer(rng, &span)?;
            let sk_value = &offset + &two;
            let sk = ZqElement::new(group.clone(), sk_value);
            let pk = generator.pow(&sk)?;
            if pk.value().is_one() || *pk.value() == group.g {
                continue;
            }
            sk_elements.push(sk);
            pk_elements.push(pk);
            break;
        }
    }
    let sk = PrivateKey::new(sk_elements)?;
    let pk = PublicKey::new(pk_elements)?;
    Ok((pk, sk))
}

/// `getCiphertext`: encrypts `message` (length `l`) under `pk` (length
/// `k >= l`) with randomness `r`.
pub fn encrypt(message: &[GqElement], r: &ZqElement, pk: &PublicKey) -> CoreResult<Ciphertext> {
    log::trace!("elgamal: encrypting a length-{} message", message.len());
    let l = message.len();
    if l == 0 {
        return Err(CoreError::invalid("message must have at least one component"));
    }
    let effective_pk = pk.effective(l)?;
    let group = r.group().clone();
    let generator = GqElement::generator(group);
    let gamma = generator.pow(r)?;
    let phi = message
        .iter()
        .zip(effective_pk.iter())
        .map(|(m, pk_i)| m.multiply(&pk_i.pow(r)?))
        .collect::<CoreResult<Vec<_>>>()?;
    Ciphertext::new(gamma, phi)
}

/// `getMessage`: decrypts `ciphertext` (size `l`) under `sk` (length
/// `k >= l`); `m_i = φ_i * γ^{-sk_i}`.
pub fn decrypt(ciphertext: &Ciphertext, sk: &PrivateKey) -> CoreResult<Vec<GqElement>> {
    log::trace!("elgamal: decrypting a size-{} ciphertext", ciphertext.size());
    let l = ciphertext.size();
    if l > sk.len() {
        return Err(CoreError::invalid(
            "private key is shorter than the ciphertext",
        ));
    }
    let gamma_inv = ciphertext.gamma().invert()?;
    ciphertext
        .phi()
        .iter()
        .zip(sk.elements()[..l].iter())
        .map(|(phi_i, sk_i)| phi_i.multiply(&gamma_inv.pow(sk_i)?))
        .collect()
}

/// `getPartialDecryption`: returns a ciphertext `(γ, γ^{-sk_1} φ_1, ...)` so
/// a further party may continue decrypting with their own share.
pub fn partial_decrypt(ciphertext: &Ciphertext, sk: &PrivateKey) -> CoreResult<Ciphertext> {
    let l = ciphertext.size();
    if l > sk.len() {
        return Err(CoreError::invalid(
            "private key is shorter than the ciphertext",
        ));
    }
    let gamma_inv = ciphertext.gamma().invert()?;
    let phi = ciphertext
        .phi()
        .iter()
        .zip(sk.elements()[..l].iter())
        .map(|(phi_i, sk_i)| phi_i.multiply(&gamma_inv.pow(sk_i)?))
        .collect::<CoreResult<Vec<_>>>()?;
    Ciphertext::new(ciphertext.gamma().clone(), phi)
}
