//! Fisher-Yates permutation generation and the re-encrypting shuffle
//! (§4.4).

use crate::elgamal::{self, Ciphertext, PublicKey};
use crate::error::{CoreError, CoreResult};
use crate::group::{Group, ZqElement};
use crate::random::{gen_random_integer, RandomGenerator};
use num_bigint::BigUint;

/// A bijection `[0, N) -> [0, N)`, stored as an explicit array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    mapping: Vec<usize>,
}

impl Permutation {
    /// Wraps `mapping`, checking it is a bijection on `[0, mapping.len())`.
    pub fn new(mapping: Vec<usize>) -> CoreResult<Self> {
        let n = mapping.len();
        let mut seen = vec![false; n];
        for &v in &mapping {
            if v >= n || seen[v] {
                return Err(CoreError::invalid("mapping is not a permutation of [0, N)"));
            }
            seen[v] = true;
        }
        Ok(Permutation { mapping })
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// `ψ(i)`.
    pub fn apply(&self, i: usize) -> usize {
        self.mapping[i]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.mapping
    }
}

/// `genPermutation(N)`: Fisher-Yates, uniform over `S_N`.
pub fn gen_permutation(rng: &mut impl RandomGenerator, n: usize) -> CoreResult<Permutation> {
    if n == 0 {
        return Err(CoreError::invalid("permutation size must be >= 1"));
    }
    let mut mapping: Vec<usize> = (0..n).collect();
    for i in 0..n {
        let remaining = n - i;
        let j = if remaining > 1 {
            let offset = gen_random_integer(rng, &BigUint::from(remaining as u64))?;
            let offset: u64 = offset
                .try_into()
                .map_err(|_| CoreError::unreachable("permutation offset did not fit u64"))?;
            offset as usize
        } else {
            0
        };
        mapping.swap(i, i + j);
    }
    Permutation::new(mapping)
}

/// Output of [`gen_shuffle`]: the shuffled ciphertexts together with the
/// witness `(ψ, ρ)` used to produce them.
pub struct Shuffle {
    pub ciphertexts: Vec<Ciphertext>,
    pub permutation: Permutation,
    pub randomness: Vec<ZqElement>,
}

/// `Shuffle.genShuffle`: draws `ψ ← genPermutation(N)` and, for each
/// position, fresh re-encryption randomness `ρ_i`; the shuffled ciphertext
/// at position `i` is a neutral encryption of `ρ_i` multiplied into the
/// input ciphertext at `ψ(i)`.
pub fn gen_shuffle(
    rng: &mut impl RandomGenerator,
    ciphertexts: &[Ciphertext],
    pk: &PublicKey,
    group: &Group,
) -> CoreResult<Shuffle> {
    log::debug!("permutation: generating a shuffle");
    let n = ciphertexts.len();
    if n == 0 {
        return Err(CoreError::invalid("shuffle requires at least one ciphertext"));
    }
    let l = ciphertexts[0].size();
    let permutation = gen_permutation(rng, n)?;

    let mut shuffled = Vec::with_capacity(n);
    let mut randomness = Vec::with_capacity(n);
    for i in 0..n {
        let rho_i = crate::random::gen_random_exponent(rng, group)?;
        let neutral_message: Vec<_> = (0..l)
            .map(|_| crate::group::GqElement::one(group.clone()))
            .collect();
        let mask = elgamal::encrypt(&neutral_message, &rho_i, pk)?;
        let source = &ciphertexts[permutation.apply(i)];
        let masked = mask.multiply(source)?;
        shuffled.push(masked);
        randomness.push(rho_i);
    }

    Ok(Shuffle {
        ciphertexts: shuffled,
        permutation,
        randomness,
    })
}
