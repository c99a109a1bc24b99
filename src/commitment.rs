//! Pedersen vector and matrix commitments under a shared key `(h, g_1..g_ν)`
//! (§4.6).

use crate::error::{CoreError, CoreResult};
use crate::group::{GqElement, Group, GroupMatrix, GroupMember, GroupVector, ZqElement};

/// `(h, g_1, ..., g_ν)`, all in `G_q \ {1, g}`. `ν` bounds the dimension of
/// vectors this key can commit to.
#[derive(Debug, Clone)]
pub struct CommitmentKey {
    group: Group,
    h: GqElement,
    generators: Vec<GqElement>,
}

impl CommitmentKey {
    pub fn new(h: GqElement, generators: Vec<GqElement>) -> CoreResult<Self> {
        if generators.is_empty() {
            return Err(CoreError::invalid("commitment key needs at least one generator"));
        }
        let group = h.group().clone();
        let one = num_bigint::BigUint::from(1u32);
        if *h.value() == one || *h.value() == group.g {
            return Err(CoreError::invalid("h must not be 1 or g"));
        }
        for g in &generators {
            if *g.group() != group {
                return Err(CoreError::invalid(
                    "commitment key generators must share one group",
                ));
            }
            if *g.value() == one || *g.value() == group.g {
                return Err(CoreError::invalid("generator must not be 1 or g"));
            }
        }
        Ok(CommitmentKey {
            group,
            h,
            generators,
        })
    }

    pub fn nu(&self) -> usize {
        self.generators.len()
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn h(&self) -> &GqElement {
        &self.h
    }

    pub fn generators(&self) -> &[GqElement] {
        &self.generators
    }
}

/// A single Pedersen commitment `c = h^r · ∏ g_i^{a_i}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment(GqElement);

impl Commitment {
    pub fn value(&self) -> &GqElement {
        &self.0
    }

    /// Wraps an already-computed group element as a commitment, for the
    /// homomorphic recombinations (`c^y * c'`) the shuffle argument performs
    /// on public commitments without knowing their opening.
    pub(crate) fn from_value(value: GqElement) -> Self {
        Commitment(value)
    }
}

impl GroupMember for Commitment {
    fn group(&self) -> &Group {
        self.0.group()
    }
}

/// `getCommitment(a, r, ck)`: `h^r · ∏_{i=1..n} g_i^{a_i}`, `n <= ν`.
pub fn get_commitment(a: &[ZqElement], r: &ZqElement, ck: &CommitmentKey) -> CoreResult<Commitment> {
    let n = a.len();
    if n == 0 {
        return Err(CoreError::invalid("commitment input must be non-empty"));
    }
    if n > ck.nu() {
        return Err(CoreError::invalid(
            "commitment input length exceeds commitment key capacity",
        ));
    }
    if *r.group() != *ck.group() {
        return Err(CoreError::invalid("randomness belongs to a different group than the key"));
    }
    for a_i in a {
        if *a_i.group() != *ck.group() {
            return Err(CoreError::invalid(
                "commitment exponents belong to a different group than the key",
            ));
        }
    }
    let mut acc = ck.h().pow(r)?;
    for (g_i, a_i) in ck.generators().iter().zip(a.iter()) {
        acc = acc.multiply(&g_i.pow(a_i)?)?;
    }
    Ok(Commitment(acc))
}

/// `getCommitmentVector`: one commitment per column of `columns`, using the
/// matching entry of `randomness`. `randomness` is validated as a
/// [`GroupVector`] first, so a randomness value from the wrong group is
/// rejected before any commitment work starts rather than surfacing as a
/// mismatched-group error deep inside [`get_commitment`].
pub fn get_commitment_vector(
    columns: &[Vec<ZqElement>],
    randomness: &[ZqElement],
    ck: &CommitmentKey,
) -> CoreResult<Vec<Commitment>> {
    if columns.len() != randomness.len() {
        return Err(CoreError::invalid(
            "number of columns must match number of randomness values",
        ));
    }
    let randomness = GroupVector::new(randomness.to_vec())?;
    columns
        .iter()
        .zip(randomness.iter())
        .map(|(col, r)| get_commitment(col, r, ck))
        .collect()
}

/// `getCommitmentMatrix`: one commitment per column of `matrix_columns`,
/// named separately per §4.6 to mirror the matrix-of-exponents call site in
/// the zero-knowledge arguments. `matrix_columns` is validated as a
/// [`GroupMatrix`] (every column the same length, every exponent in one
/// group) before any commitment is computed, centralizing the shape check
/// the arguments would otherwise have to perform themselves.
pub fn get_commitment_matrix(
    matrix_columns: &[Vec<ZqElement>],
    randomness: &[ZqElement],
    ck: &CommitmentKey,
) -> CoreResult<Vec<Commitment>> {
    let matrix = GroupMatrix::from_rows(matrix_columns.to_vec())?;
    get_commitment_vector(matrix.rows(), randomness, ck)
}
