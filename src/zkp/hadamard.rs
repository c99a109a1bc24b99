//! Hadamard Argument (§4.8): proves a committed vector `b` is the
//! entrywise product across the columns of a committed matrix `A`.
//!
//! Reduces to the [`zero`] argument. The prover commits to the running
//! product chain `B_0 = A_0`, `B_j = B_{j-1} ⊙ A_j`, then draws a
//! Fiat-Shamir challenge `x` that batches the `m - 1` column equations
//! `B_j = A_j ⊙ B_{j-1}` into one, and a second challenge `y` so the
//! batched equation can itself be fed to the Zero Argument as an
//! `m`-column `Σ_k bilinear_y(A'_k, B'_k) = 0` statement:
//!
//! - for `k = 0 .. m-2`: `A'_k = x^k A_{k+1}`, `B'_k = B_k`
//! - the extra column `m - 1`: `A'_{m-1} = -Σ_k x^k B_{k+1}`, paired
//!   against the public all-ones vector `B'_{m-1} = 1⃗`
//!
//! Expanding `Σ_k bilinear_y(A'_k, B'_k)` shows it equals, entrywise,
//! `Σ_i y^i Σ_{j=1}^{m-1} x^{j-1} (A_j[i] B_{j-1}[i] - B_j[i])`, which by
//! Schwartz-Zippel in the two independent variables `x, y` is zero with
//! overwhelming probability only if every `B_j = B_{j-1} ⊙ A_j` holds.
//! The derived commitment vectors the Zero Argument statement needs are
//! public homomorphic recombinations of `c_A` and the running-product
//! commitments, exactly as [`crate::zkp::shuffle`]'s `shift_commitment`
//! recombines `c_A` without an opening.

use crate::commitment::{get_commitment, Commitment, CommitmentKey};
use crate::error::{CoreError, CoreResult};
use crate::group::{GqElement, Group, ZqElement};
use crate::random::{gen_random_exponent, RandomGenerator};
use crate::zkp::{challenge, hashable_commitment, hashable_scalar, powers, zero};
use num_bigint::BigUint;

#[derive(Debug, Clone)]
pub struct Statement {
    pub c_a: Vec<Commitment>,
    pub c_b: Commitment,
}

#[derive(Debug, Clone)]
pub struct Witness {
    pub a: Vec<Vec<ZqElement>>,
    pub r: Vec<ZqElement>,
    pub b: Vec<ZqElement>,
    pub s_b: ZqElement,
}

#[derive(Debug, Clone)]
pub enum Proof {
    /// `m == 1`: the Hadamard relation is vacuous; §4.8 requires this to be
    /// an empty check rather than a degenerate zero-length argument.
    Trivial,
    Full {
        c_b_inter: Vec<Commitment>,
        zero_proof: zero::Proof,
    },
}

fn ones_vec(group: &Group, n: usize) -> Vec<ZqElement> {
    vec![ZqElement::new(group.clone(), BigUint::from(1u32)); n]
}

fn ones_commitment(group: &Group, n: usize, ck: &CommitmentKey) -> CoreResult<Commitment> {
    get_commitment(&ones_vec(group, n), &ZqElement::zero(group.clone()), ck)
}

/// `B_0 = A_0`, `B_j = B_{j-1} ⊙ A_j` for `j = 1 .. m-1`.
fn running_product_chain(a: &[Vec<ZqElement>]) -> CoreResult<Vec<Vec<ZqElement>>> {
    let mut chain: Vec<Vec<ZqElement>> = vec![a[0].clone()];
    for a_j in &a[1..] {
        let prev = chain.last().unwrap();
        let next: Vec<ZqElement> = prev
            .iter()
            .zip(a_j.iter())
            .map(|(p, v)| p.multiply(v))
            .collect::<CoreResult<_>>()?;
        chain.push(next);
    }
    Ok(chain)
}

fn derive_challenges(
    group: &Group,
    statement: &Statement,
    c_b_inter: &[Commitment],
) -> CoreResult<(ZqElement, ZqElement)> {
    let mut transcript = statement.c_a.iter().map(hashable_commitment).collect::<Vec<_>>();
    transcript.push(hashable_commitment(&statement.c_b));
    transcript.extend(c_b_inter.iter().map(hashable_commitment));
    let x = challenge(group, transcript.clone())?;
    transcript.push(hashable_scalar(&x));
    let y = challenge(group, transcript)?;
    Ok((x, y))
}

pub fn prove(
    statement: &Statement,
    witness: &Witness,
    ck: &CommitmentKey,
    rng: &mut impl RandomGenerator,
) -> CoreResult<Proof> {
    log::debug!("hadamard argument: proving");
    let m = witness.a.len();
    if m == 0 || witness.r.len() != m || statement.c_a.len() != m {
        return Err(CoreError::invalid("hadamard argument requires m >= 1 matching columns"));
    }
    if m == 1 {
        log::trace!("hadamard argument: m == 1, trivially satisfied");
        return Ok(Proof::Trivial);
    }

    let group = ck.group().clone();
    let n = witness.a[0].len();

    let b_cols = running_product_chain(&witness.a)?;
    if b_cols.last().unwrap() != &witness.b {
        return Err(CoreError::invalid(
            "witness's entrywise column product does not equal the claimed b",
        ));
    }

    // fresh commitments to the interior columns B_1 .. B_{m-2}.
    let mut s_inter = Vec::with_capacity(m.saturating_sub(2));
    let mut c_b_inter = Vec::with_capacity(m.saturating_sub(2));
    for col in &b_cols[1..m - 1] {
        let s_j = gen_random_exponent(rng, &group)?;
        c_b_inter.push(get_commitment(col, &s_j, ck)?);
        s_inter.push(s_j);
    }

    let (x, y) = derive_challenges(&group, statement, &c_b_inter)?;
    let x_powers = powers(&x, m - 1)?;

    let mut s_chain = vec![witness.r[0].clone()];
    s_chain.extend(s_inter);
    s_chain.push(witness.s_b.clone());

    // the m-1 "real" columns: A'_k = x^k A_{k+1}, B'_k = B_k, k = 0 .. m-2.
    let mut zero_a: Vec<Vec<ZqElement>> = Vec::with_capacity(m);
    let mut zero_r: Vec<ZqElement> = Vec::with_capacity(m);
    let mut zero_b: Vec<Vec<ZqElement>> = Vec::with_capacity(m);
    let mut zero_s: Vec<ZqElement> = Vec::with_capacity(m);
    for k in 0..m - 1 {
        let scaled: Vec<ZqElement> = witness.a[k + 1].iter().map(|v| v.multiply(&x_powers[k])).collect::<CoreResult<_>>()?;
        zero_a.push(scaled);
        zero_r.push(witness.r[k + 1].multiply(&x_powers[k])?);
        zero_b.push(b_cols[k].clone());
        zero_s.push(s_chain[k].clone());
    }

    // the extra telescoping column: A'_{m-1} = -Σ_k x^k B_{k+1}, B'_{m-1} = 1⃗.
    let mut combined = vec![ZqElement::zero(group.clone()); n];
    let mut combined_r = ZqElement::zero(group.clone());
    for k in 0..m - 1 {
        let scaled: Vec<ZqElement> = b_cols[k + 1].iter().map(|v| v.multiply(&x_powers[k])).collect::<CoreResult<_>>()?;
        for (acc, v) in combined.iter_mut().zip(scaled.iter()) {
            *acc = acc.add(v)?;
        }
        combined_r = combined_r.add(&s_chain[k + 1].multiply(&x_powers[k])?)?;
    }
    zero_a.push(combined.iter().map(|v| v.negate()).collect());
    zero_r.push(combined_r.negate());
    zero_b.push(ones_vec(&group, n));
    zero_s.push(ZqElement::zero(group.clone()));

    let zero_c_a = get_zero_c_a(statement, &c_b_inter, &x_powers, &group)?;
    let zero_c_b = get_zero_c_b(statement, &c_b_inter, n, &group, ck)?;

    let zero_statement = zero::Statement { c_a: zero_c_a, c_b: zero_c_b, y };
    let zero_witness = zero::Witness { a: zero_a, b: zero_b, r: zero_r, s: zero_s };
    let zero_proof = zero::prove(&zero_statement, &zero_witness, ck, rng)?;

    Ok(Proof::Full { c_b_inter, zero_proof })
}

/// Public side of `B_0 .. B_{m-1}`'s commitments: `[c_A[0]] ++ c_b_inter ++ [c_B]`.
fn commits_b(statement: &Statement, c_b_inter: &[Commitment]) -> Vec<Commitment> {
    let mut commits = vec![statement.c_a[0].clone()];
    commits.extend(c_b_inter.iter().cloned());
    commits.push(statement.c_b.clone());
    commits
}

/// Derives the Zero Argument's `c_A` vector without any witness opening:
/// `c_A'_k = c_A[k+1]^{x^k}` for the real columns, and the telescoped
/// inverse product for the extra column.
fn get_zero_c_a(
    statement: &Statement,
    c_b_inter: &[Commitment],
    x_powers: &[ZqElement],
    group: &Group,
) -> CoreResult<Vec<Commitment>> {
    let m = statement.c_a.len();
    let commits = commits_b(statement, c_b_inter);
    let mut zero_c_a = Vec::with_capacity(m);
    for k in 0..m - 1 {
        let value = statement.c_a[k + 1].value().pow(&x_powers[k])?;
        zero_c_a.push(Commitment::from_value(value));
    }
    let mut product = GqElement::one(group.clone());
    for k in 0..m - 1 {
        product = product.multiply(&commits[k + 1].value().pow(&x_powers[k])?)?;
    }
    zero_c_a.push(Commitment::from_value(product.invert()?));
    Ok(zero_c_a)
}

/// Derives the Zero Argument's `c_B` vector: the running-product
/// commitments `B_0 .. B_{m-2}` plus the deterministic all-ones commitment.
fn get_zero_c_b(
    statement: &Statement,
    c_b_inter: &[Commitment],
    n: usize,
    group: &Group,
    ck: &CommitmentKey,
) -> CoreResult<Vec<Commitment>> {
    let commits = commits_b(statement, c_b_inter);
    let m = commits.len();
    let mut zero_c_b = commits[..m - 1].to_vec();
    zero_c_b.push(ones_commitment(group, n, ck)?);
    Ok(zero_c_b)
}

pub fn verify(statement: &Statement, proof: &Proof, ck: &CommitmentKey) -> CoreResult<bool> {
    log::debug!("hadamard argument: verifying");
    let m = statement.c_a.len();
    if m == 0 {
        return Err(CoreError::invalid("hadamard statement requires m >= 1"));
    }
    match proof {
        Proof::Trivial => {
            if m != 1 {
                return Err(CoreError::verification_failed(
                    "hadamard argument: trivial proof supplied for m > 1 statement",
                ));
            }
            if statement.c_a[0] != statement.c_b {
                return Err(CoreError::verification_failed(
                    "hadamard argument: single column does not match claimed product",
                ));
            }
            Ok(true)
        }
        Proof::Full { c_b_inter, zero_proof } => {
            if m == 1 {
                return Err(CoreError::verification_failed(
                    "hadamard argument: full proof supplied for m == 1 statement",
                ));
            }
            if c_b_inter.len() != m - 2 {
                return Err(CoreError::invalid("malformed hadamard proof: wrong interior commitment count"));
            }
            let group = ck.group().clone();
            let n = ck.nu();

            let (x, y) = derive_challenges(&group, statement, c_b_inter)?;
            let x_powers = powers(&x, m - 1)?;

            let zero_c_a = get_zero_c_a(statement, c_b_inter, &x_powers, &group)?;
            let zero_c_b = get_zero_c_b(statement, c_b_inter, n, &group, ck)?;
            let zero_statement = zero::Statement { c_a: zero_c_a, c_b: zero_c_b, y };

            zero::verify(&zero_statement, zero_proof, ck)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{GqElement, GroupParams};
    use crate::random::OsRngGenerator;
    use num_bigint::BigUint;

    fn test_ck() -> CommitmentKey {
        let grp = GroupParams::medium_test_group();
        let h = GqElement::new(grp.clone(), BigUint::from(4u32)).unwrap();
        let g1 = GqElement::new(grp.clone(), BigUint::from(8u32)).unwrap();
        let g2 = GqElement::new(grp, BigUint::from(16u32)).unwrap();
        CommitmentKey::new(h, vec![g1, g2]).unwrap()
    }

    #[test]
    fn m_equals_one_is_trivial() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();
        let col = vec![
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
            ZqElement::new(grp.clone(), BigUint::from(1u32)),
        ];
        let r = gen_random_exponent(&mut rng, &grp).unwrap();
        let c_a0 = get_commitment(&col, &r, &ck).unwrap();
        let statement = Statement {
            c_a: vec![c_a0.clone()],
            c_b: c_a0,
        };
        let witness = Witness {
            a: vec![col.clone()],
            r: vec![r],
            b: col,
            s_b: ZqElement::zero(grp),
        };
        let proof = prove(&statement, &witness, &ck, &mut rng).unwrap();
        assert!(matches!(proof, Proof::Trivial));
        assert!(verify(&statement, &proof, &ck).unwrap());
    }

    #[test]
    fn two_columns_verify() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a0 = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
        ];
        let a1 = vec![
            ZqElement::new(grp.clone(), BigUint::from(4u32)),
            ZqElement::new(grp.clone(), BigUint::from(1u32)),
        ];
        let b = vec![
            a0[0].multiply(&a1[0]).unwrap(),
            a0[1].multiply(&a1[1]).unwrap(),
        ];
        let r0 = gen_random_exponent(&mut rng, &grp).unwrap();
        let r1 = gen_random_exponent(&mut rng, &grp).unwrap();
        let s_b = gen_random_exponent(&mut rng, &grp).unwrap();

        let c_a0 = get_commitment(&a0, &r0, &ck).unwrap();
        let c_a1 = get_commitment(&a1, &r1, &ck).unwrap();
        let c_b = get_commitment(&b, &s_b, &ck).unwrap();

        let statement = Statement {
            c_a: vec![c_a0, c_a1],
            c_b,
        };
        let witness = Witness {
            a: vec![a0, a1],
            r: vec![r0, r1],
            b,
            s_b,
        };
        let proof = prove(&statement, &witness, &ck, &mut rng).unwrap();
        assert!(matches!(proof, Proof::Full { .. }));
        assert!(verify(&statement, &proof, &ck).unwrap());
    }

    #[test]
    fn three_columns_verify() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a0 = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
        ];
        let a1 = vec![
            ZqElement::new(grp.clone(), BigUint::from(4u32)),
            ZqElement::new(grp.clone(), BigUint::from(1u32)),
        ];
        let a2 = vec![
            ZqElement::new(grp.clone(), BigUint::from(5u32)),
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
        ];
        let b = vec![
            a0[0].multiply(&a1[0]).unwrap().multiply(&a2[0]).unwrap(),
            a0[1].multiply(&a1[1]).unwrap().multiply(&a2[1]).unwrap(),
        ];
        let r0 = gen_random_exponent(&mut rng, &grp).unwrap();
        let r1 = gen_random_exponent(&mut rng, &grp).unwrap();
        let r2 = gen_random_exponent(&mut rng, &grp).unwrap();
        let s_b = gen_random_exponent(&mut rng, &grp).unwrap();

        let c_a0 = get_commitment(&a0, &r0, &ck).unwrap();
        let c_a1 = get_commitment(&a1, &r1, &ck).unwrap();
        let c_a2 = get_commitment(&a2, &r2, &ck).unwrap();
        let c_b = get_commitment(&b, &s_b, &ck).unwrap();

        let statement = Statement {
            c_a: vec![c_a0, c_a1, c_a2],
            c_b,
        };
        let witness = Witness {
            a: vec![a0, a1, a2],
            r: vec![r0, r1, r2],
            b,
            s_b,
        };
        let proof = prove(&statement, &witness, &ck, &mut rng).unwrap();
        match &proof {
            Proof::Full { c_b_inter, .. } => assert_eq!(c_b_inter.len(), 1),
            Proof::Trivial => panic!("expected a full proof for m == 3"),
        }
        assert!(verify(&statement, &proof, &ck).unwrap());
    }

    #[test]
    fn tampered_claimed_product_fails_witness_check() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a0 = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
        ];
        let a1 = vec![
            ZqElement::new(grp.clone(), BigUint::from(4u32)),
            ZqElement::new(grp.clone(), BigUint::from(1u32)),
        ];
        let wrong_b = vec![
            ZqElement::new(grp.clone(), BigUint::from(9u32)),
            ZqElement::new(grp.clone(), BigUint::from(9u32)),
        ];
        let r0 = gen_random_exponent(&mut rng, &grp).unwrap();
        let r1 = gen_random_exponent(&mut rng, &grp).unwrap();
        let s_b = gen_random_exponent(&mut rng, &grp).unwrap();

        let c_a0 = get_commitment(&a0, &r0, &ck).unwrap();
        let c_a1 = get_commitment(&a1, &r1, &ck).unwrap();
        let c_b = get_commitment(&wrong_b, &s_b, &ck).unwrap();

        let statement = Statement {
            c_a: vec![c_a0, c_a1],
            c_b,
        };
        let witness = Witness {
            a: vec![a0, a1],
            r: vec![r0, r1],
            b: wrong_b,
            s_b,
        };
        assert!(prove(&statement, &witness, &ck, &mut rng).is_err());
    }
}
