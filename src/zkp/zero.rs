//! Zero Argument (§4.7): proves `Σ_j bilinear_y(A_{*,j}, B_{*,j}) = 0` for
//! two committed `n x m` matrices, without revealing either.

use crate::commitment::{get_commitment, Commitment, CommitmentKey};
use crate::error::{CoreError, CoreResult};
use crate::group::ZqElement;
use crate::random::{gen_random_exponent, RandomGenerator};
use crate::zkp::{bilinear_y, challenge, hashable_commitment, hashable_scalar};

#[derive(Debug, Clone)]
pub struct Statement {
    pub c_a: Vec<Commitment>,
    pub c_b: Vec<Commitment>,
    pub y: ZqElement,
}

#[derive(Debug, Clone)]
pub struct Witness {
    pub a: Vec<Vec<ZqElement>>,
    pub b: Vec<Vec<ZqElement>>,
    pub r: Vec<ZqElement>,
    pub s: Vec<ZqElement>,
}

#[derive(Debug, Clone)]
pub struct Proof {
    pub c_a0: Commitment,
    pub c_bm: Commitment,
    pub c_d: Vec<Commitment>, // length 2m+1, index k = 0..=2m
    pub a_x: Vec<ZqElement>,
    pub b_x: Vec<ZqElement>,
    pub r_x: ZqElement,
    pub s_x: ZqElement,
    pub t_x: ZqElement,
}

fn zero_vec(group: &crate::group::Group, n: usize) -> Vec<ZqElement> {
    (0..n).map(|_| ZqElement::zero(group.clone())).collect()
}

fn add_vec(a: &[ZqElement], b: &[ZqElement]) -> CoreResult<Vec<ZqElement>> {
    a.iter().zip(b.iter()).map(|(x, y)| x.add(y)).collect()
}

fn scale_vec(a: &[ZqElement], scalar: &ZqElement) -> CoreResult<Vec<ZqElement>> {
    a.iter().map(|x| x.multiply(scalar)).collect()
}

pub fn prove(
    statement: &Statement,
    witness: &Witness,
    ck: &CommitmentKey,
    rng: &mut impl RandomGenerator,
) -> CoreResult<Proof> {
    log::debug!("zero argument: proving");
    let m = witness.a.len();
    if m == 0 || witness.b.len() != m || statement.c_a.len() != m || statement.c_b.len() != m {
        return Err(CoreError::invalid("zero argument requires m >= 1 matching columns"));
    }
    let n = witness.a[0].len();
    let group = ck.group().clone();
    log::trace!("zero argument: m={m} n={n}");

    let a0: Vec<ZqElement> = (0..n)
        .map(|_| gen_random_exponent(rng, &group))
        .collect::<CoreResult<_>>()?;
    let bm: Vec<ZqElement> = (0..n)
        .map(|_| gen_random_exponent(rng, &group))
        .collect::<CoreResult<_>>()?;
    let r0 = gen_random_exponent(rng, &group)?;
    let sm = gen_random_exponent(rng, &group)?;

    // degree-indexed extensions, per the module doc derivation.
    let mut a_ext = vec![a0.clone()];
    a_ext.extend(witness.a.iter().cloned());
    let mut b_ext: Vec<Vec<ZqElement>> = witness.b.iter().rev().cloned().collect();
    b_ext.push(bm.clone());

    let c_a0 = get_commitment(&a0, &r0, ck)?;
    let c_bm = get_commitment(&bm, &sm, ck)?;

    let two_m = 2 * m;
    let mut t: Vec<ZqElement> = (0..=two_m)
        .map(|_| gen_random_exponent(rng, &group))
        .collect::<CoreResult<_>>()?;
    t[m] = ZqElement::zero(group.clone());

    let mut d = vec![ZqElement::zero(group.clone()); two_m + 1];
    for i in 0..=m {
        for j in 0..=m {
            let term = bilinear_y(&a_ext[i], &b_ext[j], &statement.y)?;
            d[i + j] = d[i + j].add(&term)?;
        }
    }
    let c_d: Vec<Commitment> = d
        .iter()
        .zip(t.iter())
        .map(|(d_k, t_k)| get_commitment(std::slice::from_ref(d_k), t_k, ck))
        .collect::<CoreResult<_>>()?;

    let mut transcript = vec![hashable_scalar(&statement.y)];
    transcript.extend(statement.c_a.iter().map(hashable_commitment));
    transcript.extend(statement.c_b.iter().map(hashable_commitment));
    transcript.push(hashable_commitment(&c_a0));
    transcript.push(hashable_commitment(&c_bm));
    transcript.extend(c_d.iter().map(hashable_commitment));
    let x = challenge(&group, transcript)?;

    let x_powers = crate::zkp::powers(&x, two_m + 1)?;
    let mut a_x = zero_vec(&group, n);
    for (i, a_i) in a_ext.iter().enumerate() {
        a_x = add_vec(&a_x, &scale_vec(a_i, &x_powers[i])?)?;
    }
    let mut b_x = zero_vec(&group, n);
    for (j, b_j) in b_ext.iter().enumerate() {
        b_x = add_vec(&b_x, &scale_vec(b_j, &x_powers[j])?)?;
    }

    let mut r_ext = vec![r0];
    r_ext.extend(witness.r.iter().cloned());
    let mut s_ext: Vec<ZqElement> = witness.s.iter().rev().cloned().collect();
    s_ext.push(sm);

    let mut r_x = ZqElement::zero(group.clone());
    for (i, r_i) in r_ext.iter().enumerate() {
        r_x = r_x.add(&r_i.multiply(&x_powers[i])?)?;
    }
    let mut s_x = ZqElement::zero(group.clone());
    for (j, s_j) in s_ext.iter().enumerate() {
        s_x = s_x.add(&s_j.multiply(&x_powers[j])?)?;
    }
    let mut t_x = ZqElement::zero(group.clone());
    for (k, t_k) in t.iter().enumerate() {
        t_x = t_x.add(&t_k.multiply(&x_powers[k])?)?;
    }

    Ok(Proof {
        c_a0,
        c_bm,
        c_d,
        a_x,
        b_x,
        r_x,
        s_x,
        t_x,
    })
}

pub fn verify(statement: &Statement, proof: &Proof, ck: &CommitmentKey) -> CoreResult<bool> {
    log::debug!("zero argument: verifying");
    let m = statement.c_a.len();
    if m == 0 || statement.c_b.len() != m || proof.c_d.len() != 2 * m + 1 {
        return Err(CoreError::invalid("malformed zero argument statement/proof"));
    }
    let group = ck.group().clone();

    let mut transcript = vec![hashable_scalar(&statement.y)];
    transcript.extend(statement.c_a.iter().map(hashable_commitment));
    transcript.extend(statement.c_b.iter().map(hashable_commitment));
    transcript.push(hashable_commitment(&proof.c_a0));
    transcript.push(hashable_commitment(&proof.c_bm));
    transcript.extend(proof.c_d.iter().map(hashable_commitment));
    let x = challenge(&group, transcript)?;
    let x_powers = crate::zkp::powers(&x, 2 * m + 1)?;

    let lhs1 = get_commitment(&proof.a_x, &proof.r_x, ck)?;
    let mut rhs1 = proof.c_a0.value().clone();
    for i in 1..=m {
        rhs1 = rhs1.multiply(&statement.c_a[i - 1].value().pow(&x_powers[i])?)?;
    }
    if *lhs1.value() != rhs1 {
        return Err(CoreError::verification_failed(
            "zero argument: A(x) opening does not match c_A",
        ));
    }

    let lhs2 = get_commitment(&proof.b_x, &proof.s_x, ck)?;
    let mut rhs2 = crate::group::GqElement::one(group.clone());
    for d in 0..m {
        let col = m - 1 - d;
        rhs2 = rhs2.multiply(&statement.c_b[col].value().pow(&x_powers[d])?)?;
    }
    rhs2 = rhs2.multiply(&proof.c_bm.value().pow(&x_powers[m])?)?;
    if *lhs2.value() != rhs2 {
        return Err(CoreError::verification_failed(
            "zero argument: B(x) opening does not match c_B",
        ));
    }

    let combined = bilinear_y(&proof.a_x, &proof.b_x, &statement.y)?;
    let lhs3 = get_commitment(std::slice::from_ref(&combined), &proof.t_x, ck)?;
    let mut rhs3 = crate::group::GqElement::one(group);
    for (k, c_dk) in proof.c_d.iter().enumerate() {
        rhs3 = rhs3.multiply(&c_dk.value().pow(&x_powers[k])?)?;
    }
    if *lhs3.value() != rhs3 {
        return Err(CoreError::verification_failed(
            "zero argument: bilinear response does not match diagonal commitments",
        ));
    }

    Ok(true)
}
