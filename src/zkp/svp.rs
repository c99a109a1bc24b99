//! Single-Value Product Argument (§4.9): proves a single committed vector's
//! entries multiply out to a public scalar `b`, without revealing the
//! vector.
//!
//! The running-product chain `b_i = a_0 · a_1 · ... · a_i` is blinded
//! entrywise (`b̃ = x·b + δ`) exactly as `a` is (`ã = x·a + d`); a committed
//! cross-term vector `(Δ, Γ)` absorbs the degree-2 remainder of
//! `ã_i · b̃_{i-1}` so the chain can be checked entrywise on the opened
//! responses alone. Forcing `δ_0 = d_0` and `δ_{n-1} = 0` ties the chain's
//! two ends to `ã_0` and to the public `b` respectively.

use crate::commitment::{get_commitment, Commitment, CommitmentKey};
use crate::error::{CoreError, CoreResult};
use crate::group::ZqElement;
use crate::random::{gen_random_exponent, RandomGenerator};
use crate::zkp::{challenge, hashable_commitment, hashable_scalar};

#[derive(Debug, Clone)]
pub struct Statement {
    pub c_a: Commitment,
    pub b: ZqElement,
}

#[derive(Debug, Clone)]
pub struct Witness {
    pub a: Vec<ZqElement>,
    pub r: ZqElement,
}

#[derive(Debug, Clone)]
pub struct Proof {
    pub c_d: Commitment,
    pub c_b: Commitment,
    pub c_delta: Commitment,
    pub c_cross: Commitment,
    pub a_x: Vec<ZqElement>,
    pub b_x: Vec<ZqElement>,
    pub r_x: ZqElement,
    pub s_x: ZqElement,
    pub cross: Vec<ZqElement>, // [Δ_1..Δ_{n-1}, Γ_1..Γ_{n-1}]
    pub r_cross: ZqElement,
}

fn running_products(a: &[ZqElement]) -> CoreResult<Vec<ZqElement>> {
    let mut out = Vec::with_capacity(a.len());
    let mut acc = a[0].clone();
    out.push(acc.clone());
    for a_i in &a[1..] {
        acc = acc.multiply(a_i)?;
        out.push(acc.clone());
    }
    Ok(out)
}

pub fn prove(
    statement: &Statement,
    witness: &Witness,
    ck: &CommitmentKey,
    rng: &mut impl RandomGenerator,
) -> CoreResult<Proof> {
    log::debug!("single-value product argument: proving");
    let n = witness.a.len();
    if n < 2 {
        return Err(CoreError::invalid("single-value product argument requires n >= 2"));
    }
    let group = ck.group().clone();
    let b_vec = running_products(&witness.a)?;
    if b_vec[n - 1] != statement.b {
        return Err(CoreError::invalid("witness product does not equal the claimed b"));
    }

    let d: Vec<ZqElement> = (0..n)
        .map(|_| gen_random_exponent(rng, &group))
        .collect::<CoreResult<_>>()?;
    let r_d = gen_random_exponent(rng, &group)?;
    let c_d = get_commitment(&d, &r_d, ck)?;

    let s_b = gen_random_exponent(rng, &group)?;
    let c_b = get_commitment(&b_vec, &s_b, ck)?;

    let mut delta = vec![d[0].clone()];
    for _ in 1..n - 1 {
        delta.push(gen_random_exponent(rng, &group)?);
    }
    delta.push(ZqElement::zero(group.clone()));
    let r_delta = gen_random_exponent(rng, &group)?;
    let c_delta = get_commitment(&delta, &r_delta, ck)?;

    let mut big_delta = Vec::with_capacity(n - 1);
    let mut gamma = Vec::with_capacity(n - 1);
    for i in 1..n {
        let term1 = witness.a[i].multiply(&delta[i - 1])?;
        let term2 = d[i].multiply(&b_vec[i - 1])?;
        big_delta.push(delta[i].subtract(&term1)?.subtract(&term2)?);
        gamma.push(d[i].multiply(&delta[i - 1])?.negate()?);
    }
    let mut cross = big_delta.clone();
    cross.extend(gamma.clone());
    let r_cross = gen_random_exponent(rng, &group)?;
    let c_cross = get_commitment(&cross, &r_cross, ck)?;

    let mut transcript = vec![hashable_commitment(&statement.c_a), hashable_scalar(&statement.b)];
    transcript.push(hashable_commitment(&c_d));
    transcript.push(hashable_commitment(&c_b));
    transcript.push(hashable_commitment(&c_delta));
    transcript.push(hashable_commitment(&c_cross));
    let x = challenge(&group, transcript)?;

    let a_x: Vec<ZqElement> = witness
        .a
        .iter()
        .zip(d.iter())
        .map(|(a_i, d_i)| a_i.multiply(&x)?.add(d_i))
        .collect::<CoreResult<_>>()?;
    let b_x: Vec<ZqElement> = b_vec
        .iter()
        .zip(delta.iter())
        .map(|(b_i, delta_i)| b_i.multiply(&x)?.add(delta_i))
        .collect::<CoreResult<_>>()?;
    let r_x = witness.r.multiply(&x)?.add(&r_d)?;
    let s_x = s_b.multiply(&x)?.add(&r_delta)?;

    Ok(Proof {
        c_d,
        c_b,
        c_delta,
        c_cross,
        a_x,
        b_x,
        r_x,
        s_x,
        cross,
        r_cross,
    })
}

pub fn verify(statement: &Statement, proof: &Proof, ck: &CommitmentKey) -> CoreResult<bool> {
    log::debug!("single-value product argument: verifying");
    let n = proof.a_x.len();
    if n < 2 || proof.b_x.len() != n || proof.cross.len() != 2 * (n - 1) {
        return Err(CoreError::invalid("malformed single-value product proof"));
    }
    let group = ck.group().clone();

    let mut transcript = vec![hashable_commitment(&statement.c_a), hashable_scalar(&statement.b)];
    transcript.push(hashable_commitment(&proof.c_d));
    transcript.push(hashable_commitment(&proof.c_b));
    transcript.push(hashable_commitment(&proof.c_delta));
    transcript.push(hashable_commitment(&proof.c_cross));
    let x = challenge(&group, transcript)?;

    let lhs1 = get_commitment(&proof.a_x, &proof.r_x, ck)?;
    let rhs1 = statement.c_a.value().pow(&x)?.multiply(proof.c_d.value())?;
    if *lhs1.value() != rhs1 {
        return Err(CoreError::verification_failed(
            "single-value product argument: a(x) opening does not match c_a",
        ));
    }

    let lhs2 = get_commitment(&proof.b_x, &proof.s_x, ck)?;
    let rhs2 = proof.c_b.value().pow(&x)?.multiply(proof.c_delta.value())?;
    if *lhs2.value() != rhs2 {
        return Err(CoreError::verification_failed(
            "single-value product argument: b(x) opening does not match c_b",
        ));
    }

    let lhs3 = get_commitment(&proof.cross, &proof.r_cross, ck)?;
    if *lhs3.value() != *proof.c_cross.value() {
        return Err(CoreError::verification_failed(
            "single-value product argument: cross-term opening does not match c_cross",
        ));
    }

    if proof.b_x[0] != proof.a_x[0] {
        return Err(CoreError::verification_failed(
            "single-value product argument: chain base case failed",
        ));
    }
    if proof.b_x[n - 1] != statement.b.multiply(&x)? {
        return Err(CoreError::verification_failed(
            "single-value product argument: chain does not tie to the claimed product",
        ));
    }

    for i in 1..n {
        let big_delta_i = &proof.cross[i - 1];
        let gamma_i = &proof.cross[(n - 1) + (i - 1)];
        let lhs = proof.b_x[i].multiply(&x)?;
        let rhs = proof.a_x[i]
            .multiply(&proof.b_x[i - 1])?
            .add(&big_delta_i.multiply(&x)?)?
            .add(gamma_i)?;
        if lhs != rhs {
            return Err(CoreError::verification_failed(
                "single-value product argument: chain consistency failed at index",
            ));
        }
    }

    Ok(true)
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
        let g2 = GqElement::new(grp.clone(), BigUint::from(16u32)).unwrap();
        let g3 = GqElement::new(grp, BigUint::from(6u32)).unwrap();
        CommitmentKey::new(h, vec![g1, g2, g3]).unwrap()
    }

    #[test]
    fn honest_proof_verifies() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
            ZqElement::new(grp.clone(), BigUint::from(4u32)),
        ];
        let b = a[0].multiply(&a[1]).unwrap().multiply(&a[2]).unwrap();
        let r = gen_random_exponent(&mut rng, &grp).unwrap();
        let c_a = get_commitment(&a, &r, &ck).unwrap();

        let statement = Statement { c_a, b };
        let witness = Witness { a, r };
        let proof = prove(&statement, &witness, &ck, &mut rng).unwrap();
        assert!(verify(&statement, &proof, &ck).unwrap());
    }

    #[test]
    fn tampered_product_fails() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
        ];
        let real_b = a[0].multiply(&a[1]).unwrap();
        let wrong_b = real_b.add(&ZqElement::new(grp.clone(), BigUint::from(1u32))).unwrap();
        let r = gen_random_exponent(&mut rng, &grp).unwrap();
        let c_a = get_commitment(&a, &r, &ck).unwrap();

        let statement = Statement { c_a, b: wrong_b };
        let witness = Witness { a, r };
        assert!(prove(&statement, &witness, &ck, &mut rng).is_err());
    }

    #[test]
    fn tampered_response_scalar_fails_verification() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();

        let a = vec![
            ZqElement::new(grp.clone(), BigUint::from(2u32)),
            ZqElement::new(grp.clone(), BigUint::from(3u32)),
            ZqElement::new(grp.clone(), BigUint::from(4u32)),
        ];
        let b = a[0].multiply(&a[1]).unwrap().multiply(&a[2]).unwrap();
        let r = gen_random_exponent(&mut rng, &grp).unwrap();
        let c_a = get_commitment(&a, &r, &ck).unwrap();

        let statement = Statement { c_a, b };
        let witness = Witness { a, r };
        let mut proof = prove(&statement, &witness, &ck, &mut rng).unwrap();
        assert!(verify(&statement, &proof, &ck).unwrap());

        // tampering a valid, already-produced proof (rather than the witness before
        // `prove`) must make `verify` reject it.
        proof.r_x = proof.r_x.add(&ZqElement::new(grp, BigUint::from(1u32))).unwrap();
        assert!(verify(&statement, &proof, &ck).is_err());
    }
}
