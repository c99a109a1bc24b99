//! Shuffle Argument (§4.12): proves `shuffled` is a re-encrypting permutation
//! of `ciphertexts` under some hidden `(ψ, ρ)`, without revealing either.
//!
//! Commits the permutation as exponents `a_i = ψ(i)+1`, then (after a
//! Fiat-Shamir challenge `x`) commits `b_i = x^{a_i}`. A [`product`] argument
//! over a random affine shift `y·a_i + z` of the committed permutation
//! exponents shows `{a_i}` is a permutation of `{1..N}` (Schwartz-Zippel over
//! `y, z`); a [`multi_exp`] argument ties `b` to the ciphertexts, showing
//! `Π shuffled_i^{b_i}` re-encrypts `Π ciphertexts_j^{x^{j+1}}`. Together
//! these force `shuffled_i` to be a re-encryption of `ciphertexts_{ψ(i)}`.

use crate::commitment::{get_commitment_matrix, Commitment, CommitmentKey};
use crate::elgamal::{self, vector_exponentiation, Ciphertext, PublicKey};
use crate::error::{CoreError, CoreResult};
use crate::group::{Group, ZqElement};
use crate::permutation::Permutation;
use crate::random::{gen_random_exponent, RandomGenerator};
use crate::zkp::{challenge, hashable_commitment, hashable_element, hashable_scalar, multi_exp, powers, product};
use num_bigint::BigUint;

#[derive(Debug, Clone)]
pub struct Statement {
    pub ciphertexts: Vec<Ciphertext>,
    pub shuffled: Vec<Ciphertext>,
}

#[derive(Debug, Clone)]
pub struct Witness {
    pub permutation: Permutation,
    pub randomness: Vec<ZqElement>,
}

#[derive(Debug, Clone)]
pub struct Proof {
    pub c_a: Vec<Commitment>,
    pub c_b: Vec<Commitment>,
    pub product_proof: product::Proof,
    pub multi_exp_proof: multi_exp::Proof,
}

fn reshape_columns<T: Clone>(flat: &[T], m: usize, n: usize) -> Vec<Vec<T>> {
    (0..m).map(|j| flat[j * n..j * n + n].to_vec()).collect()
}

fn dimensions(n_total: usize, ck: &CommitmentKey) -> CoreResult<(usize, usize)> {
    let n = ck.nu();
    if n == 0 || n_total == 0 || n_total % n != 0 {
        return Err(CoreError::invalid(
            "shuffle size must be a non-zero multiple of the commitment key capacity",
        ));
    }
    Ok((n_total / n, n))
}

fn ciphertext_hashables(ct: &Ciphertext) -> Vec<crate::hash::Hashable> {
    let mut out = vec![hashable_element(ct.gamma())];
    out.extend(ct.phi().iter().map(hashable_element));
    out
}

fn transcript_x(pk: &PublicKey, statement: &Statement, c_a: &[Commitment]) -> Vec<crate::hash::Hashable> {
    let mut transcript: Vec<_> = pk.elements().iter().map(hashable_element).collect();
    for ct in &statement.ciphertexts {
        transcript.extend(ciphertext_hashables(ct));
    }
    for ct in &statement.shuffled {
        transcript.extend(ciphertext_hashables(ct));
    }
    transcript.extend(c_a.iter().map(hashable_commitment));
    transcript
}

/// `c_a^y · Commit((z,...,z), 0)`: the commitment to `y·a + z` (elementwise),
/// derivable from a commitment to `a` alone by the additive homomorphism of
/// Pedersen commitments, without knowing `a`'s opening.
fn shift_commitment(c_a: &Commitment, y: &ZqElement, z: &ZqElement, ck: &CommitmentKey) -> CoreResult<Commitment> {
    let n = ck.nu();
    let z_vec = vec![z.clone(); n];
    let z_commit = crate::commitment::get_commitment(&z_vec, &ZqElement::zero(ck.group().clone()), ck)?;
    let value = c_a.value().pow(y)?.multiply(z_commit.value())?;
    Ok(Commitment::from_value(value))
}

/// `Π_{k=1}^{n} (z + y·k)`.
fn shifted_range_product(n: usize, y: &ZqElement, z: &ZqElement, group: &Group) -> CoreResult<ZqElement> {
    let mut acc = ZqElement::new(group.clone(), BigUint::from(1u32));
    for k in 1..=n {
        let k_elem = ZqElement::new(group.clone(), BigUint::from(k as u64));
        let term = z.add(&y.multiply(&k_elem)?)?;
        acc = acc.multiply(&term)?;
    }
    Ok(acc)
}

pub fn prove(
    statement: &Statement,
    witness: &Witness,
    pk: &PublicKey,
    ck: &CommitmentKey,
    rng: &mut impl RandomGenerator,
) -> CoreResult<Proof> {
    log::debug!("shuffle argument: proving");
    let total = statement.ciphertexts.len();
    if total == 0
        || statement.shuffled.len() != total
        || witness.permutation.len() != total
        || witness.randomness.len() != total
    {
        return Err(CoreError::invalid(
            "shuffle argument requires matching non-empty ciphertext, shuffled, and witness lengths",
        ));
    }
    let group = ck.group().clone();
    let l = statement.ciphertexts[0].size();
    log::trace!("shuffle argument: N={total} l={l}");

    for i in 0..total {
        let neutral: Vec<_> = (0..l).map(|_| crate::group::GqElement::one(group.clone())).collect();
        let mask = elgamal::encrypt(&neutral, &witness.randomness[i], pk)?;
        let source = &statement.ciphertexts[witness.permutation.apply(i)];
        if mask.multiply(source)? != statement.shuffled[i] {
            return Err(CoreError::invalid(
                "witness does not reproduce the claimed shuffled ciphertexts",
            ));
        }
    }

    let (m, n) = dimensions(total, ck)?;

    let psi_exponents: Vec<ZqElement> = (0..total)
        .map(|i| ZqElement::new(group.clone(), BigUint::from((witness.permutation.apply(i) + 1) as u64)))
        .collect();
    let psi_columns = reshape_columns(&psi_exponents, m, n);
    let r_a: Vec<ZqElement> = (0..m).map(|_| gen_random_exponent(rng, &group)).collect::<CoreResult<_>>()?;
    let c_a = get_commitment_matrix(&psi_columns, &r_a, ck)?;

    let x = challenge(&group, transcript_x(pk, statement, &c_a))?;
    let x_powers = powers(&x, total + 1)?;

    let b_flat: Vec<ZqElement> = (0..total)
        .map(|i| x_powers[witness.permutation.apply(i) + 1].clone())
        .collect();
    let b_columns = reshape_columns(&b_flat, m, n);
    let s_b: Vec<ZqElement> = (0..m).map(|_| gen_random_exponent(rng, &group)).collect::<CoreResult<_>>()?;
    let c_b = get_commitment_matrix(&b_columns, &s_b, ck)?;

    let mut yz_transcript: Vec<_> = c_a.iter().map(hashable_commitment).collect();
    yz_transcript.extend(c_b.iter().map(hashable_commitment));
    let y = challenge(&group, yz_transcript.clone())?;
    yz_transcript.push(hashable_scalar(&y));
    let z = challenge(&group, yz_transcript)?;

    let d_columns: Vec<Vec<ZqElement>> = psi_columns
        .iter()
        .map(|col| col.iter().map(|a_i| a_i.multiply(&y)?.add(&z)).collect::<CoreResult<Vec<_>>>())
        .collect::<CoreResult<_>>()?;
    let d_r: Vec<ZqElement> = r_a.iter().map(|r_j| r_j.multiply(&y)).collect::<CoreResult<_>>()?;
    let shifted_c_a: Vec<Commitment> = c_a.iter().map(|c| shift_commitment(c, &y, &z, ck)).collect::<CoreResult<_>>()?;
    let b_target = shifted_range_product(total, &y, &z, &group)?;

    let product_statement = product::Statement { c_a: shifted_c_a, b: b_target };
    let product_witness = product::Witness { a: d_columns, r: d_r };
    let product_proof = product::prove(&product_statement, &product_witness, ck, rng)?;

    let c_matrix = reshape_columns(&statement.shuffled, m, n);
    let c_target = vector_exponentiation(&statement.ciphertexts, &x_powers[1..=total])?;
    let rho: ZqElement = {
        let mut acc = ZqElement::zero(group.clone());
        for (rho_i, b_i) in witness.randomness.iter().zip(b_flat.iter()) {
            acc = acc.add(&rho_i.multiply(b_i)?)?;
        }
        acc
    };

    let multi_exp_statement = multi_exp::Statement { c_matrix, c_target, c_a: c_b.clone() };
    let multi_exp_witness = multi_exp::Witness { a: b_columns, r: s_b, rho };
    let multi_exp_proof = multi_exp::prove(&multi_exp_statement, &multi_exp_witness, pk, ck, rng)?;

    Ok(Proof {
        c_a,
        c_b,
        product_proof,
        multi_exp_proof,
    })
}

pub fn verify(statement: &Statement, proof: &Proof, pk: &PublicKey, ck: &CommitmentKey) -> CoreResult<bool> {
    log::debug!("shuffle argument: verifying");
    let total = statement.ciphertexts.len();
    if total == 0 || statement.shuffled.len() != total {
        return Err(CoreError::invalid("shuffle statement requires matching non-empty ciphertext lengths"));
    }
    let (_, n) = dimensions(total, ck)?;
    let m = total / n;
    if proof.c_a.len() != m || proof.c_b.len() != m {
        return Err(CoreError::invalid("malformed shuffle proof: wrong column count"));
    }
    let group = ck.group().clone();

    let x = challenge(&group, transcript_x(pk, statement, &proof.c_a))?;
    let x_powers = powers(&x, total + 1)?;

    let mut yz_transcript: Vec<_> = proof.c_a.iter().map(hashable_commitment).collect();
    yz_transcript.extend(proof.c_b.iter().map(hashable_commitment));
    let y = challenge(&group, yz_transcript.clone())?;
    yz_transcript.push(hashable_scalar(&y));
    let z = challenge(&group, yz_transcript)?;

    let shifted_c_a: Vec<Commitment> = proof
        .c_a
        .iter()
        .map(|c| shift_commitment(c, &y, &z, ck))
        .collect::<CoreResult<_>>()?;
    let b_target = shifted_range_product(total, &y, &z, &group)?;
    let product_statement = product::Statement { c_a: shifted_c_a, b: b_target };
    if !product::verify(&product_statement, &proof.product_proof, ck).map_err(|e| {
        CoreError::verification_failed(format!("shuffle argument: product argument failed: {e}"))
    })? {
        return Ok(false);
    }

    let c_matrix = reshape_columns(&statement.shuffled, m, n);
    let c_target = vector_exponentiation(&statement.ciphertexts, &x_powers[1..=total])?;
    let multi_exp_statement = multi_exp::Statement { c_matrix, c_target, c_a: proof.c_b.clone() };
    if !multi_exp::verify(&multi_exp_statement, &proof.multi_exp_proof, pk, ck).map_err(|e| {
        CoreError::verification_failed(format!("shuffle argument: multi-exponentiation argument failed: {e}"))
    })? {
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::generate_keypair;
    use crate::group::{GqElement, GroupParams};
    use crate::permutation::gen_shuffle;
    use crate::random::OsRngGenerator;

    fn test_ck() -> CommitmentKey {
        let grp = GroupParams::medium_test_group();
        let h = GqElement::new(grp.clone(), BigUint::from(4u32)).unwrap();
        let g1 = GqElement::new(grp.clone(), BigUint::from(8u32)).unwrap();
        let g2 = GqElement::new(grp, BigUint::from(16u32)).unwrap();
        CommitmentKey::new(h, vec![g1, g2]).unwrap()
    }

    #[test]
    fn honest_shuffle_verifies() {
        let _ = env_logger::try_init();
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();
        let (pk, _sk) = generate_keypair(&mut rng, &grp, 1).unwrap();

        let mut ciphertexts = Vec::new();
        for _ in 0..4 {
            let msg = vec![GqElement::generator(grp.clone())];
            let r = gen_random_exponent(&mut rng, &grp).unwrap();
            ciphertexts.push(elgamal::encrypt(&msg, &r, &pk).unwrap());
        }

        let shuffle = gen_shuffle(&mut rng, &ciphertexts, &pk, &grp).unwrap();
        let statement = Statement {
            ciphertexts: ciphertexts.clone(),
            shuffled: shuffle.ciphertexts.clone(),
        };
        let witness = Witness {
            permutation: shuffle.permutation,
            randomness: shuffle.randomness,
        };

        let proof = prove(&statement, &witness, &pk, &ck, &mut rng).unwrap();
        assert!(verify(&statement, &proof, &pk, &ck).unwrap());
    }

    #[test]
    fn tampered_shuffled_ciphertext_fails_witness_check() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();
        let (pk, _sk) = generate_keypair(&mut rng, &grp, 1).unwrap();

        let mut ciphertexts = Vec::new();
        for _ in 0..4 {
            let msg = vec![GqElement::generator(grp.clone())];
            let r = gen_random_exponent(&mut rng, &grp).unwrap();
            ciphertexts.push(elgamal::encrypt(&msg, &r, &pk).unwrap());
        }
        let shuffle = gen_shuffle(&mut rng, &ciphertexts, &pk, &grp).unwrap();
        let mut tampered = shuffle.ciphertexts.clone();
        tampered.swap(0, 1);

        let statement = Statement { ciphertexts, shuffled: tampered };
        let witness = Witness {
            permutation: shuffle.permutation,
            randomness: shuffle.randomness,
        };
        assert!(prove(&statement, &witness, &pk, &ck, &mut rng).is_err());
    }

    #[test]
    fn tampered_proof_scalar_fails_verification() {
        let ck = test_ck();
        let grp = ck.group().clone();
        let mut rng = OsRngGenerator::new();
        let (pk, _sk) = generate_keypair(&mut rng, &grp, 1).unwrap();

        let mut ciphertexts = Vec::new();
        for _ in 0..4 {
            let msg = vec![GqElement::generator(grp.clone())];
            let r = gen_random_exponent(&mut rng, &grp).unwrap();
            ciphertexts.push(elgamal::encrypt(&msg, &r, &pk).unwrap());
        }

        let shuffle = gen_shuffle(&mut rng, &ciphertexts, &pk, &grp).unwrap();
        let statement = Statement {
            ciphertexts: ciphertexts.clone(),
            shuffled: shuffle.ciphertexts.clone(),
        };
        let witness = Witness {
            permutation: shuffle.permutation,
            randomness: shuffle.randomness,
        };

        let mut proof = prove(&statement, &witness, &pk, &ck, &mut rng).unwrap();
        assert!(verify(&statement, &proof, &pk, &ck).unwrap());

        // tampering a valid, already-produced proof (rather than the witness before
        // `prove`) must make `verify` reject it. This crate signals a rejected proof
        // via `Err(VerificationFailed)` rather than `Ok(false)` (see every sub-argument's
        // `verify`), so a tampered proof always surfaces as an error, never a silent
        // `Ok(false)`.
        let rho_x = &mut proof.multi_exp_proof.rho_x;
        *rho_x = rho_x.add(&ZqElement::new(grp, BigUint::from(1u32))).unwrap();
        assert!(verify(&statement, &proof, &pk, &ck).is_err());
    }
}
