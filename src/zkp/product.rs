//! Product Argument (§4.10): proves the entries of an `n x m` committed
//! matrix multiply out (over every row and column) to a public scalar `b`.
//!
//! `m == 1` is exactly a [`svp`] instance on the lone column. For `m >= 2`
//! the row products are committed separately (`c_b`) and tied to `c_A` via
//! [`hadamard`] (entrywise column product equals the committed row vector)
//! and to the public `b` via [`svp`] (the row vector's product equals `b`).

use crate::commitment::{get_commitment, Commitment, CommitmentKey};
use crate::error::{CoreError, CoreResult};
use crate::group::ZqElement;
use crate::random::{gen_random_exponent, RandomGenerator};
use crate::zkp::{hadamard, svp};

#[derive(Debug, Clone)]
pub struct Statement {
    pub c_a: Vec<Commitment>,
    pub b: ZqElement,
}

#[derive(Debug, Clone)]
pub struct Witness {
    pub a: Vec<Vec<ZqElement>>,
    pub r: Vec<ZqElement>,
}

#[derive(Debug, Clone)]
pub enum Proof {
    Single(svp::Proof),
    Composed {
        c_b: Commitment,
        hadamard: hadamard::Proof,
        svp: svp::Proof,
    },
}

fn row_products(columns: &[Vec<ZqElement>]) -> CoreResult<Vec<ZqElement>> {
    let n = columns[0].len();
    let group = columns[0][0].group().clone();
    let mut rows = vec![ZqElement::new(group, num_bigint::BigUint::from(1u32)); n];
    for col in columns {
        for (acc, a_i) in rows.iter_mut().zip(col.iter()) {
            *acc = acc.multiply(a_i)?;
        }
    }
    Ok(rows)
}

pub fn prove(
    statement: &Statement,
    witness: &Witness,
    ck: &CommitmentKey,
    rng: &mut impl RandomGenerator,
) -> CoreResult<Proof> {
    log::debug!("product argument: proving");
    let m = witness.a.len();
    if m == 0 || witness.r.len() != m || statement.c_a.len() != m {
        return Err(CoreError::invalid("product argument requires m >= 1 matching columns"));
    }
    if m == 1 {
        let svp_statement = svp::Statement {
            c_a: statement.c_a[0].clone(),
            b: statement.b.clone(),
        };
        let svp_witness = svp::Witness {
            a: witness.a[0].clone(),
            r: witness.r[0].clone(),
        };
        return Ok(Proof::Single(svp::prove(&svp_statement, &svp_witness, ck, rng)?));
    }

    let group = ck.group().clone();
    let b_row = row_products(&witness.a)?;
    let s_b = gen_random_exponent(rng, &group)?;
    let c_b = get_commitment(&b_row, &s_b, ck)?;

    let h_statement = hadamard::Statement {
        c_a: statement.c_a.clone(),
        c_b: c_b.clone(),
    };
    let h_witness = hadamard::Witness {
        a: witness.a.clone(),
        r: witness.r.clone(),
        b: b_row.clone(),
        s_b: s_b.clone(),
    };
    let hadamard_proof = hadamard::prove(&h_statement, &h_witness, ck, rng)?;

    let svp_statement = svp::Statement {
        c_a: c_b.clone(),
        b: statement.b.clone(),
    };
    let svp_witness = svp::Witness { a: b_row, r: s_b };
    let svp_proof = svp::prove(&svp_statement, &svp_witness, ck, rng)?;

    Ok(Proof::Composed {
        c_b,
        hadamard: hadamard_proof,
        svp: svp_proof,
    })
}

pub fn verify(statement: &Statement, proof: &Proof, ck: &CommitmentKey) -> CoreResult<bool> {
    log::debug!("product argument: verifying");
    let m = statement.c_a.len();
    if m == 0 {
        return Err(CoreError::invalid("product statement requires m >= 1"));
    }
    match proof {
        Proof::Single(svp_proof) => {
            if m != 1 {
                return Err(CoreError::verification_failed(
                    "product argument: single-column proof supplied for m > 1 statement",
                ));
            }
            let svp_statement = svp::Statement {
                c_a: statement.c_a[0].clone(),
                b: statement.b.clone(),
            };
            svp::verify(&svp_statement, svp_proof, ck)
        }
        Proof::Composed { c_b, hadamard: hadamard_proof, svp: svp_proof } => {
            if m == 1 {
                return Err(CoreError::verification_failed(
                    "product argument: composed proof supplied for m == 1 statement",
                ));
            }
            let h_statement = hadamard::Statement {
                c_a: statement.c_a.clone(),
                c_b: c_b.clone(),
            };
            if !hadamard::verify(&h_statement, hadamard_proof, ck)? {
                return Ok(false);
            }
            let svp_statement = svp::Statement {
                c_a: c_b.clone(),
                b: statement.b.clone(),
            };
            svp::verify(&svp_statement, svp_proof, ck)
        }
    }
}
