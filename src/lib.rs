//! Safe-prime `G_q` ElGamal and the Bayer-Groth shuffle argument (§1-§9).
//!
//! Layering, bottom to top: [`bigint`] (safe-prime checks, modular
//! arithmetic) underlies [`group`] (`G_q`/`Z_q` value types); [`conversion`]
//! and [`hash`] give the canonical encodings and the recursive Fiat-Shamir
//! hash that [`zkp`]'s challenges build on; [`random`] is the explicit
//! randomness source threaded through every prover; [`elgamal`] and
//! [`commitment`] are the two things the arguments in [`zkp`] operate over;
//! [`permutation`] generates the witness a shuffle proof attests to.

#![allow(dead_code)]

pub mod bigint;
pub mod commitment;
pub mod config;
pub mod conversion;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod hash;
pub mod permutation;
pub mod random;
pub mod utils;
pub mod zkp;
