//! Multi-recipient ElGamal over `G_q` (§4.3): keypairs, ciphertext algebra,
//! encryption, decryption, partial decryption, and private-key compression.

mod ciphertext;
mod keys;

pub use ciphertext::{vector_exponentiation, Ciphertext};
pub use keys::{decrypt, encrypt, generate_keypair, partial_decrypt, PrivateKey, PublicKey};
