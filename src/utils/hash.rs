use sha3::{Digest, Sha3_256};

/// Returns a new hasher instance of the library's digest algorithm. The
/// Fiat-Shamir transform (`crate::hash`) is the only caller; every other
/// digest use in this crate (nothing, at present) would go through the same
/// algorithm rather than picking its own.
pub fn new_default_hasher() -> Sha3_256 {
    Sha3_256::new()
}

/// Updates a given hasher with multiple byte slices.
/// This is a convenience function to avoid repeated `hasher.update()` calls.
pub fn update_hasher_with_slices(hasher: &mut impl Digest, data_slices: &[&[u8]]) {
    for slice in data_slices {
        hasher.update(slice);
    }
}

/// One-shot SHA3-256 of `data`, returning the 32-byte digest.
pub fn digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = new_default_hasher();
    hasher.update(data);
    hasher.finalize().into()
}
