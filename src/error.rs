//! The library's single error type.
//!
//! Every fallible operation in this crate returns `Result<T, CoreError>`. There
//! are exactly three kinds, matching the three failure modes a verifiable-voting
//! crypto core can have: a bad precondition, a rejected proof, or a broken
//! invariant. Nothing else. In particular there is no `Io` variant — this core
//! touches no files, sockets, or environment.

use thiserror::Error;

/// The three error kinds this core can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A precondition was not met at construction time: an out-of-range
    /// integer, mismatched groups or sizes, a non-prime modulus, a witness
    /// that does not satisfy its relation, and so on. Raised eagerly, never
    /// wrapped.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A verifier rejected a proof. Carries a first-failure description
    /// identifying the sub-argument and the failing equation. Not retryable,
    /// and not fatal to the caller — the expected response is to discard the
    /// proof.
    #[error("verification failed: {0}")]
    VerificationFailed(String),

    /// An internal invariant was violated, e.g. a value computed as a group
    /// element turned out not to be a member of the group. Indicates a bug
    /// in this crate; callers should treat it as fatal.
    #[error("unreachable invariant violated: {0}")]
    Unreachable(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidArgument(msg.into())
    }

    pub fn verification_failed(msg: impl Into<String>) -> Self {
        CoreError::VerificationFailed(msg.into())
    }

    pub fn unreachable(msg: impl Into<String>) -> Self {
        CoreError::Unreachable(msg.into())
    }
}
