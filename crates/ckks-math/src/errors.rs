use thiserror::Error;

use crate::rq::Representation;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates an invalid modulus
    #[error("Invalid modulus: modulus {0} should be between 2 and (1 << 62) - 1.")]
    InvalidModulus(u64),

    /// Indicates that the provided context is invalid.
    #[error("Invalid context provided.")]
    InvalidContext,

    /// Indicates an incorrect representation.
    #[error("Incorrect representation: the representation is {0:?}, expected {1:?}")]
    IncorrectRepresentation(Representation, Representation),

    /// Indicates that a sequence of limbs has the wrong length.
    #[error("Incorrect number of limbs: got {0}, expected {1}")]
    IncorrectLimbCount(usize, usize),

    /// Indicates a default error
    #[error("{0}")]
    Default(String),
}
