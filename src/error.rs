use thiserror::Error;

/// Result type for decoding and sampling operations.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input buffer has the wrong width.
    #[error("invalid length (expected {expected}, got {actual})")]
    InvalidLength { expected: usize, actual: usize },

    /// Decoded integer is not below the field modulus.
    #[error("value is not a canonical field element")]
    NonCanonical,

    /// Textual input is not a hexadecimal integer.
    #[error("invalid field element string: {0}")]
    InvalidString(String),

    /// Affine coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The injected entropy source failed.
    #[error("entropy source failure: {0}")]
    Entropy(rand_core::Error),
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Self {
        Error::Entropy(err)
    }
}
