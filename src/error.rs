//! Error types.

use core::fmt;

/// Result type with the `sm2p256` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by this crate.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed ASN.1: bad tags, lengths, or trailing data.
    Syntax,

    /// Well-formed ASN.1 carrying the wrong algorithm or curve OID, an
    /// unsupported version, or a point that is not on the curve.
    Structural,

    /// Ciphertext shorter than the minimum envelope.
    Truncated,

    /// Decryption MAC check failed.
    MacMismatch,

    /// Private scalar outside `[1, n-1]`, or a public key that is the
    /// identity or not on the curve.
    InvalidKey,

    /// The caller-supplied random number generator failed.
    Randomness(rand_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax => f.write_str("malformed ASN.1 input"),
            Error::Structural => f.write_str("unexpected OID, version, or point encoding"),
            Error::Truncated => f.write_str("ciphertext too short"),
            Error::MacMismatch => f.write_str("ciphertext authentication failed"),
            Error::InvalidKey => f.write_str("invalid key"),
            Error::Randomness(err) => write!(f, "random number generator failure: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Randomness(err) => Some(err),
            _ => None,
        }
    }
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Error {
        Error::Syntax
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Error {
        Error::Randomness(err)
    }
}
