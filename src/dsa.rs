//! SM2 Digital Signature Algorithm (SM2DSA) as defined in
//! [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use sm2p256::{
//!     DEFAULT_UID, SecretKey,
//!     dsa::{SignatureFormat, SigningKey, VerifyingKey},
//! };
//!
//! # fn example() -> sm2p256::Result<()> {
//! // Signing
//! let secret_key = SecretKey::random(&mut OsRng)?;
//! let signing_key = SigningKey::new(DEFAULT_UID, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().public_key().to_sec1_bytes();
//! let message = b"test message";
//! let signature = signing_key.sign(&mut OsRng, message)?;
//!
//! // Verifying
//! let verifying_key = VerifyingKey::from_sec1_bytes(DEFAULT_UID, &verifying_key_bytes)?;
//! assert!(verifying_key.verify(message, &signature));
//! assert!(verifying_key.verify_bytes(
//!     message,
//!     &signature.to_vec(SignatureFormat::Asn1),
//!     SignatureFormat::Asn1,
//! ));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod der;
mod signing;
mod verifying;

pub use self::signing::SigningKey;
pub use self::verifying::VerifyingKey;

use core::fmt::{self, Debug};

use crate::arithmetic::scalar::Scalar;
use crate::error::{Error, Result};

/// Serialized form of a signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignatureFormat {
    /// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`.
    Asn1,
    /// `r || s`, each left-padded to 32 bytes.
    Raw,
}

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// Both components are guaranteed to be in `[1, n - 1]` by construction.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Size of a raw-encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    pub(crate) fn from_scalars(r: Scalar, s: Scalar) -> Self {
        debug_assert!(!bool::from(r.is_zero()) && !bool::from(s.is_zero()));
        Self { r, s }
    }

    /// Parse a signature from its raw 64-byte encoding.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);

        let r = Scalar::from_bytes(&r_bytes).ok_or(Error::Syntax)?;
        let s = Scalar::from_bytes(&s_bytes).ok_or(Error::Syntax)?;
        if bool::from(r.is_zero()) || bool::from(s.is_zero()) {
            return Err(Error::Syntax);
        }
        Ok(Self { r, s })
    }

    /// Parse a signature from ASN.1 DER.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (r, s) = der::decode(bytes)?;
        Ok(Self { r, s })
    }

    /// Parse a signature in the given format.
    pub fn from_slice(bytes: &[u8], format: SignatureFormat) -> Result<Self> {
        match format {
            SignatureFormat::Asn1 => Self::from_der(bytes),
            SignatureFormat::Raw => {
                let bytes: &SignatureBytes = bytes.try_into().map_err(|_| Error::Syntax)?;
                Self::from_bytes(bytes)
            }
        }
    }

    /// Serialize as the raw 64-byte encoding.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        bytes[..32].copy_from_slice(&self.r.to_bytes());
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Serialize as ASN.1 DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        der::encode(&self.r, &self.s)
    }

    /// Serialize in the given format.
    pub fn to_vec(&self, format: SignatureFormat) -> Vec<u8> {
        match format {
            // encoding two canonical scalars cannot fail
            SignatureFormat::Asn1 => self.to_der().unwrap_or_default(),
            SignatureFormat::Raw => self.to_bytes().to_vec(),
        }
    }

    /// The `r` component.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sm2p256::dsa::Signature(")?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes, SignatureFormat::Raw)
    }
}
