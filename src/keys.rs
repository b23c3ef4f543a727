//! SM2 secret and public key types.

use core::fmt::{self, Debug};

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::arithmetic::affine::{AffinePoint, UNCOMPRESSED_LEN};
use crate::arithmetic::mul;
use crate::arithmetic::scalar::Scalar;
use crate::codec;
use crate::curve::Sm2Curve;
use crate::error::{Error, Result};

/// SM2 secret key: a scalar in `[1, n - 1]`.
///
/// The scalar is zeroized when the key is dropped.
#[derive(Clone)]
pub struct SecretKey {
    d: Scalar,
}

impl SecretKey {
    /// Generate a random secret key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        Ok(Self {
            d: Sm2Curve::new().rand_scalar(rng)?,
        })
    }

    /// Parse a secret key from a 32-byte big-endian scalar encoding.
    ///
    /// Fails with [`Error::InvalidKey`] unless the value is in `[1, n - 1]`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| Error::InvalidKey)?;
        let d = Scalar::from_bytes(&bytes).ok_or(Error::InvalidKey)?;
        if bool::from(d.is_zero()) {
            return Err(Error::InvalidKey);
        }
        Ok(Self { d })
    }

    /// Serialize the secret scalar as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.d.to_bytes()
    }

    /// Borrow the secret scalar.
    pub(crate) fn secret_scalar(&self) -> &Scalar {
        &self.d
    }

    /// Compute the corresponding public key `Q = d * G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: mul::scalar_base_mul(&self.d, mul::DEFAULT_WINDOW),
        }
    }

    /// Parse a secret key from PKCS#8 DER.
    pub fn from_pkcs8_der(bytes: &[u8]) -> Result<Self> {
        let mut d = codec::decode_pkcs8(bytes)?;
        let key = Self::from_slice(&d);
        d.zeroize();
        key
    }

    /// Serialize this key as PKCS#8 DER, embedding the curve OID and the
    /// public point.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        codec::encode_pkcs8(&self.to_bytes(), &self.public_key().to_sec1_bytes())
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.d.zeroize();
    }
}

/// SM2 public key: a non-identity point on the curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Create a public key from an affine point.
    ///
    /// Fails with [`Error::InvalidKey`] if the point is the identity or not
    /// on the curve.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity() || !point.is_on_curve() {
            return Err(Error::InvalidKey);
        }
        Ok(Self { point })
    }

    /// Borrow the inner affine point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Parse a SEC1 uncompressed encoding `0x04 || x || y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let point = AffinePoint::from_uncompressed_bytes(bytes).ok_or(Error::InvalidKey)?;
        Ok(Self { point })
    }

    /// Serialize as a SEC1 uncompressed encoding.
    pub fn to_sec1_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        self.point.to_uncompressed_bytes()
    }

    /// Parse a public key from SPKI DER, rejecting off-curve points with
    /// [`Error::Structural`].
    pub fn from_public_key_der(bytes: &[u8]) -> Result<Self> {
        let raw = codec::decode_spki(bytes)?;
        let point = AffinePoint::from_uncompressed_bytes(&raw).ok_or(Error::Structural)?;
        Ok(Self { point })
    }

    /// Serialize this key as SPKI DER.
    pub fn to_public_key_der(&self) -> Result<Vec<u8>> {
        codec::encode_spki(&self.to_sec1_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::{PublicKey, SecretKey};
    use crate::arithmetic::affine::AffinePoint;
    use crate::error::Error;
    use hex_literal::hex;

    fn one() -> [u8; 32] {
        let mut d = [0u8; 32];
        d[31] = 1;
        d
    }

    #[test]
    fn d_equals_one_gives_generator() {
        let key = SecretKey::from_slice(&one()).unwrap();
        assert_eq!(*key.public_key().as_affine(), AffinePoint::GENERATOR);
    }

    #[test]
    fn out_of_range_scalars_rejected() {
        assert!(matches!(
            SecretKey::from_slice(&[0u8; 32]),
            Err(Error::InvalidKey)
        ));
        let n = hex!("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123");
        assert!(matches!(SecretKey::from_slice(&n), Err(Error::InvalidKey)));
        assert!(matches!(
            SecretKey::from_slice(&[1, 2, 3]),
            Err(Error::InvalidKey)
        ));
    }

    #[test]
    fn sec1_round_trip() {
        let key = SecretKey::from_slice(&one()).unwrap().public_key();
        let bytes = key.to_sec1_bytes();
        assert_eq!(PublicKey::from_sec1_bytes(&bytes).unwrap(), key);
    }

    #[test]
    fn sec1_rejects_bad_encodings() {
        assert!(PublicKey::from_sec1_bytes(&[]).is_err());
        let mut bytes = [0u8; 65];
        bytes[0] = 0x04;
        assert!(matches!(
            PublicKey::from_sec1_bytes(&bytes),
            Err(Error::InvalidKey)
        ));
    }
}
