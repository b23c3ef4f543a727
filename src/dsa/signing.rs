//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

use core::fmt::{self, Debug};

use rand_core::CryptoRngCore;

use super::{Signature, VerifyingKey};
use crate::arithmetic::mul;
use crate::arithmetic::scalar::Scalar;
use crate::error::{Error, Result};
use crate::keys::SecretKey;

/// SM2DSA secret key used for signing messages and producing signatures.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar.
    secret_scalar: Scalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create a signing key from a signer's distinguishing identifier and
    /// secret key.
    ///
    /// Fails with [`Error::InvalidKey`] if `d + 1` is not invertible
    /// (i.e. `d = n - 1`), since the signing equation divides by it.
    pub fn new(uid: &[u8], secret_key: &SecretKey) -> Result<Self> {
        let secret_scalar = *secret_key.secret_scalar();
        if bool::from((secret_scalar + Scalar::ONE).is_zero()) {
            return Err(Error::InvalidKey);
        }
        let verifying_key = VerifyingKey::new(uid, secret_key.public_key())?;
        Ok(Self {
            secret_scalar,
            verifying_key,
        })
    }

    /// Parse a signing key from a big endian-encoded byte slice containing
    /// the secret scalar.
    pub fn from_slice(uid: &[u8], bytes: &[u8]) -> Result<Self> {
        Self::new(uid, &SecretKey::from_slice(bytes)?)
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Set the wNAF window width used for scalar multiplication.
    ///
    /// Widths outside `[2, 6]` are ignored.
    pub fn set_window(&mut self, window: usize) {
        self.verifying_key.set_window(window);
    }

    /// Sign a message, drawing the ephemeral scalar from `rng`.
    pub fn sign(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Signature> {
        // A1: set M~=ZA || M
        // A2: calculate e=Hv(M~)
        let e = Scalar::reduce_bytes(&self.verifying_key.hash_msg(msg));
        let curve = self.verifying_key.curve();

        loop {
            // A3: pick a random number k in [1, n-1]
            let k = curve.rand_scalar(rng)?;

            // A4: calculate the elliptic curve point (x1, y1)=[k]G
            let point = mul::scalar_base_mul(&k, curve.window());

            // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
            let r = e + Scalar::reduce_bytes(&point.x().to_bytes());
            if bool::from(r.is_zero()) || bool::from((r + k).is_zero()) {
                continue;
            }

            // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
            let s = (self.secret_scalar + Scalar::ONE).invert()
                * (k - r * self.secret_scalar);
            if bool::from(s.is_zero()) {
                continue;
            }

            // A7: the digital signature of M is (r, s)
            return Ok(Signature::from_scalars(r, s));
        }
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}
