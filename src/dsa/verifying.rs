//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```
//!
//! Verification is total: parse failures, out-of-range components, and
//! mismatched equations all yield `false` rather than an error.

use core::fmt::{self, Debug};

use sm3::{Digest, Sm3};

use super::{Signature, SignatureFormat};
use crate::arithmetic::mul;
use crate::arithmetic::scalar::Scalar;
use crate::curve::Sm2Curve;
use crate::distid::hash_z;
use crate::error::Result;
use crate::keys::PublicKey;

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
#[derive(Clone)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: [u8; 32],

    /// Curve handle carrying the window configuration.
    curve: Sm2Curve,
}

impl VerifyingKey {
    /// Initialize a [`VerifyingKey`] from a signer's distinguishing
    /// identifier and public key.
    pub fn new(uid: &[u8], public_key: PublicKey) -> Result<Self> {
        let identity_hash = hash_z(uid, public_key.as_affine())?;
        Ok(Self {
            public_key,
            identity_hash,
            curve: Sm2Curve::new(),
        })
    }

    /// Initialize a [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(uid: &[u8], bytes: &[u8]) -> Result<Self> {
        Self::new(uid, PublicKey::from_sec1_bytes(bytes)?)
    }

    /// The signer's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Set the wNAF window width used for scalar multiplication.
    ///
    /// Widths outside `[2, 6]` are ignored.
    pub fn set_window(&mut self, window: usize) {
        self.curve.set_window(window);
    }

    pub(crate) fn curve(&self) -> &Sm2Curve {
        &self.curve
    }

    /// Compute the message hash `e = H(ZA || M)`.
    pub(crate) fn hash_msg(&self, msg: &[u8]) -> [u8; 32] {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
            .into()
    }

    /// Verify a parsed signature over `msg`.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        // B1/B2 hold by construction of `Signature`
        let r = *signature.r();
        let s = *signature.s();

        // B3/B4: calculate e'=Hv(ZA || M')
        let e = Scalar::reduce_bytes(&self.hash_msg(msg));

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = r + s;
        if bool::from(t.is_zero()) {
            return false;
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let sg = mul::scalar_base_mul(&s, self.curve.window());
        let tq = mul::scalar_mul(self.public_key.as_affine(), &t, self.curve.window());
        let point = sg.add(&tq);
        if point.is_identity() {
            return false;
        }

        // B7: calculate R=(e'+x1') modn and compare with r'
        let v = e + Scalar::reduce_bytes(&point.x().to_bytes());
        v == r
    }

    /// Parse a serialized signature in the given format and verify it.
    ///
    /// Returns `false` on any parse failure.
    pub fn verify_bytes(&self, msg: &[u8], signature: &[u8], format: SignatureFormat) -> bool {
        match Signature::from_slice(signature, format) {
            Ok(signature) => self.verify(msg, &signature),
            Err(_) => false,
        }
    }
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl AsRef<PublicKey> for VerifyingKey {
    fn as_ref(&self) -> &PublicKey {
        &self.public_key
    }
}
