//! Distinguishing identifier support.

use sm3::{Digest, Sm3};

use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::field::FieldElement;
use crate::error::{Error, Result};

/// Default distinguishing identifier, used when the caller supplies none.
pub const DEFAULT_UID: &[u8] = b"1234567812345678";

/// Compute the user information hash `Z` binding an identifier to the
/// signer's public key and the domain parameters:
///
/// ```text
/// ZA = H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// `ENTLA` is the identifier's bit length as a 16-bit big-endian integer;
/// identifiers longer than 8191 bytes do not fit and are rejected.
pub(crate) fn hash_z(uid: &[u8], public_key: &AffinePoint) -> Result<[u8; 32]> {
    let entla: u16 = uid
        .len()
        .checked_mul(8)
        .and_then(|bits| bits.try_into().ok())
        .ok_or(Error::InvalidKey)?;

    let mut sm3 = Sm3::new();
    sm3.update(entla.to_be_bytes());
    sm3.update(uid);
    sm3.update(FieldElement::EQUATION_A.to_bytes());
    sm3.update(FieldElement::EQUATION_B.to_bytes());
    sm3.update(AffinePoint::GENERATOR.x().to_bytes());
    sm3.update(AffinePoint::GENERATOR.y().to_bytes());
    sm3.update(public_key.x().to_bytes());
    sm3.update(public_key.y().to_bytes());
    Ok(sm3.finalize().into())
}
