//! SM2 decryption entry points.

use subtle::ConstantTimeEq;

use super::{CipherRef, EMPTY_ASN1, EMPTY_RAW, Mode, coordinate_bytes, kdf_xor, mac};
use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::field::FieldElement;
use crate::arithmetic::mul;
use crate::curve::Sm2Curve;
use crate::error::{Error, Result};
use crate::keys::SecretKey;

/// Minimum raw ciphertext body: two 32-byte coordinates plus the 32-byte tag.
const MIN_RAW_BODY: usize = 96;

impl SecretKey {
    /// Decrypt `ciphertext` using the default curve configuration.
    pub fn decrypt(&self, ciphertext: &[u8], mode: Mode) -> Result<Vec<u8>> {
        self.decrypt_with_curve(&Sm2Curve::new(), ciphertext, mode)
    }

    /// Decrypt `ciphertext`, taking the wNAF window width from `curve`.
    pub fn decrypt_with_curve(
        &self,
        curve: &Sm2Curve,
        ciphertext: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>> {
        // empty plaintext encrypts to a bare envelope
        if (mode.is_asn1() && ciphertext == EMPTY_ASN1)
            || (!mode.is_asn1() && ciphertext == EMPTY_RAW)
        {
            return Ok(Vec::new());
        }

        let (c1, c2, c3) = if mode.is_asn1() {
            parse_asn1(ciphertext, mode.c3_before_c2())?
        } else {
            parse_raw(ciphertext, mode.c3_before_c2())?
        };

        // B3: compute [dB]C1 = (x2, y2)
        let kp = mul::scalar_mul(&c1, self.secret_scalar(), curve.window());
        if kp.is_identity() {
            return Err(Error::Structural);
        }
        let x2 = kp.x().to_bytes();
        let y2 = kp.y().to_bytes();

        // B4: compute t = KDF(x2 || y2, klen)
        // B5: compute M' = C2 ^ t
        let mut msg = vec![0u8; c2.len()];
        kdf_xor(&x2, &y2, c2, &mut msg);

        // compute u = Hash(x2 || M' || y2) and compare with C3 in constant
        // time
        let u = mac(&x2, &msg, &y2);
        if !bool::from(u[..].ct_eq(&c3[..])) {
            return Err(Error::MacMismatch);
        }

        Ok(msg)
    }
}

/// Split a raw envelope into `(C1, C2, C3)`.
fn parse_raw(ciphertext: &[u8], c3_first: bool) -> Result<(AffinePoint, &[u8], [u8; 32])> {
    let body = ciphertext.strip_prefix(&[0x04]).unwrap_or(ciphertext);
    if body.len() < MIN_RAW_BODY {
        return Err(Error::Truncated);
    }

    let c1 = point_from_coordinates(&body[..32], &body[32..64])?;
    let (c2, c3) = if c3_first {
        (&body[96..], &body[64..96])
    } else {
        (&body[64..body.len() - 32], &body[body.len() - 32..])
    };

    let mut tag = [0u8; 32];
    tag.copy_from_slice(c3);
    Ok((c1, c2, tag))
}

/// Split a DER envelope into `(C1, C2, C3)`.
fn parse_asn1(ciphertext: &[u8], c3_first: bool) -> Result<(AffinePoint, &[u8], [u8; 32])> {
    let cipher = CipherRef::from_slice(ciphertext)?;
    let x1 = coordinate_bytes(&cipher.x)?;
    let y1 = coordinate_bytes(&cipher.y)?;
    let c1 = point_from_coordinates(&x1, &y1)?;

    let (c3, c2) = if c3_first {
        (cipher.first.as_bytes(), cipher.second.as_bytes())
    } else {
        (cipher.second.as_bytes(), cipher.first.as_bytes())
    };
    let tag: [u8; 32] = c3.try_into().map_err(|_| Error::Truncated)?;
    Ok((c1, c2, tag))
}

/// Rebuild and validate `C1`; off-curve points are a structural defect of
/// the envelope.
fn point_from_coordinates(x: &[u8], y: &[u8]) -> Result<AffinePoint> {
    let x: [u8; 32] = x.try_into().map_err(|_| Error::Truncated)?;
    let y: [u8; 32] = y.try_into().map_err(|_| Error::Truncated)?;
    AffinePoint::from_xy(FieldElement::from_bytes(&x), FieldElement::from_bytes(&y))
        .ok_or(Error::Structural)
}
