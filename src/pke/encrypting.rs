//! SM2 encryption entry points.

use der::asn1::{OctetStringRef, UintRef};
use rand_core::CryptoRngCore;

use super::{CipherRef, EMPTY_ASN1, EMPTY_RAW, Mode, kdf_xor, mac, trim_leading_zeros};
use crate::arithmetic::mul;
use crate::curve::Sm2Curve;
use crate::error::{Error, Result};
use crate::keys::PublicKey;

impl PublicKey {
    /// Encrypt `msg` to this key using the default curve configuration.
    pub fn encrypt(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>> {
        self.encrypt_with_curve(&Sm2Curve::new(), rng, msg, mode)
    }

    /// Encrypt `msg` to this key, taking the wNAF window width from `curve`.
    pub fn encrypt_with_curve(
        &self,
        curve: &Sm2Curve,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
        mode: Mode,
    ) -> Result<Vec<u8>> {
        if msg.is_empty() {
            return Ok(if mode.is_asn1() {
                EMPTY_ASN1.to_vec()
            } else {
                EMPTY_RAW.to_vec()
            });
        }

        // A1: generate a random number k in [1, n-1]
        let k = curve.rand_scalar(rng)?;

        // A2: compute point C1 = [k]G = (x1, y1)
        let c1 = mul::scalar_base_mul(&k, curve.window());

        // A4: compute point [k]PB = (x2, y2)
        let kp = mul::scalar_mul(self.as_affine(), &k, curve.window());
        if kp.is_identity() {
            return Err(Error::InvalidKey);
        }
        let x2 = kp.x().to_bytes();
        let y2 = kp.y().to_bytes();

        // A5: compute t = KDF(x2 || y2, klen)
        // A6: compute C2 = M ^ t; an all-zero t is accepted as-is
        let mut c2 = vec![0u8; msg.len()];
        let _ = kdf_xor(&x2, &y2, msg, &mut c2);

        // A7: compute C3 = Hash(x2 || M || y2)
        let c3 = mac(&x2, msg, &y2);

        let x1 = c1.x().to_bytes();
        let y1 = c1.y().to_bytes();
        let (first, second): (&[u8], &[u8]) = if mode.c3_before_c2() {
            (&c3, &c2)
        } else {
            (&c2, &c3)
        };

        if mode.is_asn1() {
            let cipher = CipherRef {
                x: UintRef::new(trim_leading_zeros(&x1))?,
                y: UintRef::new(trim_leading_zeros(&y1))?,
                first: OctetStringRef::new(first)?,
                second: OctetStringRef::new(second)?,
            };
            cipher.to_vec()
        } else {
            let mut out = Vec::with_capacity(1 + 64 + msg.len() + c3.len());
            out.push(0x04);
            out.extend_from_slice(&x1);
            out.extend_from_slice(&y1);
            out.extend_from_slice(first);
            out.extend_from_slice(second);
            Ok(out)
        }
    }
}
