//! SM2 public-key encryption as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! Ciphertexts carry three components: the ephemeral point `C1`, the masked
//! plaintext `C2`, and the SM3 tag `C3`. Both historical component orders
//! are supported, each in a raw byte envelope (prefixed with `0x04`) and in
//! an ASN.1 DER envelope.
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use sm2p256::{SecretKey, pke::Mode};
//!
//! # fn example() -> sm2p256::Result<()> {
//! let secret_key = SecretKey::random(&mut OsRng)?;
//! let public_key = secret_key.public_key();
//!
//! let plaintext = b"plaintext";
//! let ciphertext = public_key.encrypt(&mut OsRng, plaintext, Mode::C1C3C2)?;
//! let recovered = secret_key.decrypt(&ciphertext, Mode::C1C3C2)?;
//! assert_eq!(recovered, plaintext);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod decrypting;
mod encrypting;

use der::asn1::{OctetStringRef, UintRef};
use der::{Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer};
use sm3::{Digest, Sm3};

use crate::error::{Error, Result};

/// Ciphertext component order and envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Raw `0x04 || C1 || C2 || C3` (the original standard's order).
    C1C2C3,
    /// Raw `0x04 || C1 || C3 || C2` (the current standard's order).
    C1C3C2,
    /// ASN.1 `SEQUENCE { x1, y1, C2, C3 }`.
    Asn1C1C2C3,
    /// ASN.1 `SEQUENCE { x1, y1, C3, C2 }`.
    Asn1C1C3C2,
}

impl Mode {
    pub(crate) fn is_asn1(self) -> bool {
        matches!(self, Mode::Asn1C1C2C3 | Mode::Asn1C1C3C2)
    }

    pub(crate) fn c3_before_c2(self) -> bool {
        matches!(self, Mode::C1C3C2 | Mode::Asn1C1C3C2)
    }
}

/// Derive a keystream from `x2 || y2` with the SM3-based KDF and XOR it into
/// `out`: `out[i] = input[i] ^ KDF(x2 || y2, len)[i]`.
///
/// The counter is 32-bit big-endian starting at 1, one SM3 block per 32
/// output bytes. Returns whether any keystream byte was non-zero; callers
/// treat an all-zero stream as usable (the probability is negligible and the
/// plaintext length is preserved either way).
pub(crate) fn kdf_xor(x2: &[u8; 32], y2: &[u8; 32], input: &[u8], out: &mut [u8]) -> bool {
    debug_assert_eq!(input.len(), out.len());

    let mut counter: u32 = 1;
    let mut offset = 0;
    let mut nonzero = false;

    while offset < input.len() {
        let mut sm3 = Sm3::new();
        sm3.update(x2);
        sm3.update(y2);
        sm3.update(counter.to_be_bytes());
        let block: [u8; 32] = sm3.finalize().into();

        let take = usize::min(block.len(), input.len() - offset);
        for i in 0..take {
            nonzero |= block[i] != 0;
            out[offset + i] = input[offset + i] ^ block[i];
        }
        offset += take;
        counter = counter.wrapping_add(1);
    }

    nonzero
}

/// Compute the tag `C3 = SM3(x2 || M || y2)`.
pub(crate) fn mac(x2: &[u8; 32], msg: &[u8], y2: &[u8; 32]) -> [u8; 32] {
    let mut sm3 = Sm3::new();
    sm3.update(x2);
    sm3.update(msg);
    sm3.update(y2);
    sm3.finalize().into()
}

/// Empty raw ciphertext: the lone envelope byte.
pub(crate) const EMPTY_RAW: &[u8] = &[0x04];

/// Empty DER ciphertext: an empty SEQUENCE.
pub(crate) const EMPTY_ASN1: &[u8] = &[0x30, 0x00];

/// DER ciphertext envelope: `SEQUENCE { INTEGER x1, INTEGER y1,
/// OCTET STRING a, OCTET STRING b }` where `(a, b)` is `(C2, C3)` or
/// `(C3, C2)` depending on the order selector.
pub(crate) struct CipherRef<'a> {
    pub(crate) x: UintRef<'a>,
    pub(crate) y: UintRef<'a>,
    pub(crate) first: OctetStringRef<'a>,
    pub(crate) second: OctetStringRef<'a>,
}

impl EncodeValue for CipherRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.x.encoded_len()?
            + self.y.encoded_len()?
            + self.first.encoded_len()?
            + self.second.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.x.encode(writer)?;
        self.y.encode(writer)?;
        self.first.encode(writer)?;
        self.second.encode(writer)
    }
}

impl<'a> DecodeValue<'a> for CipherRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                x: UintRef::decode(reader)?,
                y: UintRef::decode(reader)?,
                first: OctetStringRef::decode(reader)?,
                second: OctetStringRef::decode(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for CipherRef<'a> {}

impl<'a> CipherRef<'a> {
    pub(crate) fn from_slice(bytes: &'a [u8]) -> Result<Self> {
        Ok(Self::from_der(bytes)?)
    }

    pub(crate) fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(self.to_der()?)
    }
}

/// Recover a 32-byte big-endian coordinate from a DER INTEGER.
pub(crate) fn coordinate_bytes(value: &UintRef<'_>) -> Result<[u8; 32]> {
    let bytes = value.as_bytes();
    if bytes.len() > 32 {
        return Err(Error::Syntax);
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(padded)
}

/// Strip leading zero bytes for minimal DER INTEGER encoding, keeping at
/// least one byte.
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic_and_position_dependent() {
        let x2 = [1u8; 32];
        let y2 = [2u8; 32];
        let input = [0u8; 70];
        let mut a = [0u8; 70];
        let mut b = [0u8; 70];
        assert!(kdf_xor(&x2, &y2, &input, &mut a));
        assert!(kdf_xor(&x2, &y2, &input, &mut b));
        assert_eq!(a, b);
        // distinct counter blocks
        assert_ne!(a[..32], a[32..64]);
    }

    #[test]
    fn kdf_xor_round_trips() {
        let x2 = [3u8; 32];
        let y2 = [4u8; 32];
        let msg = b"attack at dawn";
        let mut masked = vec![0u8; msg.len()];
        kdf_xor(&x2, &y2, msg, &mut masked);
        assert_ne!(&masked[..], &msg[..]);
        let mut unmasked = vec![0u8; msg.len()];
        kdf_xor(&x2, &y2, &masked, &mut unmasked);
        assert_eq!(&unmasked[..], &msg[..]);
    }

    #[test]
    fn trim_keeps_one_byte_for_zero() {
        assert_eq!(trim_leading_zeros(&[0, 0, 0]), &[0][..]);
        assert_eq!(trim_leading_zeros(&[0, 1, 2]), &[1, 2][..]);
        assert_eq!(trim_leading_zeros(&[9]), &[9][..]);
    }
}
