//! ASN.1 DER encoding for SM2 signatures.

use der::asn1::UintRef;
use der::{Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer};

use crate::arithmetic::scalar::Scalar;
use crate::error::{Error, Result};

/// `SEQUENCE { INTEGER r, INTEGER s }`.
struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.r.encode(writer)?;
        self.s.encode(writer)
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                r: UintRef::decode(reader)?,
                s: UintRef::decode(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

/// Encode `(r, s)` as DER.
pub(super) fn encode(r: &Scalar, s: &Scalar) -> Result<Vec<u8>> {
    let r_bytes = r.to_bytes();
    let s_bytes = s.to_bytes();
    let sig = SignatureRef {
        r: UintRef::new(&r_bytes)?,
        s: UintRef::new(&s_bytes)?,
    };
    Ok(sig.to_der()?)
}

/// Decode DER into canonical non-zero `(r, s)` scalars.
pub(super) fn decode(bytes: &[u8]) -> Result<(Scalar, Scalar)> {
    let sig = SignatureRef::from_der(bytes)?;
    Ok((scalar_from_uint(&sig.r)?, scalar_from_uint(&sig.s)?))
}

fn scalar_from_uint(value: &UintRef<'_>) -> Result<Scalar> {
    let bytes = value.as_bytes();
    if bytes.len() > 32 {
        return Err(Error::Syntax);
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);

    let scalar = Scalar::from_bytes(&padded).ok_or(Error::Syntax)?;
    if bool::from(scalar.is_zero()) {
        return Err(Error::Syntax);
    }
    Ok(scalar)
}
