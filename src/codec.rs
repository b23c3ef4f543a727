//! ASN.1 DER encodings for SM2 keys.
//!
//! Two envelopes are supported: SubjectPublicKeyInfo (SPKI) for public keys
//! and PKCS#8 `PrivateKeyInfo` wrapping an RFC 5915 `ECPrivateKey` for
//! private keys. Malformed DER surfaces as [`Error::Syntax`]; well-formed
//! DER carrying the wrong OIDs or versions surfaces as [`Error::Structural`].

use der::asn1::{BitStringRef, ContextSpecific, ObjectIdentifier, OctetStringRef};
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, TagMode,
    TagNumber, Writer,
};

use crate::arithmetic::affine::UNCOMPRESSED_LEN;
use crate::error::{Error, Result};

/// OID for elliptic curve public keys: `1.2.840.10045.2.1`.
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// OID for the SM2 recommended curve: `1.2.156.10197.1.301`.
pub const SM2P256V1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.156.10197.1.301");

/// PKCS#8 `PrivateKeyInfo` version (v1).
const PKCS8_VERSION: u8 = 0;

/// RFC 5915 `ECPrivateKey` version.
const EC_PRIVATE_KEY_VERSION: u8 = 1;

const PARAMETERS_TAG: TagNumber = TagNumber::N0;
const PUBLIC_KEY_TAG: TagNumber = TagNumber::N1;

/// X.509 `AlgorithmIdentifier` with the curve OID as parameters.
struct AlgorithmIdentifier {
    algorithm: ObjectIdentifier,
    parameters: ObjectIdentifier,
}

impl AlgorithmIdentifier {
    const SM2: Self = Self {
        algorithm: EC_PUBLIC_KEY_OID,
        parameters: SM2P256V1_OID,
    };

    fn check(&self) -> Result<()> {
        if self.algorithm != EC_PUBLIC_KEY_OID || self.parameters != SM2P256V1_OID {
            return Err(Error::Structural);
        }
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for AlgorithmIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                algorithm: reader.decode()?,
                parameters: reader.decode()?,
            })
        })
    }
}

impl EncodeValue for AlgorithmIdentifier {
    fn value_len(&self) -> der::Result<Length> {
        self.algorithm.encoded_len()? + self.parameters.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.algorithm.encode(writer)?;
        self.parameters.encode(writer)
    }
}

impl<'a> Sequence<'a> for AlgorithmIdentifier {}

/// X.509 `SubjectPublicKeyInfo`.
struct SubjectPublicKeyInfoRef<'a> {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitStringRef<'a>,
}

impl<'a> DecodeValue<'a> for SubjectPublicKeyInfoRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                algorithm: reader.decode()?,
                subject_public_key: reader.decode()?,
            })
        })
    }
}

impl EncodeValue for SubjectPublicKeyInfoRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.algorithm.encoded_len()? + self.subject_public_key.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.algorithm.encode(writer)?;
        self.subject_public_key.encode(writer)
    }
}

impl<'a> Sequence<'a> for SubjectPublicKeyInfoRef<'a> {}

/// PKCS#8 `PrivateKeyInfo`.
struct PrivateKeyInfoRef<'a> {
    version: u8,
    algorithm: AlgorithmIdentifier,
    private_key: OctetStringRef<'a>,
}

impl<'a> DecodeValue<'a> for PrivateKeyInfoRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                version: u8::decode(reader)?,
                algorithm: reader.decode()?,
                private_key: reader.decode()?,
            })
        })
    }
}

impl EncodeValue for PrivateKeyInfoRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.version.encoded_len()?
            + self.algorithm.encoded_len()?
            + self.private_key.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.version.encode(writer)?;
        self.algorithm.encode(writer)?;
        self.private_key.encode(writer)
    }
}

impl<'a> Sequence<'a> for PrivateKeyInfoRef<'a> {}

/// RFC 5915 `ECPrivateKey`.
///
/// The `[0]` curve parameters and `[1]` public key are written on encode and
/// treated as optional on parse; only the private scalar is required.
struct EcPrivateKeyRef<'a> {
    version: u8,
    private_key: OctetStringRef<'a>,
    parameters: Option<ObjectIdentifier>,
    public_key: Option<BitStringRef<'a>>,
}

impl<'a> EcPrivateKeyRef<'a> {
    fn parameters_field(&self) -> Option<ContextSpecific<ObjectIdentifier>> {
        self.parameters.map(|value| ContextSpecific {
            tag_number: PARAMETERS_TAG,
            tag_mode: TagMode::Explicit,
            value,
        })
    }

    fn public_key_field(&self) -> Option<ContextSpecific<BitStringRef<'a>>> {
        self.public_key.map(|value| ContextSpecific {
            tag_number: PUBLIC_KEY_TAG,
            tag_mode: TagMode::Explicit,
            value,
        })
    }
}

impl<'a> DecodeValue<'a> for EcPrivateKeyRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                version: u8::decode(reader)?,
                private_key: reader.decode()?,
                parameters: reader.context_specific(PARAMETERS_TAG, TagMode::Explicit)?,
                public_key: reader.context_specific(PUBLIC_KEY_TAG, TagMode::Explicit)?,
            })
        })
    }
}

impl EncodeValue for EcPrivateKeyRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = (self.version.encoded_len()? + self.private_key.encoded_len()?)?;
        if let Some(field) = self.parameters_field() {
            len = (len + field.encoded_len()?)?;
        }
        if let Some(field) = self.public_key_field() {
            len = (len + field.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.version.encode(writer)?;
        self.private_key.encode(writer)?;
        if let Some(field) = self.parameters_field() {
            field.encode(writer)?;
        }
        if let Some(field) = self.public_key_field() {
            field.encode(writer)?;
        }
        Ok(())
    }
}

impl<'a> Sequence<'a> for EcPrivateKeyRef<'a> {}

/// Encode an uncompressed public point as SPKI DER.
pub(crate) fn encode_spki(point: &[u8; UNCOMPRESSED_LEN]) -> Result<Vec<u8>> {
    let spki = SubjectPublicKeyInfoRef {
        algorithm: AlgorithmIdentifier::SM2,
        subject_public_key: BitStringRef::from_bytes(point)?,
    };
    Ok(spki.to_der()?)
}

/// Decode SPKI DER into the raw uncompressed point bytes.
///
/// Rejects wrong OIDs and anything that is not a 65-byte `0x04`-tagged
/// point; the caller is responsible for the on-curve check.
pub(crate) fn decode_spki(input: &[u8]) -> Result<[u8; UNCOMPRESSED_LEN]> {
    let spki = SubjectPublicKeyInfoRef::from_der(input)?;
    spki.algorithm.check()?;

    let bytes = spki.subject_public_key.as_bytes().ok_or(Error::Syntax)?;
    let point: [u8; UNCOMPRESSED_LEN] = bytes.try_into().map_err(|_| Error::Structural)?;
    if point[0] != 0x04 {
        return Err(Error::Structural);
    }
    Ok(point)
}

/// Encode a private scalar and its public point as PKCS#8 DER.
pub(crate) fn encode_pkcs8(d: &[u8; 32], point: &[u8; UNCOMPRESSED_LEN]) -> Result<Vec<u8>> {
    let ec_key = EcPrivateKeyRef {
        version: EC_PRIVATE_KEY_VERSION,
        private_key: OctetStringRef::new(d)?,
        parameters: Some(SM2P256V1_OID),
        public_key: Some(BitStringRef::from_bytes(point)?),
    };
    let ec_key_der = ec_key.to_der()?;

    let info = PrivateKeyInfoRef {
        version: PKCS8_VERSION,
        algorithm: AlgorithmIdentifier::SM2,
        private_key: OctetStringRef::new(&ec_key_der)?,
    };
    Ok(info.to_der()?)
}

/// Decode PKCS#8 DER into the raw 32-byte private scalar.
///
/// The inner `[0]`/`[1]` fields are accepted when present but not validated;
/// range-checking the scalar is the caller's job.
pub(crate) fn decode_pkcs8(input: &[u8]) -> Result<[u8; 32]> {
    let info = PrivateKeyInfoRef::from_der(input)?;
    if info.version != PKCS8_VERSION {
        return Err(Error::Structural);
    }
    info.algorithm.check()?;

    let ec_key = EcPrivateKeyRef::from_der(info.private_key.as_bytes())?;
    if ec_key.version != EC_PRIVATE_KEY_VERSION {
        return Err(Error::Structural);
    }
    ec_key
        .private_key
        .as_bytes()
        .try_into()
        .map_err(|_| Error::Structural)
}
