//! SM2DSA tests.

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sm2p256::{
    DEFAULT_UID, SecretKey,
    dsa::{Signature, SignatureFormat, SigningKey},
};

const MSG: &[u8] = b"testing";

const ORDER: [u8; 32] = hex!("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123");

fn signing_key_from(bytes: &[u8; 32]) -> SigningKey {
    SigningKey::from_slice(DEFAULT_UID, bytes).unwrap()
}

fn d_equals_one() -> SigningKey {
    let mut d = [0u8; 32];
    d[31] = 1;
    signing_key_from(&d)
}

#[test]
fn sign_and_verify_with_default_uid() {
    let sk = d_equals_one();
    let signature = sk.sign(&mut OsRng, MSG).unwrap();

    assert!(!signature.to_bytes().is_empty());
    assert!(sk.verifying_key().verify(MSG, &signature));
    assert!(!sk.verifying_key().verify(b"different", &signature));
}

#[test]
fn verify_fails_for_other_uid() {
    let mut d = [0u8; 32];
    d[31] = 5;
    let secret = SecretKey::from_slice(&d).unwrap();
    let sk = SigningKey::new(DEFAULT_UID, &secret).unwrap();
    let signature = sk.sign(&mut OsRng, MSG).unwrap();

    let other = SigningKey::new(b"someone-else", &secret).unwrap();
    assert!(!other.verifying_key().verify(MSG, &signature));
}

#[test]
fn der_round_trip() {
    let sk = d_equals_one();
    let signature = sk.sign(&mut OsRng, MSG).unwrap();

    let der = signature.to_der().unwrap();
    assert_eq!(der[0], 0x30);
    let decoded = Signature::from_der(&der).unwrap();
    assert_eq!(decoded, signature);
    assert!(sk.verifying_key().verify_bytes(MSG, &der, SignatureFormat::Asn1));
    assert!(
        sk.verifying_key()
            .verify_bytes(MSG, &signature.to_vec(SignatureFormat::Raw), SignatureFormat::Raw)
    );
}

#[test]
fn out_of_range_components_rejected() {
    let vk = d_equals_one();
    let vk = vk.verifying_key();

    let mut one = [0u8; 32];
    one[31] = 1;

    for (r, s) in [
        ([0u8; 32], one),  // r = 0
        (ORDER, one),      // r = n
        (one, [0u8; 32]),  // s = 0
        (one, ORDER),      // s = n
    ] {
        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&r);
        sig[32..].copy_from_slice(&s);
        assert!(Signature::from_slice(&sig, SignatureFormat::Raw).is_err());
        assert!(!vk.verify_bytes(MSG, &sig, SignatureFormat::Raw));
    }
}

#[test]
fn r_plus_s_congruent_to_zero_rejected() {
    let vk = d_equals_one();
    let vk = vk.verifying_key();

    // r = n - 1, s = 1, so t = r + s = 0 (mod n)
    let mut r = ORDER;
    r[31] -= 1;
    let mut sig = [0u8; 64];
    sig[..32].copy_from_slice(&r);
    sig[63] = 1;

    // both components parse as in-range scalars
    let signature = Signature::from_slice(&sig, SignatureFormat::Raw).unwrap();
    assert!(!vk.verify(MSG, &signature));
}

#[test]
fn window_does_not_change_validity() {
    let mut sk = d_equals_one();
    sk.set_window(2);
    let signature = sk.sign(&mut OsRng, MSG).unwrap();
    let mut vk = sk.verifying_key().clone();
    vk.set_window(6);
    assert!(vk.verify(MSG, &signature));
}

#[test]
fn d_equals_n_minus_one_rejected() {
    let mut d = ORDER;
    d[31] -= 1;
    assert!(SigningKey::from_slice(DEFAULT_UID, &d).is_err());
}

prop_compose! {
    fn signing_key()(bytes in any::<[u8; 32]>()) -> SigningKey {
        let mut bytes = bytes;
        // keep the scalar in range; zero stays invalid and is skipped below
        bytes[0] &= 0x7F;
        if bytes == [0u8; 32] {
            bytes[31] = 1;
        }
        signing_key_from(&bytes)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_and_verify(sk in signing_key()) {
        let signature = sk.sign(&mut OsRng, MSG).unwrap();
        prop_assert!(sk.verifying_key().verify(MSG, &signature));
    }

    #[test]
    fn reject_tampered_signature(sk in signing_key(), byte in 0usize..64, bit in 0usize..8) {
        let mut bytes = sk.sign(&mut OsRng, MSG).unwrap().to_bytes();
        bytes[byte] ^= 1 << bit;
        // the tweaked encoding either fails to parse or fails to verify
        prop_assert!(!sk.verifying_key().verify_bytes(MSG, &bytes, SignatureFormat::Raw));
    }
}
