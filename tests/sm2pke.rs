//! SM2 public-key encryption tests.

use proptest::prelude::*;
use rand_core::OsRng;
use sm2p256::{Error, SecretKey, pke::Mode};

const MODES: [Mode; 4] = [
    Mode::C1C2C3,
    Mode::C1C3C2,
    Mode::Asn1C1C2C3,
    Mode::Asn1C1C3C2,
];

fn keypair() -> SecretKey {
    let mut d = [0u8; 32];
    d[31] = 1;
    SecretKey::from_slice(&d).unwrap()
}

#[test]
fn round_trip_all_modes() {
    let secret = keypair();
    let public = secret.public_key();
    let msg = b"hello world";

    for mode in MODES {
        let ciphertext = public.encrypt(&mut OsRng, msg, mode).unwrap();
        let recovered = secret.decrypt(&ciphertext, mode).unwrap();
        assert_eq!(recovered, msg, "mode {mode:?}");
    }
}

#[test]
fn raw_envelope_shape() {
    let secret = keypair();
    let msg = b"hello world";
    let ciphertext = secret
        .public_key()
        .encrypt(&mut OsRng, msg, Mode::C1C3C2)
        .unwrap();
    assert_eq!(ciphertext[0], 0x04);
    assert_eq!(ciphertext.len(), 1 + 64 + 32 + msg.len());
}

#[test]
fn asn1_envelope_shape() {
    let secret = keypair();
    let ciphertext = secret
        .public_key()
        .encrypt(&mut OsRng, b"abc", Mode::Asn1C1C3C2)
        .unwrap();
    assert_eq!(ciphertext[0], 0x30);
}

#[test]
fn empty_plaintext() {
    let secret = keypair();
    let public = secret.public_key();

    for mode in [Mode::C1C2C3, Mode::C1C3C2] {
        let ciphertext = public.encrypt(&mut OsRng, b"", mode).unwrap();
        assert_eq!(ciphertext, vec![0x04]);
        assert_eq!(secret.decrypt(&ciphertext, mode).unwrap(), Vec::<u8>::new());
    }
    for mode in [Mode::Asn1C1C2C3, Mode::Asn1C1C3C2] {
        let ciphertext = public.encrypt(&mut OsRng, b"", mode).unwrap();
        assert_eq!(ciphertext, vec![0x30, 0x00]);
        assert_eq!(secret.decrypt(&ciphertext, mode).unwrap(), Vec::<u8>::new());
    }
}

#[test]
fn corrupted_last_byte_fails_mac() {
    let secret = keypair();
    let public = secret.public_key();
    let msg = b"hello world";

    for mode in [Mode::C1C2C3, Mode::C1C3C2] {
        let mut ciphertext = public.encrypt(&mut OsRng, msg, mode).unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0xFF;
        assert!(
            matches!(secret.decrypt(&ciphertext, mode), Err(Error::MacMismatch)),
            "mode {mode:?}"
        );
    }
}

#[test]
fn truncated_ciphertext() {
    let secret = keypair();
    for mode in [Mode::C1C2C3, Mode::C1C3C2] {
        let short = [0x04u8; 50];
        assert!(matches!(
            secret.decrypt(&short, mode),
            Err(Error::Truncated)
        ));
    }
}

#[test]
fn asn1_garbage_is_syntax() {
    let secret = keypair();
    assert!(matches!(
        secret.decrypt(b"definitely not der", Mode::Asn1C1C3C2),
        Err(Error::Syntax)
    ));
}

#[test]
fn off_curve_c1_is_structural() {
    let secret = keypair();
    // plausible lengths, but C1 = (1, 1) is not on the curve
    let mut ciphertext = vec![0x04];
    let mut x1 = [0u8; 32];
    x1[31] = 1;
    ciphertext.extend_from_slice(&x1);
    ciphertext.extend_from_slice(&x1);
    ciphertext.extend_from_slice(&[0u8; 32]); // C3
    ciphertext.extend_from_slice(b"junk"); // C2
    assert!(matches!(
        secret.decrypt(&ciphertext, Mode::C1C3C2),
        Err(Error::Structural)
    ));
}

#[test]
fn mode_mismatch_fails_mac() {
    let secret = keypair();
    let ciphertext = secret
        .public_key()
        .encrypt(&mut OsRng, b"hello world", Mode::C1C2C3)
        .unwrap();
    assert!(secret.decrypt(&ciphertext, Mode::C1C3C2).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn round_trip_random_messages(msg in proptest::collection::vec(any::<u8>(), 0..200)) {
        let secret = keypair();
        let public = secret.public_key();
        for mode in [Mode::C1C3C2, Mode::Asn1C1C2C3] {
            let ciphertext = public.encrypt(&mut OsRng, &msg, mode).unwrap();
            prop_assert_eq!(secret.decrypt(&ciphertext, mode).unwrap(), msg.clone());
        }
    }
}
