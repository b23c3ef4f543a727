#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod dsa;
pub mod pke;

mod arithmetic;
mod codec;
mod curve;
mod distid;
mod error;
mod keys;

pub use crate::arithmetic::affine::AffinePoint;
pub use crate::arithmetic::field::FieldElement;
pub use crate::arithmetic::scalar::Scalar;
pub use crate::codec::{EC_PUBLIC_KEY_OID, SM2P256V1_OID};
pub use crate::curve::Sm2Curve;
pub use crate::distid::DEFAULT_UID;
pub use crate::error::{Error, Result};
pub use crate::keys::{PublicKey, SecretKey};

/// Base field modulus `p` serialized as hexadecimal.
pub const MODULUS_HEX: &str = "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

/// Order of the elliptic curve group `n` serialized as hexadecimal.
pub const ORDER_HEX: &str = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";

/// Curve coefficient `a = p - 3` serialized as hexadecimal.
pub const EQUATION_A_HEX: &str =
    "fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc";

/// Curve coefficient `b` serialized as hexadecimal.
pub const EQUATION_B_HEX: &str =
    "28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93";

/// Base point x-coordinate serialized as hexadecimal.
pub const GENERATOR_X_HEX: &str =
    "32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7";

/// Base point y-coordinate serialized as hexadecimal.
pub const GENERATOR_Y_HEX: &str =
    "bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0";

/// Cofactor of the curve group.
pub const COFACTOR: u64 = 1;
