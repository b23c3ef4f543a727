//! Pure Rust implementation of field and group operations on the SM2
//! elliptic curve.
//!
//! Curve parameters can be found in [draft-shen-sm2-ecdsa Appendix D]:
//! Recommended Parameters.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod jacobian;
pub(crate) mod mul;
pub(crate) mod reduce;
pub(crate) mod scalar;
pub(crate) mod util;
