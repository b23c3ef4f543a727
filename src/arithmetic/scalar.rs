//! Scalars are elements in the finite field modulo the group order `n`.

use core::fmt::{self, Debug};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use super::reduce;
use super::util;

/// n, the order of the SM2 elliptic curve group.
pub(crate) const ORDER: [u64; 4] = [
    0x53BB_F409_39D5_4123,
    0x7203_DF6B_21C6_052B,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
];

/// 2^256 mod n.
const FOLD: [u64; 4] = [
    0xAC44_0BF6_C62A_BEDD,
    0x8DFC_2094_DE39_FAD4,
    0x0000_0000_0000_0000,
    0x0000_0001_0000_0000,
];

/// n - 2, the Fermat inversion exponent.
const ORDER_MINUS_2: [u64; 4] = [
    0x53BB_F409_39D5_4121,
    0x7203_DF6B_21C6_052B,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
];

/// Integer modulo the SM2 group order `n`.
#[derive(Clone, Copy)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Scalar {
    /// Zero.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// One.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Parse a scalar from its canonical big-endian byte encoding.
    ///
    /// Returns `None` for values greater than or equal to `n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let limbs = util::from_be_bytes(bytes);
        let (_, borrow) = reduce::sub(&limbs, &ORDER);
        // a borrow means the value is canonical
        (borrow != 0).then_some(Self(limbs))
    }

    /// Parse a 256-bit big-endian value and reduce it modulo `n`.
    ///
    /// A single conditional subtraction suffices since the input is below
    /// `2n`.
    pub fn reduce_bytes(bytes: &[u8; 32]) -> Self {
        Self(reduce::reduce_once(&util::from_be_bytes(bytes), &ORDER))
    }

    /// Reduce an arbitrary-length big-endian byte string modulo `n`.
    ///
    /// The empty string reduces to zero.
    pub fn reduce_be_slice(bytes: &[u8]) -> Self {
        let mut acc = Self::ZERO;
        for &byte in bytes {
            for _ in 0..8 {
                acc = acc + acc;
            }
            acc = acc + Self([byte as u64, 0, 0, 0]);
        }
        acc
    }

    /// Serialize as a big-endian byte encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        util::to_be_bytes(&self.0)
    }

    /// Determine if this scalar is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Add one scalar to another.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(reduce::mod_add(&self.0, &rhs.0, &ORDER))
    }

    /// Subtract one scalar from another.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(reduce::mod_sub(&self.0, &rhs.0, &ORDER))
    }

    /// Multiply two scalars.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(reduce::mod_mul(&self.0, &rhs.0, &ORDER, &FOLD))
    }

    /// Multiplicative inverse via Fermat's little theorem; by convention the
    /// inverse of zero is zero.
    ///
    /// Not constant-time.
    pub fn invert(&self) -> Self {
        Self(reduce::pow_vartime(&self.0, &ORDER_MINUS_2, &ORDER, &FOLD))
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(&self, &rhs)
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = *self + rhs;
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::sub(&self, &rhs)
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = *self - rhs;
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul(&self, &rhs)
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
