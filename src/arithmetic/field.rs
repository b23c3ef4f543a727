//! Field arithmetic modulo p = 0xfffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff
//!
//! Elements are four little-endian 64-bit limbs, fully reduced into `[0, p)`
//! after every public operation. Multiplication is schoolbook 4x4 followed by
//! a wide reduction exploiting `2^256 = 2^224 + 2^96 - 2^64 + 1 (mod p)`;
//! inversion is Fermat's little theorem and is not constant-time, which is
//! acceptable here because it only ever runs on curve coordinates.

use core::fmt::{self, Debug};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::{Choice, ConstantTimeEq};

use super::reduce;
use super::util;

/// p, the SM2 base field modulus.
pub(crate) const MODULUS: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_0000_0000,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
];

/// 2^256 mod p = 2^224 + 2^96 - 2^64 + 1.
const FOLD: [u64; 4] = [1, 0x0000_0000_FFFF_FFFF, 0, 0x0000_0001_0000_0000];

/// p - 2, the Fermat inversion exponent.
const MODULUS_MINUS_2: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFD,
    0xFFFF_FFFF_0000_0000,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
];

/// Element of the SM2 elliptic curve base field used for curve point
/// coordinates.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl FieldElement {
    /// Additive identity.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Coefficient `a = p - 3` of the curve equation.
    pub const EQUATION_A: Self = Self([
        0xFFFF_FFFF_FFFF_FFFC,
        0xFFFF_FFFF_0000_0000,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFE_FFFF_FFFF,
    ]);

    /// Coefficient `b` of the curve equation.
    pub const EQUATION_B: Self = Self([
        0xDDBC_BD41_4D94_0E93,
        0xF397_89F5_15AB_8F92,
        0x4D5A_9E4B_CF65_09A7,
        0x28E9_FA9E_9D9F_5E34,
    ]);

    /// Parse a field element from a big-endian byte encoding.
    ///
    /// Values greater than or equal to the modulus are reduced.
    pub const fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(reduce::reduce_once(&util::from_be_bytes(bytes), &MODULUS))
    }

    /// Serialize as a big-endian byte encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        util::to_be_bytes(&self.0)
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Add one field element to another.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(reduce::mod_add(&self.0, &rhs.0, &MODULUS))
    }

    /// Double this field element.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Subtract one field element from another.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(reduce::mod_sub(&self.0, &rhs.0, &MODULUS))
    }

    /// Multiply two field elements.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(reduce::mod_mul(&self.0, &rhs.0, &MODULUS, &FOLD))
    }

    /// Square this field element.
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Negate: zero stays zero, anything else maps to `p - self`.
    pub const fn negate(&self) -> Self {
        Self(reduce::mod_sub(&Self::ZERO.0, &self.0, &MODULUS))
    }

    /// Multiplicative inverse via Fermat's little theorem; by convention the
    /// inverse of zero is zero.
    ///
    /// Not constant-time.
    pub fn invert(&self) -> Self {
        Self(reduce::pow_vartime(
            &self.0,
            &MODULUS_MINUS_2,
            &MODULUS,
            &FOLD,
        ))
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement::add(&self, &rhs)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: FieldElement) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &rhs)
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: FieldElement) {
        *self = *self - rhs;
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement::mul(&self, &rhs)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: FieldElement) {
        *self = *self * rhs;
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}
