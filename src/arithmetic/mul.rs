//! Scalar multiplication using windowed non-adjacent form (wNAF).
//!
//! Variable-base multiplication builds a table of odd multiples of the point
//! per call; base-point multiplication fetches the table from a process-wide
//! cache keyed by window width. Tables are immutable once published.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::affine::AffinePoint;
use super::jacobian::JacobianPoint;
use super::scalar::Scalar;

/// Smallest supported window width.
pub(crate) const MIN_WINDOW: usize = 2;

/// Largest supported window width.
pub(crate) const MAX_WINDOW: usize = 6;

/// Window width used when none is configured.
pub(crate) const DEFAULT_WINDOW: usize = 4;

/// Precomputed tables of odd multiples of the base point, one per window
/// width, built on first use and kept for the process lifetime.
static BASE_TABLES: RwLock<BTreeMap<usize, Arc<Vec<JacobianPoint>>>> =
    RwLock::new(BTreeMap::new());

pub(crate) const fn clamp_window(window: usize) -> usize {
    if window >= MIN_WINDOW && window <= MAX_WINDOW {
        window
    } else {
        DEFAULT_WINDOW
    }
}

/// Recode a scalar into wNAF digits, least significant first.
///
/// Each digit is zero or an odd value in `[-(2^w - 1), 2^w - 1]`, with at
/// most one non-zero digit in any `w` consecutive positions.
pub(crate) fn wnaf(k: &Scalar, window: usize) -> Vec<i8> {
    let window = clamp_window(window);
    let mask = (1u64 << window) - 1;
    let half = 1i16 << (window - 1);
    let full = 1i16 << window;

    // one spare limb: subtracting a negative digit can carry past 2^256
    let mut limbs = [k.0[0], k.0[1], k.0[2], k.0[3], 0u64];
    let mut digits = Vec::with_capacity(257);

    while limbs.iter().any(|&limb| limb != 0) {
        let digit = if limbs[0] & 1 == 1 {
            let mut d = (limbs[0] & mask) as i16;
            if d >= half {
                d -= full;
            }
            if d >= 0 {
                sub_small(&mut limbs, d as u64);
            } else {
                add_small(&mut limbs, (-d) as u64);
            }
            d as i8
        } else {
            0
        };
        digits.push(digit);
        shr1(&mut limbs);
    }

    digits
}

fn sub_small(limbs: &mut [u64; 5], value: u64) {
    let (r, mut borrow) = limbs[0].overflowing_sub(value);
    limbs[0] = r;
    for limb in &mut limbs[1..] {
        let (r, b) = limb.overflowing_sub(borrow as u64);
        *limb = r;
        borrow = b;
    }
}

fn add_small(limbs: &mut [u64; 5], value: u64) {
    let (r, mut carry) = limbs[0].overflowing_add(value);
    limbs[0] = r;
    for limb in &mut limbs[1..] {
        let (r, c) = limb.overflowing_add(carry as u64);
        *limb = r;
        carry = c;
    }
}

fn shr1(limbs: &mut [u64; 5]) {
    for i in 0..4 {
        limbs[i] = (limbs[i] >> 1) | (limbs[i + 1] << 63);
    }
    limbs[4] >>= 1;
}

/// Table of the odd multiples `P, 3P, 5P, ..., (2^w - 1)P`.
fn odd_multiples(point: &JacobianPoint, window: usize) -> Vec<JacobianPoint> {
    let count = 1 << (window - 1);
    let mut table = Vec::with_capacity(count);
    table.push(*point);
    let twice = point.double();
    for i in 1..count {
        let next = table[i - 1].add(&twice);
        table.push(next);
    }
    table
}

/// Left-to-right double-and-add over the recoded digits.
fn mul_with_table(table: &[JacobianPoint], digits: &[i8]) -> JacobianPoint {
    let mut acc = JacobianPoint::IDENTITY;
    for &digit in digits.iter().rev() {
        acc = acc.double();
        if digit > 0 {
            acc = acc.add(&table[digit as usize / 2]);
        } else if digit < 0 {
            acc = acc.add(&table[(-digit) as usize / 2].negate());
        }
    }
    acc
}

/// Compute `k * P`.
pub(crate) fn scalar_mul(point: &AffinePoint, k: &Scalar, window: usize) -> AffinePoint {
    if point.is_identity() || bool::from(k.is_zero()) {
        return AffinePoint::IDENTITY;
    }
    let window = clamp_window(window);
    let table = odd_multiples(&JacobianPoint::from_affine(point), window);
    mul_with_table(&table, &wnaf(k, window)).to_affine()
}

/// Compute `k * G` using the cached base-point table for `window`.
pub(crate) fn scalar_base_mul(k: &Scalar, window: usize) -> AffinePoint {
    if bool::from(k.is_zero()) {
        return AffinePoint::IDENTITY;
    }
    let window = clamp_window(window);
    let table = base_table(window);
    mul_with_table(&table, &wnaf(k, window)).to_affine()
}

/// Look up (or build) the base-point table for a window width.
///
/// Double-checked: probe under the read lock, then re-check under the write
/// lock before computing, so concurrent requests for a fresh width build the
/// table exactly once and readers only ever observe a complete table.
fn base_table(window: usize) -> Arc<Vec<JacobianPoint>> {
    if let Some(table) = BASE_TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&window)
    {
        return table.clone();
    }

    let mut tables = BASE_TABLES.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(table) = tables.get(&window) {
        return table.clone();
    }
    let table = Arc::new(odd_multiples(
        &JacobianPoint::from_affine(&AffinePoint::GENERATOR),
        window,
    ));
    tables.insert(window, table.clone());
    table
}
