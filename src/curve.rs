//! SM2 curve handle: window configuration, byte-level scalar multiplication,
//! and random scalar generation.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::mul::{self, DEFAULT_WINDOW, MAX_WINDOW, MIN_WINDOW};
use crate::arithmetic::scalar::Scalar;
use crate::error::Result;

/// Handle to the sm2p256v1 curve.
///
/// Carries the wNAF window width used for scalar multiplication; all other
/// state (the precomputed base-point tables) is shared process-wide.
/// Instances are cheap to create and copy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sm2Curve {
    window: usize,
}

impl Sm2Curve {
    /// Bit length of the base field and of the group order.
    pub const BITS: usize = 256;

    /// Create a curve handle with the default window width.
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Currently configured wNAF window width.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Set the wNAF window width.
    ///
    /// Widths outside `[2, 6]` are ignored and the previous value is kept.
    pub fn set_window(&mut self, window: usize) {
        if (MIN_WINDOW..=MAX_WINDOW).contains(&window) {
            self.window = window;
        }
    }

    /// Compute `k * P` for a big-endian scalar encoding of any length.
    ///
    /// An empty or zero `k`, or an identity `P`, yields the identity. The
    /// scalar is reduced modulo the group order, which is equivalent for
    /// every point on this prime-order curve.
    pub fn scalar_mult(&self, point: &AffinePoint, k: &[u8]) -> AffinePoint {
        mul::scalar_mul(point, &Scalar::reduce_be_slice(k), self.window)
    }

    /// Compute `k * G` for a big-endian scalar encoding of any length.
    pub fn scalar_base_mult(&self, k: &[u8]) -> AffinePoint {
        mul::scalar_base_mul(&Scalar::reduce_be_slice(k), self.window)
    }

    /// Draw a uniformly random scalar in `[1, n - 1]` by rejection sampling.
    ///
    /// Fails only if the underlying generator fails.
    pub fn rand_scalar(&self, rng: &mut impl CryptoRngCore) -> Result<Scalar> {
        // mask for curves whose bit size is not a whole number of bytes;
        // a no-op for the 256-bit SM2 field
        const TOP_BYTE_MASK: u8 = if Sm2Curve::BITS % 8 == 0 {
            0xFF
        } else {
            (1 << (Sm2Curve::BITS % 8)) - 1
        };

        loop {
            let mut bytes = [0u8; 32];
            rng.try_fill_bytes(&mut bytes)?;
            bytes[0] &= TOP_BYTE_MASK;
            let candidate = Scalar::from_bytes(&bytes);
            bytes.zeroize();
            if let Some(scalar) = candidate {
                if !bool::from(scalar.is_zero()) {
                    return Ok(scalar);
                }
            }
        }
    }
}

impl Default for Sm2Curve {
    fn default() -> Self {
        Self::new()
    }
}
