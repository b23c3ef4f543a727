//! Jacobian curve points.
//!
//! `(X, Y, Z)` represents the affine point `(X/Z^2, Y/Z^3)`; `Z = 0` encodes
//! the point at infinity. The formulae fold in the curve's `a = -3`.

use super::affine::AffinePoint;
use super::field::FieldElement;

/// Point on the SM2 curve in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub(crate) struct JacobianPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl JacobianPoint {
    /// The additive identity, encoded with `Z = 0`.
    pub(crate) const IDENTITY: Self = Self {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    pub(crate) fn from_affine(point: &AffinePoint) -> Self {
        if point.is_identity() {
            return Self::IDENTITY;
        }
        Self {
            x: point.x(),
            y: point.y(),
            z: FieldElement::ONE,
        }
    }

    /// Project back to affine coordinates via `1/Z`.
    pub(crate) fn to_affine(&self) -> AffinePoint {
        if self.is_identity() {
            return AffinePoint::IDENTITY;
        }
        let z_inv = self.z.invert();
        let z_inv_sq = z_inv.square();
        AffinePoint::new_unchecked(self.x * z_inv_sq, self.y * z_inv_sq * z_inv)
    }

    pub(crate) fn is_identity(&self) -> bool {
        bool::from(self.z.is_zero())
    }

    pub(crate) fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.negate(),
            z: self.z,
        }
    }

    /// Point doubling.
    pub(crate) fn double(&self) -> Self {
        if self.is_identity() {
            return Self::IDENTITY;
        }

        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        // S = 2*((X + YY)^2 - XX - YYYY)
        let s = ((self.x + yy).square() - xx - yyyy).double();

        // M = 3*XX + a*ZZ^2 with a = -3
        let zzzz = zz.square();
        let m = xx.double() + xx - zzzz.double() - zzzz;

        // X' = M^2 - 2*S
        let x3 = m.square() - s.double();

        // Y' = M*(S - X') - 8*YYYY
        let y3 = m * (s - x3) - yyyy.double().double().double();

        // Z' = (Y + Z)^2 - YY - ZZ
        let z3 = (self.y + self.z).square() - yy - zz;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Point addition, with the identity, equal-input, and opposite-input
    /// cases handled explicitly.
    pub(crate) fn add(&self, rhs: &Self) -> Self {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * z2z2 * rhs.z;
        let s2 = rhs.y * z1z1 * self.z;

        if u1 == u2 {
            if s1 == s2 {
                return self.double();
            }
            return Self::IDENTITY;
        }

        let h = u2 - u1;
        let hh = h.square();
        let hhh = h * hh;
        let r = s2 - s1;

        let u1hh = u1 * hh;
        let x3 = r.square() - hhh - u1hh.double();
        let y3 = r * (u1hh - x3) - s1 * hhh;
        let z3 = self.z * rhs.z * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JacobianPoint;
    use crate::arithmetic::affine::AffinePoint;

    fn small_multiples(count: usize) -> Vec<AffinePoint> {
        let g = AffinePoint::GENERATOR;
        let mut points = Vec::with_capacity(count);
        let mut acc = g;
        for _ in 0..count {
            points.push(acc);
            acc = acc.add(&g);
        }
        points
    }

    #[test]
    fn identity_round_trip() {
        assert_eq!(
            JacobianPoint::IDENTITY.to_affine(),
            AffinePoint::IDENTITY
        );
        assert!(JacobianPoint::from_affine(&AffinePoint::IDENTITY).is_identity());
    }

    #[test]
    fn addition_matches_affine() {
        let points = small_multiples(8);
        for p in &points {
            for q in &points {
                let jac = JacobianPoint::from_affine(p)
                    .add(&JacobianPoint::from_affine(q))
                    .to_affine();
                assert_eq!(jac, p.add(q));
            }
        }
    }

    #[test]
    fn doubling_matches_affine() {
        for p in &small_multiples(8) {
            let jac = JacobianPoint::from_affine(p).double().to_affine();
            assert_eq!(jac, p.double());
        }
    }

    #[test]
    fn add_with_identity_and_opposite() {
        let g = JacobianPoint::from_affine(&AffinePoint::GENERATOR);
        assert_eq!(
            JacobianPoint::IDENTITY.add(&g).to_affine(),
            AffinePoint::GENERATOR
        );
        assert_eq!(
            g.add(&JacobianPoint::IDENTITY).to_affine(),
            AffinePoint::GENERATOR
        );
        assert!(g.add(&g.negate()).is_identity());
    }

    #[test]
    fn mixed_representation_addition() {
        // the same sum computed through different Z denominators
        let g = JacobianPoint::from_affine(&AffinePoint::GENERATOR);
        let g2 = g.double();
        let g3 = g2.add(&g);
        let g6a = g3.double();
        let g6b = g2.add(&g2).add(&g2);
        assert_eq!(g6a.to_affine(), g6b.to_affine());
    }
}
