//! Affine transforms.

use std::ops::{Mul, MulAssign};

use crate::{Coordinate, Point, Vec2};

/// A 2D affine transform, represented as six coefficients
/// `[a, b, c, d, e, f]` mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Construct an affine transform from coefficients.
    #[inline]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing rotation of `th` radians.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let s = th.sin();
        let c = th.cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline]
    pub fn translate<V: Into<Vec2>>(v: V) -> Affine {
        let v = v.into();
        Affine([1.0, 0.0, 0.0, 1.0, v.x, v.y])
    }

    /// The transform's coefficients.
    #[inline]
    pub const fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Whether this is exactly the identity transform.
    ///
    /// Iterator construction uses this to skip per-coordinate work when the
    /// caller passes an identity transform.
    #[inline]
    pub fn is_identity(self) -> bool {
        self.0 == Self::IDENTITY.0
    }

    /// Apply the transform to a point of any coordinate type.
    ///
    /// The point is widened to `f64`, transformed, and snapped back; for
    /// `f64` points this is exact.
    #[inline]
    pub fn apply<T: Coordinate>(self, p: Point<T>) -> Point<T> {
        Point::from_f64(self * p.to_f64())
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point<f64>> for Affine {
    type Output = Point<f64>;

    #[inline]
    fn mul(self, other: Point<f64>) -> Point<f64> {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}
