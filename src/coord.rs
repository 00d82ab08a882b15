//! The numeric bound shared by every coordinate type the kernel accepts.

use std::fmt::Debug;

use num_traits::{Num, NumCast};

/// A scalar usable as a path coordinate.
///
/// The kernel is written once, generic over this trait, so `Path<f64>` and
/// `Path<i32>` share one implementation. All internal computation (curve
/// flattening, crossing tests, projections) happens in `f64`; values of the
/// coordinate type only appear at the API boundary and when a computed point
/// is snapped back into the path's coordinate space.
pub trait Coordinate:
    Num + NumCast + PartialOrd + Copy + Default + Debug + 'static
{
    /// Widen to `f64` for internal computation.
    fn to_f64(self) -> f64;

    /// Snap an internally computed `f64` back to this coordinate type.
    ///
    /// The identity for floating-point types; rounds to the nearest value
    /// for integer types.
    fn from_f64(value: f64) -> Self;
}

impl Coordinate for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Coordinate for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Coordinate for i32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round() as i32
    }
}

impl Coordinate for i64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round() as i64
    }
}
