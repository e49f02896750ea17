// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use crate::Point;

/// Numerical tolerance below which two positions are considered equal.
pub(crate) const EPSILON: f64 = 1e-10;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("strokefit requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn atan2(self, other: Self) -> Self => atan2;
    fn floor(self) -> Self => floor;
    fn hypot(self, other: Self) -> Self => hypot;
    fn sin_cos(self) -> (Self, Self) => sincos;
}

/// The supplementary angle formed by three consecutive points.
///
/// This is the angle between the direction `p0 → p1` and the direction
/// `p1 → p2`, in the range `[0, π]`. Three aligned points going forward give
/// 0, a full reversal gives π. If either span has zero length, the angle is
/// 0.
pub fn supplementary_angle(p0: Point, p1: Point, p2: Point) -> f64 {
    let v1 = p1 - p0;
    let v2 = p2 - p1;
    if v1.hypot2() == 0.0 || v2.hypot2() == 0.0 {
        return 0.0;
    }
    v1.cross(v2).abs().atan2(v1.dot(v2))
}

/// Values that can be refined by the 4-point interpolatory subdivision
/// scheme of Dyn, Levin and Gregory.
///
/// Given four consecutive values `a, b, c, d`, the scheme inserts a new value
/// between `b` and `c`:
///
/// ```text
/// (1/2 + w) (b + c) - w (a + d)
/// ```
///
/// For `0 < w < 1/8` the limit curve is C¹. With `w = 1/16` the scheme
/// reproduces cubic polynomials.
pub trait FourPoint: Copy {
    /// The refinement value inserted between `b` and `c`, with tension `w`.
    fn four_point(a: Self, b: Self, c: Self, d: Self, w: f64) -> Self;
}

impl FourPoint for f64 {
    #[inline]
    fn four_point(a: f64, b: f64, c: f64, d: f64, w: f64) -> f64 {
        (0.5 + w) * (b + c) - w * (a + d)
    }
}

impl FourPoint for Point {
    #[inline]
    fn four_point(a: Self, b: Self, c: Self, d: Self, w: f64) -> Self {
        Self::new(
            f64::four_point(a.x, b.x, c.x, d.x, w),
            f64::four_point(a.y, b.y, c.y, d.y, w),
        )
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use crate::common::*;

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn supplementary_angle_aligned() {
        let a = supplementary_angle((0., 0.).into(), (1., 0.).into(), (3., 0.).into());
        assert_near(a, 0.0);
    }

    #[test]
    fn supplementary_angle_turns() {
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(1., 0.);
        assert_near(supplementary_angle(p0, p1, Point::new(1., 1.)), FRAC_PI_2);
        assert_near(supplementary_angle(p0, p1, Point::new(1., -1.)), FRAC_PI_2);
        assert_near(supplementary_angle(p0, p1, Point::new(2., 1.)), FRAC_PI_4);
        assert_near(supplementary_angle(p0, p1, Point::new(0., 0.)), PI);
    }

    #[test]
    fn supplementary_angle_degenerate() {
        let p = Point::new(2., 3.);
        assert_near(supplementary_angle(p, p, Point::new(5., 5.)), 0.0);
        assert_near(supplementary_angle(Point::ORIGIN, p, p), 0.0);
    }

    #[test]
    fn four_point_reproduces_cubics() {
        // Samples of t^3 at t = -1, 0, 1, 2; the midpoint value at t = 0.5 is 1/8.
        let v = f64::four_point(-1.0, 0.0, 1.0, 8.0, 1.0 / 16.0);
        assert_near(v, 0.125);
    }

    #[test]
    fn four_point_on_points() {
        let p = Point::four_point(
            Point::new(0., 0.),
            Point::new(1., 1.),
            Point::new(2., 1.),
            Point::new(3., 0.),
            1.0 / 16.0,
        );
        assert_near(p.x, 1.5);
        assert_near(p.y, 1.125);
    }
}
