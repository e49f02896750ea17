// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Least-squares fitting of a quadratic Bézier to a short run of points.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::{Point, QuadBez, Vec2};

/// Fit a quadratic Bézier to an ordered sequence of points.
///
/// The points are assigned uniformly spaced parameters `t_j = j / (m - 1)`,
/// and the result is the quadratic minimizing the sum of squared distances
/// `|q(t_j) - p_j|²`. In other words, evaluating the result at `t_j` gives
/// the regressed position of `points[j]`.
///
/// With a single point the result is a constant curve, with two points it is
/// the straight segment between them, and with three points it interpolates
/// them exactly. This never fails; an empty slice gives a constant curve at
/// the origin.
pub fn fit_quadratic(points: &[Point]) -> QuadBez {
    let m = points.len();
    match m {
        0 => QuadBez::constant(Point::ORIGIN),
        1 => QuadBez::constant(points[0]),
        2 => QuadBez::from_coeffs(points[0], points[1] - points[0], Vec2::ZERO),
        _ => {
            // Power sums of the parameters, s[k] = sum(t^k).
            let mut s = [0.0; 5];
            // Moments of the points, r[k] = sum(t^k p).
            let mut r = [Vec2::ZERO; 3];
            let step = 1.0 / (m - 1) as f64;
            for (j, p) in points.iter().enumerate() {
                let t = j as f64 * step;
                let mut tk = 1.0;
                for (k, sk) in s.iter_mut().enumerate() {
                    *sk += tk;
                    if k < 3 {
                        r[k] += tk * p.to_vec2();
                    }
                    tk *= t;
                }
            }
            // The normal equations form a symmetric Hankel system; solve it
            // through its adjugate.
            let [a, b, c, d, e] = s;
            let c00 = c * e - d * d;
            let c01 = c * d - b * e;
            let c02 = b * d - c * c;
            let c11 = a * e - c * c;
            let c12 = b * c - a * d;
            let c22 = a * c - b * b;
            let det = a * c00 + b * c01 + c * c02;
            if !det.is_finite() || det.abs() <= 1e-12 {
                // Only reachable with non-finite input.
                return QuadBez::from_coeffs(points[0], points[m - 1] - points[0], Vec2::ZERO);
            }
            let det_recip = det.recip();
            let k0 = (c00 * r[0] + c01 * r[1] + c02 * r[2]) * det_recip;
            let k1 = (c01 * r[0] + c11 * r[1] + c12 * r[2]) * det_recip;
            let k2 = (c02 * r[0] + c12 * r[1] + c22 * r[2]) * det_recip;
            QuadBez::from_coeffs(k0.to_point(), k1, k2)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{fit_quadratic, ParamCurve, Point};

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn fit_degenerate_inputs() {
        let p = Point::new(3.0, 4.0);
        let q = fit_quadratic(&[p]);
        assert_near(q.eval(0.0), p);
        assert_near(q.eval(0.7), p);

        let q = fit_quadratic(&[Point::new(0.0, 0.0), Point::new(2.0, 2.0)]);
        assert_near(q.eval(0.5), Point::new(1.0, 1.0));
    }

    #[test]
    fn fit_interpolates_three_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(4.0, -1.0),
        ];
        let q = fit_quadratic(&pts);
        assert_near(q.eval(0.0), pts[0]);
        assert_near(q.eval(0.5), pts[1]);
        assert_near(q.eval(1.0), pts[2]);
    }

    #[test]
    fn fit_reproduces_parabola() {
        // Points on x = t, y = t^2 at uniform parameters are fit exactly.
        let pts: Vec<Point> = (0..5)
            .map(|j| {
                let t = j as f64 / 4.0;
                Point::new(t, t * t)
            })
            .collect();
        let q = fit_quadratic(&pts);
        for (j, p) in pts.iter().enumerate() {
            assert_near(q.eval(j as f64 / 4.0), *p);
        }
    }

    #[test]
    fn fit_smooths_noise() {
        // A zigzag around the x axis regresses toward the axis.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.5),
            Point::new(2.0, -0.5),
            Point::new(3.0, 0.5),
            Point::new(4.0, 0.0),
        ];
        let q = fit_quadratic(&pts);
        let mid = q.eval(0.5);
        assert!(mid.y.abs() < 0.5);
        assert!((mid.x - 2.0).abs() < 1e-9);
    }
}
