// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense sampling of the curve through a sequence of knots.
//!
//! Each segment between two consecutive knots `C` and `D` is sampled by
//! refining the six knots `A B C D E F` around it with the 4-point scheme
//! (see [`FourPoint`]). Corners act as walls: a neighbor lookup never
//! crosses a corner, and the corner knot is repeated in place of what lies
//! beyond it. The curve is therefore C¹ through smooth knots and may turn
//! abruptly at corners, where a fan of extra samples sweeps the tangent from
//! the incoming to the outgoing direction.

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::common::{supplementary_angle, FourPoint, EPSILON};
use crate::{Knot, Point, Vec2};

/// Tension of the 4-point scheme.
const TENSION: f64 = 1.0 / 16.0;

/// Number of refinement steps per segment.
const STEPS: usize = 3;

/// Index of `C` in a refined neighborhood.
const FIRST: usize = 2;

/// Index of `D` in a refined neighborhood.
///
/// Each step maps `p` values to `2p - 5`, so `6 → 7 → 9 → 13`, with `C` and
/// `D` ending up `2^STEPS` positions apart.
const LAST: usize = FIRST + (1 << STEPS);

/// Smallest angular step of a corner fan, capping a fan at 1024 samples.
const MIN_FAN_STEP: f64 = PI / 1024.0;

/// A point on the fitted curve, with its local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Position of the sample.
    pub position: Point,
    /// Stroke width at the sample.
    pub width: f64,
    /// Unit direction of travel.
    pub tangent: Vec2,
    /// Unit normal, the tangent turned by 90 degrees.
    pub normal: Vec2,
    /// Cumulative distance along the curve from its first sample.
    pub arclength: f64,
    /// Supplementary angle formed with the neighboring samples, in radians.
    ///
    /// This is 0 for the first and last sample.
    pub angle: f64,
}

impl Sample {
    fn at(position: Point, width: f64, arclength: f64) -> Self {
        Self {
            position,
            width,
            tangent: Vec2::X,
            normal: Vec2::X.turn_90(),
            arclength,
            angle: 0.0,
        }
    }

    #[inline]
    fn set_tangent(&mut self, tangent: Vec2) {
        self.tangent = tangent;
        self.normal = tangent.turn_90();
    }

    /// The point on the stroke outline on the given side of this sample.
    ///
    /// `side` is `1.0` for the side the normal points to and `-1.0` for the
    /// opposite side; intermediate values interpolate across the stroke.
    ///
    /// ```
    /// use strokefit::{FreehandCurve, InputSample, Point};
    ///
    /// let mut curve = FreehandCurve::default();
    /// curve.append_sample(InputSample::new((0.0, 0.0), 2.0, 0.1));
    /// let sample = curve.sample(0).unwrap();
    /// assert_eq!(sample.offset(1.0), Point::new(0.0, 1.0));
    /// assert_eq!(sample.offset(-1.0), Point::new(0.0, -1.0));
    /// ```
    #[inline]
    pub fn offset(&self, side: f64) -> Point {
        self.position + self.normal * (0.5 * side * self.width)
    }
}

/// Unit vector from `p0` to `p1`, or the x axis if they coincide.
fn direction(p0: Point, p1: Point) -> Vec2 {
    let d = p1 - p0;
    let len = d.hypot();
    if len > EPSILON {
        d / len
    } else {
        Vec2::X
    }
}

/// One step of 4-point refinement.
///
/// The first and last values only serve as stencil support, so `p` values
/// give `2p - 5`.
fn refine<T: FourPoint>(values: &[T]) -> SmallVec<[T; 16]> {
    let n = values.len();
    debug_assert!(n >= 4, "refining {n} values");
    let mut out = SmallVec::with_capacity(2 * n - 5);
    for k in 1..n - 2 {
        out.push(values[k]);
        out.push(T::four_point(
            values[k - 1],
            values[k],
            values[k + 1],
            values[k + 2],
            TENSION,
        ));
    }
    out.push(values[n - 2]);
    out
}

fn subdivide<T: FourPoint>(values: [T; 6]) -> SmallVec<[T; 16]> {
    let mut out = refine(&values);
    for _ in 1..STEPS {
        out = refine(&out);
    }
    debug_assert_eq!(out.len(), LAST + 3, "unexpected refined length");
    out
}

/// Indices of the knots `A B C D E F` around the segment starting at `i`.
///
/// A corner stops the lookup, and is repeated in place of its far neighbors.
/// Relies on the end knots being corners.
fn neighborhood(knots: &[Knot], i: usize) -> [usize; 6] {
    let c = i;
    let d = i + 1;
    let b = if knots[c].is_corner { c } else { c - 1 };
    let a = if knots[b].is_corner { b } else { b - 1 };
    let e = if knots[d].is_corner { d } else { d + 1 };
    let f = if knots[e].is_corner { e } else { e + 1 };
    [a, b, c, d, e, f]
}

/// Push samples at `corner` sweeping the tangent from the direction
/// `prev → corner` to `corner → next`, one sample per `max_sample_angle` of
/// turning.
///
/// Steps finer than [`MIN_FAN_STEP`] are coarsened to it.
fn push_fan(
    prev: Point,
    corner: &Sample,
    next: Point,
    max_sample_angle: f64,
    samples: &mut Vec<Sample>,
) {
    if max_sample_angle.is_nan() || max_sample_angle <= 0.0 {
        return;
    }
    let a1 = (corner.position - prev).atan2();
    let mut a2 = (next - corner.position).atan2();
    // Turn the short way around.
    if a2 > a1 + PI {
        a2 -= TAU;
    } else if a2 < a1 - PI {
        a2 += TAU;
    }
    let sweep = a2 - a1;
    let step = max_sample_angle.max(MIN_FAN_STEP);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the sweep is at most π and the step at least π/1024, so the count is at most 1024"
    )]
    let n = (sweep.abs() / step).floor() as usize;
    for k in 0..n {
        let mut sample = *corner;
        sample.set_tangent(Vec2::from_angle(a1 + sweep * (k as f64 / n as f64)));
        samples.push(sample);
    }
}

/// Sample the curve through `knots`, replacing the contents of `samples`.
///
/// `knots` must have corners at both ends. An empty slice gives no samples.
pub(crate) fn sample_knots(knots: &[Knot], max_sample_angle: f64, samples: &mut Vec<Sample>) {
    samples.clear();
    let Some(last_knot) = knots.last() else {
        return;
    };
    debug_assert!(
        knots[0].is_corner && last_knot.is_corner,
        "end knots must be corners"
    );

    let mut seg: SmallVec<[Sample; 16]> = SmallVec::new();
    for i in 0..knots.len() - 1 {
        let around = neighborhood(knots, i);
        let points = subdivide(around.map(|j| knots[j].position));
        let widths = subdivide(around.map(|j| knots[j].width));

        seg.clear();
        let start = points[FIRST];
        let arclength = samples
            .last()
            .map_or(0.0, |prev| prev.arclength + prev.position.distance(start));
        seg.push(Sample::at(start, widths[FIRST], arclength));
        for k in FIRST + 1..=LAST {
            let prev = seg[seg.len() - 1];
            let d = prev.position.distance(points[k]);
            if d > EPSILON {
                seg.push(Sample::at(points[k], widths[k], prev.arclength + d));
            } else {
                trace!("segment {i}: dropping coincident sample {k}");
            }
        }
        if seg.len() == 1 {
            debug!("segment {i}: degenerate, using end knot as second sample");
            let d = seg[0].position.distance(points[LAST]);
            seg.push(Sample::at(points[LAST], widths[LAST], seg[0].arclength + d));
        }

        let is_corner = knots[i].is_corner;
        let from = match samples.last() {
            Some(prev) if !is_corner => prev.position,
            _ => seg[0].position,
        };
        let next = seg[1].position;
        seg[0].set_tangent(direction(from, next));
        for k in 1..seg.len() - 1 {
            let chord = direction(seg[k - 1].position, seg[k + 1].position);
            seg[k].set_tangent(chord);
        }

        if is_corner {
            if let Some(prev) = samples.last().map(|s| s.position) {
                push_fan(prev, &seg[0], seg[1].position, max_sample_angle, samples);
            }
        }
        samples.extend_from_slice(&seg[..seg.len() - 1]);
    }

    let mut last = Sample::at(last_knot.position, last_knot.width, 0.0);
    if let Some(prev) = samples.last() {
        last.arclength = prev.arclength + prev.position.distance(last.position);
        last.set_tangent(direction(prev.position, last.position));
    }
    samples.push(last);

    let n = samples.len();
    for i in 1..n.saturating_sub(1) {
        samples[i].angle = supplementary_angle(
            samples[i - 1].position,
            samples[i].position,
            samples[i + 1].position,
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_8};

    use super::*;

    fn knot(x: f64, y: f64, is_corner: bool) -> Knot {
        Knot {
            position: Point::new(x, y),
            width: 1.0,
            angle: 0.0,
            is_corner,
        }
    }

    fn sampled(knots: &[Knot], max_sample_angle: f64) -> Vec<Sample> {
        let mut samples = Vec::new();
        sample_knots(knots, max_sample_angle, &mut samples);
        samples
    }

    #[test]
    fn refine_lengths() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let once = refine(&values);
        assert_eq!(once.len(), 7);
        assert_eq!(once[2], 2.0);
        assert_eq!(once[4], 3.0);
        let all = subdivide(values);
        assert_eq!(all[FIRST], 2.0);
        assert_eq!(all[LAST], 3.0);
    }

    #[test]
    fn refine_reproduces_cubics() {
        let f = |x: f64| x * x * x - 2.0 * x;
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0].map(f);
        let out = subdivide(values);
        for (k, v) in out.iter().enumerate() {
            // out[FIRST] is at x = 2, with spacing 1/8.
            let x = 2.0 + (k as f64 - FIRST as f64) / 8.0;
            assert!((v - f(x)).abs() < 1e-9, "{k}: {v} != {}", f(x));
        }
    }

    #[test]
    fn empty_knots() {
        assert!(sampled(&[], FRAC_PI_8).is_empty());
    }

    #[test]
    fn single_knot() {
        let samples = sampled(&[knot(3.0, 4.0, true)], FRAC_PI_8);
        assert_eq!(samples.len(), 1);
        let s = samples[0];
        assert_eq!(s.position, Point::new(3.0, 4.0));
        assert_eq!(s.arclength, 0.0);
        assert_eq!(s.tangent, Vec2::X);
        assert_eq!(s.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn collinear_knots() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(5.0, 0.0, false),
            knot(10.0, 0.0, true),
        ];
        let samples = sampled(&knots, FRAC_PI_8);
        assert_eq!(samples.len(), 2 * 8 + 1);
        for s in &samples {
            assert_eq!(s.position.y, 0.0);
            assert!((s.tangent - Vec2::X).hypot() < 1e-12);
            assert!((s.normal - Vec2::new(0.0, 1.0)).hypot() < 1e-12);
            assert!((s.width - 1.0).abs() < 1e-12);
            assert!(s.angle.abs() < 1e-12);
        }
        assert_eq!(samples[0].arclength, 0.0);
        let total = samples[samples.len() - 1].arclength;
        assert!((total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn corner_is_rounded() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(10.0, 0.0, true),
            knot(10.0, 10.0, true),
        ];
        let samples = sampled(&knots, FRAC_PI_8);
        let corner = Point::new(10.0, 0.0);
        let at_corner: Vec<&Sample> = samples.iter().filter(|s| s.position == corner).collect();
        // The fan plus the first sample of the outgoing segment.
        assert!(at_corner.len() >= 5, "{}", at_corner.len());
        let arclength = at_corner[0].arclength;
        assert!((arclength - 10.0).abs() < 1e-9);
        for s in &at_corner {
            assert_eq!(s.arclength, arclength);
            let th = s.tangent.atan2();
            assert!((-1e-12..=FRAC_PI_2 + 1e-12).contains(&th));
        }
        let last = samples[samples.len() - 1];
        assert_eq!(last.position, Point::new(10.0, 10.0));
        assert!((last.arclength - 20.0).abs() < 1e-9);
    }

    #[test]
    fn no_fan_without_sample_angle() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(10.0, 0.0, true),
            knot(10.0, 10.0, true),
        ];
        let samples = sampled(&knots, 0.0);
        assert_eq!(samples.len(), 2 * 8 + 1);
    }

    #[test]
    fn fan_size_is_capped() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(10.0, 0.0, true),
            knot(10.0, 10.0, true),
        ];
        let samples = sampled(&knots, 1e-9);
        let corner = Point::new(10.0, 0.0);
        let at_corner = samples.iter().filter(|s| s.position == corner).count();
        // A quarter turn in steps of π/1024, plus the outgoing sample.
        assert!(
            (512..=513).contains(&(at_corner - 1)),
            "{at_corner} samples at the corner"
        );
    }

    #[test]
    fn widths_follow_knots() {
        // Widths are an affine function of x at the knots, so refinement keeps
        // them on the same function at every sample.
        let knots: Vec<Knot> = (0..7)
            .map(|i| Knot {
                position: Point::new(2.5 * i as f64, 0.0),
                width: 1.0 + i as f64,
                angle: 0.0,
                is_corner: i == 0 || i == 6,
            })
            .collect();
        let samples = sampled(&knots, FRAC_PI_8);
        assert_eq!(samples.len(), 6 * 8 + 1);
        for s in &samples {
            let expected = 1.0 + s.position.x / 2.5;
            assert!(
                (s.width - expected).abs() < 1e-12,
                "width {} at x = {}",
                s.width,
                s.position.x
            );
        }
        for k in &knots {
            let s = samples
                .iter()
                .find(|s| s.position == k.position)
                .expect("every knot is sampled");
            assert_eq!(s.width, k.width);
        }
        assert_eq!(samples[samples.len() - 1].width, 7.0);
        assert!(samples[1].width > samples[0].width);
    }

    #[test]
    fn corners_stop_neighbor_lookup() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(5.0, 0.0, false),
            knot(10.0, 0.0, true),
            knot(10.0, 5.0, false),
            knot(10.0, 10.0, true),
        ];
        assert_eq!(neighborhood(&knots, 0), [0, 0, 0, 1, 2, 2]);
        assert_eq!(neighborhood(&knots, 1), [0, 0, 1, 2, 2, 2]);
        assert_eq!(neighborhood(&knots, 2), [2, 2, 2, 3, 4, 4]);
        let samples = sampled(&knots, FRAC_PI_8);
        // Four segments, a quarter-turn fan, the last sample.
        assert_eq!(samples.len(), 4 * 8 + 4 + 1);
        // The first two segments never see the vertical leg.
        for s in &samples[..16] {
            assert_eq!(s.position.y, 0.0, "{:?}", s.position);
        }
        // The last two never see the horizontal leg.
        for s in &samples[16..] {
            assert_eq!(s.position.x, 10.0, "{:?}", s.position);
        }
    }

    #[test]
    fn degenerate_segment() {
        let knots = [knot(0.0, 0.0, true), knot(1e-12, 0.0, true)];
        let samples = sampled(&knots, FRAC_PI_8);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].arclength, 0.0);
        assert_eq!(samples[0].tangent, Vec2::X);
        assert_eq!(samples[1].position, Point::new(1e-12, 0.0));
    }

    #[test]
    fn arclength_and_frame() {
        let knots = [
            knot(0.0, 0.0, true),
            knot(3.0, 1.0, false),
            knot(6.0, 0.0, false),
            knot(8.0, 4.0, false),
            knot(7.0, 7.0, true),
        ];
        let samples = sampled(&knots, FRAC_PI_8);
        for w in samples.windows(2) {
            let d = w[0].position.distance(w[1].position);
            assert!((w[1].arclength - w[0].arclength - d).abs() < 1e-9);
        }
        for s in &samples {
            assert!((s.tangent.hypot() - 1.0).abs() < 1e-12);
            assert!(s.tangent.dot(s.normal).abs() < 1e-12);
        }
    }

    #[test]
    fn offset() {
        let mut s = Sample::at(Point::new(1.0, 1.0), 4.0, 0.0);
        s.set_tangent(Vec2::new(0.0, 1.0));
        assert_eq!(s.offset(1.0), Point::new(-1.0, 1.0));
        assert_eq!(s.offset(-1.0), Point::new(3.0, 1.0));
        assert_eq!(s.offset(0.0), s.position);
    }
}
