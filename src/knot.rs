// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduction of regressed positions to a sequence of classified knots.
//!
//! This happens in three passes:
//!
//! 1. Positions closer than the resolution to the last kept knot are dropped.
//! 2. Micro-corners are merged. When two knots `B` and `C` are much closer
//!    to each other than to their outer neighbors `A` and `D`, the pair looks
//!    like a corner that got smeared across two knots, and only the one with
//!    the larger turning angle is kept:
//!
//! ```text
//!        B     C                 B
//!         o---o                   o
//!        /    |                  /|
//!       /     |        =>       / |
//!      /      |                /  |
//!   A o       o D           A o   o D
//! ```
//!
//! 3. Every interior knot turning by more than the configured angle is
//!    classified as a corner. End knots are always corners.

use alloc::vec::Vec;

use crate::common::{supplementary_angle, EPSILON};
use crate::Point;

/// Merge `B` and `C` when `MERGE_RATIO * |BC|` is below both `|AB|` and `|CD|`.
///
/// Must exceed 2: merging can shrink the spacing of neighbors to
/// `(MERGE_RATIO - 2)` times the smallest spacing, so any larger ratio
/// never creates duplicate knots.
const MERGE_RATIO: f64 = 4.0;

/// A control point of the fitted curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knot {
    /// Position of the knot.
    pub position: Point,
    /// Stroke width at the knot.
    pub width: f64,
    /// Supplementary angle formed with the neighboring knots, in radians.
    ///
    /// This is 0 when the neighbors are aligned with the knot, and is 0 by
    /// convention for the first and last knot.
    pub angle: f64,
    /// Whether the curve may have a tangent discontinuity at this knot.
    pub is_corner: bool,
}

impl Knot {
    fn new(position: Point, width: f64) -> Self {
        Self {
            position,
            width,
            angle: 0.0,
            is_corner: false,
        }
    }
}

/// Extracts knots from regressed positions.
///
/// Keeps a scratch buffer of inter-knot distances across runs.
#[derive(Clone, Debug, Default)]
pub(crate) struct KnotExtractor {
    distances: Vec<f64>,
}

impl KnotExtractor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Compute the knots of `positions`, replacing the contents of `knots`.
    ///
    /// `positions` and `widths` must have the same, nonzero, length.
    /// `resolution` is the spacing below which consecutive positions are
    /// treated as duplicates; it is floored to a small multiple of the
    /// numerical tolerance.
    pub(crate) fn extract(
        &mut self,
        positions: &[Point],
        widths: &[f64],
        resolution: f64,
        max_smooth_knot_angle: f64,
        knots: &mut Vec<Knot>,
    ) {
        debug_assert!(!positions.is_empty(), "no positions to extract knots from");
        debug_assert_eq!(positions.len(), widths.len(), "one width per position");

        let resolution = resolution.max(10.0 * EPSILON);
        remove_duplicates(positions, widths, resolution, knots, &mut self.distances);
        compute_angles(knots);
        merge_micro_corners(knots, &self.distances);
        compute_angles(knots);
        classify(knots, max_smooth_knot_angle);
    }
}

/// First pass: keep a position only if it is farther than `resolution` from
/// the last kept knot, recording the distances between kept knots.
fn remove_duplicates(
    positions: &[Point],
    widths: &[f64],
    resolution: f64,
    knots: &mut Vec<Knot>,
    distances: &mut Vec<f64>,
) {
    knots.clear();
    distances.clear();
    let Some((&first, rest)) = positions.split_first() else {
        return;
    };
    knots.push(Knot::new(first, widths[0]));
    let mut last = first;
    for (&p, &w) in rest.iter().zip(&widths[1..]) {
        let d = last.distance(p);
        if d > resolution {
            knots.push(Knot::new(p, w));
            distances.push(d);
            last = p;
        }
    }
    debug_assert_eq!(distances.len() + 1, knots.len(), "one distance per knot gap");
}

/// Set the supplementary angle of every knot, 0 at both ends.
fn compute_angles(knots: &mut [Knot]) {
    let n = knots.len();
    for i in 0..n {
        knots[i].angle = if i == 0 || i == n - 1 {
            0.0
        } else {
            supplementary_angle(
                knots[i - 1].position,
                knots[i].position,
                knots[i + 1].position,
            )
        };
    }
}

/// Second pass: merge micro-corners in place.
///
/// `distances[i]` must be the distance between `knots[i]` and `knots[i + 1]`
/// before merging, and the knot angles must be current. Knots are read at
/// `read` and written back at `write <= read`, so each window `(A, B, C, D)`
/// is tested against the pre-merge spacings even when `A` has already been
/// replaced by an earlier merge.
fn merge_micro_corners(knots: &mut Vec<Knot>, distances: &[f64]) {
    let m = knots.len();
    debug_assert_eq!(distances.len() + 1, m, "one distance per knot gap");
    let mut read = 0;
    let mut write = 0;
    // The first knot is never touched. Each iteration considers B = knots[read].
    while read + 3 < m {
        read += 1;
        write += 1;
        let ab = distances[read - 1];
        let bc = distances[read];
        let cd = distances[read + 1];
        if MERGE_RATIO * bc < ab && MERGE_RATIO * bc < cd {
            let b = knots[read];
            let c = knots[read + 1];
            knots[write] = if b.angle < c.angle { c } else { b };
            // C has been consumed.
            read += 1;
        } else {
            knots[write] = knots[read];
        }
    }
    // Copy the one or two knots the window could not reach.
    while read + 1 < m {
        read += 1;
        write += 1;
        knots[write] = knots[read];
    }
    knots.truncate(write + 1);
}

/// Third pass: ends are corners, interior knots are corners when they turn
/// by more than `max_smooth_knot_angle`.
fn classify(knots: &mut [Knot], max_smooth_knot_angle: f64) {
    let n = knots.len();
    for (i, knot) in knots.iter_mut().enumerate() {
        knot.is_corner = i == 0 || i == n - 1 || knot.angle > max_smooth_knot_angle;
    }
}
