// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliding-window quadratic regression of input positions.
//!
//! Every window of [`WINDOW_LEN`] consecutive input samples gets its own
//! quadratic fit. A sample covered by several windows takes the weighted
//! average of what each of those fits says about it, with a bell-shaped weight
//! that vanishes (along with its derivative) at both ends of a window. This
//! makes the regressed positions change smoothly as windows are entered and
//! left.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::{fit_quadratic, InputSample, ParamCurve, Point, QuadBez, Vec2};

/// Number of input samples per fit, when that many are available.
///
/// Must be at least 3 for the blend weights to be nonzero.
pub(crate) const WINDOW_LEN: usize = 5;

/// Produces the overlapping quadratic fits over a run of input samples.
///
/// The window buffer is kept across calls so refitting does not allocate.
#[derive(Clone, Debug, Default)]
pub(crate) struct RegressionFitter {
    window: ArrayVec<Point, WINDOW_LEN>,
}

impl RegressionFitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fit every window of `inputs`, replacing the contents of `fits`.
    ///
    /// The window length is `min(WINDOW_LEN, n)`, so there are
    /// `n - len + 1` fits; a short history gets a single fit covering all of
    /// it.
    pub(crate) fn fit(&mut self, inputs: &[InputSample], fits: &mut Vec<QuadBez>) {
        fits.clear();
        let n = inputs.len();
        if n == 0 {
            return;
        }
        let len = WINDOW_LEN.min(n);
        for run in inputs.windows(len) {
            self.window.clear();
            self.window.extend(run.iter().map(|s| s.position));
            fits.push(fit_quadratic(&self.window));
        }
        debug_assert_eq!(fits.len(), n - len + 1, "one fit per window");
    }
}

/// Weight of a fit's opinion at parameter `u` of its window.
///
/// Zero with zero slope at `u = 0` and `u = 1`, maximal at `u = 1/2`.
#[inline]
fn bell(u: f64) -> f64 {
    let v = u * (1.0 - u);
    v * v
}

/// Blend overlapping `fits` into one regressed position per input sample.
///
/// The first and last positions are copied through untouched. `fits` must
/// be the output of [`RegressionFitter::fit`] for the same `inputs`.
pub(crate) fn blend_fits(inputs: &[InputSample], fits: &[QuadBez], out: &mut Vec<Point>) {
    out.clear();
    let n = inputs.len();
    if n == 0 {
        return;
    }
    let n_fits = fits.len();
    debug_assert!((1..=n).contains(&n_fits), "{n_fits} fits for {n} inputs");
    let len = n - n_fits + 1;
    debug_assert!(len >= 3 || n <= 2, "window of {len} over {n} inputs");

    out.push(inputs[0].position);
    let step = 1.0 / (len - 1).max(1) as f64;
    for i in 1..n.saturating_sub(1) {
        let mut sum = Vec2::ZERO;
        let mut sum_w = 0.0;
        // The end offsets of a window have zero weight, skip them.
        for j in 1..len - 1 {
            let Some(fit) = i.checked_sub(j).and_then(|k| fits.get(k)) else {
                continue;
            };
            let u = j as f64 * step;
            let w = bell(u);
            sum += w * fit.eval(u).to_vec2();
            sum_w += w;
        }
        debug_assert!(sum_w > 0.0, "sample {i} is covered by no fit");
        out.push((sum / sum_w).to_point());
    }
    if n > 1 {
        out.push(inputs[n - 1].position);
    }
    debug_assert_eq!(out.len(), n, "one position per input");
}
