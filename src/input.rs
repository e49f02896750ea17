// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input samples, their spacing filter, and width smoothing.

use alloc::vec::Vec;

use crate::Point;

/// Fraction of the device resolution below which a new sample is considered
/// a repeat of the previous one.
const MIN_SPACING_FACTOR: f64 = 0.1;

/// A raw observation from an input device.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputSample {
    /// Position of the pointer.
    pub position: Point,
    /// Stroke width requested at this sample, typically derived from pressure.
    pub width: f64,
    /// Smallest meaningful distance for the device that produced the sample.
    ///
    /// Must be positive.
    pub resolution: f64,
}

impl InputSample {
    /// Create a new input sample.
    #[inline]
    pub fn new(position: impl Into<Point>, width: f64, resolution: f64) -> Self {
        Self {
            position: position.into(),
            width,
            resolution,
        }
    }
}

/// Whether `sample` should be appended to `history`.
///
/// The first sample is always accepted. Later samples must lie farther than
/// a tenth of their own resolution from the last accepted one.
pub(crate) fn accepts(history: &[InputSample], sample: &InputSample) -> bool {
    match history.last() {
        None => true,
        Some(last) => {
            last.position.distance(sample.position) > MIN_SPACING_FACTOR * sample.resolution
        }
    }
}

/// Smooth the widths of `inputs` with a small fixed kernel.
///
/// Interior samples use `[1/4, 1/2, 1/4]`; each end sample is pulled a third
/// of the way toward its single neighbor. `out` is cleared and ends up with
/// exactly one width per input.
pub(crate) fn smooth_widths(inputs: &[InputSample], out: &mut Vec<f64>) {
    out.clear();
    let n = inputs.len();
    match n {
        0 => {}
        1 => out.push(inputs[0].width),
        _ => {
            out.push(0.67 * inputs[0].width + 0.33 * inputs[1].width);
            out.extend(
                inputs
                    .windows(3)
                    .map(|w| 0.25 * w[0].width + 0.5 * w[1].width + 0.25 * w[2].width),
            );
            out.push(0.67 * inputs[n - 1].width + 0.33 * inputs[n - 2].width);
        }
    }
    debug_assert_eq!(out.len(), n, "one width per input");
}
