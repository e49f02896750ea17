// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The incremental freehand curve fitting pipeline.

use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;

use log::trace;

use crate::input::{accepts, smooth_widths};
use crate::knot::KnotExtractor;
use crate::regression::{blend_fits, RegressionFitter};
use crate::sample::sample_knots;
use crate::{InputSample, Knot, Point, QuadBez, Sample};

/// Tuning parameters of a [`FreehandCurve`].
///
/// ```
/// use strokefit::CurveParams;
///
/// let params = CurveParams::default().with_max_sample_angle(0.1);
/// assert_eq!(params.max_sample_angle, 0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveParams {
    /// Interior knots turning by more than this angle, in radians, are
    /// corners.
    pub max_smooth_knot_angle: f64,
    /// Angular step, in radians, of the samples inserted to round a corner.
    ///
    /// A value that is not positive disables corner rounding. Steps below
    /// π/1024 are treated as π/1024.
    pub max_sample_angle: f64,
}

impl CurveParams {
    /// Set the corner threshold.
    #[inline]
    #[must_use]
    pub fn with_max_smooth_knot_angle(mut self, angle: f64) -> Self {
        self.max_smooth_knot_angle = angle;
        self
    }

    /// Set the angular step of corner rounding.
    #[inline]
    #[must_use]
    pub fn with_max_sample_angle(mut self, angle: f64) -> Self {
        self.max_sample_angle = angle;
        self
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            max_smooth_knot_angle: PI / 6.0,
            max_sample_angle: PI / 20.0,
        }
    }
}

/// An index past the end of the knots or samples of a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The number of elements at the time of the request.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl core::error::Error for OutOfRange {}

/// A curve fitted to a stream of freehand input samples.
///
/// Every accepted input sample triggers a full recomputation of the
/// regressed positions, smoothed widths, knots and samples, so the curve
/// can be rendered after each [`append_sample`] call.
///
/// ```
/// use strokefit::{FreehandCurve, InputSample};
///
/// let mut curve = FreehandCurve::default();
/// curve.begin_stroke();
/// for i in 0..=10 {
///     curve.append_sample(InputSample::new((i as f64, 0.0), 2.0, 0.1));
/// }
/// curve.end_stroke();
///
/// assert!((curve.length() - 10.0).abs() < 1e-9);
/// let sample = curve.sample(0).unwrap();
/// assert_eq!(sample.position.x, 0.0);
/// assert!(curve.sample(curve.sample_count()).is_err());
/// ```
///
/// [`append_sample`]: FreehandCurve::append_sample
#[derive(Clone, Debug, Default)]
pub struct FreehandCurve {
    params: CurveParams,
    inputs: Vec<InputSample>,
    fits: Vec<QuadBez>,
    positions: Vec<Point>,
    widths: Vec<f64>,
    knots: Vec<Knot>,
    samples: Vec<Sample>,
    fitter: RegressionFitter,
    extractor: KnotExtractor,
}

impl FreehandCurve {
    /// Create an empty curve with the given parameters.
    pub fn new(params: CurveParams) -> Self {
        Self {
            params,
            inputs: Vec::new(),
            fits: Vec::new(),
            positions: Vec::new(),
            widths: Vec::new(),
            knots: Vec::new(),
            samples: Vec::new(),
            fitter: RegressionFitter::new(),
            extractor: KnotExtractor::new(),
        }
    }

    /// The parameters of this curve.
    #[inline]
    pub fn params(&self) -> CurveParams {
        self.params
    }

    /// Replace the parameters of this curve.
    ///
    /// The knots and samples are not recomputed until the next accepted
    /// input sample.
    #[inline]
    pub fn set_params(&mut self, params: CurveParams) {
        self.params = params;
    }

    /// Discard all input and derived state.
    ///
    /// Allocations are kept for reuse.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.fits.clear();
        self.positions.clear();
        self.widths.clear();
        self.knots.clear();
        self.samples.clear();
    }

    /// Start a new stroke, discarding the previous one.
    #[inline]
    pub fn begin_stroke(&mut self) {
        self.reset();
    }

    /// Finish the current stroke.
    ///
    /// The curve is always up to date, so this does nothing. It pairs with
    /// [`begin_stroke`](FreehandCurve::begin_stroke).
    #[inline]
    pub fn end_stroke(&mut self) {}

    /// Feed one input sample and recompute the curve.
    ///
    /// The sample is discarded if it lies within a tenth of its resolution
    /// of the last accepted one.
    pub fn append_sample(&mut self, sample: InputSample) {
        if !accepts(&self.inputs, &sample) {
            trace!(
                "discarding input at {} within spacing of the last input",
                sample.position
            );
            return;
        }
        self.inputs.push(sample);
        self.recompute();
    }

    fn recompute(&mut self) {
        smooth_widths(&self.inputs, &mut self.widths);
        self.fitter.fit(&self.inputs, &mut self.fits);
        blend_fits(&self.inputs, &self.fits, &mut self.positions);
        self.extractor.extract(
            &self.positions,
            &self.widths,
            self.inputs[0].resolution,
            self.params.max_smooth_knot_angle,
            &mut self.knots,
        );
        sample_knots(&self.knots, self.params.max_sample_angle, &mut self.samples);
        trace!(
            "recomputed curve: {} inputs, {} knots, {} samples",
            self.inputs.len(),
            self.knots.len(),
            self.samples.len()
        );
    }

    /// Whether no input sample has been accepted since the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The number of knots.
    #[inline]
    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    /// The knot at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index` is not below [`knot_count`](Self::knot_count).
    pub fn knot(&self, index: usize) -> Result<&Knot, OutOfRange> {
        self.knots.get(index).ok_or(OutOfRange {
            index,
            len: self.knots.len(),
        })
    }

    /// All knots, in curve order.
    #[inline]
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// The number of samples.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// The sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index` is not below [`sample_count`](Self::sample_count).
    pub fn sample(&self, index: usize) -> Result<&Sample, OutOfRange> {
        self.samples.get(index).ok_or(OutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    /// All samples, in curve order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Total arclength of the curve, 0 when there are no samples.
    pub fn length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.arclength)
    }

    /// The accepted input samples.
    #[inline]
    pub fn input_samples(&self) -> &[InputSample] {
        &self.inputs
    }

    /// The regressed position of each accepted input sample.
    #[inline]
    pub fn smoothed_positions(&self) -> &[Point] {
        &self.positions
    }

    /// The smoothed width of each accepted input sample.
    #[inline]
    pub fn smoothed_widths(&self) -> &[f64] {
        &self.widths
    }

    /// The quadratic fits over each window of accepted input samples.
    #[inline]
    pub fn fits(&self) -> &[QuadBez] {
        &self.fits
    }
}

impl Extend<InputSample> for FreehandCurve {
    fn extend<I: IntoIterator<Item = InputSample>>(&mut self, iter: I) {
        for sample in iter {
            self.append_sample(sample);
        }
    }
}
