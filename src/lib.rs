// Copyright 2026 the Strokefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting of freehand input to smooth, densely sampled strokes.
//!
//! Strokefit turns a noisy, irregularly spaced stream of input samples
//! (position, stroke width and device resolution) into two representations
//! of the same curve:
//!
//! - a short sequence of [`Knot`]s, each tagged as a smooth point or a
//!   corner, suitable for editing;
//! - a dense sequence of [`Sample`]s carrying position, width, tangent,
//!   normal and arclength, suitable for rendering.
//!
//! Every accepted input sample recomputes the whole curve: repeated inputs
//! are filtered out, widths are smoothed, positions are regressed with
//! overlapping quadratic fits, knots are extracted and classified, and the
//! curve through the knots is refined with a 4-point subdivision scheme.
//!
//! # Examples
//!
//! Drawing an L shape:
//!
//! ```
//! use strokefit::{FreehandCurve, InputSample, Point};
//!
//! let mut curve = FreehandCurve::default();
//! curve.begin_stroke();
//! for i in 0..=20 {
//!     curve.append_sample(InputSample::new((0.5 * i as f64, 0.0), 2.0, 0.1));
//! }
//! for i in 1..=20 {
//!     curve.append_sample(InputSample::new((10.0, 0.5 * i as f64), 2.0, 0.1));
//! }
//! curve.end_stroke();
//!
//! // The bend is detected as a corner.
//! let corners = curve.knots().iter().filter(|k| k.is_corner).count();
//! assert_eq!(corners, 3);
//!
//! // The samples end exactly on the last input.
//! let last = curve.samples().last().unwrap();
//! assert_eq!(last.position, Point::new(10.0, 10.0));
//! assert!(curve.length() < 20.0);
//! ```
//!
//! # Feature Flags
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of [`Point`] and [`Vec2`] with [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the public data types.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that Strokefit does require that an allocator is available (i.e. it uses [alloc]).
//!
//! # Logging
//!
//! Diagnostics go through the [log] facade at `trace` and `debug` level.
//! No logger is installed by this crate.
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [log]: https://docs.rs/log

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("strokefit requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

pub mod common;
mod curve;
mod fit;
mod input;
mod knot;
mod param_curve;
mod point;
mod quadbez;
mod regression;
mod sample;
mod vec2;

pub use crate::curve::*;
pub use crate::fit::*;
pub use crate::input::InputSample;
pub use crate::knot::Knot;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::sample::Sample;
pub use crate::vec2::*;
