#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Flattening of conic paths into triangle strips.
//!
//! This crate is reexported in [conifer](https://docs.rs/conifer/).
//!
//! # Overview
//!
//! The [StripTessellator](struct.StripTessellator.html) fills the interior of simple closed
//! paths made of lines, quadratic bézier curves and conics, in a single pass:
//!
//! ```text
//!  Iterator<PathEvent> --> boundary flattening --> triangle strip ordering --> StripGeometryBuilder
//! ```
//!
//! ### The input: iterators
//!
//! The tessellator is not tied to a particular data structure. Instead it consumes
//! iterators of [PathEvent](path/enum.PathEvent.html). The
//! [PathSlice](path/struct.PathSlice.html) type of the `conifer_path` crate validates raw
//! verb, point and weight buffers before handing them to the tessellator.
//!
//! ### Flattening and tolerance
//!
//! Curves are approximated with sequences of line segments. Conics are first approximated
//! with `2^e` quadratic bézier segments, where `e` is the smallest exponent for which the
//! estimated distance between the conic and its approximation is within the `tolerance`
//! parameter. The exponent is bounded by `StripOptions::max_quad_exponent`, see
//! [ConicOverflow](enum.ConicOverflow.html) for what happens when the bound isn't enough.
//!
//! Quadratic bézier segments are then bisected until their control point is close enough to
//! their baseline, or until `StripOptions::max_flattening_depth` is reached. Reaching the
//! maximum depth is not an error.
//!
//! More explanation about flattening in the [conifer_geom crate](../conifer_geom/index.html).
//!
//! ### The output: geometry builders
//!
//! The flattened boundary is reordered into a triangle strip (see
//! [build_triangle_strip](fn.build_triangle_strip.html)) and handed to a type implementing the
//! [StripGeometryBuilder trait](geometry_builder/trait.StripGeometryBuilder.html), one vertex
//! at a time. The strip is expected to be rendered with the equivalent of OpenGL's
//! `glDrawArrays` in `GL_TRIANGLE_STRIP` mode.
//!
//! The strip only covers the interior of simple (not self-intersecting), roughly convex
//! boundaries. This isn't checked.
//!
//! ## Examples
//!
//! - [Tessellating a path](struct.StripTessellator.html#examples).
//! - [Generating custom vertices](geometry_builder/index.html#generating-custom-vertices).

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use conifer_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod fan;
mod flatten;
pub mod geometry_builder;
mod tessellator;

#[cfg(test)]
mod strip_tests;

pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fan::{build_triangle_strip, strip_order, triangle_count, StripOrder};

#[doc(inline)]
pub use crate::flatten::flatten_boundary;

#[doc(inline)]
pub use crate::tessellator::StripTessellator;

#[doc(inline)]
pub use crate::geometry_builder::{
    BufferBuilder, Count, NoOutput, StripGeometryBuilder, StripVertexConstructor, VertexBuffer,
};

use crate::geom::SubdivisionParameters;

/// What to do when a conic can't be approximated within the tolerance with
/// `2^max_quad_exponent` quadratic bézier segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ConicOverflow {
    /// Use `2^max_quad_exponent` segments anyway and log a warning.
    ///
    /// The approximation exceeds the tolerance.
    Clamp,
    /// Fail with `TessellationError::ExponentBoundExceeded`.
    Error,
}

impl Default for ConicOverflow {
    fn default() -> Self {
        ConicOverflow::Clamp
    }
}

/// Parameters for the strip tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StripOptions {
    /// Maximum allowed distance between a conic and its quadratic approximation.
    ///
    /// A negative or non-finite tolerance is considered to be always satisfied: conics are
    /// then approximated with a single quadratic bézier segment.
    ///
    /// Default value: `StripOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// Maximum power of two exponent of the number of quadratic bézier segments
    /// approximating a conic.
    ///
    /// Values above `StripOptions::QUAD_EXPONENT_LIMIT` are clamped.
    /// Default value: `StripOptions::DEFAULT_MAX_QUAD_EXPONENT` (at most 32 segments).
    pub max_quad_exponent: u32,

    /// Maximum recursion depth when bisecting quadratic bézier segments.
    ///
    /// Default value: `StripOptions::DEFAULT_MAX_FLATTENING_DEPTH`.
    pub max_flattening_depth: u32,

    /// A quadratic bézier segment is flat when the square of the cross product of
    /// `ctrl - from` and `to - ctrl` is lower or equal to this value.
    ///
    /// Default value: `StripOptions::DEFAULT_FLATNESS_THRESHOLD`.
    pub flatness_threshold: f32,

    /// What to do when a conic needs more than `2^max_quad_exponent` segments.
    ///
    /// Default value: `ConicOverflow::Clamp`.
    pub conic_overflow: ConicOverflow,
}

impl StripOptions {
    /// Default conic approximation tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.25;
    pub const DEFAULT_MAX_QUAD_EXPONENT: u32 = geom::conic::MAX_QUAD_EXPONENT;
    pub const DEFAULT_MAX_FLATTENING_DEPTH: u32 = 15;
    pub const DEFAULT_FLATNESS_THRESHOLD: f32 = 0.25;
    pub const DEFAULT_CONIC_OVERFLOW: ConicOverflow = ConicOverflow::Clamp;

    /// Hard limit for `max_quad_exponent` (65536 segments).
    pub const QUAD_EXPONENT_LIMIT: u32 = 16;

    pub const DEFAULT: Self = StripOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        max_quad_exponent: Self::DEFAULT_MAX_QUAD_EXPONENT,
        max_flattening_depth: Self::DEFAULT_MAX_FLATTENING_DEPTH,
        flatness_threshold: Self::DEFAULT_FLATNESS_THRESHOLD,
        conic_overflow: Self::DEFAULT_CONIC_OVERFLOW,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_max_quad_exponent(mut self, exponent: u32) -> Self {
        self.max_quad_exponent = exponent;
        self
    }

    #[inline]
    pub const fn with_max_flattening_depth(mut self, depth: u32) -> Self {
        self.max_flattening_depth = depth;
        self
    }

    #[inline]
    pub const fn with_flatness_threshold(mut self, threshold: f32) -> Self {
        self.flatness_threshold = threshold;
        self
    }

    #[inline]
    pub const fn with_conic_overflow(mut self, policy: ConicOverflow) -> Self {
        self.conic_overflow = policy;
        self
    }

    /// The effective conic exponent bound.
    #[inline]
    pub fn quad_exponent_limit(&self) -> u32 {
        self.max_quad_exponent.min(Self::QUAD_EXPONENT_LIMIT)
    }

    /// Parameters for the bisection of quadratic bézier segments.
    #[inline]
    pub fn subdivision_parameters(&self) -> SubdivisionParameters<f32> {
        SubdivisionParameters::new(self.max_flattening_depth, self.flatness_threshold)
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn options_builders() {
    let options = StripOptions::tolerance(0.5)
        .with_max_quad_exponent(40)
        .with_max_flattening_depth(3)
        .with_flatness_threshold(1.0)
        .with_conic_overflow(ConicOverflow::Error);

    assert_eq!(options.tolerance, 0.5);
    assert_eq!(options.quad_exponent_limit(), StripOptions::QUAD_EXPONENT_LIMIT);
    assert_eq!(options.conic_overflow, ConicOverflow::Error);

    let params = options.subdivision_parameters();
    assert_eq!(params.max_depth, 3);
    assert_eq!(params.flatness_threshold, 1.0);

    assert_eq!(StripOptions::default(), StripOptions::DEFAULT);
    assert_eq!(StripOptions::DEFAULT.max_quad_exponent, 5);
}
