#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::let_and_return)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D curve primitives on top of euclid.
//!
//! This crate is reexported in [conifer](../conifer/index.html).
//!
//! # Overview.
//!
//! This crate implements the maths to work with:
//!
//! - line segments,
//! - quadratic bézier curves,
//! - conics (rational quadratic bézier curves).
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! Conics are never flattened directly. They are first approximated with a power-of-two
//! number of quadratic bézier segments (see [`ConicSegment::quad_exponent`] and
//! [`ConicSegment::split_into_quads`]), and each of these segments is then recursively
//! bisected until its control point is close enough to its baseline
//! (see [`QuadraticBezierSegment::subdivided`]).
//!
//! Both steps are bounded: the conic subdivision exponent can't exceed
//! [`conic::MAX_QUAD_EXPONENT`] unless a larger limit is explicitly requested, and the
//! quadratic bisection never goes deeper than its `max_depth` parameter (itself clamped to
//! [`quadratic_bezier::MAX_SUBDIVISION_DEPTH`]).
//!
//! The tolerance threshold taken as input by the conic approximation corresponds
//! to the maximum distance between the conic and its quadratic approximation.
//! The smaller the tolerance is, the more quadratic segments are generated.

//#![allow(needless_return)] // clippy

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod conic;
mod line;
pub mod quadratic_bezier;

#[doc(inline)]
pub use crate::conic::{ConicSegment, ExponentBoundExceeded};
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::{QuadraticBezierSegment, SubdivisionParameters};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const HALF: Self;
        const QUARTER: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const FOUR: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const QUARTER: Self = 0.25;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const FOUR: Self = 4.0;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const QUARTER: Self = 0.25;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const FOUR: Self = 4.0;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod utils {
    //! Point math shared by the curve types.

    use crate::scalar::Scalar;
    use crate::{point, Point, Vector};

    /// Midpoint of two points.
    #[inline]
    pub fn midpoint<S: Scalar>(a: Point<S>, b: Point<S>) -> Point<S> {
        point((a.x + b.x) * S::HALF, (a.y + b.y) * S::HALF)
    }

    /// The z component of the 3d cross product of two 2d vectors.
    #[inline]
    pub fn cross<S: Scalar>(a: Vector<S>, b: Vector<S>) -> S {
        a.x * b.y - a.y * b.x
    }

    #[inline]
    pub fn length<S: Scalar>(v: Vector<S>) -> S {
        (v.x * v.x + v.y * v.y).sqrt()
    }

    /// Returns true if both coordinates are neither infinite nor NaN.
    #[inline]
    pub fn is_finite<S: Scalar>(p: Point<S>) -> bool {
        p.x.is_finite() && p.y.is_finite()
    }
}

#[test]
fn midpoint_and_cross() {
    use crate::utils::{cross, length, midpoint};

    assert_eq!(midpoint(point(0.0f32, 2.0), point(4.0, 6.0)), point(2.0, 4.0));
    assert_eq!(cross(vector(1.0f32, 0.0), vector(0.0, 1.0)), 1.0);
    assert_eq!(cross(vector(0.0f32, 1.0), vector(1.0, 0.0)), -1.0);
    assert_eq!(cross(vector(2.0f64, 2.0), vector(1.0, 1.0)), 0.0);
    assert_eq!(length(vector(3.0f64, 4.0)), 5.0);
    assert!(!utils::is_finite(point(f32::NAN, 0.0)));
    assert!(utils::is_finite(point(1.0f32, -1.0)));
}
