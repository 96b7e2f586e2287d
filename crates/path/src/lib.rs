#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]
#![no_std]

//! Data structures and traits to read the paths consumed by the conifer tessellator.
//!
//! This crate is reexported in [conifer](../conifer/index.html).
//!
//! # Overview
//!
//! Paths are not built here. They are read, either as:
//!
//! - any iterator of [`PathEvent`]s, in traversal order, the end of the iteration acting as
//!   the "done" sentinel,
//! - a [`PathSlice`]: a validated view over caller-owned verb, point and weight buffers,
//! - a [`Polygon`](polygon/struct.Polygon.html): a view over a sequence of points.
//!
//! Raw buffers are checked once when the [`PathSlice`] is created. Verbs referring to points
//! or weights that aren't there are reported as [`DegenerateInput`] errors, before any
//! geometry is processed.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use conifer_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod events;
pub mod path;
pub mod polygon;

pub use crate::events::*;
#[doc(inline)]
pub use crate::path::{DegenerateInput, Iter, PathSlice, Verb};
#[doc(inline)]
pub use crate::polygon::Polygon;

pub mod math {
    //! f32 version of the conifer_geom types used everywhere. Most other conifer crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }
}
