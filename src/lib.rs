#![deny(bare_trait_objects)]

//! Flattening of conic paths into GPU-ready triangle strips.
//!
//! # Crates
//!
//! This meta-crate (`conifer`) reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/conifer_tessellation.svg)](https://crates.io/crates/conifer_tessellation)
//!   [![doc](https://docs.rs/conifer_tessellation/badge.svg)](https://docs.rs/conifer_tessellation) -
//!   **conifer_tessellation** - Boundary flattening and triangle strip generation.
//! * [![crate](https://img.shields.io/crates/v/conifer_path.svg)](https://crates.io/crates/conifer_path)
//!   [![doc](https://docs.rs/conifer_path/badge.svg)](https://docs.rs/conifer_path) -
//!   **conifer_path** - Path events and validated views over path buffers.
//! * [![crate](https://img.shields.io/crates/v/conifer_geom.svg)](https://crates.io/crates/conifer_geom)
//!   [![doc](https://docs.rs/conifer_geom/badge.svg)](https://docs.rs/conifer_geom) -
//!   **conifer_geom** - Conic and quadratic bézier math on top of euclid.
//!
//! Each `conifer_<name>` crate is reexported as a `<name>` module in `conifer`. For example:
//!
//! ```ignore
//! extern crate conifer_tessellation;
//! use conifer_tessellation::StripTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate conifer;
//! use conifer::tessellation::StripTessellator;
//! ```
//!
//! # Feature flags
//!
//! serde serialization is available via the `serialization` feature flag (disabled by default).
//!
//! # Example
//!
//! ```
//! use conifer::math::point;
//! use conifer::path::{PathSlice, Verb};
//! use conifer::tessellation::geometry_builder::{simple_builder, VertexBuffer};
//! use conifer::tessellation::{StripOptions, StripTessellator};
//!
//! // A half disc made of two conics.
//! let w = std::f32::consts::FRAC_1_SQRT_2;
//! let verbs = [Verb::Begin, Verb::ConicTo, Verb::ConicTo, Verb::Close];
//! let points = [
//!     point(-1.0, 0.0),
//!     point(-1.0, 1.0), point(0.0, 1.0),
//!     point(1.0, 1.0), point(1.0, 0.0),
//! ];
//! let weights = [w, w];
//! let path = PathSlice::new(&verbs, &points, &weights).unwrap();
//!
//! let mut geometry = VertexBuffer::new();
//! let mut tessellator = StripTessellator::new();
//!
//! let count = tessellator.tessellate_path(
//!     &path,
//!     &StripOptions::tolerance(0.01),
//!     &mut simple_builder(&mut geometry),
//! ).unwrap();
//!
//! // The resulting vertices can be drawn as a single triangle strip.
//! assert_eq!(count.vertices as usize, geometry.vertices.len());
//! ```

pub extern crate conifer_tessellation;

pub use conifer_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
