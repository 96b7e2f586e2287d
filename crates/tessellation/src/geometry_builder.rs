//! Tools to help with generating vertex buffers.
//!
//! ## Overview
//!
//! The strip tessellator produces a single triangle strip per path: a flat sequence of
//! vertices meant to be drawn without an index buffer, with the equivalent of OpenGL's
//! `glDrawArrays` in `GL_TRIANGLE_STRIP` mode.
//!
//! Rather than writing into a vector of a fixed vertex type, the tessellator talks to a
//! [`StripGeometryBuilder`](trait.StripGeometryBuilder.html). This lets applications use their
//! own vertex layout without copying and converting the generated geometry.
//!
//! Pushing vertices into a vector is by far the most common case, so this module also provides:
//!
//! * The struct [`VertexBuffer`](struct.VertexBuffer.html), a vector of vertices (generic parameter).
//! * The struct [`BufferBuilder`](struct.BufferBuilder.html) which writes into a
//!   [`VertexBuffer`](struct.VertexBuffer.html) and implements the geometry builder trait.
//!   Producing the vertices is delegated to a vertex constructor.
//! * The trait [`StripVertexConstructor`](trait.StripVertexConstructor.html) to generate any
//!   vertex type from a position. The [`Positions`](struct.Positions.html) constructor just
//!   returns the position untransformed.
//!
//! ## Generating custom vertices
//!
//! ```
//! use conifer_tessellation::geometry_builder::{BufferBuilder, VertexBuffer};
//! use conifer_tessellation::math::{point, Point};
//! use conifer_tessellation::path::Polygon;
//! use conifer_tessellation::{StripOptions, StripTessellator};
//!
//! #[derive(Copy, Clone, Debug)]
//! struct MyVertex { position: [f32; 2], color: [f32; 4] }
//!
//! let triangle = [point(0.0, 0.0), point(10.0, 0.0), point(5.0, 8.0)];
//!
//! let mut output: VertexBuffer<MyVertex> = VertexBuffer::new();
//! let mut tessellator = StripTessellator::new();
//!
//! let count = tessellator.tessellate(
//!     Polygon { points: &triangle, closed: true },
//!     &StripOptions::default(),
//!     &mut BufferBuilder::new(&mut output, |position: Point| MyVertex {
//!         position: position.to_array(),
//!         color: [1.0, 0.0, 0.0, 1.0],
//!     }),
//! ).unwrap();
//!
//! assert_eq!(count.vertices, 3);
//! assert_eq!(output.vertices.len(), 3);
//! ```

pub use crate::error::GeometryBuilderError;
use crate::math::Point;

use alloc::vec::Vec;

/// Number of vertices added to a geometry builder between `begin_geometry`
/// and `end_geometry`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Count {
    pub vertices: u32,
}

impl Count {
    /// Number of triangles rendered by a triangle strip of this many vertices.
    #[inline]
    pub fn triangles(&self) -> u32 {
        self.vertices.saturating_sub(2)
    }
}

/// An interface separating the strip tessellator from the actual vertex construction.
///
/// See the [`geometry_builder`](index.html) module documentation for more detailed explanation.
pub trait StripGeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Appends a vertex to the triangle strip.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_strip_vertex(&mut self, position: Point) -> Result<(), GeometryBuilderError>;

    /// Called at the end of a generation.
    /// Returns the number of vertices added since the last time begin_geometry was called.
    fn end_geometry(&mut self) -> Count;

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// Structure that holds the vertex data.
///
/// Usually written into though temporary `BufferBuilder` objects.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffer<OutputVertex> {
    pub vertices: Vec<OutputVertex>,
}

impl<OutputVertex> VertexBuffer<OutputVertex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffer::with_capacity(512)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize) -> Self {
        VertexBuffer {
            vertices: Vec::with_capacity(num_vertices),
        }
    }

    /// Empty the buffer without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

/// A temporary view on a `VertexBuffer` object which facilitates the population of vertex data.
///
/// The `StripVertexConstructor` does the translation from positions to `OutputVertex`.
/// If your logic generates the actual vertex type directly, you can use the
/// `SimpleBufferBuilder` convenience typedef.
pub struct BufferBuilder<'l, OutputVertex: 'l, Ctor> {
    buffer: &'l mut VertexBuffer<OutputVertex>,
    first_vertex: usize,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, Ctor> BufferBuilder<'l, OutputVertex, Ctor> {
    pub fn new(buffer: &'l mut VertexBuffer<OutputVertex>, ctor: Ctor) -> Self {
        let first_vertex = buffer.vertices.len();
        BufferBuilder {
            buffer,
            first_vertex,
            vertex_constructor: ctor,
        }
    }

    pub fn buffer<'a, 'b: 'a>(&'b self) -> &'a VertexBuffer<OutputVertex> {
        self.buffer
    }
}

/// A `BufferBuilder` that takes the actual vertex type as input.
pub type SimpleBufferBuilder<'l> = BufferBuilder<'l, Point, Positions>;

/// Creates a `SimpleBufferBuilder`.
pub fn simple_builder(buffer: &mut VertexBuffer<Point>) -> SimpleBufferBuilder {
    BufferBuilder::new(buffer, Positions)
}

/// A trait specifying how to create vertex values.
pub trait StripVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, position: Point) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl StripVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, position: Point) -> Point {
        position
    }
}

impl<F, OutputVertex> StripVertexConstructor<OutputVertex> for F
where
    F: Fn(Point) -> OutputVertex,
{
    fn new_vertex(&mut self, position: Point) -> OutputVertex {
        self(position)
    }
}

impl<'l, OutputVertex, Ctor> StripGeometryBuilder for BufferBuilder<'l, OutputVertex, Ctor>
where
    OutputVertex: 'l,
    Ctor: StripVertexConstructor<OutputVertex>,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffer.vertices.len();
    }

    fn add_strip_vertex(&mut self, position: Point) -> Result<(), GeometryBuilderError> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(GeometryBuilderError::InvalidVertex);
        }

        if self.buffer.vertices.len() - self.first_vertex >= u32::MAX as usize {
            return Err(GeometryBuilderError::TooManyVertices);
        }

        let vertex = self.vertex_constructor.new_vertex(position);
        self.buffer.vertices.push(vertex);

        Ok(())
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: (self.buffer.vertices.len() - self.first_vertex) as u32,
        }
    }

    fn abort_geometry(&mut self) {
        self.buffer.vertices.truncate(self.first_vertex);
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing and counting vertices.
pub struct NoOutput {
    num_vertices: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { num_vertices: 0 }
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl StripGeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.num_vertices = 0;
    }

    fn add_strip_vertex(&mut self, _position: Point) -> Result<(), GeometryBuilderError> {
        if self.num_vertices == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.num_vertices += 1;

        Ok(())
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: self.num_vertices,
        }
    }
}

#[test]
fn buffer_builder_abort() {
    use crate::math::point;

    let mut buffer: VertexBuffer<Point> = VertexBuffer::new();
    buffer.vertices.push(point(-1.0, -1.0));

    {
        let mut builder = simple_builder(&mut buffer);
        builder.begin_geometry();
        builder.add_strip_vertex(point(0.0, 0.0)).unwrap();
        builder.add_strip_vertex(point(1.0, 0.0)).unwrap();
        assert_eq!(
            builder.add_strip_vertex(point(f32::NAN, 0.0)),
            Err(GeometryBuilderError::InvalidVertex)
        );
        builder.abort_geometry();
    }

    assert_eq!(buffer.vertices.len(), 1);

    {
        let mut builder = simple_builder(&mut buffer);
        builder.begin_geometry();
        builder.add_strip_vertex(point(0.0, 0.0)).unwrap();
        builder.add_strip_vertex(point(1.0, 0.0)).unwrap();
        builder.add_strip_vertex(point(1.0, 1.0)).unwrap();
        let count = builder.end_geometry();
        assert_eq!(count, Count { vertices: 3 });
        assert_eq!(count.triangles(), 1);
    }

    assert_eq!(buffer.vertices.len(), 4);
}
