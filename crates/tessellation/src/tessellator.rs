use crate::fan::strip_order;
use crate::flatten::BoundaryFlattener;
use crate::geometry_builder::StripGeometryBuilder;
use crate::math::Point;
use crate::path::{PathEvent, PathSlice};
use crate::{StripOptions, TessellationError, TessellationResult};

use alloc::vec::Vec;

#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            log::debug!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            log::debug!($fmt, $($arg)*);
        }
    );
}

#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => {};
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {};
}

/// A strip tessellator for simple closed paths.
///
/// The tessellator flattens the path into its boundary polygon and reorders the
/// boundary into a triangle strip covering the interior of the path.
///
/// It keeps its scratch buffers between tessellations, so it is usually best to reuse the
/// same tessellator object instead of creating a new one for each path.
///
/// # Examples
///
/// ```
/// use conifer_tessellation::geometry_builder::{simple_builder, VertexBuffer};
/// use conifer_tessellation::math::{point, Point};
/// use conifer_tessellation::path::{PathSlice, Verb};
/// use conifer_tessellation::{StripOptions, StripTessellator};
///
/// // A quarter of disc.
/// let verbs = [Verb::Begin, Verb::LineTo, Verb::ConicTo, Verb::Close];
/// let points = [
///     point(100.0, 100.0),
///     point(0.0, 100.0),
///     point(0.0, 200.0), point(100.0, 200.0),
/// ];
/// let weights = [std::f32::consts::FRAC_1_SQRT_2];
///
/// let path = PathSlice::new(&verbs, &points, &weights).unwrap();
///
/// let mut buffer: VertexBuffer<Point> = VertexBuffer::new();
/// let mut tessellator = StripTessellator::new();
///
/// let count = tessellator.tessellate_path(
///     &path,
///     &StripOptions::tolerance(0.25),
///     &mut simple_builder(&mut buffer),
/// ).unwrap();
///
/// assert_eq!(count.vertices as usize, buffer.vertices.len());
/// // The strip starts with the first vertex of the path followed by the last one.
/// assert_eq!(buffer.vertices[0], point(100.0, 100.0));
/// assert_eq!(buffer.vertices[1], point(100.0, 200.0));
/// ```
pub struct StripTessellator {
    boundary: Vec<Point>,
    quad_points: Vec<Point>,
    log: bool,
}

impl Default for StripTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl StripTessellator {
    /// Constructor.
    pub fn new() -> Self {
        #[cfg(all(debug_assertions, feature = "std"))]
        let log = std::env::var("CONIFER_FORCE_LOGGING").is_ok();
        #[cfg(not(all(debug_assertions, feature = "std")))]
        let log = false;

        StripTessellator {
            boundary: Vec::new(),
            quad_points: Vec::new(),
            log,
        }
    }

    /// Enable/disable some verbose logging during the tessellation, for
    /// debugging purposes.
    ///
    /// Logging only happens in debug builds with the `std` feature. The messages go
    /// through the `log` crate at the debug level.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(all(debug_assertions, feature = "std"))]
        let forced = std::env::var("CONIFER_FORCE_LOGGING").is_ok();

        #[cfg(not(all(debug_assertions, feature = "std")))]
        let forced = false;

        self.log = is_enabled || forced;
    }

    /// Compute the tessellation from a path iterator.
    ///
    /// On error, the geometry builder's `abort_geometry` is called and no geometry is kept.
    pub fn tessellate(
        &mut self,
        path: impl IntoIterator<Item = PathEvent>,
        options: &StripOptions,
        output: &mut dyn StripGeometryBuilder,
    ) -> TessellationResult {
        output.begin_geometry();

        if let Err(e) = self.tessellate_impl(path, options, output) {
            tess_log!(self, "Tessellation failed with error: {:?}.", e);
            output.abort_geometry();

            return Err(e);
        }

        let count = output.end_geometry();
        tess_log!(
            self,
            "{} strip vertices, {} triangles.",
            count.vertices,
            count.triangles()
        );

        Ok(count)
    }

    /// Compute the tessellation of a validated path.
    pub fn tessellate_path(
        &mut self,
        path: &PathSlice,
        options: &StripOptions,
        output: &mut dyn StripGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate(path.iter(), options, output)
    }

    /// Flattens the path and returns its boundary polygon, without reordering it.
    ///
    /// The returned slice is valid until the next use of the tessellator.
    pub fn flatten(
        &mut self,
        path: impl IntoIterator<Item = PathEvent>,
        options: &StripOptions,
    ) -> Result<&[Point], TessellationError> {
        self.flatten_boundary(path, options)?;

        Ok(&self.boundary)
    }

    fn tessellate_impl(
        &mut self,
        path: impl IntoIterator<Item = PathEvent>,
        options: &StripOptions,
        output: &mut dyn StripGeometryBuilder,
    ) -> Result<(), TessellationError> {
        self.flatten_boundary(path, options)?;

        for idx in strip_order(self.boundary.len()) {
            output.add_strip_vertex(self.boundary[idx])?;
        }

        Ok(())
    }

    fn flatten_boundary(
        &mut self,
        path: impl IntoIterator<Item = PathEvent>,
        options: &StripOptions,
    ) -> Result<usize, TessellationError> {
        self.boundary.clear();

        let count = BoundaryFlattener {
            options,
            output: &mut self.boundary,
            quad_points: &mut self.quad_points,
        }
        .flatten(path)?;

        tess_log!(
            self,
            "Flattened boundary: {} vertices (tolerance {}).",
            count,
            options.tolerance
        );

        Ok(count)
    }
}

#[test]
fn reuse_tessellator() {
    use crate::geometry_builder::{simple_builder, VertexBuffer};
    use crate::math::point;
    use crate::path::Polygon;

    let mut tessellator = StripTessellator::new();
    let mut buffer: VertexBuffer<Point> = VertexBuffer::new();

    let square = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let triangle = [point(0.0, 0.0), point(2.0, 0.0), point(1.0, 1.0)];

    let count = tessellator
        .tessellate(
            Polygon {
                points: &square,
                closed: true,
            },
            &StripOptions::DEFAULT,
            &mut simple_builder(&mut buffer),
        )
        .unwrap();
    assert_eq!(count.vertices, 4);
    assert_eq!(
        buffer.vertices,
        alloc::vec![
            point(0.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 0.0),
            point(1.0, 1.0)
        ]
    );

    buffer.clear();
    let count = tessellator
        .tessellate(
            Polygon {
                points: &triangle,
                closed: true,
            },
            &StripOptions::DEFAULT,
            &mut simple_builder(&mut buffer),
        )
        .unwrap();
    assert_eq!(count.vertices, 3);
    assert_eq!(count.triangles(), 1);
    assert_eq!(
        buffer.vertices,
        alloc::vec![point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)]
    );

    let boundary = tessellator
        .flatten(
            Polygon {
                points: &square,
                closed: true,
            },
            &StripOptions::DEFAULT,
        )
        .unwrap();
    assert_eq!(boundary, &square[..]);
}
