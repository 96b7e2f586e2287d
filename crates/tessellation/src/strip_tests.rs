use crate::geom::{ConicSegment, LineSegment};
use crate::geometry_builder::*;
use crate::math::*;
use crate::path::{DegenerateInput, PathEvent, PathSlice, Polygon, Verb};
use crate::{
    ConicOverflow, ExponentBoundExceeded, StripOptions, StripTessellator, TessellationError,
};

use alloc::vec::Vec;
use core::f32::consts::FRAC_1_SQRT_2;

fn tessellate(
    path: PathSlice,
    options: &StripOptions,
    log: bool,
) -> Result<Vec<Point>, TessellationError> {
    let mut buffer: VertexBuffer<Point> = VertexBuffer::new();
    {
        let mut vertex_builder = simple_builder(&mut buffer);
        let mut tess = StripTessellator::new();
        tess.set_logging(log);
        tess.tessellate_path(&path, options, &mut vertex_builder)?;
    }

    Ok(buffer.vertices)
}

fn quarter_arc() -> [PathEvent; 2] {
    [
        PathEvent::Begin {
            at: point(0.0, 100.0),
        },
        PathEvent::Conic {
            from: point(0.0, 100.0),
            ctrl: point(0.0, 200.0),
            to: point(100.0, 200.0),
            weight: FRAC_1_SQRT_2,
        },
    ]
}

fn assert_on_circle(polyline: &[Point], center: Point, radius: f32, tolerance: f32) {
    for p in polyline {
        let d = (*p - center).length();
        assert!(
            (d - radius).abs() <= tolerance,
            "{:?} is {} away from the circle",
            p,
            (d - radius).abs()
        );
    }

    for edge in polyline.windows(2) {
        let mid = edge[0].lerp(edge[1], 0.5);
        let d = (mid - center).length();
        assert!(
            (d - radius).abs() <= tolerance,
            "the edge {:?} is {} away from the circle",
            edge,
            (d - radius).abs()
        );
    }
}

#[test]
fn test_quarter_arc() {
    let conic = ConicSegment {
        from: point(0.0, 100.0),
        ctrl: point(0.0, 200.0),
        to: point(100.0, 200.0),
        weight: FRAC_1_SQRT_2,
    };
    assert!(conic.quad_exponent(0.25) >= 1);

    let mut tess = StripTessellator::new();
    let boundary = tess
        .flatten(quarter_arc().iter().cloned(), &StripOptions::tolerance(0.25))
        .unwrap();

    assert_eq!(boundary.first(), Some(&point(0.0, 100.0)));
    assert_eq!(boundary.last(), Some(&point(100.0, 200.0)));
    assert!(boundary.len() > 2);

    assert_on_circle(boundary, point(100.0, 100.0), 100.0, 0.25);

    // Every point of the exact curve is close to the boundary.
    for i in 0..=64 {
        let p = conic.sample(i as f32 / 64.0);
        let d = boundary
            .windows(2)
            .map(|edge| LineSegment { from: edge[0], to: edge[1] }.distance_to_point(p))
            .fold(f32::INFINITY, f32::min);
        assert!(d <= 0.25, "{:?} is {} away from the boundary", p, d);
    }
}

#[test]
fn test_quarter_arc_no_flattening() {
    // A depth of zero keeps the quadratic segments' end points only.
    let options = StripOptions::tolerance(0.25).with_max_flattening_depth(0);
    let exponent = ConicSegment {
        from: point(0.0, 100.0),
        ctrl: point(0.0, 200.0),
        to: point(100.0, 200.0),
        weight: FRAC_1_SQRT_2,
    }
    .quad_exponent(0.25);

    let mut tess = StripTessellator::new();
    let boundary = tess
        .flatten(quarter_arc().iter().cloned(), &options)
        .unwrap();

    assert_eq!(boundary.len(), 1 + (1 << exponent));
}

#[test]
fn test_invalid_tolerance() {
    // Negative and non-finite tolerances approximate conics with a single quadratic curve.
    let mut tess = StripTessellator::new();
    let reference: Vec<Point> = tess
        .flatten(
            quarter_arc().iter().cloned(),
            &StripOptions::DEFAULT.with_max_quad_exponent(0),
        )
        .unwrap()
        .to_vec();

    for &tolerance in &[-1.0, f32::NAN, f32::INFINITY] {
        let boundary = tess
            .flatten(
                quarter_arc().iter().cloned(),
                &StripOptions::tolerance(tolerance),
            )
            .unwrap();
        assert_eq!(boundary, &reference[..]);
    }
}

#[test]
fn test_rounded_rectangle() {
    let w = FRAC_1_SQRT_2;
    let verbs = [
        Verb::Begin,
        Verb::LineTo,
        Verb::ConicTo,
        Verb::LineTo,
        Verb::ConicTo,
        Verb::LineTo,
        Verb::ConicTo,
        Verb::LineTo,
        Verb::ConicTo,
        Verb::Close,
    ];
    let points = [
        point(20.0, 0.0),
        point(180.0, 0.0),
        point(200.0, 0.0),
        point(200.0, 20.0),
        point(200.0, 80.0),
        point(200.0, 100.0),
        point(180.0, 100.0),
        point(20.0, 100.0),
        point(0.0, 100.0),
        point(0.0, 80.0),
        point(0.0, 20.0),
        point(0.0, 0.0),
        point(20.0, 0.0),
    ];
    let weights = [w, w, w, w];

    let path = PathSlice::new(&verbs, &points, &weights).unwrap();
    let options = StripOptions::tolerance(0.25);

    let mut tess = StripTessellator::new();
    let boundary = tess.flatten(path.iter(), &options).unwrap().to_vec();
    let strip = tessellate(path, &options, false).unwrap();

    assert_eq!(strip.len(), boundary.len());
    assert_eq!(strip[0], boundary[0]);
    assert_eq!(strip[1], boundary[boundary.len() - 1]);
    assert_eq!(strip[2], boundary[1]);

    let corners = [
        point(180.0, 20.0),
        point(180.0, 80.0),
        point(20.0, 80.0),
        point(20.0, 20.0),
    ];

    for p in &boundary {
        assert!(p.x >= -0.01 && p.x <= 200.01, "{:?}", p);
        assert!(p.y >= -0.01 && p.y <= 100.01, "{:?}", p);

        let in_corner = (p.x < 20.0 || p.x > 180.0) && (p.y < 20.0 || p.y > 80.0);
        if in_corner {
            let center = corners
                .iter()
                .cloned()
                .min_by(|a, b| {
                    let da = (*a - *p).square_length();
                    let db = (*b - *p).square_length();
                    da.partial_cmp(&db).unwrap()
                })
                .unwrap();
            assert!(((*p - center).length() - 20.0).abs() <= 0.25, "{:?}", p);
        }
    }
}

#[test]
fn test_sub_paths_are_concatenated() {
    let verbs = [
        Verb::Begin,
        Verb::LineTo,
        Verb::LineTo,
        Verb::Close,
        Verb::Begin,
        Verb::LineTo,
        Verb::End,
    ];
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(5.0, 5.0),
        point(6.0, 5.0),
    ];

    let path = PathSlice::new(&verbs, &points, &[]).unwrap();
    let strip = tessellate(path, &StripOptions::DEFAULT, true).unwrap();

    assert_eq!(
        strip,
        alloc::vec![
            point(0.0, 0.0),
            point(6.0, 5.0),
            point(1.0, 0.0),
            point(5.0, 5.0),
            point(1.0, 1.0),
        ]
    );
}

#[test]
fn test_empty_path() {
    let path = PathSlice::new(&[], &[], &[]).unwrap();
    assert_eq!(tessellate(path, &StripOptions::DEFAULT, false), Ok(Vec::new()));

    let mut tess = StripTessellator::new();
    let count = tess
        .tessellate(
            Polygon {
                points: &[point(1.0, 1.0)],
                closed: true,
            },
            &StripOptions::DEFAULT,
            &mut NoOutput::new(),
        )
        .unwrap();
    assert_eq!(count, Count { vertices: 1 });
    assert_eq!(count.triangles(), 0);
}

#[test]
fn test_conic_overflow() {
    // Deviates by about 60000 units from its quadratic approximation.
    let events = [
        PathEvent::Begin {
            at: point(0.0, 0.0),
        },
        PathEvent::Conic {
            from: point(0.0, 0.0),
            ctrl: point(0.0, 1000000.0),
            to: point(1000000.0, 1000000.0),
            weight: FRAC_1_SQRT_2,
        },
    ];

    let mut tess = StripTessellator::new();

    let clamped = StripOptions::tolerance(0.25);
    let count = tess
        .tessellate(events.iter().cloned(), &clamped, &mut NoOutput::new())
        .unwrap();
    assert!(count.vertices > 32);

    let strict = StripOptions::tolerance(0.25).with_conic_overflow(ConicOverflow::Error);
    assert_eq!(
        tess.tessellate(events.iter().cloned(), &strict, &mut NoOutput::new()),
        Err(TessellationError::ExponentBoundExceeded(
            ExponentBoundExceeded { max_exponent: 5 }
        )),
    );

    // The quarter circle needs 8 segments at this tolerance.
    let strict = strict.with_max_quad_exponent(1);
    assert_eq!(
        tess.tessellate(quarter_arc().iter().cloned(), &strict, &mut NoOutput::new()),
        Err(TessellationError::ExponentBoundExceeded(
            ExponentBoundExceeded { max_exponent: 1 }
        )),
    );

    let relaxed = strict.with_tolerance(10.0);
    assert!(tess
        .tessellate(quarter_arc().iter().cloned(), &relaxed, &mut NoOutput::new())
        .is_ok());
}

#[test]
fn test_degenerate_input() {
    let verbs = [Verb::Begin, Verb::ConicTo];
    let points = [point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)];

    assert_eq!(
        PathSlice::new(&verbs, &points, &[]).err(),
        Some(DegenerateInput::MissingWeight { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&verbs, &points[..2], &[1.0]).err(),
        Some(DegenerateInput::MissingPoints { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&verbs, &points, &[-0.5]).err(),
        Some(DegenerateInput::InvalidWeight { verb: 1 })
    );

    // Invalid event streams are rejected without producing geometry.
    let mut buffer: VertexBuffer<Point> = VertexBuffer::new();
    buffer.vertices.push(point(42.0, 42.0));

    let events = [
        PathEvent::Begin {
            at: point(0.0, 0.0),
        },
        PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(1.0, 0.0),
        },
        PathEvent::Conic {
            from: point(1.0, 0.0),
            ctrl: point(1.0, 1.0),
            to: point(0.0, 1.0),
            weight: f32::NAN,
        },
    ];

    let mut tess = StripTessellator::new();
    assert_eq!(
        tess.tessellate(
            events.iter().cloned(),
            &StripOptions::DEFAULT,
            &mut simple_builder(&mut buffer)
        ),
        Err(TessellationError::DegenerateInput(
            DegenerateInput::InvalidWeight { verb: 2 }
        )),
    );
    assert_eq!(buffer.vertices, alloc::vec![point(42.0, 42.0)]);
}

#[test]
fn test_too_many_vertices() {
    // This test checks that the tessellator returns the proper error when
    // the geometry builder refuses vertices, and aborts the geometry.

    struct Builder {
        max_vertices: u32,
        aborted: bool,
    }

    impl StripGeometryBuilder for Builder {
        fn add_strip_vertex(&mut self, _: Point) -> Result<(), GeometryBuilderError> {
            if self.max_vertices == 0 {
                return Err(GeometryBuilderError::TooManyVertices);
            }
            self.max_vertices -= 1;
            Ok(())
        }

        fn end_geometry(&mut self) -> Count {
            Count { vertices: 0 }
        }

        fn abort_geometry(&mut self) {
            self.aborted = true;
        }
    }

    let mut tess = StripTessellator::new();
    let options = StripOptions::tolerance(0.25);

    for &max_vertices in &[0, 1, 10] {
        let mut builder = Builder {
            max_vertices,
            aborted: false,
        };
        assert_eq!(
            tess.tessellate(quarter_arc().iter().cloned(), &options, &mut builder),
            Err(TessellationError::GeometryBuilder(
                GeometryBuilderError::TooManyVertices
            )),
        );
        assert!(builder.aborted);
    }
}

#[test]
fn test_custom_vertices() {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Vertex {
        position: [f32; 2],
        index: u32,
    }

    struct Ctor {
        next: u32,
    }

    impl StripVertexConstructor<Vertex> for Ctor {
        fn new_vertex(&mut self, position: Point) -> Vertex {
            self.next += 1;
            Vertex {
                position: position.to_array(),
                index: self.next - 1,
            }
        }
    }

    let mut buffer: VertexBuffer<Vertex> = VertexBuffer::new();
    let mut tess = StripTessellator::new();
    let count = tess
        .tessellate(
            quarter_arc().iter().cloned(),
            &StripOptions::DEFAULT,
            &mut BufferBuilder::new(&mut buffer, Ctor { next: 0 }),
        )
        .unwrap();

    assert_eq!(count.vertices as usize, buffer.vertices.len());
    for (i, v) in buffer.vertices.iter().enumerate() {
        assert_eq!(v.index, i as u32);
    }
    assert_eq!(buffer.vertices[0].position, [0.0, 100.0]);
    assert_eq!(buffer.vertices[1].position, [100.0, 200.0]);
}
