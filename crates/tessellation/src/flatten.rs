//! Flattening of a path into the ordered vertices of its boundary.
//!
//! Every verb of the path is visited in traversal order:
//!
//! - `Begin` pushes its point,
//! - `Line` pushes its end point,
//! - `Quadratic` is bisected until flat and pushes the end point of each piece,
//! - `Conic` is first split into `2^e` quadratic bézier segments, each of them is then
//!   flattened like a `Quadratic` verb,
//! - `End` pushes nothing, the boundary is implicitly closed.
//!
//! Sub-paths are concatenated into a single boundary.

use crate::geom::utils::is_finite;
use crate::geom::QuadraticBezierSegment;
use crate::math::Point;
use crate::path::{DegenerateInput, PathEvent};
use crate::{ConicOverflow, StripOptions, TessellationError};

use alloc::vec::Vec;

/// Flattens a sequence of path events into the boundary polygon of the path.
///
/// Vertices are appended to `output`, in traversal order. Returns the number of appended
/// vertices.
///
/// Events with non-finite points and `Conic` events with a negative or non-finite weight
/// are reported as `DegenerateInput` errors where `verb` is the index of the event. In
/// that case `output` is left unchanged.
///
/// ```
/// use conifer_tessellation::{flatten_boundary, StripOptions};
/// use conifer_tessellation::math::point;
/// use conifer_tessellation::path::PathEvent;
///
/// let events = [
///     PathEvent::Begin { at: point(0.0, 0.0) },
///     PathEvent::Line { from: point(0.0, 0.0), to: point(1.0, 0.0) },
///     PathEvent::Line { from: point(1.0, 0.0), to: point(1.0, 1.0) },
///     PathEvent::End { last: point(1.0, 1.0), first: point(0.0, 0.0), close: true },
/// ];
///
/// let mut boundary = Vec::new();
/// let count = flatten_boundary(events.iter().cloned(), &StripOptions::DEFAULT, &mut boundary).unwrap();
///
/// assert_eq!(count, 3);
/// assert_eq!(boundary, vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]);
/// ```
pub fn flatten_boundary<Iter>(
    events: Iter,
    options: &StripOptions,
    output: &mut Vec<Point>,
) -> Result<usize, TessellationError>
where
    Iter: IntoIterator<Item = PathEvent>,
{
    let mut quad_points = Vec::new();
    BoundaryFlattener {
        options,
        output,
        quad_points: &mut quad_points,
    }
    .flatten(events)
}

pub(crate) struct BoundaryFlattener<'l> {
    pub options: &'l StripOptions,
    pub output: &'l mut Vec<Point>,
    /// Scratch buffer receiving the quadratic approximation of conics.
    pub quad_points: &'l mut Vec<Point>,
}

impl<'l> BoundaryFlattener<'l> {
    /// On error, `output` is restored to its length before the call.
    pub fn flatten<Iter>(&mut self, events: Iter) -> Result<usize, TessellationError>
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        let start = self.output.len();

        if let Err(e) = self.flatten_events(events) {
            self.output.truncate(start);
            return Err(e);
        }

        Ok(self.output.len() - start)
    }

    fn flatten_events<Iter>(&mut self, events: Iter) -> Result<(), TessellationError>
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        for (idx, event) in events.into_iter().enumerate() {
            match event {
                PathEvent::Begin { at } => {
                    check_points(&[at], idx)?;
                    self.output.push(at);
                }
                PathEvent::Line { from, to } => {
                    check_points(&[from, to], idx)?;
                    self.output.push(to);
                }
                PathEvent::Quadratic { from, ctrl, to } => {
                    check_points(&[from, ctrl, to], idx)?;
                    self.quadratic(&QuadraticBezierSegment { from, ctrl, to });
                }
                PathEvent::Conic { .. } => {
                    self.conic(&event, idx)?;
                }
                PathEvent::End { .. } => {}
            }
        }

        Ok(())
    }

    fn quadratic(&mut self, curve: &QuadraticBezierSegment<f32>) {
        let params = self.options.subdivision_parameters();
        let output = &mut *self.output;
        curve.for_each_subdivided(&params, &mut |p| output.push(p));
    }

    fn conic(&mut self, event: &PathEvent, idx: usize) -> Result<(), TessellationError> {
        let conic = match event.conic() {
            Some(conic) => conic,
            None => return Ok(()),
        };

        if !conic.is_valid() {
            let weight = conic.weight;
            return Err(if weight.is_finite() && weight >= 0.0 {
                DegenerateInput::NonFinitePoint { verb: idx }
            } else {
                DegenerateInput::InvalidWeight { verb: idx }
            }
            .into());
        }

        let max_exponent = self.options.quad_exponent_limit();
        let exponent = match conic.checked_quad_exponent(self.options.tolerance, max_exponent) {
            Ok(exponent) => exponent,
            Err(e) => match self.options.conic_overflow {
                ConicOverflow::Clamp => {
                    log::warn!(
                        "Conic #{} needs more than 2^{} quadratic segments, the approximation \
                         exceeds the tolerance ({}).",
                        idx,
                        max_exponent,
                        self.options.tolerance,
                    );
                    max_exponent
                }
                ConicOverflow::Error => {
                    return Err(e.into());
                }
            },
        };

        self.quad_points.clear();
        conic.extend_with_quads(exponent, max_exponent, self.quad_points)?;

        let params = self.options.subdivision_parameters();
        let output = &mut *self.output;
        if let Some((&first, rest)) = self.quad_points.split_first() {
            let mut from = first;
            for pair in rest.chunks_exact(2) {
                let curve = QuadraticBezierSegment {
                    from,
                    ctrl: pair[0],
                    to: pair[1],
                };
                curve.for_each_subdivided(&params, &mut |p| output.push(p));
                from = pair[1];
            }
        }

        Ok(())
    }
}

fn check_points(points: &[Point], idx: usize) -> Result<(), DegenerateInput> {
    if points.iter().all(|p| is_finite(*p)) {
        Ok(())
    } else {
        Err(DegenerateInput::NonFinitePoint { verb: idx })
    }
}

#[test]
fn flatten_lines_and_quadratics() {
    use crate::math::point;

    let events = [
        PathEvent::Begin { at: point(0.0, 0.0) },
        PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(10.0, 0.0),
        },
        // Collinear control point, flat without subdivision.
        PathEvent::Quadratic {
            from: point(10.0, 0.0),
            ctrl: point(10.0, 5.0),
            to: point(10.0, 10.0),
        },
        PathEvent::End {
            last: point(10.0, 10.0),
            first: point(0.0, 0.0),
            close: true,
        },
    ];

    let mut boundary = Vec::new();
    let count = flatten_boundary(events.iter().cloned(), &StripOptions::DEFAULT, &mut boundary)
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        boundary,
        alloc::vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
    );
}

#[test]
fn flatten_appends() {
    use crate::math::point;

    let events = [
        PathEvent::Begin { at: point(1.0, 1.0) },
        PathEvent::Line {
            from: point(1.0, 1.0),
            to: point(2.0, 1.0),
        },
    ];

    let mut boundary = alloc::vec![point(-1.0, -1.0)];
    let count = flatten_boundary(events.iter().cloned(), &StripOptions::DEFAULT, &mut boundary)
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(boundary.len(), 3);
    assert_eq!(boundary[0], point(-1.0, -1.0));
}

#[test]
fn invalid_conics() {
    use crate::math::point;

    let conic = |weight: f32, ctrl: Point| PathEvent::Conic {
        from: point(0.0, 0.0),
        ctrl,
        to: point(1.0, 0.0),
        weight,
    };
    let begin = PathEvent::Begin { at: point(0.0, 0.0) };
    let mut boundary = alloc::vec![point(5.0, 5.0)];

    for &weight in &[-1.0, f32::NAN, f32::INFINITY] {
        let result = flatten_boundary(
            [begin, conic(weight, point(0.5, 1.0))].iter().cloned(),
            &StripOptions::DEFAULT,
            &mut boundary,
        );
        assert_eq!(
            result,
            Err(TessellationError::DegenerateInput(
                DegenerateInput::InvalidWeight { verb: 1 }
            ))
        );
        assert_eq!(boundary, alloc::vec![point(5.0, 5.0)]);
    }

    let result = flatten_boundary(
        [begin, conic(1.0, point(f32::NAN, 1.0))].iter().cloned(),
        &StripOptions::DEFAULT,
        &mut boundary,
    );
    assert_eq!(
        result,
        Err(TessellationError::DegenerateInput(
            DegenerateInput::NonFinitePoint { verb: 1 }
        ))
    );
    assert_eq!(boundary, alloc::vec![point(5.0, 5.0)]);
}

#[test]
fn non_finite_points() {
    use crate::math::point;

    let nan = point(f32::NAN, 1.0);
    let inf = point(0.0, f32::INFINITY);
    let begin = PathEvent::Begin { at: point(0.0, 0.0) };
    let line = PathEvent::Line {
        from: point(0.0, 0.0),
        to: point(1.0, 0.0),
    };

    let cases = [
        [begin, line, PathEvent::Begin { at: nan }],
        [
            begin,
            line,
            PathEvent::Line {
                from: point(1.0, 0.0),
                to: inf,
            },
        ],
        [
            begin,
            line,
            PathEvent::Quadratic {
                from: point(1.0, 0.0),
                ctrl: nan,
                to: point(1.0, 1.0),
            },
        ],
        [
            begin,
            line,
            PathEvent::Quadratic {
                from: point(1.0, 0.0),
                ctrl: point(2.0, 1.0),
                to: inf,
            },
        ],
        [
            begin,
            line,
            PathEvent::Conic {
                from: point(1.0, 0.0),
                ctrl: nan,
                to: point(1.0, 1.0),
                weight: 0.5,
            },
        ],
    ];

    // A large depth would produce a huge number of vertices if the curve was accepted.
    let options = StripOptions::DEFAULT.with_max_flattening_depth(31);
    for events in &cases {
        let mut boundary = Vec::new();
        let result = flatten_boundary(events.iter().cloned(), &options, &mut boundary);
        assert_eq!(
            result,
            Err(TessellationError::DegenerateInput(
                DegenerateInput::NonFinitePoint { verb: 2 }
            ))
        );
        assert!(boundary.is_empty());
    }
}

#[test]
fn error_leaves_output_unchanged() {
    use crate::math::point;

    let events = [
        PathEvent::Begin { at: point(0.0, 0.0) },
        PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(1.0, 0.0),
        },
        PathEvent::Conic {
            from: point(1.0, 0.0),
            ctrl: point(1.0, 1.0),
            to: point(0.0, 1.0),
            weight: -1.0,
        },
    ];

    let mut boundary = Vec::new();
    let result = flatten_boundary(events.iter().cloned(), &StripOptions::DEFAULT, &mut boundary);

    assert_eq!(
        result,
        Err(TessellationError::DegenerateInput(
            DegenerateInput::InvalidWeight { verb: 2 }
        ))
    );
    assert!(boundary.is_empty());
}
