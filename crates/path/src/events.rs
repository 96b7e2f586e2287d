use crate::geom::{ConicSegment, QuadraticBezierSegment};
use crate::math::Point;

/// Represents an event or edge of path.
///
/// Edges carry their start point so that each event can be processed without
/// looking at the previous one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Conic {
        from: Point,
        ctrl: Point,
        to: Point,
        weight: f32,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

impl PathEvent {
    pub fn is_edge(&self) -> bool {
        match self {
            &PathEvent::Line { .. }
            | &PathEvent::Quadratic { .. }
            | &PathEvent::Conic { .. }
            | &PathEvent::End { close: true, .. } => true,
            _ => false,
        }
    }

    pub fn from(&self) -> Point {
        match *self {
            PathEvent::Line { from, .. }
            | PathEvent::Quadratic { from, .. }
            | PathEvent::Conic { from, .. }
            | PathEvent::Begin { at: from }
            | PathEvent::End { last: from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            PathEvent::Line { to, .. }
            | PathEvent::Quadratic { to, .. }
            | PathEvent::Conic { to, .. }
            | PathEvent::Begin { at: to }
            | PathEvent::End { first: to, .. } => to,
        }
    }

    /// Returns the conic segment of a `Conic` event.
    pub fn conic(&self) -> Option<ConicSegment<f32>> {
        match *self {
            PathEvent::Conic {
                from,
                ctrl,
                to,
                weight,
            } => Some(ConicSegment {
                from,
                ctrl,
                to,
                weight,
            }),
            _ => None,
        }
    }

    /// Returns the curve of a `Quadratic` event.
    pub fn quadratic(&self) -> Option<QuadraticBezierSegment<f32>> {
        match *self {
            PathEvent::Quadratic { from, ctrl, to } => {
                Some(QuadraticBezierSegment { from, ctrl, to })
            }
            _ => None,
        }
    }
}

#[test]
fn event_endpoints() {
    use crate::math::point;

    let conic = PathEvent::Conic {
        from: point(0.0, 100.0),
        ctrl: point(0.0, 200.0),
        to: point(100.0, 200.0),
        weight: 0.5,
    };

    assert!(conic.is_edge());
    assert_eq!(conic.from(), point(0.0, 100.0));
    assert_eq!(conic.to(), point(100.0, 200.0));
    assert_eq!(conic.conic().map(|c| c.weight), Some(0.5));
    assert_eq!(conic.quadratic(), None);

    let begin = PathEvent::Begin { at: point(1.0, 2.0) };
    assert!(!begin.is_edge());
    assert_eq!(begin.from(), begin.to());

    let end = PathEvent::End {
        last: point(3.0, 3.0),
        first: point(1.0, 2.0),
        close: false,
    };
    assert!(!end.is_edge());
    assert_eq!(end.to(), point(1.0, 2.0));
}
