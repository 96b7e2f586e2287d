//! Specific path types for polygons.

use crate::math::Point;
use crate::PathEvent;

/// A view over a sequence of endpoints forming a polygon.
///
/// ## Example
///
/// ```
/// use conifer_path::polygon::Polygon;
/// use conifer_path::math::point;
///
/// let path = Polygon {
///     points: &[
///         point(0.0, 0.0),
///         point(10.0, 10.0),
///         point(0.0, 10.0),
///     ],
///     closed: true,
/// };
///
/// for event in path.path_events() {
///     // same as iterating a regular `PathSlice` object.
/// }
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Polygon<'l> {
    pub points: &'l [Point],
    pub closed: bool,
}

impl<'l> Polygon<'l> {
    /// Returns an iterator of `PathEvent`.
    pub fn path_events(&self) -> PathEvents<'l> {
        PathEvents {
            points: self.points.iter(),
            first: None,
            prev: None,
            closed: self.closed,
        }
    }
}

impl<'l> IntoIterator for Polygon<'l> {
    type Item = PathEvent;
    type IntoIter = PathEvents<'l>;

    fn into_iter(self) -> PathEvents<'l> {
        self.path_events()
    }
}

/// An iterator of `PathEvent` for `Polygon`.
#[derive(Clone)]
pub struct PathEvents<'l> {
    points: core::slice::Iter<'l, Point>,
    first: Option<Point>,
    prev: Option<Point>,
    closed: bool,
}

impl<'l> Iterator for PathEvents<'l> {
    type Item = PathEvent;
    fn next(&mut self) -> Option<PathEvent> {
        let next = self.points.next();
        match (self.prev, next) {
            (Some(from), Some(to)) => {
                self.prev = Some(*to);
                Some(PathEvent::Line { from, to: *to })
            }
            (None, Some(at)) => {
                self.prev = Some(*at);
                self.first = Some(*at);
                Some(PathEvent::Begin { at: *at })
            }
            (Some(last), None) => {
                self.prev = None;
                Some(PathEvent::End {
                    last,
                    first: self.first.unwrap_or(last),
                    close: self.closed,
                })
            }
            (None, None) => None,
        }
    }
}

#[test]
fn event_ids() {
    use crate::math::point;

    let poly = Polygon {
        points: &[point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)],
        closed: true,
    };

    let mut iter = poly.path_events();
    assert_eq!(iter.next(), Some(PathEvent::Begin { at: point(0.0, 0.0) }));
    assert_eq!(
        iter.next(),
        Some(PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(1.0, 1.0)
        })
    );
    assert_eq!(
        iter.next(),
        Some(PathEvent::Line {
            from: point(1.0, 1.0),
            to: point(2.0, 2.0)
        })
    );
    assert_eq!(
        iter.next(),
        Some(PathEvent::End {
            last: point(2.0, 2.0),
            first: point(0.0, 0.0),
            close: true
        })
    );
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn empty_polygon() {
    let poly = Polygon {
        points: &[],
        closed: false,
    };

    assert_eq!(poly.path_events().next(), None);
}
