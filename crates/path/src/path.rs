//! A validated view over caller-owned path buffers.

use crate::geom::utils::is_finite;
use crate::math::{point, Point};
use crate::PathEvent;

/// The verbs of a path, stored alongside a point buffer and a weight buffer.
///
/// | verb          | points | weights |
/// |---------------|--------|---------|
/// | `Begin`       | 1      | 0       |
/// | `LineTo`      | 1      | 0       |
/// | `QuadraticTo` | 2      | 0       |
/// | `ConicTo`     | 2      | 1       |
/// | `Close`       | 0      | 0       |
/// | `End`         | 0      | 0       |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    Begin,
    LineTo,
    QuadraticTo,
    ConicTo,
    Close,
    End,
}

impl Verb {
    /// Number of points consumed by this verb.
    #[inline]
    pub fn num_points(self) -> usize {
        match self {
            Verb::Begin | Verb::LineTo => 1,
            Verb::QuadraticTo | Verb::ConicTo => 2,
            Verb::Close | Verb::End => 0,
        }
    }

    /// Number of weights consumed by this verb.
    #[inline]
    pub fn num_weights(self) -> usize {
        match self {
            Verb::ConicTo => 1,
            _ => 0,
        }
    }
}

/// The path buffers don't describe a well formed path.
///
/// Indices refer to the verb buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DegenerateInput {
    /// An edge, `Close` or `End` verb without a preceding `Begin`.
    MissingBegin { verb: usize },
    /// The point buffer is exhausted before this verb's points.
    MissingPoints { verb: usize },
    /// The weight buffer is exhausted before this conic's weight.
    MissingWeight { verb: usize },
    /// A conic weight is negative, infinite or NaN.
    InvalidWeight { verb: usize },
    /// One of this verb's points has an infinite or NaN coordinate.
    NonFinitePoint { verb: usize },
    /// The verbs don't consume all of the points.
    UnexpectedPoints { count: usize },
    /// The verbs don't consume all of the weights.
    UnexpectedWeights { count: usize },
}

#[cfg(feature = "std")]
impl core::fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DegenerateInput::MissingBegin { verb } => {
                std::write!(f, "Verb #{verb} is not preceded by a begin verb")
            }
            DegenerateInput::MissingPoints { verb } => {
                std::write!(f, "Missing points for verb #{verb}")
            }
            DegenerateInput::MissingWeight { verb } => {
                std::write!(f, "Missing weight for conic verb #{verb}")
            }
            DegenerateInput::InvalidWeight { verb } => {
                std::write!(f, "Invalid weight for conic verb #{verb}")
            }
            DegenerateInput::NonFinitePoint { verb } => {
                std::write!(f, "Verb #{verb} has a non-finite point")
            }
            DegenerateInput::UnexpectedPoints { count } => {
                std::write!(f, "{count} points are not used by any verb")
            }
            DegenerateInput::UnexpectedWeights { count } => {
                std::write!(f, "{count} weights are not used by any verb")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DegenerateInput {}

/// A view over the verb, point and weight buffers of a path.
///
/// The buffers are validated once in [`PathSlice::new`], iterating over a `PathSlice`
/// can't fail.
///
/// ## Example
///
/// ```
/// use conifer_path::{PathSlice, PathEvent, Verb};
/// use conifer_path::math::point;
///
/// let verbs = [Verb::Begin, Verb::ConicTo, Verb::Close];
/// let points = [point(0.0, 100.0), point(0.0, 200.0), point(100.0, 200.0)];
/// let weights = [0.7071];
///
/// let path = PathSlice::new(&verbs, &points, &weights).unwrap();
///
/// let events: Vec<PathEvent> = path.iter().collect();
/// assert_eq!(events.len(), 3);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PathSlice<'l> {
    verbs: &'l [Verb],
    points: &'l [Point],
    weights: &'l [f32],
}

impl<'l> PathSlice<'l> {
    /// Checks that the buffers describe a well formed path.
    pub fn new(
        verbs: &'l [Verb],
        points: &'l [Point],
        weights: &'l [f32],
    ) -> Result<Self, DegenerateInput> {
        let mut num_points = 0;
        let mut num_weights = 0;
        let mut in_sub_path = false;

        for (idx, &verb) in verbs.iter().enumerate() {
            match verb {
                Verb::Begin => {
                    in_sub_path = true;
                }
                Verb::Close | Verb::End => {
                    if !in_sub_path {
                        return Err(DegenerateInput::MissingBegin { verb: idx });
                    }
                    in_sub_path = false;
                }
                _ => {
                    if !in_sub_path {
                        return Err(DegenerateInput::MissingBegin { verb: idx });
                    }
                }
            }

            let verb_points = num_points..(num_points + verb.num_points());
            num_points = verb_points.end;
            match points.get(verb_points) {
                Some(pts) => {
                    if !pts.iter().all(|p| is_finite(*p)) {
                        return Err(DegenerateInput::NonFinitePoint { verb: idx });
                    }
                }
                None => {
                    return Err(DegenerateInput::MissingPoints { verb: idx });
                }
            }

            if verb.num_weights() > 0 {
                let weight = match weights.get(num_weights) {
                    Some(w) => *w,
                    None => {
                        return Err(DegenerateInput::MissingWeight { verb: idx });
                    }
                };
                if !weight.is_finite() || weight < 0.0 {
                    return Err(DegenerateInput::InvalidWeight { verb: idx });
                }
                num_weights += 1;
            }
        }

        if num_points < points.len() {
            return Err(DegenerateInput::UnexpectedPoints {
                count: points.len() - num_points,
            });
        }

        if num_weights < weights.len() {
            return Err(DegenerateInput::UnexpectedWeights {
                count: weights.len() - num_weights,
            });
        }

        Ok(PathSlice {
            verbs,
            points,
            weights,
        })
    }

    /// Returns an iterator over the path's events.
    pub fn iter(&self) -> Iter<'l> {
        Iter::new(self.verbs, self.points, self.weights)
    }

    pub fn verbs(&self) -> &'l [Verb] {
        self.verbs
    }

    pub fn points(&self) -> &'l [Point] {
        self.points
    }

    pub fn weights(&self) -> &'l [f32] {
        self.weights
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl<'l> IntoIterator for PathSlice<'l> {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl<'l> IntoIterator for &PathSlice<'l> {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// An iterator of `PathEvent` for `PathSlice`.
#[derive(Clone)]
pub struct Iter<'l> {
    verbs: ::core::slice::Iter<'l, Verb>,
    points: &'l [Point],
    weights: &'l [f32],
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    fn new(verbs: &'l [Verb], points: &'l [Point], weights: &'l [f32]) -> Self {
        Iter {
            verbs: verbs.iter(),
            points,
            weights,
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
        }
    }

    // The buffers were validated in PathSlice::new so the point and weight buffers
    // can't run out before the verbs do.
    #[inline]
    fn next_point(&mut self) -> Point {
        let (p, rest) = self.points.split_first().map_or(
            (self.current, self.points),
            |(p, rest)| (*p, rest),
        );
        self.points = rest;

        p
    }

    #[inline]
    fn next_weight(&mut self) -> f32 {
        let (w, rest) = self
            .weights
            .split_first()
            .map_or((1.0, self.weights), |(w, rest)| (*w, rest));
        self.weights = rest;

        w
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;
    #[inline]
    fn next(&mut self) -> Option<PathEvent> {
        match self.verbs.next() {
            Some(&Verb::Begin) => {
                self.current = self.next_point();
                self.first = self.current;
                Some(PathEvent::Begin { at: self.current })
            }
            Some(&Verb::LineTo) => {
                let from = self.current;
                self.current = self.next_point();
                Some(PathEvent::Line {
                    from,
                    to: self.current,
                })
            }
            Some(&Verb::QuadraticTo) => {
                let from = self.current;
                let ctrl = self.next_point();
                self.current = self.next_point();
                Some(PathEvent::Quadratic {
                    from,
                    ctrl,
                    to: self.current,
                })
            }
            Some(&Verb::ConicTo) => {
                let from = self.current;
                let ctrl = self.next_point();
                self.current = self.next_point();
                let weight = self.next_weight();
                Some(PathEvent::Conic {
                    from,
                    ctrl,
                    to: self.current,
                    weight,
                })
            }
            Some(&Verb::Close) => {
                let last = self.current;
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
            Some(&Verb::End) => {
                let last = self.current;
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: false,
                })
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verbs.size_hint()
    }
}

#[test]
fn iterate_rounded_corner() {
    let verbs = [Verb::Begin, Verb::LineTo, Verb::ConicTo, Verb::QuadraticTo, Verb::Close];
    let points = [
        point(0.0, 0.0),
        point(100.0, 0.0),
        point(200.0, 0.0),
        point(200.0, 100.0),
        point(100.0, 150.0),
        point(0.0, 100.0),
    ];
    let weights = [0.5];

    let path = PathSlice::new(&verbs, &points, &weights).unwrap();
    let mut iter = path.iter();

    assert_eq!(iter.size_hint(), (5, Some(5)));
    assert_eq!(iter.next(), Some(PathEvent::Begin { at: point(0.0, 0.0) }));
    assert_eq!(
        iter.next(),
        Some(PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(100.0, 0.0)
        })
    );
    assert_eq!(
        iter.next(),
        Some(PathEvent::Conic {
            from: point(100.0, 0.0),
            ctrl: point(200.0, 0.0),
            to: point(200.0, 100.0),
            weight: 0.5,
        })
    );
    assert_eq!(
        iter.next(),
        Some(PathEvent::Quadratic {
            from: point(200.0, 100.0),
            ctrl: point(100.0, 150.0),
            to: point(0.0, 100.0),
        })
    );
    assert_eq!(
        iter.next(),
        Some(PathEvent::End {
            last: point(0.0, 100.0),
            first: point(0.0, 0.0),
            close: true,
        })
    );
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn empty_path() {
    let path = PathSlice::new(&[], &[], &[]).unwrap();
    assert!(path.is_empty());
    assert_eq!(path.iter().next(), None);
}

#[test]
fn degenerate_inputs() {
    let p = point(1.0, 1.0);

    assert_eq!(
        PathSlice::new(&[Verb::LineTo], &[p], &[]).err(),
        Some(DegenerateInput::MissingBegin { verb: 0 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::End, Verb::LineTo], &[p, p], &[]).err(),
        Some(DegenerateInput::MissingBegin { verb: 2 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Close], &[], &[]).err(),
        Some(DegenerateInput::MissingBegin { verb: 0 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::QuadraticTo], &[p, p], &[]).err(),
        Some(DegenerateInput::MissingPoints { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::ConicTo], &[p, p, p], &[]).err(),
        Some(DegenerateInput::MissingWeight { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::ConicTo], &[p, p, p], &[-0.5]).err(),
        Some(DegenerateInput::InvalidWeight { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::ConicTo], &[p, p, p], &[f32::NAN]).err(),
        Some(DegenerateInput::InvalidWeight { verb: 1 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin], &[p, p, p], &[]).err(),
        Some(DegenerateInput::UnexpectedPoints { count: 2 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::LineTo], &[p, p], &[1.0]).err(),
        Some(DegenerateInput::UnexpectedWeights { count: 1 })
    );
    assert_eq!(
        PathSlice::new(&[Verb::Begin, Verb::LineTo], &[p, point(f32::INFINITY, 0.0)], &[]).err(),
        Some(DegenerateInput::NonFinitePoint { verb: 1 })
    );
}

#[test]
fn implicit_begin_after_begin() {
    // Starting a new sub-path without ending the previous one is allowed.
    let verbs = [Verb::Begin, Verb::LineTo, Verb::Begin, Verb::LineTo, Verb::End];
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(5.0, 5.0),
        point(6.0, 5.0),
    ];
    let path = PathSlice::new(&verbs, &points, &[]).unwrap();

    let events: std::vec::Vec<PathEvent> = path.iter().collect();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events[4],
        PathEvent::End {
            last: point(6.0, 5.0),
            first: point(5.0, 5.0),
            close: false,
        }
    );
}
