use crate::scalar::Scalar;
use crate::utils::{cross, midpoint};
use crate::Point;
use alloc::vec::Vec;
use arrayvec::ArrayVec;

/// Hard limit for the recursion depth of the quadratic bisection.
///
/// Larger `max_depth` parameters are clamped to this value.
pub const MAX_SUBDIVISION_DEPTH: u32 = 31;

const STACK_CAPACITY: usize = MAX_SUBDIVISION_DEPTH as usize + 1;

/// Parameters of the recursive bisection performed by
/// [`QuadraticBezierSegment::subdivided`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SubdivisionParameters<S> {
    /// Segments at this depth are emitted even if they are not flat yet.
    ///
    /// Default value: `SubdivisionParameters::DEFAULT_MAX_DEPTH`.
    pub max_depth: u32,

    /// A segment is flat when the square of its flatness (see
    /// [`QuadraticBezierSegment::flatness`]) is lower or equal to this value.
    ///
    /// Default value: `SubdivisionParameters::DEFAULT_FLATNESS_THRESHOLD`.
    pub flatness_threshold: S,
}

impl<S: Scalar> SubdivisionParameters<S> {
    pub const DEFAULT_MAX_DEPTH: u32 = 15;
    pub const DEFAULT_FLATNESS_THRESHOLD: f32 = 0.25;

    #[inline]
    pub fn new(max_depth: u32, flatness_threshold: S) -> Self {
        SubdivisionParameters {
            max_depth,
            flatness_threshold,
        }
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn with_flatness_threshold(mut self, threshold: S) -> Self {
        self.flatness_threshold = threshold;
        self
    }
}

impl<S: Scalar> Default for SubdivisionParameters<S> {
    fn default() -> Self {
        SubdivisionParameters {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            flatness_threshold: S::value(Self::DEFAULT_FLATNESS_THRESHOLD),
        }
    }
}

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Split this curve at its midpoint using only midpoint computations (de Casteljau
    /// with `t = 0.5`).
    pub fn split_in_half(&self) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let from_ctrl = midpoint(self.from, self.ctrl);
        let ctrl_to = midpoint(self.ctrl, self.to);
        let mid = midpoint(from_ctrl, ctrl_to);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: from_ctrl,
                to: mid,
            },
            QuadraticBezierSegment {
                from: mid,
                ctrl: ctrl_to,
                to: self.to,
            },
        )
    }

    /// Cross product of `ctrl - from` and `to - ctrl`.
    ///
    /// This is the length of the baseline multiplied by the distance between the control
    /// point and the baseline, zero when the three points are aligned.
    #[inline]
    pub fn flatness(&self) -> S {
        cross(self.ctrl - self.from, self.to - self.ctrl)
    }

    /// Returns true if the square of the flatness is lower or equal to `threshold`.
    #[inline]
    pub fn is_flat(&self, threshold: S) -> bool {
        let d = self.flatness();
        d * d <= threshold
    }

    /// Returns an iterator over the end points of the line segments approximating
    /// this curve.
    ///
    /// The curve is recursively bisected until each piece is flat or `max_depth` is reached.
    /// The start of the curve is not produced, the last produced point is always `self.to`.
    pub fn subdivided(&self, params: &SubdivisionParameters<S>) -> Subdivided<S> {
        Subdivided::new(self, params)
    }

    /// Invokes the callback for each end point of the line segments approximating this curve.
    ///
    /// See [`subdivided`](#method.subdivided).
    pub fn for_each_subdivided<F>(&self, params: &SubdivisionParameters<S>, callback: &mut F)
    where
        F: FnMut(Point<S>),
    {
        for p in self.subdivided(params) {
            callback(p);
        }
    }
}

/// Flattens the quadratic bézier curve `from, ctrl, to` with the default flatness threshold.
///
/// Returns at most `2^max_depth` points, the last one being `to`.
pub fn flatten_quadratic<S: Scalar>(
    from: Point<S>,
    ctrl: Point<S>,
    to: Point<S>,
    max_depth: u32,
) -> Vec<Point<S>> {
    let curve = QuadraticBezierSegment { from, ctrl, to };
    let params = SubdivisionParameters::default().with_max_depth(max_depth);

    curve.subdivided(&params).collect()
}

/// Iterator over the flattened end points of a quadratic bézier segment.
///
/// Pieces are visited depth-first, the first half before the second half, so points
/// come out in curve order.
pub struct Subdivided<S> {
    stack: ArrayVec<(QuadraticBezierSegment<S>, u32), STACK_CAPACITY>,
    max_depth: u32,
    threshold: S,
}

impl<S: Scalar> Subdivided<S> {
    pub fn new(curve: &QuadraticBezierSegment<S>, params: &SubdivisionParameters<S>) -> Self {
        let mut stack = ArrayVec::new();
        stack.push((*curve, 0));

        Subdivided {
            stack,
            max_depth: params.max_depth.min(MAX_SUBDIVISION_DEPTH),
            threshold: params.flatness_threshold,
        }
    }
}

impl<S: Scalar> Iterator for Subdivided<S> {
    type Item = Point<S>;

    fn next(&mut self) -> Option<Point<S>> {
        // The stack holds at most one pending second half per depth level plus
        // the two halves just pushed, which stays within max_depth + 1 entries.
        loop {
            let (curve, depth) = self.stack.pop()?;

            if depth >= self.max_depth || curve.is_flat(self.threshold) {
                return Some(curve.to);
            }

            let (before, after) = curve.split_in_half();
            self.stack.push((after, depth + 1));
            self.stack.push((before, depth + 1));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

#[test]
fn split_in_half_matches_split() {
    use crate::point;

    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(10.0, 20.0),
        to: point(30.0, 0.0),
    };

    let (a, b) = curve.split_in_half();
    let (c, d) = curve.split(0.5);

    assert!((a.to - c.to).length() < 1e-12);
    assert!((a.ctrl - c.ctrl).length() < 1e-12);
    assert!((b.ctrl - d.ctrl).length() < 1e-12);
    assert_eq!(a.from, curve.from);
    assert_eq!(b.to, curve.to);
    assert!((a.to - curve.sample(0.5)).length() < 1e-12);
}

#[test]
fn flatness() {
    use crate::point;

    let straight = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 10.0),
    };
    assert_eq!(straight.flatness(), 0.0);
    assert!(straight.is_flat(0.0));

    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 0.0),
    };
    // |(5, 5) x (5, -5)| = 50, baseline length 10 times distance 5.
    assert_eq!(curve.flatness().abs(), 50.0);
    assert!(!curve.is_flat(0.25));
}

#[test]
fn test_flattening_straight_line() {
    use crate::point;

    for max_depth in 0..20 {
        let points = flatten_quadratic(
            point(0.0f32, 0.0),
            point(10.0, 0.0),
            point(20.0, 0.0),
            max_depth,
        );
        assert_eq!(points.as_slice(), &[point(20.0, 0.0)]);
    }
}

#[test]
fn test_flattening_empty_curve() {
    use crate::point;

    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(0.0, 0.0),
        to: point(0.0, 0.0),
    };

    let mut iter = curve.subdivided(&SubdivisionParameters::default());
    assert_eq!(iter.next(), Some(point(0.0, 0.0)));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_flattening_max_depth() {
    use crate::point;

    let from = point(0.0f32, 0.0);
    let ctrl = point(500.0, 1000.0);
    let to = point(1000.0, 0.0);

    let mut previous_len = 0;
    for max_depth in 0..12 {
        let points = flatten_quadratic(from, ctrl, to, max_depth);
        assert!(points.len() >= previous_len);
        assert!(points.len() <= 1 << max_depth);
        assert_eq!(*points.last().unwrap(), to);
        previous_len = points.len();
    }

    // Not flat enough before the depth limit: every branch reaches the limit.
    assert_eq!(flatten_quadratic(from, ctrl, to, 3).len(), 8);
    assert_eq!(flatten_quadratic(from, ctrl, to, 0).as_slice(), &[to]);
}

#[test]
fn test_flattening_depth_is_clamped() {
    use crate::point;

    // A NaN control point never becomes flat, so the bisection only stops at the clamped
    // depth limit. Only check that the stack bound holds for the first points.
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(f32::NAN, 1.0),
        to: point(1.0, 0.0),
    };
    let params = SubdivisionParameters::default().with_max_depth(1000);
    assert_eq!(curve.subdivided(&params).take(64).count(), 64);
}

#[test]
fn test_flattening_order_and_tolerance() {
    use crate::{point, LineSegment};

    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(100.0, 200.0),
        to: point(200.0, 0.0),
    };

    let params = SubdivisionParameters::default();
    let mut prev = curve.from;
    let mut count = 0;
    curve.for_each_subdivided(&params, &mut |p| {
        // This curve is x-monotonic, points must come out in increasing x order.
        assert!(p.x > prev.x);

        let segment = LineSegment { from: prev, to: p };
        let mid = segment.sample(0.5);
        let t = mid.x / 200.0;
        let on_curve = curve.sample(t);
        assert!((on_curve - mid).length() < 0.25);

        prev = p;
        count += 1;
    });

    assert_eq!(prev, curve.to);
    assert!(count > 1);
}
