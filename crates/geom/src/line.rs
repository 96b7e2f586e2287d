use crate::scalar::Scalar;
use crate::{Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.square_length().sqrt()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the squared distance between this segment and a point.
    ///
    /// Can be useful to save a square root and a division when comparing against
    /// a distance that can be squared.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        (self.closest_point(p) - p).square_length()
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let len2 = v1.dot(v1);
        if len2 == S::ZERO {
            return self.from;
        }

        let t = S::min(S::max(v2.dot(v1) / len2, S::ZERO), S::ONE);

        self.from + v1 * t
    }
}

#[test]
fn distance_to_point() {
    use crate::point;

    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(l.distance_to_point(point(5.0, 3.0)), 3.0);
    assert_eq!(l.distance_to_point(point(-4.0, 3.0)), 5.0);
    assert_eq!(l.distance_to_point(point(13.0, -4.0)), 5.0);
    assert_eq!(l.length(), 10.0);
    assert_eq!(l.sample(0.5), point(5.0, 0.0));
}

#[test]
fn degenerate_segment_distance() {
    use crate::point;

    let l = LineSegment {
        from: point(1.0f64, 1.0),
        to: point(1.0, 1.0),
    };

    assert_eq!(l.closest_point(point(4.0, 5.0)), point(1.0, 1.0));
    assert_eq!(l.distance_to_point(point(4.0, 5.0)), 5.0);
}
