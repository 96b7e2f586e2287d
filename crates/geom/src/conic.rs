//! Conics, their exact subdivision and their approximation with quadratic bézier curves.

use crate::scalar::Scalar;
use crate::utils::is_finite;
use crate::{point, Point, QuadraticBezierSegment};
use alloc::vec::Vec;

/// Default limit for the power of two exponent of the number of quadratic bézier
/// segments used to approximate a conic (at most 32 segments).
pub const MAX_QUAD_EXPONENT: u32 = 5;

/// Returns the number of points produced when splitting a conic into `2^exponent`
/// quadratic bézier segments: one start point and two points per segment.
#[inline]
pub fn quad_point_count(exponent: u32) -> usize {
    2 * (1usize << exponent) + 1
}

/// The conic needs, or was asked for, more quadratic bézier segments than allowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExponentBoundExceeded {
    /// The limit that was exceeded.
    ///
    /// Approximating the conic with `2^max_exponent` segments is still possible and
    /// results in a larger error than requested.
    pub max_exponent: u32,
}

#[cfg(feature = "std")]
impl core::fmt::Display for ExponentBoundExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        std::write!(
            f,
            "Conic subdivision exponent exceeds the maximum ({})",
            self.max_exponent
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExponentBoundExceeded {}

/// A rational quadratic bézier curve defined by three points and a weight.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = ((1 - t)² * from + 2 * (1 - t) * t * weight * ctrl + t² * to) / ((1 - t)² + 2 * (1 - t) * t * weight + t²)```
///
/// A weight of one describes an ordinary quadratic bézier curve, a weight lower than one
/// an elliptical arc and a weight larger than one a hyperbolic arc.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ConicSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
    pub weight: S,
}

impl<S: Scalar> ConicSegment<S> {
    #[inline]
    pub fn new(from: Point<S>, ctrl: Point<S>, to: Point<S>, weight: S) -> Self {
        ConicSegment {
            from,
            ctrl,
            to,
            weight,
        }
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns true if the weight is finite and non-negative and all points are finite.
    pub fn is_valid(&self) -> bool {
        self.weight.is_finite()
            && self.weight >= S::ZERO
            && is_finite(self.from)
            && is_finite(self.ctrl)
            && is_finite(self.to)
    }

    /// Returns true if this conic is an ordinary quadratic bézier curve.
    #[inline]
    pub fn is_quadratic(&self) -> bool {
        self.weight == S::ONE
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let one_t = S::ONE - t;
        let a = one_t * one_t;
        let b = S::TWO * one_t * t * self.weight;
        let c = t * t;
        let denom = a + b + c;

        point(
            (self.from.x * a + self.ctrl.x * b + self.to.x * c) / denom,
            (self.from.y * a + self.ctrl.y * b + self.to.y * c) / denom,
        )
    }

    /// Splits the conic at `t = 0.5` into two conics describing exactly the same curve.
    ///
    /// Both halves have the weight `sqrt(0.5 + 0.5 * weight)`.
    pub fn chop(&self) -> (ConicSegment<S>, ConicSegment<S>) {
        let scale = S::ONE / (S::ONE + self.weight);
        let weight = (S::HALF + self.weight * S::HALF).sqrt();

        let p0 = self.from.to_vector();
        let wp1 = self.ctrl.to_vector() * self.weight;
        let p2 = self.to.to_vector();

        let mid = ((p0 + wp1 * S::TWO + p2) * (scale * S::HALF)).to_point();

        (
            ConicSegment {
                from: self.from,
                ctrl: ((p0 + wp1) * scale).to_point(),
                to: mid,
                weight,
            },
            ConicSegment {
                from: mid,
                ctrl: ((wp1 + p2) * scale).to_point(),
                to: self.to,
                weight,
            },
        )
    }

    /// Estimates the distance between the conic and the quadratic bézier curve that
    /// shares its control points.
    ///
    /// This is a heuristic, not a tight bound. Each halving of the conic divides it by
    /// roughly four. Only the part of `from - 2 * ctrl + to` that is perpendicular to the
    /// chord is measured when the control point projects inside the chord, so a conic
    /// with its control point on the chord has an estimate of zero.
    pub fn quad_error_estimate(&self) -> S {
        let a = self.weight - S::ONE;
        let k = a / (S::FOUR * (S::TWO + a));
        let mut d = self.from.to_vector() - self.ctrl.to_vector() * S::TWO + self.to.to_vector();

        let chord = self.to - self.from;
        let chord_len2 = chord.square_length();
        if chord_len2 > S::ZERO {
            let t = (self.ctrl - self.from).dot(chord) / chord_len2;
            if t >= S::ZERO && t <= S::ONE {
                d = d - chord * (d.dot(chord) / chord_len2);
            }
        }

        (d * k).square_length().sqrt()
    }

    /// Returns the power of two exponent of the number of quadratic bézier segments
    /// needed to approximate this conic within `tolerance`, capped to `MAX_QUAD_EXPONENT`.
    ///
    /// A negative or non-finite tolerance is considered satisfied without subdivision.
    ///
    /// See [`checked_quad_exponent`](#method.checked_quad_exponent) to detect the cap.
    pub fn quad_exponent(&self, tolerance: S) -> u32 {
        self.checked_quad_exponent(tolerance, MAX_QUAD_EXPONENT)
            .unwrap_or(MAX_QUAD_EXPONENT)
    }

    /// Returns the smallest exponent `e <= max_exponent` such that the approximation of
    /// this conic with `2^e` quadratic bézier segments is within `tolerance`.
    ///
    /// Returns `Ok(0)` for a negative or non-finite tolerance. Returns an error if even
    /// `2^max_exponent` segments aren't expected to be enough.
    pub fn checked_quad_exponent(
        &self,
        tolerance: S,
        max_exponent: u32,
    ) -> Result<u32, ExponentBoundExceeded> {
        if tolerance < S::ZERO || !tolerance.is_finite() {
            return Ok(0);
        }

        let mut error = self.quad_error_estimate();
        for exponent in 0..=max_exponent {
            if error <= tolerance {
                return Ok(exponent);
            }
            error *= S::QUARTER;
        }

        Err(ExponentBoundExceeded { max_exponent })
    }

    /// Recursively chops this conic `exponent` times and invokes the callback with each
    /// of the `2^exponent` resulting pieces as a quadratic bézier segment, in curve order.
    ///
    /// The end point of each segment is exactly the start point of the next one, the
    /// first segment starts at `self.from` and the last one ends at `self.to`.
    pub fn for_each_quadratic_bezier<F>(
        &self,
        exponent: u32,
        max_exponent: u32,
        callback: &mut F,
    ) -> Result<(), ExponentBoundExceeded>
    where
        F: FnMut(&QuadraticBezierSegment<S>),
    {
        if exponent > max_exponent {
            return Err(ExponentBoundExceeded { max_exponent });
        }

        subdivide(self, exponent, callback);

        Ok(())
    }

    /// Appends the `2 * 2^exponent + 1` points of the quadratic approximation of this conic
    /// to `output` and returns the number of quadratic bézier segments.
    ///
    /// The first appended point is `self.from`, followed by the control point and the end
    /// point of each segment.
    pub fn extend_with_quads(
        &self,
        exponent: u32,
        max_exponent: u32,
        output: &mut Vec<Point<S>>,
    ) -> Result<usize, ExponentBoundExceeded> {
        if exponent > max_exponent {
            return Err(ExponentBoundExceeded { max_exponent });
        }

        output.reserve(quad_point_count(exponent));
        output.push(self.from);
        subdivide(self, exponent, &mut |quad| {
            output.push(quad.ctrl);
            output.push(quad.to);
        });

        Ok(1 << exponent)
    }

    /// Returns the `2 * 2^exponent + 1` points of the quadratic approximation of this conic.
    ///
    /// Fails if `exponent` is larger than `MAX_QUAD_EXPONENT`.
    pub fn split_into_quads(&self, exponent: u32) -> Result<Vec<Point<S>>, ExponentBoundExceeded> {
        let mut points = Vec::new();
        self.extend_with_quads(exponent, MAX_QUAD_EXPONENT, &mut points)?;

        Ok(points)
    }
}

fn subdivide<S: Scalar, F>(conic: &ConicSegment<S>, level: u32, callback: &mut F)
where
    F: FnMut(&QuadraticBezierSegment<S>),
{
    if level == 0 {
        callback(&QuadraticBezierSegment {
            from: conic.from,
            ctrl: conic.ctrl,
            to: conic.to,
        });
        return;
    }

    let (first, second) = conic.chop();
    subdivide(&first, level - 1, callback);
    subdivide(&second, level - 1, callback);
}

#[cfg(test)]
fn quarter_circle() -> ConicSegment<f64> {
    ConicSegment {
        from: point(0.0, 100.0),
        ctrl: point(0.0, 200.0),
        to: point(100.0, 200.0),
        weight: core::f64::consts::FRAC_1_SQRT_2,
    }
}

#[test]
fn straight_conic_needs_no_subdivision() {
    let conic = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 10.0),
        weight: 0.3,
    };

    for tolerance in &[0.0, 0.001, 0.25, 10.0] {
        assert_eq!(conic.quad_exponent(*tolerance), 0);
    }
}

#[test]
fn control_point_on_the_chord() {
    let conics = [
        ConicSegment {
            from: point(0.0f32, 0.0),
            ctrl: point(1.0, 0.0),
            to: point(10.0, 0.0),
            weight: 0.5,
        },
        ConicSegment {
            from: point(0.0f32, 0.0),
            ctrl: point(2.0, 2.0),
            to: point(8.0, 8.0),
            weight: 3.0,
        },
        ConicSegment {
            from: point(0.0f32, 0.0),
            ctrl: point(10.0, 10.0),
            to: point(10.0, 10.0),
            weight: 0.2,
        },
    ];

    for conic in &conics {
        assert_eq!(conic.quad_error_estimate(), 0.0);
        for tolerance in &[0.0, 0.001, 0.25, 10.0] {
            assert_eq!(conic.quad_exponent(*tolerance), 0);
        }
    }
}

#[test]
fn invalid_tolerance_needs_no_subdivision() {
    let conic = quarter_circle();

    assert_eq!(conic.quad_exponent(-1.0), 0);
    assert_eq!(conic.quad_exponent(f64::NAN), 0);
    assert_eq!(conic.quad_exponent(f64::INFINITY), 0);
    assert_eq!(conic.checked_quad_exponent(-0.5, 0), Ok(0));
}

#[test]
fn quad_exponent_of_quarter_circle() {
    let conic = quarter_circle();

    // |k * (p0 - 2 p1 + p2)| with k = (w - 1) / (4 * (1 + w)) is about 6.07.
    let estimate = conic.quad_error_estimate();
    assert!(estimate > 6.0 && estimate < 6.1);

    assert_eq!(conic.quad_exponent(0.25), 3);
    assert_eq!(conic.quad_exponent(10.0), 0);
    assert_eq!(conic.quad_exponent(2.0), 1);
}

#[test]
fn quad_exponent_is_capped() {
    let conic = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(0.0, 1.0e6),
        to: point(1.0e6, 1.0e6),
        weight: 100.0,
    };

    assert_eq!(conic.quad_exponent(0.25), MAX_QUAD_EXPONENT);
    assert_eq!(
        conic.checked_quad_exponent(0.25, MAX_QUAD_EXPONENT),
        Err(ExponentBoundExceeded { max_exponent: MAX_QUAD_EXPONENT })
    );
    assert_eq!(
        conic.checked_quad_exponent(0.25, 2),
        Err(ExponentBoundExceeded { max_exponent: 2 })
    );
}

#[test]
fn chop_preserves_the_curve() {
    let conic = quarter_circle();
    let (a, b) = conic.chop();

    assert_eq!(a.weight, b.weight);
    assert!((a.weight - (0.5 + 0.5 * conic.weight).sqrt()).abs() < 1e-12);
    assert_eq!(a.from, conic.from);
    assert_eq!(a.to, b.from);
    assert_eq!(b.to, conic.to);

    assert!((a.to - conic.sample(0.5)).length() < 1e-9);
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        // Every point of the halves lies on the circle of radius 100 centered at (100, 100).
        for p in &[a.sample(t), b.sample(t)] {
            let r = (*p - point(100.0, 100.0)).length();
            assert!((r - 100.0).abs() < 1e-9);
        }
    }
}

#[test]
fn chop_quadratic_midpoint() {
    let conic = ConicSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(10.0, 20.0),
        to: point(30.0, 0.0),
        weight: 1.0,
    };
    let quad = QuadraticBezierSegment {
        from: conic.from,
        ctrl: conic.ctrl,
        to: conic.to,
    };

    let (a, _) = conic.chop();
    assert_eq!(a.weight, 1.0);
    assert!((a.to - quad.sample(0.5)).length() < 1e-12);
}

#[test]
fn split_into_quads_point_count() {
    let conic = quarter_circle();

    for exponent in 0..=MAX_QUAD_EXPONENT {
        let points = conic.split_into_quads(exponent).unwrap();
        assert_eq!(points.len(), quad_point_count(exponent));
        assert_eq!(points.len(), 2 * (1 << exponent) + 1);
        assert_eq!(points[0], conic.from);
        assert_eq!(*points.last().unwrap(), conic.to);
    }

    assert_eq!(
        conic.split_into_quads(MAX_QUAD_EXPONENT + 1),
        Err(ExponentBoundExceeded { max_exponent: MAX_QUAD_EXPONENT })
    );
}

#[test]
fn extend_with_quads_appends() {
    let conic = quarter_circle();
    let mut points = std::vec![point(-1.0, -1.0)];

    assert_eq!(conic.extend_with_quads(2, MAX_QUAD_EXPONENT, &mut points), Ok(4));
    assert_eq!(points.len(), 1 + quad_point_count(2));
    assert_eq!(points[1], conic.from);

    assert_eq!(
        conic.extend_with_quads(7, 6, &mut points),
        Err(ExponentBoundExceeded { max_exponent: 6 })
    );
    assert_eq!(points.len(), 1 + quad_point_count(2));
}

#[test]
fn quads_are_continuous() {
    let conic = quarter_circle();

    let mut prev = conic.from;
    let mut count = 0;
    conic
        .for_each_quadratic_bezier(3, MAX_QUAD_EXPONENT, &mut |quad| {
            assert_eq!(quad.from, prev);
            // End points of the pieces are on the circle.
            let r = (quad.to - point(100.0, 100.0)).length();
            assert!((r - 100.0).abs() < 1e-9);
            prev = quad.to;
            count += 1;
        })
        .unwrap();

    assert_eq!(count, 8);
    assert_eq!(prev, conic.to);
}

#[test]
fn validity() {
    let mut conic = quarter_circle();
    assert!(conic.is_valid());
    assert!(!conic.is_quadratic());

    conic.weight = -1.0;
    assert!(!conic.is_valid());
    conic.weight = f64::INFINITY;
    assert!(!conic.is_valid());
    conic.weight = 1.0;
    assert!(conic.is_quadratic());
    conic.ctrl.x = f64::NAN;
    assert!(!conic.is_valid());
}
