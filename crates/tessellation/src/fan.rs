//! Reordering of a closed boundary into a triangle strip.
//!
//! The boundary is read from both ends toward its middle, alternating between the two
//! cursors. With boundary vertices `v0 v1 .. vn-1` the strip is `v0 vn-1 v1 vn-2 v2 ..`.
//! Each triangle of the strip then joins a vertex from the beginning of the boundary with
//! two vertices from its end, or the other way around, which covers the interior of simple
//! polygons that are roughly convex.
//!
//! No vertex is added or removed: the strip is a permutation of the boundary.
//! Self-intersecting boundaries are not detected.

use alloc::vec::Vec;

/// Number of triangles rendered by a triangle strip of `vertex_count` vertices.
#[inline]
pub fn triangle_count(vertex_count: usize) -> usize {
    vertex_count.saturating_sub(2)
}

/// Returns an iterator over the boundary indices of a triangle strip of `len` vertices.
///
/// ```
/// use conifer_tessellation::strip_order;
///
/// let order: Vec<usize> = strip_order(5).collect();
/// assert_eq!(order, vec![0, 4, 1, 3, 2]);
/// ```
pub fn strip_order(len: usize) -> StripOrder {
    StripOrder {
        lo: 0,
        hi: len,
        from_end: false,
    }
}

/// Reorders the boundary of a simple polygon into a triangle strip.
///
/// The output has the same length as the input.
///
/// ```
/// use conifer_tessellation::build_triangle_strip;
/// use conifer_tessellation::math::point;
///
/// let square = [point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)];
///
/// assert_eq!(
///     build_triangle_strip(&square),
///     vec![point(0.0, 0.0), point(0.0, 1.0), point(1.0, 0.0), point(1.0, 1.0)],
/// );
/// ```
pub fn build_triangle_strip<T: Copy>(boundary: &[T]) -> Vec<T> {
    let mut strip = Vec::with_capacity(boundary.len());
    strip.extend(strip_order(boundary.len()).map(|idx| boundary[idx]));

    strip
}

/// Iterator over the boundary indices of a triangle strip.
///
/// See [`strip_order`](fn.strip_order.html).
#[derive(Clone, Debug)]
pub struct StripOrder {
    // Remaining indices are lo..hi.
    lo: usize,
    hi: usize,
    from_end: bool,
}

impl Iterator for StripOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.lo >= self.hi {
            return None;
        }

        let idx = if self.from_end {
            self.hi -= 1;
            self.hi
        } else {
            self.lo += 1;
            self.lo - 1
        };
        self.from_end = !self.from_end;

        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.hi - self.lo;
        (len, Some(len))
    }
}

impl ExactSizeIterator for StripOrder {}

impl core::iter::FusedIterator for StripOrder {}

#[test]
fn square_strip() {
    let square = [(0, 0), (1, 0), (1, 1), (0, 1)];

    assert_eq!(
        build_triangle_strip(&square),
        alloc::vec![(0, 0), (0, 1), (1, 0), (1, 1)]
    );
    assert_eq!(triangle_count(square.len()), 2);
}

#[test]
fn small_strips() {
    let empty: [u32; 0] = [];
    assert!(build_triangle_strip(&empty).is_empty());
    assert_eq!(strip_order(0).next(), None);
    assert_eq!(triangle_count(0), 0);

    assert_eq!(build_triangle_strip(&[7u32]), alloc::vec![7]);
    assert_eq!(triangle_count(1), 0);

    assert_eq!(build_triangle_strip(&[1u32, 2]), alloc::vec![1, 2]);
    assert_eq!(triangle_count(2), 0);

    assert_eq!(build_triangle_strip(&[1u32, 2, 3]), alloc::vec![1, 3, 2]);
    assert_eq!(triangle_count(3), 1);
}

#[test]
fn odd_and_even_orders() {
    let odd: Vec<usize> = strip_order(7).collect();
    assert_eq!(odd, alloc::vec![0, 6, 1, 5, 2, 4, 3]);

    let even: Vec<usize> = strip_order(6).collect();
    assert_eq!(even, alloc::vec![0, 5, 1, 4, 2, 3]);

    let mut order = strip_order(6);
    assert_eq!(order.len(), 6);
    order.next();
    order.next();
    assert_eq!(order.len(), 4);
}

#[test]
fn strip_is_a_permutation() {
    for len in 0..40u32 {
        let boundary: Vec<u32> = (0..len).map(|i| i * 3 + 1).collect();
        let mut strip = build_triangle_strip(&boundary);

        assert_eq!(strip.len(), boundary.len());

        strip.sort_unstable();
        assert_eq!(strip, boundary);
    }
}
