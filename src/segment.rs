use crate::{Coordinate, Rectangle};

/// A directed pair of coordinates.  Like `Coordinate`, a pure value type;
/// rings hand these out by value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Classification of a point against a segment for ray casting.
///
/// `On` means the point is collinear with and within the bounding box of the
/// segment.  `In` means a horizontal ray from the point toward +infinity
/// crosses the segment's interior under the half-open rule described at
/// [`Segment::raycast`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayResult {
    Out,
    In,
    On,
}

impl Segment {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Segment { start, end }
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.start, self.end)
    }

    /// The point at parameter t along the segment, t in [0, 1].
    pub fn at(&self, t: f64) -> Coordinate {
        self.start + (self.end - self.start) * t
    }

    /// Parameter of the projection of p onto the segment's carrier line,
    /// unclamped.  Degenerate segments project everything to 0.
    pub(crate) fn param_of(&self, p: Coordinate) -> f64 {
        let d = self.end - self.start;
        let dd = d.dot(d);
        if dd == 0. {
            0.
        } else {
            (p - self.start).dot(d) / dd
        }
    }

    /// Squared distance from the segment to a point.
    pub fn distance2_to_point(&self, p: Coordinate) -> f64 {
        let t = self.param_of(p).max(0.).min(1.);
        self.at(t).distance2(p)
    }

    /// Classify a point against this segment for crossing-parity ray casts.
    ///
    /// The ray runs from the point toward +infinity in x.  Ties are broken
    /// deterministically: a point whose y exactly equals one of the segment's
    /// y bounds is nudged one representable step toward +infinity before the
    /// half-open span test, so a ray passing exactly through a shared vertex
    /// is attributed to exactly one of the two incident segments.
    pub fn raycast(&self, p: Coordinate) -> RayResult {
        let rect = self.rect();
        // Cheap rejects: outside the y span, or entirely left of the point
        // (the ray only runs right).
        if p.y < rect.y_min || p.y > rect.y_max || p.x > rect.x_max {
            return RayResult::Out;
        }
        if p.x >= rect.x_min && collinear(self.start, self.end, p) {
            return RayResult::On;
        }
        let (a, b) = if self.start.y <= self.end.y {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        if a.y == b.y {
            // Horizontal and not collinear-on: never a crossing.
            return RayResult::Out;
        }
        let py = if p.y == a.y || p.y == b.y {
            next_after_up(p.y)
        } else {
            p.y
        };
        if py < a.y || py > b.y {
            return RayResult::Out;
        }
        // The crossing must lie to the right of the point: for the upward
        // segment a->b that is exactly "p strictly left of the line".
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross > 0. {
            RayResult::In
        } else {
            RayResult::Out
        }
    }

    /// Whether the two segments share at least one point.
    pub fn intersects_segment(&self, other: Segment) -> bool {
        if !self.rect().intersects(other.rect()) {
            return false;
        }
        // Shared endpoints are by far the common case between neighboring
        // ring edges.
        if self.start == other.start
            || self.start == other.end
            || self.end == other.start
            || self.end == other.end
        {
            return true;
        }
        intersect_segments(*self, other).is_some()
    }
}

/// One-ulp step toward +infinity.
pub(crate) fn next_after_up(v: f64) -> f64 {
    if v.is_nan() || v == f64::INFINITY {
        return v;
    }
    if v == 0. {
        return f64::from_bits(1);
    }
    let bits = v.to_bits();
    if v > 0. {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Exact-ish collinearity of c with the line a-b.
///
/// The two halves of the cross product are compared directly; if they differ
/// by a single representable step the products are treated as equal, which
/// absorbs the rounding of each multiply without admitting genuinely
/// off-line points.
pub(crate) fn collinear(a: Coordinate, b: Coordinate, c: Coordinate) -> bool {
    let l = (b.x - a.x) * (c.y - a.y);
    let r = (b.y - a.y) * (c.x - a.x);
    if l == r {
        return true;
    }
    let (lo, hi) = if l < r { (l, r) } else { (r, l) };
    next_after_up(lo) == hi
}

/**
 * Check the intersection of two segments A and B.
 *
 * Returns the shared point as a degenerate (start == end) pair, or the
 * overlap run for collinear overlapping segments.  NB: this does not do an
 * initial check with bounding boxes; the caller should do that.
 */
pub(crate) fn intersect_segments(seg_a: Segment, seg_b: Segment) -> Option<(Coordinate, Coordinate)> {
    let (start_a, end_a) = (seg_a.start, seg_a.end);
    let (start_b, end_b) = (seg_b.start, seg_b.end);

    if (start_a == start_b && end_a == end_b) || (start_a == end_b && end_a == start_b) {
        return Some((start_a, end_a));
    }
    if start_a == end_a {
        // A is a point; intersects iff it sits on B.
        return if seg_b.raycast(start_a) == RayResult::On {
            Some((start_a, start_a))
        } else {
            None
        };
    }
    if start_b == end_b {
        return if seg_a.raycast(start_b) == RayResult::On {
            Some((start_b, start_b))
        } else {
            None
        };
    }

    let da = end_a - start_a; // The vector for segment A
    let db = end_b - start_b; // The vector for segment B
    let offset = start_b - start_a; // The offset between segments (starts)

    let da_x_db = da.cross(db);
    let offset_x_da = offset.cross(da);

    if da_x_db == 0. {
        // This means the two segments are parallel.
        // If the offset is not also parallel, they must be disjoint.
        if offset_x_da != 0. {
            return None;
        } else {
            // If the offset is also parallel, check for overlap.
            let da_2 = da.dot(da);
            // Offset, in units of da.
            let t0 = offset.dot(da) / da_2;
            // start_a to end_b, in units of da.
            let t1 = t0 + da.dot(db) / da_2;
            let t_min = t0.min(t1);
            let t_max = t0.max(t1);
            if t_min > 1. || t_max < 0. {
                // if min(t0, t1) > 1 or max(t0, t1) < 0, they don't intersect.
                return None;
            } else {
                // Else, they intersect
                let start = start_a + da * t_min.max(0.);
                let end = start_a + da * t_max.min(1.);
                return Some((start, end));
            }
        }
    } else {
        // The segments are not parallel, so they are disjoint or intersect at a point
        // Calculate where the infinite lines would intersect; if these are on the segments
        // then the segments intersect.
        let ta = offset.cross(db) / da_x_db;
        let tb = offset_x_da / da_x_db;
        if 0. <= ta && ta <= 1. && 0. <= tb && tb <= 1. {
            let intersection = start_a + da * ta;
            return Some((intersection, intersection));
        }
    }
    None
}
