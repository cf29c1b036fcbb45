use crate::segment::intersect_segments;
use crate::{Rectangle, Ring, Segment};

/// Visit candidate segment-index pairs (i from a, j from b) whose rectangles
/// intersect.  When both rings carry a natural index the two trees are
/// descended in lock-step, pruning whole branch pairs at once; with one index
/// the unindexed ring's segments are scanned against the indexed one; with
/// neither it is the full cross product.  The visitor returns false to stop.
pub fn ring_ring_search<F>(a: &Ring, b: &Ring, visitor: &mut F) -> bool
where
    F: FnMut(usize, usize) -> bool,
{
    if a.is_empty() || b.is_empty() || !a.rect().intersects(b.rect()) {
        return true;
    }
    if let (Some(ixa), Some(ixb)) = (a.index(), b.index()) {
        let top_a = ixa.num_levels() - 1;
        let top_b = ixb.num_levels() - 1;
        // Stack entries: (level_a, offset_a, level_b, offset_b)
        let mut stack = Vec::new();
        for i in 0..ixa.level_len(top_a) {
            for j in 0..ixb.level_len(top_b) {
                stack.push((top_a, i, top_b, j));
            }
        }
        while let Some((la, ia, lb, ib)) = stack.pop() {
            if !ixa.rect_at(la, ia).intersects(ixb.rect_at(lb, ib)) {
                continue;
            }
            if la == 0 && lb == 0 {
                let (a_low, a_high) = ixa.item_range(0, ia);
                let (b_low, b_high) = ixb.item_range(0, ib);
                for i in a_low..a_high {
                    let rect_i = a.segment_at(i).rect();
                    for j in b_low..b_high {
                        if rect_i.intersects(b.segment_at(j).rect()) && !visitor(i, j) {
                            return false;
                        }
                    }
                }
            } else if lb == 0 || (la >= lb && la > 0) {
                let child_level = la - 1;
                let first = ixa.spread() * ia;
                let last = (first + ixa.spread()).min(ixa.level_len(child_level));
                for child in first..last {
                    stack.push((child_level, child, lb, ib));
                }
            } else {
                let child_level = lb - 1;
                let first = ixb.spread() * ib;
                let last = (first + ixb.spread()).min(ixb.level_len(child_level));
                for child in first..last {
                    stack.push((la, ia, child_level, child));
                }
            }
        }
        true
    } else {
        // Scan the ring without a natural index against the other's access
        // path; ystripes and plain scans are behind Ring::search either way.
        let scan_b = a.index().is_some() && b.index().is_none();
        let (outer, inner) = if scan_b { (b, a) } else { (a, b) };
        for i in 0..outer.num_segments() {
            let rect = outer.segment_at(i).rect();
            let completed = inner.search(rect, &mut |j| {
                if scan_b {
                    visitor(j, i)
                } else {
                    visitor(i, j)
                }
            });
            if !completed {
                return false;
            }
        }
        true
    }
}

/// Parameters along `seg` where the ring's boundary meets it, bracketed by
/// the segment's own endpoints.  Sorted and deduplicated; adjacent pairs
/// bound pieces of the segment that lie entirely on one side of the
/// boundary.
fn boundary_params(ring: &Ring, seg: Segment) -> Vec<f64> {
    let mut ts = vec![0., 1.];
    ring.search(seg.rect(), &mut |i| {
        if let Some((p, q)) = intersect_segments(ring.segment_at(i), seg) {
            ts.push(seg.param_of(p).max(0.).min(1.));
            if q != p {
                ts.push(seg.param_of(q).max(0.).min(1.));
            }
        }
        true
    });
    ts.sort_unstable_by(|x, y| x.total_cmp(y));
    ts.dedup();
    ts
}

/// Whether any part of the segment lies within the ring's region.
///
/// With `allow_on_edge`, boundary contact counts.  Without it, some piece of
/// the segment must sit strictly inside: the segment is split at every
/// boundary crossing and the piece midpoints are classified.
pub fn ring_intersects_segment(ring: &Ring, seg: Segment, allow_on_edge: bool) -> bool {
    if ring.is_empty() || !ring.is_closed() || !ring.rect().intersects(seg.rect()) {
        return false;
    }
    // The ring's region lives inside its rect; a segment that misses the
    // rect itself (not just its bounding box) can't intersect.
    if !ring.rect().intersects_segment(seg.start, seg.end) {
        return false;
    }
    if allow_on_edge {
        if ring.contains_point(seg.start, true).hit || ring.contains_point(seg.end, true).hit {
            return true;
        }
        let mut found = false;
        ring.search(seg.rect(), &mut |i| {
            if ring.segment_at(i).intersects_segment(seg) {
                found = true;
                false
            } else {
                true
            }
        });
        found
    } else {
        let ts = boundary_params(ring, seg);
        for w in ts.windows(2) {
            let mid = seg.at((w[0] + w[1]) / 2.);
            if ring.contains_point(mid, false).hit {
                return true;
            }
        }
        false
    }
}

/// Whether the segment lies entirely within the ring's region.
///
/// Both endpoints must be inside (or on, when allowed).  A convex ring needs
/// nothing more; for concave rings the segment is split at every boundary
/// contact and each piece midpoint must remain covered.  Without
/// `allow_on_edge` any boundary contact at all disqualifies.
pub fn ring_contains_segment(ring: &Ring, seg: Segment, allow_on_edge: bool) -> bool {
    if ring.is_empty() || !ring.is_closed() || !ring.rect().contains_rect(seg.rect()) {
        return false;
    }
    let start_hit = ring.contains_point(seg.start, true);
    if !start_hit.hit {
        return false;
    }
    let end_hit = ring.contains_point(seg.end, true);
    if !end_hit.hit {
        return false;
    }
    if !allow_on_edge {
        if start_hit.on_index.is_some() || end_hit.on_index.is_some() {
            return false;
        }
        let mut contact = false;
        ring.search(seg.rect(), &mut |i| {
            if ring.segment_at(i).intersects_segment(seg) {
                contact = true;
                false
            } else {
                true
            }
        });
        return !contact;
    }
    if ring.is_convex() {
        return true;
    }
    if let (Some(i), Some(j)) = (start_hit.on_index, end_hit.on_index) {
        // Both endpoints on the same straight edge.
        if i == j {
            return true;
        }
    }
    let ts = boundary_params(ring, seg);
    for w in ts.windows(2) {
        let mid = seg.at((w[0] + w[1]) / 2.);
        if !ring.contains_point(mid, true).hit {
            return false;
        }
    }
    true
}

/// Whether ring `b`'s region lies entirely within ring `a`'s region: every
/// boundary segment of b must be contained.  For simple rings boundary
/// containment implies region containment.
pub fn ring_contains_ring(a: &Ring, b: &Ring, allow_on_edge: bool) -> bool {
    if a.is_empty() || b.is_empty() || !a.is_closed() {
        return false;
    }
    if !a.rect().contains_rect(b.rect()) {
        return false;
    }
    for i in 0..b.num_segments() {
        if !ring_contains_segment(a, b.segment_at(i), allow_on_edge) {
            return false;
        }
    }
    true
}

/// Whether the two ring regions share any point (`allow_on_edge`) or share
/// interior (`!allow_on_edge`).  The smaller-area ring drives the scans; a
/// containment probe settles the boundary-free cases.
pub fn ring_intersects_ring(a: &Ring, b: &Ring, allow_on_edge: bool) -> bool {
    if a.is_empty() || b.is_empty() || !a.is_closed() || !b.is_closed() {
        return false;
    }
    if !a.rect().intersects(b.rect()) {
        return false;
    }
    let (small, big) = if a.area() <= b.area() { (a, b) } else { (b, a) };
    if allow_on_edge {
        let mut hit = false;
        ring_ring_search(small, big, &mut |i, j| {
            if small.segment_at(i).intersects_segment(big.segment_at(j)) {
                hit = true;
                false
            } else {
                true
            }
        });
        if hit {
            return true;
        }
        // Boundaries never meet: overlap can only be full containment.
        big.contains_point(small.first(), true).hit
    } else {
        for i in 0..small.num_segments() {
            if ring_intersects_segment(big, small.segment_at(i), false) {
                return true;
            }
        }
        let mut found = false;
        big.search(small.rect(), &mut |j| {
            if ring_intersects_segment(small, big.segment_at(j), false) {
                found = true;
                false
            } else {
                true
            }
        });
        if found {
            return true;
        }
        // Neither boundary enters the other's interior; identical or nested
        // regions still overlap.
        ring_contains_ring(big, small, true)
    }
}

/// Rect-vs-ring queries reuse the ring algorithms by viewing the rectangle
/// as a throwaway stack ring.
pub fn ring_intersects_rect(ring: &Ring, rect: Rectangle, allow_on_edge: bool) -> bool {
    ring_intersects_ring(ring, &Ring::from_rect(&rect), allow_on_edge)
}

pub fn ring_contains_rect(ring: &Ring, rect: Rectangle, allow_on_edge: bool) -> bool {
    ring_contains_ring(ring, &Ring::from_rect(&rect), allow_on_edge)
}
