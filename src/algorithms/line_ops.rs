use super::ring_ops::ring_ring_search;
use crate::segment::{intersect_segments, RayResult};
use crate::{Coordinate, Rectangle, Ring, Segment};

/// Whether the point sits anywhere on the line's path.
pub fn line_covers_point(line: &Ring, point: Coordinate) -> bool {
    if line.is_empty() || !line.rect().contains(point) {
        return false;
    }
    let mut on = false;
    line.search(Rectangle::new(point, point), &mut |i| {
        if line.segment_at(i).raycast(point) == RayResult::On {
            on = true;
            false
        } else {
            true
        }
    });
    on
}

/// Whether any part of the segment touches the line's path.
pub fn line_intersects_segment(line: &Ring, seg: Segment) -> bool {
    if line.is_empty() || !line.rect().intersects(seg.rect()) {
        return false;
    }
    let mut hit = false;
    line.search(seg.rect(), &mut |i| {
        if line.segment_at(i).intersects_segment(seg) {
            hit = true;
            false
        } else {
            true
        }
    });
    hit
}

/// Whether the two line paths share at least one point.
pub fn line_intersects_line(a: &Ring, b: &Ring) -> bool {
    if a.is_empty() || b.is_empty() || !a.rect().intersects(b.rect()) {
        return false;
    }
    let mut hit = false;
    ring_ring_search(a, b, &mut |i, j| {
        if a.segment_at(i).intersects_segment(b.segment_at(j)) {
            hit = true;
            false
        } else {
            true
        }
    });
    hit
}

/// Whether every point of line b lies on line a.
///
/// Checked segment-by-segment: the collinear overlaps of a's segments with a
/// b segment are collected as parameter intervals and must union to the whole
/// segment.
pub fn line_covers_line(a: &Ring, b: &Ring) -> bool {
    if a.is_empty() || b.is_empty() || !a.rect().contains_rect(b.rect()) {
        return false;
    }
    for j in 0..b.num_segments() {
        if !covers_segment_path(a, b.segment_at(j)) {
            return false;
        }
    }
    true
}

fn covers_segment_path(a: &Ring, seg: Segment) -> bool {
    if seg.start == seg.end {
        return line_covers_point(a, seg.start);
    }
    let mut intervals: Vec<(f64, f64)> = Vec::new();
    a.search(seg.rect(), &mut |i| {
        if let Some((p, q)) = intersect_segments(a.segment_at(i), seg) {
            if p != q {
                let (t0, t1) = (seg.param_of(p), seg.param_of(q));
                let lo = t0.min(t1).max(0.);
                let hi = t0.max(t1).min(1.);
                if lo < hi {
                    intervals.push((lo, hi));
                }
            }
        }
        true
    });
    intervals.sort_unstable_by(|x, y| x.0.total_cmp(&y.0));
    let mut reach = 0.;
    for (lo, hi) in intervals {
        if lo > reach {
            return false;
        }
        reach = reach.max(hi);
        if reach >= 1. {
            return true;
        }
    }
    false
}
