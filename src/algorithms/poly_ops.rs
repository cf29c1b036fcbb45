use super::ring_ops::{
    ring_contains_ring, ring_contains_segment, ring_intersects_ring, ring_intersects_segment,
};
use crate::{Coordinate, Polygon, Ring, Segment};

/// Point-in-polygon, boundary inclusive: inside the exterior and not
/// strictly inside any hole.  A point on a hole's boundary is still covered.
pub fn poly_covers_point(poly: &Polygon, point: Coordinate) -> bool {
    if poly.is_empty() {
        return false;
    }
    if !poly.exterior().contains_point(point, true).hit {
        return false;
    }
    for hole in poly.holes() {
        let hit = hole.contains_point(point, true);
        if hit.hit && hit.on_index.is_none() {
            return false;
        }
    }
    true
}

/// Point strictly in the polygon's interior: inside the exterior but not on
/// it, and neither inside nor on any hole.
pub fn poly_contains_point(poly: &Polygon, point: Coordinate) -> bool {
    if poly.is_empty() {
        return false;
    }
    let exterior = poly.exterior().contains_point(point, false);
    if !exterior.hit {
        return false;
    }
    for hole in poly.holes() {
        if hole.contains_point(point, true).hit {
            return false;
        }
    }
    true
}

/// Point exactly on the polygon's boundary (exterior or hole rings).
pub fn poly_point_on_boundary(poly: &Polygon, point: Coordinate) -> bool {
    if poly.is_empty() {
        return false;
    }
    if poly
        .exterior()
        .contains_point(point, true)
        .on_index
        .is_some()
    {
        return true;
    }
    poly.holes()
        .any(|hole| hole.contains_point(point, true).on_index.is_some())
}

/// Whether any part of the segment meets the polygon's region.  Edge
/// inclusive: boundary contact counts.  Strict: some piece of the segment
/// must reach the open interior, so a segment confined to a hole (boundary
/// contact aside) does not intersect.
pub fn poly_intersects_segment(poly: &Polygon, seg: Segment, allow_on_edge: bool) -> bool {
    if poly.is_empty() {
        return false;
    }
    if !ring_intersects_segment(poly.exterior(), seg, allow_on_edge) {
        return false;
    }
    for hole in poly.holes() {
        if ring_contains_segment(hole, seg, !allow_on_edge) {
            return false;
        }
    }
    true
}

/// Whether the segment lies entirely within the polygon's region (boundary
/// inclusive): contained by the exterior and never dipping into a hole's
/// interior.
pub fn poly_covers_segment(poly: &Polygon, seg: Segment) -> bool {
    if poly.is_empty() {
        return false;
    }
    if !ring_contains_segment(poly.exterior(), seg, true) {
        return false;
    }
    for hole in poly.holes() {
        if hole.rect().intersects(seg.rect()) && ring_intersects_segment(hole, seg, false) {
            return false;
        }
    }
    true
}

/// Line-vs-polygon intersection, per segment of the line.
pub fn poly_intersects_line(poly: &Polygon, line: &Ring, allow_on_edge: bool) -> bool {
    if poly.is_empty() || line.is_empty() || !poly.rect().intersects(line.rect()) {
        return false;
    }
    for i in 0..line.num_segments() {
        if poly_intersects_segment(poly, line.segment_at(i), allow_on_edge) {
            return true;
        }
    }
    false
}

/// Whether the polygon covers every segment of the line.
pub fn poly_covers_line(poly: &Polygon, line: &Ring) -> bool {
    if poly.is_empty() || line.is_empty() || !poly.rect().contains_rect(line.rect()) {
        return false;
    }
    for i in 0..line.num_segments() {
        if !poly_covers_segment(poly, line.segment_at(i)) {
            return false;
        }
    }
    true
}

/// Polygon-vs-polygon intersection.
///
/// The exteriors must meet; after that, containment within a hole is the one
/// way to escape.  Edge inclusive, a geometry strictly inside a hole is
/// disjoint; strict, even boundary contact with the hole doesn't help.
pub fn poly_intersects_poly(a: &Polygon, b: &Polygon, allow_on_edge: bool) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if !ring_intersects_ring(a.exterior(), b.exterior(), allow_on_edge) {
        return false;
    }
    for hole in a.holes() {
        if ring_contains_ring(hole, b.exterior(), !allow_on_edge) {
            return false;
        }
    }
    for hole in b.holes() {
        if ring_contains_ring(hole, a.exterior(), !allow_on_edge) {
            return false;
        }
    }
    true
}

/// Whether polygon a covers polygon b: b's exterior within a's exterior, and
/// every hole of a that bites into b's region is plugged by a hole of b.
pub fn poly_covers_poly(a: &Polygon, b: &Polygon) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if !ring_contains_ring(a.exterior(), b.exterior(), true) {
        return false;
    }
    for a_hole in a.holes() {
        if !a_hole.rect().intersects(b.rect()) {
            continue;
        }
        if ring_intersects_ring(a_hole, b.exterior(), false) {
            let plugged = b
                .holes()
                .any(|b_hole| ring_contains_ring(b_hole, a_hole, true));
            if !plugged {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: Vec<(f64, f64)>) -> Ring {
        Ring::new(coords.into_iter().map(|c| c.into()).collect()).unwrap()
    }

    fn square(x: f64, y: f64, size: f64) -> Ring {
        ring(vec![
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ])
    }

    fn donut() -> Polygon {
        Polygon::new(square(0., 0., 10.), vec![square(3., 3., 4.)]).unwrap()
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new((x1, y1).into(), (x2, y2).into())
    }

    #[test]
    fn test_point_queries() {
        let d = donut();
        assert!(poly_covers_point(&d, (1., 1.).into()));
        assert!(poly_contains_point(&d, (1., 1.).into()));
        // In the hole.
        assert!(!poly_covers_point(&d, (5., 5.).into()));
        assert!(!poly_contains_point(&d, (5., 5.).into()));
        // On the hole's boundary: covered, on the boundary, not contained.
        assert!(poly_covers_point(&d, (3., 5.).into()));
        assert!(!poly_contains_point(&d, (3., 5.).into()));
        assert!(poly_point_on_boundary(&d, (3., 5.).into()));
        // On the exterior boundary.
        assert!(poly_covers_point(&d, (0., 0.).into()));
        assert!(!poly_contains_point(&d, (0., 0.).into()));
        assert!(poly_point_on_boundary(&d, (0., 0.).into()));
        // Outside entirely.
        assert!(!poly_covers_point(&d, (11., 5.).into()));
    }

    #[test]
    fn test_segment_queries() {
        let d = donut();
        // Entirely in the solid part.
        assert!(poly_covers_segment(&d, seg(1., 1., 9., 1.)));
        assert!(poly_intersects_segment(&d, seg(1., 1., 9., 1.), false));
        // Crossing the hole: intersects but not covered.
        assert!(!poly_covers_segment(&d, seg(1., 5., 9., 5.)));
        assert!(poly_intersects_segment(&d, seg(1., 5., 9., 5.), true));
        // Entirely within the hole's interior: no contact at all.
        assert!(!poly_intersects_segment(&d, seg(4., 4., 6., 6.), true));
        // In the hole but touching its boundary: edge-inclusive contact only.
        assert!(poly_intersects_segment(&d, seg(3., 4., 6., 6.), true));
        assert!(!poly_intersects_segment(&d, seg(3., 4., 6., 6.), false));
        // Along the hole's boundary.
        assert!(poly_covers_segment(&d, seg(3., 3., 7., 3.)));
    }

    #[test]
    fn test_poly_intersects_poly() {
        let d = donut();
        let inside_hole = Polygon::new(square(4., 4., 2.), Vec::new()).unwrap();
        assert!(!poly_intersects_poly(&d, &inside_hole, true));
        assert!(!poly_intersects_poly(&inside_hole, &d, true));

        // Fills the hole exactly: boundary contact, no interior overlap.
        let plug = Polygon::new(square(3., 3., 4.), Vec::new()).unwrap();
        assert!(poly_intersects_poly(&d, &plug, true));
        assert!(!poly_intersects_poly(&d, &plug, false));

        let overlapping = Polygon::new(square(8., 8., 5.), Vec::new()).unwrap();
        assert!(poly_intersects_poly(&d, &overlapping, true));
        assert!(poly_intersects_poly(&d, &overlapping, false));

        let disjoint = Polygon::new(square(20., 0., 2.), Vec::new()).unwrap();
        assert!(!poly_intersects_poly(&d, &disjoint, true));
    }

    #[test]
    fn test_poly_covers_poly() {
        let outer = Polygon::new(square(0., 0., 10.), Vec::new()).unwrap();
        let inner = Polygon::new(square(2., 2., 4.), Vec::new()).unwrap();
        assert!(poly_covers_poly(&outer, &inner));
        assert!(!poly_covers_poly(&inner, &outer));

        // A hole overlapping b's area breaks coverage.
        let d = donut();
        let over_hole = Polygon::new(square(2., 2., 4.), Vec::new()).unwrap();
        assert!(!poly_covers_poly(&d, &over_hole));

        // Unless b has a hole plugging it.
        let b = Polygon::new(square(1., 1., 8.), vec![square(3., 3., 4.)]).unwrap();
        assert!(poly_covers_poly(&d, &b));
    }
}
