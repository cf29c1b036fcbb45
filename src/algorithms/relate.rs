use super::line_ops::{line_covers_line, line_covers_point, line_intersects_line};
use super::poly_ops::{
    poly_covers_line, poly_covers_point, poly_covers_poly, poly_intersects_line,
    poly_intersects_poly, poly_point_on_boundary,
};
use crate::config::MAX_RECURSION_DEPTH;
use crate::geometry::Shape;
use crate::segment::intersect_segments;
use crate::{Coordinate, Geometry, Polygon, Rectangle, Ring};
use std::sync::Arc;

/// A non-collection operand.
#[derive(Copy, Clone)]
enum Prim<'a> {
    Point(Coordinate),
    Line(&'a Ring),
    Poly(&'a Polygon),
}

/// An operand after unwrapping the geometry envelope: either a primitive or
/// one of the child-bearing variants.
#[derive(Copy, Clone)]
enum Operand<'a> {
    Prim(Prim<'a>),
    MultiPoint(&'a crate::Multi<Coordinate>),
    MultiLine(&'a crate::Multi<Arc<Ring>>),
    MultiPoly(&'a crate::Multi<Arc<Polygon>>),
    Collection(&'a crate::Multi<Geometry>),
}

fn operand_of(geom: &Geometry) -> Option<Operand<'_>> {
    if geom.is_error() {
        return None;
    }
    match geom.shape() {
        Shape::Point(c) => Some(Operand::Prim(Prim::Point(*c))),
        Shape::Line(l) => Some(Operand::Prim(Prim::Line(l))),
        Shape::Poly(p) => Some(Operand::Prim(Prim::Poly(p))),
        Shape::MultiPoint(m) => Some(Operand::MultiPoint(m)),
        Shape::MultiLine(m) => Some(Operand::MultiLine(m)),
        Shape::MultiPoly(m) => Some(Operand::MultiPoly(m)),
        Shape::Collection(m) => Some(Operand::Collection(m)),
        Shape::Empty(_) | Shape::Error(_) => None,
    }
}

fn operand_rect(op: Operand<'_>) -> Rectangle {
    match op {
        Operand::Prim(Prim::Point(c)) => Rectangle::new(c, c),
        Operand::Prim(Prim::Line(l)) => l.rect(),
        Operand::Prim(Prim::Poly(p)) => p.rect(),
        Operand::MultiPoint(m) => m.rect(),
        Operand::MultiLine(m) => m.rect(),
        Operand::MultiPoly(m) => m.rect(),
        Operand::Collection(m) => m.rect(),
    }
}

/// Visit the children of a child-bearing operand whose rectangles intersect
/// the query, skipping empty collection children.  The visitor returns false
/// to stop; returns false if any visit stopped the walk.
fn visit_children<'a, F>(op: Operand<'a>, query: Rectangle, visitor: &mut F) -> bool
where
    F: FnMut(Operand<'a>) -> bool,
{
    match op {
        Operand::Prim(_) => true,
        Operand::MultiPoint(m) => {
            let items = m.items();
            m.search(query, &mut |i| visitor(Operand::Prim(Prim::Point(items[i]))))
        }
        Operand::MultiLine(m) => {
            let items = m.items();
            m.search(query, &mut |i| {
                visitor(Operand::Prim(Prim::Line(items[i].as_ref())))
            })
        }
        Operand::MultiPoly(m) => {
            let items = m.items();
            m.search(query, &mut |i| {
                visitor(Operand::Prim(Prim::Poly(items[i].as_ref())))
            })
        }
        Operand::Collection(m) => {
            let items = m.items();
            m.search(query, &mut |i| match operand_of(&items[i]) {
                Some(child) => visitor(child),
                None => true,
            })
        }
    }
}

fn is_multi(op: Operand<'_>) -> bool {
    !matches!(op, Operand::Prim(_))
}

// --- primitive kernels -----------------------------------------------------

/// Degenerate-extent check: a line or polygon whose every position equals p.
fn rect_is_point(rect: Rectangle, p: Coordinate) -> bool {
    rect.x_min == p.x && rect.x_max == p.x && rect.y_min == p.y && rect.y_max == p.y
}

fn simple_intersects(a: Prim<'_>, b: Prim<'_>) -> bool {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => p == q,
        (Prim::Point(p), Prim::Line(l)) | (Prim::Line(l), Prim::Point(p)) => line_covers_point(l, p),
        (Prim::Point(p), Prim::Poly(g)) | (Prim::Poly(g), Prim::Point(p)) => poly_covers_point(g, p),
        (Prim::Line(l), Prim::Line(m)) => line_intersects_line(l, m),
        (Prim::Line(l), Prim::Poly(g)) | (Prim::Poly(g), Prim::Line(l)) => {
            poly_intersects_line(g, l, true)
        }
        (Prim::Poly(g), Prim::Poly(h)) => poly_intersects_poly(g, h, true),
    }
}

fn simple_covers(a: Prim<'_>, b: Prim<'_>) -> bool {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => p == q,
        (Prim::Point(p), Prim::Line(l)) => !l.is_empty() && rect_is_point(l.rect(), p),
        (Prim::Point(p), Prim::Poly(g)) => !g.is_empty() && rect_is_point(g.rect(), p),
        (Prim::Line(l), Prim::Point(p)) => line_covers_point(l, p),
        (Prim::Line(l), Prim::Line(m)) => line_covers_line(l, m),
        // A one-dimensional path never covers a two-dimensional region.
        (Prim::Line(_), Prim::Poly(_)) => false,
        (Prim::Poly(g), Prim::Point(p)) => poly_covers_point(g, p),
        (Prim::Poly(g), Prim::Line(l)) => poly_covers_line(g, l),
        (Prim::Poly(g), Prim::Poly(h)) => poly_covers_poly(g, h),
    }
}

/// Contact classification between two primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Contact {
    None,
    /// Boundary contact only; interiors stay disjoint.
    Touch,
    /// Interiors meet.
    Overlap,
}

fn line_boundary_point(line: &Ring, p: Coordinate) -> bool {
    !line.is_closed() && (p == line.first() || p == line.last())
}

fn line_line_contact(a: &Ring, b: &Ring) -> Contact {
    if a.is_empty() || b.is_empty() || !a.rect().intersects(b.rect()) {
        return Contact::None;
    }
    let mut touched = false;
    let mut overlap = false;
    super::ring_ops::ring_ring_search(a, b, &mut |i, j| {
        if let Some((p, q)) = intersect_segments(a.segment_at(i), b.segment_at(j)) {
            if p != q {
                // A shared run has interior on both sides.
                overlap = true;
                return false;
            }
            if line_boundary_point(a, p) || line_boundary_point(b, p) {
                touched = true;
            } else {
                // Interior-to-interior crossing.
                overlap = true;
                return false;
            }
        }
        true
    });
    if overlap {
        Contact::Overlap
    } else if touched {
        Contact::Touch
    } else {
        Contact::None
    }
}

fn simple_contact(a: Prim<'_>, b: Prim<'_>) -> Contact {
    match (a, b) {
        (Prim::Point(p), Prim::Point(q)) => {
            if p == q {
                Contact::Overlap
            } else {
                Contact::None
            }
        }
        (Prim::Point(p), Prim::Line(l)) | (Prim::Line(l), Prim::Point(p)) => {
            if !line_covers_point(l, p) {
                Contact::None
            } else if line_boundary_point(l, p) {
                Contact::Touch
            } else {
                Contact::Overlap
            }
        }
        (Prim::Point(p), Prim::Poly(g)) | (Prim::Poly(g), Prim::Point(p)) => {
            if !poly_covers_point(g, p) {
                Contact::None
            } else if poly_point_on_boundary(g, p) {
                Contact::Touch
            } else {
                Contact::Overlap
            }
        }
        (Prim::Line(l), Prim::Line(m)) => line_line_contact(l, m),
        (Prim::Line(l), Prim::Poly(g)) | (Prim::Poly(g), Prim::Line(l)) => {
            if !poly_intersects_line(g, l, true) {
                Contact::None
            } else if poly_intersects_line(g, l, false) {
                Contact::Overlap
            } else {
                Contact::Touch
            }
        }
        (Prim::Poly(g), Prim::Poly(h)) => {
            if !poly_intersects_poly(g, h, true) {
                Contact::None
            } else if poly_intersects_poly(g, h, false) {
                Contact::Overlap
            } else {
                Contact::Touch
            }
        }
    }
}

// --- recursive dispatch ----------------------------------------------------

fn intersects_at(a: Operand<'_>, b: Operand<'_>, depth: usize) -> bool {
    if depth >= MAX_RECURSION_DEPTH {
        return false;
    }
    let rect_b = operand_rect(b);
    if !operand_rect(a).intersects(rect_b) {
        return false;
    }
    if is_multi(a) {
        let mut found = false;
        visit_children(a, rect_b, &mut |child| {
            if intersects_at(child, b, depth + 1) {
                found = true;
                false
            } else {
                true
            }
        });
        found
    } else if is_multi(b) {
        intersects_at(b, a, depth + 1)
    } else {
        match (a, b) {
            (Operand::Prim(pa), Operand::Prim(pb)) => simple_intersects(pa, pb),
            _ => false,
        }
    }
}

fn covers_at(a: Operand<'_>, b: Operand<'_>, depth: usize) -> bool {
    if depth >= MAX_RECURSION_DEPTH {
        return false;
    }
    if is_multi(b) {
        // Every non-empty child of b must be covered by a.
        let mut all = true;
        let mut any = false;
        visit_children(b, operand_rect(b), &mut |child| {
            any = true;
            if covers_at(a, child, depth + 1) {
                true
            } else {
                all = false;
                false
            }
        });
        any && all
    } else if is_multi(a) {
        // Some child of a must cover the primitive b in full.
        let rect_b = operand_rect(b);
        let mut found = false;
        visit_children(a, rect_b, &mut |child| {
            if operand_rect(child).contains_rect(rect_b) && covers_at(child, b, depth + 1) {
                found = true;
                false
            } else {
                true
            }
        });
        found
    } else {
        match (a, b) {
            (Operand::Prim(pa), Operand::Prim(pb)) => simple_covers(pa, pb),
            _ => false,
        }
    }
}

fn contact_at(a: Operand<'_>, b: Operand<'_>, depth: usize) -> Contact {
    if depth >= MAX_RECURSION_DEPTH {
        return Contact::None;
    }
    let rect_b = operand_rect(b);
    if !operand_rect(a).intersects(rect_b) {
        return Contact::None;
    }
    if is_multi(a) {
        let mut state = Contact::None;
        visit_children(a, rect_b, &mut |child| {
            match contact_at(child, b, depth + 1) {
                Contact::Overlap => {
                    state = Contact::Overlap;
                    false
                }
                Contact::Touch => {
                    state = Contact::Touch;
                    true
                }
                Contact::None => true,
            }
        });
        state
    } else if is_multi(b) {
        contact_at(b, a, depth + 1)
    } else {
        match (a, b) {
            (Operand::Prim(pa), Operand::Prim(pb)) => simple_contact(pa, pb),
            _ => Contact::None,
        }
    }
}

// --- public predicates -----------------------------------------------------

/// Whether the geometries share at least one point.  Empty and error
/// operands never intersect anything.
pub fn intersects(a: &Geometry, b: &Geometry) -> bool {
    match (operand_of(a), operand_of(b)) {
        (Some(oa), Some(ob)) => intersects_at(oa, ob, 0),
        _ => false,
    }
}

/// `!intersects`.
pub fn disjoint(a: &Geometry, b: &Geometry) -> bool {
    !intersects(a, b)
}

/// Whether every point of b lies within a (boundary inclusive).  Multi
/// operands: every non-empty child of b must be covered by some child of a.
pub fn covers(a: &Geometry, b: &Geometry) -> bool {
    match (operand_of(a), operand_of(b)) {
        (Some(oa), Some(ob)) => covers_at(oa, ob, 0),
        _ => false,
    }
}

/// `covers(b, a)`.
pub fn coveredby(a: &Geometry, b: &Geometry) -> bool {
    covers(b, a)
}

/// Whether the geometries share boundary points but no interior: at least
/// one touching child pair and no interior-overlapping pair.
pub fn touches(a: &Geometry, b: &Geometry) -> bool {
    match (operand_of(a), operand_of(b)) {
        (Some(oa), Some(ob)) => contact_at(oa, ob, 0) == Contact::Touch,
        _ => false,
    }
}

/// Covers, with interior contact: b inside a and not confined to a's
/// boundary.
pub fn contains(a: &Geometry, b: &Geometry) -> bool {
    covers(a, b) && !touches(a, b)
}

/// `contains(b, a)`.
pub fn within(a: &Geometry, b: &Geometry) -> bool {
    contains(b, a)
}

/// Whether the geometries cover each other.
pub fn equals(a: &Geometry, b: &Geometry) -> bool {
    within(a, b) && contains(a, b)
}

/// Not implemented; always false.  A known, documented gap kept for
/// compatibility with the original library.
pub fn crosses(_a: &Geometry, _b: &Geometry) -> bool {
    false
}

/// Not implemented; always false.  A known, documented gap kept for
/// compatibility with the original library.
pub fn overlaps(_a: &Geometry, _b: &Geometry) -> bool {
    false
}

impl Geometry {
    pub fn intersects(&self, other: &Geometry) -> bool {
        intersects(self, other)
    }

    pub fn disjoint(&self, other: &Geometry) -> bool {
        disjoint(self, other)
    }

    pub fn covers(&self, other: &Geometry) -> bool {
        covers(self, other)
    }

    pub fn coveredby(&self, other: &Geometry) -> bool {
        coveredby(self, other)
    }

    pub fn contains(&self, other: &Geometry) -> bool {
        contains(self, other)
    }

    pub fn within(&self, other: &Geometry) -> bool {
        within(self, other)
    }

    pub fn touches(&self, other: &Geometry) -> bool {
        touches(self, other)
    }

    pub fn equals(&self, other: &Geometry) -> bool {
        equals(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeomKind;

    fn square_poly(x: f64, y: f64, size: f64) -> Geometry {
        Geometry::polygon(
            Polygon::new(
                Ring::new(vec![
                    (x, y).into(),
                    (x + size, y).into(),
                    (x + size, y + size).into(),
                    (x, y + size).into(),
                    (x, y).into(),
                ])
                .unwrap(),
                Vec::new(),
            )
            .unwrap(),
        )
    }

    fn point(x: f64, y: f64) -> Geometry {
        Geometry::point((x, y).into())
    }

    #[test]
    fn test_point_in_polygon_scenarios() {
        let poly = square_poly(0., 0., 10.);
        let interior = point(5., 5.);
        assert!(covers(&poly, &interior));
        assert!(!touches(&poly, &interior));
        assert!(contains(&poly, &interior));

        let vertex = point(0., 0.);
        assert!(covers(&poly, &vertex));
        assert!(touches(&poly, &vertex));
        assert!(!contains(&poly, &vertex));
    }

    #[test]
    fn test_disjoint_squares() {
        let a = square_poly(0., 0., 1.);
        let b = square_poly(5., 5., 1.);
        assert!(!intersects(&a, &b));
        assert!(disjoint(&a, &b));
        assert!(!touches(&a, &b));
    }

    #[test]
    fn test_shared_edge_touches() {
        let a = square_poly(0., 0., 1.);
        let b = square_poly(1., 0., 1.);
        assert!(intersects(&a, &b));
        assert!(touches(&a, &b));
        assert!(!contains(&a, &b));
    }

    #[test]
    fn test_equals_duality() {
        let a = square_poly(0., 0., 10.);
        let b = square_poly(0., 0., 10.);
        assert!(equals(&a, &b));
        assert!(within(&a, &b));
        assert!(contains(&a, &b));
        assert!(coveredby(&a, &b));
        let c = square_poly(0., 0., 5.);
        assert!(!equals(&a, &c));
    }

    #[test]
    fn test_line_polygon() {
        let poly = square_poly(0., 0., 10.);
        let crossing = Geometry::line(
            Ring::new_line(vec![(-5., 5.).into(), (15., 5.).into()]).unwrap(),
        );
        assert!(intersects(&poly, &crossing));
        assert!(!covers(&poly, &crossing));
        assert!(!touches(&poly, &crossing));

        let inside = Geometry::line(Ring::new_line(vec![(1., 1.).into(), (9., 9.).into()]).unwrap());
        assert!(covers(&poly, &inside));
        assert!(contains(&poly, &inside));

        // Running along the bottom edge: covered, touching, not contained.
        let edge = Geometry::line(Ring::new_line(vec![(2., 0.).into(), (8., 0.).into()]).unwrap());
        assert!(covers(&poly, &edge));
        assert!(touches(&poly, &edge));
        assert!(!contains(&poly, &edge));
    }

    #[test]
    fn test_line_line_touch() {
        let a = Geometry::line(Ring::new_line(vec![(0., 0.).into(), (10., 0.).into()]).unwrap());
        // Endpoint of b on the interior of a: a T junction touches.
        let b = Geometry::line(Ring::new_line(vec![(5., 0.).into(), (5., 5.).into()]).unwrap());
        assert!(touches(&a, &b));
        assert!(intersects(&a, &b));
        // Crossing through the interior does not touch.
        let c = Geometry::line(Ring::new_line(vec![(5., -5.).into(), (5., 5.).into()]).unwrap());
        assert!(!touches(&a, &c));
        assert!(intersects(&a, &c));
        // Collinear overlap does not touch.
        let d = Geometry::line(Ring::new_line(vec![(5., 0.).into(), (15., 0.).into()]).unwrap());
        assert!(!touches(&a, &d));
    }

    #[test]
    fn test_point_line_touch() {
        let line = Geometry::line(Ring::new_line(vec![(0., 0.).into(), (10., 0.).into()]).unwrap());
        assert!(touches(&line, &point(0., 0.)));
        assert!(touches(&point(10., 0.), &line));
        assert!(!touches(&line, &point(5., 0.)));
        assert!(intersects(&line, &point(5., 0.)));
        assert!(!touches(&line, &point(5., 5.)));
    }

    #[test]
    fn test_multi_dispatch() {
        let multi = Geometry::multi_polygon(vec![
            Polygon::new(
                Ring::new(vec![
                    (0., 0.).into(),
                    (1., 0.).into(),
                    (1., 1.).into(),
                    (0., 1.).into(),
                    (0., 0.).into(),
                ])
                .unwrap(),
                Vec::new(),
            )
            .unwrap(),
            Polygon::new(
                Ring::new(vec![
                    (5., 5.).into(),
                    (6., 5.).into(),
                    (6., 6.).into(),
                    (5., 6.).into(),
                    (5., 5.).into(),
                ])
                .unwrap(),
                Vec::new(),
            )
            .unwrap(),
        ]);
        assert!(intersects(&multi, &point(0.5, 0.5)));
        assert!(intersects(&multi, &point(5.5, 5.5)));
        assert!(!intersects(&multi, &point(3., 3.)));
        assert!(covers(&multi, &point(5.5, 5.5)));

        let both = Geometry::multi_point(vec![(0.5, 0.5).into(), (5.5, 5.5).into()]);
        assert!(covers(&multi, &both));
        let strays = Geometry::multi_point(vec![(0.5, 0.5).into(), (3., 3.).into()]);
        assert!(!covers(&multi, &strays));
    }

    #[test]
    fn test_collection_recursion() {
        let coll = Geometry::collection(vec![
            point(1., 1.),
            Geometry::collection(vec![square_poly(5., 5., 2.)]),
            Geometry::new_empty(GeomKind::Point),
        ]);
        assert!(intersects(&coll, &point(6., 6.)));
        assert!(!intersects(&coll, &point(30., 30.)));
        assert!(covers(&square_poly(0., 0., 10.), &coll));
    }

    #[test]
    fn test_empty_and_error_are_vacuous() {
        let empty = Geometry::new_empty(GeomKind::Polygon);
        let error = Geometry::new_error("bad input");
        let poly = square_poly(0., 0., 10.);
        for g in [&empty, &error] {
            assert!(!intersects(g, &poly));
            assert!(!intersects(&poly, g));
            assert!(!covers(&poly, g));
            assert!(!covers(g, &poly));
            assert!(!equals(g, g));
            assert!(!touches(g, &poly));
            assert!(disjoint(g, &poly));
        }
    }

    #[test]
    fn test_crosses_overlaps_unimplemented() {
        let a = square_poly(0., 0., 10.);
        let b = square_poly(5., 5., 10.);
        assert!(!crosses(&a, &b));
        assert!(!overlaps(&a, &b));
    }
}
