use super::{Ring, RingIndex};
use crate::config::{IndexKind, IndexOptions};
use crate::errors::GeometryError;
use crate::index::YStripes;
use crate::Rectangle;
use crate::{Coordinate, Segment};

/// One-pass ring/line construction.
///
/// A single scan over the coordinates computes the bounding rectangle, the
/// shoelace sum, convexity and winding, and — when a natural index was
/// requested — the leaf level of the index, so the points are traversed
/// exactly once.  Upper index levels are reduced afterwards from the leaves
/// alone.
pub(super) fn build(
    mut coords: Vec<Coordinate>,
    closed: bool,
    options: IndexOptions,
) -> Result<Ring, GeometryError> {
    if closed {
        if coords.len() < 3 {
            return Err(GeometryError::RingTooFewPoints(coords.len()));
        }
        if coords.first() != coords.last() {
            let first = coords[0];
            coords.push(first);
        }
        // Three positions closed means only two distinct: unusable.
        if coords.len() < 4 {
            return Err(GeometryError::RingTooFewPoints(coords.len()));
        }
    } else if coords.len() < 2 {
        return Err(GeometryError::LineTooFewPoints(coords.len()));
    }

    let kind = match options.kind {
        // Stripes are parity machinery; they need a closed ring.
        IndexKind::YStripes if !closed => IndexKind::Natural,
        kind => kind,
    };

    let nsegs = coords.len() - 1;
    let mut rect = Rectangle::new(coords[0], coords[0]);
    let mut shoelace = 0.;
    let mut has_left_turn = false;
    let mut has_right_turn = false;
    let mut leaves = match kind {
        IndexKind::Natural => Some(crate::index::LeafAccumulator::new(options.spread, nsegs)),
        _ => None,
    };

    for i in 0..nsegs {
        let a = coords[i];
        let b = coords[i + 1];
        rect.expand_coord(b);
        shoelace += a.cross(b);
        if closed {
            // Turn direction at vertex b; the pair wraps through the closure
            // duplicate back onto segment 0.
            let c = if i + 2 < coords.len() {
                coords[i + 2]
            } else {
                coords[1]
            };
            let turn = (b - a).cross(c - b);
            if turn > 0. {
                has_left_turn = true;
            } else if turn < 0. {
                has_right_turn = true;
            }
        }
        if let Some(acc) = &mut leaves {
            acc.push(Segment::new(a, b));
        }
    }

    let signed_area = shoelace / 2.;
    let (area, clockwise, convex) = if closed {
        (
            signed_area.abs(),
            signed_area < 0.,
            !(has_left_turn && has_right_turn),
        )
    } else {
        (0., false, false)
    };

    let index = match kind {
        IndexKind::Unindexed => RingIndex::None,
        IndexKind::Natural => RingIndex::Natural(leaves.take().expect("leaf accumulator").finish()),
        IndexKind::YStripes => {
            let coords_ref = &coords;
            RingIndex::YStripes(YStripes::build(nsegs, rect.y_min, rect.y_max, area, |i| {
                Segment::new(coords_ref[i], coords_ref[i + 1])
            }))
        }
    };

    Ok(Ring::from_parts(
        closed, convex, clockwise, area, rect, coords, index,
    ))
}
