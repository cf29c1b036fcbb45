use crate::config::{default_index, IndexOptions};
use crate::errors::GeometryError;
use crate::index::{NaturalIndex, YStripes};
use crate::segment::RayResult;
use crate::{Coordinate, Rectangle, Segment};

mod build;

/// The acceleration structure attached to a ring, chosen once at
/// construction.
#[derive(Debug, Clone)]
pub(crate) enum RingIndex {
    None,
    Natural(NaturalIndex),
    YStripes(YStripes),
}

/// An ordered sequence of coordinates, either an implicitly-closed ring or an
/// open line; the two share one representation distinguished by the `closed`
/// tag.  For closed rings the first coordinate is duplicated at the end
/// during construction so segment access never wraps.
///
/// The bounding rectangle, shoelace area, convexity, winding order, and the
/// requested index are all computed in a single scan at construction; the
/// ring is immutable afterwards.
#[derive(Debug, Clone)]
pub struct Ring {
    closed: bool,
    convex: bool,
    clockwise: bool,
    area: f64,
    rect: Rectangle,
    coords: Vec<Coordinate>,
    index: RingIndex,
}

/// Result of a point-in-ring query.  When the point landed exactly on a ring
/// edge, `on_index` carries that segment's index; containment logic for
/// segments and touch classification needs it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RingHit {
    pub hit: bool,
    pub on_index: Option<usize>,
}

impl RingHit {
    fn miss() -> Self {
        RingHit {
            hit: false,
            on_index: None,
        }
    }
}

impl Ring {
    /// Build a closed ring with the process-default index options.
    pub fn new(coords: Vec<Coordinate>) -> Result<Self, GeometryError> {
        Ring::new_with(coords, default_index())
    }

    /// Build a closed ring.  The input needs at least 3 distinct positions;
    /// the closing duplicate is optional and added when missing.
    pub fn new_with(coords: Vec<Coordinate>, options: IndexOptions) -> Result<Self, GeometryError> {
        build::build(coords, true, options.clamped())
    }

    /// Build an open line with the process-default index options.
    pub fn new_line(coords: Vec<Coordinate>) -> Result<Self, GeometryError> {
        Ring::new_line_with(coords, default_index())
    }

    /// Build an open line.  YStripes is meaningless for open lines and falls
    /// back to the natural index.
    pub fn new_line_with(
        coords: Vec<Coordinate>,
        options: IndexOptions,
    ) -> Result<Self, GeometryError> {
        build::build(coords, false, options.clamped())
    }

    /// View a rectangle as a throwaway closed ring, so rect operands can
    /// reuse the ring algorithms.  Unindexed; meant for short-lived stack
    /// values.
    pub fn from_rect(rect: &Rectangle) -> Self {
        let coords = vec![
            Coordinate::new(rect.x_min, rect.y_min),
            Coordinate::new(rect.x_max, rect.y_min),
            Coordinate::new(rect.x_max, rect.y_max),
            Coordinate::new(rect.x_min, rect.y_max),
            Coordinate::new(rect.x_min, rect.y_min),
        ];
        let area = (rect.x_max - rect.x_min) * (rect.y_max - rect.y_min);
        Ring {
            closed: true,
            convex: true,
            clockwise: false,
            area,
            rect: *rect,
            coords,
            index: RingIndex::None,
        }
    }

    pub(crate) fn from_parts(
        closed: bool,
        convex: bool,
        clockwise: bool,
        area: f64,
        rect: Rectangle,
        coords: Vec<Coordinate>,
        index: RingIndex,
    ) -> Self {
        Ring {
            closed,
            convex,
            clockwise,
            area,
            rect,
            coords,
            index,
        }
    }

    /// Raw coordinates, including the closing duplicate for closed rings.
    pub fn points(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn num_segments(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn segment_at(&self, index: usize) -> Segment {
        Segment::new(self.coords[index], self.coords[index + 1])
    }

    pub fn first(&self) -> Coordinate {
        self.coords[0]
    }

    pub fn last(&self) -> Coordinate {
        self.coords[self.coords.len() - 1]
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Unsigned shoelace area; zero for open lines.
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_convex(&self) -> bool {
        self.convex
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// A ring is unusable when closed with fewer than 3 distinct positions or
    /// open with fewer than 2; the constructors reject those, so any ring in
    /// hand is non-empty unless built from a degenerate rect.
    pub fn is_empty(&self) -> bool {
        if self.closed {
            self.coords.len() < 4
        } else {
            self.coords.len() < 2
        }
    }

    pub fn index(&self) -> Option<&NaturalIndex> {
        match &self.index {
            RingIndex::Natural(ix) => Some(ix),
            _ => None,
        }
    }

    pub fn ystripes(&self) -> Option<&YStripes> {
        match &self.index {
            RingIndex::YStripes(ys) => Some(ys),
            _ => None,
        }
    }

    /// Visit the indices of segments whose rectangle intersects the query,
    /// through whichever access path the ring has.  The visitor returns false
    /// to stop early, in which case `search` returns false.  With a ystripe
    /// index a segment spanning several stripes may be visited more than
    /// once; callers are expected to be idempotent.
    pub fn search<F>(&self, query: Rectangle, visitor: &mut F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        match &self.index {
            RingIndex::Natural(ix) => {
                let coords = &self.coords;
                ix.search(query, &mut |i| {
                    let seg = Segment::new(coords[i], coords[i + 1]);
                    if seg.rect().intersects(query) {
                        visitor(i)
                    } else {
                        true
                    }
                })
            }
            RingIndex::YStripes(ys) => {
                if query.y_max < self.rect.y_min || query.y_min > self.rect.y_max {
                    return true;
                }
                let (low, high) = ys.stripe_range(query.y_min, query.y_max);
                for stripe in low..=high {
                    for &i in ys.stripe(stripe) {
                        if self.segment_at(i).rect().intersects(query) && !visitor(i) {
                            return false;
                        }
                    }
                }
                true
            }
            RingIndex::None => {
                for i in 0..self.num_segments() {
                    if self.segment_at(i).rect().intersects(query) && !visitor(i) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Point-in-ring by crossing parity, with the boundary short-circuit.
    ///
    /// The instant any segment classifies the point `On`, the query resolves
    /// to `allow_on_edge` and the segment's index is reported.  Otherwise the
    /// parity of ray crossings decides.  Results are identical across the
    /// three access paths; the indexes only skip segments that cannot affect
    /// the answer.
    pub fn contains_point(&self, point: Coordinate, allow_on_edge: bool) -> RingHit {
        if !self.closed || self.is_empty() || !self.rect.contains(point) {
            return RingHit::miss();
        }
        match &self.index {
            RingIndex::Natural(ix) => self.contains_point_indexed(ix, point, allow_on_edge),
            RingIndex::YStripes(ys) => {
                let stripe = ys.stripe_of(point.y);
                self.contains_point_scan(ys.stripe(stripe).iter().copied(), point, allow_on_edge)
            }
            RingIndex::None => {
                self.contains_point_scan(0..self.num_segments(), point, allow_on_edge)
            }
        }
    }

    fn contains_point_scan<I>(&self, segments: I, point: Coordinate, allow_on_edge: bool) -> RingHit
    where
        I: Iterator<Item = usize>,
    {
        let mut crossings = 0usize;
        for i in segments {
            match self.segment_at(i).raycast(point) {
                RayResult::On => {
                    return RingHit {
                        hit: allow_on_edge,
                        on_index: Some(i),
                    };
                }
                RayResult::In => crossings += 1,
                RayResult::Out => {}
            }
        }
        RingHit {
            hit: crossings % 2 == 1,
            on_index: None,
        }
    }

    fn contains_point_indexed(
        &self,
        ix: &NaturalIndex,
        point: Coordinate,
        allow_on_edge: bool,
    ) -> RingHit {
        let mut crossings = 0usize;
        let top = ix.num_levels() - 1;
        let mut stack: Vec<(usize, usize)> = (0..ix.level_len(top)).map(|i| (top, i)).collect();

        while let Some((level, offset)) = stack.pop() {
            let rect = ix.rect_at(level, offset);
            if point.y < rect.y_min || point.y > rect.y_max || point.x > rect.x_max {
                continue;
            }
            if rect.x_min > point.x {
                // The whole run of segments lies right of the point, so its
                // crossing parity collapses to that of the chord joining the
                // run's first and last coordinates.
                let (low, high) = ix.item_range(level, offset);
                let chord = Segment::new(self.coords[low], self.coords[high]);
                if chord.raycast(point) == RayResult::In {
                    crossings += 1;
                }
                continue;
            }
            if level == 0 {
                let (low, high) = ix.item_range(level, offset);
                for i in low..high {
                    match self.segment_at(i).raycast(point) {
                        RayResult::On => {
                            return RingHit {
                                hit: allow_on_edge,
                                on_index: Some(i),
                            };
                        }
                        RayResult::In => crossings += 1,
                        RayResult::Out => {}
                    }
                }
            } else {
                let child_level = level - 1;
                let first_child = ix.spread() * offset;
                let last_child = (first_child + ix.spread()).min(ix.level_len(child_level));
                for child in first_child..last_child {
                    stack.push((child_level, child));
                }
            }
        }
        RingHit {
            hit: crossings % 2 == 1,
            on_index: None,
        }
    }
}
