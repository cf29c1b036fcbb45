use super::{Hilbert, NaturalIndex};
use crate::Rectangle;

/// Packed index over the bounding rectangles of a multi-geometry's children.
///
/// Children are ordered along a Hilbert curve over their rectangle centers,
/// then the sorted rectangles are reduced bottom-up into the same packed
/// level structure used for ring segments.  `search` translates sorted
/// positions back to original child indices.
#[derive(Debug, Clone)]
pub struct MultiIndex {
    order: Vec<usize>,
    index: NaturalIndex,
}

impl MultiIndex {
    pub fn new(rects: &[Rectangle], spread: usize) -> Self {
        let extent = Rectangle::of(rects);
        let hilbert = Hilbert::new(extent);
        let mut order: Vec<usize> = (0..rects.len()).collect();
        order.sort_unstable_by_key(|&i| hilbert.index_of(rects[i].center()));
        let sorted: Vec<Rectangle> = order.iter().map(|&i| rects[i]).collect();
        MultiIndex {
            order,
            index: NaturalIndex::from_rects(&sorted, spread),
        }
    }

    pub fn spread(&self) -> usize {
        self.index.spread()
    }

    pub fn num_levels(&self) -> usize {
        self.index.num_levels()
    }

    /// Visit candidate children (original indices) whose index group
    /// intersects the query.  The visitor returns false to stop.
    pub fn search<F>(&self, query: Rectangle, visitor: &mut F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        let order = &self.order;
        self.index.search(query, &mut |sorted_pos| visitor(order[sorted_pos]))
    }
}
