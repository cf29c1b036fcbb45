use super::MinHeap;
use crate::{Coordinate, Rectangle, Ring, Segment};
use std::cmp::Ordering;

/// A queue entry: an index node awaiting expansion, or a concrete segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EntryKind {
    Node { level: usize, offset: usize },
    Seg { index: usize },
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    dist: f64,
    /// Refinement round already granted to this node's distance.
    more: usize,
    kind: EntryKind,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| match (self.kind, other.kind) {
                (EntryKind::Seg { index: a }, EntryKind::Seg { index: b }) => a.cmp(&b),
                (EntryKind::Seg { .. }, EntryKind::Node { .. }) => Ordering::Less,
                (EntryKind::Node { .. }, EntryKind::Seg { .. }) => Ordering::Greater,
                (
                    EntryKind::Node {
                        level: la,
                        offset: oa,
                    },
                    EntryKind::Node {
                        level: lb,
                        offset: ob,
                    },
                ) => la.cmp(&lb).then(oa.cmp(&ob)),
            })
    }
}

/// Ordered traversal of a ring's segments by caller-supplied distance.
///
/// A min-heap mixes index-node entries and segment entries.  `rect_dist`
/// ranks a node rectangle and may request lazy refinement: when it increments
/// its `more` counter the node is re-queued with the newly returned (tighter)
/// distance instead of being expanded, so expensive exact distances are only
/// computed for nodes that keep winning the queue.  `seg_dist` ranks concrete
/// segments.  `visitor` receives segments in ascending distance order and
/// returns false to stop.
///
/// Returns false only when the visitor stopped the traversal.
pub fn ring_nearest_segment<R, S, V>(
    ring: &Ring,
    mut rect_dist: R,
    mut seg_dist: S,
    mut visitor: V,
) -> bool
where
    R: FnMut(Rectangle, &mut usize) -> f64,
    S: FnMut(Segment, usize) -> f64,
    V: FnMut(Segment, f64, usize) -> bool,
{
    let mut heap: MinHeap<Entry> = MinHeap::new();

    match ring.index() {
        Some(ix) => {
            let top = ix.num_levels() - 1;
            for offset in 0..ix.level_len(top) {
                let mut more = 0;
                let dist = rect_dist(ix.rect_at(top, offset), &mut more);
                heap.push(Entry {
                    dist,
                    more,
                    kind: EntryKind::Node { level: top, offset },
                });
            }
        }
        None => {
            // No index: rank every segment directly.
            for index in 0..ring.num_segments() {
                heap.push(Entry {
                    dist: seg_dist(ring.segment_at(index), index),
                    more: 0,
                    kind: EntryKind::Seg { index },
                });
            }
        }
    }

    while let Some(entry) = heap.pop() {
        match entry.kind {
            EntryKind::Seg { index } => {
                if !visitor(ring.segment_at(index), entry.dist, index) {
                    return false;
                }
            }
            EntryKind::Node { level, offset } => {
                let ix = match ring.index() {
                    Some(ix) => ix,
                    None => continue,
                };
                let mut more = entry.more;
                let dist = rect_dist(ix.rect_at(level, offset), &mut more);
                if more > entry.more {
                    // The callback asked for another refinement round;
                    // requeue with the tighter bound before expanding.
                    heap.push(Entry {
                        dist,
                        more,
                        kind: entry.kind,
                    });
                    continue;
                }
                if level == 0 {
                    let (low, high) = ix.item_range(level, offset);
                    for index in low..high {
                        heap.push(Entry {
                            dist: seg_dist(ring.segment_at(index), index),
                            more: 0,
                            kind: EntryKind::Seg { index },
                        });
                    }
                } else {
                    let child_level = level - 1;
                    let first = ix.spread() * offset;
                    let last = (first + ix.spread()).min(ix.level_len(child_level));
                    for child in first..last {
                        let mut more = 0;
                        let dist = rect_dist(ix.rect_at(child_level, child), &mut more);
                        heap.push(Entry {
                            dist,
                            more,
                            kind: EntryKind::Node {
                                level: child_level,
                                offset: child,
                            },
                        });
                    }
                }
            }
        }
    }
    true
}

/// The segment of the ring nearest to a point, with its index and squared
/// distance.
pub fn nearest_segment_to_point(ring: &Ring, point: Coordinate) -> Option<(usize, Segment, f64)> {
    if ring.num_segments() == 0 {
        return None;
    }
    let mut result = None;
    ring_nearest_segment(
        ring,
        |rect, _more| rect.distance2_to_coord(point),
        |seg, _index| seg.distance2_to_point(point),
        |seg, dist, index| {
            result = Some((index, seg, dist));
            false
        },
    );
    result
}
