mod min_heap;

pub mod line_ops;
pub mod nearest;
pub mod poly_ops;
pub mod relate;
pub mod ring_ops;

pub(crate) use min_heap::MinHeap;
