mod hilbert;
mod multi;
mod natural;
mod ystripes;

pub use multi::MultiIndex;
pub use natural::NaturalIndex;
pub use ystripes::YStripes;

pub(crate) use hilbert::Hilbert;
pub(crate) use natural::LeafAccumulator;
