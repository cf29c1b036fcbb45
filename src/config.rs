use once_cell::sync::OnceCell;

/// Branching factor bounds for packed index levels.
pub const MIN_SPREAD: usize = 2;
pub const MAX_SPREAD: usize = 4096;
pub const DEFAULT_SPREAD: usize = 16;

/// Bound on nested-collection recursion so adversarial input fails fast
/// instead of overflowing the call stack.
pub(crate) const MAX_RECURSION_DEPTH: usize = 1024;

/// Which per-ring index a constructor should build.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// No acceleration structure; every query scans all segments.
    Unindexed,
    /// Hierarchical packed rectangle index over runs of consecutive segments.
    Natural,
    /// Horizontal-stripe bucket index; closed rings only.  Open lines fall
    /// back to `Natural`.
    YStripes,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    pub kind: IndexKind,
    pub spread: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            kind: IndexKind::Natural,
            spread: DEFAULT_SPREAD,
        }
    }
}

impl IndexOptions {
    pub fn new(kind: IndexKind, spread: usize) -> Self {
        IndexOptions { kind, spread }.clamped()
    }

    pub(crate) fn clamped(mut self) -> Self {
        self.spread = self.spread.max(MIN_SPREAD).min(MAX_SPREAD);
        self
    }
}

static DEFAULT_INDEX: OnceCell<IndexOptions> = OnceCell::new();

/// Install process-wide index defaults used by the plain constructors.
///
/// May be called at most once, before any geometry construction that relies
/// on it; returns false if defaults were already set (explicitly, or
/// implicitly by a constructor reading them).
pub fn set_default_index(options: IndexOptions) -> bool {
    DEFAULT_INDEX.set(options.clamped()).is_ok()
}

pub(crate) fn default_index() -> IndexOptions {
    *DEFAULT_INDEX.get_or_init(IndexOptions::default)
}
