//! Cache line storage.
//!
//! Lines are kept in one flat vector, `n_ways` consecutive entries per set.
//! A slot is never removed; eviction overwrites it in place.

/// Cache line entry containing tag, address, validity, and dirty bits.
///
/// An empty slot (after construction or flush) has neither tag nor address.
/// An invalidated slot keeps its tag so a later miss on the same line reuses it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Line holds usable data.
    pub valid: bool,
    /// Line holds data not yet written back.
    pub dirty: bool,
    /// Tag bits of the resident line.
    pub tag: Option<u32>,
    /// Line-aligned backing address of the resident line.
    pub address: Option<u64>,
}

impl CacheLine {
    /// Returns `true` if evicting this line requires a write-back.
    #[inline]
    pub fn needs_writeback(&self) -> bool {
        self.valid && self.dirty
    }
}

/// Per-set arrays of cache lines.
#[derive(Clone, Debug)]
pub struct LineStore {
    lines: Vec<CacheLine>,
    ways: usize,
}

impl LineStore {
    /// Allocates `sets * ways` empty lines.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); sets * ways],
            ways,
        }
    }

    /// Returns every slot to the empty state.
    pub fn reset(&mut self) {
        self.lines.fill(CacheLine::default());
    }

    /// The lines of `set`, indexed by way.
    #[inline]
    pub fn set(&self, set: usize) -> &[CacheLine] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// The line at (`set`, `way`).
    #[inline]
    pub fn line(&self, set: usize, way: usize) -> &CacheLine {
        &self.lines[set * self.ways + way]
    }

    /// Mutable access to the line at (`set`, `way`).
    #[inline]
    pub fn line_mut(&mut self, set: usize, way: usize) -> &mut CacheLine {
        &mut self.lines[set * self.ways + way]
    }

    /// Finds the way in `set` whose stored tag equals `tag`, valid or not.
    pub fn probe(&self, set: usize, tag: u32) -> Option<usize> {
        self.set(set).iter().position(|line| line.tag == Some(tag))
    }

    /// Iterates over all lines in set-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheLine> {
        self.lines.iter()
    }
}
