//! Physical channel ranges and the conversion rule keyed on their width

/// A contiguous span of a device's physical channels
///
/// Immutable once created. `count` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelGroup {
    base: usize,
    count: usize,
}

impl ChannelGroup {
    /// Create a channel group spanning `count` channels from `base`
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero. Use [`ChannelGroup::try_new`] for spans
    /// that come from untrusted input.
    pub fn new(base: usize, count: usize) -> Self {
        assert!(count > 0, "ChannelGroup must span at least one channel");
        Self { base, count }
    }

    /// Create a channel group, or `None` for an empty span
    pub fn try_new(base: usize, count: usize) -> Option<Self> {
        (count > 0).then_some(Self { base, count })
    }

    /// A single physical channel
    pub fn mono(base: usize) -> Self {
        Self::new(base, 1)
    }

    /// A pair of adjacent physical channels
    pub fn stereo(base: usize) -> Self {
        Self::new(base, 2)
    }

    /// First physical channel index
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of physical channels spanned
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// One past the last physical channel index
    #[inline]
    pub fn end(&self) -> usize {
        self.base + self.count
    }

    /// Whether two groups share at least one physical channel
    pub fn clashes_with(&self, other: &ChannelGroup) -> bool {
        self.base.max(other.base) < self.end().min(other.end())
    }

    /// Whether the group lies within `[0, available)`
    pub fn fits_within(&self, available: usize) -> bool {
        self.end() <= available
    }

    /// Conversion rule applied at the physical/logical boundary
    #[inline]
    pub fn width(&self) -> ChannelWidth {
        match self.count {
            1 => ChannelWidth::Mono,
            2 => ChannelWidth::Stereo,
            n => ChannelWidth::Wide(n),
        }
    }
}

impl std::fmt::Display for ChannelGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 1 {
            write!(f, "channel {}", self.base + 1)
        } else {
            write!(f, "channels {}-{}", self.base + 1, self.end())
        }
    }
}

/// How a logical stereo stream maps onto a physical channel group
///
/// Logical streams are always stored as two channels. The width of the
/// physical group decides the conversion:
///
/// | width   | output (logical -> physical)  | input (physical -> logical) |
/// |---------|-------------------------------|-----------------------------|
/// | Mono    | `(L + R) / 2` into one slot   | slot into L only            |
/// | Stereo  | L, R copied unchanged         | two slots into L, R         |
/// | Wide(n) | channel `c` gets `[L, R][c%2]`| rejected at bind time       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelWidth {
    Mono,
    Stereo,
    Wide(usize),
}
