//! Per-render-pass renderer state.

/// Render flags fixed at renderer construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFlags {
    /// Turn every newline inside a paragraph into an explicit `\\` line break.
    pub hard_wrap: bool,
    /// Emit a `\label` after each heading.
    pub heading_anchors: bool,
}

impl RenderFlags {
    /// Flags with hard line wrapping enabled.
    #[must_use]
    pub fn with_hard_wrap(mut self, enabled: bool) -> Self {
        self.hard_wrap = enabled;
        self
    }

    /// Flags with heading anchors enabled.
    #[must_use]
    pub fn with_heading_anchors(mut self, enabled: bool) -> Self {
        self.heading_anchors = enabled;
        self
    }
}

/// Heading bookkeeping reserved for table-of-contents output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TocData {
    /// Number of headings rendered so far.
    pub heading_count: usize,
    /// Level of the most recent heading (0 before the first one).
    pub current_level: u8,
    /// Offset applied to heading levels when building a table of contents.
    pub level_offset: u8,
    /// Heading nesting level, fixed at construction.
    pub nesting_level: u8,
}

/// Mutable state threaded through every emission rule.
#[derive(Clone, Debug, Default)]
pub struct RendererState {
    flags: RenderFlags,
    toc: TocData,
}

impl RendererState {
    /// Create zero-initialized state with the given flags and nesting level.
    #[must_use]
    pub fn new(flags: RenderFlags, nesting_level: u8) -> Self {
        Self {
            flags,
            toc: TocData {
                nesting_level,
                ..TocData::default()
            },
        }
    }

    /// Render flags.
    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        self.flags
    }

    /// Heading bookkeeping.
    #[must_use]
    pub fn toc(&self) -> &TocData {
        &self.toc
    }

    /// Record a rendered heading.
    pub(crate) fn record_heading(&mut self, level: u8) {
        self.toc.heading_count += 1;
        self.toc.current_level = level;
    }
}
