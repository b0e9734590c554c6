//! Byte-range source positions.
//!
//! Spans are supplied by the embedding parser when nodes are pushed; this
//! library stores and returns them, it never computes them.

use serde::Serialize;

/// Half-open byte range `[start, end)` into the original source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Span for synthesized nodes with no source position.
    pub const fn empty() -> Self {
        Span { start: 0, end: 0 }
    }

    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
