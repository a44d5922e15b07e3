//! Inclusive source line ranges carried in the `span` node attribute.

use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive `[start, end]` range of source lines covered by a PDG node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineSpan {
    start: u32,
    end: u32,
}

impl LineSpan {
    /// Returns `None` when `start > end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Parse a `"start-end"` attribute value.
    ///
    /// Surrounding quotes and whitespace are ignored. Anything else that does
    /// not match the pattern yields `None`; callers skip such nodes.
    pub fn parse(raw: &str) -> Option<Self> {
        let (start, end) = raw.trim().trim_matches('"').split_once('-')?;
        let start = start.trim().parse().ok()?;
        let end = end.trim().parse().ok()?;
        Self::new(start, end)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether `line` falls inside the span. Takes a signed value so offset
    /// corrected diff lines below 1 compare cleanly.
    pub fn contains(&self, line: i64) -> bool {
        i64::from(self.start) <= line && line <= i64::from(self.end)
    }

    pub fn lines(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
