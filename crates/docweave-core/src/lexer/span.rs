//! Byte positions in source text

#![allow(clippy::cast_possible_truncation)] // Spans are u32; inputs over 4GB are unsupported

use std::ops::Range;

/// A byte range in the file an identifier or token came from
///
/// Spans identify tree nodes: two identifiers with the same span are the
/// same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    /// Exclusive
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn from_range(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Position of a node that has no place in any file, such as a
    /// comment added while rewriting a tree
    #[must_use]
    pub const fn dummy() -> Self {
        Self::new(u32::MAX, u32::MAX)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Maps byte offsets of a text to 0-indexed line numbers
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// The line containing `offset`; the end of the text belongs to the last
    /// line
    #[must_use]
    pub fn line(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Number of lines, counting an empty line after a trailing newline
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_display() {
        let span = Span::from_range(5..10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.to_string(), "5..10");
        assert_eq!(Span::default(), Span::dummy());
    }

    #[test]
    fn newline_belongs_to_its_line() {
        let index = LineIndex::new("type T struct {\n\tX int\n}");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line(0), 0);
        assert_eq!(index.line(15), 0);
        assert_eq!(index.line(16), 1);
        assert_eq!(index.line(23), 2);
        assert_eq!(index.line(24), 2);
    }

    #[test]
    fn trailing_newline_opens_a_line() {
        let index = LineIndex::new("a\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line(2), 1);
    }
}
