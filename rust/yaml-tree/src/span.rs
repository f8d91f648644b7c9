// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Span and position types for tracking source locations.

use chumsky::span::SimpleSpan;

/// A span representing a range in the source text.
///
/// This is an alias for chumsky's `SimpleSpan`, which tracks byte offsets.
/// The span is a half-open range `[start, end)`.
pub type Span = SimpleSpan<usize>;

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("Line: {line} Column: {column}")]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::span::Span as _;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "Line: 3 Column: 7");
        assert_eq!(Position::default(), Position::new(1, 1));
    }

    #[test]
    fn test_span_offsets() {
        let span = Span::new((), 4..9);
        assert_eq!(span.start, 4);
        assert_eq!(span.end, 9);
    }
}
