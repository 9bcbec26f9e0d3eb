// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Byte spans and line/column positions for source text.
//!
//! Two coordinate systems are used throughout arbor:
//!
//! - [`Span`]: raw byte offsets into UTF-8 source, half-open `[start, end)`.
//! - [`CodePosition`] / [`CodeRange`]: editor-style coordinates. Lines are
//!   1-indexed; columns are 0-indexed and count Unicode scalar values, not
//!   bytes. A `CodePosition` also carries the byte offset so consumers can
//!   slice source text without a conversion pass.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// The number of bytes covered by this span.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether this span covers zero bytes.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span fully contains `other`.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A position in rendered source text.
///
/// `line` is 1-indexed; `column` is 0-indexed and counts characters.
/// `byte` is the 0-indexed byte offset of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodePosition {
    pub line: u32,
    pub column: u32,
    pub byte: u64,
}

impl CodePosition {
    /// The position at the very start of a document.
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 0,
            byte: 0,
        }
    }

    pub fn new(line: u32, column: u32, byte: u64) -> Self {
        Self { line, column, byte }
    }
}

impl fmt::Display for CodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of positions in rendered source text.
///
/// `start` is inclusive and `end` is exclusive, mirroring [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRange {
    pub start: CodePosition,
    pub end: CodePosition,
}

impl CodeRange {
    pub fn new(start: CodePosition, end: CodePosition) -> Self {
        Self { start, end }
    }

    /// The byte span covered by this range.
    pub fn span(&self) -> Span {
        Span::new(self.start.byte, self.end.byte)
    }

    /// Whether this range fully contains `other`.
    pub fn contains(&self, other: &CodeRange) -> bool {
        self.start.byte <= other.start.byte && other.end.byte <= self.end.byte
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
