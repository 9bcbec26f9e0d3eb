// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Code generation state for rendering a CST back to source text.
//!
//! [`CodegenState`] is an append-only buffer of text fragments plus an indent
//! stack and the document formatting defaults inherited from the module. It
//! is always passed explicitly; nothing here is ambient, so multiple renders
//! can run side by side without cross-talk.
//!
//! # Position tracking
//!
//! A state built with [`CodegenState::with_positions`] additionally maintains
//! a running (line, column, byte) cursor and records, for every node that
//! carries a [`NodeId`], the range covering its emitted output. Two modes
//! exist:
//!
//! - [`PositionMode::Basic`]: a node's range covers everything emitted while
//!   the node was being rendered, including its own whitespace and comments.
//! - [`PositionMode::Syntactic`]: a node's range covers its first through
//!   last non-trivia fragment, so leading/trailing trivia is attributed to
//!   the surrounding context instead.

use crate::nodes::traits::NodeId;
use arbor_core::text::is_newline;
use arbor_core::{CodePosition, CodeRange};
use std::collections::HashMap;
use std::fmt;

/// How recorded node ranges treat whitespace and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Ranges include every fragment emitted while the node was rendered.
    Basic,
    /// Ranges cover the node's first through last non-trivia fragment.
    Syntactic,
}

/// A node currently being rendered, with its span bookkeeping.
#[derive(Debug)]
struct Frame {
    id: NodeId,
    start: CodePosition,
    content_start: Option<CodePosition>,
    content_end: Option<CodePosition>,
}

#[derive(Debug)]
struct PositionTracker {
    mode: PositionMode,
    cursor: CodePosition,
    last_token_start: CodePosition,
    trivia_depth: u32,
    stack: Vec<Frame>,
    ranges: HashMap<NodeId, CodeRange>,
}

impl PositionTracker {
    fn new(mode: PositionMode) -> Self {
        Self {
            mode,
            cursor: CodePosition::start(),
            last_token_start: CodePosition::start(),
            trivia_depth: 0,
            stack: Vec::new(),
            ranges: HashMap::new(),
        }
    }

    fn on_token(&mut self, text: &str, forced_trivia: bool) {
        let start = self.cursor;
        advance(&mut self.cursor, text);
        self.last_token_start = start;
        if !text.is_empty() && !forced_trivia && self.trivia_depth == 0 {
            for frame in &mut self.stack {
                frame.content_start.get_or_insert(start);
                frame.content_end = Some(self.cursor);
            }
        }
    }

    fn push(&mut self, id: NodeId) {
        self.stack.push(Frame {
            id,
            start: self.cursor,
            content_start: None,
            content_end: None,
        });
    }

    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let range = match self.mode {
            PositionMode::Basic => CodeRange::new(frame.start, self.cursor),
            PositionMode::Syntactic => match (frame.content_start, frame.content_end) {
                (Some(start), Some(end)) => CodeRange::new(start, end),
                // A node that emitted no content is recorded as a zero-width
                // range at its entry position.
                _ => CodeRange::new(frame.start, frame.start),
            },
        };
        self.ranges.insert(frame.id, range);
    }
}

/// Advance a cursor over an emitted fragment.
///
/// Newline fragments are emitted atomically in this crate, so a `"\r\n"`
/// sequence never spans two fragments.
fn advance(pos: &mut CodePosition, text: &str) {
    pos.byte += text.len() as u64;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                pos.line += 1;
                pos.column = 0;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                pos.line += 1;
                pos.column = 0;
            }
            _ => pos.column += 1,
        }
    }
}

/// Rendering state threaded through [`Codegen`] traversals.
#[derive(Debug)]
pub struct CodegenState<'a> {
    /// The newline sequence used when a [`Newline`](crate::nodes::Newline)
    /// node carries no explicit value. Installed by the module being rendered.
    pub default_newline: &'a str,
    /// The indentation unit used when an indented block carries no explicit
    /// indent. Installed by the module being rendered.
    pub default_indent: &'a str,
    indent_tokens: Vec<&'a str>,
    tokens: Vec<&'a str>,
    tracker: Option<PositionTracker>,
}

impl Default for CodegenState<'_> {
    fn default() -> Self {
        Self {
            default_newline: "\n",
            default_indent: "    ",
            indent_tokens: Vec::new(),
            tokens: Vec::new(),
            tracker: None,
        }
    }
}

impl<'a> CodegenState<'a> {
    /// Create a state that records node positions in the given mode.
    pub fn with_positions(mode: PositionMode) -> Self {
        Self {
            tracker: Some(PositionTracker::new(mode)),
            ..Self::default()
        }
    }

    /// Append an output fragment.
    pub fn add_token(&mut self, token: &'a str) {
        self.push_token(token, false);
    }

    /// Emit the current indentation.
    pub fn add_indent(&mut self) {
        // Indentation counts as trivia for syntactic position purposes.
        let toks = self.indent_tokens.clone();
        for tok in toks {
            self.push_token(tok, true);
        }
    }

    /// Increase the indentation level by one unit.
    pub fn indent(&mut self, value: &'a str) {
        self.indent_tokens.push(value);
    }

    /// Decrease the indentation level by one unit.
    pub fn dedent(&mut self) {
        self.indent_tokens.pop();
    }

    /// Whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Remove the final newline fragment, if there is one.
    ///
    /// Rendering a document whose `has_trailing_newline` flag is unset ends
    /// with this call. An empty buffer has no newline to remove, so this is
    /// a no-op rather than an error.
    pub fn retract_trailing_newline(&mut self) {
        if let Some(last) = self.tokens.last() {
            if is_newline(last) {
                self.tokens.pop();
                if let Some(tracker) = &mut self.tracker {
                    tracker.cursor = tracker.last_token_start;
                }
            }
        }
    }

    /// The recorded node ranges, consuming the state.
    ///
    /// Empty unless the state was built with [`CodegenState::with_positions`].
    pub fn into_ranges(self) -> HashMap<NodeId, CodeRange> {
        self.tracker.map(|t| t.ranges).unwrap_or_default()
    }

    fn push_token(&mut self, token: &'a str, forced_trivia: bool) {
        self.tokens.push(token);
        if let Some(tracker) = &mut self.tracker {
            tracker.on_token(token, forced_trivia);
        }
    }

    pub(crate) fn begin_node(&mut self, id: Option<NodeId>, trivia: bool) {
        if let Some(tracker) = &mut self.tracker {
            if trivia {
                tracker.trivia_depth += 1;
            }
            if let Some(id) = id {
                tracker.push(id);
            }
        }
    }

    pub(crate) fn end_node(&mut self, id: Option<NodeId>, trivia: bool) {
        if let Some(tracker) = &mut self.tracker {
            if trivia {
                tracker.trivia_depth -= 1;
            }
            if id.is_some() {
                tracker.pop();
            }
        }
    }
}

impl fmt::Display for CodegenState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// Rendering contract implemented by every node.
///
/// `codegen` wraps `codegen_impl` with span bookkeeping; node implementations
/// provide `codegen_impl` and, for identity-carrying nodes, `span_id`.
pub trait Codegen<'a> {
    /// Emit this node, recording its range when position tracking is enabled.
    fn codegen(&'a self, state: &mut CodegenState<'a>) {
        let trivia = self.is_trivia();
        state.begin_node(self.span_id(), trivia);
        self.codegen_impl(state);
        state.end_node(self.span_id(), trivia);
    }

    /// Emit this node's fragments and delegate to children.
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>);

    /// The identity under which this node's range is recorded, if any.
    fn span_id(&self) -> Option<NodeId> {
        None
    }

    /// Whether this node's output is whitespace/comment material.
    fn is_trivia(&self) -> bool {
        false
    }
}
