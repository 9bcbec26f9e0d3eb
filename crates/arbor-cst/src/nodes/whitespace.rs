// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Whitespace and comment nodes.
//!
//! Trivia is part of the tree — that is what makes round-trip byte-exact —
//! but carries no [`NodeId`]: identity and recorded positions belong to
//! syntax nodes. A blank or comment line is owned by whichever statement
//! follows it (its `leading_lines`), except at the document edges where the
//! module header/footer take over.

use crate::nodes::codegen::{Codegen, CodegenState};
use crate::nodes::traits::{CstNode, Field, NodeId, Scalar};

/// A run of spaces and tabs within a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SimpleWhitespace(pub String);

impl SimpleWhitespace {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl<'a> Codegen<'a> for SimpleWhitespace {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        if !self.0.is_empty() {
            state.add_token(&self.0);
        }
    }

    fn is_trivia(&self) -> bool {
        true
    }
}

impl CstNode for SimpleWhitespace {
    fn kind(&self) -> &'static str {
        "SimpleWhitespace"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("value", Scalar::Str(&self.0))]
    }
}

/// A comment, stored with its leading `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Comment(pub String);

impl Comment {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl<'a> Codegen<'a> for Comment {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        state.add_token(&self.0);
    }

    fn is_trivia(&self) -> bool {
        true
    }
}

impl CstNode for Comment {
    fn kind(&self) -> &'static str {
        "Comment"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("value", Scalar::Str(&self.0))]
    }
}

/// A line terminator.
///
/// `None` renders the document's default newline sequence; `Some` preserves
/// a sequence that differs from the default (mixed-newline files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Newline(pub Option<String>);

impl<'a> Codegen<'a> for Newline {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        match &self.0 {
            Some(value) => state.add_token(value),
            None => state.add_token(state.default_newline),
        }
    }

    fn is_trivia(&self) -> bool {
        true
    }
}

impl CstNode for Newline {
    fn kind(&self) -> &'static str {
        "Newline"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("value", Scalar::OptStr(self.0.as_deref()))]
    }
}

/// Everything from the end of a statement's content to the end of its line:
/// optional whitespace, an optional comment, and the line terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TrailingWhitespace {
    pub whitespace: SimpleWhitespace,
    pub comment: Option<Comment>,
    pub newline: Newline,
}

impl<'a> Codegen<'a> for TrailingWhitespace {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.whitespace.codegen(state);
        if let Some(comment) = &self.comment {
            comment.codegen(state);
        }
        self.newline.codegen(state);
    }

    fn is_trivia(&self) -> bool {
        true
    }
}

impl CstNode for TrailingWhitespace {
    fn kind(&self) -> &'static str {
        "TrailingWhitespace"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("whitespace", crate::nodes::NodeRef::SimpleWhitespace(&self.whitespace)),
            Field::optional_child(
                "comment",
                self.comment.as_ref().map(crate::nodes::NodeRef::Comment),
            ),
            Field::child("newline", crate::nodes::NodeRef::Newline(&self.newline)),
        ]
    }
}

/// A line containing no statement: optional indentation, optional whitespace,
/// an optional comment, and the line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmptyLine {
    /// Whether the line begins at the current indentation level. When set,
    /// rendering emits the enclosing block's indent before `whitespace`.
    pub indent: bool,
    /// Whitespace beyond the block indent (or the whole prefix when `indent`
    /// is unset).
    pub whitespace: SimpleWhitespace,
    pub comment: Option<Comment>,
    pub newline: Newline,
}

impl Default for EmptyLine {
    fn default() -> Self {
        Self {
            indent: true,
            whitespace: SimpleWhitespace::default(),
            comment: None,
            newline: Newline::default(),
        }
    }
}

impl<'a> Codegen<'a> for EmptyLine {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        if self.indent {
            state.add_indent();
        }
        self.whitespace.codegen(state);
        if let Some(comment) = &self.comment {
            comment.codegen(state);
        }
        self.newline.codegen(state);
    }

    fn is_trivia(&self) -> bool {
        true
    }
}

impl CstNode for EmptyLine {
    fn kind(&self) -> &'static str {
        "EmptyLine"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("indent", Scalar::Bool(self.indent)),
            Field::child("whitespace", crate::nodes::NodeRef::SimpleWhitespace(&self.whitespace)),
            Field::optional_child(
                "comment",
                self.comment.as_ref().map(crate::nodes::NodeRef::Comment),
            ),
            Field::child("newline", crate::nodes::NodeRef::Newline(&self.newline)),
        ]
    }
}
