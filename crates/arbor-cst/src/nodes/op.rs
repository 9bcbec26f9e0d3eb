// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Operator and punctuation nodes.

use crate::nodes::codegen::{Codegen, CodegenState};
use crate::nodes::traits::{CstNode, Field, NodeId, NodeRef, Scalar};
use crate::nodes::whitespace::SimpleWhitespace;
use crate::nodes::impl_structural_eq;

/// The statement separator within a simple statement line.
///
/// Punctuation carries no identity; its whitespace children preserve the
/// exact source spacing around the `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Semicolon {
    pub whitespace_before: SimpleWhitespace,
    pub whitespace_after: SimpleWhitespace,
}

impl<'a> Codegen<'a> for Semicolon {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(";");
        self.whitespace_after.codegen(state);
    }
}

impl CstNode for Semicolon {
    fn kind(&self) -> &'static str {
        "Semicolon"
    }

    fn node_id(&self) -> Option<NodeId> {
        None
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child(
                "whitespace_before",
                NodeRef::SimpleWhitespace(&self.whitespace_before),
            ),
            Field::child(
                "whitespace_after",
                NodeRef::SimpleWhitespace(&self.whitespace_after),
            ),
        ]
    }
}

/// The arithmetic operator tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BinaryOpKind {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOpKind::Add => "+",
            BinaryOpKind::Subtract => "-",
            BinaryOpKind::Multiply => "*",
            BinaryOpKind::Divide => "/",
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOpKind::Add),
            '-' => Some(BinaryOpKind::Subtract),
            '*' => Some(BinaryOpKind::Multiply),
            '/' => Some(BinaryOpKind::Divide),
            _ => None,
        }
    }
}

/// A binary operator together with its surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct BinaryOp {
    pub kind: BinaryOpKind,
    pub whitespace_before: SimpleWhitespace,
    pub whitespace_after: SimpleWhitespace,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(BinaryOp {
    kind,
    whitespace_before,
    whitespace_after,
});

impl BinaryOp {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
    }
}

impl<'a> Codegen<'a> for BinaryOp {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(self.kind.as_str());
        self.whitespace_after.codegen(state);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for BinaryOp {
    fn kind(&self) -> &'static str {
        "BinaryOp"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("kind", Scalar::Str(self.kind.as_str())),
            Field::child(
                "whitespace_before",
                NodeRef::SimpleWhitespace(&self.whitespace_before),
            ),
            Field::child(
                "whitespace_after",
                NodeRef::SimpleWhitespace(&self.whitespace_after),
            ),
        ]
    }
}
