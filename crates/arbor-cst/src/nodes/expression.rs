// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes.

use crate::nodes::codegen::{Codegen, CodegenState};
use crate::nodes::impl_structural_eq;
use crate::nodes::op::BinaryOp;
use crate::nodes::traits::{CstNode, Field, NodeId, NodeRef, Scalar};

/// The closed set of expression kinds.
///
/// This is a union, not a node: identity and positions live on the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Name(Name),
    Integer(Integer),
    BinaryOperation(BinaryOperation),
}

impl Expression {
    /// A [`NodeRef`] to the concrete payload.
    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            Expression::Name(n) => NodeRef::Name(n),
            Expression::Integer(n) => NodeRef::Integer(n),
            Expression::BinaryOperation(n) => NodeRef::BinaryOperation(n),
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        match self {
            Expression::Name(n) => n.visit_ids(f),
            Expression::Integer(n) => n.visit_ids(f),
            Expression::BinaryOperation(n) => n.visit_ids(f),
        }
    }
}

impl<'a> Codegen<'a> for Expression {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        match self {
            Expression::Name(n) => n.codegen(state),
            Expression::Integer(n) => n.codegen(state),
            Expression::BinaryOperation(n) => n.codegen(state),
        }
    }
}

/// An identifier.
#[derive(Debug, Clone, Default)]
pub struct Name {
    pub value: String,
    pub node_id: Option<NodeId>,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            node_id: None,
        }
    }
}

impl_structural_eq!(Name { value });

impl Name {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
    }
}

impl<'a> Codegen<'a> for Name {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        state.add_token(&self.value);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Name {
    fn kind(&self) -> &'static str {
        "Name"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("value", Scalar::Str(&self.value))]
    }
}

/// An integer literal, stored as its exact source text.
#[derive(Debug, Clone, Default)]
pub struct Integer {
    pub value: String,
    pub node_id: Option<NodeId>,
}

impl Integer {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            node_id: None,
        }
    }
}

impl_structural_eq!(Integer { value });

impl Integer {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
    }
}

impl<'a> Codegen<'a> for Integer {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        state.add_token(&self.value);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Integer {
    fn kind(&self) -> &'static str {
        "Integer"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("value", Scalar::Str(&self.value))]
    }
}

/// An infix arithmetic expression.
#[derive(Debug, Clone)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOp,
    pub right: Box<Expression>,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(BinaryOperation {
    left,
    operator,
    right,
});

impl BinaryOperation {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.left.visit_ids(f);
        self.operator.visit_ids(f);
        self.right.visit_ids(f);
    }
}

impl<'a> Codegen<'a> for BinaryOperation {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.left.codegen(state);
        self.operator.codegen(state);
        self.right.codegen(state);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for BinaryOperation {
    fn kind(&self) -> &'static str {
        "BinaryOperation"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("left", self.left.node_ref()),
            Field::child("operator", NodeRef::BinaryOp(&self.operator)),
            Field::child("right", self.right.node_ref()),
        ]
    }
}
