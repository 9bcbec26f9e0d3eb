// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits and types for CST nodes.
//!
//! # Node Identity
//!
//! [`NodeId`] provides stable identity for CST nodes, distinct from structural
//! equality: two structurally identical nodes at different tree positions have
//! different ids, which is what makes identity-keyed metadata possible. Ids
//! are assigned during parsing and renumbered in pre-order by
//! [`MetadataWrapper`](crate::metadata::MetadataWrapper) so that identity is
//! dense and stable for the lifetime of one resolution run.
//!
//! Structural equality (`PartialEq`/`Eq`/`Hash` on nodes) compares every
//! field recursively and ignores `node_id`.
//!
//! # Field Reflection
//!
//! [`CstNode::fields`] is the single reflective primitive the generic parts of
//! the crate build on: it enumerates a node's fields in declaration order as
//! scalars, children, or child sequences. [`NodeRef`] is the closed union of
//! node references those enumerations yield.

use crate::nodes::expression::{BinaryOperation, Integer, Name};
use crate::nodes::module::Module;
use crate::nodes::op::{BinaryOp, Semicolon};
use crate::nodes::statement::{
    Assign, Else, Expr, If, IndentedBlock, Pass, SimpleStatementLine, While,
};
use crate::nodes::whitespace::{
    Comment, EmptyLine, Newline, SimpleWhitespace, TrailingWhitespace,
};
use serde::Serialize;
use std::fmt;

// Re-export the position types from arbor_core for convenience.
pub use arbor_core::{CodePosition, CodeRange, Span};

// ============================================================================
// Node identity
// ============================================================================

/// A stable, unique identifier for a CST node.
///
/// NodeIds are the key for identity-scoped side data such as the metadata
/// store. They carry no meaning beyond identity; in particular they do not
/// participate in structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId with the given value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Generator for assigning sequential [`NodeId`]s.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next_id: u32,
}

impl NodeIdGenerator {
    /// Create a new generator starting from NodeId(0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next NodeId.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Get the current count of generated NodeIds.
    pub fn count(&self) -> u32 {
        self.next_id
    }
}

// ============================================================================
// Field reflection
// ============================================================================

/// The shape of a node field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar value: string, bool, or token kind.
    Scalar,
    /// A single child node, required or optional.
    Child,
    /// An ordered sequence of child nodes.
    ChildSequence,
}

/// A scalar field value, borrowed from the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar<'t> {
    Str(&'t str),
    OptStr(Option<&'t str>),
    Bool(bool),
}

/// A field value, borrowed from the node.
#[derive(Debug, Clone)]
pub enum FieldValue<'t> {
    Scalar(Scalar<'t>),
    Child(NodeRef<'t>),
    OptionalChild(Option<NodeRef<'t>>),
    Sequence(Vec<NodeRef<'t>>),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Scalar(_) => FieldKind::Scalar,
            FieldValue::Child(_) | FieldValue::OptionalChild(_) => FieldKind::Child,
            FieldValue::Sequence(_) => FieldKind::ChildSequence,
        }
    }
}

/// One entry of a node's field enumeration.
#[derive(Debug, Clone)]
pub struct Field<'t> {
    /// The declared field name.
    pub name: &'static str,
    /// The field's value.
    pub value: FieldValue<'t>,
}

impl<'t> Field<'t> {
    pub fn scalar(name: &'static str, value: Scalar<'t>) -> Self {
        Self {
            name,
            value: FieldValue::Scalar(value),
        }
    }

    pub fn child(name: &'static str, node: NodeRef<'t>) -> Self {
        Self {
            name,
            value: FieldValue::Child(node),
        }
    }

    pub fn optional_child(name: &'static str, node: Option<NodeRef<'t>>) -> Self {
        Self {
            name,
            value: FieldValue::OptionalChild(node),
        }
    }

    pub fn sequence(name: &'static str, nodes: Vec<NodeRef<'t>>) -> Self {
        Self {
            name,
            value: FieldValue::Sequence(nodes),
        }
    }
}

/// Common reflective surface implemented by every concrete node type.
pub trait CstNode {
    /// The node's kind name, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// The node's identity, if assigned. Trivia and punctuation carry no
    /// identity.
    fn node_id(&self) -> Option<NodeId>;

    /// Enumerate the node's fields in declaration order.
    ///
    /// This is total (defined for every node kind) and order-stable.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A reference to any concrete node.
///
/// The wrapper enums (`Statement`, `SmallStatement`, `Expression`,
/// `CompoundStatement`) are unions rather than nodes and never appear here;
/// field enumeration resolves them to their payload.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'t> {
    Module(&'t Module),
    SimpleStatementLine(&'t SimpleStatementLine),
    Assign(&'t Assign),
    Expr(&'t Expr),
    Pass(&'t Pass),
    If(&'t If),
    While(&'t While),
    Else(&'t Else),
    IndentedBlock(&'t IndentedBlock),
    Name(&'t Name),
    Integer(&'t Integer),
    BinaryOperation(&'t BinaryOperation),
    BinaryOp(&'t BinaryOp),
    Semicolon(&'t Semicolon),
    SimpleWhitespace(&'t SimpleWhitespace),
    Comment(&'t Comment),
    Newline(&'t Newline),
    TrailingWhitespace(&'t TrailingWhitespace),
    EmptyLine(&'t EmptyLine),
}

macro_rules! dispatch {
    ($self:expr, $n:ident => $body:expr) => {
        match $self {
            NodeRef::Module($n) => $body,
            NodeRef::SimpleStatementLine($n) => $body,
            NodeRef::Assign($n) => $body,
            NodeRef::Expr($n) => $body,
            NodeRef::Pass($n) => $body,
            NodeRef::If($n) => $body,
            NodeRef::While($n) => $body,
            NodeRef::Else($n) => $body,
            NodeRef::IndentedBlock($n) => $body,
            NodeRef::Name($n) => $body,
            NodeRef::Integer($n) => $body,
            NodeRef::BinaryOperation($n) => $body,
            NodeRef::BinaryOp($n) => $body,
            NodeRef::Semicolon($n) => $body,
            NodeRef::SimpleWhitespace($n) => $body,
            NodeRef::Comment($n) => $body,
            NodeRef::Newline($n) => $body,
            NodeRef::TrailingWhitespace($n) => $body,
            NodeRef::EmptyLine($n) => $body,
        }
    };
}

impl<'t> NodeRef<'t> {
    pub fn kind(&self) -> &'static str {
        dispatch!(*self, n => n.kind())
    }

    pub fn node_id(&self) -> Option<NodeId> {
        dispatch!(*self, n => n.node_id())
    }

    pub fn fields(&self) -> Vec<Field<'t>> {
        dispatch!(*self, n => n.fields())
    }
}

/// Access to the blank/comment lines preceding a statement.
///
/// Used by the parser to re-home leading trivia (e.g. moving the first
/// statement's leading lines into the module header).
pub trait WithLeadingLines {
    fn leading_lines(&mut self) -> &mut Vec<EmptyLine>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_generator_is_sequential() {
        let mut ids = NodeIdGenerator::new();
        assert_eq!(ids.next_id(), NodeId::new(0));
        assert_eq!(ids.next_id(), NodeId::new(1));
        assert_eq!(ids.next_id(), NodeId::new(2));
        assert_eq!(ids.count(), 3);
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId::new(7).to_string(), "NodeId(7)");
    }

    #[test]
    fn field_kinds() {
        let f = Field::scalar("value", Scalar::Str("x"));
        assert_eq!(f.value.kind(), FieldKind::Scalar);
        let f = Field::optional_child("comment", None);
        assert_eq!(f.value.kind(), FieldKind::Child);
        let f = Field::sequence("body", Vec::new());
        assert_eq!(f.value.kind(), FieldKind::ChildSequence);
    }
}
