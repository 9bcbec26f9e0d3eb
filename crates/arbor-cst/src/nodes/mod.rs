// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! CST node types.
//!
//! Nodes are plain immutable values. "Mutation" is functional: rebuild a node
//! with struct-update syntax (`Name { value: "z".into(), ..old }`) or let a
//! [`Transformer`](crate::visitor::Transformer) pass produce a new tree. The
//! original tree is never modified and stays valid alongside the new one.

pub mod codegen;
pub mod expression;
pub mod module;
pub mod op;
pub mod statement;
pub mod traits;
pub mod whitespace;

pub use codegen::{Codegen, CodegenState, PositionMode};
pub use expression::{BinaryOperation, Expression, Integer, Name};
pub use module::Module;
pub use op::{BinaryOp, BinaryOpKind, Semicolon};
pub use statement::{
    Assign, CompoundStatement, Else, Expr, If, IndentedBlock, Pass, SimpleStatementLine,
    SmallStatement, Statement, While,
};
pub use traits::{
    CodePosition, CodeRange, CstNode, Field, FieldKind, FieldValue, NodeId, NodeIdGenerator,
    NodeRef, Scalar, Span, WithLeadingLines,
};
pub use whitespace::{Comment, EmptyLine, Newline, SimpleWhitespace, TrailingWhitespace};

/// Implement structural `PartialEq`/`Eq`/`Hash` over the listed fields.
///
/// Node identity (`node_id`) is deliberately left out: two structurally
/// identical nodes at different tree positions compare equal while keeping
/// distinct identities for metadata.
macro_rules! impl_structural_eq {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field &&)* true
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                $(self.$field.hash(state);)*
            }
        }
    };
}
pub(crate) use impl_structural_eq;

/// Implement `deep_clone` for node types: a structural copy with cleared
/// identity, for re-using a node at more than one position in a tree.
macro_rules! impl_deep_clone {
    ($($ty:ident),* $(,)?) => {$(
        impl $ty {
            /// Clone this node with cleared identity so the copy can occupy
            /// its own position in a tree.
            pub fn deep_clone(&self) -> Self {
                let mut cloned = self.clone();
                cloned.visit_ids(&mut |id| *id = None);
                cloned
            }
        }
    )*};
}

impl_deep_clone!(
    Module,
    Statement,
    CompoundStatement,
    SimpleStatementLine,
    SmallStatement,
    Assign,
    Expr,
    Pass,
    If,
    While,
    Else,
    IndentedBlock,
    Expression,
    Name,
    Integer,
    BinaryOperation,
    BinaryOp,
);
