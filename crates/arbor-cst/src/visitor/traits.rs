// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer trait definitions for CST traversal.

use crate::nodes::{
    Assign, BinaryOp, BinaryOperation, Comment, CompoundStatement, Else, EmptyLine, Expr,
    Expression, If, IndentedBlock, Integer, Module, Name, Newline, Pass, Semicolon,
    SimpleStatementLine, SimpleWhitespace, SmallStatement, Statement, TrailingWhitespace, While,
};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// The result of transforming one node: its replacement, or the removal
/// sentinel.
///
/// `Remove` is only meaningful as the direct result of transforming a child:
/// a removed sequence element is dropped, a removed optional child becomes
/// `None`, and a removed required child is a contract violation reported as
/// [`TransformError`](crate::visitor::TransformError). A removed root
/// degrades to an empty document.
#[derive(Debug, Clone)]
pub enum Transform<T> {
    /// Keep the transformed node.
    Keep(T),
    /// Delete the node from its parent.
    Remove,
}

impl<T> Transform<T> {
    /// Returns true if this is a `Keep` variant.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep(_))
    }

    /// Returns true if this is a `Remove` variant.
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove)
    }

    /// Maps the inner value using the provided function.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Transform<U> {
        match self {
            Transform::Keep(node) => Transform::Keep(f(node)),
            Transform::Remove => Transform::Remove,
        }
    }

    /// `Keep` becomes `Some`, `Remove` becomes `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Transform::Keep(node) => Some(node),
            Transform::Remove => None,
        }
    }
}

impl<T> From<T> for Transform<T> {
    fn from(value: T) -> Self {
        Transform::Keep(value)
    }
}

/// Macro to generate visitor trait method signatures.
///
/// Generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Macro to generate transformer trait method signatures.
///
/// Generates pairs of `visit_*` (pre-order gate) and `leave_*` (post-order
/// replacement) methods. `leave_*` receives the original node alongside the
/// node rebuilt from already-transformed children and decides what replaces
/// it in the parent.
macro_rules! transformer_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Gate descent into a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Returning `false` keeps the node but leaves its children untransformed."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> bool {
                    true
                }

                $(#[$meta])*
                #[doc = concat!("Replace a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "`original` is the node as it was before this pass; `updated` is the node"]
                #[doc = "rebuilt from its already-transformed children."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, original: &$node_type, updated: $node_type) -> Transform<$node_type> {
                    Transform::Keep(updated)
                }
            )*
        }
    };
}

/// Immutable visitor for CST traversal.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order (left-to-right, top-to-bottom)
///
/// # Example
///
/// ```
/// use arbor_cst::visitor::{Visitor, VisitResult};
/// use arbor_cst::{parse_module, Name};
///
/// #[derive(Default)]
/// struct NameCollector {
///     names: Vec<String>,
/// }
///
/// impl Visitor for NameCollector {
///     fn visit_name(&mut self, node: &Name) -> VisitResult {
///         self.names.push(node.value.clone());
///         VisitResult::Continue
///     }
/// }
///
/// let module = parse_module("x = y\n", None).expect("parse error");
/// let mut collector = NameCollector::default();
/// module.walk(&mut collector);
/// assert_eq!(collector.names, ["x", "y"]);
/// ```
pub trait Visitor {
    visitor_methods! {
        module: Module,
    }

    // Statements
    visitor_methods! {
        statement: Statement,
        compound_statement: CompoundStatement,
        simple_statement_line: SimpleStatementLine,
        small_statement: SmallStatement,
        assign: Assign,
        expr: Expr,
        pass_stmt: Pass,
        if_stmt: If,
        while_stmt: While,
        else_clause: Else,
        indented_block: IndentedBlock,
    }

    // Expressions
    visitor_methods! {
        expression: Expression,
        name: Name,
        integer: Integer,
        binary_operation: BinaryOperation,
    }

    // Operators and punctuation
    visitor_methods! {
        binary_op: BinaryOp,
        semicolon: Semicolon,
    }

    // Whitespace
    visitor_methods! {
        simple_whitespace: SimpleWhitespace,
        comment: Comment,
        empty_line: EmptyLine,
        newline: Newline,
        trailing_whitespace: TrailingWhitespace,
    }
}

/// Transformer producing a new tree from an existing one.
///
/// Transformation is pure: the input tree is never modified, and the result
/// is rebuilt bottom-up from transformed children. Each node kind has a
/// `visit_*` gate and a `leave_*` replacement hook; `leave_*` may return
/// [`Transform::Remove`] to delete the node from its parent, subject to the
/// rules on [`Transform`].
///
/// # Example
///
/// ```
/// use arbor_cst::visitor::{Transform, Transformer};
/// use arbor_cst::{parse_module, Name};
///
/// struct Upcase;
///
/// impl Transformer for Upcase {
///     fn leave_name(&mut self, _original: &Name, updated: Name) -> Transform<Name> {
///         Transform::Keep(Name {
///             value: updated.value.to_uppercase(),
///             ..updated
///         })
///     }
/// }
///
/// let module = parse_module("x = 1\n", None).expect("parse error");
/// let renamed = module.visit(&mut Upcase).expect("transform error");
/// assert_eq!(renamed.code(), "X = 1\n");
/// ```
pub trait Transformer {
    transformer_methods! {
        module: Module,
    }

    // Statements
    transformer_methods! {
        statement: Statement,
        compound_statement: CompoundStatement,
        simple_statement_line: SimpleStatementLine,
        small_statement: SmallStatement,
        assign: Assign,
        expr: Expr,
        pass_stmt: Pass,
        if_stmt: If,
        while_stmt: While,
        else_clause: Else,
        indented_block: IndentedBlock,
    }

    // Expressions
    transformer_methods! {
        expression: Expression,
        name: Name,
        integer: Integer,
        binary_operation: BinaryOperation,
    }

    // Operators and punctuation
    transformer_methods! {
        binary_op: BinaryOp,
        semicolon: Semicolon,
    }

    // Whitespace
    transformer_methods! {
        simple_whitespace: SimpleWhitespace,
        comment: Comment,
        empty_line: EmptyLine,
        newline: Newline,
        trailing_whitespace: TrailingWhitespace,
    }
}
