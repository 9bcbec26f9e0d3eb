// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer infrastructure for CST traversal.
//!
//! Two traversal contracts exist:
//!
//! - [`Visitor`]: read-only, with [`VisitResult`] controlling descent and
//!   early termination; driven by the `walk_*` functions.
//! - [`Transformer`]: pure tree-to-tree transformation with per-node
//!   `visit_*` gates and `leave_*` replacement hooks returning
//!   [`Transform`]; driven by the `transform_*` functions.

mod dispatch;
mod rename;
mod traits;
mod transform;

pub use dispatch::{
    walk_assign, walk_binary_op, walk_binary_operation, walk_comment, walk_compound_statement,
    walk_else, walk_empty_line, walk_expr, walk_expression, walk_if, walk_indented_block,
    walk_integer, walk_module, walk_name, walk_newline, walk_pass, walk_semicolon,
    walk_simple_statement_line, walk_simple_whitespace, walk_small_statement, walk_statement,
    walk_trailing_whitespace, walk_while,
};
pub use rename::RenameTransformer;
pub use traits::{Transform, Transformer, VisitResult, Visitor};
pub use transform::{
    transform_assign, transform_binary_op, transform_binary_operation, transform_comment,
    transform_compound_statement, transform_else, transform_empty_line, transform_expr,
    transform_expression, transform_if, transform_indented_block, transform_integer,
    transform_module, transform_name, transform_newline, transform_pass, transform_semicolon,
    transform_simple_statement_line, transform_simple_whitespace, transform_small_statement,
    transform_statement, transform_statements, transform_trailing_whitespace, transform_while,
    TransformError,
};
