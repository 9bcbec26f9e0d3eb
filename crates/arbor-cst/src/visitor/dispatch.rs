// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for read-only CST traversal.
//!
//! Each walk function calls `visit_*`, descends into children in source
//! order, then calls `leave_*`:
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    Assign, BinaryOp, BinaryOperation, Comment, CompoundStatement, Else, EmptyLine, Expr,
    Expression, If, IndentedBlock, Integer, Module, Name, Newline, Pass, Semicolon,
    SimpleStatementLine, SimpleWhitespace, SmallStatement, Statement, TrailingWhitespace, While,
};

/// Walk every child, propagating `Stop`.
macro_rules! walk_children {
    ($visitor:ident, $($walk:expr),* $(,)?) => {
        $(
            if $walk == VisitResult::Stop {
                return VisitResult::Stop;
            }
        )*
    };
}

/// Walk a [`Module`] and its children.
pub fn walk_module<V: Visitor>(visitor: &mut V, node: &Module) -> VisitResult {
    match visitor.visit_module(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.header {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
            for stmt in &node.body {
                walk_children!(visitor, walk_statement(visitor, stmt));
            }
            for line in &node.footer {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
        }
    }
    visitor.leave_module(node);
    VisitResult::Continue
}

/// Walk a [`Statement`], dispatching to its payload.
pub fn walk_statement<V: Visitor>(visitor: &mut V, node: &Statement) -> VisitResult {
    match visitor.visit_statement(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                Statement::Simple(line) => walk_simple_statement_line(visitor, line),
                Statement::Compound(compound) => walk_compound_statement(visitor, compound),
            };
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_statement(node);
    VisitResult::Continue
}

/// Walk a [`CompoundStatement`], dispatching to its payload.
pub fn walk_compound_statement<V: Visitor>(
    visitor: &mut V,
    node: &CompoundStatement,
) -> VisitResult {
    match visitor.visit_compound_statement(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                CompoundStatement::If(stmt) => walk_if(visitor, stmt),
                CompoundStatement::While(stmt) => walk_while(visitor, stmt),
            };
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_compound_statement(node);
    VisitResult::Continue
}

/// Walk a [`SimpleStatementLine`] and its children.
pub fn walk_simple_statement_line<V: Visitor>(
    visitor: &mut V,
    node: &SimpleStatementLine,
) -> VisitResult {
    match visitor.visit_simple_statement_line(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.leading_lines {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
            for stmt in &node.body {
                walk_children!(visitor, walk_small_statement(visitor, stmt));
            }
            walk_children!(
                visitor,
                walk_trailing_whitespace(visitor, &node.trailing_whitespace)
            );
        }
    }
    visitor.leave_simple_statement_line(node);
    VisitResult::Continue
}

/// Walk a [`SmallStatement`], dispatching to its payload.
pub fn walk_small_statement<V: Visitor>(visitor: &mut V, node: &SmallStatement) -> VisitResult {
    match visitor.visit_small_statement(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                SmallStatement::Pass(stmt) => walk_pass(visitor, stmt),
                SmallStatement::Expr(stmt) => walk_expr(visitor, stmt),
                SmallStatement::Assign(stmt) => walk_assign(visitor, stmt),
            };
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_small_statement(node);
    VisitResult::Continue
}

/// Walk an [`Assign`] and its children.
pub fn walk_assign<V: Visitor>(visitor: &mut V, node: &Assign) -> VisitResult {
    match visitor.visit_assign(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(
                visitor,
                walk_name(visitor, &node.target),
                walk_simple_whitespace(visitor, &node.whitespace_before_equal),
                walk_simple_whitespace(visitor, &node.whitespace_after_equal),
                walk_expression(visitor, &node.value),
            );
            if let Some(semicolon) = &node.semicolon {
                walk_children!(visitor, walk_semicolon(visitor, semicolon));
            }
        }
    }
    visitor.leave_assign(node);
    VisitResult::Continue
}

/// Walk an [`Expr`] statement and its children.
pub fn walk_expr<V: Visitor>(visitor: &mut V, node: &Expr) -> VisitResult {
    match visitor.visit_expr(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(visitor, walk_expression(visitor, &node.value));
            if let Some(semicolon) = &node.semicolon {
                walk_children!(visitor, walk_semicolon(visitor, semicolon));
            }
        }
    }
    visitor.leave_expr(node);
    VisitResult::Continue
}

/// Walk a [`Pass`] statement.
pub fn walk_pass<V: Visitor>(visitor: &mut V, node: &Pass) -> VisitResult {
    match visitor.visit_pass_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(semicolon) = &node.semicolon {
                walk_children!(visitor, walk_semicolon(visitor, semicolon));
            }
        }
    }
    visitor.leave_pass_stmt(node);
    VisitResult::Continue
}

/// Walk an [`If`] and its children.
pub fn walk_if<V: Visitor>(visitor: &mut V, node: &If) -> VisitResult {
    match visitor.visit_if_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.leading_lines {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
            walk_children!(
                visitor,
                walk_simple_whitespace(visitor, &node.whitespace_before_test),
                walk_expression(visitor, &node.test),
                walk_simple_whitespace(visitor, &node.whitespace_after_test),
                walk_indented_block(visitor, &node.body),
            );
            if let Some(orelse) = &node.orelse {
                walk_children!(visitor, walk_else(visitor, orelse));
            }
        }
    }
    visitor.leave_if_stmt(node);
    VisitResult::Continue
}

/// Walk a [`While`] and its children.
pub fn walk_while<V: Visitor>(visitor: &mut V, node: &While) -> VisitResult {
    match visitor.visit_while_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.leading_lines {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
            walk_children!(
                visitor,
                walk_simple_whitespace(visitor, &node.whitespace_before_test),
                walk_expression(visitor, &node.test),
                walk_simple_whitespace(visitor, &node.whitespace_after_test),
                walk_indented_block(visitor, &node.body),
            );
        }
    }
    visitor.leave_while_stmt(node);
    VisitResult::Continue
}

/// Walk an [`Else`] clause and its children.
pub fn walk_else<V: Visitor>(visitor: &mut V, node: &Else) -> VisitResult {
    match visitor.visit_else_clause(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.leading_lines {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
            walk_children!(
                visitor,
                walk_simple_whitespace(visitor, &node.whitespace_before_colon),
                walk_indented_block(visitor, &node.body),
            );
        }
    }
    visitor.leave_else_clause(node);
    VisitResult::Continue
}

/// Walk an [`IndentedBlock`] and its children.
pub fn walk_indented_block<V: Visitor>(visitor: &mut V, node: &IndentedBlock) -> VisitResult {
    match visitor.visit_indented_block(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(visitor, walk_trailing_whitespace(visitor, &node.header));
            for stmt in &node.body {
                walk_children!(visitor, walk_statement(visitor, stmt));
            }
            for line in &node.footer {
                walk_children!(visitor, walk_empty_line(visitor, line));
            }
        }
    }
    visitor.leave_indented_block(node);
    VisitResult::Continue
}

/// Walk an [`Expression`], dispatching to its payload.
pub fn walk_expression<V: Visitor>(visitor: &mut V, node: &Expression) -> VisitResult {
    match visitor.visit_expression(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                Expression::Name(name) => walk_name(visitor, name),
                Expression::Integer(integer) => walk_integer(visitor, integer),
                Expression::BinaryOperation(op) => walk_binary_operation(visitor, op),
            };
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave_expression(node);
    VisitResult::Continue
}

/// Walk a [`Name`] leaf.
pub fn walk_name<V: Visitor>(visitor: &mut V, node: &Name) -> VisitResult {
    if visitor.visit_name(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_name(node);
    VisitResult::Continue
}

/// Walk an [`Integer`] leaf.
pub fn walk_integer<V: Visitor>(visitor: &mut V, node: &Integer) -> VisitResult {
    if visitor.visit_integer(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_integer(node);
    VisitResult::Continue
}

/// Walk a [`BinaryOperation`] and its children.
pub fn walk_binary_operation<V: Visitor>(visitor: &mut V, node: &BinaryOperation) -> VisitResult {
    match visitor.visit_binary_operation(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(
                visitor,
                walk_expression(visitor, &node.left),
                walk_binary_op(visitor, &node.operator),
                walk_expression(visitor, &node.right),
            );
        }
    }
    visitor.leave_binary_operation(node);
    VisitResult::Continue
}

/// Walk a [`BinaryOp`] and its whitespace.
pub fn walk_binary_op<V: Visitor>(visitor: &mut V, node: &BinaryOp) -> VisitResult {
    match visitor.visit_binary_op(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(
                visitor,
                walk_simple_whitespace(visitor, &node.whitespace_before),
                walk_simple_whitespace(visitor, &node.whitespace_after),
            );
        }
    }
    visitor.leave_binary_op(node);
    VisitResult::Continue
}

/// Walk a [`Semicolon`] and its whitespace.
pub fn walk_semicolon<V: Visitor>(visitor: &mut V, node: &Semicolon) -> VisitResult {
    match visitor.visit_semicolon(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(
                visitor,
                walk_simple_whitespace(visitor, &node.whitespace_before),
                walk_simple_whitespace(visitor, &node.whitespace_after),
            );
        }
    }
    visitor.leave_semicolon(node);
    VisitResult::Continue
}

/// Walk a [`SimpleWhitespace`] leaf.
pub fn walk_simple_whitespace<V: Visitor>(visitor: &mut V, node: &SimpleWhitespace) -> VisitResult {
    if visitor.visit_simple_whitespace(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_simple_whitespace(node);
    VisitResult::Continue
}

/// Walk a [`Comment`] leaf.
pub fn walk_comment<V: Visitor>(visitor: &mut V, node: &Comment) -> VisitResult {
    if visitor.visit_comment(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_comment(node);
    VisitResult::Continue
}

/// Walk a [`Newline`] leaf.
pub fn walk_newline<V: Visitor>(visitor: &mut V, node: &Newline) -> VisitResult {
    if visitor.visit_newline(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_newline(node);
    VisitResult::Continue
}

/// Walk an [`EmptyLine`] and its children.
pub fn walk_empty_line<V: Visitor>(visitor: &mut V, node: &EmptyLine) -> VisitResult {
    match visitor.visit_empty_line(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(visitor, walk_simple_whitespace(visitor, &node.whitespace));
            if let Some(comment) = &node.comment {
                walk_children!(visitor, walk_comment(visitor, comment));
            }
            walk_children!(visitor, walk_newline(visitor, &node.newline));
        }
    }
    visitor.leave_empty_line(node);
    VisitResult::Continue
}

/// Walk a [`TrailingWhitespace`] and its children.
pub fn walk_trailing_whitespace<V: Visitor>(
    visitor: &mut V,
    node: &TrailingWhitespace,
) -> VisitResult {
    match visitor.visit_trailing_whitespace(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_children!(visitor, walk_simple_whitespace(visitor, &node.whitespace));
            if let Some(comment) = &node.comment {
                walk_children!(visitor, walk_comment(visitor, comment));
            }
            walk_children!(visitor, walk_newline(visitor, &node.newline));
        }
    }
    visitor.leave_trailing_whitespace(node);
    VisitResult::Continue
}

impl Module {
    /// Walk this module with a read-only visitor.
    pub fn walk<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_module(visitor, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl Visitor for EventLog {
        fn visit_if_stmt(&mut self, _node: &If) -> VisitResult {
            self.events.push("visit_if".to_string());
            VisitResult::Continue
        }

        fn leave_if_stmt(&mut self, _node: &If) {
            self.events.push("leave_if".to_string());
        }

        fn visit_name(&mut self, node: &Name) -> VisitResult {
            self.events.push(format!("name:{}", node.value));
            VisitResult::Continue
        }
    }

    #[test]
    fn traversal_is_preorder_then_postorder() {
        let module = parse_module("if a:\n    b = 1\n", None).expect("parse error");
        let mut log = EventLog::default();
        module.walk(&mut log);
        assert_eq!(log.events, ["visit_if", "name:a", "name:b", "leave_if"]);
    }

    #[test]
    fn skip_children_still_leaves() {
        struct Skipper {
            names: usize,
            left_if: bool,
        }
        impl Visitor for Skipper {
            fn visit_if_stmt(&mut self, _node: &If) -> VisitResult {
                VisitResult::SkipChildren
            }
            fn leave_if_stmt(&mut self, _node: &If) {
                self.left_if = true;
            }
            fn visit_name(&mut self, _node: &Name) -> VisitResult {
                self.names += 1;
                VisitResult::Continue
            }
        }
        let module = parse_module("if a:\n    b = 1\n", None).expect("parse error");
        let mut skipper = Skipper {
            names: 0,
            left_if: false,
        };
        module.walk(&mut skipper);
        assert_eq!(skipper.names, 0);
        assert!(skipper.left_if);
    }

    #[test]
    fn stop_halts_traversal() {
        struct Finder {
            target: &'static str,
            seen: Vec<String>,
        }
        impl Visitor for Finder {
            fn visit_name(&mut self, node: &Name) -> VisitResult {
                self.seen.push(node.value.clone());
                if node.value == self.target {
                    VisitResult::Stop
                } else {
                    VisitResult::Continue
                }
            }
        }
        let module = parse_module("a = 1\nb = 2\nc = 3\n", None).expect("parse error");
        let mut finder = Finder {
            target: "b",
            seen: Vec::new(),
        };
        assert_eq!(module.walk(&mut finder), VisitResult::Stop);
        assert_eq!(finder.seen, ["a", "b"]);
    }
}
