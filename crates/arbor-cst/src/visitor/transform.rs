// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Transform drivers: pure functions from (node, transformer) to a new node.
//!
//! Each driver clones the original node for the `leave_*` hook, transforms
//! the children (unless the `visit_*` gate returned `false`), rebuilds the
//! node from the transformed fields, and hands both versions to `leave_*`.
//! Removal flows upward as [`Transform::Remove`] and is resolved at the
//! parent: dropped from sequences, `None` for optional children, an error
//! for required children, and the empty-document policy at the root.

use super::traits::{Transform, Transformer};
use crate::nodes::{
    Assign, BinaryOp, BinaryOperation, Comment, CompoundStatement, Else, EmptyLine, Expr,
    Expression, If, IndentedBlock, Integer, Module, Name, Newline, Pass, Semicolon,
    SimpleStatementLine, SimpleWhitespace, SmallStatement, Statement, TrailingWhitespace, While,
};
use thiserror::Error;

/// A contract violation detected while applying a transform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A transformer returned [`Transform::Remove`] for a child that its
    /// parent cannot exist without.
    #[error("cannot remove required child `{field}` of `{parent}`")]
    RemovedRequiredChild {
        parent: &'static str,
        field: &'static str,
    },
}

macro_rules! required {
    ($transformed:expr, $parent:literal, $field:literal) => {
        match $transformed? {
            Transform::Keep(node) => node,
            Transform::Remove => {
                return Err(TransformError::RemovedRequiredChild {
                    parent: $parent,
                    field: $field,
                })
            }
        }
    };
}

/// Transform a module, resolving a root-level removal to an empty document.
pub fn transform_module<T: Transformer>(
    module: Module,
    transformer: &mut T,
) -> Result<Module, TransformError> {
    let original = module.clone();
    let updated = if transformer.visit_module(&module) {
        let Module {
            body,
            header,
            footer,
            encoding,
            default_indent,
            default_newline,
            has_trailing_newline,
            node_id,
        } = module;
        Module {
            body: transform_statements(body, transformer)?,
            header: transform_empty_lines(header, transformer)?,
            footer: transform_empty_lines(footer, transformer)?,
            encoding,
            default_indent,
            default_newline,
            has_trailing_newline,
            node_id,
        }
    } else {
        module
    };
    match transformer.leave_module(&original, updated) {
        Transform::Keep(module) => Ok(module),
        // The root has no parent to be removed from; degrade to an empty
        // document with the original formatting defaults.
        Transform::Remove => Ok(Module {
            body: Vec::new(),
            header: Vec::new(),
            footer: Vec::new(),
            ..original
        }),
    }
}

/// Transform every statement in a sequence, dropping removed elements.
pub fn transform_statements<T: Transformer>(
    body: Vec<Statement>,
    transformer: &mut T,
) -> Result<Vec<Statement>, TransformError> {
    let mut out = Vec::with_capacity(body.len());
    for stmt in body {
        if let Transform::Keep(stmt) = transform_statement(stmt, transformer)? {
            out.push(stmt);
        }
    }
    Ok(out)
}

fn transform_empty_lines<T: Transformer>(
    lines: Vec<EmptyLine>,
    transformer: &mut T,
) -> Result<Vec<EmptyLine>, TransformError> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if let Transform::Keep(line) = transform_empty_line(line, transformer)? {
            out.push(line);
        }
    }
    Ok(out)
}

pub fn transform_statement<T: Transformer>(
    node: Statement,
    transformer: &mut T,
) -> Result<Transform<Statement>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_statement(&node) {
        match node {
            Statement::Simple(line) => {
                match transform_simple_statement_line(line, transformer)? {
                    Transform::Keep(line) => Statement::Simple(line),
                    Transform::Remove => return Ok(Transform::Remove),
                }
            }
            Statement::Compound(compound) => {
                match transform_compound_statement(compound, transformer)? {
                    Transform::Keep(compound) => Statement::Compound(compound),
                    Transform::Remove => return Ok(Transform::Remove),
                }
            }
        }
    } else {
        node
    };
    Ok(transformer.leave_statement(&original, updated))
}

pub fn transform_compound_statement<T: Transformer>(
    node: CompoundStatement,
    transformer: &mut T,
) -> Result<Transform<CompoundStatement>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_compound_statement(&node) {
        match node {
            CompoundStatement::If(stmt) => match transform_if(stmt, transformer)? {
                Transform::Keep(stmt) => CompoundStatement::If(stmt),
                Transform::Remove => return Ok(Transform::Remove),
            },
            CompoundStatement::While(stmt) => match transform_while(stmt, transformer)? {
                Transform::Keep(stmt) => CompoundStatement::While(stmt),
                Transform::Remove => return Ok(Transform::Remove),
            },
        }
    } else {
        node
    };
    Ok(transformer.leave_compound_statement(&original, updated))
}

pub fn transform_simple_statement_line<T: Transformer>(
    node: SimpleStatementLine,
    transformer: &mut T,
) -> Result<Transform<SimpleStatementLine>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_simple_statement_line(&node) {
        let SimpleStatementLine {
            body,
            leading_lines,
            trailing_whitespace,
            node_id,
        } = node;
        let mut new_body = Vec::with_capacity(body.len());
        for stmt in body {
            if let Transform::Keep(stmt) = transform_small_statement(stmt, transformer)? {
                new_body.push(stmt);
            }
        }
        SimpleStatementLine {
            body: new_body,
            leading_lines: transform_empty_lines(leading_lines, transformer)?,
            trailing_whitespace: required!(
                transform_trailing_whitespace(trailing_whitespace, transformer),
                "SimpleStatementLine",
                "trailing_whitespace"
            ),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_simple_statement_line(&original, updated))
}

pub fn transform_small_statement<T: Transformer>(
    node: SmallStatement,
    transformer: &mut T,
) -> Result<Transform<SmallStatement>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_small_statement(&node) {
        match node {
            SmallStatement::Pass(stmt) => match transform_pass(stmt, transformer)? {
                Transform::Keep(stmt) => SmallStatement::Pass(stmt),
                Transform::Remove => return Ok(Transform::Remove),
            },
            SmallStatement::Expr(stmt) => match transform_expr(stmt, transformer)? {
                Transform::Keep(stmt) => SmallStatement::Expr(stmt),
                Transform::Remove => return Ok(Transform::Remove),
            },
            SmallStatement::Assign(stmt) => match transform_assign(stmt, transformer)? {
                Transform::Keep(stmt) => SmallStatement::Assign(stmt),
                Transform::Remove => return Ok(Transform::Remove),
            },
        }
    } else {
        node
    };
    Ok(transformer.leave_small_statement(&original, updated))
}

pub fn transform_pass<T: Transformer>(
    node: Pass,
    transformer: &mut T,
) -> Result<Transform<Pass>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_pass_stmt(&node) {
        let Pass { semicolon, node_id } = node;
        Pass {
            semicolon: transform_opt_semicolon(semicolon, transformer)?,
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_pass_stmt(&original, updated))
}

pub fn transform_expr<T: Transformer>(
    node: Expr,
    transformer: &mut T,
) -> Result<Transform<Expr>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_expr(&node) {
        let Expr {
            value,
            semicolon,
            node_id,
        } = node;
        Expr {
            value: required!(transform_expression(value, transformer), "Expr", "value"),
            semicolon: transform_opt_semicolon(semicolon, transformer)?,
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_expr(&original, updated))
}

pub fn transform_assign<T: Transformer>(
    node: Assign,
    transformer: &mut T,
) -> Result<Transform<Assign>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_assign(&node) {
        let Assign {
            target,
            whitespace_before_equal,
            whitespace_after_equal,
            value,
            semicolon,
            node_id,
        } = node;
        Assign {
            target: required!(transform_name(target, transformer), "Assign", "target"),
            whitespace_before_equal: required!(
                transform_simple_whitespace(whitespace_before_equal, transformer),
                "Assign",
                "whitespace_before_equal"
            ),
            whitespace_after_equal: required!(
                transform_simple_whitespace(whitespace_after_equal, transformer),
                "Assign",
                "whitespace_after_equal"
            ),
            value: required!(transform_expression(value, transformer), "Assign", "value"),
            semicolon: transform_opt_semicolon(semicolon, transformer)?,
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_assign(&original, updated))
}

pub fn transform_if<T: Transformer>(
    node: If,
    transformer: &mut T,
) -> Result<Transform<If>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_if_stmt(&node) {
        let If {
            test,
            body,
            orelse,
            leading_lines,
            whitespace_before_test,
            whitespace_after_test,
            node_id,
        } = node;
        If {
            test: required!(transform_expression(test, transformer), "If", "test"),
            body: required!(transform_indented_block(body, transformer), "If", "body"),
            orelse: match orelse {
                Some(orelse) => transform_else(orelse, transformer)?.into_option(),
                None => None,
            },
            leading_lines: transform_empty_lines(leading_lines, transformer)?,
            whitespace_before_test: required!(
                transform_simple_whitespace(whitespace_before_test, transformer),
                "If",
                "whitespace_before_test"
            ),
            whitespace_after_test: required!(
                transform_simple_whitespace(whitespace_after_test, transformer),
                "If",
                "whitespace_after_test"
            ),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_if_stmt(&original, updated))
}

pub fn transform_while<T: Transformer>(
    node: While,
    transformer: &mut T,
) -> Result<Transform<While>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_while_stmt(&node) {
        let While {
            test,
            body,
            leading_lines,
            whitespace_before_test,
            whitespace_after_test,
            node_id,
        } = node;
        While {
            test: required!(transform_expression(test, transformer), "While", "test"),
            body: required!(transform_indented_block(body, transformer), "While", "body"),
            leading_lines: transform_empty_lines(leading_lines, transformer)?,
            whitespace_before_test: required!(
                transform_simple_whitespace(whitespace_before_test, transformer),
                "While",
                "whitespace_before_test"
            ),
            whitespace_after_test: required!(
                transform_simple_whitespace(whitespace_after_test, transformer),
                "While",
                "whitespace_after_test"
            ),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_while_stmt(&original, updated))
}

pub fn transform_else<T: Transformer>(
    node: Else,
    transformer: &mut T,
) -> Result<Transform<Else>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_else_clause(&node) {
        let Else {
            body,
            leading_lines,
            whitespace_before_colon,
            node_id,
        } = node;
        Else {
            body: required!(transform_indented_block(body, transformer), "Else", "body"),
            leading_lines: transform_empty_lines(leading_lines, transformer)?,
            whitespace_before_colon: required!(
                transform_simple_whitespace(whitespace_before_colon, transformer),
                "Else",
                "whitespace_before_colon"
            ),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_else_clause(&original, updated))
}

pub fn transform_indented_block<T: Transformer>(
    node: IndentedBlock,
    transformer: &mut T,
) -> Result<Transform<IndentedBlock>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_indented_block(&node) {
        let IndentedBlock {
            body,
            header,
            indent,
            footer,
            node_id,
        } = node;
        IndentedBlock {
            body: transform_statements(body, transformer)?,
            header: required!(
                transform_trailing_whitespace(header, transformer),
                "IndentedBlock",
                "header"
            ),
            indent,
            footer: transform_empty_lines(footer, transformer)?,
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_indented_block(&original, updated))
}

pub fn transform_expression<T: Transformer>(
    node: Expression,
    transformer: &mut T,
) -> Result<Transform<Expression>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_expression(&node) {
        match node {
            Expression::Name(name) => match transform_name(name, transformer)? {
                Transform::Keep(name) => Expression::Name(name),
                Transform::Remove => return Ok(Transform::Remove),
            },
            Expression::Integer(integer) => match transform_integer(integer, transformer)? {
                Transform::Keep(integer) => Expression::Integer(integer),
                Transform::Remove => return Ok(Transform::Remove),
            },
            Expression::BinaryOperation(op) => {
                match transform_binary_operation(op, transformer)? {
                    Transform::Keep(op) => Expression::BinaryOperation(op),
                    Transform::Remove => return Ok(Transform::Remove),
                }
            }
        }
    } else {
        node
    };
    Ok(transformer.leave_expression(&original, updated))
}

pub fn transform_name<T: Transformer>(
    node: Name,
    transformer: &mut T,
) -> Result<Transform<Name>, TransformError> {
    let original = node.clone();
    transformer.visit_name(&node);
    Ok(transformer.leave_name(&original, node))
}

pub fn transform_integer<T: Transformer>(
    node: Integer,
    transformer: &mut T,
) -> Result<Transform<Integer>, TransformError> {
    let original = node.clone();
    transformer.visit_integer(&node);
    Ok(transformer.leave_integer(&original, node))
}

pub fn transform_binary_operation<T: Transformer>(
    node: BinaryOperation,
    transformer: &mut T,
) -> Result<Transform<BinaryOperation>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_binary_operation(&node) {
        let BinaryOperation {
            left,
            operator,
            right,
            node_id,
        } = node;
        BinaryOperation {
            left: Box::new(required!(
                transform_expression(*left, transformer),
                "BinaryOperation",
                "left"
            )),
            operator: required!(
                transform_binary_op(operator, transformer),
                "BinaryOperation",
                "operator"
            ),
            right: Box::new(required!(
                transform_expression(*right, transformer),
                "BinaryOperation",
                "right"
            )),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_binary_operation(&original, updated))
}

pub fn transform_binary_op<T: Transformer>(
    node: BinaryOp,
    transformer: &mut T,
) -> Result<Transform<BinaryOp>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_binary_op(&node) {
        let BinaryOp {
            kind,
            whitespace_before,
            whitespace_after,
            node_id,
        } = node;
        BinaryOp {
            kind,
            whitespace_before: required!(
                transform_simple_whitespace(whitespace_before, transformer),
                "BinaryOp",
                "whitespace_before"
            ),
            whitespace_after: required!(
                transform_simple_whitespace(whitespace_after, transformer),
                "BinaryOp",
                "whitespace_after"
            ),
            node_id,
        }
    } else {
        node
    };
    Ok(transformer.leave_binary_op(&original, updated))
}

pub fn transform_semicolon<T: Transformer>(
    node: Semicolon,
    transformer: &mut T,
) -> Result<Transform<Semicolon>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_semicolon(&node) {
        let Semicolon {
            whitespace_before,
            whitespace_after,
        } = node;
        Semicolon {
            whitespace_before: required!(
                transform_simple_whitespace(whitespace_before, transformer),
                "Semicolon",
                "whitespace_before"
            ),
            whitespace_after: required!(
                transform_simple_whitespace(whitespace_after, transformer),
                "Semicolon",
                "whitespace_after"
            ),
        }
    } else {
        node
    };
    Ok(transformer.leave_semicolon(&original, updated))
}

fn transform_opt_semicolon<T: Transformer>(
    semicolon: Option<Semicolon>,
    transformer: &mut T,
) -> Result<Option<Semicolon>, TransformError> {
    Ok(match semicolon {
        Some(semicolon) => transform_semicolon(semicolon, transformer)?.into_option(),
        None => None,
    })
}

pub fn transform_simple_whitespace<T: Transformer>(
    node: SimpleWhitespace,
    transformer: &mut T,
) -> Result<Transform<SimpleWhitespace>, TransformError> {
    let original = node.clone();
    transformer.visit_simple_whitespace(&node);
    Ok(transformer.leave_simple_whitespace(&original, node))
}

pub fn transform_comment<T: Transformer>(
    node: Comment,
    transformer: &mut T,
) -> Result<Transform<Comment>, TransformError> {
    let original = node.clone();
    transformer.visit_comment(&node);
    Ok(transformer.leave_comment(&original, node))
}

pub fn transform_newline<T: Transformer>(
    node: Newline,
    transformer: &mut T,
) -> Result<Transform<Newline>, TransformError> {
    let original = node.clone();
    transformer.visit_newline(&node);
    Ok(transformer.leave_newline(&original, node))
}

pub fn transform_empty_line<T: Transformer>(
    node: EmptyLine,
    transformer: &mut T,
) -> Result<Transform<EmptyLine>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_empty_line(&node) {
        let EmptyLine {
            indent,
            whitespace,
            comment,
            newline,
        } = node;
        EmptyLine {
            indent,
            whitespace: required!(
                transform_simple_whitespace(whitespace, transformer),
                "EmptyLine",
                "whitespace"
            ),
            comment: match comment {
                Some(comment) => transform_comment(comment, transformer)?.into_option(),
                None => None,
            },
            newline: required!(
                transform_newline(newline, transformer),
                "EmptyLine",
                "newline"
            ),
        }
    } else {
        node
    };
    Ok(transformer.leave_empty_line(&original, updated))
}

pub fn transform_trailing_whitespace<T: Transformer>(
    node: TrailingWhitespace,
    transformer: &mut T,
) -> Result<Transform<TrailingWhitespace>, TransformError> {
    let original = node.clone();
    let updated = if transformer.visit_trailing_whitespace(&node) {
        let TrailingWhitespace {
            whitespace,
            comment,
            newline,
        } = node;
        TrailingWhitespace {
            whitespace: required!(
                transform_simple_whitespace(whitespace, transformer),
                "TrailingWhitespace",
                "whitespace"
            ),
            comment: match comment {
                Some(comment) => transform_comment(comment, transformer)?.into_option(),
                None => None,
            },
            newline: required!(
                transform_newline(newline, transformer),
                "TrailingWhitespace",
                "newline"
            ),
        }
    } else {
        node
    };
    Ok(transformer.leave_trailing_whitespace(&original, updated))
}

impl Module {
    /// Transform this module, returning the new root.
    ///
    /// The receiver is unchanged; transformation builds a new tree sharing
    /// nothing mutable with the original.
    pub fn visit<T: Transformer>(&self, transformer: &mut T) -> Result<Module, TransformError> {
        transform_module(self.clone(), transformer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    struct Identity;
    impl Transformer for Identity {}

    #[test]
    fn identity_transform_preserves_structure_and_text() {
        let source = "x = 1\n\nif x:\n    y = x + 2  # note\n";
        let module = parse_module(source, None).expect("parse error");
        let transformed = module.visit(&mut Identity).expect("transform error");
        assert_eq!(transformed, module);
        assert_eq!(transformed.code(), source);
    }

    #[test]
    fn sequence_removal_preserves_order() {
        struct DropName(&'static str);
        impl Transformer for DropName {
            fn leave_statement(
                &mut self,
                original: &Statement,
                updated: Statement,
            ) -> Transform<Statement> {
                if let Statement::Simple(line) = original {
                    if let Some(SmallStatement::Assign(assign)) = line.body.first() {
                        if assign.target.value == self.0 {
                            return Transform::Remove;
                        }
                    }
                }
                Transform::Keep(updated)
            }
        }
        let module = parse_module("a = 1\nb = 2\nc = 3\n", None).expect("parse error");
        let transformed = module.visit(&mut DropName("b")).expect("transform error");
        assert_eq!(transformed.code(), "a = 1\nc = 3\n");
        assert_eq!(transformed.body.len(), 2);
    }

    #[test]
    fn optional_child_removal_becomes_none() {
        struct DropElse;
        impl Transformer for DropElse {
            fn leave_else_clause(&mut self, _original: &Else, _updated: Else) -> Transform<Else> {
                Transform::Remove
            }
        }
        let module =
            parse_module("if a:\n    x = 1\nelse:\n    x = 2\n", None).expect("parse error");
        let transformed = module.visit(&mut DropElse).expect("transform error");
        assert_eq!(transformed.code(), "if a:\n    x = 1\n");
    }

    #[test]
    fn required_child_removal_is_an_error() {
        struct DropNames;
        impl Transformer for DropNames {
            fn leave_name(&mut self, _original: &Name, _updated: Name) -> Transform<Name> {
                Transform::Remove
            }
        }
        let module = parse_module("x = 1\n", None).expect("parse error");
        let err = module.visit(&mut DropNames).unwrap_err();
        assert_eq!(
            err,
            TransformError::RemovedRequiredChild {
                parent: "Assign",
                field: "target"
            }
        );
    }

    #[test]
    fn root_removal_degrades_to_empty_document() {
        struct DropRoot;
        impl Transformer for DropRoot {
            fn leave_module(&mut self, _original: &Module, _updated: Module) -> Transform<Module> {
                Transform::Remove
            }
        }
        let module = parse_module("x = 1\n", None).expect("parse error");
        let transformed = module.visit(&mut DropRoot).expect("transform error");
        assert!(transformed.body.is_empty());
        assert!(transformed.header.is_empty());
        assert!(transformed.footer.is_empty());
        assert!(transformed.has_trailing_newline);
        assert_eq!(transformed.code(), "\n");
    }

    #[test]
    fn visit_gate_skips_children() {
        struct GatedRename;
        impl Transformer for GatedRename {
            fn visit_if_stmt(&mut self, _node: &If) -> bool {
                false
            }
            fn leave_name(&mut self, _original: &Name, updated: Name) -> Transform<Name> {
                Transform::Keep(Name {
                    value: updated.value.to_uppercase(),
                    ..updated
                })
            }
        }
        let module = parse_module("a = 1\nif b:\n    c = 2\n", None).expect("parse error");
        let transformed = module.visit(&mut GatedRename).expect("transform error");
        // Names inside the gated `if` (test and body) are untouched.
        assert_eq!(transformed.code(), "A = 1\nif b:\n    c = 2\n");
    }

    #[test]
    fn leave_receives_original_and_updated() {
        struct Check {
            saw_updated_child: bool,
        }
        impl Transformer for Check {
            fn leave_name(&mut self, _original: &Name, updated: Name) -> Transform<Name> {
                Transform::Keep(Name {
                    value: format!("{}_2", updated.value),
                    ..updated
                })
            }
            fn leave_assign(&mut self, original: &Assign, updated: Assign) -> Transform<Assign> {
                // Original still has the pre-pass child; updated has the
                // transformed child.
                assert_eq!(original.target.value, "x");
                assert_eq!(updated.target.value, "x_2");
                self.saw_updated_child = true;
                Transform::Keep(updated)
            }
        }
        let module = parse_module("x = 1\n", None).expect("parse error");
        let mut check = Check {
            saw_updated_child: false,
        };
        module.visit(&mut check).expect("transform error");
        assert!(check.saw_updated_child);
    }

    #[test]
    fn emptied_block_renders_pass() {
        struct DropBody;
        impl Transformer for DropBody {
            fn leave_statement(
                &mut self,
                original: &Statement,
                updated: Statement,
            ) -> Transform<Statement> {
                if matches!(original, Statement::Simple(_)) {
                    Transform::Remove
                } else {
                    Transform::Keep(updated)
                }
            }
        }
        let module = parse_module("if a:\n    x = 1\n    y = 2\n", None).expect("parse error");
        let transformed = module.visit(&mut DropBody).expect("transform error");
        assert_eq!(transformed.code(), "if a:\n    pass\n");
    }
}
