// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A single-pass scanner/recursive-descent parser.
//!
//! The grammar is line-oriented and LL(1), so the parser scans the source
//! directly and builds fully-inflated nodes with trivia attached as it goes;
//! there is no separate token stream.
//!
//! # Trivia attachment
//!
//! Blank and comment lines are buffered as "pending" lines until the parser
//! knows who owns them:
//!
//! - lines before a statement become that statement's `leading_lines`;
//! - at the end of an indented block, the leading run of pending lines still
//!   indented to the block's level becomes the block's `footer`, and the rest
//!   carry over to the statement that follows the block;
//! - lines before the first statement become the module `header`, lines after
//!   the last become the module `footer`.

pub mod errors;

pub use errors::{ParserError, Result};

use crate::nodes::op::{BinaryOp, BinaryOpKind, Semicolon};
use crate::nodes::traits::{NodeIdGenerator, WithLeadingLines};
use crate::nodes::{
    Assign, BinaryOperation, Comment, CompoundStatement, Else, EmptyLine, Expr, Expression, If,
    IndentedBlock,
    Integer, Module, Name, Newline, Pass, SimpleStatementLine, SimpleWhitespace, SmallStatement,
    Statement, TrailingWhitespace, While,
};
use arbor_core::text::{detect_default_newline, ends_with_newline};
use arbor_core::Span;
use memchr::memchr;

const KEYWORDS: &[&str] = &["if", "while", "else", "pass"];

/// Options controlling a parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    encoding: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source encoding on the parsed module. Informational only;
    /// the source text itself is always UTF-8.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

/// A blank or comment line whose owner is not yet known.
#[derive(Debug, Clone, Copy)]
struct PendingLine<'src> {
    ws: &'src str,
    comment: Option<&'src str>,
    /// `None` only at end of input: the line terminator is synthesized and
    /// later retracted by the module's trailing-newline policy.
    newline: Option<&'src str>,
}

pub(crate) struct Parser<'src> {
    src: &'src str,
    pos: usize,
    ids: NodeIdGenerator,
    default_newline: &'static str,
    default_indent: Option<String>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            ids: NodeIdGenerator::new(),
            default_newline: detect_default_newline(src),
            default_indent: None,
        }
    }

    // ------------------------------------------------------------------
    // Low-level scanning
    // ------------------------------------------------------------------

    fn at_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Whether the rest of the current line is trivia (comment, newline, or
    /// end of input).
    fn at_line_end(&self) -> bool {
        matches!(
            self.src.as_bytes().get(self.pos),
            None | Some(&b'#') | Some(&b'\n') | Some(&b'\r')
        )
    }

    fn scan_ws(&mut self) -> &'src str {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn scan_newline(&mut self) -> Option<&'src str> {
        let rest = &self.src[self.pos..];
        let len = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') || rest.starts_with('\r') {
            1
        } else {
            return None;
        };
        let newline = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(newline)
    }

    fn scan_comment(&mut self) -> Option<&'src str> {
        if self.src.as_bytes().get(self.pos) != Some(&b'#') {
            return None;
        }
        let rest = &self.src.as_bytes()[self.pos..];
        let lf = memchr(b'\n', rest);
        let cr = memchr(b'\r', rest);
        let len = match (lf, cr) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => rest.len(),
        };
        let comment = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(comment)
    }

    fn peek_word(&self) -> &'src str {
        let bytes = self.src.as_bytes();
        let mut end = self.pos;
        if end < bytes.len() && (bytes[end].is_ascii_alphabetic() || bytes[end] == b'_') {
            end += 1;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }
        }
        &self.src[self.pos..end]
    }

    fn scan_word(&mut self) -> &'src str {
        let word = self.peek_word();
        self.pos += word.len();
        word
    }

    fn here(&self) -> Span {
        Span::new(self.pos as u64, self.pos as u64)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u64, self.pos as u64)
    }

    fn expect_char(&mut self, expected: char, what: &'static str) -> Result<()> {
        match self.peek_char() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(ParserError::Expected {
                expected: what,
                span: Span::new(self.pos as u64, (self.pos + c.len_utf8()) as u64),
            }),
            None => Err(ParserError::UnexpectedEof {
                expected: what,
                span: self.here(),
            }),
        }
    }

    /// `None` when the sequence matches the document default, so rendering
    /// follows the default; `Some` preserves a deviating sequence.
    fn newline_node(&self, newline: &str) -> Newline {
        if newline == self.default_newline {
            Newline(None)
        } else {
            Newline(Some(newline.to_string()))
        }
    }

    fn trailing_whitespace(&mut self) -> Result<TrailingWhitespace> {
        let whitespace = SimpleWhitespace::new(self.scan_ws());
        let comment = self.scan_comment().map(Comment::new);
        let newline = match self.scan_newline() {
            Some(newline) => self.newline_node(newline),
            None if self.at_eof() => Newline(None),
            None => {
                return Err(ParserError::Expected {
                    expected: "`;` or end of line",
                    span: self.here(),
                })
            }
        };
        Ok(TrailingWhitespace {
            whitespace,
            comment,
            newline,
        })
    }

    // ------------------------------------------------------------------
    // Line structure
    // ------------------------------------------------------------------

    /// Consume blank/comment lines into `pending` and stop at the next code
    /// line, returning its indentation without consuming it. `None` at end
    /// of input.
    fn next_code_line(&mut self, pending: &mut Vec<PendingLine<'src>>) -> Option<&'src str> {
        loop {
            let mark = self.pos;
            let ws = self.scan_ws();
            match self.src.as_bytes().get(self.pos) {
                None => {
                    if !ws.is_empty() {
                        pending.push(PendingLine {
                            ws,
                            comment: None,
                            newline: None,
                        });
                    }
                    return None;
                }
                Some(&b'#') => {
                    let comment = self.scan_comment();
                    let newline = self.scan_newline();
                    pending.push(PendingLine {
                        ws,
                        comment,
                        newline,
                    });
                }
                Some(&b'\n') | Some(&b'\r') => {
                    let newline = self.scan_newline();
                    pending.push(PendingLine {
                        ws,
                        comment: None,
                        newline,
                    });
                }
                Some(_) => {
                    self.pos = mark;
                    return Some(ws);
                }
            }
        }
    }

    /// Convert a pending line into an [`EmptyLine`] owned at `indent`.
    fn empty_line(&self, line: &PendingLine<'_>, indent: &str) -> EmptyLine {
        let (has_indent, ws) = match line.ws.strip_prefix(indent) {
            Some(rest) => (true, rest),
            None => (false, line.ws),
        };
        EmptyLine {
            indent: has_indent,
            whitespace: SimpleWhitespace::new(ws),
            comment: line.comment.map(Comment::new),
            newline: match line.newline {
                Some(newline) => self.newline_node(newline),
                None => Newline(None),
            },
        }
    }

    fn drain_leading(
        &self,
        pending: &mut Vec<PendingLine<'src>>,
        indent: &str,
    ) -> Vec<EmptyLine> {
        pending
            .drain(..)
            .map(|line| self.empty_line(&line, indent))
            .collect()
    }

    /// Take the leading run of pending lines still indented to the block's
    /// level; they form the block's footer. The rest belong to whatever
    /// follows the block.
    fn take_footer(
        &self,
        pending: &mut Vec<PendingLine<'src>>,
        block_indent: &str,
    ) -> Vec<EmptyLine> {
        let split = pending
            .iter()
            .position(|line| !line.ws.starts_with(block_indent))
            .unwrap_or_else(|| pending.len());
        pending
            .drain(..split)
            .map(|line| self.empty_line(&line, block_indent))
            .collect()
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_statement_seq(
        &mut self,
        indent: &str,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<Vec<Statement>> {
        let mut body = Vec::new();
        while let Some(ws) = self.next_code_line(pending) {
            if ws == indent {
                let leading = self.drain_leading(pending, indent);
                body.push(self.parse_statement(indent, leading, pending)?);
            } else if indent.starts_with(ws) {
                // Dedent: this line belongs to an enclosing block.
                break;
            } else if ws.starts_with(indent) {
                return Err(ParserError::Expected {
                    expected: "a statement at the current indentation",
                    span: Span::new(self.pos as u64, (self.pos + ws.len()) as u64),
                });
            } else {
                return Err(ParserError::BadIndent {
                    span: Span::new(self.pos as u64, (self.pos + ws.len()) as u64),
                });
            }
        }
        Ok(body)
    }

    fn parse_statement(
        &mut self,
        indent: &str,
        leading: Vec<EmptyLine>,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<Statement> {
        self.scan_ws();
        match self.peek_word() {
            "if" => Ok(Statement::Compound(CompoundStatement::If(
                self.parse_if(indent, leading, pending)?,
            ))),
            "while" => Ok(Statement::Compound(CompoundStatement::While(
                self.parse_while(indent, leading, pending)?,
            ))),
            "else" => {
                let start = self.pos;
                let keyword = self.scan_word().to_string();
                Err(ParserError::UnexpectedKeyword {
                    keyword,
                    span: self.span_from(start),
                })
            }
            _ => Ok(Statement::Simple(self.parse_simple_line(leading)?)),
        }
    }

    fn parse_if(
        &mut self,
        indent: &str,
        leading: Vec<EmptyLine>,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<If> {
        let id = self.ids.next_id();
        self.scan_word();
        let whitespace_before_test = SimpleWhitespace::new(self.scan_ws());
        let test = self.parse_expression_inner()?;
        let whitespace_after_test = SimpleWhitespace::new(self.scan_ws());
        self.expect_char(':', "`:`")?;
        let header = self.trailing_whitespace()?;
        let body = self.parse_block(indent, header, pending)?;
        let orelse = self.parse_else_opt(indent, pending)?;
        Ok(If {
            test,
            body,
            orelse,
            leading_lines: leading,
            whitespace_before_test,
            whitespace_after_test,
            node_id: Some(id),
        })
    }

    fn parse_while(
        &mut self,
        indent: &str,
        leading: Vec<EmptyLine>,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<While> {
        let id = self.ids.next_id();
        self.scan_word();
        let whitespace_before_test = SimpleWhitespace::new(self.scan_ws());
        let test = self.parse_expression_inner()?;
        let whitespace_after_test = SimpleWhitespace::new(self.scan_ws());
        self.expect_char(':', "`:`")?;
        let header = self.trailing_whitespace()?;
        let body = self.parse_block(indent, header, pending)?;
        Ok(While {
            test,
            body,
            leading_lines: leading,
            whitespace_before_test,
            whitespace_after_test,
            node_id: Some(id),
        })
    }

    fn parse_else_opt(
        &mut self,
        indent: &str,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<Option<Else>> {
        match self.next_code_line(pending) {
            Some(ws) if ws == indent => {
                let mark = self.pos;
                self.scan_ws();
                if self.peek_word() != "else" {
                    // Not an else clause; leave the line (and any pending
                    // trivia) for the enclosing statement sequence.
                    self.pos = mark;
                    return Ok(None);
                }
                let id = self.ids.next_id();
                let leading = self.drain_leading(pending, indent);
                self.scan_word();
                let whitespace_before_colon = SimpleWhitespace::new(self.scan_ws());
                self.expect_char(':', "`:`")?;
                let header = self.trailing_whitespace()?;
                let body = self.parse_block(indent, header, pending)?;
                Ok(Some(Else {
                    body,
                    leading_lines: leading,
                    whitespace_before_colon,
                    node_id: Some(id),
                }))
            }
            _ => Ok(None),
        }
    }

    fn parse_block(
        &mut self,
        outer_indent: &str,
        header: TrailingWhitespace,
        pending: &mut Vec<PendingLine<'src>>,
    ) -> Result<IndentedBlock> {
        let id = self.ids.next_id();
        let Some(ws) = self.next_code_line(pending) else {
            return Err(ParserError::UnexpectedEof {
                expected: "an indented block",
                span: self.here(),
            });
        };
        if !(ws.starts_with(outer_indent) && ws.len() > outer_indent.len()) {
            return Err(ParserError::Expected {
                expected: "an indented block",
                span: self.span_from(self.pos),
            });
        }
        let block_indent = ws.to_string();
        let relative = ws[outer_indent.len()..].to_string();
        if self.default_indent.is_none() {
            self.default_indent = Some(relative.clone());
        }
        let indent = if self.default_indent.as_deref() == Some(relative.as_str()) {
            None
        } else {
            Some(relative)
        };
        let body = self.parse_statement_seq(&block_indent, pending)?;
        let footer = self.take_footer(pending, &block_indent);
        Ok(IndentedBlock {
            body,
            header,
            indent,
            footer,
            node_id: Some(id),
        })
    }

    fn parse_simple_line(&mut self, leading: Vec<EmptyLine>) -> Result<SimpleStatementLine> {
        let id = self.ids.next_id();
        let mut body = Vec::new();
        loop {
            let mut small = self.parse_small_statement()?;
            let mark = self.pos;
            let ws_before = self.scan_ws();
            if self.peek_char() == Some(';') {
                self.pos += 1;
                // Whitespace after a trailing `;` belongs to the line's
                // trailing whitespace, not the semicolon.
                let after_semi = self.pos;
                let ws_after = self.scan_ws();
                if self.at_line_end() {
                    self.pos = after_semi;
                    small.set_semicolon(Some(Semicolon {
                        whitespace_before: SimpleWhitespace::new(ws_before),
                        whitespace_after: SimpleWhitespace::default(),
                    }));
                    body.push(small);
                    break;
                }
                small.set_semicolon(Some(Semicolon {
                    whitespace_before: SimpleWhitespace::new(ws_before),
                    whitespace_after: SimpleWhitespace::new(ws_after),
                }));
                body.push(small);
            } else {
                self.pos = mark;
                body.push(small);
                break;
            }
        }
        let trailing_whitespace = self.trailing_whitespace()?;
        Ok(SimpleStatementLine {
            body,
            leading_lines: leading,
            trailing_whitespace,
            node_id: Some(id),
        })
    }

    fn parse_small_statement(&mut self) -> Result<SmallStatement> {
        let id = self.ids.next_id();
        let word = self.peek_word();
        if word == "pass" {
            self.scan_word();
            return Ok(SmallStatement::Pass(Pass {
                semicolon: None,
                node_id: Some(id),
            }));
        }
        if KEYWORDS.contains(&word) {
            let start = self.pos;
            let keyword = self.scan_word().to_string();
            return Err(ParserError::UnexpectedKeyword {
                keyword,
                span: self.span_from(start),
            });
        }
        let expr_start = self.pos;
        let value = self.parse_expression_inner()?;
        let mark = self.pos;
        let ws_before = self.scan_ws();
        if self.peek_char() == Some('=') {
            self.pos += 1;
            let target = match value {
                Expression::Name(name) => name,
                _ => {
                    return Err(ParserError::InvalidAssignTarget {
                        span: Span::new(expr_start as u64, mark as u64),
                    })
                }
            };
            let whitespace_after_equal = SimpleWhitespace::new(self.scan_ws());
            let value = self.parse_expression_inner()?;
            Ok(SmallStatement::Assign(Assign {
                target,
                whitespace_before_equal: SimpleWhitespace::new(ws_before),
                whitespace_after_equal,
                value,
                semicolon: None,
                node_id: Some(id),
            }))
        } else {
            self.pos = mark;
            Ok(SmallStatement::Expr(Expr {
                value,
                semicolon: None,
                node_id: Some(id),
            }))
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Entry point for parsing a standalone expression: the expression plus
    /// optional trailing whitespace and at most one newline.
    pub(crate) fn parse_expression_entry(mut self) -> Result<Expression> {
        let expression = self.parse_expression_inner()?;
        self.scan_ws();
        self.scan_newline();
        if !self.at_eof() {
            return Err(ParserError::Expected {
                expected: "end of input",
                span: self.here(),
            });
        }
        Ok(expression)
    }

    fn parse_expression_inner(&mut self) -> Result<Expression> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let mark = self.pos;
            let ws_before = self.scan_ws();
            let kind = match self.peek_char() {
                Some('+') => BinaryOpKind::Add,
                Some('-') => BinaryOpKind::Subtract,
                _ => {
                    self.pos = mark;
                    break;
                }
            };
            expr = self.finish_binary(expr, kind, ws_before)?;
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut expr = self.parse_atom()?;
        loop {
            let mark = self.pos;
            let ws_before = self.scan_ws();
            let kind = match self.peek_char() {
                Some('*') => BinaryOpKind::Multiply,
                Some('/') => BinaryOpKind::Divide,
                _ => {
                    self.pos = mark;
                    break;
                }
            };
            expr = self.finish_binary_mul(expr, kind, ws_before)?;
        }
        Ok(expr)
    }

    fn finish_binary(
        &mut self,
        left: Expression,
        kind: BinaryOpKind,
        ws_before: &'src str,
    ) -> Result<Expression> {
        let id = self.ids.next_id();
        let op_id = self.ids.next_id();
        self.pos += 1;
        let whitespace_after = SimpleWhitespace::new(self.scan_ws());
        let right = self.parse_multiplicative()?;
        Ok(Expression::BinaryOperation(BinaryOperation {
            left: Box::new(left),
            operator: BinaryOp {
                kind,
                whitespace_before: SimpleWhitespace::new(ws_before),
                whitespace_after,
                node_id: Some(op_id),
            },
            right: Box::new(right),
            node_id: Some(id),
        }))
    }

    fn finish_binary_mul(
        &mut self,
        left: Expression,
        kind: BinaryOpKind,
        ws_before: &'src str,
    ) -> Result<Expression> {
        let id = self.ids.next_id();
        let op_id = self.ids.next_id();
        self.pos += 1;
        let whitespace_after = SimpleWhitespace::new(self.scan_ws());
        let right = self.parse_atom()?;
        Ok(Expression::BinaryOperation(BinaryOperation {
            left: Box::new(left),
            operator: BinaryOp {
                kind,
                whitespace_before: SimpleWhitespace::new(ws_before),
                whitespace_after,
                node_id: Some(op_id),
            },
            right: Box::new(right),
            node_id: Some(id),
        }))
    }

    fn parse_atom(&mut self) -> Result<Expression> {
        let start = self.pos;
        match self.peek_char() {
            None => Err(ParserError::UnexpectedEof {
                expected: "an expression",
                span: self.here(),
            }),
            Some(c) if c.is_ascii_digit() => {
                let id = self.ids.next_id();
                let bytes = self.src.as_bytes();
                while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                Ok(Expression::Integer(Integer {
                    value: self.src[start..self.pos].to_string(),
                    node_id: Some(id),
                }))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.scan_word();
                if KEYWORDS.contains(&word) {
                    return Err(ParserError::UnexpectedKeyword {
                        keyword: word.to_string(),
                        span: self.span_from(start),
                    });
                }
                let id = self.ids.next_id();
                Ok(Expression::Name(Name {
                    value: word.to_string(),
                    node_id: Some(id),
                }))
            }
            Some(c) => Err(ParserError::UnexpectedChar {
                found: c,
                span: Span::new(start as u64, (start + c.len_utf8()) as u64),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Module
    // ------------------------------------------------------------------

    pub(crate) fn parse_module(mut self, options: ParseOptions) -> Result<Module> {
        let module_id = self.ids.next_id();
        let mut pending = Vec::new();
        let mut body = self.parse_statement_seq("", &mut pending)?;

        let mut header = Vec::new();
        let mut footer = Vec::new();
        if body.is_empty() {
            // A document with no statements owns all of its trivia as header.
            header = self.drain_leading(&mut pending, "");
        } else {
            footer = self.take_footer(&mut pending, "");
            if let Some(first) = body.first_mut() {
                header = std::mem::take(first.leading_lines());
            }
        }

        Ok(Module {
            body,
            header,
            footer,
            encoding: options.encoding.unwrap_or_else(|| "utf-8".to_string()),
            default_indent: self
                .default_indent
                .take()
                .unwrap_or_else(|| "    ".to_string()),
            default_newline: self.default_newline.to_string(),
            has_trailing_newline: ends_with_newline(self.src),
            node_id: Some(module_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    #[test]
    fn parses_assignment_shape() {
        let module = parse_module("x = 1\n", None).expect("parse error");
        assert_eq!(module.body.len(), 1);
        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        let SmallStatement::Assign(assign) = &line.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(assign.target.value, "x");
        let Expression::Integer(value) = &assign.value else {
            panic!("expected integer value");
        };
        assert_eq!(value.value, "1");
    }

    #[test]
    fn parsed_nodes_have_ids() {
        let module = parse_module("x = 1\n", None).expect("parse error");
        assert!(module.node_id.is_some());
        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        assert!(line.node_id.is_some());
        let SmallStatement::Assign(assign) = &line.body[0] else {
            panic!("expected assignment");
        };
        assert!(assign.node_id.is_some());
        assert!(assign.target.node_id.is_some());
        assert_ne!(assign.node_id, assign.target.node_id);
    }

    #[test]
    fn detects_document_defaults() {
        let module = parse_module("a = 1\r\nif a:\r\n  pass\r\n", None).expect("parse error");
        assert_eq!(module.default_newline, "\r\n");
        assert_eq!(module.default_indent, "  ");
        assert!(module.has_trailing_newline);

        let module = parse_module("a = 1", None).expect("parse error");
        assert!(!module.has_trailing_newline);
        assert_eq!(module.default_indent, "    ");
    }

    #[test]
    fn header_owns_leading_comments() {
        let module = parse_module("# banner\n\nx = 1\n", None).expect("parse error");
        assert_eq!(module.header.len(), 2);
        assert_eq!(
            module.header[0].comment.as_ref().map(|c| c.0.as_str()),
            Some("# banner")
        );
        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        assert!(line.leading_lines.is_empty());
    }

    #[test]
    fn footer_owns_trailing_comments() {
        let module = parse_module("x = 1\n# done\n", None).expect("parse error");
        assert_eq!(module.footer.len(), 1);
        assert_eq!(
            module.footer[0].comment.as_ref().map(|c| c.0.as_str()),
            Some("# done")
        );
    }

    #[test]
    fn comment_only_module_is_header() {
        let module = parse_module("# just a comment\n", None).expect("parse error");
        assert!(module.body.is_empty());
        assert_eq!(module.header.len(), 1);
        assert!(module.footer.is_empty());
    }

    #[test]
    fn comments_attach_to_following_statement() {
        let module = parse_module("x = 1\n# about y\ny = 2\n", None).expect("parse error");
        let Statement::Simple(line) = &module.body[1] else {
            panic!("expected simple statement line");
        };
        assert_eq!(line.leading_lines.len(), 1);
        assert_eq!(
            line.leading_lines[0].comment.as_ref().map(|c| c.0.as_str()),
            Some("# about y")
        );
    }

    #[test]
    fn block_footer_vs_next_statement() {
        let src = "if a:\n    pass\n    # ours\n# theirs\nz = 1\n";
        let module = parse_module(src, None).expect("parse error");
        let Statement::Compound(CompoundStatement::If(if_stmt)) = &module.body[0] else {
            panic!("expected if statement");
        };
        assert_eq!(if_stmt.body.footer.len(), 1);
        assert_eq!(
            if_stmt.body.footer[0].comment.as_ref().map(|c| c.0.as_str()),
            Some("# ours")
        );
        let Statement::Simple(line) = &module.body[1] else {
            panic!("expected simple statement line");
        };
        assert_eq!(line.leading_lines.len(), 1);
    }

    #[test]
    fn if_else_shape() {
        let module =
            parse_module("if a:\n    x = 1\nelse:\n    x = 2\n", None).expect("parse error");
        let Statement::Compound(CompoundStatement::If(if_stmt)) = &module.body[0] else {
            panic!("expected if statement");
        };
        assert!(if_stmt.orelse.is_some());
        assert_eq!(if_stmt.body.body.len(), 1);
    }

    #[test]
    fn semicolons_split_small_statements() {
        let module = parse_module("x = 1; y = 2\n", None).expect("parse error");
        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        assert_eq!(line.body.len(), 2);
        let SmallStatement::Assign(first) = &line.body[0] else {
            panic!("expected assignment");
        };
        assert!(first.semicolon.is_some());
        let SmallStatement::Assign(second) = &line.body[1] else {
            panic!("expected assignment");
        };
        assert!(second.semicolon.is_none());
    }

    #[test]
    fn expression_precedence() {
        let module = parse_module("r = a + b * 2\n", None).expect("parse error");
        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        let SmallStatement::Assign(assign) = &line.body[0] else {
            panic!("expected assignment");
        };
        let Expression::BinaryOperation(add) = &assign.value else {
            panic!("expected addition at the top");
        };
        assert_eq!(add.operator.kind, BinaryOpKind::Add);
        let Expression::BinaryOperation(mul) = &*add.right else {
            panic!("expected multiplication on the right");
        };
        assert_eq!(mul.operator.kind, BinaryOpKind::Multiply);
    }

    #[test]
    fn rejects_bad_dedent() {
        let err = parse_module("if a:\n    x = 1\n  y = 2\n", None).unwrap_err();
        assert!(matches!(
            err,
            ParserError::BadIndent { .. } | ParserError::Expected { .. }
        ));
    }

    #[test]
    fn rejects_unexpected_indent() {
        let err = parse_module("x = 1\n    y = 2\n", None).unwrap_err();
        assert!(matches!(err, ParserError::Expected { .. }));
    }

    #[test]
    fn rejects_missing_block() {
        let err = parse_module("if a:\n", None).unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedEof { .. }));
    }

    #[test]
    fn rejects_invalid_assignment_target() {
        let err = parse_module("a + b = 2\n", None).unwrap_err();
        assert!(matches!(err, ParserError::InvalidAssignTarget { .. }));
    }

    #[test]
    fn rejects_stray_else() {
        let err = parse_module("else:\n    pass\n", None).unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedKeyword { .. }));
    }

    #[test]
    fn rejects_keyword_in_expression() {
        let err = parse_module("x = pass\n", None).unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedKeyword { .. }));
    }
}
