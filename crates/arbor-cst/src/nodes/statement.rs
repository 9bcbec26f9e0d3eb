// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement and block nodes.

use crate::nodes::codegen::{Codegen, CodegenState};
use crate::nodes::expression::{Expression, Name};
use crate::nodes::impl_structural_eq;
use crate::nodes::op::Semicolon;
use crate::nodes::traits::{CstNode, Field, NodeId, NodeRef, Scalar, WithLeadingLines};
use crate::nodes::whitespace::{EmptyLine, SimpleWhitespace, TrailingWhitespace};

/// The closed set of statement kinds.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Simple(SimpleStatementLine),
    Compound(CompoundStatement),
}

impl Statement {
    /// A [`NodeRef`] to the concrete payload.
    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            Statement::Simple(s) => NodeRef::SimpleStatementLine(s),
            Statement::Compound(c) => c.node_ref(),
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        match self {
            Statement::Simple(s) => s.visit_ids(f),
            Statement::Compound(c) => c.visit_ids(f),
        }
    }
}

impl WithLeadingLines for Statement {
    fn leading_lines(&mut self) -> &mut Vec<EmptyLine> {
        match self {
            Statement::Simple(s) => &mut s.leading_lines,
            Statement::Compound(c) => c.leading_lines(),
        }
    }
}

impl<'a> Codegen<'a> for Statement {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        match self {
            Statement::Simple(s) => s.codegen(state),
            Statement::Compound(c) => c.codegen(state),
        }
    }
}

/// The closed set of compound (block-introducing) statement kinds.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompoundStatement {
    If(If),
    While(While),
}

impl CompoundStatement {
    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            CompoundStatement::If(i) => NodeRef::If(i),
            CompoundStatement::While(w) => NodeRef::While(w),
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        match self {
            CompoundStatement::If(i) => i.visit_ids(f),
            CompoundStatement::While(w) => w.visit_ids(f),
        }
    }
}

impl WithLeadingLines for CompoundStatement {
    fn leading_lines(&mut self) -> &mut Vec<EmptyLine> {
        match self {
            CompoundStatement::If(i) => &mut i.leading_lines,
            CompoundStatement::While(w) => &mut w.leading_lines,
        }
    }
}

impl<'a> Codegen<'a> for CompoundStatement {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        match self {
            CompoundStatement::If(i) => i.codegen(state),
            CompoundStatement::While(w) => w.codegen(state),
        }
    }
}

/// A line of one or more small statements separated by semicolons.
#[derive(Debug, Clone)]
pub struct SimpleStatementLine {
    /// The small statements on this line. All but the last carry a semicolon.
    pub body: Vec<SmallStatement>,
    /// Blank and comment lines owned by this statement.
    pub leading_lines: Vec<EmptyLine>,
    /// Optional trailing comment and the line terminator.
    pub trailing_whitespace: TrailingWhitespace,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(SimpleStatementLine {
    body,
    leading_lines,
    trailing_whitespace,
});

impl SimpleStatementLine {
    pub fn new(body: Vec<SmallStatement>) -> Self {
        Self {
            body,
            leading_lines: Vec::new(),
            trailing_whitespace: TrailingWhitespace::default(),
            node_id: None,
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        for stmt in &mut self.body {
            stmt.visit_ids(f);
        }
    }
}

impl<'a> Codegen<'a> for SimpleStatementLine {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        for line in &self.leading_lines {
            line.codegen(state);
        }
        // A line whose statements were all removed renders nothing beyond
        // its leading trivia.
        if !self.body.is_empty() {
            state.add_indent();
            for stmt in &self.body {
                stmt.codegen(state);
            }
            self.trailing_whitespace.codegen(state);
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for SimpleStatementLine {
    fn kind(&self) -> &'static str {
        "SimpleStatementLine"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::sequence("body", self.body.iter().map(SmallStatement::node_ref).collect()),
            Field::sequence(
                "leading_lines",
                self.leading_lines.iter().map(NodeRef::EmptyLine).collect(),
            ),
            Field::child(
                "trailing_whitespace",
                NodeRef::TrailingWhitespace(&self.trailing_whitespace),
            ),
        ]
    }
}

/// The closed set of small (single-line) statement kinds.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SmallStatement {
    Pass(Pass),
    Expr(Expr),
    Assign(Assign),
}

impl SmallStatement {
    pub fn node_ref(&self) -> NodeRef<'_> {
        match self {
            SmallStatement::Pass(p) => NodeRef::Pass(p),
            SmallStatement::Expr(e) => NodeRef::Expr(e),
            SmallStatement::Assign(a) => NodeRef::Assign(a),
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        match self {
            SmallStatement::Pass(p) => p.visit_ids(f),
            SmallStatement::Expr(e) => e.visit_ids(f),
            SmallStatement::Assign(a) => a.visit_ids(f),
        }
    }

    pub(crate) fn set_semicolon(&mut self, semicolon: Option<Semicolon>) {
        match self {
            SmallStatement::Pass(p) => p.semicolon = semicolon,
            SmallStatement::Expr(e) => e.semicolon = semicolon,
            SmallStatement::Assign(a) => a.semicolon = semicolon,
        }
    }
}

impl<'a> Codegen<'a> for SmallStatement {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        match self {
            SmallStatement::Pass(p) => p.codegen(state),
            SmallStatement::Expr(e) => e.codegen(state),
            SmallStatement::Assign(a) => a.codegen(state),
        }
    }
}

/// The `pass` statement.
#[derive(Debug, Clone, Default)]
pub struct Pass {
    pub semicolon: Option<Semicolon>,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(Pass { semicolon });

impl Pass {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
    }
}

impl<'a> Codegen<'a> for Pass {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        state.add_token("pass");
        if let Some(semicolon) = &self.semicolon {
            semicolon.codegen(state);
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Pass {
    fn kind(&self) -> &'static str {
        "Pass"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::optional_child(
            "semicolon",
            self.semicolon.as_ref().map(NodeRef::Semicolon),
        )]
    }
}

/// A bare expression in statement position.
#[derive(Debug, Clone)]
pub struct Expr {
    pub value: Expression,
    pub semicolon: Option<Semicolon>,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(Expr { value, semicolon });

impl Expr {
    pub fn new(value: Expression) -> Self {
        Self {
            value,
            semicolon: None,
            node_id: None,
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.value.visit_ids(f);
    }
}

impl<'a> Codegen<'a> for Expr {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.value.codegen(state);
        if let Some(semicolon) = &self.semicolon {
            semicolon.codegen(state);
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Expr {
    fn kind(&self) -> &'static str {
        "Expr"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("value", self.value.node_ref()),
            Field::optional_child("semicolon", self.semicolon.as_ref().map(NodeRef::Semicolon)),
        ]
    }
}

/// An assignment of an expression to a single name.
#[derive(Debug, Clone)]
pub struct Assign {
    pub target: Name,
    pub whitespace_before_equal: SimpleWhitespace,
    pub whitespace_after_equal: SimpleWhitespace,
    pub value: Expression,
    pub semicolon: Option<Semicolon>,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(Assign {
    target,
    whitespace_before_equal,
    whitespace_after_equal,
    value,
    semicolon,
});

impl Assign {
    /// Build an assignment with single-space spacing around the `=`.
    pub fn new(target: Name, value: Expression) -> Self {
        Self {
            target,
            whitespace_before_equal: SimpleWhitespace::new(" "),
            whitespace_after_equal: SimpleWhitespace::new(" "),
            value,
            semicolon: None,
            node_id: None,
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.target.visit_ids(f);
        self.value.visit_ids(f);
    }
}

impl<'a> Codegen<'a> for Assign {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.target.codegen(state);
        self.whitespace_before_equal.codegen(state);
        state.add_token("=");
        self.whitespace_after_equal.codegen(state);
        self.value.codegen(state);
        if let Some(semicolon) = &self.semicolon {
            semicolon.codegen(state);
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Assign {
    fn kind(&self) -> &'static str {
        "Assign"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("target", NodeRef::Name(&self.target)),
            Field::child(
                "whitespace_before_equal",
                NodeRef::SimpleWhitespace(&self.whitespace_before_equal),
            ),
            Field::child(
                "whitespace_after_equal",
                NodeRef::SimpleWhitespace(&self.whitespace_after_equal),
            ),
            Field::child("value", self.value.node_ref()),
            Field::optional_child("semicolon", self.semicolon.as_ref().map(NodeRef::Semicolon)),
        ]
    }
}

/// The `if` statement with an optional `else` clause.
#[derive(Debug, Clone)]
pub struct If {
    pub test: Expression,
    pub body: IndentedBlock,
    pub orelse: Option<Else>,
    pub leading_lines: Vec<EmptyLine>,
    pub whitespace_before_test: SimpleWhitespace,
    pub whitespace_after_test: SimpleWhitespace,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(If {
    test,
    body,
    orelse,
    leading_lines,
    whitespace_before_test,
    whitespace_after_test,
});

impl If {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.test.visit_ids(f);
        self.body.visit_ids(f);
        if let Some(orelse) = &mut self.orelse {
            orelse.visit_ids(f);
        }
    }
}

impl<'a> Codegen<'a> for If {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        for line in &self.leading_lines {
            line.codegen(state);
        }
        state.add_indent();
        state.add_token("if");
        self.whitespace_before_test.codegen(state);
        self.test.codegen(state);
        self.whitespace_after_test.codegen(state);
        state.add_token(":");
        self.body.codegen(state);
        if let Some(orelse) = &self.orelse {
            orelse.codegen(state);
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for If {
    fn kind(&self) -> &'static str {
        "If"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("test", self.test.node_ref()),
            Field::child("body", NodeRef::IndentedBlock(&self.body)),
            Field::optional_child("orelse", self.orelse.as_ref().map(NodeRef::Else)),
            Field::sequence(
                "leading_lines",
                self.leading_lines.iter().map(NodeRef::EmptyLine).collect(),
            ),
            Field::child(
                "whitespace_before_test",
                NodeRef::SimpleWhitespace(&self.whitespace_before_test),
            ),
            Field::child(
                "whitespace_after_test",
                NodeRef::SimpleWhitespace(&self.whitespace_after_test),
            ),
        ]
    }
}

/// The `while` statement.
#[derive(Debug, Clone)]
pub struct While {
    pub test: Expression,
    pub body: IndentedBlock,
    pub leading_lines: Vec<EmptyLine>,
    pub whitespace_before_test: SimpleWhitespace,
    pub whitespace_after_test: SimpleWhitespace,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(While {
    test,
    body,
    leading_lines,
    whitespace_before_test,
    whitespace_after_test,
});

impl While {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.test.visit_ids(f);
        self.body.visit_ids(f);
    }
}

impl<'a> Codegen<'a> for While {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        for line in &self.leading_lines {
            line.codegen(state);
        }
        state.add_indent();
        state.add_token("while");
        self.whitespace_before_test.codegen(state);
        self.test.codegen(state);
        self.whitespace_after_test.codegen(state);
        state.add_token(":");
        self.body.codegen(state);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for While {
    fn kind(&self) -> &'static str {
        "While"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("test", self.test.node_ref()),
            Field::child("body", NodeRef::IndentedBlock(&self.body)),
            Field::sequence(
                "leading_lines",
                self.leading_lines.iter().map(NodeRef::EmptyLine).collect(),
            ),
            Field::child(
                "whitespace_before_test",
                NodeRef::SimpleWhitespace(&self.whitespace_before_test),
            ),
            Field::child(
                "whitespace_after_test",
                NodeRef::SimpleWhitespace(&self.whitespace_after_test),
            ),
        ]
    }
}

/// The `else` clause of an [`If`].
#[derive(Debug, Clone)]
pub struct Else {
    pub body: IndentedBlock,
    pub leading_lines: Vec<EmptyLine>,
    pub whitespace_before_colon: SimpleWhitespace,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(Else {
    body,
    leading_lines,
    whitespace_before_colon,
});

impl Else {
    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        self.body.visit_ids(f);
    }
}

impl<'a> Codegen<'a> for Else {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        for line in &self.leading_lines {
            line.codegen(state);
        }
        state.add_indent();
        state.add_token("else");
        self.whitespace_before_colon.codegen(state);
        state.add_token(":");
        self.body.codegen(state);
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Else {
    fn kind(&self) -> &'static str {
        "Else"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::child("body", NodeRef::IndentedBlock(&self.body)),
            Field::sequence(
                "leading_lines",
                self.leading_lines.iter().map(NodeRef::EmptyLine).collect(),
            ),
            Field::child(
                "whitespace_before_colon",
                NodeRef::SimpleWhitespace(&self.whitespace_before_colon),
            ),
        ]
    }
}

/// The indented body of a compound statement.
#[derive(Debug, Clone, Default)]
pub struct IndentedBlock {
    /// Sequence of statements belonging to this indented block.
    pub body: Vec<Statement>,
    /// Any optional trailing comment and the newline at the end of the
    /// header line (after the `:`).
    pub header: TrailingWhitespace,
    /// This block's indentation unit relative to its parent. `None` uses the
    /// module's default. Indentation is allowed to vary across a file, just
    /// not ambiguously within one block.
    pub indent: Option<String>,
    /// Trailing comments or lines after the block that are indented at least
    /// to this block's level. Statements own preceding trivia, so trailing
    /// block-level trivia falls to the block itself.
    pub footer: Vec<EmptyLine>,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(IndentedBlock {
    body,
    header,
    indent,
    footer,
});

impl IndentedBlock {
    pub fn new(body: Vec<Statement>) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        for stmt in &mut self.body {
            stmt.visit_ids(f);
        }
    }
}

impl<'a> Codegen<'a> for IndentedBlock {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        self.header.codegen(state);

        let indent = self.indent.as_deref().unwrap_or(state.default_indent);
        state.indent(indent);

        if self.body.is_empty() {
            // An empty block is not valid syntax, so render a `pass` to keep
            // the output parseable after transforms that drain the body.
            state.add_indent();
            state.add_token("pass");
            state.add_token(state.default_newline);
        } else {
            for stmt in &self.body {
                // IndentedBlock adjusts the indentation level; each child
                // statement emits the indentation itself.
                stmt.codegen(state);
            }
        }

        for line in &self.footer {
            line.codegen(state);
        }

        state.dedent();
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for IndentedBlock {
    fn kind(&self) -> &'static str {
        "IndentedBlock"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::sequence("body", self.body.iter().map(Statement::node_ref).collect()),
            Field::child("header", NodeRef::TrailingWhitespace(&self.header)),
            Field::scalar("indent", Scalar::OptStr(self.indent.as_deref())),
            Field::sequence("footer", self.footer.iter().map(NodeRef::EmptyLine).collect()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::expression::Integer;

    fn assign(target: &str, value: &str) -> SmallStatement {
        SmallStatement::Assign(Assign::new(
            Name::new(target),
            Expression::Integer(Integer::new(value)),
        ))
    }

    #[test]
    fn simple_statement_line_codegen() {
        let line = SimpleStatementLine::new(vec![assign("x", "1")]);
        let mut state = CodegenState::default();
        line.codegen(&mut state);
        assert_eq!(state.to_string(), "x = 1\n");
    }

    #[test]
    fn emptied_line_renders_nothing() {
        let line = SimpleStatementLine::new(Vec::new());
        let mut state = CodegenState::default();
        line.codegen(&mut state);
        assert_eq!(state.to_string(), "");
    }

    #[test]
    fn semicolon_separated_statements() {
        let mut first = assign("x", "1");
        first.set_semicolon(Some(Semicolon {
            whitespace_before: SimpleWhitespace::new(""),
            whitespace_after: SimpleWhitespace::new(" "),
        }));
        let line = SimpleStatementLine::new(vec![first, assign("y", "2")]);
        let mut state = CodegenState::default();
        line.codegen(&mut state);
        assert_eq!(state.to_string(), "x = 1; y = 2\n");
    }

    #[test]
    fn empty_block_renders_pass() {
        let stmt = If {
            test: Expression::Name(Name::new("flag")),
            body: IndentedBlock::default(),
            orelse: None,
            leading_lines: Vec::new(),
            whitespace_before_test: SimpleWhitespace::new(" "),
            whitespace_after_test: SimpleWhitespace::new(""),
            node_id: None,
        };
        let mut state = CodegenState::default();
        stmt.codegen(&mut state);
        assert_eq!(state.to_string(), "if flag:\n    pass\n");
    }

    #[test]
    fn if_else_codegen() {
        let stmt = If {
            test: Expression::Name(Name::new("flag")),
            body: IndentedBlock::new(vec![Statement::Simple(SimpleStatementLine::new(vec![
                assign("x", "1"),
            ]))]),
            orelse: Some(Else {
                body: IndentedBlock::new(vec![Statement::Simple(SimpleStatementLine::new(
                    vec![assign("x", "2")],
                ))]),
                leading_lines: Vec::new(),
                whitespace_before_colon: SimpleWhitespace::new(""),
                node_id: None,
            }),
            leading_lines: Vec::new(),
            whitespace_before_test: SimpleWhitespace::new(" "),
            whitespace_after_test: SimpleWhitespace::new(""),
            node_id: None,
        };
        let mut state = CodegenState::default();
        stmt.codegen(&mut state);
        assert_eq!(
            state.to_string(),
            "if flag:\n    x = 1\nelse:\n    x = 2\n"
        );
    }
}
