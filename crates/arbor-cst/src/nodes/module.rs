// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The module root node.

use crate::nodes::codegen::{Codegen, CodegenState, PositionMode};
use crate::nodes::impl_structural_eq;
use crate::nodes::statement::Statement;
use crate::nodes::traits::{CstNode, Field, NodeId, NodeIdGenerator, NodeRef, Scalar};
use crate::nodes::whitespace::EmptyLine;
use arbor_core::CodeRange;
use std::collections::HashMap;

/// The root of a parsed document.
///
/// Carries top-level information inferred from the file so the tree can be
/// printed with the correct global formatting rules. Rendering an unmodified
/// module reproduces the original source byte for byte.
#[derive(Debug, Clone)]
pub struct Module {
    /// The document's statements.
    pub body: Vec<Statement>,
    /// Trivia is normally owned by the following statement, but comments at
    /// the top of a file tend to refer to the document itself, so the module
    /// owns everything before the first statement.
    pub header: Vec<EmptyLine>,
    /// Trivia after the last statement.
    pub footer: Vec<EmptyLine>,
    /// Declared source encoding. Informational; source text is UTF-8.
    pub encoding: String,
    /// The indentation unit used by blocks that carry no explicit indent.
    pub default_indent: String,
    /// The newline sequence used by line terminators that carry no explicit
    /// value.
    pub default_newline: String,
    /// Whether the document ends with a newline.
    pub has_trailing_newline: bool,
    pub node_id: Option<NodeId>,
}

impl_structural_eq!(Module {
    body,
    header,
    footer,
    encoding,
    default_indent,
    default_newline,
    has_trailing_newline,
});

impl Default for Module {
    fn default() -> Self {
        Self {
            body: Vec::new(),
            header: Vec::new(),
            footer: Vec::new(),
            encoding: "utf-8".to_string(),
            default_indent: "    ".to_string(),
            default_newline: "\n".to_string(),
            has_trailing_newline: true,
            node_id: None,
        }
    }
}

impl Module {
    pub fn new(body: Vec<Statement>) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    /// Render the module to source text.
    pub fn code(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.to_string()
    }

    /// Render the module to bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.code().into_bytes()
    }

    /// Render the module, recording the range of every identity-carrying
    /// node in the given position mode.
    pub fn code_with_positions(&self, mode: PositionMode) -> (String, HashMap<NodeId, CodeRange>) {
        let mut state = CodegenState::with_positions(mode);
        self.codegen(&mut state);
        let code = state.to_string();
        (code, state.into_ranges())
    }

    pub(crate) fn visit_ids(&mut self, f: &mut dyn FnMut(&mut Option<NodeId>)) {
        f(&mut self.node_id);
        for stmt in &mut self.body {
            stmt.visit_ids(f);
        }
    }

    /// Assign fresh sequential ids to every identity-carrying node,
    /// pre-order.
    pub(crate) fn renumber(&mut self, ids: &mut NodeIdGenerator) {
        self.visit_ids(&mut |id| *id = Some(ids.next_id()));
    }
}

impl<'a> Codegen<'a> for Module {
    fn codegen_impl(&'a self, state: &mut CodegenState<'a>) {
        state.default_indent = &self.default_indent;
        state.default_newline = &self.default_newline;

        for line in &self.header {
            line.codegen(state);
        }
        for stmt in &self.body {
            stmt.codegen(state);
        }
        for line in &self.footer {
            line.codegen(state);
        }

        if self.has_trailing_newline {
            if state.is_empty() {
                // Nothing in the header, body, or footer; emit a lone newline
                // so a trailing newline is still preserved.
                state.add_token(&self.default_newline);
            }
        } else {
            // Every statement and empty line ends in a newline, so the final
            // fragment of a non-empty document is one; drop it.
            state.retract_trailing_newline();
        }
    }

    fn span_id(&self) -> Option<NodeId> {
        self.node_id
    }
}

impl CstNode for Module {
    fn kind(&self) -> &'static str {
        "Module"
    }

    fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::sequence("body", self.body.iter().map(Statement::node_ref).collect()),
            Field::sequence("header", self.header.iter().map(NodeRef::EmptyLine).collect()),
            Field::sequence("footer", self.footer.iter().map(NodeRef::EmptyLine).collect()),
            Field::scalar("encoding", Scalar::Str(&self.encoding)),
            Field::scalar("default_indent", Scalar::Str(&self.default_indent)),
            Field::scalar("default_newline", Scalar::Str(&self.default_newline)),
            Field::scalar(
                "has_trailing_newline",
                Scalar::Bool(self.has_trailing_newline),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::expression::{Expression, Integer, Name};
    use crate::nodes::statement::{Assign, SimpleStatementLine, SmallStatement};

    fn one_liner() -> Module {
        Module::new(vec![Statement::Simple(SimpleStatementLine::new(vec![
            SmallStatement::Assign(Assign::new(
                Name::new("x"),
                Expression::Integer(Integer::new("1")),
            )),
        ]))])
    }

    #[test]
    fn empty_module_with_trailing_newline() {
        let module = Module::default();
        assert_eq!(module.code(), "\n");
    }

    #[test]
    fn empty_module_without_trailing_newline() {
        let module = Module {
            has_trailing_newline: false,
            ..Default::default()
        };
        assert_eq!(module.code(), "");
    }

    #[test]
    fn trailing_newline_retraction() {
        let mut module = one_liner();
        assert_eq!(module.code(), "x = 1\n");
        module.has_trailing_newline = false;
        assert_eq!(module.code(), "x = 1");
    }

    #[test]
    fn module_installs_its_own_defaults() {
        let mut module = one_liner();
        module.default_newline = "\r\n".to_string();
        assert_eq!(module.code(), "x = 1\r\n");
    }

    #[test]
    fn renumber_assigns_dense_preorder_ids() {
        let mut module = one_liner();
        let mut ids = NodeIdGenerator::new();
        module.renumber(&mut ids);
        assert_eq!(module.node_id, Some(NodeId::new(0)));
        // Module, line, assign, target, value.
        assert_eq!(ids.count(), 5);
    }

    #[test]
    fn deep_clone_clears_identity() {
        let mut module = one_liner();
        module.renumber(&mut NodeIdGenerator::new());
        let clone = module.deep_clone();
        assert_eq!(clone, module);
        assert_eq!(clone.node_id, None);
    }
}
