// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Position metadata derived from a single position-tracking render.
//!
//! Neither provider traverses the tree itself: each runs the module through
//! the codegen engine once with position tracking enabled and lifts the
//! recorded ranges into the metadata store, demonstrating the
//! "single-pass-derived" provider style next to the visitor-style accessor
//! and parent providers.

use super::provider::{ComputeCtx, Provider};
use super::MetadataError;
use crate::nodes::{Module, PositionMode};
use arbor_core::CodeRange;

/// Positions as they appear in the rendered source, with leading/trailing
/// trivia attributed to the surrounding context: a statement's range starts
/// at its first token, not at its comments or indentation.
pub struct SyntacticPositionProvider;

impl Provider for SyntacticPositionProvider {
    type Value = CodeRange;

    fn name() -> &'static str {
        "SyntacticPositionProvider"
    }

    fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
        let (_code, ranges) = module.code_with_positions(PositionMode::Syntactic);
        for (id, range) in ranges {
            ctx.set(id, range);
        }
        Ok(())
    }
}

/// Positions covering everything a node emits, its own whitespace and
/// comments included.
pub struct BasicPositionProvider;

impl Provider for BasicPositionProvider {
    type Value = CodeRange;

    fn name() -> &'static str {
        "BasicPositionProvider"
    }

    fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
        let (_code, ranges) = module.code_with_positions(PositionMode::Basic);
        for (id, range) in ranges {
            ctx.set(id, range);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataWrapper, Registration};
    use crate::nodes::{Expression, SmallStatement, Statement};
    use crate::parse_module;

    #[test]
    fn syntactic_positions_locate_identifiers() {
        let module = parse_module("x = 1\ny = x\n", None).expect("parse error");
        let wrapper = MetadataWrapper::new(module);
        let resolution = wrapper
            .resolve(&[Registration::of::<SyntacticPositionProvider>()])
            .expect("resolve error");

        let Statement::Simple(line) = &wrapper.module().body[1] else {
            panic!("expected simple statement line");
        };
        let SmallStatement::Assign(assign) = &line.body[0] else {
            panic!("expected assignment");
        };
        let Expression::Name(name) = &assign.value else {
            panic!("expected name value");
        };
        let range = resolution
            .get::<SyntacticPositionProvider>(name.node_id.expect("name id"))
            .unwrap()
            .expect("range recorded");
        assert_eq!(range.start.line, 2);
        assert_eq!(range.start.column, 4);
        assert_eq!(range.start.byte, 10);
        assert_eq!(range.end.byte, 11);
    }

    #[test]
    fn basic_positions_include_leading_trivia() {
        let source = "# note\nx = 1\n";
        let module = parse_module(source, None).expect("parse error");
        let wrapper = MetadataWrapper::new(module);
        let resolution = wrapper
            .resolve(&[
                Registration::of::<BasicPositionProvider>(),
                Registration::of::<SyntacticPositionProvider>(),
            ])
            .expect("resolve error");

        let root = wrapper.module().node_id.expect("module id");
        let basic = resolution
            .get::<BasicPositionProvider>(root)
            .unwrap()
            .expect("range recorded");
        // Basic: the whole document, header comment included.
        assert_eq!(basic.start.byte, 0);
        assert_eq!(basic.end.byte, source.len() as u64);

        let syntactic = resolution
            .get::<SyntacticPositionProvider>(root)
            .unwrap()
            .expect("range recorded");
        // Syntactic: first content token is `x` on line 2.
        assert_eq!(syntactic.start.line, 2);
        assert_eq!(syntactic.start.byte, 7);
    }

    #[test]
    fn parent_ranges_contain_child_ranges() {
        let module = parse_module("if a:\n    b = a + 1\n", None).expect("parse error");
        let wrapper = MetadataWrapper::new(module);
        let resolution = wrapper
            .resolve(&[Registration::of::<SyntacticPositionProvider>()])
            .expect("resolve error");

        let Statement::Compound(crate::nodes::CompoundStatement::If(if_stmt)) =
            &wrapper.module().body[0]
        else {
            panic!("expected if statement");
        };
        let if_range = resolution
            .get::<SyntacticPositionProvider>(if_stmt.node_id.expect("if id"))
            .unwrap()
            .expect("range recorded");
        let test_id = if_stmt.test.node_ref().node_id().expect("test id");
        let test_range = resolution
            .get::<SyntacticPositionProvider>(test_id)
            .unwrap()
            .expect("range recorded");
        assert!(if_range.contains(test_range));
        assert!(if_range.start.byte <= test_range.start.byte);
        assert!(test_range.end.byte <= if_range.end.byte);
    }
}
