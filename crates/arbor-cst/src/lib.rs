// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A lossless Concrete Syntax Tree (CST) library with a metadata engine.
//!
//! This crate parses a small indentation-based scripting language into a CST
//! that preserves all whitespace and formatting for round-trip code
//! generation, transforms trees functionally, and computes per-node metadata
//! (positions, accessors, parents) through a dependency-resolving provider
//! engine.
//!
//! # Overview
//!
//! - **Parsing**: [`parse_module`] / [`parse_module_with_options`] build a
//!   tree whose rendering reproduces the source byte for byte.
//! - **Code generation**: the [`Codegen`] trait over [`CodegenState`], with
//!   optional position tracking ([`PositionMode`]).
//! - **Traversal**: read-only [`Visitor`]s and pure [`Transformer`]s
//!   (see [`visitor`]).
//! - **Metadata**: [`MetadataWrapper`] resolves [`Provider`]s over a tree
//!   exactly once each, in dependency order (see [`metadata`]).
//!
//! # Quick Start
//!
//! ```
//! use arbor_cst::{parse_module, Codegen, CodegenState};
//!
//! let source = "total = price + tax\n";
//! let module = parse_module(source, None).expect("parse error");
//!
//! // Round-trip: convert back to source.
//! let mut state = CodegenState::default();
//! module.codegen(&mut state);
//! assert_eq!(state.to_string(), source);
//! assert_eq!(module.code(), source);
//! ```
//!
//! # Transforming
//!
//! ```
//! use arbor_cst::{parse_module, RenameTransformer};
//!
//! let module = parse_module("x = 1\ny = x\n", None).expect("parse error");
//! let renamed = module
//!     .visit(&mut RenameTransformer::new("x", "z"))
//!     .expect("transform error");
//! assert_eq!(renamed.code(), "z = 1\ny = z\n");
//! ```
//!
//! # Metadata
//!
//! ```
//! use arbor_cst::metadata::{MetadataWrapper, Registration, SyntacticPositionProvider};
//! use arbor_cst::parse_module;
//!
//! let module = parse_module("x = 1\n", None).expect("parse error");
//! let wrapper = MetadataWrapper::new(module);
//! let resolution = wrapper
//!     .resolve(&[Registration::of::<SyntacticPositionProvider>()])
//!     .expect("resolve error");
//! let root = wrapper.module().node_id.expect("wrapped modules have ids");
//! let range = resolution
//!     .get::<SyntacticPositionProvider>(root)
//!     .expect("provider was resolved")
//!     .expect("root has a range");
//! assert_eq!(range.start.line, 1);
//! ```

pub mod metadata;
pub mod nodes;
pub mod parser;
pub mod visitor;

pub use metadata::{
    AccessorProvider, BasicPositionProvider, MetadataDependent, MetadataError, MetadataWrapper,
    ParentProvider, Provider, Registration, Resolution, SyntacticPositionProvider,
};
pub use nodes::*;
pub use parser::{ParseOptions, ParserError, Result};
pub use visitor::{RenameTransformer, Transform, TransformError, Transformer, VisitResult, Visitor};

use arbor_core::text::{line_start_offset, position_at_offset};

/// Parses a module.
///
/// `encoding` is recorded on the module when given; source text is always
/// UTF-8 (a leading BOM is stripped).
///
/// # Errors
///
/// Returns a [`ParserError`] when the source is not valid syntax.
///
/// # Example
///
/// ```
/// use arbor_cst::parse_module;
///
/// let module = parse_module("x = 1\n", None).expect("parse error");
/// assert_eq!(module.body.len(), 1);
/// ```
pub fn parse_module(module_text: &str, encoding: Option<&str>) -> Result<Module> {
    let options = match encoding {
        Some(encoding) => ParseOptions::new().with_encoding(encoding),
        None => ParseOptions::new(),
    };
    parse_module_with_options(module_text, options)
}

/// Parses a module with explicit [`ParseOptions`].
pub fn parse_module_with_options(
    mut module_text: &str,
    options: ParseOptions,
) -> Result<Module> {
    // Strip UTF-8 BOM
    if let Some(stripped) = module_text.strip_prefix('\u{feff}') {
        module_text = stripped;
    }
    parser::Parser::new(module_text).parse_module(options)
}

/// Parses a single statement.
///
/// # Example
///
/// ```
/// use arbor_cst::parse_statement;
///
/// let stmt = parse_statement("x = 1\n").expect("parse error");
/// ```
pub fn parse_statement(text: &str) -> Result<Statement> {
    let module = parse_module_with_options(text, ParseOptions::new())?;
    let mut body = module.body;
    if body.len() != 1 {
        return Err(ParserError::Expected {
            expected: "exactly one statement",
            span: Span::new(0, text.len() as u64),
        });
    }
    Ok(body.remove(0))
}

/// Parses a single expression.
///
/// # Example
///
/// ```
/// use arbor_cst::parse_expression;
///
/// let expr = parse_expression("1 + 2").expect("parse error");
/// ```
pub fn parse_expression(text: &str) -> Result<Expression> {
    parser::Parser::new(text).parse_expression_entry()
}

/// Formats a parser error into a human-readable string with source context.
///
/// # Example
///
/// ```
/// use arbor_cst::{parse_module, prettify_error};
///
/// let source = "if:\n";
/// if let Err(e) = parse_module(source, None) {
///     let formatted = prettify_error(&e, source, "example.arb");
///     assert!(formatted.contains("example.arb"));
/// }
/// ```
pub fn prettify_error(err: &ParserError, source: &str, label: &str) -> String {
    use annotate_snippets::{Level, Renderer, Snippet};

    let span = err.span();
    let start_pos = position_at_offset(source, span.start as usize);
    let end_pos = position_at_offset(source, span.end as usize);

    let context = 1usize;
    let first_line = (start_pos.line as usize).saturating_sub(context).max(1);
    let start_offset = line_start_offset(source, first_line);
    let end_offset = line_start_offset(source, end_pos.line as usize + context + 1);
    let snippet_source = &source[start_offset..end_offset];

    let start = span.start as usize - start_offset;
    let end = span.end as usize - start_offset;
    let end = if start == end {
        (end + 1).min(end_offset - start_offset + 1)
    } else {
        end
    };
    let annotation = format!("{} ({} -> {})", err, start_pos, end_pos);
    let rendered = Renderer::styled()
        .render(
            Level::Error.title(label).snippet(
                Snippet::source(snippet_source)
                    .line_start(first_line)
                    .fold(false)
                    .annotations(vec![Level::Error.span(start..end).label(&annotation)]),
            ),
        )
        .to_string();
    rendered
}
