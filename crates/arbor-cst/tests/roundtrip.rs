// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Round-trip tests: `parse(code).code() == code` for all valid sources.
//!
//! This is the fundamental invariant of a lossless CST: every byte of
//! whitespace, every comment, and every newline flavor survives a parse and
//! render cycle untouched.

use difference::assert_diff;
use itertools::Itertools;
use arbor_cst::{parse_module, prettify_error};

/// Helper to visualize whitespace differences in test output.
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

/// Helper to perform a round-trip test on source code.
fn assert_roundtrip(input: &str, label: &str) {
    let module = match parse_module(input, None) {
        Ok(module) => module,
        Err(e) => panic!("{}", prettify_error(&e, input, label)),
    };
    let generated = module.code();
    if generated != input {
        let got = visualize(&generated);
        let expected = visualize(input);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

// --- Simple statements ---

#[test]
fn roundtrip_empty_module() {
    assert_roundtrip("", "empty_module");
}

#[test]
fn roundtrip_single_assignment() {
    assert_roundtrip("x = 1\n", "single_assignment");
}

#[test]
fn roundtrip_no_trailing_newline() {
    assert_roundtrip("x = 1", "no_trailing_newline");
}

#[test]
fn roundtrip_multiple_statements() {
    assert_roundtrip("a = 1\nb = 2\nc = a + b\n", "multiple_statements");
}

#[test]
fn roundtrip_pass() {
    assert_roundtrip("pass\n", "pass");
}

#[test]
fn roundtrip_expression_statement() {
    assert_roundtrip("a + b * c\n", "expression_statement");
}

#[test]
fn roundtrip_semicolons() {
    assert_roundtrip("x = 1; y = 2\n", "semicolons");
}

#[test]
fn roundtrip_trailing_semicolon() {
    assert_roundtrip("x = 1;\n", "trailing_semicolon");
}

#[test]
fn roundtrip_semicolon_spacing() {
    assert_roundtrip("x = 1 ;  y = 2 ; z = 3\n", "semicolon_spacing");
}

// --- Spacing oddities ---

#[test]
fn roundtrip_spacious_spaces() {
    assert_roundtrip("x   =    1\ny=2\n", "spacious_spaces");
}

#[test]
fn roundtrip_operator_spacing() {
    assert_roundtrip("r = a+b - c  *   d/ e\n", "operator_spacing");
}

#[test]
fn roundtrip_trailing_whitespace_on_line() {
    assert_roundtrip("x = 1   \ny = 2\n", "trailing_whitespace_on_line");
}

// --- Comments and blank lines ---

#[test]
fn roundtrip_comments() {
    assert_roundtrip(
        "# leading comment\nx = 1  # trailing comment\n# footer comment\n",
        "comments",
    );
}

#[test]
fn roundtrip_comment_only_module() {
    assert_roundtrip("# just a comment\n", "comment_only_module");
}

#[test]
fn roundtrip_comment_without_newline_at_eof() {
    assert_roundtrip("x = 1\n# no newline after this", "comment_without_nl");
}

#[test]
fn roundtrip_blank_lines() {
    assert_roundtrip("\n\nx = 1\n\n\ny = 2\n\n", "blank_lines");
}

#[test]
fn roundtrip_vast_emptiness() {
    assert_roundtrip("\n\n\n\n", "vast_emptiness");
}

#[test]
fn roundtrip_blank_lines_with_whitespace() {
    assert_roundtrip("x = 1\n   \ny = 2\n", "blank_lines_with_whitespace");
}

// --- Blocks and indentation ---

#[test]
fn roundtrip_if_block() {
    assert_roundtrip("if flag:\n    x = 1\n", "if_block");
}

#[test]
fn roundtrip_if_else() {
    assert_roundtrip(
        "if flag:\n    x = 1\nelse:\n    x = 2\n",
        "if_else",
    );
}

#[test]
fn roundtrip_while_block() {
    assert_roundtrip("while n:\n    n = n - 1\n", "while_block");
}

#[test]
fn roundtrip_nested_blocks() {
    assert_roundtrip(
        "if a:\n    if b:\n        x = 1\n    y = 2\nz = 3\n",
        "nested_blocks",
    );
}

#[test]
fn roundtrip_two_space_indent() {
    assert_roundtrip("if a:\n  x = 1\n  if b:\n    y = 2\n", "two_space_indent");
}

#[test]
fn roundtrip_tab_indent() {
    assert_roundtrip("if a:\n\tx = 1\n", "tab_indent");
}

#[test]
fn roundtrip_mixed_indent_units() {
    // First block establishes the default; the second deviates.
    assert_roundtrip(
        "if a:\n  x = 1\nif b:\n      y = 2\n",
        "mixed_indent_units",
    );
}

#[test]
fn roundtrip_block_header_comment() {
    assert_roundtrip("if a:  # why\n    x = 1\n", "block_header_comment");
}

#[test]
fn roundtrip_comment_inside_block() {
    assert_roundtrip(
        "if a:\n    # setup\n    x = 1\n",
        "comment_inside_block",
    );
}

#[test]
fn roundtrip_block_footer_comment() {
    assert_roundtrip(
        "if a:\n    x = 1\n    # block footer\ny = 2\n",
        "block_footer_comment",
    );
}

#[test]
fn roundtrip_dedented_comment_after_block() {
    assert_roundtrip(
        "if a:\n    x = 1\n# belongs to y\ny = 2\n",
        "dedented_comment_after_block",
    );
}

#[test]
fn roundtrip_comment_before_else() {
    assert_roundtrip(
        "if a:\n    x = 1\n# or else\nelse:\n    x = 2\n",
        "comment_before_else",
    );
}

#[test]
fn roundtrip_deeply_indented_comment() {
    assert_roundtrip(
        "if a:\n    x = 1\n        # deeper than the block\n    y = 2\n",
        "deeply_indented_comment",
    );
}

#[test]
fn roundtrip_trailing_block_at_eof() {
    assert_roundtrip("if a:\n    x = 1\n    # last words\n", "trailing_block_at_eof");
}

// --- Newline flavors ---

#[test]
fn roundtrip_crlf() {
    assert_roundtrip("x = 1\r\ny = 2\r\n", "crlf");
}

#[test]
fn roundtrip_cr_only() {
    assert_roundtrip("x = 1\ry = 2\r", "cr_only");
}

#[test]
fn roundtrip_mixed_newlines() {
    assert_roundtrip("x = 1\r\ny = 2\nz = 3\r\n", "mixed_newlines");
}

#[test]
fn roundtrip_crlf_block() {
    assert_roundtrip("if a:\r\n    x = 1\r\n", "crlf_block");
}

// --- Edge cases ---

#[test]
fn roundtrip_bom_is_not_reproduced() {
    // The BOM is stripped before parsing; rendering never re-adds it.
    let module = parse_module("\u{feff}x = 1\n", None).expect("parse error");
    assert_eq!(module.code(), "x = 1\n");
}

#[test]
fn roundtrip_underscore_names() {
    assert_roundtrip("_private = 1\n__x2 = _private\n", "underscore_names");
}

#[test]
fn roundtrip_everything_together() {
    assert_roundtrip(
        "# header\n\nlimit = 10\ncount = 0\n\nwhile count:\n    # loop body\n    count = count - 1; total = total + count\n    if total:\n        pass\n    else:\n        total = limit * 2  # reset\n\n# footer\n",
        "everything_together",
    );
}
