// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parser error types.

use arbor_core::Span;
use thiserror::Error;

/// A syntax error, with the byte span of the offending source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("unexpected character {found:?}")]
    UnexpectedChar { found: char, span: Span },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str, span: Span },
    #[error("expected {expected}")]
    Expected { expected: &'static str, span: Span },
    #[error("unexpected keyword `{keyword}`")]
    UnexpectedKeyword { keyword: String, span: Span },
    #[error("inconsistent indentation")]
    BadIndent { span: Span },
    #[error("invalid assignment target")]
    InvalidAssignTarget { span: Span },
}

impl ParserError {
    /// The byte span the error refers to.
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedChar { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::Expected { span, .. }
            | ParserError::UnexpectedKeyword { span, .. }
            | ParserError::BadIndent { span }
            | ParserError::InvalidAssignTarget { span } => *span,
        }
    }
}

/// Result alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
