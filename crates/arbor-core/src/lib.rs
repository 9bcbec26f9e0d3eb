// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core infrastructure for arbor.
//!
//! This crate provides language-agnostic infrastructure:
//! - Byte spans and line/column positions for source text
//! - Text utilities for offset/position conversions and newline detection

pub mod span;
pub mod text;

pub use span::{CodePosition, CodeRange, Span};
