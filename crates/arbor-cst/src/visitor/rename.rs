// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A transformer that renames identifiers.

use super::traits::{Transform, Transformer};
use crate::nodes::Name;

/// Renames every [`Name`] matching an identifier, preserving all formatting.
///
/// # Example
///
/// ```
/// use arbor_cst::visitor::RenameTransformer;
/// use arbor_cst::parse_module;
///
/// let module = parse_module("x = 1\ny = x\n", None).expect("parse error");
/// let mut rename = RenameTransformer::new("x", "z");
/// let renamed = module.visit(&mut rename).expect("transform error");
/// assert_eq!(renamed.code(), "z = 1\ny = z\n");
/// assert_eq!(rename.renamed(), 2);
/// ```
#[derive(Debug)]
pub struct RenameTransformer {
    from: String,
    to: String,
    renamed: usize,
}

impl RenameTransformer {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            renamed: 0,
        }
    }

    /// How many names this transformer has renamed so far.
    pub fn renamed(&self) -> usize {
        self.renamed
    }
}

impl Transformer for RenameTransformer {
    fn leave_name(&mut self, _original: &Name, updated: Name) -> Transform<Name> {
        if updated.value == self.from {
            self.renamed += 1;
            Transform::Keep(Name {
                value: self.to.clone(),
                ..updated
            })
        } else {
            Transform::Keep(updated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    #[test]
    fn renames_every_occurrence() {
        let module = parse_module("x = 1\ny = x + x\n", None).expect("parse error");
        let mut rename = RenameTransformer::new("x", "total");
        let renamed = module.visit(&mut rename).expect("transform error");
        assert_eq!(renamed.code(), "total = 1\ny = total + total\n");
        assert_eq!(rename.renamed(), 3);
    }

    #[test]
    fn leaves_other_names_alone() {
        let module = parse_module("x = 1\nxx = x\n", None).expect("parse error");
        let mut rename = RenameTransformer::new("x", "z");
        let renamed = module.visit(&mut rename).expect("transform error");
        assert_eq!(renamed.code(), "z = 1\nxx = z\n");
        assert_eq!(rename.renamed(), 2);
    }
}
