// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Accessor metadata: how a parent refers to each of its children.

use super::provider::{ComputeCtx, Provider};
use super::MetadataError;
use crate::nodes::{FieldValue, Module, NodeRef};

/// Records, for every identity-carrying child, the field path by which its
/// parent refers to it: `"f"` for a single-child field `f`, `"f[i]"` for the
/// i-th element of a sequence field `f`. The root has no parent and gets no
/// accessor.
///
/// Implemented purely over [`CstNode::fields`](crate::nodes::CstNode::fields)
/// in one pre-order pass, with no dependencies on other providers.
pub struct AccessorProvider;

impl Provider for AccessorProvider {
    type Value = String;

    fn name() -> &'static str {
        "AccessorProvider"
    }

    fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
        record(NodeRef::Module(module), ctx);
        Ok(())
    }
}

fn record(node: NodeRef<'_>, ctx: &mut ComputeCtx<'_, AccessorProvider>) {
    for field in node.fields() {
        match field.value {
            FieldValue::Child(child) => visit_child(child, field.name.to_string(), ctx),
            FieldValue::OptionalChild(Some(child)) => {
                visit_child(child, field.name.to_string(), ctx)
            }
            FieldValue::Sequence(children) => {
                for (index, child) in children.into_iter().enumerate() {
                    visit_child(child, format!("{}[{}]", field.name, index), ctx);
                }
            }
            FieldValue::OptionalChild(None) | FieldValue::Scalar(_) => {}
        }
    }
}

fn visit_child(child: NodeRef<'_>, accessor: String, ctx: &mut ComputeCtx<'_, AccessorProvider>) {
    if let Some(id) = child.node_id() {
        ctx.set(id, accessor);
    }
    record(child, ctx);
}
