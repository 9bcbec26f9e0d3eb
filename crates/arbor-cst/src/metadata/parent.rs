// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parent metadata: each node's nearest identity-carrying ancestor.

use super::provider::{ComputeCtx, Provider};
use super::MetadataError;
use crate::nodes::{FieldValue, Module, NodeId, NodeRef};

/// Records, for every identity-carrying node except the root, the id of its
/// nearest identity-carrying ancestor. Trees carry no parent back-references
/// by construction, so ancestry is reconstructed here once per resolution.
pub struct ParentProvider;

impl Provider for ParentProvider {
    type Value = NodeId;

    fn name() -> &'static str {
        "ParentProvider"
    }

    fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
        record(NodeRef::Module(module), None, ctx);
        Ok(())
    }
}

fn record(node: NodeRef<'_>, parent: Option<NodeId>, ctx: &mut ComputeCtx<'_, ParentProvider>) {
    let own_id = node.node_id();
    if let (Some(id), Some(parent_id)) = (own_id, parent) {
        ctx.set(id, parent_id);
    }
    let next_parent = own_id.or(parent);
    for field in node.fields() {
        match field.value {
            FieldValue::Child(child) => record(child, next_parent, ctx),
            FieldValue::OptionalChild(Some(child)) => record(child, next_parent, ctx),
            FieldValue::Sequence(children) => {
                for child in children {
                    record(child, next_parent, ctx);
                }
            }
            FieldValue::OptionalChild(None) | FieldValue::Scalar(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataWrapper, Registration};
    use crate::nodes::{SmallStatement, Statement};
    use crate::parse_module;

    #[test]
    fn parents_chain_to_the_root() {
        let module = parse_module("x = 1\n", None).expect("parse error");
        let wrapper = MetadataWrapper::new(module);
        let resolution = wrapper
            .resolve(&[Registration::of::<ParentProvider>()])
            .expect("resolve error");

        let module = wrapper.module();
        let root = module.node_id.expect("module id");
        assert_eq!(resolution.get::<ParentProvider>(root).unwrap(), None);

        let Statement::Simple(line) = &module.body[0] else {
            panic!("expected simple statement line");
        };
        let line_id = line.node_id.expect("line id");
        assert_eq!(
            resolution.get::<ParentProvider>(line_id).unwrap(),
            Some(&root)
        );

        let SmallStatement::Assign(assign) = &line.body[0] else {
            panic!("expected assignment");
        };
        let assign_id = assign.node_id.expect("assign id");
        assert_eq!(
            resolution.get::<ParentProvider>(assign_id).unwrap(),
            Some(&line_id)
        );
        assert_eq!(
            resolution
                .get::<ParentProvider>(assign.target.node_id.expect("target id"))
                .unwrap(),
            Some(&assign_id)
        );
    }
}
