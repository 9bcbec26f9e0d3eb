// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Dependency-graph resolution and execution.
//!
//! Resolution runs in two phases. First the requested providers' dependency
//! graphs are walked depth-first with the classic three-color scheme — a
//! provider is Pending (unvisited), Running (its dependency subtree is being
//! walked), or Done — producing a reverse-topological execution order and
//! rejecting cycles before anything runs. Then each provider in the order is
//! executed exactly once, reading its dependencies' completed tables and
//! writing its own.

use super::provider::{MetadataStore, Provider, Registration};
use super::MetadataError;
use crate::nodes::{Module, NodeId};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// A provider's state during the dependency walk. Absence from the mark map
/// is the Pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Running,
    Done,
}

fn visit(
    registration: &Registration,
    marks: &mut HashMap<TypeId, Mark>,
    trail: &mut Vec<&'static str>,
    order: &mut Vec<Registration>,
) -> Result<(), MetadataError> {
    let id = registration.type_id();
    match marks.get(&id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Running) => {
            // Re-entered a provider whose dependency subtree is still being
            // walked: the trail from its first occurrence is the cycle.
            let name = registration.name();
            let start = trail.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<&'static str> = trail[start..].to_vec();
            cycle.push(name);
            return Err(MetadataError::CircularDependency { cycle });
        }
        None => {}
    }
    marks.insert(id, Mark::Running);
    trail.push(registration.name());
    for dependency in registration.dependencies() {
        visit(&dependency, marks, trail, order)?;
    }
    trail.pop();
    marks.insert(id, Mark::Done);
    order.push(*registration);
    Ok(())
}

/// The execution order for a requested provider set: every transitively
/// required provider exactly once, dependencies before dependents.
fn execution_order(requested: &[Registration]) -> Result<Vec<Registration>, MetadataError> {
    let mut marks = HashMap::new();
    let mut trail = Vec::new();
    let mut order = Vec::new();
    for registration in requested {
        visit(registration, &mut marks, &mut trail, &mut order)?;
    }
    Ok(order)
}

/// Execute the requested providers (and their transitive dependencies) over
/// `module`.
///
/// The whole graph is validated before any provider runs: a cycle error
/// means no traversal was executed.
pub(crate) fn resolve(
    module: &Module,
    requested: &[Registration],
) -> Result<Resolution, MetadataError> {
    let order = execution_order(requested)?;
    debug!(providers = order.len(), "resolving metadata providers");
    let mut store = MetadataStore::default();
    for registration in &order {
        trace!(provider = registration.name(), "running metadata provider");
        let table = registration.run(module, &store)?;
        store.tables.insert(registration.type_id(), table);
    }
    Ok(Resolution {
        inner: Rc::new(store),
    })
}

/// The outcome of one resolution run.
///
/// Lookups are keyed by provider type and node identity. Cloning is cheap;
/// all clones share the run's store, which is dropped with the last clone.
#[derive(Clone)]
pub struct Resolution {
    inner: Rc<MetadataStore>,
}

impl Resolution {
    /// The fact provider `P` recorded for `node`.
    ///
    /// `Ok(None)` when the provider recorded nothing for this node
    /// (providers may be partial). Fails when `P` was not part of this
    /// resolution.
    pub fn get<P: Provider>(&self, node: NodeId) -> Result<Option<&P::Value>, MetadataError> {
        let table = self.inner.table::<P>()?;
        Ok(table
            .values
            .get(&node)
            .and_then(|value| value.downcast_ref::<P::Value>()))
    }

    /// Like [`Resolution::get`], substituting `default` for an absent fact.
    pub fn get_or<'r, P: Provider>(
        &'r self,
        node: NodeId,
        default: &'r P::Value,
    ) -> Result<&'r P::Value, MetadataError> {
        Ok(self.get::<P>(node)?.unwrap_or(default))
    }

    /// The names of the providers resolved in this run.
    pub fn providers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.tables.values().map(|table| table.name)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("providers", &self.providers().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::provider::ComputeCtx;
    use super::*;
    use crate::parse_module;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Base;
    impl Provider for Base {
        type Value = u32;
        fn name() -> &'static str {
            "Base"
        }
        fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            if let Some(id) = module.node_id {
                ctx.set(id, 1);
            }
            Ok(())
        }
    }

    struct UsesBaseA;
    impl Provider for UsesBaseA {
        type Value = u32;
        fn name() -> &'static str {
            "UsesBaseA"
        }
        fn dependencies() -> Vec<Registration> {
            vec![Registration::of::<Base>()]
        }
        fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            if let Some(id) = module.node_id {
                let base = ctx.get::<Base>(id)?.copied().unwrap_or(0);
                ctx.set(id, base + 10);
            }
            Ok(())
        }
    }

    // A provider chain reserved for the single-execution test: nothing else
    // resolves `Counted`, so its run counter is only touched there.
    static COUNTED_RUNS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;
    impl Provider for Counted {
        type Value = u32;
        fn name() -> &'static str {
            "Counted"
        }
        fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            COUNTED_RUNS.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = module.node_id {
                ctx.set(id, 1);
            }
            Ok(())
        }
    }

    struct UsesCountedA;
    impl Provider for UsesCountedA {
        type Value = u32;
        fn name() -> &'static str {
            "UsesCountedA"
        }
        fn dependencies() -> Vec<Registration> {
            vec![Registration::of::<Counted>()]
        }
        fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            if let Some(id) = module.node_id {
                let base = ctx.get::<Counted>(id)?.copied().unwrap_or(0);
                ctx.set(id, base + 10);
            }
            Ok(())
        }
    }

    struct UsesCountedB;
    impl Provider for UsesCountedB {
        type Value = u32;
        fn name() -> &'static str {
            "UsesCountedB"
        }
        fn dependencies() -> Vec<Registration> {
            vec![Registration::of::<Counted>()]
        }
        fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            if let Some(id) = module.node_id {
                let base = ctx.get::<Counted>(id)?.copied().unwrap_or(0);
                ctx.set(id, base + 20);
            }
            Ok(())
        }
    }

    struct CycleA;
    struct CycleB;
    impl Provider for CycleA {
        type Value = ();
        fn name() -> &'static str {
            "CycleA"
        }
        fn dependencies() -> Vec<Registration> {
            vec![Registration::of::<CycleB>()]
        }
        fn compute(_: &Module, _: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            panic!("a cyclic provider must never execute");
        }
    }
    impl Provider for CycleB {
        type Value = ();
        fn name() -> &'static str {
            "CycleB"
        }
        fn dependencies() -> Vec<Registration> {
            vec![Registration::of::<CycleA>()]
        }
        fn compute(_: &Module, _: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError> {
            panic!("a cyclic provider must never execute");
        }
    }

    fn wrapped() -> crate::metadata::MetadataWrapper {
        let module = parse_module("x = 1\n", None).expect("parse error");
        crate::metadata::MetadataWrapper::new(module)
    }

    #[test]
    fn shared_dependency_executes_once() {
        let wrapper = wrapped();
        let before = COUNTED_RUNS.load(Ordering::SeqCst);
        let resolution = wrapper
            .resolve(&[
                Registration::of::<UsesCountedA>(),
                Registration::of::<UsesCountedB>(),
            ])
            .expect("resolve error");
        assert_eq!(COUNTED_RUNS.load(Ordering::SeqCst) - before, 1);

        let root = wrapper.module().node_id.expect("module id");
        assert_eq!(resolution.get::<UsesCountedA>(root).unwrap(), Some(&11));
        assert_eq!(resolution.get::<UsesCountedB>(root).unwrap(), Some(&21));
        // The shared dependency itself is resolved and readable.
        assert_eq!(resolution.get::<Counted>(root).unwrap(), Some(&1));
    }

    #[test]
    fn cycle_is_detected_before_execution() {
        let wrapper = wrapped();
        let err = wrapper
            .resolve(&[Registration::of::<CycleA>()])
            .unwrap_err();
        let MetadataError::CircularDependency { cycle } = err else {
            panic!("expected a circular-dependency error");
        };
        assert_eq!(cycle, ["CycleA", "CycleB", "CycleA"]);
    }

    #[test]
    fn unresolved_provider_lookup_fails() {
        let wrapper = wrapped();
        let resolution = wrapper
            .resolve(&[Registration::of::<Base>()])
            .expect("resolve error");
        let root = wrapper.module().node_id.expect("module id");
        let err = resolution.get::<UsesBaseA>(root).unwrap_err();
        assert_eq!(
            err,
            MetadataError::ProviderNotResolved {
                provider: "UsesBaseA"
            }
        );
    }

    #[test]
    fn absent_fact_yields_default() {
        let wrapper = wrapped();
        let resolution = wrapper
            .resolve(&[Registration::of::<Base>()])
            .expect("resolve error");
        // Base records a fact only for the module root.
        let missing = NodeId::new(9999);
        assert_eq!(resolution.get::<Base>(missing).unwrap(), None);
        assert_eq!(resolution.get_or::<Base>(missing, &42).unwrap(), &42);
    }

    #[test]
    fn independent_runs_share_nothing() {
        let first = wrapped();
        let second = wrapped();
        let r1 = first
            .resolve(&[Registration::of::<Base>()])
            .expect("resolve error");
        let r2 = second
            .resolve(&[Registration::of::<Base>()])
            .expect("resolve error");
        let root1 = first.module().node_id.expect("module id");
        let root2 = second.module().node_id.expect("module id");
        assert_eq!(r1.get::<Base>(root1).unwrap(), Some(&1));
        assert_eq!(r2.get::<Base>(root2).unwrap(), Some(&1));
        drop(r1);
        // Dropping one run's resolution does not disturb the other.
        assert_eq!(r2.get::<Base>(root2).unwrap(), Some(&1));
    }
}
