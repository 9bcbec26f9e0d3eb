// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The provider protocol.
//!
//! A provider is a type implementing [`Provider`]: an identity (its
//! `TypeId`), a declared dependency list, and a `compute` pass that records
//! one fact per node into its own slice of the metadata store. Providers may
//! traverse the tree themselves (visitor-style) or derive facts from a
//! single codegen pass; the engine only sees `compute`.
//!
//! [`Registration`] is the type-erased handle used in dependency lists and
//! `resolve` requests; [`Registration::of`] builds one from any provider
//! type.

use crate::metadata::MetadataError;
use crate::nodes::{Module, NodeId};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// A per-node metadata computation.
///
/// Implementations are unit structs; the engine instantiates nothing and
/// calls the associated functions through a [`Registration`].
pub trait Provider: Sized + 'static {
    /// The fact recorded per node.
    type Value: 'static;

    /// The provider's display name, used in error messages and logging.
    fn name() -> &'static str;

    /// Providers whose results this provider reads during `compute`.
    ///
    /// The set is fixed per provider type. Reading a provider not listed
    /// here fails with [`MetadataError::ProviderNotResolved`].
    fn dependencies() -> Vec<Registration> {
        Vec::new()
    }

    /// Compute this provider's facts over `module`.
    ///
    /// Called exactly once per resolution run, after every declared
    /// dependency has completed.
    fn compute(module: &Module, ctx: &mut ComputeCtx<'_, Self>) -> Result<(), MetadataError>;
}

/// One provider's computed facts.
pub(crate) struct ProviderTable {
    pub(crate) name: &'static str,
    pub(crate) values: HashMap<NodeId, Box<dyn Any>>,
}

/// All facts computed so far in one resolution run, keyed by provider
/// identity then node identity.
#[derive(Default)]
pub(crate) struct MetadataStore {
    pub(crate) tables: HashMap<TypeId, ProviderTable>,
}

impl MetadataStore {
    pub(crate) fn table<P: Provider>(&self) -> Result<&ProviderTable, MetadataError> {
        self.tables
            .get(&TypeId::of::<P>())
            .ok_or_else(|| MetadataError::ProviderNotResolved {
                provider: P::name(),
            })
    }
}

/// The context handed to a provider's `compute` pass.
///
/// Writes are scoped to the provider's own identity; reads go through
/// [`ComputeCtx::get`] and are limited to already-completed dependencies.
pub struct ComputeCtx<'run, P: Provider> {
    module: &'run Module,
    done: &'run MetadataStore,
    values: &'run mut HashMap<NodeId, Box<dyn Any>>,
    _provider: PhantomData<P>,
}

impl<'run, P: Provider> ComputeCtx<'run, P> {
    /// The tree being resolved.
    pub fn module(&self) -> &'run Module {
        self.module
    }

    /// Record this provider's fact for a node. A later `set` for the same
    /// node replaces the earlier fact.
    pub fn set(&mut self, node: NodeId, value: P::Value) {
        self.values.insert(node, Box::new(value));
    }

    /// Read a dependency's fact for a node.
    ///
    /// `Ok(None)` when the dependency recorded nothing for this node
    /// (providers may be partial). Fails when `D` is not a completed
    /// dependency of this resolution.
    pub fn get<D: Provider>(&self, node: NodeId) -> Result<Option<&D::Value>, MetadataError> {
        let table = self.done.table::<D>()?;
        Ok(table
            .values
            .get(&node)
            .and_then(|value| value.downcast_ref::<D::Value>()))
    }
}

type ComputeFn =
    fn(&Module, &MetadataStore, &mut HashMap<NodeId, Box<dyn Any>>) -> Result<(), MetadataError>;

fn compute_shim<P: Provider>(
    module: &Module,
    done: &MetadataStore,
    values: &mut HashMap<NodeId, Box<dyn Any>>,
) -> Result<(), MetadataError> {
    let mut ctx = ComputeCtx::<P> {
        module,
        done,
        values,
        _provider: PhantomData,
    };
    P::compute(module, &mut ctx)
}

/// A type-erased handle to a provider, usable in dependency declarations and
/// `resolve` requests.
#[derive(Clone, Copy)]
pub struct Registration {
    name: fn() -> &'static str,
    type_id: fn() -> TypeId,
    dependencies: fn() -> Vec<Registration>,
    compute: ComputeFn,
}

impl Registration {
    /// The registration for provider type `P`.
    pub fn of<P: Provider>() -> Self {
        Self {
            name: P::name,
            type_id: TypeId::of::<P>,
            dependencies: P::dependencies,
            compute: compute_shim::<P>,
        }
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    pub(crate) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub(crate) fn dependencies(&self) -> Vec<Registration> {
        (self.dependencies)()
    }

    pub(crate) fn run(
        &self,
        module: &Module,
        done: &MetadataStore,
    ) -> Result<ProviderTable, MetadataError> {
        let mut values = HashMap::new();
        (self.compute)(module, done, &mut values)?;
        Ok(ProviderTable {
            name: self.name(),
            values,
        })
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registration({})", self.name())
    }
}

impl PartialEq for Registration {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for Registration {}
