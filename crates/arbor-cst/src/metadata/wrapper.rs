// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The metadata wrapper: a module plus run-scoped node identity.

use super::provider::Registration;
use super::resolve::{resolve, Resolution};
use super::MetadataError;
use crate::nodes::{Module, NodeIdGenerator};
use crate::visitor::{transform_module, walk_module, TransformError, Transformer, VisitResult, Visitor};
use thiserror::Error;
use tracing::trace;

/// A consumer (visitor or transformer) that reads metadata during its
/// traversal.
///
/// Dependencies are declared statically per consumer type;
/// [`MetadataWrapper::visit`] and [`MetadataWrapper::walk`] resolve them and
/// hand the consumer the [`Resolution`] before traversal starts.
pub trait MetadataDependent {
    /// The providers this consumer reads.
    fn metadata_dependencies() -> Vec<Registration>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Receives the resolved metadata before traversal. The default ignores
    /// it; consumers typically store the (cheaply cloneable) resolution.
    #[allow(unused_variables)]
    fn metadata_resolved(&mut self, resolution: Resolution) {}
}

/// An error from a metadata-driven transform pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VisitError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Owns a module for the duration of metadata work, guaranteeing stable,
/// dense node identity.
///
/// Construction renumbers every identity-carrying node pre-order, so facts
/// recorded by one provider line up with lookups made by another — and with
/// nothing outside this wrapper. Wrapping structurally equal but distinct
/// trees yields independent identities and independent resolutions.
pub struct MetadataWrapper {
    module: Module,
}

impl MetadataWrapper {
    pub fn new(mut module: Module) -> Self {
        let mut ids = NodeIdGenerator::new();
        module.renumber(&mut ids);
        trace!(nodes = ids.count(), "renumbered wrapped module");
        Self { module }
    }

    /// The wrapped module. Metadata lookups are valid for the ids on this
    /// tree.
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn into_module(self) -> Module {
        self.module
    }

    /// Execute the requested providers (and their transitive dependencies)
    /// over the wrapped module.
    pub fn resolve(&self, requested: &[Registration]) -> Result<Resolution, MetadataError> {
        resolve(&self.module, requested)
    }

    /// Resolve a transformer's declared dependencies, hand it the
    /// resolution, and run it over the wrapped module.
    pub fn visit<T>(&self, transformer: &mut T) -> Result<Module, VisitError>
    where
        T: Transformer + MetadataDependent,
    {
        let resolution = self.resolve(&T::metadata_dependencies())?;
        transformer.metadata_resolved(resolution);
        Ok(transform_module(self.module.clone(), transformer)?)
    }

    /// Resolve a visitor's declared dependencies, hand it the resolution,
    /// and walk the wrapped module read-only.
    pub fn walk<V>(&self, visitor: &mut V) -> Result<VisitResult, MetadataError>
    where
        V: Visitor + MetadataDependent,
    {
        let resolution = self.resolve(&V::metadata_dependencies())?;
        visitor.metadata_resolved(resolution);
        Ok(walk_module(visitor, &self.module))
    }
}
