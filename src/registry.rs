//! Module Registry
//!
//! The catalog of every module this binary knows about, in registration order.
//!
//! # Design Principles
//!
//! - **Built once**: modules are added through a [`RegistryBuilder`] during
//!   single-threaded startup. [`RegistryBuilder::build`] consumes the builder
//!   and yields an immutable [`Registry`], so registration after the freeze
//!   point cannot compile.
//! - **No global state**: the registry is an explicit value, shared as
//!   `Arc<Registry>` with the resolver, the session and worker threads.
//! - **Fail fast**: duplicate ids and dangling dependency ids are rejected at
//!   startup instead of surfacing mid-run.
//!
//! Registration order is the canonical fallback ordering whenever relative
//! order is otherwise unconstrained.

use crate::module_traits::Module;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building the registry.
///
/// Both are programming errors in the module catalog, surfaced at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two modules share an id
    #[error("module id registered twice: {0}")]
    Conflict(String),

    /// A module declares a dependency nobody registered
    #[error("module {module} depends on unregistered module {dependency}")]
    UnknownDependency { module: String, dependency: String },
}

impl From<RegistryError> for crate::error::ProvisionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Conflict(id) => Self::RegistrationConflict(id),
            RegistryError::UnknownDependency { module, dependency } => {
                Self::UnknownDependency { module, dependency }
            }
        }
    }
}

/// Append-only collector used during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<Arc<dyn Module>>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module to the catalog.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a module with the same id is already registered
    pub fn register(&mut self, module: impl Module + 'static) -> Result<&mut Self, RegistryError> {
        self.register_arc(Arc::new(module))
    }

    /// Append an already shared module.
    pub fn register_arc(&mut self, module: Arc<dyn Module>) -> Result<&mut Self, RegistryError> {
        let id = module.id().to_string();
        if self.index.contains_key(&id) {
            return Err(RegistryError::Conflict(id));
        }
        self.index.insert(id, self.modules.len());
        self.modules.push(module);
        Ok(self)
    }

    /// Freeze the catalog.
    ///
    /// # Errors
    ///
    /// - `UnknownDependency` if any declared dependency id is not registered
    pub fn build(self) -> Result<Registry, RegistryError> {
        for module in &self.modules {
            for dep in module.dependencies() {
                if !self.index.contains_key(*dep) {
                    return Err(RegistryError::UnknownDependency {
                        module: module.id().to_string(),
                        dependency: (*dep).to_string(),
                    });
                }
            }
        }

        tracing::debug!(modules = self.modules.len(), "registry frozen");
        Ok(Registry {
            modules: self.modules,
            index: self.index,
        })
    }
}

/// Immutable module catalog.
///
/// Needs no synchronization for concurrent reads.
pub struct Registry {
    modules: Vec<Arc<dyn Module>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// All modules in registration order.
    pub fn all(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Look up a module by id.
    pub fn by_id(&self, id: &str) -> Option<&Arc<dyn Module>> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    /// Registration position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Module ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
