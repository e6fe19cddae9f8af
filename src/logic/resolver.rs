//! Dependency Resolver
//!
//! Turns a set of requested module ids into an execution-ordered
//! [`ResolutionPlan`] containing their full transitive dependency closure.
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no side effects; only reads the frozen registry
//! - **All-or-nothing**: the first unknown id or dependency cycle aborts
//!   resolution and no partial plan is returned
//! - **Deterministic**: the plan follows registration order, so resolving the
//!   same request twice yields the same plan
//!
//! # Algorithm
//!
//! 1. Closure: post-order walk from each requested id. An id is marked
//!    `Visiting` while its dependencies are expanded and `Needed` afterwards.
//!    Meeting a `Visiting` id again means a cycle.
//! 2. Ordering: walk the registry in registration order and emit each needed
//!    module after its (needed) dependencies. When registration order already
//!    lists dependencies first, this is exactly "registry order filtered to the
//!    needed set"; when it does not, dependencies are still hoisted ahead of
//!    their dependents.

use crate::module_traits::Module;
use crate::registry::Registry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Resolution failures. Both abort the whole run before anything executes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A requested or declared id has no registry entry
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// The ids form a cycle; the first and last entries are the same id
    #[error("cyclic dependency: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),
}

impl From<ResolveError> for crate::error::ProvisionError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnknownModule(id) => Self::UnknownModule(id),
            ResolveError::CyclicDependency(cycle) => Self::CyclicDependency(cycle),
        }
    }
}

/// Ordered, deduplicated list of modules, safe to execute top-to-bottom.
#[derive(Clone, Default)]
pub struct ResolutionPlan {
    modules: Vec<Arc<dyn Module>>,
}

impl ResolutionPlan {
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    pub fn ids(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.id()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<dyn Module>> {
        self.modules.get(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.iter().any(|m| m.id() == id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for ResolutionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Needed,
}

/// Resolve `requested` ids into an ordered plan.
///
/// # Errors
///
/// - `UnknownModule` naming the first id with no registry entry
/// - `CyclicDependency` naming the cycle, e.g. `["a", "b", "a"]`
///
/// An empty request yields an empty plan.
pub fn resolve<S: AsRef<str>>(
    registry: &Registry,
    requested: &[S],
) -> Result<ResolutionPlan, ResolveError> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();

    for id in requested {
        let module = registry
            .by_id(id.as_ref())
            .ok_or_else(|| ResolveError::UnknownModule(id.as_ref().to_string()))?;
        mark_needed(registry, module.id(), &mut marks, &mut path)?;
    }

    let mut emitted: HashSet<&str> = HashSet::with_capacity(marks.len());
    let mut modules = Vec::with_capacity(marks.len());
    for module in registry.all() {
        if marks.get(module.id()) == Some(&Mark::Needed) {
            emit(registry, module, &mut emitted, &mut modules);
        }
    }

    tracing::info!(requested = requested.len(), planned = modules.len(), "resolved plan");
    Ok(ResolutionPlan { modules })
}

fn mark_needed<'r>(
    registry: &'r Registry,
    id: &str,
    marks: &mut HashMap<&'r str, Mark>,
    path: &mut Vec<&'r str>,
) -> Result<(), ResolveError> {
    let module = registry
        .by_id(id)
        .ok_or_else(|| ResolveError::UnknownModule(id.to_string()))?;
    let id = module.id();

    match marks.get(id) {
        Some(Mark::Needed) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|p| *p == id).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            return Err(ResolveError::CyclicDependency(cycle));
        }
        None => {}
    }

    marks.insert(id, Mark::Visiting);
    path.push(id);
    for dep in module.dependencies() {
        mark_needed(registry, dep, marks, path)?;
    }
    path.pop();
    marks.insert(id, Mark::Needed);
    Ok(())
}

// Closure is already known acyclic here, so the recursion terminates.
fn emit<'r>(
    registry: &'r Registry,
    module: &'r Arc<dyn Module>,
    emitted: &mut HashSet<&'r str>,
    out: &mut Vec<Arc<dyn Module>>,
) {
    if !emitted.insert(module.id()) {
        return;
    }
    let mut deps: Vec<&Arc<dyn Module>> = module
        .dependencies()
        .iter()
        .filter_map(|dep| registry.by_id(dep))
        .collect();
    deps.sort_by_key(|dep| registry.position(dep.id()));
    for dep in deps {
        emit(registry, dep, emitted, out);
    }
    out.push(Arc::clone(module));
}
