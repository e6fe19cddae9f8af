//! The capability contract every provisioning module implements.
//!
//! A module is an opaque unit of side-effecting work with identity metadata.
//! The orchestration layer never looks past this trait: it reads the
//! metadata to resolve and display, and calls [`Module::install`] to run.
//!
//! # Contract
//!
//! - `id()` is stable and unique across the registry. It is the only key used
//!   for cross-references (dependencies, CLI arguments, manual-step lookup).
//! - `dependencies()` names other module ids that must run first.
//! - `install()` writes human-readable progress to `out` as it happens and
//!   returns `Err` with a descriptive reason on failure.
//!
//! # Invariants
//!
//! - Metadata is constant for the lifetime of the module.
//! - `install()` may be invoked from a worker thread, hence `Send + Sync`.
//! - The orchestrator never re-invokes a failed module; any "already
//!   installed, skip" logic belongs inside `install()`.

use std::io::Write;

/// A named, independently installable unit of environment setup.
pub trait Module: Send + Sync {
    /// Stable identifier (e.g. `"homebrew"`).
    fn id(&self) -> &str;

    /// Display name (e.g. `"Homebrew + Packages"`).
    fn name(&self) -> &str;

    /// One-line description shown in listings.
    fn description(&self) -> &str;

    /// Ids of modules that must be installed before this one.
    fn dependencies(&self) -> &[&str] {
        &[]
    }

    /// Perform the module's side effects, streaming progress into `out`.
    fn install(&self, out: &mut dyn Write) -> anyhow::Result<()>;
}

impl std::fmt::Debug for dyn Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id())
            .field("dependencies", &self.dependencies())
            .finish()
    }
}
