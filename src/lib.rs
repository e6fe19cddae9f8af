//! henrik-os library
//!
//! Provisions a macOS development workstation from a catalog of modules
//! with declared dependencies. The core is the module [`registry`], the
//! dependency [`logic::resolver`] and the [`install_state`] machine; the
//! interactive ([`app`]) and [`headless`] front ends both drive the same
//! session.

pub mod app;
pub mod cli;
pub mod completion;
pub mod config_file;
pub mod error;
pub mod executor;
pub mod headless;
pub mod input;
pub mod install_state;
pub mod logging;
pub mod logic;
pub mod module_traits;
pub mod modules;
pub mod process_guard;
pub mod registry;
pub mod sanity;
pub mod summary;
pub mod theme;
pub mod ui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use config_file::ProvisionConfig;
pub use error::ProvisionError;
pub use headless::{run_headless, Selection};
pub use install_state::{
    Completion, Effect, InstallResult, InstallSession, Message, Outcome, Phase, TransitionError,
};
pub use logic::resolver::{resolve, ResolutionPlan, ResolveError};
pub use module_traits::Module;
pub use modules::builtin_registry;
pub use modules::shell::{disable_dry_run, enable_dry_run, is_dry_run};
pub use process_guard::CancelFlag;
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use summary::RunOutcome;
