//! Built-in provisioning modules
//!
//! Each module is a flat struct implementing [`Module`](crate::module_traits::Module).
//! [`builtin_registry`] registers all of them in an order that already lists
//! dependencies before their dependents.

pub mod assets;
pub mod files;
pub mod shell;

mod claude;
mod claude_config;
mod fish;
mod ghostty;
mod git;
mod homebrew;
mod macos;
mod neovim;
mod node;
mod ssh;
mod starship;
mod vscode;
mod xcode;

pub use claude::Claude;
pub use claude_config::ClaudeConfig;
pub use fish::Fish;
pub use ghostty::Ghostty;
pub use git::Git;
pub use homebrew::Homebrew;
pub use macos::MacOs;
pub use neovim::Neovim;
pub use node::Node;
pub use ssh::Ssh;
pub use starship::Starship;
pub use vscode::VsCode;
pub use xcode::Xcode;

use crate::config_file::ProvisionConfig;
use crate::registry::{Registry, RegistryBuilder, RegistryError};

/// Build the frozen catalog of built-in modules.
pub fn builtin_registry(config: &ProvisionConfig) -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    builder
        .register(Xcode)?
        .register(Homebrew::new(config))?
        .register(Ssh::new(config))?
        .register(Git)?
        .register(MacOs)?
        .register(Fish)?
        .register(Starship)?
        .register(Ghostty)?
        .register(Neovim)?
        .register(Node)?
        .register(Claude)?
        .register(ClaudeConfig)?
        .register(VsCode::new(config))?;
    builder.build()
}
