//! LazyVim configuration tree for Neovim.

use super::assets;
use super::files::{self, Placement};
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// LazyVim config tree under `~/.config/nvim`. Plugins install on first launch.
pub struct Neovim;

impl Neovim {
    pub fn placements(home: &Path) -> Vec<Placement> {
        let nvim_dir = home.join(".config/nvim");
        assets::NVIM
            .iter()
            .map(|(rel, asset)| Placement::new(*asset, nvim_dir.join(rel)))
            .collect()
    }
}

impl Module for Neovim {
    fn id(&self) -> &str {
        "neovim"
    }

    fn name(&self) -> &str {
        "Neovim + LazyVim"
    }

    fn description(&self) -> &str {
        "Configure Neovim with LazyVim"
    }

    fn dependencies(&self) -> &[&str] {
        &["homebrew"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  Neovim + LazyVim configured")?;
        Ok(())
    }
}
