//! Global git configuration and ignore file.

use super::assets;
use super::files::{self, Placement};
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Global git settings and ignore file.
pub struct Git;

impl Git {
    pub fn placements(home: &Path) -> Vec<Placement> {
        vec![
            Placement::new(assets::GITCONFIG, home.join(".gitconfig")),
            Placement::new(assets::GITIGNORE_GLOBAL, home.join(".gitignore_global")),
        ]
    }
}

impl Module for Git {
    fn id(&self) -> &str {
        "git"
    }

    fn name(&self) -> &str {
        "Git Config"
    }

    fn description(&self) -> &str {
        "Configure Git global settings"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  Git configured")?;
        Ok(())
    }
}
