//! Starship prompt configuration.

use super::assets;
use super::files::{self, Placement};
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub struct Starship;

impl Starship {
    pub fn placements(home: &Path) -> Vec<Placement> {
        vec![Placement::new(assets::STARSHIP, home.join(".config/starship.toml"))]
    }
}

impl Module for Starship {
    fn id(&self) -> &str {
        "starship"
    }

    fn name(&self) -> &str {
        "Starship Prompt"
    }

    fn description(&self) -> &str {
        "Configure Starship prompt"
    }

    fn dependencies(&self) -> &[&str] {
        &["homebrew"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  Starship configured")?;
        Ok(())
    }
}
