//! Ghostty terminal configuration.

use super::assets;
use super::files::{self, Placement};
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub struct Ghostty;

impl Ghostty {
    pub fn placements(home: &Path) -> Vec<Placement> {
        vec![Placement::new(assets::GHOSTTY, home.join(".config/ghostty/config"))]
    }
}

impl Module for Ghostty {
    fn id(&self) -> &str {
        "ghostty"
    }

    fn name(&self) -> &str {
        "Ghostty"
    }

    fn description(&self) -> &str {
        "Configure Ghostty terminal"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  Ghostty configured")?;
        Ok(())
    }
}
