//! Fish as the login shell, with its config, functions and Oh My Fish.

use super::assets;
use super::files::{self, Placement};
use super::shell;
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

const DEFAULT_FISH_PATH: &str = "/opt/homebrew/bin/fish";

const OMF_INSTALL: &str = "curl -sL https://raw.githubusercontent.com/oh-my-fish/oh-my-fish/master/bin/install | fish /dev/stdin --noninteractive";

/// Fish as the login shell, its config and functions, and Oh My Fish.
pub struct Fish;

impl Fish {
    pub fn placements(home: &Path) -> Vec<Placement> {
        let config_dir = home.join(".config/fish");
        let functions_dir = config_dir.join("functions");

        std::iter::once(Placement::new(assets::FISH_CONFIG, config_dir.join("config.fish")))
            .chain(
                assets::FISH_FUNCTIONS
                    .iter()
                    .map(|(name, asset)| Placement::new(*asset, functions_dir.join(name))),
            )
            .collect()
    }
}

fn listed_in_shells(shells: &str, fish_path: &str) -> bool {
    shells.lines().any(|line| line.trim() == fish_path)
}

impl Module for Fish {
    fn id(&self) -> &str {
        "fish"
    }

    fn name(&self) -> &str {
        "Fish Shell"
    }

    fn description(&self) -> &str {
        "Configure Fish shell, functions, and Oh My Fish"
    }

    fn dependencies(&self) -> &[&str] {
        &["homebrew"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let home = files::home_dir()?;
        let fish_path = shell::which("fish")
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FISH_PATH.to_string());

        let shells = std::fs::read_to_string("/etc/shells").unwrap_or_default();
        if !listed_in_shells(&shells, &fish_path) {
            writeln!(out, "  Adding fish to /etc/shells...")?;
            let append = format!("echo '{fish_path}' >> /etc/shells");
            shell::run_lenient(out, "sudo", &["sh", "-c", append.as_str()]);
        }

        if std::env::var("SHELL").ok().as_deref() != Some(fish_path.as_str()) {
            writeln!(out, "  Setting fish as default shell...")?;
            shell::run_lenient(out, "chsh", &["-s", fish_path.as_str()]);
        }
        writeln!(out, "  Fish is default shell")?;

        let legacy_aliases = home.join(".config/fish/functions/aliases.fish");
        if legacy_aliases.exists() && !shell::is_dry_run() {
            let _ = std::fs::remove_file(&legacy_aliases);
        }

        files::place_all(out, &Self::placements(&home))?;

        if home.join(".local/share/omf").exists() {
            writeln!(out, "  Oh My Fish already installed")?;
        } else {
            writeln!(out, "  Installing Oh My Fish...")?;
            shell::run_lenient(out, "fish", &["-c", OMF_INSTALL]);
        }
        shell::run_lenient(out, "fish", &["-c", "omf install git"]);

        writeln!(out, "  Fish shell configured")?;
        Ok(())
    }
}
