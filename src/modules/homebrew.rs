//! Homebrew itself plus the formulae, casks and fonts.
//!
//! Each package is installed on its own so one bad package does not stop
//! the rest.

use super::shell;
use crate::config_file::ProvisionConfig;
use crate::module_traits::Module;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

const FORMULAE: &[&str] = &[
    "fish", "neovim", "starship", "git", "gh", "eza", "zoxide", "fzf", "fd", "bat", "btop",
    "direnv", "fnm", "thefuck", "yazi", "tmux", "jq", "ripgrep", "imagemagick", "ffmpeg", "deno",
    "bun",
];

const CASKS: &[&str] = &[
    "ghostty",
    "visual-studio-code",
    "raycast",
    "alt-tab",
    "slack",
    "discord",
    "figma",
    "google-chrome",
    "zen-browser",
    "obsidian",
    "spotify",
    "orbstack",
    "claude",
];

const FONTS: &[&str] = &["font-jetbrains-mono-nerd-font", "font-symbols-only-nerd-font"];

const INSTALL_SCRIPT: &str =
    "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)";

/// Fallback locations for a brew that is installed but not yet on PATH.
const BREW_LOCATIONS: &[&str] = &["/opt/homebrew/bin/brew", "/usr/local/bin/brew"];

/// Homebrew itself plus the standard formulae, casks and fonts.
///
/// Individual package failures are reported and skipped.
pub struct Homebrew {
    formulae: Vec<String>,
    casks: Vec<String>,
}

impl Homebrew {
    pub fn new(config: &ProvisionConfig) -> Self {
        Self {
            formulae: merged(FORMULAE, &config.extra_formulae),
            casks: merged(CASKS, &config.extra_casks),
        }
    }

    pub fn formulae(&self) -> &[String] {
        &self.formulae
    }

    pub fn casks(&self) -> &[String] {
        &self.casks
    }
}

fn merged(builtin: &[&str], extra: &[String]) -> Vec<String> {
    let mut all: Vec<String> = builtin.iter().map(|s| s.to_string()).collect();
    for name in extra {
        if !all.contains(name) {
            all.push(name.clone());
        }
    }
    all
}

fn brew_program() -> Option<String> {
    shell::which("brew")
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| {
            BREW_LOCATIONS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| p.to_string())
        })
}

fn install_args(pkg: &str, cask: bool) -> Vec<&str> {
    let mut args = vec!["install"];
    if cask {
        args.push("--cask");
    }
    args.push(pkg);
    args
}

fn is_installed(brew: &str, pkg: &str, cask: bool) -> bool {
    let mut args = vec!["list"];
    if cask {
        args.push("--cask");
    }
    args.push(pkg);
    shell::capture(brew, &args)
        .map(|listing| !listing.trim().is_empty())
        .unwrap_or(false)
}

fn brew_install<S: AsRef<str>>(
    out: &mut dyn Write,
    brew: &str,
    label: &str,
    packages: &[S],
    cask: bool,
) -> Result<()> {
    writeln!(out, "  Installing {label}...")?;
    for pkg in packages {
        let pkg = pkg.as_ref();
        if is_installed(brew, pkg, cask) {
            writeln!(out, "    {pkg:<25} already installed")?;
            continue;
        }
        match shell::run(out, brew, &install_args(pkg, cask)) {
            Ok(()) => writeln!(out, "    {pkg:<25} installed")?,
            Err(err) => {
                tracing::warn!(package = pkg, error = %err, "brew install failed");
                writeln!(out, "    {pkg:<25} failed (non-fatal)")?;
            }
        }
    }
    Ok(())
}

impl Module for Homebrew {
    fn id(&self) -> &str {
        "homebrew"
    }

    fn name(&self) -> &str {
        "Homebrew + Packages"
    }

    fn description(&self) -> &str {
        "Install Homebrew, formulae, casks, and fonts"
    }

    fn dependencies(&self) -> &[&str] {
        &["xcode"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let brew = match brew_program() {
            Some(brew) => {
                writeln!(out, "  Homebrew already installed")?;
                brew
            }
            None => {
                writeln!(out, "  Installing Homebrew...")?;
                shell::run(out, "/bin/bash", &["-c", INSTALL_SCRIPT])
                    .context("installing homebrew")?;
                brew_program().unwrap_or_else(|| BREW_LOCATIONS[0].to_string())
            }
        };

        brew_install(out, &brew, "formulae", self.formulae.as_slice(), false)?;
        brew_install(out, &brew, "casks", self.casks.as_slice(), true)?;
        brew_install(out, &brew, "fonts", FONTS, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extras_are_appended_once() {
        let config = ProvisionConfig {
            extra_formulae: vec!["htop".into(), "git".into()],
            extra_casks: vec!["firefox".into()],
            ..ProvisionConfig::default()
        };
        let brew = Homebrew::new(&config);

        assert_eq!(brew.formulae().len(), FORMULAE.len() + 1);
        assert_eq!(brew.formulae().last().map(String::as_str), Some("htop"));
        assert_eq!(brew.casks().last().map(String::as_str), Some("firefox"));
    }

    #[test]
    fn test_install_args() {
        assert_eq!(install_args("fish", false), vec!["install", "fish"]);
        assert_eq!(install_args("ghostty", true), vec!["install", "--cask", "ghostty"]);
    }

    #[test]
    fn test_depends_on_xcode() {
        let brew = Homebrew::new(&ProvisionConfig::default());
        assert_eq!(brew.dependencies(), &["xcode"]);
    }
}
