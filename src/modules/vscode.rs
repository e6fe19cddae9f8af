//! VS Code: the `code` CLI, extensions, settings and the Neovim bridge config.

use super::assets;
use super::files::{self, Placement};
use super::shell;
use crate::config_file::ProvisionConfig;
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

const EXTENSIONS: &[&str] = &[
    "daltonmenezes.aura-theme",
    "esbenp.prettier-vscode",
    "dbaeumer.vscode-eslint",
    "eamodio.gitlens",
    "github.copilot",
    "github.copilot-chat",
    "bradlc.vscode-tailwindcss",
    "christian-kohler.path-intellisense",
    "anthropic.claude-code",
    "asvetliakov.vscode-neovim",
    "VSpaceCode.whichkey",
    "catppuccin.catppuccin-vsc-icons",
];

const CODE_CLI: &str = "/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code";

/// `code` CLI on PATH, extensions, settings and the vscode-neovim init file.
pub struct VsCode {
    extensions: Vec<String>,
}

impl VsCode {
    pub fn new(config: &ProvisionConfig) -> Self {
        let mut extensions: Vec<String> = EXTENSIONS.iter().map(|s| s.to_string()).collect();
        for ext in &config.extra_vscode_extensions {
            if !extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                extensions.push(ext.clone());
            }
        }
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn placements(home: &Path) -> Vec<Placement> {
        vec![
            Placement::new(
                assets::VSCODE_SETTINGS,
                home.join("Library/Application Support/Code/User/settings.json"),
            ),
            Placement::new(assets::VSCODE_NVIM_INIT, home.join(".config/nvim-vscode/init.vim")),
        ]
    }
}

/// Extension ids are case-insensitive; `code --list-extensions` prints one per line.
fn is_listed(installed: &str, ext: &str) -> bool {
    installed.lines().any(|line| line.trim().eq_ignore_ascii_case(ext))
}

impl Module for VsCode {
    fn id(&self) -> &str {
        "vscode"
    }

    fn name(&self) -> &str {
        "VS Code"
    }

    fn description(&self) -> &str {
        "Configure VS Code settings, extensions, and Neovim integration"
    }

    fn dependencies(&self) -> &[&str] {
        &["homebrew"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        if shell::which("code").is_none() {
            if Path::new(CODE_CLI).exists() {
                shell::run_lenient(out, "sudo", &["ln", "-sf", CODE_CLI, "/usr/local/bin/code"]);
                writeln!(out, "  Symlinked VS Code CLI")?;
            } else {
                writeln!(out, "  VS Code not found - skipping CLI setup")?;
            }
        }

        writeln!(out, "  Installing VS Code extensions...")?;
        let installed = shell::capture("code", &["--list-extensions"]).unwrap_or_default();
        for ext in &self.extensions {
            if is_listed(&installed, ext) {
                writeln!(out, "    {ext:<45} already installed")?;
                continue;
            }
            match shell::run(out, "code", &["--install-extension", ext.as_str(), "--force"]) {
                Ok(()) => writeln!(out, "    {ext:<45} installed")?,
                Err(err) => {
                    tracing::warn!(extension = %ext, error = %err, "extension install failed");
                    writeln!(out, "    {ext:<45} failed (non-fatal)")?;
                }
            }
        }

        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  VS Code configured")?;
        Ok(())
    }
}
