//! Node.js LTS through fnm, with corepack enabled.

use super::shell;
use crate::module_traits::Module;
use anyhow::{Context, Result};
use std::io::Write;

/// Node.js LTS through fnm, with corepack for pnpm and yarn.
pub struct Node;

fn has_lts(fnm_list: &str) -> bool {
    fnm_list.contains("lts-latest")
}

impl Module for Node {
    fn id(&self) -> &str {
        "node"
    }

    fn name(&self) -> &str {
        "Node.js + Package Managers"
    }

    fn description(&self) -> &str {
        "Install Node.js LTS via fnm, enable corepack"
    }

    fn dependencies(&self) -> &[&str] {
        &["homebrew"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let listing = shell::capture("fnm", &["list"]).unwrap_or_default();
        if has_lts(&listing) {
            writeln!(out, "  Node LTS already installed")?;
        } else {
            writeln!(out, "  Installing Node.js LTS via fnm...")?;
            shell::run(out, "fnm", &["install", "--lts"]).context("installing Node.js")?;
            shell::run_lenient(out, "fnm", &["default", "lts-latest"]);
            writeln!(out, "  Node.js LTS installed")?;
        }

        writeln!(out, "  Enabling corepack...")?;
        shell::run_lenient(out, "corepack", &["enable"]);
        writeln!(out, "  corepack enabled (pnpm + yarn available)")?;
        writeln!(out, "  Bun + Deno already installed via Homebrew")?;
        Ok(())
    }
}
