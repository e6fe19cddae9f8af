//! Claude Code CLI, installed globally through npm.

use super::shell;
use crate::module_traits::Module;
use anyhow::{Context, Result};
use std::io::Write;

pub struct Claude;

impl Module for Claude {
    fn id(&self) -> &str {
        "claude"
    }

    fn name(&self) -> &str {
        "Claude Code"
    }

    fn description(&self) -> &str {
        "Install Claude Code CLI"
    }

    fn dependencies(&self) -> &[&str] {
        &["node"]
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        if shell::which("claude").is_some() {
            writeln!(out, "  Claude Code already installed")?;
            return Ok(());
        }

        writeln!(out, "  Installing Claude Code...")?;
        shell::run(out, "npm", &["install", "-g", "@anthropic-ai/claude-code"])
            .context("installing Claude Code")?;
        writeln!(out, "  Claude Code installed")?;
        Ok(())
    }
}
