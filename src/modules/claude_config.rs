//! Claude Code configuration: CLAUDE.md, settings, MCP servers, statusline
//! and hooks under `~/.claude`.

use super::assets;
use super::files::{self, Placement};
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Claude Code user config: instructions, settings, MCP servers, statusline
/// and hooks. Hooks are installed executable.
pub struct ClaudeConfig;

impl ClaudeConfig {
    pub fn placements(home: &Path) -> Vec<Placement> {
        let claude_dir = home.join(".claude");
        let hooks_dir = claude_dir.join("hooks");

        let config = assets::CLAUDE_FILES
            .iter()
            .map(|(rel, asset)| Placement::new(*asset, claude_dir.join(rel)));
        let hooks = assets::CLAUDE_HOOKS
            .iter()
            .map(|(rel, asset)| Placement::executable(*asset, hooks_dir.join(rel)));
        config.chain(hooks).collect()
    }
}

impl Module for ClaudeConfig {
    fn id(&self) -> &str {
        "claude-config"
    }

    fn name(&self) -> &str {
        "Claude Code Config"
    }

    fn description(&self) -> &str {
        "Sync Claude Code config (CLAUDE.md, settings, hooks, MCP, statusline)"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        files::place_all(out, &Self::placements(&files::home_dir()?))?;
        writeln!(out, "  Claude Code config synced")?;
        Ok(())
    }
}
