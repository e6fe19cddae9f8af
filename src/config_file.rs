//! Optional JSON configuration for the built-in modules.
//!
//! The file only parameterises what the built-ins install (key comment, extra
//! packages, extra editor extensions). It never stores a module selection.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Comment embedded in a freshly generated SSH key when none is configured.
pub const DEFAULT_SSH_KEY_COMMENT: &str = "henrik.halvorsen.kvamme@gmail.com";

/// User overrides for built-in modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// `-C` comment for `ssh-keygen`
    pub ssh_key_comment: String,
    /// Homebrew formulae installed after the built-in list
    pub extra_formulae: Vec<String>,
    /// Homebrew casks installed after the built-in list
    pub extra_casks: Vec<String>,
    /// VS Code extensions installed after the built-in list
    pub extra_vscode_extensions: Vec<String>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            ssh_key_comment: DEFAULT_SSH_KEY_COMMENT.to_string(),
            extra_formulae: Vec::new(),
            extra_casks: Vec::new(),
            extra_vscode_extensions: Vec::new(),
        }
    }
}

impl ProvisionConfig {
    /// `$XDG_CONFIG_HOME/henrik-os/config.json`, falling back to
    /// `~/.config/henrik-os/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("henrik-os").join("config.json"))
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// missing the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading default config");
                Self::load_from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Reject values that would turn into malformed commands
    pub fn validate(&self) -> Result<()> {
        if self.ssh_key_comment.trim().is_empty() {
            anyhow::bail!("ssh_key_comment must not be empty");
        }

        let lists = [
            ("extra_formulae", &self.extra_formulae),
            ("extra_casks", &self.extra_casks),
            ("extra_vscode_extensions", &self.extra_vscode_extensions),
        ];
        for (field, names) in lists {
            for name in names {
                if name.trim().is_empty() {
                    anyhow::bail!("{field} contains an empty name");
                }
                if name.contains(char::is_whitespace) {
                    anyhow::bail!("{field} entry {name:?} contains whitespace");
                }
                if name.starts_with('-') {
                    anyhow::bail!("{field} entry {name:?} looks like a flag");
                }
            }
        }

        Ok(())
    }
}
