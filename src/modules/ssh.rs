//! ed25519 SSH key, `~/.ssh/config` and keychain registration.

use super::{assets, files, shell};
use crate::config_file::ProvisionConfig;
use crate::module_traits::Module;
use anyhow::{Context, Result};
use std::io::Write;

/// ed25519 key, `~/.ssh/config`, and keychain registration.
pub struct Ssh {
    key_comment: String,
}

impl Ssh {
    pub fn new(config: &ProvisionConfig) -> Self {
        Self {
            key_comment: config.ssh_key_comment.clone(),
        }
    }
}

impl Module for Ssh {
    fn id(&self) -> &str {
        "ssh"
    }

    fn name(&self) -> &str {
        "SSH Key Generation"
    }

    fn description(&self) -> &str {
        "Generate SSH key and configure SSH"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let ssh_dir = files::home_dir()?.join(".ssh");
        files::ensure_dir(out, &ssh_dir, 0o700)?;

        let key_path = ssh_dir.join("id_ed25519");
        let key = key_path.to_string_lossy().into_owned();
        if key_path.exists() {
            writeln!(out, "  SSH key already exists (skipping key generation)")?;
        } else {
            writeln!(out, "  Generating SSH key...")?;
            shell::run(
                out,
                "ssh-keygen",
                &["-t", "ed25519", "-C", self.key_comment.as_str(), "-f", key.as_str(), "-N", ""],
            )
            .context("generating SSH key")?;
        }

        files::backup_and_write(
            out,
            &ssh_dir.join("config"),
            assets::SSH_CONFIG.contents.as_bytes(),
            0o600,
        )?;

        shell::run_lenient(out, "ssh-add", &["--apple-use-keychain", key.as_str()]);
        writeln!(out, "  SSH configured")?;
        Ok(())
    }
}
