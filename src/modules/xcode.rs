//! Xcode Command Line Tools.
//!
//! The installer runs as a GUI dialog; completion is detected by polling
//! `xcode-select -p`.

use super::shell;
use crate::module_traits::Module;
use anyhow::{bail, Result};
use std::io::Write;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_secs(5);
const INSTALL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Xcode Command Line Tools, prerequisite for Homebrew.
pub struct Xcode;

impl Module for Xcode {
    fn id(&self) -> &str {
        "xcode"
    }

    fn name(&self) -> &str {
        "Xcode CLI Tools"
    }

    fn description(&self) -> &str {
        "Install Xcode Command Line Tools"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        if shell::probe("xcode-select", &["-p"]) {
            writeln!(out, "  Xcode CLI tools already installed")?;
            return Ok(());
        }

        writeln!(out, "  Installing Xcode Command Line Tools...")?;
        writeln!(out, "  Click 'Install' in the dialog that appears")?;
        // Exits non-zero when an install is already pending; polling below decides.
        shell::run_lenient(out, "xcode-select", &["--install"]);
        if shell::is_dry_run() {
            return Ok(());
        }

        let started = Instant::now();
        while !shell::probe("xcode-select", &["-p"]) {
            if started.elapsed() >= INSTALL_TIMEOUT {
                bail!("timed out after 30m waiting for Xcode CLI tools");
            }
            std::thread::sleep(POLL_INTERVAL);
        }
        writeln!(out, "  Xcode CLI tools installed")?;
        Ok(())
    }
}
