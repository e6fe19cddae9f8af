//! Pre-flight sanity checks for runtime environment
//!
//! Verified before any module runs:
//! - Not running as root (Homebrew refuses to run as root, and files would
//!   land in root's home)
//! - `$HOME` is set
//!
//! A non-macOS host only produces a warning so the tool stays usable for
//! dry runs on other machines.

use crate::modules::shell;
use std::io::Write;

/// Tools a useful run needs up front; later ones get installed by modules.
const EXPECTED_BINARIES: &[&str] = &["curl", "sudo"];

/// Result of environment verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityCheckResult {
    pub is_root: bool,
    pub home_set: bool,
    pub is_macos: bool,
    pub missing_binaries: Vec<String>,
}

impl SanityCheckResult {
    /// Returns true if all blocking checks passed
    pub fn is_ok(&self) -> bool {
        !self.is_root && self.home_set
    }
}

fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Perform all sanity checks and return the result
pub fn verify_environment() -> SanityCheckResult {
    let missing_binaries: Vec<String> = EXPECTED_BINARIES
        .iter()
        .filter(|b| shell::which(b).is_none())
        .map(|b| b.to_string())
        .collect();

    let result = SanityCheckResult {
        is_root: is_running_as_root(),
        home_set: std::env::var_os("HOME").is_some_and(|h| !h.is_empty()),
        is_macos: cfg!(target_os = "macos"),
        missing_binaries,
    };
    tracing::debug!(?result, "pre-flight checks");
    result
}

/// Print blocking problems and warnings to `err`.
pub fn report(result: &SanityCheckResult, err: &mut dyn Write) -> std::io::Result<()> {
    if !result.is_ok() {
        writeln!(err)?;
        writeln!(err, "╔══════════════════════════════════════════════════════════════════╗")?;
        writeln!(err, "║                 henrik-os - Pre-flight Check Failed              ║")?;
        writeln!(err, "╚══════════════════════════════════════════════════════════════════╝")?;
        writeln!(err)?;
    }

    if result.is_root {
        writeln!(err, "❌ ERROR: Do not run as root")?;
        writeln!(err, "   Homebrew refuses to run as root and configs would land in root's home.")?;
        writeln!(err, "   Modules ask for sudo themselves when they need it.")?;
        writeln!(err)?;
    }

    if !result.home_set {
        writeln!(err, "❌ ERROR: HOME is not set")?;
        writeln!(err, "   Config files are written relative to your home directory.")?;
        writeln!(err)?;
    }

    if !result.is_macos {
        writeln!(err, "⚠ WARNING: this host is not macOS; most modules will fail")?;
    }

    for binary in &result.missing_binaries {
        writeln!(err, "⚠ WARNING: {binary} not found on PATH")?;
    }

    Ok(())
}
