//! Run outcome and transcript formatting shared by both front ends.

use crate::error::ProvisionError;
use crate::install_state::{serialize_millis, InstallResult, InstallSession, Outcome};
use crate::logic::postinstall;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Final, serializable view of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub results: Vec<InstallResult>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub failed: Vec<String>,
    pub manual_steps: Vec<String>,
    pub cancelled: bool,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn from_session(session: &InstallSession) -> Self {
        let results: Vec<InstallResult> = session.results().into_iter().cloned().collect();
        let ran: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        Self {
            manual_steps: postinstall::manual_steps(&ran)
                .into_iter()
                .map(String::from)
                .collect(),
            failed: session.failed_names(),
            elapsed: session.elapsed(),
            cancelled: session.is_cancelled(),
            error: session.resolution_error().map(ToString::to_string),
            results,
        }
    }

    /// True when nothing failed, nothing was cancelled and resolution worked
    pub fn success(&self) -> bool {
        self.error.is_none() && !self.cancelled && self.failed.is_empty()
    }

    /// Failed modules as errors, with their reasons, in plan order
    pub fn failures(&self) -> Vec<ProvisionError> {
        self.results
            .iter()
            .filter_map(|r| {
                r.outcome.reason().map(|reason| ProvisionError::ModuleInstall {
                    module: r.name.clone(),
                    reason: reason.to_string(),
                })
            })
            .collect()
    }

    /// Process exit status: 2 for resolution errors, 1 for failures or
    /// cancellation, otherwise 0.
    pub fn exit_code(&self) -> u8 {
        if self.error.is_some() {
            2
        } else if self.success() {
            0
        } else {
            1
        }
    }

    /// Write the outcome as pretty JSON.
    pub fn write_report(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "wrote run report");
        Ok(())
    }

    /// Trailing summary block printed after a run.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(err) = &self.error {
            out.push_str(&format!("\nError: {err}\n"));
            return out;
        }
        out.push_str(&format!("\nCompleted in {}\n", format_duration(self.elapsed)));
        if self.cancelled {
            out.push_str("Cancelled before all modules ran\n");
        }
        if !self.failed.is_empty() {
            out.push_str(&format!("Failed: {}\n", self.failed.join(", ")));
        }
        out.push('\n');
        out.push_str(&postinstall::render_steps(&self.manual_steps));
        out
    }
}

/// Header line printed before a module runs in headless mode.
pub fn write_module_header(out: &mut dyn Write, name: &str) -> std::io::Result<()> {
    writeln!(out, "\n══ {name} ══")
}

/// Status line printed after a module completes in headless mode.
pub fn write_module_status(
    out: &mut dyn Write,
    outcome: &Outcome,
    elapsed: Duration,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Succeeded => writeln!(out, "  ✓ Done ({})", format_duration(elapsed)),
        Outcome::Failed(reason) => {
            writeln!(out, "  ✗ Failed: {reason} ({})", format_duration(elapsed))
        }
    }
}

/// Human-readable duration: `Nms`, `Ns`, or `NmSs`.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        format!("{}ms", d.as_millis())
    } else if d < Duration::from_secs(60) {
        format!("{}s", d.as_secs())
    } else {
        let secs = d.as_secs();
        format!("{}m{}s", secs / 60, secs % 60)
    }
}
