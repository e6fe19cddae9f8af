//! External command helpers for built-in modules
//!
//! Mutating commands go through [`run`] or [`run_lenient`], which honour the
//! process-wide dry-run flag. Read-only probes ([`probe`], [`capture`],
//! [`which`]) always execute so that dry runs still report accurate
//! "already installed" decisions.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

static DRY_RUN: AtomicBool = AtomicBool::new(false);

/// Print mutating commands instead of executing them.
pub fn enable_dry_run() {
    DRY_RUN.store(true, Ordering::SeqCst);
}

pub fn disable_dry_run() {
    DRY_RUN.store(false, Ordering::SeqCst);
}

pub fn is_dry_run() -> bool {
    DRY_RUN.load(Ordering::SeqCst)
}

/// Render a command line for logs and dry-run output.
pub fn format_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("'{part}'")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a mutating command, streaming stdout and stderr into `out`.
///
/// # Errors
///
/// Fails if the command cannot be spawned or exits non-zero; the error names
/// the command line and the exit code.
pub fn run(out: &mut dyn Write, program: &str, args: &[&str]) -> Result<()> {
    run_with(out, program, args, is_dry_run())
}

/// Like [`run`], but a failure is written to `out` and logged instead of
/// returned. Returns whether the command succeeded.
pub fn run_lenient(out: &mut dyn Write, program: &str, args: &[&str]) -> bool {
    match run(out, program, args) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(command = %format_command(program, args), error = %err, "non-fatal command failure");
            let _ = writeln!(out, "  {err:#} (non-fatal)");
            false
        }
    }
}

/// Send each line of `pipe` without its terminator. Bytes that are not
/// UTF-8 are replaced rather than ending the stream.
fn forward_lines(pipe: impl Read, tx: &mpsc::Sender<String>) {
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line.ends_with(b"\n") {
                    line.pop();
                    if line.ends_with(b"\r") {
                        line.pop();
                    }
                }
                if tx.send(String::from_utf8_lossy(&line).into_owned()).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::debug!(error = %err, "stopped reading command output");
                break;
            }
        }
    }
}

fn run_with(out: &mut dyn Write, program: &str, args: &[&str], dry_run: bool) -> Result<()> {
    let cmdline = format_command(program, args);
    if dry_run {
        writeln!(out, "  [dry-run] {cmdline}")?;
        return Ok(());
    }
    tracing::debug!(command = %cmdline, "running");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start `{cmdline}`"))?;

    // Both pipes feed one channel so lines keep their arrival order.
    let (tx, rx) = mpsc::channel::<String>();
    let readers: Vec<_> = [
        child.stdout.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
        child.stderr.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
    ]
    .into_iter()
    .flatten()
    .map(|pipe| {
        let tx = tx.clone();
        thread::spawn(move || forward_lines(pipe, &tx))
    })
    .collect();
    drop(tx);

    for line in rx {
        writeln!(out, "{line}")?;
    }
    for handle in readers {
        let _ = handle.join();
    }

    let status = child
        .wait()
        .with_context(|| format!("failed waiting for `{cmdline}`"))?;
    if !status.success() {
        match status.code() {
            Some(code) => bail!("`{cmdline}` exited with code {code}"),
            None => bail!("`{cmdline}` was terminated by a signal"),
        }
    }
    Ok(())
}

/// True if a read-only command exits successfully. Output is discarded.
pub fn probe(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Stdout of a read-only command, or `None` if it failed.
pub fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Locate an executable on `PATH`.
pub fn which(program: &str) -> Option<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| {
            candidate
                .metadata()
                .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
        })
}
