//! Shell completion generation and installation.

use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "henrik-os";

/// Shell named by a `$SHELL` value such as `/opt/homebrew/bin/fish`.
pub fn detect_shell(shell_env: &str) -> Option<Shell> {
    match Path::new(shell_env).file_name()?.to_str()? {
        "fish" => Some(Shell::Fish),
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        _ => None,
    }
}

/// Where `--install` writes the script; `None` for stdout-only shells.
pub fn install_path(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Fish => Some(home.join(".config/fish/completions/henrik-os.fish")),
        Shell::Bash => Some(home.join(".local/share/bash-completion/completions/henrik-os")),
        Shell::Zsh => Some(home.join(".zsh/completions/_henrik-os")),
        _ => None,
    }
}

/// Write the completion script for `shell`.
pub fn generate(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, out);
}

fn write_completion(shell: Shell, path: &Path, err: &mut dyn Write) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut script = Vec::new();
    generate(shell, &mut script);
    fs::write(path, script).with_context(|| format!("writing {}", path.display()))?;
    writeln!(err, "Completion installed to {}", path.display())?;

    if shell == Shell::Zsh {
        let dir = path.parent().unwrap_or(path);
        writeln!(err, "\nEnsure {} is in your fpath. Add this to ~/.zshrc:", dir.display())?;
        writeln!(err, "  fpath=(~/.zsh/completions $fpath)\n  autoload -Uz compinit && compinit")?;
    }
    Ok(())
}

/// Streams used by the `completion` subcommand.
pub struct CompletionIo<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    pub stdin: &'a mut dyn BufRead,
}

/// The `completion` subcommand.
///
/// - shell, no `--install`: print the script
/// - shell and `--install`: write it into the shell's completion directory
/// - `--install` alone: detect the shell from `$SHELL` and confirm first
/// - neither: print usage
pub fn run(
    shell: Option<Shell>,
    install: bool,
    shell_env: &str,
    home: &Path,
    io: CompletionIo<'_>,
) -> Result<()> {
    match (shell, install) {
        (None, false) => {
            let mut cmd = Cli::command();
            if let Some(sub) = cmd.find_subcommand_mut("completion") {
                sub.write_long_help(&mut &mut *io.stdout)?;
            }
            Ok(())
        }
        (Some(shell), false) => {
            generate(shell, io.stdout);
            Ok(())
        }
        (Some(shell), true) => {
            let Some(path) = install_path(shell, home) else {
                bail!("--install is not supported for {shell}; pipe stdout to your profile instead");
            };
            write_completion(shell, &path, io.stderr)
        }
        (None, true) => {
            let Some(shell) = detect_shell(shell_env) else {
                bail!("unsupported shell {shell_env:?}; use: completion [fish|bash|zsh]");
            };
            let Some(path) = install_path(shell, home) else {
                bail!("--install is not supported for {shell}");
            };

            writeln!(io.stderr, "Detected shell: {shell}")?;
            write!(io.stderr, "Install completions to {}? [y/N] ", path.display())?;
            io.stderr.flush()?;

            let mut answer = String::new();
            io.stdin.read_line(&mut answer)?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                writeln!(io.stderr, "Aborted.")?;
                return Ok(());
            }
            write_completion(shell, &path, io.stderr)
        }
    }
}
