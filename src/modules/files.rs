//! Filesystem helpers for built-in modules.

use super::assets::Asset;
use super::shell;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The user's home directory from `$HOME`.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("HOME is not set"))
}

/// Expand a leading `~` to `home`.
pub fn expand_home_in(path: &str, home: &Path) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    Ok(expand_home_in(path, &home_dir()?))
}

/// An embedded asset and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub asset: Asset,
    pub dest: PathBuf,
    pub mode: u32,
}

impl Placement {
    pub fn new(asset: Asset, dest: PathBuf) -> Self {
        Self { asset, dest, mode: 0o644 }
    }

    pub fn executable(asset: Asset, dest: PathBuf) -> Self {
        Self { asset, dest, mode: 0o755 }
    }

    pub fn private(asset: Asset, dest: PathBuf) -> Self {
        Self { asset, dest, mode: 0o600 }
    }
}

/// Write `data` to `path`, keeping any previous file as `<path>.bak`.
///
/// Parent directories are created as needed and the file mode is set
/// explicitly.
pub fn backup_and_write(out: &mut dyn Write, path: &Path, data: &[u8], mode: u32) -> Result<()> {
    write_with(out, path, data, mode, shell::is_dry_run())
}

/// Write every placement in order, stopping at the first error.
pub fn place_all(out: &mut dyn Write, placements: &[Placement]) -> Result<()> {
    for p in placements {
        backup_and_write(out, &p.dest, p.asset.contents.as_bytes(), p.mode)
            .with_context(|| format!("installing {}", p.asset.path))?;
    }
    Ok(())
}

/// Create `path` (and parents) and set its mode.
pub fn ensure_dir(out: &mut dyn Write, path: &Path, mode: u32) -> Result<()> {
    if shell::is_dry_run() {
        writeln!(out, "  [dry-run] mkdir {} ({:o})", path.display(), mode)?;
        return Ok(());
    }
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting mode on {}", path.display()))?;
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut bak = path.as_os_str().to_owned();
    bak.push(".bak");
    PathBuf::from(bak)
}

pub(crate) fn write_with(
    out: &mut dyn Write,
    path: &Path,
    data: &[u8],
    mode: u32,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        writeln!(out, "  [dry-run] write {} ({:o})", path.display(), mode)?;
        return Ok(());
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;
    }

    if path.exists() {
        let bak = backup_path(path);
        fs::copy(path, &bak).with_context(|| format!("backing up {}", path.display()))?;
        writeln!(out, "  Backed up {} → {}", path.display(), bak.display())?;
    }

    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting mode on {}", path.display()))?;
    writeln!(out, "  Wrote {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/config");
        let mut out = Vec::new();

        write_with(&mut out, &path, b"hello", 0o644, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("  Wrote "));
        assert!(!text.contains("Backed up"));
    }

    #[test]
    fn test_existing_file_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "old").unwrap();
        let mut out = Vec::new();

        write_with(&mut out, &path, b"new", 0o644, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_to_string(dir.path().join("config.bak")).unwrap(), "old");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Backed up"));
        assert!(text.contains("config.bak"));
    }

    #[test]
    fn test_mode_is_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hook.py");
        let mut out = Vec::new();

        write_with(&mut out, &path, b"#!/usr/bin/env python3\n", 0o755, false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config");
        let mut out = Vec::new();

        write_with(&mut out, &path, b"x", 0o600, true).unwrap();

        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
        assert!(String::from_utf8(out).unwrap().contains("[dry-run] write"));
    }

    #[test]
    fn test_expand_home_in() {
        let home = Path::new("/Users/h");
        assert_eq!(expand_home_in("~/.ssh", home), PathBuf::from("/Users/h/.ssh"));
        assert_eq!(expand_home_in("~", home), PathBuf::from("/Users/h"));
        assert_eq!(expand_home_in("/etc/shells", home), PathBuf::from("/etc/shells"));
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/tmp/.gitconfig")),
            PathBuf::from("/tmp/.gitconfig.bak")
        );
    }
}
