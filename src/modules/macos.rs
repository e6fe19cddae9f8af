//! macOS defaults, Caps Lock remapped to Escape, and Touch ID for sudo.

use super::assets;
use super::files::{self, Placement};
use super::shell;
use crate::module_traits::Module;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// `defaults write` arguments: domain, key, type flag, value.
const DEFAULTS: &[[&str; 4]] = &[
    // Keyboard
    ["NSGlobalDomain", "KeyRepeat", "-int", "2"],
    ["NSGlobalDomain", "InitialKeyRepeat", "-int", "15"],
    ["NSGlobalDomain", "ApplePressAndHoldEnabled", "-bool", "false"],
    // Finder
    ["NSGlobalDomain", "AppleShowAllExtensions", "-bool", "true"],
    ["com.apple.finder", "AppleShowAllFiles", "-bool", "true"],
    ["com.apple.finder", "ShowPathbar", "-bool", "true"],
    ["com.apple.finder", "ShowStatusBar", "-bool", "true"],
    // Dock
    ["com.apple.dock", "autohide", "-bool", "true"],
    ["com.apple.dock", "show-recents", "-bool", "false"],
    ["com.apple.dock", "autohide-delay", "-float", "0"],
    ["com.apple.dock", "tilesize", "-int", "48"],
    // No .DS_Store on network and USB volumes
    ["com.apple.desktopservices", "DSDontWriteNetworkStores", "-bool", "true"],
    ["com.apple.desktopservices", "DSDontWriteUSBStores", "-bool", "true"],
];

const CAPSLOCK_MAPPING: &str = r#"{"UserKeyMapping":[{"HIDKeyboardModifierMappingSrc":0x700000039,"HIDKeyboardModifierMappingDst":0x700000029}]}"#;

const TOUCH_ID_SUDO: &str = "grep -q pam_tid.so /etc/pam.d/sudo_local 2>/dev/null || echo 'auth       sufficient     pam_tid.so' > /etc/pam.d/sudo_local";

/// Keyboard, Finder, Dock and screenshot preferences, Caps Lock as Escape,
/// and Touch ID for sudo.
pub struct MacOs;

impl MacOs {
    pub fn placements(home: &Path) -> Vec<Placement> {
        vec![Placement::new(
            assets::CAPSLOCK_PLIST,
            home.join("Library/LaunchAgents/com.henrikkvamme.capslock-escape.plist"),
        )]
    }
}

impl Module for MacOs {
    fn id(&self) -> &str {
        "macos"
    }

    fn name(&self) -> &str {
        "macOS Defaults"
    }

    fn description(&self) -> &str {
        "Configure macOS keyboard, Finder, Dock, and system preferences"
    }

    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let home = files::home_dir()?;

        writeln!(out, "  Configuring macOS defaults...")?;
        for &[domain, key, kind, value] in DEFAULTS {
            shell::run_lenient(out, "defaults", &["write", domain, key, kind, value]);
        }
        let screenshots = home.join("Downloads").to_string_lossy().into_owned();
        shell::run_lenient(
            out,
            "defaults",
            &["write", "com.apple.screencapture", "location", "-string", screenshots.as_str()],
        );

        writeln!(out, "  Mapping Caps Lock to Escape...")?;
        shell::run_lenient(out, "hidutil", &["property", "--set", CAPSLOCK_MAPPING]);
        files::place_all(out, &Self::placements(&home))?;

        writeln!(out, "  Enabling Touch ID for sudo...")?;
        shell::run_lenient(out, "sudo", &["sh", "-c", TOUCH_ID_SUDO]);

        for app in ["Finder", "Dock"] {
            shell::run_lenient(out, "killall", &[app]);
        }

        writeln!(out, "  macOS defaults configured")?;
        Ok(())
    }
}
