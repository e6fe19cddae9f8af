//! Centralized colors and styles for the TUI
//!
//! All colors live here rather than being hardcoded in the screens.
//!
//! # Usage
//! ```rust
//! use henrik_os::theme::{Colors, Styles, Theme, ModuleStatus};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let failed = Theme::status_style(ModuleStatus::Failed);
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text (descriptions)
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Dim text (hints, pending rows, durations)
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Banner, borders, titles
    pub const PRIMARY: Color = Color::Magenta;

    /// Cursor and emphasis
    pub const SECONDARY: Color = Color::Cyan;

    pub const SUCCESS: Color = Color::Green;

    pub const ERROR: Color = Color::Red;

    pub const WARNING: Color = Color::Yellow;

    /// `(requires ...)` hints next to module names
    pub const DEP_HINT: Color = Color::Blue;
}

// =============================================================================
// STYLES
// =============================================================================

/// Pre-built styles
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Bold title text
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Row under the cursor
    pub fn cursor() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dep_hint() -> Style {
        Style::default().fg(Colors::DEP_HINT)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Display state of one plan entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// Never ran because the run was cancelled
    Skipped,
}

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Spinner frames for the in-flight module
    pub const SPINNER: &'static [&'static str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

    /// Spinner glyph for a tick counter
    pub fn spinner_frame(tick: usize) -> &'static str {
        Self::SPINNER[tick % Self::SPINNER.len()]
    }

    /// Icon for a status; `Running` uses the spinner instead
    pub fn status_icon(status: ModuleStatus) -> &'static str {
        match status {
            ModuleStatus::Pending => "○",
            ModuleStatus::Running => Self::SPINNER[0],
            ModuleStatus::Succeeded => "✓",
            ModuleStatus::Failed => "✗",
            ModuleStatus::Skipped => "–",
        }
    }

    pub fn status_style(status: ModuleStatus) -> Style {
        match status {
            ModuleStatus::Pending | ModuleStatus::Skipped => Styles::text_muted(),
            ModuleStatus::Running => Style::default()
                .fg(Colors::SECONDARY)
                .add_modifier(Modifier::BOLD),
            ModuleStatus::Succeeded => Styles::success(),
            ModuleStatus::Failed => Styles::error(),
        }
    }
}
