//! Key handling for the interactive front end
//!
//! Keys are mapped to an [`Action`] based on the current [`Phase`]. Actions
//! either move the cursor (pure UI state) or carry a [`Message`] for the
//! install session.

use crate::install_state::{Message, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    CursorFirst,
    CursorLast,
    /// Forward an intent to the session
    Send(Message),
    /// Leave the finished screen
    Quit,
    /// Key has no meaning here
    Ignore,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a key event to an action. `cursor` is the highlighted registry row.
pub fn map_key(phase: Phase, key: KeyEvent, cursor: usize) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    match phase {
        Phase::Selecting => {
            if is_ctrl_c(&key) {
                return Action::Send(Message::Cancel);
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
                KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
                KeyCode::Home | KeyCode::Char('g') => Action::CursorFirst,
                KeyCode::End | KeyCode::Char('G') => Action::CursorLast,
                KeyCode::Char(' ') => Action::Send(Message::Toggle(cursor)),
                KeyCode::Char('a') => Action::Send(Message::ToggleAll),
                KeyCode::Char('n') => Action::Send(Message::SelectNone),
                KeyCode::Enter => Action::Send(Message::Start),
                KeyCode::Char('q') | KeyCode::Esc => Action::Send(Message::Cancel),
                _ => Action::Ignore,
            }
        }
        // Modules cannot be interrupted mid-flight; Ctrl-C only stops the
        // rest of the plan from being dispatched.
        Phase::Running if is_ctrl_c(&key) => Action::Send(Message::Cancel),
        Phase::Running => Action::Ignore,
        Phase::Finished => match key.code {
            KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc => Action::Quit,
            _ if is_ctrl_c(&key) => Action::Quit,
            _ => Action::Ignore,
        },
    }
}

/// Keybinding hints shown in the nav bar for a phase
pub fn nav_hints(phase: Phase) -> &'static [(&'static str, &'static str)] {
    match phase {
        Phase::Selecting => &[
            ("↑↓/jk", "move"),
            ("space", "toggle"),
            ("a", "all"),
            ("n", "none"),
            ("enter", "start"),
            ("q", "quit"),
        ],
        Phase::Running => &[("ctrl-c", "stop after current module")],
        Phase::Finished => &[("q/enter", "exit")],
    }
}
