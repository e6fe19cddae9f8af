//! Application state for the interactive front end
//!
//! Wraps the [`InstallSession`] with the bits of state that only exist for
//! rendering: the cursor, the spinner and a one-line status message.

use crate::input::Action;
use crate::install_state::{Effect, InstallSession, Message, Phase, TransitionError};
use crate::registry::Registry;
use crate::theme::ModuleStatus;
use std::sync::Arc;

/// Main application state
pub struct AppState {
    /// The install run; only mutated through [`AppState::send`]
    pub session: InstallSession,
    /// Highlighted registry row while selecting
    pub cursor: usize,
    /// Spinner tick counter
    pub spinner_frame: usize,
    /// Feedback for the last rejected intent
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            session: InstallSession::new(registry),
            cursor: 0,
            spinner_frame: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Apply a key action and return the effect the app must perform.
    pub fn handle_action(&mut self, action: Action) -> Effect {
        let last = self.session.registry().len().saturating_sub(1);
        match action {
            Action::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorDown => self.cursor = (self.cursor + 1).min(last),
            Action::CursorFirst => self.cursor = 0,
            Action::CursorLast => self.cursor = last,
            Action::Send(msg) => return self.send(msg),
            Action::Quit => {
                self.should_quit = true;
                return Effect::Quit;
            }
            Action::Ignore => {}
        }
        Effect::None
    }

    /// Forward a message to the session.
    ///
    /// Rejected intents never reach the caller; they become a status line.
    pub fn send(&mut self, msg: Message) -> Effect {
        let kind = msg.kind();
        match self.session.update(msg) {
            Ok(Effect::Quit) => {
                self.should_quit = true;
                Effect::Quit
            }
            Ok(effect) => {
                self.status_message = None;
                effect
            }
            Err(TransitionError::NothingSelected) => {
                self.status_message =
                    Some("Nothing selected: press space to pick modules or q to quit".into());
                Effect::None
            }
            Err(err) => {
                tracing::debug!(intent = kind, error = %err, "ignored intent");
                self.status_message = Some(err.to_string());
                Effect::None
            }
        }
    }

    /// Advance the spinner and let the session observe the tick.
    pub fn tick(&mut self) {
        if self.session.in_flight().is_some() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            let _ = self.session.update(Message::Tick);
        }
    }

    /// Display status of the plan entry at `index`.
    pub fn module_status(&self, index: usize) -> ModuleStatus {
        if let Some(result) = self.session.result(index) {
            return if result.outcome.is_success() {
                ModuleStatus::Succeeded
            } else {
                ModuleStatus::Failed
            };
        }
        if self.session.in_flight() == Some(index) {
            ModuleStatus::Running
        } else if self.session.phase() == Phase::Finished {
            ModuleStatus::Skipped
        } else {
            ModuleStatus::Pending
        }
    }
}
