//! Interactive front end
//!
//! # Module Structure
//! - `state` - [`AppState`]: the install session plus cursor/spinner state
//! - Main module - [`App`] and its event loop
//!
//! The loop drains worker events, polls the keyboard every 50 ms, and
//! redraws. Module work runs on worker threads (see [`crate::executor`]), so
//! the spinner and elapsed time keep moving while a module is in flight.
//!
//! Leaving the loop never abandons a worker: after a cancel or quit the app
//! keeps drawing until the in-flight module has reported back and its thread
//! has been joined.

mod state;

pub use state::AppState;

use crate::error::Result;
use crate::executor::{self, OutputMode, WorkerEvent};
use crate::input::map_key;
use crate::install_state::{Effect, Message};
use crate::process_guard::CancelFlag;
use crate::registry::Registry;
use crate::summary::RunOutcome;
use crate::ui;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main application struct
pub struct App {
    state: AppState,
    /// Cloned into every worker thread
    worker_tx: Sender<WorkerEvent>,
    /// Polled in the main loop
    worker_rx: Receiver<WorkerEvent>,
    /// Thread of the most recently dispatched module
    worker: Option<JoinHandle<()>>,
    cancel: CancelFlag,
}

impl App {
    pub fn new(registry: Arc<Registry>, cancel: CancelFlag) -> Self {
        let (worker_tx, worker_rx) = mpsc::channel();
        Self {
            state: AppState::new(registry),
            worker_tx,
            worker_rx,
            worker: None,
            cancel,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn perform(&mut self, effect: Effect) {
        if let Effect::Dispatch(dispatch) = effect {
            self.join_worker();
            self.worker = executor::dispatch(dispatch, self.worker_tx.clone(), OutputMode::Capture);
        }
    }

    fn join_worker(&mut self) {
        if self.worker.take().is_some_and(|handle| handle.join().is_err()) {
            tracing::error!("module worker thread panicked");
        }
    }

    fn handle_event(&mut self, event: WorkerEvent) {
        let effect = self.state.send(event.into());
        self.perform(effect);
    }

    /// Feed every pending worker event into the session
    fn poll_workers(&mut self) {
        while let Ok(event) = self.worker_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(self.state.session.phase(), key, self.state.cursor);
        let effect = self.state.handle_action(action);
        self.perform(effect);
    }

    /// Drain worker events and turn a tripped cancel flag into a `Cancel`
    /// intent. Returns `true` once the loop should stop.
    pub fn pump(&mut self) -> bool {
        self.poll_workers();
        if self.cancel.is_cancelled() && !self.state.should_quit {
            tracing::warn!(phase = %self.state.session.phase(), "interrupted by signal");
            let effect = self.state.send(Message::Cancel);
            self.perform(effect);
            self.state.should_quit = true;
        }
        self.state.should_quit
    }

    /// Keep drawing until the in-flight module (if any) has reported back,
    /// then join its thread. A second signal still exits the process.
    pub fn wait_for_in_flight<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while let Some(index) = self.state.session.in_flight() {
            let name = self
                .state
                .session
                .plan()
                .get(index)
                .map(|m| m.name().to_string())
                .unwrap_or_default();
            self.state.status_message = Some(format!("Waiting for {name} to finish..."));
            terminal.draw(|f| ui::render(f, &self.state))?;

            match self.worker_rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => {
                    if self.worker.as_ref().is_some_and(JoinHandle::is_finished) {
                        // Workers report before exiting
                        self.poll_workers();
                        if self.state.session.in_flight() == Some(index) {
                            tracing::error!(index, "worker exited without reporting");
                            break;
                        }
                    }
                    self.state.tick();
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.join_worker();
        Ok(())
    }

    /// Snapshot of the run, or `None` if nothing was started
    pub fn outcome(&self) -> Option<RunOutcome> {
        let session = &self.state.session;
        session.has_started().then(|| RunOutcome::from_session(session))
    }

    /// Run the main application loop.
    ///
    /// Returns `None` when the user quit before starting a run.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<Option<RunOutcome>> {
        tracing::info!("starting interactive session");

        while !self.pump() {
            terminal.draw(|f| ui::render(f, &self.state))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            } else {
                self.state.tick();
            }
        }

        self.wait_for_in_flight(terminal)?;
        Ok(self.outcome())
    }
}
