//! Headless (batch) front end
//!
//! Drives an [`InstallSession`] without a terminal UI: the selection is
//! decided up front, module output is streamed to the sink as it happens,
//! and the same summary as the interactive mode is printed at the end.

use crate::error::{ProvisionError, Result};
use crate::executor::{self, OutputMode, WorkerEvent};
use crate::install_state::{Completion, Effect, InstallSession, Message};
use crate::process_guard::CancelFlag;
use crate::registry::Registry;
use crate::summary::{self, RunOutcome};
use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// How often the event loop re-checks the cancel flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which modules a headless run installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every registered module
    All,
    /// Exactly these ids (plus their dependencies)
    Ids(Vec<String>),
}

impl Selection {
    fn into_ids(self, registry: &Registry) -> Vec<String> {
        match self {
            Self::All => registry.ids().map(String::from).collect(),
            Self::Ids(ids) => ids,
        }
    }
}

/// Resolve and run `selection`, writing the transcript to `out`.
///
/// Module failures and cancellation are reported in the returned
/// [`RunOutcome`], as is a resolution error (in which case nothing ran).
///
/// # Errors
///
/// Only I/O errors on `out` and broken session invariants are returned as
/// `Err`.
pub fn run_headless(
    registry: Arc<Registry>,
    selection: Selection,
    out: &mut dyn Write,
    cancel: &CancelFlag,
) -> Result<RunOutcome> {
    let ids = selection.into_ids(&registry);
    tracing::info!(requested = ?ids, "starting headless run");

    let mut session = InstallSession::new(registry);
    let (tx, rx) = mpsc::channel::<WorkerEvent>();

    let mut effect = session.update(Message::Begin(ids))?;
    loop {
        if cancel.is_cancelled() {
            if let Effect::Dispatch(dispatch) = &effect {
                let index = dispatch.index;
                effect = session.update(Message::Cancel)?;
                session.never_started(index);
            }
        }

        match effect {
            Effect::Dispatch(dispatch) => {
                summary::write_module_header(out, dispatch.module.name())?;
                out.flush()?;
                executor::dispatch(dispatch, tx.clone(), OutputMode::Stream);
            }
            Effect::Finished | Effect::Quit => break,
            Effect::None => {}
        }

        let event = loop {
            if cancel.is_cancelled() && session.active_index().is_some() {
                break None;
            }
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => break Some(event),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ProvisionError::general("worker channel closed unexpectedly"));
                }
            }
        };

        effect = match event {
            None => {
                writeln!(out, "\nInterrupted; waiting for the current module to stop")?;
                let effect = session.update(Message::Cancel)?;
                if let Some(completion) = drain_in_flight(&rx, out)? {
                    session.update(Message::Completed(completion))?;
                }
                effect
            }
            Some(WorkerEvent::Output { index, chunk }) => {
                out.write_all(chunk.as_bytes())?;
                session.update(Message::Output { index, chunk })?
            }
            Some(WorkerEvent::Completed(completion)) => {
                summary::write_module_status(out, &completion.outcome, completion.elapsed)?;
                session.update(Message::Completed(completion))?
            }
        };
        out.flush()?;
    }

    let outcome = RunOutcome::from_session(&session);
    out.write_all(outcome.render().as_bytes())?;
    out.flush()?;
    Ok(outcome)
}

/// Echo the cancelled module's remaining output until its worker reports.
fn drain_in_flight(
    rx: &mpsc::Receiver<WorkerEvent>,
    out: &mut dyn Write,
) -> Result<Option<Completion>> {
    while let Ok(event) = rx.recv() {
        match event {
            WorkerEvent::Output { chunk, .. } => out.write_all(chunk.as_bytes())?,
            WorkerEvent::Completed(completion) => {
                summary::write_module_status(out, &completion.outcome, completion.elapsed)?;
                return Ok(Some(completion));
            }
        }
    }
    Ok(None)
}
