//! Install Session State Machine
//!
//! This module is the single source of truth for an install run. Both front
//! ends (interactive and headless) drive it with the same messages and only
//! read its observable state; neither mutates it directly.
//!
//! # Design Principles
//!
//! - **One transition function**: [`InstallSession::update`] consumes a
//!   [`Message`] and returns the [`Effect`] the caller must perform (usually
//!   dispatching the next module onto a worker thread).
//! - **Sequential**: at most one module is in flight; module `i + 1` is never
//!   dispatched before the completion of module `i` has been processed.
//! - **Best effort**: a failed module is recorded and the run continues.
//!   Only cancellation ends a run early.
//! - **Cooperative cancel**: a cancelled run stops dispatching, but the
//!   module already in flight still reports back and its result is kept.
//! - **Fail fast on intents**: intents that make no sense in the current
//!   phase return a [`TransitionError`] and leave the state untouched.
//!
//! # Phase Flow
//!
//! ```text
//! Selecting ──Start/Begin──▶ Running ──last completion──▶ Finished
//!     │            │                      │
//!     │            └─resolution error─────┤
//!     └──────────Cancel──────────────────▶┘◀──Cancel──┘
//! ```

use crate::logic::resolver::{resolve, ResolutionPlan, ResolveError};
use crate::module_traits::Module;
use crate::registry::Registry;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum::Display;
use thiserror::Error;

/// Orchestrator phase; governs which intents are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Phase {
    /// Front end gathers which modules to run
    Selecting,
    /// Executing the resolved plan, one module at a time
    Running,
    /// All modules attempted, cancelled, or resolution failed (terminal)
    Finished,
}

/// Result of one module's install operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Outcome {
    Succeeded,
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed(reason) => Some(reason),
        }
    }
}

/// Produced exactly once per plan entry, in plan order, never overwritten.
#[derive(Debug, Clone, Serialize)]
pub struct InstallResult {
    pub id: String,
    pub name: String,
    pub outcome: Outcome,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub log: String,
}

pub(crate) fn serialize_millis<S: serde::Serializer>(
    d: &Duration,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Delivered atomically when a dispatched module finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub index: usize,
    pub outcome: Outcome,
    pub elapsed: Duration,
    /// Everything the module wrote to its sink
    pub log: String,
}

/// Intents from front ends and events from workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Flip selection of the registry entry at this index
    Toggle(usize),
    /// Select none if everything is selected, otherwise select everything
    ToggleAll,
    SelectAll,
    SelectNone,
    /// Resolve the current selection and begin running
    Start,
    /// Resolve an explicit id list and begin running (headless entry)
    Begin(Vec<String>),
    /// Stop initiating further work
    Cancel,
    /// Periodic UI tick
    Tick,
    /// Streamed output of the in-flight module
    Output { index: usize, chunk: String },
    Completed(Completion),
}

impl Message {
    /// Short name used in transition errors and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Toggle(_) => "Toggle",
            Self::ToggleAll => "ToggleAll",
            Self::SelectAll => "SelectAll",
            Self::SelectNone => "SelectNone",
            Self::Start => "Start",
            Self::Begin(_) => "Begin",
            Self::Cancel => "Cancel",
            Self::Tick => "Tick",
            Self::Output { .. } => "Output",
            Self::Completed(_) => "Completed",
        }
    }
}

/// Work the caller must carry out after a transition.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Run this module on a worker and feed its completion back
    Dispatch(Dispatch),
    /// The run reached `Finished`; the summary is available
    Finished,
    /// Leave without running anything
    Quit,
}

/// A module to execute at a plan position.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub index: usize,
    pub module: Arc<dyn Module>,
}

/// Errors returned for intents that do not fit the current state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The intent is not accepted in this phase
    #[error("{intent} is not valid while {phase}")]
    InvalidIntent { phase: Phase, intent: &'static str },

    /// Start requested with an empty selection
    #[error("no modules selected")]
    NothingSelected,

    /// Toggle index outside the registry
    #[error("selection index {index} out of range ({len} modules)")]
    SelectionOutOfRange { index: usize, len: usize },

    /// A completion arrived for a module that is not in flight
    #[error("completion for module #{got} while {expected:?} is in flight")]
    UnexpectedCompletion { expected: Option<usize>, got: usize },
}

impl From<TransitionError> for crate::error::ProvisionError {
    fn from(err: TransitionError) -> Self {
        Self::Transition(err.to_string())
    }
}

/// State of one install run.
///
/// Created in `Selecting` with every registry entry selected; discarded when
/// the run ends. Nothing is persisted.
pub struct InstallSession {
    registry: Arc<Registry>,
    phase: Phase,
    selected: Vec<bool>,
    plan: ResolutionPlan,
    active: Option<usize>,
    /// Module that was in flight when the run was cancelled
    draining: Option<usize>,
    results: Vec<Option<InstallResult>>,
    log: Vec<String>,
    live_output: String,
    started: Option<Instant>,
    elapsed: Duration,
    error: Option<ResolveError>,
    cancelled: bool,
}

impl InstallSession {
    pub fn new(registry: Arc<Registry>) -> Self {
        let selected = vec![true; registry.len()];
        Self {
            registry,
            phase: Phase::Selecting,
            selected,
            plan: ResolutionPlan::default(),
            active: None,
            draining: None,
            results: Vec::new(),
            log: Vec::new(),
            live_output: String::new(),
            started: None,
            elapsed: Duration::ZERO,
            error: None,
            cancelled: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Selected ids in registration order
    pub fn selected_ids(&self) -> Vec<String> {
        self.registry
            .ids()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.to_string())
            .collect()
    }

    /// The resolved plan (empty until the run starts)
    pub fn plan(&self) -> &ResolutionPlan {
        &self.plan
    }

    /// Plan index of the module currently in flight
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Module whose completion is still outstanding, including one left
    /// running by a cancel
    pub fn in_flight(&self) -> Option<usize> {
        self.active.or(self.draining)
    }

    /// A dispatch returned by the last transition was dropped instead of
    /// performed, so no completion will arrive for it.
    pub fn never_started(&mut self, index: usize) {
        if self.draining == Some(index) {
            self.draining = None;
        }
    }

    /// Result slot for a plan index (empty until that module completes)
    pub fn result(&self, index: usize) -> Option<&InstallResult> {
        self.results.get(index).and_then(Option::as_ref)
    }

    /// Results produced so far, in plan order
    pub fn results(&self) -> Vec<&InstallResult> {
        self.results.iter().flatten().collect()
    }

    /// Captured output of completed modules, in completion order
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Output the in-flight module has streamed so far
    pub fn live_output(&self) -> &str {
        &self.live_output
    }

    /// Wall time since the run started (frozen once finished)
    pub fn elapsed(&self) -> Duration {
        match (self.phase, self.started) {
            (Phase::Running, Some(started)) => started.elapsed(),
            _ => self.elapsed,
        }
    }

    /// The resolution error, if the run never got going
    pub fn resolution_error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether a resolve-and-begin was attempted (successfully or not)
    pub fn has_started(&self) -> bool {
        self.started.is_some()
    }

    pub fn succeeded(&self) -> usize {
        self.results().iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results().iter().filter(|r| !r.outcome.is_success()).count()
    }

    /// Display names of failed modules, in plan order
    pub fn failed_names(&self) -> Vec<String> {
        self.results()
            .iter()
            .filter(|r| !r.outcome.is_success())
            .map(|r| r.name.clone())
            .collect()
    }

    /// Apply one message.
    ///
    /// # Errors
    ///
    /// - `InvalidIntent` if the message does not apply to the current phase
    /// - `NothingSelected` if `Start` is sent with an empty selection
    /// - `SelectionOutOfRange` for a toggle past the end of the registry
    /// - `UnexpectedCompletion` for a completion of a module not in flight
    pub fn update(&mut self, msg: Message) -> Result<Effect, TransitionError> {
        match (self.phase, msg) {
            (Phase::Selecting, Message::Toggle(index)) => {
                let len = self.selected.len();
                let slot = self
                    .selected
                    .get_mut(index)
                    .ok_or(TransitionError::SelectionOutOfRange { index, len })?;
                *slot = !*slot;
                Ok(Effect::None)
            }
            (Phase::Selecting, Message::ToggleAll) => {
                let all = self.selected.iter().all(|s| *s);
                self.selected.fill(!all);
                Ok(Effect::None)
            }
            (Phase::Selecting, Message::SelectAll) => {
                self.selected.fill(true);
                Ok(Effect::None)
            }
            (Phase::Selecting, Message::SelectNone) => {
                self.selected.fill(false);
                Ok(Effect::None)
            }
            (Phase::Selecting, Message::Start) => {
                let ids = self.selected_ids();
                if ids.is_empty() {
                    return Err(TransitionError::NothingSelected);
                }
                Ok(self.begin(&ids))
            }
            (Phase::Selecting, Message::Begin(ids)) => Ok(self.begin(&ids)),
            (Phase::Selecting, Message::Cancel) => {
                self.phase = Phase::Finished;
                self.cancelled = true;
                Ok(Effect::Quit)
            }
            (Phase::Running, Message::Tick) => Ok(Effect::None),
            (Phase::Running, Message::Output { index, chunk }) => {
                if self.active == Some(index) {
                    self.live_output.push_str(&chunk);
                }
                Ok(Effect::None)
            }
            (Phase::Running, Message::Completed(completion)) => self.complete(completion),
            (Phase::Running, Message::Cancel) => {
                tracing::warn!(
                    in_flight = ?self.active,
                    "run cancelled; no further modules will be dispatched"
                );
                Ok(self.finish(true))
            }
            (Phase::Finished, Message::Completed(completion)) if self.cancelled => {
                if self.draining != Some(completion.index) {
                    return Err(TransitionError::UnexpectedCompletion {
                        expected: self.draining,
                        got: completion.index,
                    });
                }
                self.record(completion)?;
                self.draining = None;
                self.elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
                Ok(Effect::None)
            }
            (Phase::Finished, Message::Tick | Message::Output { .. }) => Ok(Effect::None),
            (Phase::Finished, Message::Cancel) => Ok(Effect::Quit),
            (phase, other) => Err(TransitionError::InvalidIntent {
                phase,
                intent: other.kind(),
            }),
        }
    }

    fn begin<S: AsRef<str>>(&mut self, ids: &[S]) -> Effect {
        self.started = Some(Instant::now());
        match resolve(&self.registry, ids) {
            Ok(plan) => {
                self.results = (0..plan.len()).map(|_| None).collect();
                self.plan = plan;
                self.phase = Phase::Running;
                self.dispatch(0)
            }
            Err(err) => {
                tracing::warn!(error = %err, "resolution failed; nothing will run");
                self.error = Some(err);
                self.finish(false)
            }
        }
    }

    fn dispatch(&mut self, index: usize) -> Effect {
        let Some(module) = self.plan.get(index).cloned() else {
            return self.finish(false);
        };
        tracing::info!(index, module = module.id(), "dispatching module");
        self.active = Some(index);
        self.live_output.clear();
        Effect::Dispatch(Dispatch { index, module })
    }

    fn complete(&mut self, completion: Completion) -> Result<Effect, TransitionError> {
        if self.active != Some(completion.index) {
            return Err(TransitionError::UnexpectedCompletion {
                expected: self.active,
                got: completion.index,
            });
        }
        let next = completion.index + 1;
        self.record(completion)?;
        Ok(self.dispatch(next))
    }

    /// Store the result of a completed module and append its output to the log.
    fn record(&mut self, completion: Completion) -> Result<(), TransitionError> {
        let Some(module) = self.plan.get(completion.index).cloned() else {
            return Err(TransitionError::UnexpectedCompletion {
                expected: self.in_flight(),
                got: completion.index,
            });
        };

        match &completion.outcome {
            Outcome::Succeeded => {
                tracing::info!(module = module.id(), elapsed = ?completion.elapsed, "module succeeded")
            }
            Outcome::Failed(reason) => {
                tracing::warn!(module = module.id(), %reason, "module failed; continuing")
            }
        }

        if !completion.log.is_empty() {
            self.log.push(completion.log.clone());
        }
        self.results[completion.index] = Some(InstallResult {
            id: module.id().to_string(),
            name: module.name().to_string(),
            outcome: completion.outcome,
            elapsed: completion.elapsed,
            log: completion.log,
        });
        Ok(())
    }

    fn finish(&mut self, cancelled: bool) -> Effect {
        if cancelled {
            self.draining = self.active;
        }
        self.active = None;
        self.phase = Phase::Finished;
        self.cancelled = cancelled;
        self.elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        Effect::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use crate::test_support::FakeModule;

    fn registry() -> Arc<Registry> {
        let mut builder = RegistryBuilder::new();
        builder
            .register(FakeModule::ok("A", &[]))
            .unwrap()
            .register(FakeModule::ok("B", &["A"]))
            .unwrap()
            .register(FakeModule::ok("C", &[]))
            .unwrap();
        Arc::new(builder.build().unwrap())
    }

    fn done(index: usize, outcome: Outcome, ms: u64) -> Message {
        Message::Completed(Completion {
            index,
            outcome,
            elapsed: Duration::from_millis(ms),
            log: format!("log {index}\n"),
        })
    }

    fn dispatched_index(effect: &Effect) -> Option<usize> {
        match effect {
            Effect::Dispatch(d) => Some(d.index),
            _ => None,
        }
    }

    // =========================================================================
    // Selecting
    // =========================================================================

    #[test]
    fn test_starts_selecting_with_everything_selected() {
        let session = InstallSession::new(registry());
        assert_eq!(session.phase(), Phase::Selecting);
        assert_eq!(session.selected_ids(), vec!["A", "B", "C"]);
        assert!(session.active_index().is_none());
    }

    #[test]
    fn test_toggle_and_toggle_all() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Toggle(1)).unwrap();
        assert!(!session.is_selected(1));
        assert_eq!(session.selected_ids(), vec!["A", "C"]);

        // Not everything selected -> select everything
        session.update(Message::ToggleAll).unwrap();
        assert_eq!(session.selected_ids().len(), 3);

        // Everything selected -> select nothing
        session.update(Message::ToggleAll).unwrap();
        assert!(session.selected_ids().is_empty());

        session.update(Message::SelectAll).unwrap();
        assert_eq!(session.selected_ids().len(), 3);
        session.update(Message::SelectNone).unwrap();
        assert!(session.selected_ids().is_empty());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut session = InstallSession::new(registry());
        let err = session.update(Message::Toggle(9)).unwrap_err();
        assert_eq!(err, TransitionError::SelectionOutOfRange { index: 9, len: 3 });
    }

    #[test]
    fn test_start_with_nothing_selected() {
        let mut session = InstallSession::new(registry());
        session.update(Message::SelectNone).unwrap();
        let err = session.update(Message::Start).unwrap_err();
        assert_eq!(err, TransitionError::NothingSelected);
        assert_eq!(session.phase(), Phase::Selecting);
    }

    #[test]
    fn test_cancel_while_selecting_quits() {
        let mut session = InstallSession::new(registry());
        let effect = session.update(Message::Cancel).unwrap();
        assert!(matches!(effect, Effect::Quit));
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.is_cancelled());
        assert!(!session.has_started());
        assert!(session.results().is_empty());
    }

    // =========================================================================
    // Running
    // =========================================================================

    #[test]
    fn test_start_resolves_selection_and_dispatches_first() {
        let mut session = InstallSession::new(registry());
        session.update(Message::SelectNone).unwrap();
        session.update(Message::Toggle(1)).unwrap(); // B pulls in A

        let effect = session.update(Message::Start).unwrap();
        assert_eq!(dispatched_index(&effect), Some(0));
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.plan().ids(), vec!["A", "B"]);
        assert_eq!(session.active_index(), Some(0));
        assert!(session.has_started());
    }

    #[test]
    fn test_sequential_dispatch_and_finish() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Begin(vec!["B".into()])).unwrap();

        let effect = session.update(done(0, Outcome::Succeeded, 10)).unwrap();
        assert_eq!(dispatched_index(&effect), Some(1));
        assert_eq!(session.active_index(), Some(1));
        assert_eq!(session.results().len(), 1);

        let effect = session
            .update(done(1, Outcome::Failed("boom".into()), 5))
            .unwrap();
        assert!(matches!(effect, Effect::Finished));
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.succeeded(), 1);
        assert_eq!(session.failed(), 1);
        assert_eq!(session.failed_names(), vec!["B"]);
        assert_eq!(session.log(), &["log 0\n".to_string(), "log 1\n".to_string()]);
    }

    #[test]
    fn test_failure_does_not_halt_run() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();

        let effect = session
            .update(done(0, Outcome::Failed("nope".into()), 1))
            .unwrap();
        assert_eq!(dispatched_index(&effect), Some(1));
        session.update(done(1, Outcome::Succeeded, 1)).unwrap();
        session.update(done(2, Outcome::Succeeded, 1)).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.result(0).unwrap().outcome.reason(), Some("nope"));
    }

    #[test]
    fn test_out_of_order_completion_rejected() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();

        let err = session.update(done(2, Outcome::Succeeded, 1)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::UnexpectedCompletion {
                expected: Some(0),
                got: 2
            }
        );
        assert!(session.result(2).is_none());
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_output_accumulates_for_active_module_only() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();
        session
            .update(Message::Output { index: 0, chunk: "hello ".into() })
            .unwrap();
        session
            .update(Message::Output { index: 1, chunk: "stray".into() })
            .unwrap();
        assert_eq!(session.live_output(), "hello ");

        session.update(done(0, Outcome::Succeeded, 1)).unwrap();
        assert_eq!(session.live_output(), "");
    }

    #[test]
    fn test_resolution_error_goes_straight_to_finished() {
        let mut session = InstallSession::new(registry());
        let effect = session.update(Message::Begin(vec!["Z".into()])).unwrap();
        assert!(matches!(effect, Effect::Finished));
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(
            session.resolution_error(),
            Some(&ResolveError::UnknownModule("Z".into()))
        );
        assert!(session.results().is_empty());
        assert!(session.plan().is_empty());
    }

    #[test]
    fn test_begin_with_empty_list_finishes_immediately() {
        let mut session = InstallSession::new(registry());
        let effect = session.update(Message::Begin(vec![])).unwrap();
        assert!(matches!(effect, Effect::Finished));
        assert!(session.resolution_error().is_none());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_cancel_while_running_stops_dispatch() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();
        session.update(done(0, Outcome::Succeeded, 1)).unwrap();

        let effect = session.update(Message::Cancel).unwrap();
        assert!(matches!(effect, Effect::Finished));
        assert!(session.is_cancelled());
        assert_eq!(session.phase(), Phase::Finished);

        assert_eq!(session.active_index(), None);
        assert_eq!(session.in_flight(), Some(1));

        // Nothing new is dispatched once the in-flight module reports back
        let effect = session.update(done(1, Outcome::Succeeded, 1)).unwrap();
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.results().len(), 2);
        assert_eq!(session.in_flight(), None);
        assert!(session.result(2).is_none());
    }

    #[test]
    fn test_failure_after_cancel_is_recorded() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();
        session.update(Message::Cancel).unwrap();

        session
            .update(done(0, Outcome::Failed("boom".into()), 7))
            .unwrap();
        assert_eq!(session.failed(), 1);
        assert_eq!(session.failed_names(), vec!["A"]);
        assert_eq!(session.log(), &["log 0\n".to_string()]);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.is_cancelled());
    }

    #[test]
    fn test_cancel_before_dispatch_was_performed() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();
        session.update(Message::Cancel).unwrap();
        session.never_started(0);
        assert_eq!(session.in_flight(), None);
        assert!(session.update(done(0, Outcome::Succeeded, 1)).is_err());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_completion_after_cancel_for_other_module_rejected() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();
        session.update(Message::Cancel).unwrap();

        let err = session.update(done(2, Outcome::Succeeded, 1)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::UnexpectedCompletion {
                expected: Some(0),
                got: 2
            }
        );

        session.update(done(0, Outcome::Succeeded, 1)).unwrap();
        // A second report for the same module is not accepted either
        assert!(session.update(done(0, Outcome::Succeeded, 1)).is_err());
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_selection_intents_rejected_while_running() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Start).unwrap();

        let err = session.update(Message::Toggle(0)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidIntent {
                phase: Phase::Running,
                intent: "Toggle"
            }
        );
        let err = session.update(Message::Start).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidIntent { .. }));
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_completion_rejected_while_selecting() {
        let mut session = InstallSession::new(registry());
        let err = session.update(done(0, Outcome::Succeeded, 1)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidIntent {
                phase: Phase::Selecting,
                intent: "Completed"
            }
        );
    }

    #[test]
    fn test_elapsed_frozen_after_finish() {
        let mut session = InstallSession::new(registry());
        session.update(Message::Begin(vec!["C".into()])).unwrap();
        session.update(done(0, Outcome::Succeeded, 1)).unwrap();
        let first = session.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(session.elapsed(), first);
    }

    #[test]
    fn test_transition_error_display() {
        let err = TransitionError::InvalidIntent {
            phase: Phase::Running,
            intent: "Start",
        };
        assert_eq!(err.to_string(), "Start is not valid while Running");
    }
}
