//! Install session driven by real worker threads
//!
//! These tests run the same loop a front end runs: apply an effect, wait
//! for the worker's events, feed them back into the session.

mod common;

use common::{registry, TestModule};
use henrik_os::executor::{self, OutputMode, WorkerEvent};
use henrik_os::{Effect, InstallSession, Message, Outcome, Phase, RunOutcome};
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::time::Duration;

/// Run `ids` to completion and return the finished session.
fn drive(session: &mut InstallSession, ids: &[&str], mode: OutputMode) {
    let (tx, rx) = mpsc::channel::<WorkerEvent>();
    let mut effect = session
        .update(Message::Begin(ids.iter().map(|s| s.to_string()).collect()))
        .unwrap();

    loop {
        match effect {
            Effect::Dispatch(dispatch) => {
                executor::dispatch(dispatch, tx.clone(), mode);
            }
            Effect::Finished | Effect::Quit => return,
            Effect::None => {}
        }
        let event = rx.recv_timeout(Duration::from_secs(5)).expect("worker event");
        effect = session.update(event.into()).unwrap();
    }
}

// =============================================================================
// Best-effort batch
// =============================================================================

#[test]
fn test_failure_is_recorded_and_run_continues() {
    let reg = registry(vec![
        TestModule::new("A", &[]).takes(Duration::from_millis(10)),
        TestModule::new("B", &["A"])
            .takes(Duration::from_millis(5))
            .fails("boom"),
    ]);
    let mut session = InstallSession::new(reg);
    drive(&mut session, &["B"], OutputMode::Capture);

    assert_eq!(session.phase(), Phase::Finished);
    let results = session.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "A");
    assert_eq!(results[0].outcome, Outcome::Succeeded);
    assert!(results[0].elapsed >= Duration::from_millis(10));
    assert_eq!(results[1].outcome, Outcome::Failed("boom".into()));
    assert!(results[1].elapsed >= Duration::from_millis(5));

    let outcome = RunOutcome::from_session(&session);
    assert_eq!(outcome.failed, vec!["B"]);
    assert!(outcome.elapsed >= Duration::from_millis(15));
    assert!(!outcome.success());
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn test_failing_module_in_the_middle() {
    let reg = registry(vec![
        TestModule::new("m0", &[]),
        TestModule::new("m1", &[]),
        TestModule::new("m2", &[]).fails("exit status 3"),
        TestModule::new("m3", &[]),
        TestModule::new("m4", &[]),
    ]);
    let mut session = InstallSession::new(reg);
    drive(&mut session, &["m0", "m1", "m2", "m3", "m4"], OutputMode::Capture);

    let results = session.results();
    assert_eq!(results.len(), 5);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.outcome.is_success(), i != 2, "module {i}");
    }
    assert_eq!(session.succeeded(), 4);
    assert_eq!(session.failed(), 1);

    let total: Duration = results.iter().map(|r| r.elapsed).sum();
    assert!(session.elapsed() >= total);
}

#[test]
fn test_every_module_runs_exactly_once() {
    let a = TestModule::new("a", &[]);
    let b = TestModule::new("b", &["a"]);
    let c = TestModule::new("c", &["a"]);
    let counters = [a.run_counter(), b.run_counter(), c.run_counter()];
    let mut session = InstallSession::new(registry(vec![a, b, c]));

    drive(&mut session, &["b", "c", "a"], OutputMode::Capture);
    for counter in &counters {
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_captured_output_lands_in_result_and_log() {
    let reg = registry(vec![
        TestModule::new("git", &[]).prints("  Wrote ~/.gitconfig\n"),
        TestModule::new("quiet", &[]),
    ]);
    let mut session = InstallSession::new(reg);
    drive(&mut session, &["git", "quiet"], OutputMode::Capture);

    assert_eq!(session.results()[0].log, "  Wrote ~/.gitconfig\n");
    assert_eq!(session.log(), ["  Wrote ~/.gitconfig\n".to_string()]);
}

#[test]
fn test_streamed_output_also_captured() {
    let reg = registry(vec![TestModule::new("fish", &[]).prints("chsh ok\n")]);
    let mut session = InstallSession::new(reg);
    drive(&mut session, &["fish"], OutputMode::Stream);
    assert_eq!(session.results()[0].log, "chsh ok\n");
}

// =============================================================================
// Resolution failure
// =============================================================================

#[test]
fn test_resolution_error_runs_nothing() {
    let a = TestModule::new("a", &[]);
    let runs = a.run_counter();
    let mut session = InstallSession::new(registry(vec![a]));
    drive(&mut session, &["a", "missing"], OutputMode::Capture);

    assert_eq!(session.phase(), Phase::Finished);
    assert!(session.results().is_empty());
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    let outcome = RunOutcome::from_session(&session);
    assert_eq!(outcome.error.as_deref(), Some("unknown module: missing"));
    assert_eq!(outcome.exit_code(), 2);
}
