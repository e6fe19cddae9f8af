//! Module execution on worker threads
//!
//! Runs one module's `install` off the UI thread and reports back over an
//! mpsc channel that the owning front end polls from its main loop. Every
//! dispatched module produces exactly one [`WorkerEvent::Completed`], even
//! when the module panics or the worker thread cannot be spawned.

use crate::install_state::{Completion, Dispatch, Message, Outcome};
use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Messages sent from module worker threads to the main loop
#[derive(Debug)]
pub enum WorkerEvent {
    /// A chunk of output as the module wrote it
    Output { index: usize, chunk: String },
    /// The module's install operation returned
    Completed(Completion),
}

impl From<WorkerEvent> for Message {
    fn from(event: WorkerEvent) -> Self {
        match event {
            WorkerEvent::Output { index, chunk } => Message::Output { index, chunk },
            WorkerEvent::Completed(completion) => Message::Completed(completion),
        }
    }
}

/// How module output reaches the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Buffer everything; delivered once with the completion
    Capture,
    /// Forward every write as an `Output` event and also buffer it
    Stream,
}

/// Length of a multi-byte UTF-8 sequence cut off at the end of `bytes`.
fn incomplete_utf8_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let width = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if width > back { back } else { 0 };
    }
    0
}

/// Sink handed to `Module::install`.
struct WorkerSink {
    index: usize,
    buf: Vec<u8>,
    live: Option<Sender<WorkerEvent>>,
    /// Start of a character split across writes, held until it completes
    pending: Vec<u8>,
}

impl WorkerSink {
    fn send_live(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if let Some(tx) = &self.live {
            // Receiver gone means the front end is shutting down
            let _ = tx.send(WorkerEvent::Output {
                index: self.index,
                chunk: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
    }

    /// Emit whatever is still held back once the module has returned.
    fn finish(&mut self) {
        let rest = std::mem::take(&mut self.pending);
        self.send_live(&rest);
    }
}

impl Write for WorkerSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        if self.live.is_some() {
            let mut bytes = std::mem::take(&mut self.pending);
            bytes.extend_from_slice(data);
            let complete = bytes.len() - incomplete_utf8_tail(&bytes);
            self.pending = bytes.split_off(complete);
            self.send_live(&bytes);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run a dispatched module on a named worker thread.
///
/// Returns the join handle, or `None` if the thread could not be spawned (a
/// failed completion has then already been sent).
pub fn dispatch(
    dispatch: Dispatch,
    tx: Sender<WorkerEvent>,
    mode: OutputMode,
) -> Option<JoinHandle<()>> {
    let Dispatch { index, module } = dispatch;
    let fallback_tx = tx.clone();
    let thread_name = format!("module-{}", module.id());

    let spawned = thread::Builder::new().name(thread_name).spawn(move || {
        let mut sink = WorkerSink {
            index,
            buf: Vec::new(),
            live: (mode == OutputMode::Stream).then(|| tx.clone()),
            pending: Vec::new(),
        };

        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| module.install(&mut sink)));
        let elapsed = start.elapsed();
        sink.finish();

        let outcome = match result {
            Ok(Ok(())) => Outcome::Succeeded,
            Ok(Err(err)) => Outcome::Failed(format!("{err:#}")),
            Err(payload) => Outcome::Failed(format!("panicked: {}", panic_message(&*payload))),
        };
        tracing::debug!(module = module.id(), ?elapsed, success = outcome.is_success(), "worker done");

        let _ = tx.send(WorkerEvent::Completed(Completion {
            index,
            outcome,
            elapsed,
            log: String::from_utf8_lossy(&sink.buf).into_owned(),
        }));
    });

    match spawned {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::error!(index, error = %err, "failed to spawn worker thread");
            let _ = fallback_tx.send(WorkerEvent::Completed(Completion {
                index,
                outcome: Outcome::Failed(format!("failed to start worker: {err}")),
                elapsed: Duration::ZERO,
                log: String::new(),
            }));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_traits::Module;
    use crate::test_support::FakeModule;
    use std::sync::mpsc;
    use std::sync::Arc;

    struct Panicky;

    impl Module for Panicky {
        fn id(&self) -> &str {
            "panicky"
        }
        fn name(&self) -> &str {
            "Panicky"
        }
        fn description(&self) -> &str {
            "always panics"
        }
        fn install(&self, _out: &mut dyn Write) -> anyhow::Result<()> {
            panic!("kaboom")
        }
    }

    fn completion_of(rx: &mpsc::Receiver<WorkerEvent>) -> Completion {
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                WorkerEvent::Completed(c) => return c,
                WorkerEvent::Output { .. } => continue,
            }
        }
    }

    #[test]
    fn test_capture_mode_buffers_output() {
        let (tx, rx) = mpsc::channel();
        let module: Arc<dyn Module> = Arc::new(FakeModule::ok("a", &[]).with_output("line one\n"));
        let handle = dispatch(Dispatch { index: 3, module }, tx, OutputMode::Capture).unwrap();
        handle.join().unwrap();

        let first = rx.recv().unwrap();
        let WorkerEvent::Completed(c) = first else {
            panic!("capture mode must not stream output");
        };
        assert_eq!(c.index, 3);
        assert_eq!(c.outcome, Outcome::Succeeded);
        assert_eq!(c.log, "line one\n");
    }

    #[test]
    fn test_stream_mode_forwards_output_before_completion() {
        let (tx, rx) = mpsc::channel();
        let module: Arc<dyn Module> = Arc::new(FakeModule::ok("a", &[]).with_output("hi\n"));
        dispatch(Dispatch { index: 0, module }, tx, OutputMode::Stream);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerEvent::Output { index, chunk } => {
                assert_eq!(index, 0);
                assert_eq!(chunk, "hi\n");
            }
            other => panic!("expected output first, got {other:?}"),
        }
        let c = completion_of(&rx);
        assert_eq!(c.log, "hi\n");
    }

    #[test]
    fn test_failure_reason_and_elapsed() {
        let (tx, rx) = mpsc::channel();
        let module: Arc<dyn Module> =
            Arc::new(FakeModule::failing("b", "boom").with_delay(Duration::from_millis(5)));
        dispatch(Dispatch { index: 1, module }, tx, OutputMode::Capture);

        let c = completion_of(&rx);
        assert_eq!(c.outcome, Outcome::Failed("boom".to_string()));
        assert!(c.elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_panic_becomes_failure() {
        let (tx, rx) = mpsc::channel();
        dispatch(
            Dispatch { index: 0, module: Arc::new(Panicky) },
            tx,
            OutputMode::Capture,
        );
        let c = completion_of(&rx);
        assert_eq!(c.outcome, Outcome::Failed("panicked: kaboom".to_string()));
    }

    fn streamed(rx: &mpsc::Receiver<WorkerEvent>) -> String {
        rx.try_iter()
            .map(|event| match event {
                WorkerEvent::Output { chunk, .. } => chunk,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_character_split_across_writes_streams_intact() {
        let (tx, rx) = mpsc::channel();
        let mut sink = WorkerSink {
            index: 0,
            buf: Vec::new(),
            live: Some(tx),
            pending: Vec::new(),
        };
        let text = "Backed up ~/.gitconfig → ~/.gitconfig.bak ✓\n".as_bytes();
        for byte in text {
            sink.write_all(std::slice::from_ref(byte)).unwrap();
        }
        sink.finish();

        let out = streamed(&rx);
        assert!(!out.contains('\u{FFFD}'));
        assert_eq!(out.as_bytes(), text);
        assert_eq!(sink.buf, text);
    }

    #[test]
    fn test_truncated_character_flushed_at_finish() {
        let (tx, rx) = mpsc::channel();
        let mut sink = WorkerSink {
            index: 0,
            buf: Vec::new(),
            live: Some(tx),
            pending: Vec::new(),
        };
        sink.write_all(b"ok \xE2\x9C").unwrap();
        assert_eq!(streamed(&rx), "ok ");
        sink.finish();
        assert_eq!(streamed(&rx), "\u{FFFD}");
    }

    #[test]
    fn test_incomplete_utf8_tail() {
        assert_eq!(incomplete_utf8_tail(b""), 0);
        assert_eq!(incomplete_utf8_tail(b"abc"), 0);
        assert_eq!(incomplete_utf8_tail("é".as_bytes()), 0);
        assert_eq!(incomplete_utf8_tail(&"é".as_bytes()[..1]), 1);
        assert_eq!(incomplete_utf8_tail(&"✓".as_bytes()[..2]), 2);
        assert_eq!(incomplete_utf8_tail(&"🍺".as_bytes()[..3]), 3);
        assert_eq!(incomplete_utf8_tail(b"\xFF"), 0);
    }

    #[test]
    fn test_worker_event_into_message() {
        let msg: Message = WorkerEvent::Output {
            index: 2,
            chunk: "x".into(),
        }
        .into();
        assert_eq!(msg, Message::Output { index: 2, chunk: "x".into() });
    }
}
