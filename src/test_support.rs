//! Deterministic fake modules for unit tests.

use crate::module_traits::Module;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct FakeModule {
    pub id: &'static str,
    pub deps: Vec<&'static str>,
    pub delay: Duration,
    pub fail_with: Option<&'static str>,
    pub output: &'static str,
    pub calls: AtomicUsize,
}

impl FakeModule {
    pub fn ok(id: &'static str, deps: &[&'static str]) -> Self {
        Self {
            id,
            deps: deps.to_vec(),
            delay: Duration::ZERO,
            fail_with: None,
            output: "",
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(id: &'static str, reason: &'static str) -> Self {
        Self {
            fail_with: Some(reason),
            ..Self::ok(id, &[])
        }
    }

    pub fn with_output(mut self, output: &'static str) -> Self {
        self.output = output;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Module for FakeModule {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.id
    }

    fn description(&self) -> &str {
        "fake"
    }

    fn dependencies(&self) -> &[&str] {
        &self.deps
    }

    fn install(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.output.is_empty() {
            out.write_all(self.output.as_bytes())?;
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        match self.fail_with {
            Some(reason) => anyhow::bail!("{reason}"),
            None => Ok(()),
        }
    }
}
