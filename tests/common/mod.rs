//! Shared fixtures for integration tests
//!
//! `TestModule` never touches the system: it writes canned output, sleeps
//! for a fixed time, and succeeds or fails as configured.

#![allow(dead_code)]

use henrik_os::{Module, Registry, RegistryBuilder};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct TestModule {
    id: String,
    deps: Vec<&'static str>,
    delay: Duration,
    failure: Option<String>,
    output: String,
    runs: Arc<AtomicUsize>,
}

impl TestModule {
    pub fn new(id: &str, deps: &[&'static str]) -> Self {
        Self {
            id: id.to_string(),
            deps: deps.to_vec(),
            delay: Duration::ZERO,
            failure: None,
            output: String::new(),
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fails(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn takes(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn prints(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    /// Counter shared with the module, incremented on every install
    pub fn run_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.runs)
    }
}

impl Module for TestModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        "test module"
    }

    fn dependencies(&self) -> &[&str] {
        &self.deps
    }

    fn install(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        out.write_all(self.output.as_bytes())?;
        std::thread::sleep(self.delay);
        match &self.failure {
            Some(reason) => anyhow::bail!("{reason}"),
            None => Ok(()),
        }
    }
}

pub fn registry(modules: Vec<TestModule>) -> Arc<Registry> {
    let mut builder = RegistryBuilder::new();
    for module in modules {
        builder.register(module).expect("unique ids");
    }
    Arc::new(builder.build().expect("valid registry"))
}

/// `A`, `B -> A`, `C -> B`
pub fn chain() -> Arc<Registry> {
    registry(vec![
        TestModule::new("A", &[]),
        TestModule::new("B", &["A"]),
        TestModule::new("C", &["B"]),
    ])
}
