//! Cooperative cancellation for install runs
//!
//! A run is never torn down mid-module: cancelling only stops the
//! orchestrator from dispatching further modules. The in-flight module keeps
//! running until it returns; its result is still recorded and both front ends
//! wait for it before exiting.
//!
//! # Signals
//!
//! [`init_signal_handlers`] watches SIGINT, SIGTERM and SIGHUP on a
//! background thread. The first signal trips the [`CancelFlag`]; a second
//! one exits immediately with `128 + signal`.
//!
//! Module commands stay in our process group so that `sudo` can still read
//! the password from the controlling terminal; a terminal Ctrl+C therefore
//! reaches the in-flight child directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "stop dispatching" flag.
///
/// Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn signal_name(sig: i32) -> &'static str {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    match sig {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "UNKNOWN",
    }
}

/// Install signal handling that trips `flag`.
///
/// Call once at program start.
pub fn init_signal_handlers(flag: &CancelFlag) -> Result<(), std::io::Error> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    let flag = flag.clone();

    std::thread::Builder::new()
        .name("signal-watch".into())
        .spawn(move || {
            for sig in signals.forever() {
                if flag.is_cancelled() {
                    tracing::warn!(signal = signal_name(sig), "second signal, exiting now");
                    std::process::exit(128 + sig);
                }
                tracing::info!(
                    signal = signal_name(sig),
                    "received signal, finishing current module then stopping"
                );
                flag.cancel();
            }
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_clear() {
        assert!(!CancelFlag::new().is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        other.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let flag = CancelFlag::new();
        flag.cancel();
        flag.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_signal_names() {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        assert_eq!(signal_name(SIGINT), "SIGINT");
        assert_eq!(signal_name(SIGTERM), "SIGTERM");
        assert_eq!(signal_name(0), "UNKNOWN");
    }
}
