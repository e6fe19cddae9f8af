//! Logic modules: pure decisions made above the individual modules.
//!
//! # Modules
//!
//! - `resolver` - dependency closure and execution ordering
//! - `postinstall` - manual follow-up steps keyed by which modules ran

pub mod postinstall;
pub mod resolver;
