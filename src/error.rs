//! Error handling module for henrik-os
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Component-local errors (registry, resolver, session transitions) convert
//! into [`ProvisionError`] so callers can propagate with `?`.

use thiserror::Error;

/// Main error type for henrik-os
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// A requested module id has no registry entry
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// The dependency graph cannot be linearized
    #[error("cyclic dependency: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    /// Two modules were registered under the same id
    #[error("module id registered twice: {0}")]
    RegistrationConflict(String),

    /// A module declares a dependency that was never registered
    #[error("module {module} depends on unregistered module {dependency}")]
    UnknownDependency { module: String, dependency: String },

    /// A module's install operation reported failure
    #[error("{module} failed: {reason}")]
    ModuleInstall { module: String, reason: String },

    /// Install session transition errors
    #[error("Install transition error: {0}")]
    Transition(String),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for henrik-os operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

impl ProvisionError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }

    /// True for errors raised while turning a request into a plan
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::UnknownModule(_) | Self::CyclicDependency(_))
    }

    /// Process exit status for an error that ended the program.
    ///
    /// Setup problems (resolution, registry, configuration) exit with 2;
    /// anything that broke mid-run exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            _ if self.is_resolution() => 2,
            Self::RegistrationConflict(_) | Self::UnknownDependency { .. } | Self::Config(_) => 2,
            _ => 1,
        }
    }
}
