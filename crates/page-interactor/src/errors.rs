//! Error types for page interaction.

use thiserror::Error;

/// Errors surfaced by command execution, action handlers and the scroll
/// loader. Translation layers never recover from these; the only bounded
/// retry in the crate is the input verification loop.
#[derive(Debug, Error, Clone)]
pub enum InteractError {
    /// A required element did not appear within the configured wait bound.
    #[error("selector '{selector}' did not resolve within {timeout_ms}ms")]
    SelectorTimeout { selector: String, timeout_ms: u64 },

    /// A type-and-verify mutation did not converge to the target value.
    #[error(
        "input did not converge after {attempts} attempts: target '{target}', last observed {last_observed:?}"
    )]
    InputVerification {
        target: String,
        last_observed: Option<String>,
        attempts: u32,
    },

    /// The underlying script evaluation itself failed (transport error, page
    /// navigated mid-call, syntax error in a generated command).
    #[error("script evaluation failed: {0}")]
    Execution(String),

    /// The sink returned a value the command's declared shape cannot absorb.
    #[error("unexpected evaluation result: expected {expected}, got {got}")]
    Decode { expected: &'static str, got: String },

    /// A long-running operation was cancelled.
    #[error("operation interrupted: {0}")]
    Interrupted(String),

    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(String),
}

impl InteractError {
    /// Whether the failure is a wait-bound expiry rather than a hard fault.
    pub fn is_timeout(&self) -> bool {
        matches!(self, InteractError::SelectorTimeout { .. })
    }

    /// Whether a caller could reasonably retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InteractError::SelectorTimeout { .. } | InteractError::Execution(_)
        )
    }
}
