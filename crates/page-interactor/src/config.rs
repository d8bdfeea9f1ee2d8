//! Interaction configuration: a flat set of named numeric options with fixed
//! defaults, overridable from a layered external source.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::errors::InteractError;

/// Environment variable prefix for configuration overrides
/// (e.g. `PAGE_INTERACT_QUICK_WAIT_MS=50`).
const ENV_PREFIX: &str = "PAGE_INTERACT";

/// Named wait durations and retry bounds for page interaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InteractConfig {
    /// Extra settle time after a click that opens a new page (milliseconds).
    pub new_page_wait_ms: u64,
    /// Settle time between selector resolution and the click itself.
    pub click_pre_wait_ms: u64,
    /// Settle time between selector resolution and the first value write.
    pub input_pre_wait_ms: u64,
    /// Short pause for fast-reacting pages.
    pub quick_wait_ms: u64,
    /// Long pause for slow-reacting pages.
    pub slow_wait_ms: u64,
    /// Upper bound on waiting for a selector to appear.
    pub selector_wait_timeout_ms: u64,
    /// Maximum set-then-verify rounds for input mutation.
    pub max_input_attempts: u32,
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            new_page_wait_ms: 1000,
            click_pre_wait_ms: 1000,
            input_pre_wait_ms: 1000,
            quick_wait_ms: 200,
            slow_wait_ms: 2000,
            selector_wait_timeout_ms: 5000,
            max_input_attempts: 3,
        }
    }
}

impl InteractConfig {
    /// Load configuration from a file, layered over the defaults and under
    /// `PAGE_INTERACT_*` environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, InteractError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|err| InteractError::Config(err.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|err| InteractError::Config(err.to_string()))
    }

    pub fn new_page_wait(&self) -> Duration {
        Duration::from_millis(self.new_page_wait_ms)
    }

    pub fn click_pre_wait(&self) -> Duration {
        Duration::from_millis(self.click_pre_wait_ms)
    }

    pub fn input_pre_wait(&self) -> Duration {
        Duration::from_millis(self.input_pre_wait_ms)
    }

    pub fn quick_wait(&self) -> Duration {
        Duration::from_millis(self.quick_wait_ms)
    }

    pub fn slow_wait(&self) -> Duration {
        Duration::from_millis(self.slow_wait_ms)
    }

    pub fn selector_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_wait_timeout_ms)
    }

    /// Zero every wait. Intended for tests and simulated drivers where
    /// settle delays have nothing to settle.
    pub fn without_waits() -> Self {
        Self {
            new_page_wait_ms: 0,
            click_pre_wait_ms: 0,
            input_pre_wait_ms: 0,
            quick_wait_ms: 0,
            slow_wait_ms: 0,
            selector_wait_timeout_ms: 0,
            max_input_attempts: 3,
        }
    }
}
