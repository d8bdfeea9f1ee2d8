//! Ports onto the external browser-automation driver.
//!
//! The core never talks to a browser directly; it emits scripts for an
//! `ExecutionSink` to run and relies on a `PageDriver` for the few
//! element-level primitives a script cannot express (presence waits,
//! handle queries, navigation waits).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::errors::InteractError;

/// An opaque token identifying a remote DOM node. The core never inspects it
/// beyond counting handles or returning them to the caller; matching elements
/// are re-queried per sample because the set changes as content streams in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    remote_id: String,
}

impl ElementHandle {
    pub fn new(remote_id: impl Into<String>) -> Self {
        Self {
            remote_id: remote_id.into(),
        }
    }

    pub fn remote_id(&self) -> &str {
        &self.remote_id
    }
}

/// Capability that runs a script string and returns its evaluated result.
///
/// Exactly one evaluation happens per call. A failing evaluation propagates
/// unchanged; retries are a policy decision made one layer up, and only for
/// verifiable input mutations.
#[async_trait]
pub trait ExecutionSink: Send + Sync {
    /// Evaluate `script` in the page and return the raw JSON result.
    /// `Value::Null` means the script produced no value (e.g. the target
    /// element does not exist).
    async fn evaluate(&self, script: &str) -> Result<Value, InteractError>;
}

/// The singleton page resource, as exposed by the automation driver.
#[async_trait]
pub trait PageDriver: ExecutionSink {
    /// Block cooperatively until `selector` resolves in the page, failing
    /// with [`InteractError::SelectorTimeout`] once `timeout` expires.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), InteractError>;

    /// All elements currently matching `selector` (possibly empty).
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, InteractError>;

    /// The first element matching `selector`, if any.
    async fn query_one(&self, selector: &str) -> Result<Option<ElementHandle>, InteractError>;

    /// Wait for an in-flight navigation to settle. Preferred over a fixed
    /// post-click delay when the driver can observe navigation events.
    async fn wait_for_navigation(&self, timeout: Duration) -> Result<(), InteractError>;

    /// Current URL of the page.
    fn current_url(&self) -> String;
}
