//! Input handler: the type-and-verify retry loop.
//!
//! Script-driven value assignment can race the page's own JS (input masks,
//! framework-controlled inputs) and silently not stick, so a single
//! write-without-read-back is not trustworthy. Each attempt writes the value
//! through a set-attribute command and reads it back before declaring success.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::command::{CommandHandler, DecodedValue};
use crate::config::InteractConfig;
use crate::errors::InteractError;
use crate::ports::PageDriver;

pub struct InputHandler {
    driver: Arc<dyn PageDriver>,
    commands: CommandHandler,
    config: InteractConfig,
}

impl InputHandler {
    pub fn new(driver: Arc<dyn PageDriver>, commands: CommandHandler, config: InteractConfig) -> Self {
        Self {
            driver,
            commands,
            config,
        }
    }

    /// Type `text` into the first element matching `selector` by direct DOM
    /// value assignment, verifying each write by reading the value back.
    ///
    /// Returns the number of attempts used on convergence. Fails with
    /// [`InteractError::InputVerification`] when `max_input_attempts` rounds
    /// go by without the read-back matching.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<u32, InteractError> {
        self.driver
            .wait_for_selector(selector, self.config.selector_wait_timeout())
            .await?;

        if self.config.input_pre_wait_ms > 0 {
            sleep(self.config.input_pre_wait()).await;
        }

        let max_attempts = self.config.max_input_attempts.max(1);
        let mut last_observed = None;

        for attempt in 1..=max_attempts {
            self.commands
                .run(&js_commands::set_attr(selector, "value", text))
                .await?;

            match self
                .commands
                .run(&js_commands::get_attr(selector, "value"))
                .await?
            {
                DecodedValue::Text(observed) if observed == text => {
                    info!(selector, attempts = attempt, "input verified");
                    return Ok(attempt);
                }
                DecodedValue::Text(observed) => last_observed = Some(observed),
                DecodedValue::Absent => last_observed = None,
                other => {
                    return Err(InteractError::Decode {
                        expected: "string",
                        got: format!("{other:?}"),
                    })
                }
            }
        }

        warn!(
            selector,
            target = text,
            last_observed = ?last_observed,
            attempts = max_attempts,
            "input did not converge"
        );
        Err(InteractError::InputVerification {
            target: text.to_owned(),
            last_observed,
            attempts: max_attempts,
        })
    }
}
