//! Click handler: selector-wait precondition, then a click command, then an
//! optional navigation settle.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::command::CommandHandler;
use crate::config::InteractConfig;
use crate::errors::InteractError;
use crate::ports::PageDriver;

/// How to wait for a navigation that a click may trigger.
///
/// The fixed delay mirrors what drivers without navigation events can offer;
/// `AwaitNavigation` uses the driver's real navigation wait when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationWait {
    /// The click stays on the current page; no extra wait.
    #[default]
    None,
    /// Sleep for the configured `new_page_wait` after the click.
    FixedDelay,
    /// Ask the driver to wait for the navigation to settle.
    AwaitNavigation,
}

pub struct ClickHandler {
    driver: Arc<dyn PageDriver>,
    commands: CommandHandler,
    config: InteractConfig,
}

impl ClickHandler {
    pub fn new(driver: Arc<dyn PageDriver>, commands: CommandHandler, config: InteractConfig) -> Self {
        Self {
            driver,
            commands,
            config,
        }
    }

    /// Click the first element matching `selector`, blocking until the
    /// selector resolves or the configured wait bound expires.
    pub async fn click(&self, selector: &str, nav: NavigationWait) -> Result<(), InteractError> {
        self.driver
            .wait_for_selector(selector, self.config.selector_wait_timeout())
            .await?;

        if self.config.click_pre_wait_ms > 0 {
            sleep(self.config.click_pre_wait()).await;
        }

        self.commands.run(&js_commands::click(selector)).await?;
        info!(selector, "clicked");

        match nav {
            NavigationWait::None => {}
            NavigationWait::FixedDelay => {
                debug!(
                    wait_ms = self.config.new_page_wait_ms,
                    "waiting fixed delay for new page"
                );
                sleep(self.config.new_page_wait()).await;
            }
            NavigationWait::AwaitNavigation => {
                debug!("waiting for navigation to settle");
                self.driver
                    .wait_for_navigation(self.config.selector_wait_timeout())
                    .await?;
            }
        }
        Ok(())
    }
}
