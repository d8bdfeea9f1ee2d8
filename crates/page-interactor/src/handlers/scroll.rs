//! Scroll handler: thin pass-through over the scroll command set plus the
//! element count used by the convergence loader. No extra policy lives here.

use std::sync::Arc;
use tracing::info;

use crate::command::{CommandHandler, DecodedValue};
use crate::errors::InteractError;
use crate::ports::PageDriver;

#[derive(Clone)]
pub struct ScrollHandler {
    driver: Arc<dyn PageDriver>,
    commands: CommandHandler,
}

impl ScrollHandler {
    pub fn new(driver: Arc<dyn PageDriver>, commands: CommandHandler) -> Self {
        Self { driver, commands }
    }

    /// Number of elements currently matching `selector`. Re-queried on every
    /// call; handles are never held across samples.
    pub async fn count(&self, selector: &str) -> Result<usize, InteractError> {
        let elements = self.driver.query_all(selector).await?;
        Ok(elements.len())
    }

    pub async fn scroll_to(&self, x: i64, y: i64) -> Result<(), InteractError> {
        self.commands.run(&js_commands::scroll_to(x, y)).await?;
        info!(x, y, "scrolled to position");
        Ok(())
    }

    pub async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), InteractError> {
        self.commands.run(&js_commands::scroll_by(dx, dy)).await?;
        Ok(())
    }

    pub async fn scroll_to_top(&self) -> Result<(), InteractError> {
        self.commands.run(&js_commands::scroll_to_top()).await?;
        info!("scrolled to top");
        Ok(())
    }

    pub async fn scroll_to_bottom(&self) -> Result<(), InteractError> {
        self.commands.run(&js_commands::scroll_to_bottom()).await?;
        Ok(())
    }

    pub async fn scroll_height(&self) -> Result<f64, InteractError> {
        self.metric(js_commands::scroll_height()).await
    }

    pub async fn scroll_width(&self) -> Result<f64, InteractError> {
        self.metric(js_commands::scroll_width()).await
    }

    pub async fn scroll_top(&self) -> Result<f64, InteractError> {
        self.metric(js_commands::scroll_top()).await
    }

    pub async fn scroll_left(&self) -> Result<f64, InteractError> {
        self.metric(js_commands::scroll_left()).await
    }

    async fn metric(&self, cmd: js_commands::Command) -> Result<f64, InteractError> {
        let value = self.commands.run(&cmd).await?;
        value.as_f64().ok_or_else(|| InteractError::Decode {
            expected: "number",
            got: format!("{value:?}"),
        })
    }
}
