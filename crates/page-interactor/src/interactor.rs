//! The `PageInteractor` façade: construction wiring over the handlers and
//! the scroll loader, with no independent policy of its own.

use std::sync::Arc;
use std::time::Duration;

use crate::command::CommandHandler;
use crate::config::InteractConfig;
use crate::errors::InteractError;
use crate::handlers::{ClickHandler, DomHandler, InputHandler, NavigationWait, ScrollHandler};
use crate::loader::{CountTarget, LoadOptions, LoadOutcome, ScrollLoader};
use crate::ports::{ElementHandle, ExecutionSink, PageDriver};

/// High-level interface for interacting with the singleton page.
///
/// Every public operation forwards to the matching handler; all waits and
/// retry bounds come from the [`InteractConfig`] supplied at construction.
pub struct PageInteractor {
    driver: Arc<dyn PageDriver>,
    config: InteractConfig,
    dom: DomHandler,
    click: ClickHandler,
    input: InputHandler,
    scroll: ScrollHandler,
    loader: ScrollLoader,
}

impl PageInteractor {
    pub fn new(driver: Arc<dyn PageDriver>, config: InteractConfig) -> Self {
        let sink: Arc<dyn ExecutionSink> = driver.clone();
        let commands = CommandHandler::new(sink);

        Self {
            dom: DomHandler::new(commands.clone()),
            click: ClickHandler::new(driver.clone(), commands.clone(), config.clone()),
            input: InputHandler::new(driver.clone(), commands.clone(), config.clone()),
            scroll: ScrollHandler::new(driver.clone(), commands),
            loader: ScrollLoader::new(driver.clone()),
            driver,
            config,
        }
    }

    pub fn with_defaults(driver: Arc<dyn PageDriver>) -> Self {
        Self::new(driver, InteractConfig::default())
    }

    pub fn config(&self) -> &InteractConfig {
        &self.config
    }

    /// Load options seeded from this interactor's configuration: the per-tick
    /// settle pause defaults to `quick_wait`.
    pub fn load_options(&self) -> LoadOptions {
        ScrollLoader::options_from(&self.config)
    }

    /// Current URL of the page.
    pub fn url(&self) -> String {
        self.driver.current_url()
    }

    // element queries

    pub async fn query_one(&self, selector: &str) -> Result<Option<ElementHandle>, InteractError> {
        self.driver.query_one(selector).await
    }

    pub async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, InteractError> {
        self.driver.query_all(selector).await
    }

    pub async fn count(&self, selector: &str) -> Result<usize, InteractError> {
        self.scroll.count(selector).await
    }

    // click

    /// Click the first element matching `selector` once it appears.
    pub async fn click(&self, selector: &str, nav: NavigationWait) -> Result<(), InteractError> {
        self.click.click(selector, nav).await
    }

    // input

    /// Type text with write-verification; returns the attempts used.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<u32, InteractError> {
        self.input.type_text(selector, text).await
    }

    // attributes, classes, text

    pub async fn get_attr(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, InteractError> {
        self.dom.get_attr(selector, attr).await
    }

    pub async fn set_attr(
        &self,
        selector: &str,
        attr: &str,
        value: &str,
    ) -> Result<(), InteractError> {
        self.dom.set_attr(selector, attr, value).await
    }

    pub async fn class_list(&self, selector: &str) -> Result<Vec<String>, InteractError> {
        self.dom.class_list(selector).await
    }

    pub async fn add_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.dom.add_class(selector, class_name).await
    }

    pub async fn remove_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.dom.remove_class(selector, class_name).await
    }

    pub async fn toggle_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.dom.toggle_class(selector, class_name).await
    }

    pub async fn text_content(&self, selector: &str) -> Result<Option<String>, InteractError> {
        self.dom.text_content(selector).await
    }

    pub async fn text_contents(&self, selector: &str) -> Result<Vec<String>, InteractError> {
        self.dom.text_contents(selector).await
    }

    pub async fn has_before_pseudo(&self, selector: &str) -> Result<bool, InteractError> {
        self.dom.has_before_pseudo(selector).await
    }

    pub async fn has_after_pseudo(&self, selector: &str) -> Result<bool, InteractError> {
        self.dom.has_after_pseudo(selector).await
    }

    // scrolling

    pub async fn scroll_to(&self, x: i64, y: i64) -> Result<(), InteractError> {
        self.scroll.scroll_to(x, y).await
    }

    pub async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), InteractError> {
        self.scroll.scroll_by(dx, dy).await
    }

    pub async fn scroll_to_top(&self) -> Result<(), InteractError> {
        self.scroll.scroll_to_top().await
    }

    pub async fn scroll_to_bottom(&self) -> Result<(), InteractError> {
        self.scroll.scroll_to_bottom().await
    }

    pub async fn scroll_height(&self) -> Result<f64, InteractError> {
        self.scroll.scroll_height().await
    }

    pub async fn scroll_width(&self) -> Result<f64, InteractError> {
        self.scroll.scroll_width().await
    }

    pub async fn scroll_top(&self) -> Result<f64, InteractError> {
        self.scroll.scroll_top().await
    }

    pub async fn scroll_left(&self) -> Result<f64, InteractError> {
        self.scroll.scroll_left().await
    }

    // convergence loading

    /// Scroll until loading converges, per `opts`.
    pub async fn scroll_load(&self, opts: LoadOptions) -> Result<LoadOutcome, InteractError> {
        self.loader.run(opts).await
    }

    /// Scroll until at least `threshold` elements match `selector` or loading
    /// stalls; returns the number of elements matched at the end.
    pub async fn scroll_load_selector(
        &self,
        selector: &str,
        threshold: Option<u64>,
        scroll_step: Option<i64>,
        settle: Duration,
        stability_threshold: u32,
    ) -> Result<usize, InteractError> {
        let target = CountTarget {
            selector: selector.to_owned(),
            count: threshold,
        };
        let mut opts = LoadOptions::default()
            .with_settle(settle)
            .with_stability_threshold(stability_threshold)
            .with_target(target);
        opts.scroll_step = scroll_step;

        let outcome = self.loader.run(opts).await?;
        Ok(outcome.element_count())
    }
}
