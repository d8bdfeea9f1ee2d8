//! Convergence-detecting incremental loader.
//!
//! Repeatedly triggers page scrolling and decides, without ground truth on
//! page internals, when enough content has loaded or loading has stalled.
//! Three independent stopping conditions race, whichever fires first:
//! element-count threshold (a positive signal, used when the caller knows
//! how much it needs), scroll-offset stability (a negative signal: nothing
//! left to scroll), and an optional count-stall bound (growth has stopped
//! even though the page still scrolls).
//!
//! There is no hard iteration cap; a load against a genuinely infinite feed
//! is bounded only by its stopping conditions or its cancellation token.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::command::CommandHandler;
use crate::config::InteractConfig;
use crate::errors::InteractError;
use crate::handlers::ScrollHandler;
use crate::ports::{ElementHandle, PageDriver};

/// Side-effecting hook invoked once per tick, after the scroll step and
/// before the settle pause. Hooks run sequentially in registration order; a
/// suspending hook fully completes before the next tick's state sampling.
#[async_trait::async_trait]
pub trait TickHook: Send + Sync {
    async fn on_tick(&self, tick: u64) -> Result<(), InteractError>;
}

/// Element-count stopping target. With `count == None` the selector is only
/// counted (for logging and the final re-query), never used to stop early.
#[derive(Debug, Clone)]
pub struct CountTarget {
    pub selector: String,
    pub count: Option<u64>,
}

impl CountTarget {
    pub fn at_least(selector: impl Into<String>, count: u64) -> Self {
        Self {
            selector: selector.into(),
            count: Some(count),
        }
    }

    pub fn observe(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            count: None,
        }
    }
}

/// Options for one load invocation.
pub struct LoadOptions {
    /// Pixel displacement per tick; `None` jumps to the page bottom instead.
    pub scroll_step: Option<i64>,
    /// Pause after each tick before sampling state, letting the page's own
    /// lazy-loading JS react to the scroll.
    pub settle: Duration,
    /// Consecutive ticks with an unchanged scroll offset required to declare
    /// the content exhausted.
    pub stability_threshold: u32,
    /// Optional element-count target.
    pub target: Option<CountTarget>,
    /// Optional second stopping condition: consecutive count-checks with an
    /// unchanged element count required to declare growth stalled.
    pub count_stall_threshold: Option<u32>,
    /// Ordered per-tick hooks.
    pub hooks: Vec<Arc<dyn TickHook>>,
    /// Checked at every suspension point; cancelling aborts the load with
    /// [`InteractError::Interrupted`].
    pub cancel: CancellationToken,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            scroll_step: None,
            settle: Duration::from_millis(40),
            stability_threshold: 20,
            target: None,
            count_stall_threshold: None,
            hooks: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }
}

impl LoadOptions {
    pub fn with_step(mut self, pixels: i64) -> Self {
        self.scroll_step = Some(pixels);
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_stability_threshold(mut self, ticks: u32) -> Self {
        self.stability_threshold = ticks;
        self
    }

    pub fn with_target(mut self, target: CountTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_count_stall_threshold(mut self, checks: u32) -> Self {
        self.count_stall_threshold = Some(checks);
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn TickHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Why a load stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The element count reached the target.
    TargetReached,
    /// The scroll offset stayed unchanged for the stability threshold.
    OffsetStable,
    /// The element count stayed unchanged for the stall threshold.
    CountStalled,
}

/// Terminal result of one load invocation.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub reason: StopReason,
    /// Number of ticks executed, including the one that stopped the loop.
    pub ticks: u64,
    /// The final matching element set, re-queried once after the loop when a
    /// target selector was supplied; empty otherwise.
    pub elements: Vec<ElementHandle>,
}

impl LoadOutcome {
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// Mutable loop state, owned exclusively by one `run` invocation and
/// discarded at its end. Never shared across calls or pages.
struct LoadSession {
    ticks: u64,
    last_offset: Option<i64>,
    consecutive_unchanged: u32,
    last_observed_count: Option<u64>,
    stalled_checks: u32,
}

impl LoadSession {
    fn new() -> Self {
        Self {
            ticks: 0,
            last_offset: None,
            consecutive_unchanged: 0,
            last_observed_count: None,
            stalled_checks: 0,
        }
    }
}

/// Drives scrolling until one of the stopping conditions holds.
pub struct ScrollLoader {
    driver: Arc<dyn PageDriver>,
    scroll: ScrollHandler,
}

impl ScrollLoader {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        let sink: Arc<dyn crate::ports::ExecutionSink> = driver.clone();
        let scroll = ScrollHandler::new(driver.clone(), CommandHandler::new(sink));
        Self { driver, scroll }
    }

    /// Convenience: a loader whose per-tick settle defaults come from the
    /// interaction configuration (`quick_wait`).
    pub fn options_from(config: &InteractConfig) -> LoadOptions {
        LoadOptions {
            settle: config.quick_wait(),
            ..LoadOptions::default()
        }
    }

    /// Run one load session to completion.
    ///
    /// Per tick, in order: count check (and optional stall check), scroll
    /// advance, tick hooks in registration order, settle pause, offset
    /// stability check. Errors from any sub-call abort the loop and
    /// propagate; the session state is discarded.
    #[instrument(skip_all, fields(session = %Uuid::new_v4()))]
    pub async fn run(&self, opts: LoadOptions) -> Result<LoadOutcome, InteractError> {
        let mut session = LoadSession::new();

        info!(
            step = ?opts.scroll_step,
            settle_ms = opts.settle.as_millis() as u64,
            stability_threshold = opts.stability_threshold,
            target = ?opts.target,
            count_stall_threshold = ?opts.count_stall_threshold,
            "starting scroll load"
        );

        let reason = loop {
            self.ensure_live(&opts.cancel)?;
            session.ticks += 1;

            // 1. count check
            if let Some(target) = &opts.target {
                let count = self.scroll.count(&target.selector).await? as u64;
                debug!(
                    tick = session.ticks,
                    count,
                    last = ?session.last_observed_count,
                    "count check"
                );

                if let Some(goal) = target.count {
                    if count >= goal {
                        info!(count, goal, "count target reached, stop scrolling");
                        break StopReason::TargetReached;
                    }
                }

                if session.last_observed_count == Some(count) {
                    session.stalled_checks += 1;
                    if let Some(stall_threshold) = opts.count_stall_threshold {
                        if session.stalled_checks >= stall_threshold {
                            info!(count, checks = session.stalled_checks, "count growth stalled");
                            break StopReason::CountStalled;
                        }
                    }
                } else {
                    session.stalled_checks = 0;
                }
                session.last_observed_count = Some(count);
            }

            // 2. advance
            match opts.scroll_step {
                Some(step) => self.scroll.scroll_by(0, step).await?,
                None => self.scroll.scroll_to_bottom().await?,
            }

            // 3. tick hooks, sequentially, each awaited before the next
            for hook in &opts.hooks {
                hook.on_tick(session.ticks).await?;
                self.ensure_live(&opts.cancel)?;
            }

            // 4. settle
            tokio::select! {
                _ = opts.cancel.cancelled() => {
                    return Err(interrupted());
                }
                _ = sleep(opts.settle) => {}
            }

            // 5. stability check
            let offset = self.scroll.scroll_top().await?.round() as i64;
            if session.last_offset == Some(offset) {
                session.consecutive_unchanged += 1;
                debug!(
                    tick = session.ticks,
                    offset,
                    unchanged = session.consecutive_unchanged,
                    threshold = opts.stability_threshold,
                    "scroll offset unchanged"
                );
                if session.consecutive_unchanged >= opts.stability_threshold {
                    info!(offset, "scroll offset stable, content exhausted");
                    break StopReason::OffsetStable;
                }
            } else {
                session.consecutive_unchanged = 0;
            }
            session.last_offset = Some(offset);
        };

        // Matches can have been added after the last count check, so the
        // final set is re-queried once instead of reusing mid-loop samples.
        let elements = match &opts.target {
            Some(target) => self.driver.query_all(&target.selector).await?,
            None => Vec::new(),
        };

        info!(
            reason = ?reason,
            ticks = session.ticks,
            elements = elements.len(),
            "scroll load finished"
        );

        Ok(LoadOutcome {
            reason,
            ticks: session.ticks,
            elements,
        })
    }

    fn ensure_live(&self, cancel: &CancellationToken) -> Result<(), InteractError> {
        if cancel.is_cancelled() {
            Err(interrupted())
        } else {
            Ok(())
        }
    }
}

fn interrupted() -> InteractError {
    InteractError::Interrupted("scroll load cancelled".to_owned())
}
