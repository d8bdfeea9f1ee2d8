//! Convergence behavior of the scroll loader against a simulated page.

mod sim;

use async_trait::async_trait;
use page_interactor::{
    CountTarget, InteractError, LoadOptions, ScrollLoader, StopReason, TickHook,
};
use sim::{SimState, SimulatedPage};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

fn fast() -> Duration {
    Duration::from_millis(1)
}

#[tokio::test]
async fn count_threshold_stops_after_exactly_five_checks() {
    let page = SimulatedPage::new(SimState {
        grow_per_query: 1,
        scroll_advance: 100,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page.clone());

    let outcome = loader
        .run(
            LoadOptions::default()
                .with_step(400)
                .with_settle(fast())
                .with_target(CountTarget::at_least("li.item", 5)),
        )
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::TargetReached);
    assert_eq!(outcome.ticks, 5);
    assert!(outcome.element_count() >= 5);

    // five count checks plus the single final re-query
    let queries = page
        .log_entries()
        .iter()
        .filter(|e| *e == "query_all")
        .count();
    assert_eq!(queries, 6);
}

#[tokio::test]
async fn offset_stability_stops_after_threshold_unchanged_ticks() {
    let page = SimulatedPage::new(SimState {
        scroll_advance: 0,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page);

    let outcome = loader
        .run(
            LoadOptions::default()
                .with_settle(fast())
                .with_stability_threshold(3),
        )
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::OffsetStable);
    // one baseline tick plus three consecutive unchanged ticks
    assert_eq!(outcome.ticks, 4);
    assert!(outcome.elements.is_empty());
}

#[tokio::test]
async fn stability_wins_regardless_of_an_unmet_count_target() {
    let page = SimulatedPage::new(SimState {
        element_count: 0,
        scroll_advance: 0,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page);

    let outcome = loader
        .run(
            LoadOptions::default()
                .with_settle(fast())
                .with_stability_threshold(2)
                .with_target(CountTarget::at_least("li.never", 1)),
        )
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::OffsetStable);
    assert!(outcome.elements.is_empty());
}

#[tokio::test]
async fn count_stall_stops_when_configured() {
    let page = SimulatedPage::new(SimState {
        element_count: 3,
        grow_per_query: 0,
        scroll_advance: 100,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page);

    let outcome = loader
        .run(
            LoadOptions::default()
                .with_settle(fast())
                .with_target(CountTarget::observe("li.item"))
                .with_count_stall_threshold(2),
        )
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::CountStalled);
    assert_eq!(outcome.element_count(), 3);
}

struct LabelHook {
    label: &'static str,
    delay: Duration,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl TickHook for LabelHook {
    async fn on_tick(&self, _tick: u64) -> Result<(), InteractError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.log.lock().unwrap().push(format!("hook:{}", self.label));
        Ok(())
    }
}

#[tokio::test]
async fn hooks_run_in_order_and_complete_before_sampling() {
    let page = SimulatedPage::new(SimState {
        scroll_advance: 0,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page.clone());

    let log = page.log.clone();
    let hook_a = Arc::new(LabelHook {
        label: "A",
        delay: Duration::ZERO,
        log: log.clone(),
    });
    // B suspends; it must still land before the tick's offset sample
    let hook_b = Arc::new(LabelHook {
        label: "B",
        delay: Duration::from_millis(5),
        log,
    });

    loader
        .run(
            LoadOptions::default()
                .with_settle(fast())
                .with_stability_threshold(2)
                .with_hook(hook_a)
                .with_hook(hook_b),
        )
        .await
        .unwrap();

    let entries = page.log_entries();
    let interesting: Vec<&str> = entries
        .iter()
        .map(String::as_str)
        .filter(|e| e.starts_with("hook:") || *e == "eval:scroll_top" || *e == "eval:scroll_step")
        .collect();

    // every tick: scroll step, hook A, hook B, then the offset sample
    for chunk in interesting.chunks(4) {
        assert_eq!(chunk, ["eval:scroll_step", "hook:A", "hook:B", "eval:scroll_top"]);
    }
}

struct FailingHook;

#[async_trait]
impl TickHook for FailingHook {
    async fn on_tick(&self, _tick: u64) -> Result<(), InteractError> {
        Err(InteractError::Execution("hook exploded".into()))
    }
}

#[tokio::test]
async fn hook_errors_abort_the_load() {
    let page = SimulatedPage::new(SimState::default());
    let loader = ScrollLoader::new(page);

    let err = loader
        .run(
            LoadOptions::default()
                .with_settle(fast())
                .with_hook(Arc::new(FailingHook)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InteractError::Execution(_)));
}

#[tokio::test]
async fn pre_cancelled_token_aborts_immediately() {
    let page = SimulatedPage::new(SimState::default());
    let loader = ScrollLoader::new(page.clone());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = loader
        .run(LoadOptions::default().with_cancel(cancel))
        .await
        .unwrap_err();

    assert!(matches!(err, InteractError::Interrupted(_)));
    assert!(page.log_entries().is_empty());
}

#[tokio::test]
async fn cancellation_interrupts_a_long_settle() {
    let page = SimulatedPage::new(SimState {
        scroll_advance: 100,
        ..SimState::default()
    });
    let loader = ScrollLoader::new(page);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = loader
        .run(
            LoadOptions::default()
                .with_settle(Duration::from_secs(60))
                .with_cancel(cancel),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InteractError::Interrupted(_)));
    assert!(started.elapsed() < Duration::from_secs(10));
}
