//! A simulated page driver for exercising handlers and the scroll loader
//! without a browser. Behavior is keyed off the generated script text; every
//! observed operation is appended to a shared log so tests can assert
//! ordering.

use async_trait::async_trait;
use page_interactor::{ElementHandle, ExecutionSink, InteractError, PageDriver};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct SimState {
    /// Elements currently matching any selector query.
    pub element_count: usize,
    /// Growth applied on every `query_all` call (simulates content streaming
    /// in while the page is being observed).
    pub grow_per_query: usize,
    pub scroll_top: i64,
    /// Offset gained per scroll command; zero simulates a page that cannot
    /// scroll further.
    pub scroll_advance: i64,
    pub scroll_height: i64,
    /// Value currently held by the simulated input element.
    pub input_value: Option<String>,
    /// Number of initial `setAttribute` writes to silently drop (simulates a
    /// controlled input fighting the assignment).
    pub writes_to_ignore: u32,
    pub set_attr_calls: u32,
    /// Whether `wait_for_selector` resolves at all.
    pub selector_resolves: bool,
    /// Raw value returned for classList reads.
    pub class_list: Value,
    pub texts: Vec<String>,
    pub has_before: bool,
    pub has_after: bool,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            element_count: 0,
            grow_per_query: 0,
            scroll_top: 0,
            scroll_advance: 0,
            scroll_height: 10_000,
            input_value: None,
            writes_to_ignore: 0,
            set_attr_calls: 0,
            selector_resolves: true,
            class_list: json!({"0": "a", "1": "b"}),
            texts: Vec::new(),
            has_before: false,
            has_after: false,
        }
    }
}

pub struct SimulatedPage {
    pub state: Mutex<SimState>,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl SimulatedPage {
    pub fn new(state: SimState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            log: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn log_entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }

    /// Parse the two JSON string arguments out of a generated
    /// `setAttribute(...)` script.
    fn set_attr_args(script: &str) -> Option<(String, String)> {
        let start = script.find("setAttribute(")? + "setAttribute(".len();
        let args = script[start..].strip_suffix(')')?;
        let parsed: Vec<String> = serde_json::from_str(&format!("[{args}]")).ok()?;
        match parsed.as_slice() {
            [attr, value] => Some((attr.clone(), value.clone())),
            _ => None,
        }
    }
}

#[async_trait]
impl ExecutionSink for SimulatedPage {
    async fn evaluate(&self, script: &str) -> Result<Value, InteractError> {
        let mut state = self.state.lock().unwrap();

        if script.contains("window.scrollTo") || script.contains("window.scrollBy") {
            self.record("eval:scroll_step");
            state.scroll_top = (state.scroll_top + state.scroll_advance).min(state.scroll_height);
            return Ok(Value::Null);
        }
        if script == "document.body.scrollTop" {
            self.record("eval:scroll_top");
            return Ok(json!(state.scroll_top));
        }
        if script == "document.body.scrollHeight" {
            self.record("eval:scroll_height");
            return Ok(json!(state.scroll_height));
        }
        if script == "document.body.scrollWidth" || script == "document.body.scrollLeft" {
            self.record("eval:scroll_metric");
            return Ok(json!(0));
        }
        if script.contains(".setAttribute(") {
            self.record("eval:set_attr");
            state.set_attr_calls += 1;
            if state.set_attr_calls > state.writes_to_ignore {
                if let Some((_, value)) = Self::set_attr_args(script) {
                    state.input_value = Some(value);
                }
            }
            return Ok(Value::Null);
        }
        if script.contains(".getAttribute(") {
            self.record("eval:get_attr");
            return Ok(state
                .input_value
                .as_ref()
                .map_or(Value::Null, |v| json!(v)));
        }
        if script.contains("getComputedStyle") {
            self.record("eval:pseudo");
            let present = if script.contains("'::before'") {
                state.has_before
            } else {
                state.has_after
            };
            return Ok(json!(present));
        }
        if script.contains("Array.from") {
            self.record("eval:texts");
            return Ok(json!(state.texts));
        }
        if script.contains("?.textContent") {
            self.record("eval:text");
            return Ok(state
                .texts
                .first()
                .map_or(Value::Null, |t| json!(t)));
        }
        if script.contains("?.classList") {
            self.record("eval:class_list");
            return Ok(state.class_list.clone());
        }
        if script.contains("?.click()") {
            self.record("eval:click");
            return Ok(Value::Null);
        }

        self.record("eval:other");
        Ok(Value::Null)
    }
}

#[async_trait]
impl PageDriver for SimulatedPage {
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), InteractError> {
        self.record("wait_for_selector");
        let state = self.state.lock().unwrap();
        if state.selector_resolves {
            Ok(())
        } else {
            Err(InteractError::SelectorTimeout {
                selector: selector.to_owned(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn query_all(&self, _selector: &str) -> Result<Vec<ElementHandle>, InteractError> {
        self.record("query_all");
        let mut state = self.state.lock().unwrap();
        state.element_count += state.grow_per_query;
        Ok((0..state.element_count)
            .map(|i| ElementHandle::new(format!("el-{i}")))
            .collect())
    }

    async fn query_one(&self, selector: &str) -> Result<Option<ElementHandle>, InteractError> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    async fn wait_for_navigation(&self, _timeout: Duration) -> Result<(), InteractError> {
        self.record("wait_for_navigation");
        Ok(())
    }

    fn current_url(&self) -> String {
        "https://sim.test/feed".to_owned()
    }
}
