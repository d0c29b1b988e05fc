//! Element interaction facade.
//!
//! Every DOM interaction in the suite funnels through [`Interactions`]: one
//! timeout policy, one log format, one place to change if the automation
//! backend is ever swapped. Actions auto-wait by polling the page until the
//! element is actionable or the timeout expires; queries wait for the element
//! to be queryable and then return content (which may legitimately be absent).
//!
//! The explicit `wait_for_element_*` helpers are the single place a timeout
//! is converted into a `bool` instead of an error.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::browser::Page;
use crate::locator::Locator;
use crate::result::{CarritoError, CarritoResult};

/// Default timeout for interactions and queries (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for the explicit wait helpers (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default inter-keystroke delay for human-like typing (500ms)
pub const DEFAULT_TYPE_DELAY_MS: u64 = 500;

/// Polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for click-style interactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickOptions {
    /// Skip the actionability (visible + enabled) guard
    pub force: bool,
    /// Override the facade default timeout
    pub timeout: Option<Duration>,
}

impl ClickOptions {
    /// Default options: guarded click, facade default timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            force: false,
            timeout: None,
        }
    }

    /// Force the click past the actionability guard.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Override the timeout for this click only.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Page load states accepted by [`Interactions::wait_for_page_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The `load` event has fired
    Load,
    /// The DOM is parsed (`DOMContentLoaded`)
    DomContentLoaded,
    /// The load event has fired and the network has gone quiet
    NetworkIdle,
}

#[derive(Debug, Clone, Copy)]
enum ClickKind {
    Single,
    Double,
    Right,
}

impl ClickKind {
    const fn action(self) -> &'static str {
        match self {
            Self::Single => "click",
            Self::Double => "double click",
            Self::Right => "right click",
        }
    }

    const fn dispatch_js(self) -> &'static str {
        match self {
            Self::Single => "el.click();",
            Self::Double => {
                "el.dispatchEvent(new MouseEvent('dblclick', { bubbles: true, cancelable: true, view: window }));"
            }
            Self::Right => {
                "el.dispatchEvent(new MouseEvent('contextmenu', { bubbles: true, cancelable: true, view: window }));"
            }
        }
    }
}

/// Decoded result of a query probe: `found` distinguishes "element absent"
/// from "element present with absent content".
#[derive(Debug, Deserialize)]
struct Probe<T> {
    found: bool,
    value: Option<T>,
}

// Visibility check shared by guards and probes.
const VISIBLE_JS: &str = "const r = el.getBoundingClientRect(); \
    const s = window.getComputedStyle(el); \
    const visible = r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none';";

fn click_script(locator: &Locator, kind: ClickKind, force: bool) -> String {
    let resolve = locator.to_resolve_query();
    let guard = if force {
        String::new()
    } else {
        format!("{VISIBLE_JS} if (!visible || el.disabled === true) return 'blocked';")
    };
    let dispatch = kind.dispatch_js();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return 'missing'; {guard} \
         el.scrollIntoView({{ block: 'center' }}); {dispatch} return 'ok'; }})()"
    )
}

fn fill_script(locator: &Locator, text: &str) -> String {
    let resolve = locator.to_resolve_query();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return 'missing'; \
         if (el.disabled === true || el.readOnly === true) return 'blocked'; \
         const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
         const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
         if (desc && desc.set) {{ desc.set.call(el, {text:?}); }} else {{ el.value = {text:?}; }} \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return 'ok'; }})()"
    )
}

fn append_char_script(locator: &Locator, ch: char) -> String {
    let resolve = locator.to_resolve_query();
    let ch = ch.to_string();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return 'missing'; \
         const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
         const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
         const next = el.value + {ch:?}; \
         if (desc && desc.set) {{ desc.set.call(el, next); }} else {{ el.value = next; }} \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         return 'ok'; }})()"
    )
}

fn focus_script(locator: &Locator) -> String {
    let resolve = locator.to_resolve_query();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return 'missing'; \
         if (el.disabled === true || el.readOnly === true) return 'blocked'; \
         el.focus(); return 'ok'; }})()"
    )
}

fn probe_script(locator: &Locator, value_expr: &str) -> String {
    let resolve = locator.to_resolve_query();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return {{ found: false, value: null }}; \
         return {{ found: true, value: {value_expr} }}; }})()"
    )
}

fn state_script(locator: &Locator, state_expr: &str) -> String {
    let resolve = locator.to_resolve_query();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return {{ found: false, value: null }}; \
         {VISIBLE_JS} return {{ found: true, value: {state_expr} }}; }})()"
    )
}

fn select_script(locator: &Locator, match_expr: &str) -> String {
    let resolve = locator.to_resolve_query();
    format!(
        "(() => {{ const el = {resolve}; if (!el) return 'missing'; \
         if (!(el instanceof HTMLSelectElement)) return 'blocked'; \
         const opts = Array.from(el.options); \
         const idx = {match_expr}; \
         if (idx < 0 || idx >= opts.length) return 'nomatch'; \
         el.selectedIndex = idx; \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return 'ok'; }})()"
    )
}

/// Uniform, logged, timeout-bounded primitive actions over located elements.
///
/// The default timeout is instance-scoped (constructor-supplied), never a
/// process-wide global. Page objects propagate it across navigation.
#[derive(Debug, Clone)]
pub struct Interactions {
    page: Page,
    default_timeout: Duration,
}

impl Interactions {
    /// Create a facade with the standard 30 second default timeout.
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Create a facade with a custom default timeout.
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The instance-scoped default timeout.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// The page handle this facade drives.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    // ------------------------------------------------------------------
    // actions
    // ------------------------------------------------------------------

    /// Click an element, waiting for it to become actionable.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::ActionTimeout`] if the element never becomes
    /// actionable within the timeout.
    pub async fn click(&self, locator: &Locator, options: ClickOptions) -> CarritoResult<()> {
        self.click_kind(locator, ClickKind::Single, options).await
    }

    /// Double-click an element.
    pub async fn double_click(&self, locator: &Locator) -> CarritoResult<()> {
        self.click_kind(locator, ClickKind::Double, ClickOptions::new())
            .await
    }

    /// Right-click an element.
    pub async fn right_click(&self, locator: &Locator) -> CarritoResult<()> {
        self.click_kind(locator, ClickKind::Right, ClickOptions::new())
            .await
    }

    async fn click_kind(
        &self,
        locator: &Locator,
        kind: ClickKind,
        options: ClickOptions,
    ) -> CarritoResult<()> {
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let script = click_script(locator, kind, options.force);
        self.run_to_ok(kind.action(), locator, timeout, &script)
            .await?;
        tracing::debug!(%locator, action = kind.action(), "clicked");
        Ok(())
    }

    /// Replace a field's content with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::ActionTimeout`] if the field is not fillable
    /// within the timeout.
    pub async fn fill(&self, locator: &Locator, text: &str) -> CarritoResult<()> {
        let script = fill_script(locator, text);
        self.run_to_ok("fill", locator, self.default_timeout, &script)
            .await?;
        tracing::debug!(%locator, text, "filled");
        Ok(())
    }

    /// Send keystrokes one at a time with an inter-key delay to emulate
    /// human input. `delay` defaults to [`DEFAULT_TYPE_DELAY_MS`] when `None`.
    pub async fn type_text(
        &self,
        locator: &Locator,
        text: &str,
        delay: Option<Duration>,
    ) -> CarritoResult<()> {
        let delay = delay.unwrap_or(Duration::from_millis(DEFAULT_TYPE_DELAY_MS));
        let script = focus_script(locator);
        self.run_to_ok("type", locator, self.default_timeout, &script)
            .await?;

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }
            let script = append_char_script(locator, ch);
            let status: String = self.page.eval(&script).await?;
            if status != "ok" {
                return Err(CarritoError::Eval {
                    message: format!("element {locator} went away while typing"),
                });
            }
        }
        tracing::debug!(%locator, text, "typed");
        Ok(())
    }

    /// Empty a field's value.
    pub async fn clear(&self, locator: &Locator) -> CarritoResult<()> {
        let script = fill_script(locator, "");
        self.run_to_ok("clear", locator, self.default_timeout, &script)
            .await?;
        tracing::debug!(%locator, "cleared");
        Ok(())
    }

    // ------------------------------------------------------------------
    // queries
    // ------------------------------------------------------------------

    /// Text content of the element, or `None` when the element resolves but
    /// carries no text.
    pub async fn get_text(&self, locator: &Locator) -> CarritoResult<Option<String>> {
        let script = probe_script(locator, "el.textContent");
        self.probe_value("get text", locator, &script).await
    }

    /// Rendered (inner) text of the element, trimmed.
    pub async fn get_inner_text(&self, locator: &Locator) -> CarritoResult<String> {
        let script = probe_script(locator, "el.innerText");
        let text: Option<String> = self.probe_value("get inner text", locator, &script).await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    /// Value of attribute `name`, or `None` when the attribute is absent.
    pub async fn get_attribute_value(
        &self,
        locator: &Locator,
        name: &str,
    ) -> CarritoResult<Option<String>> {
        let script = probe_script(locator, &format!("el.getAttribute({name:?})"));
        self.probe_value("get attribute", locator, &script).await
    }

    /// Current value of an input field.
    pub async fn get_input_value(&self, locator: &Locator) -> CarritoResult<Option<String>> {
        let script = probe_script(locator, "('value' in el) ? el.value : null");
        self.probe_value("get input value", locator, &script).await
    }

    /// Rendered text of every current match, in document order. Empty when
    /// nothing matches; does not wait.
    pub async fn get_all_inner_texts(&self, locator: &Locator) -> CarritoResult<Vec<String>> {
        let all = locator.selector().to_all_query();
        let script = format!("({all}).map(el => el.innerText)");
        self.page.eval(&script).await
    }

    /// Number of current matches. Does not wait; zero matches is a count of
    /// zero, not an error.
    pub async fn count(&self, locator: &Locator) -> CarritoResult<usize> {
        self.page.eval(&locator.to_count_query()).await
    }

    // ------------------------------------------------------------------
    // state probes
    // ------------------------------------------------------------------

    /// Whether the element is visible. Waits up to the default timeout for
    /// the element to attach; an element that never appears is `false`, not
    /// an error.
    pub async fn is_visible(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "visible", false).await
    }

    /// Non-blocking visibility snapshot: the state right now, no waiting.
    pub async fn is_visible_now(&self, locator: &Locator) -> CarritoResult<bool> {
        let script = state_script(locator, "visible");
        let probe: Probe<bool> = self.page.eval(&script).await?;
        Ok(probe.found && probe.value.unwrap_or(false))
    }

    /// Whether the element is hidden (or absent entirely).
    pub async fn is_hidden(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "!visible", true).await
    }

    /// Whether the element is enabled.
    pub async fn is_enabled(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "el.disabled !== true", false).await
    }

    /// Whether the element is disabled.
    pub async fn is_disabled(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "el.disabled === true", false).await
    }

    /// Whether a radio/checkbox element is checked.
    pub async fn is_checked(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "el.checked === true", false).await
    }

    /// Whether the element accepts text input.
    pub async fn is_editable(&self, locator: &Locator) -> CarritoResult<bool> {
        self.state_probe(locator, "el.disabled !== true && el.readOnly !== true", false)
            .await
    }

    /// Poll until the element attaches, then report `state_expr`. An element
    /// that never attaches yields `absent_value`.
    async fn state_probe(
        &self,
        locator: &Locator,
        state_expr: &str,
        absent_value: bool,
    ) -> CarritoResult<bool> {
        let script = state_script(locator, state_expr);
        let deadline = Instant::now() + self.default_timeout;
        loop {
            let probe: Probe<bool> = self.page.eval(&script).await?;
            if probe.found {
                return Ok(probe.value.unwrap_or(false));
            }
            if Instant::now() >= deadline {
                return Ok(absent_value);
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }

    // ------------------------------------------------------------------
    // explicit waits
    // ------------------------------------------------------------------

    /// Wait for the element to become visible. Returns `false` (never an
    /// error) when the timeout expires. `timeout` defaults to
    /// [`DEFAULT_WAIT_TIMEOUT_MS`] when `None`.
    pub async fn wait_for_element_visible(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> bool {
        self.wait_for_state(locator, "visible", timeout).await
    }

    /// Wait for the element to attach to the DOM. Returns `false` (never an
    /// error) when the timeout expires.
    pub async fn wait_for_element_attached(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> bool {
        self.wait_for_state(locator, "true", timeout).await
    }

    async fn wait_for_state(
        &self,
        locator: &Locator,
        state_expr: &str,
        timeout: Option<Duration>,
    ) -> bool {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS));
        let script = state_script(locator, state_expr);
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.eval::<Probe<bool>>(&script).await {
                Ok(probe) if probe.found && probe.value.unwrap_or(false) => {
                    tracing::debug!(%locator, "wait satisfied");
                    return true;
                }
                // Element not there yet, or the page is mid-navigation:
                // keep polling until the deadline
                Ok(_) | Err(_) => {}
            }
            if Instant::now() >= deadline {
                tracing::debug!(%locator, "wait expired");
                return false;
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }

    /// Block until the page reaches the requested load state.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::ActionTimeout`] if the state is not reached
    /// within the default timeout.
    pub async fn wait_for_page_load(&self, state: LoadState) -> CarritoResult<()> {
        let accept: &[&str] = match state {
            LoadState::Load | LoadState::NetworkIdle => &["complete"],
            LoadState::DomContentLoaded => &["interactive", "complete"],
        };
        let deadline = Instant::now() + self.default_timeout;
        loop {
            let ready: String = self.page.eval("document.readyState").await?;
            if accept.contains(&ready.as_str()) {
                break;
            }
            if Instant::now() >= deadline {
                return Err(CarritoError::action_timeout(
                    "wait for page load",
                    "page",
                    self.default_timeout.as_millis() as u64,
                ));
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
        if state == LoadState::NetworkIdle {
            // readyState has no network-idle notion; give in-flight
            // requests a quiet window after load
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        tracing::debug!(?state, "page load state reached");
        Ok(())
    }

    /// Unconditional delay. Last resort — prefer the waits above.
    pub async fn sleep(&self, timeout: Duration) {
        tokio::time::sleep(timeout).await;
        tracing::debug!(ms = timeout.as_millis() as u64, "slept");
    }

    // ------------------------------------------------------------------
    // dropdown selection
    // ------------------------------------------------------------------

    /// Select a dropdown option by its visible label.
    pub async fn select_by_text(&self, locator: &Locator, text: &str) -> CarritoResult<()> {
        let script = select_script(locator, &format!("opts.findIndex(o => o.label.trim() === {text:?})"));
        self.run_to_ok("select by text", locator, self.default_timeout, &script)
            .await?;
        tracing::debug!(%locator, text, "selected option");
        Ok(())
    }

    /// Select a dropdown option by its underlying value.
    pub async fn select_by_value(&self, locator: &Locator, value: &str) -> CarritoResult<()> {
        let script = select_script(locator, &format!("opts.findIndex(o => o.value === {value:?})"));
        self.run_to_ok("select by value", locator, self.default_timeout, &script)
            .await?;
        tracing::debug!(%locator, value, "selected option");
        Ok(())
    }

    /// Select a dropdown option by position.
    pub async fn select_by_index(&self, locator: &Locator, index: usize) -> CarritoResult<()> {
        let script = select_script(locator, &format!("{index}"));
        self.run_to_ok("select by index", locator, self.default_timeout, &script)
            .await?;
        tracing::debug!(%locator, index, "selected option");
        Ok(())
    }

    // ------------------------------------------------------------------
    // polling plumbing
    // ------------------------------------------------------------------

    /// Run a status-returning action script until it reports `"ok"`.
    async fn run_to_ok(
        &self,
        action: &str,
        locator: &Locator,
        timeout: Duration,
        script: &str,
    ) -> CarritoResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let status: String = self.page.eval(script).await?;
            if status == "ok" {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(CarritoError::action_timeout(
                    action,
                    locator.to_string(),
                    timeout.as_millis() as u64,
                ));
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }

    /// Run a probe script until the element attaches, then hand back its
    /// (possibly absent) content.
    async fn probe_value<T: DeserializeOwned>(
        &self,
        action: &str,
        locator: &Locator,
        script: &str,
    ) -> CarritoResult<Option<T>> {
        let deadline = Instant::now() + self.default_timeout;
        loop {
            let probe: Probe<T> = self.page.eval(script).await?;
            if probe.found {
                return Ok(probe.value);
            }
            if Instant::now() >= deadline {
                return Err(CarritoError::action_timeout(
                    action,
                    locator.to_string(),
                    self.default_timeout.as_millis() as u64,
                ));
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    mod options_tests {
        use super::*;

        #[test]
        fn test_click_options_default() {
            let options = ClickOptions::new();
            assert!(!options.force);
            assert!(options.timeout.is_none());
        }

        #[test]
        fn test_click_options_builders() {
            let options = ClickOptions::new()
                .with_force(true)
                .with_timeout(Duration::from_secs(5));
            assert!(options.force);
            assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        }
    }

    mod script_tests {
        use super::*;

        #[test]
        fn test_guarded_click_checks_actionability() {
            let locator = Locator::css("button.btn");
            let script = click_script(&locator, ClickKind::Single, false);
            assert!(script.contains("'blocked'"));
            assert!(script.contains("el.click()"));
        }

        #[test]
        fn test_forced_click_skips_guard() {
            let locator = Locator::css("input[type=\"submit\"]");
            let script = click_script(&locator, ClickKind::Single, true);
            assert!(!script.contains("'blocked'"));
            assert!(script.contains("el.click()"));
        }

        #[test]
        fn test_double_click_dispatch() {
            let locator = Locator::css("div");
            let script = click_script(&locator, ClickKind::Double, false);
            assert!(script.contains("dblclick"));
        }

        #[test]
        fn test_right_click_dispatch() {
            let locator = Locator::css("div");
            let script = click_script(&locator, ClickKind::Right, false);
            assert!(script.contains("contextmenu"));
        }

        #[test]
        fn test_fill_uses_native_setter_and_events() {
            let locator = Locator::css("input#email");
            let script = fill_script(&locator, "user@test.com");
            assert!(script.contains("getOwnPropertyDescriptor"));
            assert!(script.contains("user@test.com"));
            assert!(script.contains("new Event('input'"));
            assert!(script.contains("new Event('change'"));
        }

        #[test]
        fn test_fill_quotes_text() {
            let locator = Locator::css("input");
            let script = fill_script(&locator, "it's \"quoted\"");
            // Rust debug formatting produces a valid JS string literal
            assert!(script.contains("\"it's \\\"quoted\\\"\""));
        }

        #[test]
        fn test_probe_reports_absence_distinctly() {
            let locator = Locator::css("h1");
            let script = probe_script(&locator, "el.textContent");
            assert!(script.contains("found: false"));
            assert!(script.contains("found: true"));
        }

        #[test]
        fn test_select_script_bounds_check() {
            let locator = Locator::css("select");
            let script = select_script(&locator, "2");
            assert!(script.contains("idx < 0 || idx >= opts.length"));
            assert!(script.contains("'nomatch'"));
        }
    }

    mod kind_tests {
        use super::*;

        #[test]
        fn test_action_names() {
            assert_eq!(ClickKind::Single.action(), "click");
            assert_eq!(ClickKind::Double.action(), "double click");
            assert_eq!(ClickKind::Right.action(), "right click");
        }
    }
}
