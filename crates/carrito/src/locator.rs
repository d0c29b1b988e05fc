//! Locator abstraction for element selection.
//!
//! A [`Locator`] is a deferred query: building one performs no I/O and never
//! fails, even when nothing on the page matches. Cardinality is resolved only
//! at the moment of use — `nth` is an explicit `Option<usize>`, so "first of
//! several" (`None`) and "explicit index 0" (`Some(0)`) are distinct values
//! rather than an overloaded falsy check.
//!
//! Each selector compiles to a JavaScript expression evaluated over CDP; the
//! generated code is the only thing that touches the DOM.

use std::fmt;

/// ARIA roles the suite locates elements by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaRole {
    /// An anchor with an `href`
    Link,
    /// A button or submit/button input
    Button,
    /// A text-entry field
    Textbox,
    /// A radio input
    Radio,
    /// A checkbox input
    Checkbox,
}

impl AriaRole {
    /// CSS candidates for elements carrying this implicit role.
    #[must_use]
    pub const fn css_candidates(self) -> &'static str {
        match self {
            Self::Link => "a[href]",
            Self::Button => "button, input[type='submit'], input[type='button']",
            Self::Textbox => {
                "input:not([type='submit']):not([type='button']):not([type='checkbox']):not([type='radio']):not([type='hidden']), textarea"
            }
            Self::Radio => "input[type='radio']",
            Self::Checkbox => "input[type='checkbox']",
        }
    }

    /// Role name as it appears in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Button => "button",
            Self::Textbox => "textbox",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }
}

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Text content selector
    Text {
        /// Text to match
        text: String,
        /// Whole-string match instead of substring
        exact: bool,
    },
    /// ARIA role plus accessible name
    Role {
        /// The role
        role: AriaRole,
        /// Accessible name (case-insensitive whole-string match)
        name: String,
    },
}

/// Computes the accessible name of an element: aria-label, associated label,
/// placeholder, input value, then text content.
const ACCESSIBLE_NAME_JS: &str = r#"const accName = el => {
    const aria = el.getAttribute('aria-label');
    if (aria) return aria.trim();
    if (el.labels && el.labels.length > 0) return el.labels[0].textContent.trim();
    if (el.id) {
        const lab = document.querySelector('label[for="' + CSS.escape(el.id) + '"]');
        if (lab) return lab.textContent.trim();
    }
    const ph = el.getAttribute('placeholder');
    if (ph) return ph.trim();
    if (el.tagName === 'INPUT' && el.value) return el.value.trim();
    return (el.textContent || '').trim();
};"#;

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a substring text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: false,
        }
    }

    /// Create a whole-string text selector
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: true,
        }
    }

    /// Create a role selector with an accessible name
    #[must_use]
    pub fn role(role: AriaRole, name: impl Into<String>) -> Self {
        Self::Role {
            role,
            name: name.into(),
        }
    }

    /// JavaScript expression evaluating to an array of all current matches,
    /// in document order.
    #[must_use]
    pub fn to_all_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
                 return out; }})()"
            ),
            Self::Text { text, exact } => {
                let predicate = if *exact {
                    "el.textContent.trim() === want"
                } else {
                    "el.textContent.includes(want)"
                };
                let child_predicate = if *exact {
                    "c.textContent.trim() === want"
                } else {
                    "c.textContent.includes(want)"
                };
                // Deepest match only: discard elements whose descendants also match
                format!(
                    "(() => {{ const want = {text:?}; \
                     const m = Array.from(document.querySelectorAll('*')).filter(el => {predicate}); \
                     return m.filter(el => !Array.from(el.querySelectorAll('*')).some(c => {child_predicate})); }})()"
                )
            }
            Self::Role { role, name } => {
                let candidates = role.css_candidates();
                format!(
                    "(() => {{ {ACCESSIBLE_NAME_JS} const want = {name:?}.trim().toLowerCase(); \
                     return Array.from(document.querySelectorAll({candidates:?}))\
                     .filter(el => accName(el).toLowerCase() === want); }})()"
                )
            }
        }
    }

    /// JavaScript expression evaluating to the number of current matches.
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("({}).length", self.to_all_query())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Text { text, exact: true } => write!(f, "text={text:?}"),
            Self::Text { text, exact: false } => write!(f, "text*={text:?}"),
            Self::Role { role, name } => write!(f, "role={}[name={name:?}]", role.as_str()),
        }
    }
}

/// A deferred element query with explicit optional cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    nth: Option<usize>,
}

impl Locator {
    /// Create a locator from a CSS selector string.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator from an XPath expression.
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::xpath(selector))
    }

    /// Create a locator matching elements by substring text content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::text(text))
    }

    /// Create a locator matching elements by whole-string text content.
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::exact_text(text))
    }

    /// Create a locator matching by ARIA role and accessible name.
    #[must_use]
    pub fn role(role: AriaRole, name: impl Into<String>) -> Self {
        Self::from_selector(Selector::role(role, name))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
        }
    }

    /// Resolve to the first match (the default; provided for explicitness).
    #[must_use]
    pub const fn first(mut self) -> Self {
        self.nth = None;
        self
    }

    /// Resolve to the match at `index`. `nth(0)` is an explicit index, not
    /// an omitted one.
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the explicit index, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// JavaScript expression evaluating to the single concrete element this
    /// locator resolves to right now, or `null`. Construction only — absence
    /// of matches surfaces when the caller acts on the result.
    #[must_use]
    pub fn to_resolve_query(&self) -> String {
        let all = self.selector.to_all_query();
        let index = self.nth.unwrap_or(0);
        format!("(() => {{ const els = {all}; return els[{index}] ?? null; }})()")
    }

    /// JavaScript expression evaluating to the number of current matches.
    #[must_use]
    pub fn to_count_query(&self) -> String {
        self.selector.to_count_query()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nth {
            Some(i) => write!(f, "{}:nth({i})", self.selector),
            None => write!(f, "{}", self.selector),
        }
    }
}
