//! Carrito: end-to-end UI tests for the OpenCart demo storefront, driven
//! over the Chrome DevTools Protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     CARRITO Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────┐           │
//! │   │ Test Spec  │───►│ Page Objects │───►│ Headless   │           │
//! │   │ (tests/)   │    │ + Fixtures   │    │ Browser    │           │
//! │   └────────────┘    └──────┬───────┘    │ (chromium) │           │
//! │                            │            └─────▲──────┘           │
//! │                     ┌──────▼───────┐          │                  │
//! │                     │ Interactions │──────────┘                  │
//! │                     │ (facade)     │   CDP / JS evaluation       │
//! │                     └──────────────┘                             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every page-object method funnels DOM access through the [`Interactions`]
//! facade; the facade resolves elements through [`Locator`] queries. Specs
//! under `tests/` compose fixtures and page objects, assert on the returned
//! values, and never talk to the browser directly.
//!
//! # Example
//!
//! ```no_run
//! use carrito::{fixtures, SuiteConfig};
//!
//! # async fn run() -> carrito::CarritoResult<()> {
//! let config = SuiteConfig::from_env()?;
//! let (session, home) = fixtures::logged_in_home(&config).await?;
//!
//! let results = home.do_search("macbook").await?;
//! assert_eq!(results.search_results_count().await?, 3);
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod browser;
mod config;
mod interactions;
mod locator;
mod result;

pub mod data;
pub mod fixtures;
pub mod pages;

pub use browser::{Browser, BrowserConfig, Page};
pub use config::{SuiteConfig, DEFAULT_BASE_URL};
pub use interactions::{
    ClickOptions, Interactions, LoadState, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
    DEFAULT_TYPE_DELAY_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
pub use locator::{AriaRole, Locator, Selector};
pub use result::{CarritoError, CarritoResult};

pub use fixtures::Session;
pub use pages::{
    HomePage, LoginPage, ProductDetails, ProductInfoPage, RegisterPage, ResultsPage,
};
