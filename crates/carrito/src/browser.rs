//! Browser control over the Chrome DevTools Protocol.
//!
//! Wraps chromiumoxide's launch/page handles in the small surface the rest of
//! the suite needs: launch, open a page, navigate, evaluate JavaScript, close.
//! The page handle is cheaply cloneable and shared by reference across every
//! page object constructed during a test; the suite never closes it itself —
//! lifecycle belongs to the owning [`crate::fixtures::Session`].

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;

use crate::config::SuiteConfig;
use crate::result::{CarritoError, CarritoResult};

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Derive a browser configuration from the suite configuration.
    #[must_use]
    pub fn from_suite(config: &SuiteConfig) -> Self {
        Self {
            headless: config.headless,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            ..Self::default()
        }
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// A launched browser instance.
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: CdpBrowser,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::BrowserLaunch`] if the browser cannot be
    /// launched.
    pub async fn launch(config: BrowserConfig) -> CarritoResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| CarritoError::BrowserLaunch { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| CarritoError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Pump the CDP event stream until the connection drops
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        tracing::info!(headless = config.headless, "browser launched");

        Ok(Self {
            config,
            inner: browser,
            handle,
        })
    }

    /// Open a new blank page.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::Page`] if the page cannot be created.
    pub async fn new_page(&self) -> CarritoResult<Page> {
        let cdp_page =
            self.inner
                .new_page("about:blank")
                .await
                .map_err(|e| CarritoError::Page {
                    message: e.to_string(),
                })?;

        Ok(Page { inner: cdp_page })
    }

    /// Get the browser configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser.
    pub async fn close(mut self) -> CarritoResult<()> {
        self.inner
            .close()
            .await
            .map_err(|e| CarritoError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// One browser tab. Clones share the same underlying CDP session.
#[derive(Debug, Clone)]
pub struct Page {
    inner: CdpPage,
}

impl Page {
    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::Navigation`] if navigation fails.
    pub async fn goto(&self, url: &str) -> CarritoResult<()> {
        tracing::debug!(url, "navigating");
        self.inner
            .goto(url)
            .await
            .map_err(|e| CarritoError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Evaluate a JavaScript expression and decode its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::Eval`] if evaluation fails or the result
    /// cannot be decoded.
    pub async fn eval<T: DeserializeOwned>(&self, expr: &str) -> CarritoResult<T> {
        let result = self
            .inner
            .evaluate(expr)
            .await
            .map_err(|e| CarritoError::Eval {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| CarritoError::Eval {
            message: e.to_string(),
        })
    }

    /// The page's current document title.
    pub async fn title(&self) -> CarritoResult<String> {
        self.eval("document.title").await
    }

    /// The page's current URL.
    pub async fn url(&self) -> CarritoResult<String> {
        self.eval("window.location.href").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = BrowserConfig::default();
            assert!(config.headless);
            assert!(config.sandbox);
            assert!(config.chromium_path.is_none());
        }

        #[test]
        fn test_builder_chain() {
            let config = BrowserConfig::default()
                .with_headless(false)
                .with_viewport(800, 600)
                .with_chromium_path("/usr/bin/chromium")
                .with_no_sandbox();

            assert!(!config.headless);
            assert_eq!(config.viewport_width, 800);
            assert_eq!(config.viewport_height, 600);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
            assert!(!config.sandbox);
        }

        #[test]
        fn test_from_suite() {
            let suite = crate::config::SuiteConfig::default()
                .with_headless(true)
                .with_viewport(1280, 720);
            let config = BrowserConfig::from_suite(&suite);
            assert!(config.headless);
            assert_eq!(config.viewport_width, 1280);
            assert_eq!(config.viewport_height, 720);
        }
    }
}
