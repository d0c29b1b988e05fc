//! Suite configuration.
//!
//! Target URL, credentials, and timeouts come from the environment so the
//! same specs can run against QA or staging without code changes. Every value
//! has a builder-style override for programmatic use.

use std::time::Duration;

use crate::interactions::DEFAULT_TIMEOUT_MS;
use crate::result::{CarritoError, CarritoResult};

/// Default target: the public OpenCart demo storefront.
pub const DEFAULT_BASE_URL: &str = "https://naveenautomationlabs.com/opencart/index.php";

/// Configuration for one suite run.
///
/// Environment variables:
///
/// | Variable             | Meaning                          | Default                 |
/// |----------------------|----------------------------------|-------------------------|
/// | `CARRITO_BASE_URL`   | Storefront base URL              | public OpenCart demo    |
/// | `CARRITO_USERNAME`   | Account email for login flows    | demo account            |
/// | `CARRITO_PASSWORD`   | Account password                 | demo password           |
/// | `CARRITO_TIMEOUT_MS` | Facade default timeout           | 30000                   |
/// | `CI`                 | Any non-empty value = headless   | headed locally          |
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Storefront base URL (treated as an opaque string)
    pub base_url: String,
    /// Account email used by the authenticated-session fixture
    pub username: String,
    /// Account password used by the authenticated-session fixture
    pub password: String,
    /// Run the browser headless
    pub headless: bool,
    /// Default timeout applied to every facade interaction
    pub default_timeout: Duration,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::from("gagantyagi@test.com"),
            password: String::from("test@123"),
            headless: false,
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl SuiteConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::Config`] if `CARRITO_TIMEOUT_MS` is set but
    /// not a valid integer.
    pub fn from_env() -> CarritoResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CARRITO_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(user) = std::env::var("CARRITO_USERNAME") {
            config.username = user;
        }
        if let Ok(pass) = std::env::var("CARRITO_PASSWORD") {
            config.password = pass;
        }
        if let Ok(ms) = std::env::var("CARRITO_TIMEOUT_MS") {
            let ms: u64 = ms.parse().map_err(|_| CarritoError::Config {
                message: format!("CARRITO_TIMEOUT_MS must be an integer, got {ms:?}"),
            })?;
            config.default_timeout = Duration::from_millis(ms);
        }
        // Headless on CI, headed locally
        if std::env::var("CI").is_ok_and(|v| !v.is_empty()) {
            config.headless = true;
        }

        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the login credentials
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the facade default timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_timeout, Duration::from_millis(30_000));
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.viewport_height, 1080);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SuiteConfig::default()
            .with_base_url("http://localhost:8080/index.php")
            .with_credentials("qa@example.com", "secret")
            .with_headless(true)
            .with_default_timeout(Duration::from_secs(10))
            .with_viewport(800, 600);

        assert_eq!(config.base_url, "http://localhost:8080/index.php");
        assert_eq!(config.username, "qa@example.com");
        assert_eq!(config.password, "secret");
        assert!(config.headless);
        assert_eq!(config.default_timeout, Duration::from_secs(10));
        assert_eq!(config.viewport_width, 800);
    }
}
