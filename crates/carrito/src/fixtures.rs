//! Test fixtures: precondition setup for the specs.
//!
//! `logged_in_home` drives the login flow to hand each spec an authenticated
//! [`HomePage`]; `registration_data` supplies CSV-sourced records. Both are
//! single-use per test invocation — nothing is cached across tests, and each
//! test owns its own browser session.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::browser::{Browser, BrowserConfig, Page};
use crate::config::SuiteConfig;
use crate::data::{self, RegistrationRecord};
use crate::pages::{HomePage, LoginPage};
use crate::result::{CarritoError, CarritoResult};

/// Default location of the registration data file.
pub const REGISTER_CSV_PATH: &str = "data/register.csv";

/// One test's browser session: owns the browser and its single tab.
///
/// The suite never closes the page handle mid-test; teardown happens through
/// [`Session::close`] when the test is done with it.
#[derive(Debug)]
pub struct Session {
    browser: Browser,
    page: Page,
}

impl Session {
    /// Launch a browser per the suite configuration and open one tab.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::BrowserLaunch`] or [`CarritoError::Page`] on
    /// launch failure.
    pub async fn launch(config: &SuiteConfig) -> CarritoResult<Self> {
        let browser = Browser::launch(BrowserConfig::from_suite(config)).await?;
        let page = browser.new_page().await?;
        Ok(Self { browser, page })
    }

    /// A clone of the session's page handle.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page.clone()
    }

    /// Tear the session down.
    pub async fn close(self) -> CarritoResult<()> {
        self.browser.close().await
    }
}

/// Navigate to the login screen without authenticating.
///
/// For specs that exercise the login/registration flows themselves.
pub async fn login_page(config: &SuiteConfig) -> CarritoResult<(Session, LoginPage)> {
    let session = Session::launch(config).await?;
    let login = LoginPage::with_timeout(session.page(), config.default_timeout);
    login.goto(&config.base_url).await?;
    Ok((session, login))
}

/// The authenticated-session fixture: log in with the configured credentials
/// and hand over the resulting [`HomePage`].
///
/// # Errors
///
/// Returns [`CarritoError::Fixture`] if the logged-in indicator never shows
/// after the login attempt.
pub async fn logged_in_home(config: &SuiteConfig) -> CarritoResult<(Session, HomePage)> {
    let (session, login) = login_page(config).await?;
    let home = login.do_login(&config.username, &config.password).await?;
    if !home.is_user_logged_in().await? {
        return Err(CarritoError::Fixture {
            message: format!("login as {} did not reach the home page", config.username),
        });
    }
    Ok((session, home))
}

/// The CSV data fixture: registration records from `path`, or the default
/// [`REGISTER_CSV_PATH`] when `None`.
pub fn registration_data(path: Option<&Path>) -> CarritoResult<Vec<RegistrationRecord>> {
    data::load_registration_data(path.unwrap_or_else(|| Path::new(REGISTER_CSV_PATH)))
}

/// Install the suite's tracing subscriber. Safe to call from every test;
/// only the first call wins.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registration_data_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"firstName,lastName,telephone,password,subscribeNewsletter\n\
              Amy,Pond,1234567890,Sup3rSecret,Yes\n",
        )
        .unwrap();

        let records = registration_data(Some(file.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Amy");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
