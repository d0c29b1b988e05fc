//! The storefront home screen, reached after login.

use std::time::Duration;

use crate::browser::Page;
use crate::interactions::{ClickOptions, Interactions};
use crate::locator::{AriaRole, Locator};
use crate::pages::{LoginPage, ResultsPage};
use crate::result::CarritoResult;

/// The home screen of an authenticated session.
#[derive(Debug)]
pub struct HomePage {
    page: Page,
    ui: Interactions,
    logout_link: Locator,
    login_link: Locator,
    search: Locator,
    search_icon: Locator,
}

impl HomePage {
    /// Bind a home page object to `page`.
    #[must_use]
    pub fn new(page: Page) -> Self {
        let ui = Interactions::new(page.clone());
        Self::build(page, ui)
    }

    /// Bind with a custom facade default timeout.
    #[must_use]
    pub fn with_timeout(page: Page, timeout: Duration) -> Self {
        let ui = Interactions::new(page.clone()).with_default_timeout(timeout);
        Self::build(page, ui)
    }

    fn build(page: Page, ui: Interactions) -> Self {
        Self {
            page,
            ui,
            logout_link: Locator::role(AriaRole::Link, "Logout"),
            login_link: Locator::role(AriaRole::Link, "Login"),
            search: Locator::role(AriaRole::Textbox, "Search"),
            search_icon: Locator::css("#search > span.input-group-btn > button.btn"),
        }
    }

    /// The logged-in indicator: visibility of the first Logout link.
    pub async fn is_user_logged_in(&self) -> CarritoResult<bool> {
        self.ui
            .is_visible(&self.logout_link.clone().nth(0))
            .await
    }

    /// Log out and return to the login screen.
    pub async fn logout(&self) -> CarritoResult<LoginPage> {
        let options = ClickOptions::new().with_timeout(Duration::from_secs(5));
        self.ui
            .click(&self.logout_link.clone().nth(1), options)
            .await?;
        self.ui
            .click(&self.login_link.clone().nth(1), options)
            .await?;
        Ok(LoginPage::with_timeout(
            self.page.clone(),
            self.ui.default_timeout(),
        ))
    }

    /// Run a storefront search and hand over the results screen.
    pub async fn do_search(&self, search_key: &str) -> CarritoResult<ResultsPage> {
        tracing::info!(search_key, "searching");
        self.ui.fill(&self.search, search_key).await?;
        self.ui.click(&self.search_icon, ClickOptions::new()).await?;
        Ok(ResultsPage::with_timeout(
            self.page.clone(),
            self.ui.default_timeout(),
        ))
    }

    /// The page handle, for title/url assertions in specs.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}
