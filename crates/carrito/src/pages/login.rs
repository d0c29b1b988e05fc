//! The account login screen.

use std::time::Duration;

use crate::browser::Page;
use crate::interactions::{ClickOptions, Interactions};
use crate::locator::{AriaRole, Locator};
use crate::pages::{HomePage, RegisterPage};
use crate::result::CarritoResult;

/// The login screen. Entry point of every flow in the suite.
#[derive(Debug)]
pub struct LoginPage {
    page: Page,
    ui: Interactions,
    email: Locator,
    password: Locator,
    login_btn: Locator,
    warning: Locator,
    register_link: Locator,
}

impl LoginPage {
    /// Bind a login page object to `page`.
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
            email: Locator::role(AriaRole::Textbox, "E-Mail Address"),
            password: Locator::role(AriaRole::Textbox, "Password"),
            login_btn: Locator::css(r#"input[type="submit"][value="Login"]"#),
            warning: Locator::css(".alert.alert-danger.alert-dismissible"),
            register_link: Locator::exact_text("Register"),
        }
    }

    /// Navigate to the login route under `base_url`.
    pub async fn goto(&self, base_url: &str) -> CarritoResult<()> {
        self.page
            .goto(&format!("{base_url}?route=account/login"))
            .await
    }

    /// Log in with the given credentials and hand over the home page.
    ///
    /// The transition is constructed unconditionally; whether the login
    /// actually succeeded is observed through
    /// [`HomePage::is_user_logged_in`].
    pub async fn do_login(&self, email: &str, password: &str) -> CarritoResult<HomePage> {
        self.ui.fill(&self.email, email).await?;
        self.ui.fill(&self.password, password).await?;
        self.ui
            .click(
                &self.login_btn,
                ClickOptions::new()
                    .with_force(true)
                    .with_timeout(Duration::from_secs(5)),
            )
            .await?;
        Ok(HomePage::with_timeout(
            self.page.clone(),
            self.ui.default_timeout(),
        ))
    }

    /// The warning banner text after an invalid login attempt, if shown.
    pub async fn invalid_login_message(&self) -> CarritoResult<Option<String>> {
        let message = self.ui.get_text(&self.warning).await?;
        tracing::info!(?message, "invalid login warning");
        Ok(message)
    }

    /// Follow the register link to the account registration screen.
    pub async fn navigate_to_register_page(&self) -> CarritoResult<RegisterPage> {
        self.ui
            .click(
                &self.register_link.clone().nth(1),
                ClickOptions::new().with_force(true),
            )
            .await?;
        Ok(RegisterPage::with_timeout(
            self.page.clone(),
            self.ui.default_timeout(),
        ))
    }
}
