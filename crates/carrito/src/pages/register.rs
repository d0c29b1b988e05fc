//! The account registration screen.

use std::time::Duration;

use crate::browser::Page;
use crate::data::RegistrationRecord;
use crate::interactions::{ClickOptions, Interactions};
use crate::locator::{AriaRole, Locator};
use crate::result::CarritoResult;

/// The registration form. Terminal state of the register flow.
#[derive(Debug)]
pub struct RegisterPage {
    ui: Interactions,
    first_name: Locator,
    last_name: Locator,
    email: Locator,
    telephone: Locator,
    password: Locator,
    confirm_password: Locator,
    newsletter_yes: Locator,
    newsletter_no: Locator,
    agree_checkbox: Locator,
    continue_button: Locator,
    success_msg: Locator,
}

impl RegisterPage {
    /// Bind a register page object to `page`.
    #[must_use]
    pub fn new(page: Page) -> Self {
        let ui = Interactions::new(page);
        Self::build(ui)
    }

    /// Bind with a custom facade default timeout.
    #[must_use]
    pub fn with_timeout(page: Page, timeout: Duration) -> Self {
        let ui = Interactions::new(page).with_default_timeout(timeout);
        Self::build(ui)
    }

    fn build(ui: Interactions) -> Self {
        Self {
            ui,
            first_name: Locator::role(AriaRole::Textbox, "First Name"),
            last_name: Locator::role(AriaRole::Textbox, "Last Name"),
            email: Locator::role(AriaRole::Textbox, "E-Mail"),
            telephone: Locator::role(AriaRole::Textbox, "Telephone"),
            // Two password fields; the plain "Password" one comes first
            password: Locator::role(AriaRole::Textbox, "Password").nth(0),
            confirm_password: Locator::role(AriaRole::Textbox, "Password Confirm"),
            newsletter_yes: Locator::role(AriaRole::Radio, "Yes"),
            newsletter_no: Locator::role(AriaRole::Radio, "No"),
            agree_checkbox: Locator::css(r#"[name="agree"]"#),
            continue_button: Locator::role(AriaRole::Button, "Continue"),
            success_msg: Locator::exact_text("Your Account Has Been Created!"),
        }
    }

    /// Fill and submit the registration form for one record, using `email`
    /// as the (unique per attempt) account address.
    ///
    /// Returns whether the success banner became visible — the caller
    /// asserts on this boolean.
    pub async fn register_user(
        &self,
        record: &RegistrationRecord,
        email: &str,
    ) -> CarritoResult<bool> {
        self.ui.fill(&self.first_name, &record.first_name).await?;
        self.ui.fill(&self.last_name, &record.last_name).await?;
        self.ui.fill(&self.email, email).await?;
        self.ui.fill(&self.telephone, &record.telephone).await?;
        self.ui.fill(&self.password, &record.password).await?;
        self.ui
            .fill(&self.confirm_password, &record.password)
            .await?;

        let newsletter = if record.subscribes_newsletter() {
            &self.newsletter_yes
        } else {
            &self.newsletter_no
        };
        self.ui.click(newsletter, ClickOptions::new()).await?;

        self.ui.click(&self.agree_checkbox, ClickOptions::new()).await?;
        self.ui.click(&self.continue_button, ClickOptions::new()).await?;

        self.ui.is_visible(&self.success_msg).await
    }
}
