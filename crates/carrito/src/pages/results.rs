//! The search results screen.

use std::time::Duration;

use crate::browser::Page;
use crate::interactions::{ClickOptions, Interactions};
use crate::locator::{AriaRole, Locator};
use crate::pages::ProductInfoPage;
use crate::result::CarritoResult;

/// Search results for one query.
#[derive(Debug)]
pub struct ResultsPage {
    page: Page,
    ui: Interactions,
    results: Locator,
}

impl ResultsPage {
    /// Bind a results page object to `page`.
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
            results: Locator::css(".product-thumb"),
        }
    }

    /// Number of product tiles currently shown. Zero matches is a count of
    /// zero, never an error.
    pub async fn search_results_count(&self) -> CarritoResult<usize> {
        self.ui.count(&self.results).await
    }

    /// Open the product with the given link text.
    pub async fn select_product(&self, product_name: &str) -> CarritoResult<ProductInfoPage> {
        tracing::info!(product_name, "selecting product");
        self.ui
            .click(
                &Locator::role(AriaRole::Link, product_name),
                ClickOptions::new(),
            )
            .await?;
        Ok(ProductInfoPage::with_timeout(
            self.page.clone(),
            self.ui.default_timeout(),
        ))
    }
}
