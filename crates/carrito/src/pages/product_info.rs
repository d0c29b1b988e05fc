//! The product detail screen and its scraped-detail container.
//!
//! Product metadata on this screen is free-text "Label: Value" lines, so the
//! detail container is an ordered key/value map with dynamic keys; the keys
//! that are stable across products get named accessors. Scrape parsing is an
//! explicit step returning [`crate::CarritoError::MalformedContent`] so specs
//! can assert on bad content instead of crashing on a slice index.

use std::time::Duration;

use crate::browser::Page;
use crate::interactions::Interactions;
use crate::locator::Locator;
use crate::result::{CarritoError, CarritoResult};

/// Synthetic key for the product header.
pub const KEY_HEADER: &str = "header";
/// Synthetic key for the image count.
pub const KEY_IMAGE_COUNT: &str = "imagecount";
/// Synthetic key for the displayed price.
pub const KEY_PRICE: &str = "price";
/// Synthetic key for the ex-tax price.
pub const KEY_EX_TAX_PRICE: &str = "extaxprice";

/// Ordered key/value container for one product-detail fetch.
///
/// Keys scraped from the page (e.g. `Brand`, `Reward Points`) are dynamic;
/// only the named-accessor keys are invariant in presence. Built once per
/// fetch, never merged across fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    entries: Vec<(String, String)>,
}

impl ProductDetails {
    /// Create an empty detail map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Named accessors for the known-stable keys.

    /// The product header.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.get(KEY_HEADER)
    }

    /// The number of product images.
    #[must_use]
    pub fn image_count(&self) -> Option<usize> {
        self.get(KEY_IMAGE_COUNT).and_then(|v| v.parse().ok())
    }

    /// The scraped brand.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.get("Brand")
    }

    /// The scraped product code.
    #[must_use]
    pub fn product_code(&self) -> Option<&str> {
        self.get("Product Code")
    }

    /// The scraped reward points.
    #[must_use]
    pub fn reward_points(&self) -> Option<&str> {
        self.get("Reward Points")
    }

    /// The scraped availability.
    #[must_use]
    pub fn availability(&self) -> Option<&str> {
        self.get("Availability")
    }

    /// The displayed price.
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.get(KEY_PRICE)
    }

    /// The ex-tax price.
    #[must_use]
    pub fn ex_tax_price(&self) -> Option<&str> {
        self.get(KEY_EX_TAX_PRICE)
    }
}

/// Parse one "Label: Value" metadata line, trimming both sides.
///
/// # Errors
///
/// Returns [`CarritoError::MalformedContent`] when the line has no colon.
pub fn parse_metadata_line(line: &str) -> CarritoResult<(String, String)> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| CarritoError::malformed("product metadata line", line))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Parse the pricing block: line 0 is the price, line 1 is "Ex Tax: <price>".
///
/// # Errors
///
/// Returns [`CarritoError::MalformedContent`] when the block has fewer than
/// two lines or the ex-tax line has no colon.
pub fn parse_pricing_block(lines: &[String]) -> CarritoResult<(String, String)> {
    if lines.len() < 2 {
        return Err(CarritoError::malformed(
            "product pricing block",
            lines.join("\n"),
        ));
    }
    let price = lines[0].trim().to_string();
    let (_, ex_tax) = lines[1]
        .split_once(':')
        .ok_or_else(|| CarritoError::malformed("product pricing line", lines[1].as_str()))?;
    Ok((price, ex_tax.trim().to_string()))
}

/// The product detail screen, reached by selecting a search result.
#[derive(Debug)]
pub struct ProductInfoPage {
    ui: Interactions,
    header: Locator,
    images: Locator,
    metadata: Locator,
    pricing: Locator,
}

impl ProductInfoPage {
    /// Bind a product detail page object to `page`.
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
            header: Locator::css("h1"),
            images: Locator::css("div#content img"),
            metadata: Locator::xpath("(//div[@id='content']//ul[@class='list-unstyled'])[1]/li"),
            pricing: Locator::xpath("(//div[@id='content']//ul[@class='list-unstyled'])[2]/li"),
        }
    }

    /// The product header text.
    pub async fn product_header(&self) -> CarritoResult<String> {
        let header = self.ui.get_inner_text(&self.header).await?;
        tracing::info!(header, "product header");
        Ok(header)
    }

    /// The number of product images shown.
    pub async fn product_images_count(&self) -> CarritoResult<usize> {
        self.ui.wait_for_element_visible(&self.images, None).await;
        let count = self.ui.count(&self.images).await?;
        tracing::info!(count, "product image count");
        Ok(count)
    }

    /// Aggregate header, image count, parsed metadata, and parsed pricing
    /// into one detail map.
    pub async fn product_details(&self) -> CarritoResult<ProductDetails> {
        let mut details = ProductDetails::new();
        details.insert(KEY_HEADER, self.product_header().await?);
        details.insert(
            KEY_IMAGE_COUNT,
            self.product_images_count().await?.to_string(),
        );

        for line in self.ui.get_all_inner_texts(&self.metadata).await? {
            let (key, value) = parse_metadata_line(&line)?;
            details.insert(key, value);
        }

        let pricing = self.ui.get_all_inner_texts(&self.pricing).await?;
        let (price, ex_tax) = parse_pricing_block(&pricing)?;
        details.insert(KEY_PRICE, price);
        details.insert(KEY_EX_TAX_PRICE, ex_tax);

        for (key, value) in details.iter() {
            tracing::debug!(key, value, "product detail");
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod metadata_parse_tests {
        use super::*;

        #[test]
        fn test_parse_trims_both_sides() {
            let (key, value) = parse_metadata_line("Brand: Apple").unwrap();
            assert_eq!(key, "Brand");
            assert_eq!(value, "Apple");

            let (key, value) = parse_metadata_line("  Reward Points :  800  ").unwrap();
            assert_eq!(key, "Reward Points");
            assert_eq!(value, "800");
        }

        #[test]
        fn test_parse_keeps_value_after_first_colon() {
            let (key, value) = parse_metadata_line("Ships: 9:00 AM").unwrap();
            assert_eq!(key, "Ships");
            assert_eq!(value, "9:00 AM");
        }

        #[test]
        fn test_missing_colon_is_malformed_not_a_panic() {
            let err = parse_metadata_line("Brand Apple").unwrap_err();
            assert!(matches!(err, CarritoError::MalformedContent { .. }));
        }

        #[test]
        fn test_empty_value_is_accepted() {
            let (key, value) = parse_metadata_line("Availability:").unwrap();
            assert_eq!(key, "Availability");
            assert_eq!(value, "");
        }
    }

    mod pricing_parse_tests {
        use super::*;

        #[test]
        fn test_parse_two_line_block() {
            let lines = vec!["$2,000.00".to_string(), "Ex Tax: $2,000.00".to_string()];
            let (price, ex_tax) = parse_pricing_block(&lines).unwrap();
            assert_eq!(price, "$2,000.00");
            assert_eq!(ex_tax, "$2,000.00");
        }

        #[test]
        fn test_short_block_is_malformed() {
            let lines = vec!["$2,000.00".to_string()];
            let err = parse_pricing_block(&lines).unwrap_err();
            assert!(matches!(err, CarritoError::MalformedContent { .. }));
        }

        #[test]
        fn test_empty_block_is_malformed() {
            let err = parse_pricing_block(&[]).unwrap_err();
            assert!(matches!(err, CarritoError::MalformedContent { .. }));
        }

        #[test]
        fn test_ex_tax_line_without_colon_is_malformed() {
            let lines = vec!["$2,000.00".to_string(), "Ex Tax $2,000.00".to_string()];
            let err = parse_pricing_block(&lines).unwrap_err();
            assert!(matches!(err, CarritoError::MalformedContent { .. }));
        }
    }

    mod details_tests {
        use super::*;

        fn macbook_pro() -> ProductDetails {
            let mut details = ProductDetails::new();
            details.insert(KEY_HEADER, "MacBook Pro");
            details.insert(KEY_IMAGE_COUNT, "4");
            details.insert("Brand", "Apple");
            details.insert("Product Code", "Product 18");
            details.insert("Reward Points", "800");
            details.insert("Availability", "Out Of Stock");
            details.insert(KEY_PRICE, "$2,000.00");
            details.insert(KEY_EX_TAX_PRICE, "$2,000.00");
            details
        }

        #[test]
        fn test_named_accessors() {
            let details = macbook_pro();
            assert_eq!(details.header(), Some("MacBook Pro"));
            assert_eq!(details.image_count(), Some(4));
            assert_eq!(details.brand(), Some("Apple"));
            assert_eq!(details.product_code(), Some("Product 18"));
            assert_eq!(details.reward_points(), Some("800"));
            assert_eq!(details.availability(), Some("Out Of Stock"));
            assert_eq!(details.price(), Some("$2,000.00"));
            assert_eq!(details.ex_tax_price(), Some("$2,000.00"));
        }

        #[test]
        fn test_dynamic_keys_preserve_insertion_order() {
            let details = macbook_pro();
            let keys: Vec<&str> = details.iter().map(|(k, _)| k).collect();
            assert_eq!(keys[0], KEY_HEADER);
            assert_eq!(keys[1], KEY_IMAGE_COUNT);
            assert_eq!(keys[2], "Brand");
        }

        #[test]
        fn test_insert_replaces_existing_key() {
            let mut details = macbook_pro();
            details.insert("Availability", "In Stock");
            assert_eq!(details.availability(), Some("In Stock"));
            assert_eq!(details.len(), 8);
        }

        #[test]
        fn test_missing_key_is_none() {
            let details = ProductDetails::new();
            assert!(details.is_empty());
            assert_eq!(details.get("Brand"), None);
            assert_eq!(details.image_count(), None);
        }
    }
}
