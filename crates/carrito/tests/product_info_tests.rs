//! Product detail specs: header, image count, scraped metadata, and pricing
//! for known catalog products on the live OpenCart storefront.
//!
//! Run with `cargo test -- --ignored` on a machine with chromium installed
//! and network access to the storefront.

use carrito::{fixtures, ProductInfoPage, SuiteConfig};

fn config() -> SuiteConfig {
    fixtures::init_logging();
    SuiteConfig::from_env().expect("suite configuration")
}

async fn open_product(
    home: &carrito::HomePage,
    search_key: &str,
    product_name: &str,
) -> ProductInfoPage {
    let results = home.do_search(search_key).await.expect("search flow");
    results
        .select_product(product_name)
        .await
        .expect("product selection")
}

// ============================================================================
// Header and Images
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_product_headers_match_catalog() {
    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    for (search_key, product_name) in [
        ("macbook", "MacBook Pro"),
        ("macbook", "MacBook Air"),
        ("samsung", "Samsung Galaxy Tab 10.1"),
    ] {
        let product = open_product(&home, search_key, product_name).await;
        let header = product.product_header().await.expect("product header");
        assert_eq!(header, product_name);
    }

    session.close().await.expect("teardown");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_product_image_counts_match_catalog() {
    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    for (search_key, product_name, expected_images) in [
        ("macbook", "MacBook Pro", 4),
        ("macbook", "MacBook Air", 4),
        ("samsung", "Samsung Galaxy Tab 10.1", 7),
    ] {
        let product = open_product(&home, search_key, product_name).await;
        let count = product.product_images_count().await.expect("image count");
        assert_eq!(count, expected_images, "image count for {product_name}");
    }

    session.close().await.expect("teardown");
}

// ============================================================================
// Scraped Details
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_macbook_pro_details() {
    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    let product = open_product(&home, "macbook", "MacBook Pro").await;
    let details = product.product_details().await.expect("product details");

    assert_eq!(details.header(), Some("MacBook Pro"));
    assert_eq!(details.image_count(), Some(4));
    assert_eq!(details.brand(), Some("Apple"));
    assert_eq!(details.product_code(), Some("Product 18"));
    assert_eq!(details.reward_points(), Some("800"));
    assert_eq!(details.availability(), Some("Out Of Stock"));
    assert_eq!(details.price(), Some("$2,000.00"));
    assert_eq!(details.ex_tax_price(), Some("$2,000.00"));

    session.close().await.expect("teardown");
}
