//! Search flow specs: result counts per keyword, including the zero-match
//! case, against the live OpenCart storefront.
//!
//! Run with `cargo test -- --ignored` on a machine with chromium installed
//! and network access to the storefront.

use carrito::{fixtures, HomePage, Locator, SuiteConfig};

fn config() -> SuiteConfig {
    fixtures::init_logging();
    SuiteConfig::from_env().expect("suite configuration")
}

async fn assert_search_count(home: &HomePage, search_key: &str, expected: usize) {
    let results = home.do_search(search_key).await.expect("search flow");
    let count = results.search_results_count().await.expect("result count");
    assert_eq!(count, expected, "result count for {search_key:?}");
}

// ============================================================================
// Result Counts
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_search_result_counts_per_keyword() {
    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    assert_search_count(&home, "macbook", 3).await;
    assert_search_count(&home, "samsung", 2).await;
    assert_search_count(&home, "imac", 1).await;
    assert_search_count(&home, "canon", 1).await;

    session.close().await.expect("teardown");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_search_with_no_matches_counts_zero() {
    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    assert_search_count(&home, "Dummy", 0).await;

    session.close().await.expect("teardown");
}

// ============================================================================
// Wait Semantics
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_wait_for_absent_element_returns_false() {
    use carrito::Interactions;
    use std::time::Duration;

    let config = config();
    let (session, home) = fixtures::logged_in_home(&config)
        .await
        .expect("authenticated session");

    let ui = Interactions::new(home.page().clone());
    let missing = Locator::css("#no-such-element-anywhere");
    let visible = ui
        .wait_for_element_visible(&missing, Some(Duration::from_millis(500)))
        .await;
    assert!(!visible, "absent element must report false, not error");

    session.close().await.expect("teardown");
}
