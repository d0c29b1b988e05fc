//! Registration flow specs: one registration per CSV record, each with a
//! fresh random email, against the live OpenCart storefront.
//!
//! Run with `cargo test -- --ignored` on a machine with chromium installed
//! and network access to the storefront.

use carrito::data::random_email;
use carrito::{fixtures, SuiteConfig};

fn config() -> SuiteConfig {
    fixtures::init_logging();
    SuiteConfig::from_env().expect("suite configuration")
}

// ============================================================================
// Data-Driven Registration
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires chromium and the live storefront"]
async fn test_register_every_csv_record() {
    let config = config();
    let records = fixtures::registration_data(None).expect("registration records");
    assert!(!records.is_empty(), "registration CSV must not be empty");

    for record in &records {
        let (session, login) = fixtures::login_page(&config).await.expect("login page");
        let register = login
            .navigate_to_register_page()
            .await
            .expect("register page");

        let created = register
            .register_user(record, &random_email())
            .await
            .expect("registration flow");
        assert!(
            created,
            "registration failed for {} {}",
            record.first_name, record.last_name
        );

        session.close().await.expect("teardown");
    }
}
