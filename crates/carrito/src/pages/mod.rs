//! Page objects for the storefront.
//!
//! One type per screen. Each transition method returns the next screen's
//! type, bound to the same page handle, so an impossible flow (say, selecting
//! a product before searching) is a compile-time error rather than a runtime
//! null-reference failure. Page objects never cache or mutate one another's
//! locators; every DOM touch goes through [`crate::Interactions`].

mod home;
mod login;
mod product_info;
mod register;
mod results;

pub use home::HomePage;
pub use login::LoginPage;
pub use product_info::{parse_metadata_line, parse_pricing_block, ProductDetails, ProductInfoPage};
pub use register::RegisterPage;
pub use results::ResultsPage;
