//! Test data: CSV-sourced registration records and unique emails.

use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::result::CarritoResult;

/// One registration attempt's worth of input data.
///
/// Sourced from a CSV file with a header row of
/// `firstName,lastName,telephone,password,subscribeNewsletter`; each record
/// is consumed exactly once to drive one registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRecord {
    /// First name
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Telephone number
    pub telephone: String,
    /// Account password
    pub password: String,
    /// Newsletter opt-in, `Yes` or `No` as written in the file
    #[serde(rename = "subscribeNewsletter")]
    pub subscribe_newsletter: String,
}

impl RegistrationRecord {
    /// Whether this record opts into the newsletter.
    #[must_use]
    pub fn subscribes_newsletter(&self) -> bool {
        self.subscribe_newsletter == "Yes"
    }
}

/// Read and parse the registration CSV into an ordered sequence of records.
/// The header row is required; empty lines are skipped.
///
/// # Errors
///
/// Returns [`crate::CarritoError::Csv`] for unreadable or malformed input.
pub fn load_registration_data(path: impl AsRef<Path>) -> CarritoResult<Vec<RegistrationRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<RegistrationRecord>, csv::Error>>()?;
    tracing::debug!(count = records.len(), "loaded registration records");
    Ok(records)
}

/// A fresh pseudo-random email for one registration attempt, so repeated
/// runs never collide on the storefront's unique-email constraint.
#[must_use]
pub fn random_email() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("auto_{}@nal.com", &suffix[..7])
}
