// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use reserva::application::CirculationService;
use reserva::domain::Customer;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(CirculationService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = CirculationService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: customers from the region examples
pub struct SampleCustomers;

impl SampleCustomers {
    pub fn kaio() -> Customer {
        Customer::new(1, "Kaio Silveira")
    }

    /// Four customers, all in New England
    pub fn new_englanders() -> Vec<Customer> {
        vec![
            Customer::new(1, "Ada").with_state("MA"),
            Customer::new(2, "Grace").with_state("CT"),
            Customer::new(3, "Linus").with_state("ME"),
            Customer::new(4, "Barbara").with_state("VT"),
        ]
    }
}
