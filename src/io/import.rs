use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use tracing::{debug, warn};

use crate::application::{AppError, CirculationService};
use crate::domain::{Customer, CustomerId, ReservationLedger};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    /// One-based row in the input
    pub row: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// One reservation as it appears in an import file.
/// `is_priority` is kept untyped so non-boolean values can be reported.
#[derive(Debug, Clone, Deserialize)]
struct ReservationRow {
    id: CustomerId,
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    is_priority: Option<Value>,
}

impl ReservationRow {
    fn into_parts(self) -> (Customer, Option<bool>) {
        let mut customer = Customer::new(self.id, self.name);
        if let Some(state) = self.state.filter(|s| !s.is_empty()) {
            customer = customer.with_state(state);
        }
        (customer, self.is_priority.as_ref().and_then(Value::as_bool))
    }
}

/// Customer row for region reports
#[derive(Debug, Deserialize)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    state: Option<String>,
}

/// Importer for loading reservations into a book
pub struct Importer<'a> {
    service: &'a CirculationService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a CirculationService) -> Self {
        Self { service }
    }

    /// Import reservations from a JSON array, appending them in file order.
    /// Rows that fail validation are reported and skipped.
    pub async fn import_reservations_json<R: Read>(
        &self,
        title: &str,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let rows: Vec<Value> =
            serde_json::from_reader(reader).context("Expected a JSON array of reservations")?;

        // Fails early if the book does not exist.
        self.service.get_book(title).await?;

        let mut scratch: ReservationLedger<Customer> = ReservationLedger::new();
        let mut imported = 0;
        let mut errors = Vec::new();

        for (index, value) in rows.into_iter().enumerate() {
            let row_num = index + 1;

            let row: ReservationRow = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        row: row_num,
                        field: None,
                        error: format!("Invalid row: {}", e),
                    });
                    continue;
                }
            };

            let (customer, is_priority) = row.into_parts();

            let outcome = if options.dry_run {
                scratch
                    .try_add_reservation(customer, is_priority)
                    .map(|_| ())
                    .map_err(AppError::from)
            } else {
                self.service
                    .add_reservation(title, customer, is_priority)
                    .await
                    .map(|_| ())
            };

            match outcome {
                Ok(()) => imported += 1,
                Err(AppError::InvalidArgument(message)) => {
                    warn!(row = row_num, "skipping reservation: {}", message);
                    errors.push(ImportError {
                        row: row_num,
                        field: Some("is_priority".to_string()),
                        error: message,
                    });
                }
                Err(other) => return Err(other.into()),
            }
        }

        debug!(title, imported, rejected = errors.len(), "import finished");
        Ok(ImportResult { imported, errors })
    }
}

/// Read customers from CSV with header `id,name,state`.
pub fn read_customers_csv<R: Read>(reader: R) -> Result<Vec<Customer>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut customers = Vec::new();

    for (index, result) in csv_reader.deserialize::<CustomerRow>().enumerate() {
        let row = result.with_context(|| format!("Invalid customer on line {}", index + 2))?;
        let mut customer = Customer::new(row.id, row.name);
        if let Some(state) = row.state.filter(|s| !s.is_empty()) {
            customer = customer.with_state(state);
        }
        customers.push(customer);
    }

    Ok(customers)
}
